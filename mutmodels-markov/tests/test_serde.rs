#![cfg(feature = "serde")]

use mutmodels_markov::{presets, MutationModel};

#[test]
fn test_model_json() {
    let model = presets::k80(2.0).unwrap();
    let json = serde_json::to_string(&model).unwrap();
    let back: MutationModel = serde_json::from_str(&json).unwrap();
    assert_eq!(model, back);
    assert_eq!(back.index_of("T").unwrap(), 3);
}

#[test]
fn test_invalid_model_json_is_rejected() {
    let json = r#"{
        "alleles": ["A", "C"],
        "root_distribution": [0.5, 0.5],
        "transition_matrix": [[0.0, 0.9], [1.0, 0.0]]
    }"#;
    let e = serde_json::from_str::<MutationModel>(json).unwrap_err();
    assert!(e.to_string().contains("row 0"));
}
