use mutmodels::*;
use proptest::prelude::*;
use rand::SeedableRng;

fn balanced_tree(depth: u32, sequence_length: i64) -> Genealogy {
    let mut g = Genealogy::new(Position::new_valid(sequence_length)).unwrap();
    let root = g.add_node(Time::new_valid(0.0), None).unwrap();
    let mut level = vec![root];
    for d in 1..=depth {
        let time = Time::from(d * 25);
        level = level
            .into_iter()
            .flat_map(|p| {
                [
                    g.add_node(time, Some(p)).unwrap(),
                    g.add_node(time, Some(p)).unwrap(),
                ]
            })
            .collect();
    }
    g
}

#[test]
fn test_version() {
    assert_eq!(version(), "0.1.0");
}

#[test]
fn test_simulate_count_validate() {
    let g = balanced_tree(4, 20_000);
    assert_eq!(g.num_nodes(), 31);
    let model = presets::k80(3.0).unwrap();
    let rates = RateMap::uniform(g.sequence_length(), 1e-3).unwrap();
    let overlay = MutationOverlay::new(&model, rates, OverlayConfig::new()).unwrap();
    let mut rng = rand::rngs::StdRng::seed_from_u64(1776);
    let sites = overlay.simulate(&g, &mut rng).unwrap();
    validate_site_table(&sites).unwrap();

    // shards by genomic window, counted in parallel
    let mid = sites.partition_point(|s| s.position() < 10_000);
    let (left, right) = sites.split_at(mid);
    let counts = count_transitions_par(&[left, right], &model).unwrap();
    assert_eq!(counts, count_transitions(&sites, &model).unwrap());

    let report = check_conformance(&counts, &model, 0.05).unwrap();
    assert!(report.passed(), "{report:?}");
    assert_eq!(report.tolerance(), 0.05);

    // the same data judged against the wrong model
    let jc = presets::jc69().unwrap();
    let report = check_conformance(&counts, &jc, 0.05).unwrap();
    assert!(!report.passed());
}

#[test]
fn test_model_mismatch_is_an_error_not_a_failure() {
    let g = balanced_tree(2, 1000);
    let model = presets::amino_acids().unwrap();
    let rates = RateMap::uniform(g.sequence_length(), 1e-2).unwrap();
    let overlay = MutationOverlay::new(&model, rates, OverlayConfig::new()).unwrap();
    let mut rng = rand::rngs::StdRng::seed_from_u64(2);
    let sites = overlay.simulate(&g, &mut rng).unwrap();
    assert!(!sites.is_empty());

    let nucleotides = presets::jc69().unwrap();
    assert!(matches!(
        count_transitions(&sites, &nucleotides),
        Err(Error::UnknownAllele { .. })
    ));
    let counts = count_transitions(&sites, &model).unwrap();
    assert_eq!(
        check_conformance(&counts, &nucleotides, 0.05),
        Err(Error::DimensionMismatch {
            counts: 20,
            model: 4
        })
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]
    #[test]
    fn test_windowed_shards_match_serial_count(depth in 1..5_u32, seed in 0..u64::MAX, num_windows in 1..8_i64) {
        let g = balanced_tree(depth, 4000);
        let model = presets::hky(2.0, [0.1, 0.2, 0.3, 0.4]).unwrap();
        let rates = RateMap::uniform(g.sequence_length(), 1e-3).unwrap();
        let overlay = MutationOverlay::new(&model, rates, OverlayConfig::new()).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let sites = overlay.simulate(&g, &mut rng).unwrap();

        let width = 4000 / num_windows + 1;
        let shards = sites
            .chunk_by(|a, b| i64::from(a.position()) / width == i64::from(b.position()) / width)
            .collect::<Vec<_>>();
        let serial = count_transitions(&sites, &model).unwrap();
        prop_assert_eq!(&count_transitions_par(&shards, &model).unwrap(), &serial);
        prop_assert_eq!(serial.total(), sites.iter().map(|s| s.num_mutations() as u64).sum::<u64>());
    }
}
