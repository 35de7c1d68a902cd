use mutmodels_core::{Allele, Position, Site, Time};
use mutmodels_markov::*;
use proptest::prelude::*;
use rand::SeedableRng;

fn t(x: f64) -> Time {
    Time::new_valid(x)
}

fn jc69_by_hand() -> MutationModel {
    let third = 1.0 / 3.0;
    MutationModel::new(
        ["A", "C", "G", "T"],
        vec![0.25; 4],
        (0..4)
            .map(|i| (0..4).map(|j| if i == j { 0.0 } else { third }).collect())
            .collect(),
    )
    .unwrap()
}

fn three_sites() -> Vec<Site> {
    let mut site1 = Site::new(Position::new_valid(1), "A");
    site1.add_mutation("C", t(1.0), None).unwrap();

    let mut site2 = Site::new(Position::new_valid(2), "G");
    let first = site2.add_mutation("T", t(1.0), None).unwrap();
    site2.add_mutation("A", t(2.0), Some(first)).unwrap();

    let site3 = Site::new(Position::new_valid(3), "C");
    vec![site1, site2, site3]
}

#[test]
fn test_three_site_scenario() {
    let model = jc69_by_hand();
    let counts = count_transitions(&three_sites(), &model).unwrap();

    let idx = |a: &str| model.index_of(a).unwrap();
    let mut expected = TransitionCountMatrix::zeros(4);
    assert_eq!(expected.get(idx("A"), idx("C")), Some(0));
    for (from, to, count) in counts.iter() {
        let want = match (
            model.allele(from).unwrap().as_str(),
            model.allele(to).unwrap().as_str(),
        ) {
            ("A", "C") | ("G", "T") | ("T", "A") => 1,
            _ => 0,
        };
        assert_eq!(count, want, "{from} -> {to}");
    }
    assert_eq!(counts.row_total(idx("A")), Some(1));
    assert_eq!(counts.row_total(idx("G")), Some(1));
    assert_eq!(counts.row_total(idx("T")), Some(1));
    assert_eq!(counts.row_total(idx("C")), Some(0));

    let report = check_conformance(&counts, &model, 0.05).unwrap();
    let c = &report.rows()[idx("C")];
    assert_eq!(c.allele, "C");
    assert_eq!(c.status, RowStatus::InsufficientData);
    assert_eq!(c.statistic, None);
    let insufficient = report
        .insufficient_rows()
        .map(|r| r.allele.clone())
        .collect::<Vec<_>>();
    assert_eq!(insufficient, vec![Allele::from("C")]);

    // a single observation is far from 1/3 in every cell
    assert_eq!(report.failed_rows().count(), 3);
    assert!(!report.passed());

    expected.merge(&counts).unwrap();
    assert_eq!(expected, counts);
}

#[test]
fn test_unknown_ancestral_state() {
    let model = jc69_by_hand();
    let site = Site::new(Position::new_valid(0), "N");
    assert_eq!(
        count_transitions(&[site], &model),
        Err(Error::UnknownAllele {
            allele: Allele::from("N")
        })
    );
}

#[test]
fn test_unknown_parent_state() {
    let model = presets::binary().unwrap();
    let mut site = Site::new(Position::new_valid(0), "0");
    let p = site.add_mutation("2", t(1.0), None).unwrap();
    site.add_mutation("1", t(2.0), Some(p)).unwrap();
    assert!(matches!(
        count_transitions(&[site], &model),
        Err(Error::UnknownAllele { .. })
    ));
}

#[test]
fn test_empty_sites_contribute_nothing() {
    let model = presets::jc69().unwrap();
    let sites = (0..10)
        .map(|i| Site::new(Position::new_valid(i), "G"))
        .collect::<Vec<_>>();
    let counts = count_transitions(&sites, &model).unwrap();
    assert_eq!(counts, TransitionCountMatrix::zeros(4));
}

#[test]
fn test_silent_mutations_are_counted_on_the_diagonal() {
    let model = presets::hky(2.0, [0.1, 0.2, 0.3, 0.4]).unwrap();
    let mut site = Site::new(Position::new_valid(0), "G");
    site.add_mutation("G", t(1.0), None).unwrap();
    let counts = count_transitions(&[site], &model).unwrap();
    assert_eq!(counts.get(2, 2), Some(1));
}

fn random_sites(seed: u64, num_sites: usize, model: &MutationModel) -> Vec<Site> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..num_sites)
        .map(|i| {
            let root = model.sample_root(&mut rng);
            let mut site = Site::new(Position::new_valid(i as i64), model.allele(root).unwrap());
            let mut state = root;
            let mut parent = None;
            for m in 0..(i % 4) {
                state = model.sample_transition(state, &mut rng).unwrap();
                parent = Some(
                    site.add_mutation(model.allele(state).unwrap(), t(m as f64 + 1.0), parent)
                        .unwrap(),
                );
            }
            site
        })
        .collect()
}

proptest! {
    #[test]
    fn test_shard_counts_add_up(seed in 0..u64::MAX, split in 0..200_usize) {
        let model = presets::k80(2.0).unwrap();
        let sites = random_sites(seed, 200, &model);
        let (left, right) = sites.split_at(split);
        let whole = count_transitions(&sites, &model).unwrap();
        let merged = count_transitions(left, &model).unwrap()
            + count_transitions(right, &model).unwrap();
        prop_assert_eq!(&whole, &merged);
        let par = count_transitions_par(&[left, right], &model).unwrap();
        prop_assert_eq!(&whole, &par);
    }
}

#[test]
fn test_parallel_counts_many_shards() {
    let model = presets::amino_acids().unwrap();
    let sites = random_sites(54321, 1000, &model);
    let shards = sites.chunks(37).collect::<Vec<_>>();
    let par = count_transitions_par(&shards, &model).unwrap();
    assert_eq!(par, count_transitions(&sites, &model).unwrap());
    assert!(count_transitions_par(&[], &model).unwrap().total() == 0);
}

#[test]
fn test_parallel_count_reports_errors() {
    let model = presets::jc69().unwrap();
    let good = random_sites(1, 10, &model);
    let bad = vec![Site::new(Position::new_valid(100), "N")];
    assert!(matches!(
        count_transitions_par(&[good.as_slice(), bad.as_slice()], &model),
        Err(Error::UnknownAllele { .. })
    ));
}

#[test]
fn test_windows_partition_the_genome() {
    let model = presets::jc69().unwrap();
    let sites = random_sites(7, 100, &model);
    let w0 = count_transitions_in(&sites, &model, Position::new_valid(0)..Position::new_valid(50))
        .unwrap();
    let w1 =
        count_transitions_in(&sites, &model, Position::new_valid(50)..Position::new_valid(100))
            .unwrap();
    assert_eq!(w0 + w1, count_transitions(&sites, &model).unwrap());
}
