//! Named mutation models.
//!
//! Every preset computes a root distribution and a
//! transition matrix, then defers to [`MutationModel::new`]
//! for validation.

use crate::model::MutationModel;
use crate::ModelValidationError;

/// Nucleotide alphabet, in matrix order.
pub const NUCLEOTIDES: [&str; 4] = ["A", "C", "G", "T"];

/// One-letter amino acid codes, in matrix order.
pub const AMINO_ACIDS: [&str; 20] = [
    "A", "R", "N", "D", "C", "Q", "E", "G", "H", "I", "L", "K", "M", "F", "P", "S", "T", "W",
    "Y", "V",
];

// A<->G and C<->T, indexed by NUCLEOTIDES
fn is_transition(i: usize, j: usize) -> bool {
    matches!((i, j), (0, 2) | (2, 0) | (1, 3) | (3, 1))
}

fn check_parameter(name: &str, value: f64) -> Result<(), ModelValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ModelValidationError::InvalidParameter {
            name: name.to_owned(),
            value,
        })
    }
}

/// Turn a matrix of off-diagonal rates into transition probabilities.
///
/// Every row is divided by the largest row total and the remainder
/// of each row is placed on the diagonal as silent mutations.
fn rates_to_transition_matrix(
    rates: &[Vec<f64>],
) -> Result<Vec<Vec<f64>>, ModelValidationError> {
    let row_totals = rates
        .iter()
        .enumerate()
        .map(|(i, row)| {
            row.iter()
                .enumerate()
                .filter(|&(j, _)| i != j)
                .map(|(_, r)| r)
                .sum::<f64>()
        })
        .collect::<Vec<_>>();
    let max_total = row_totals.iter().copied().fold(0.0, f64::max);
    check_parameter("maximum rate", max_total)?;

    Ok(rates
        .iter()
        .zip(row_totals.iter())
        .enumerate()
        .map(|(i, (row, total))| {
            row.iter()
                .enumerate()
                .map(|(j, r)| {
                    if i == j {
                        (1.0 - total / max_total).max(0.0)
                    } else {
                        r / max_total
                    }
                })
                .collect()
        })
        .collect())
}

/// Alleles `0` and `1`, ancestral state always `0`,
/// and every mutation flips the state.
pub fn binary() -> Result<MutationModel, ModelValidationError> {
    MutationModel::new(
        ["0", "1"],
        vec![1.0, 0.0],
        vec![vec![0.0, 1.0], vec![1.0, 0.0]],
    )
}

/// Equal probabilities over an arbitrary alphabet.
///
/// The root distribution is uniform and every mutation
/// changes the state, each alternative being equally likely.
///
/// ```
/// let m = mutmodels_markov::presets::uniform(["x", "y", "z"]).unwrap();
/// assert_eq!(m.transition_probability(0, 1), Some(0.5));
/// assert_eq!(m.silent_probability(2), Some(0.0));
/// ```
pub fn uniform<I, A>(alleles: I) -> Result<MutationModel, ModelValidationError>
where
    I: IntoIterator<Item = A>,
    A: Into<mutmodels_core::Allele>,
{
    let alleles = alleles
        .into_iter()
        .map(|a| a.into())
        .collect::<Vec<mutmodels_core::Allele>>();
    let k = alleles.len();
    if k < 2 {
        return Err(ModelValidationError::TooFewAlleles { found: k });
    }
    let off = 1.0 / (k - 1) as f64;
    let matrix = (0..k)
        .map(|i| (0..k).map(|j| if i == j { 0.0 } else { off }).collect())
        .collect();
    MutationModel::new(alleles, vec![1.0 / k as f64; k], matrix)
}

/// Jukes-Cantor: equal-probability nucleotide model.
pub fn jc69() -> Result<MutationModel, ModelValidationError> {
    uniform(NUCLEOTIDES)
}

/// Kimura's two-parameter model.
///
/// Transitions (A<->G, C<->T) are `kappa` times as likely
/// as each transversion. The root distribution is uniform.
///
/// ```
/// let m = mutmodels_markov::presets::k80(2.0).unwrap();
/// // A -> G is a transition, A -> C a transversion
/// assert!((m.transition_probability(0, 2).unwrap() - 0.5).abs() < 1e-12);
/// assert!((m.transition_probability(0, 1).unwrap() - 0.25).abs() < 1e-12);
/// ```
pub fn k80(kappa: f64) -> Result<MutationModel, ModelValidationError> {
    hky(kappa, [0.25; 4])
}

/// Hasegawa-Kishino-Yano nucleotide model.
///
/// The rate from `i` to `j` is `kappa * pi[j]` for transitions
/// and `pi[j]` for transversions. Unequal `equilibrium_frequencies`
/// produce unequal row totals, which become silent mutations.
pub fn hky(
    kappa: f64,
    equilibrium_frequencies: [f64; 4],
) -> Result<MutationModel, ModelValidationError> {
    check_parameter("kappa", kappa)?;
    let rates = (0..4)
        .map(|i| {
            (0..4)
                .map(|j| match (i == j, is_transition(i, j)) {
                    (true, _) => 0.0,
                    (false, true) => kappa * equilibrium_frequencies[j],
                    (false, false) => equilibrium_frequencies[j],
                })
                .collect()
        })
        .collect::<Vec<Vec<f64>>>();
    let matrix = rates_to_transition_matrix(&rates)?;
    MutationModel::new(NUCLEOTIDES, equilibrium_frequencies.to_vec(), matrix)
}

/// General time-reversible nucleotide model.
///
/// `relative_rates` are for the pairs AC, AG, AT, CG, CT and GT,
/// and the rate from `i` to `j` is `relative_rates[ij] * pi[j]`.
pub fn gtr(
    relative_rates: [f64; 6],
    equilibrium_frequencies: [f64; 4],
) -> Result<MutationModel, ModelValidationError> {
    for &r in &relative_rates {
        if !r.is_finite() || r < 0.0 {
            return Err(ModelValidationError::InvalidParameter {
                name: "relative rate".to_owned(),
                value: r,
            });
        }
    }
    let pair_index = |i: usize, j: usize| -> usize {
        let (a, b) = if i < j { (i, j) } else { (j, i) };
        match (a, b) {
            (0, 1) => 0,
            (0, 2) => 1,
            (0, 3) => 2,
            (1, 2) => 3,
            (1, 3) => 4,
            _ => 5,
        }
    };
    let rates = (0..4)
        .map(|i| {
            (0..4)
                .map(|j| {
                    if i == j {
                        0.0
                    } else {
                        relative_rates[pair_index(i, j)] * equilibrium_frequencies[j]
                    }
                })
                .collect()
        })
        .collect::<Vec<Vec<f64>>>();
    let matrix = rates_to_transition_matrix(&rates)?;
    MutationModel::new(NUCLEOTIDES, equilibrium_frequencies.to_vec(), matrix)
}

/// Equal-probability model over the 20 amino acids.
pub fn amino_acids() -> Result<MutationModel, ModelValidationError> {
    uniform(AMINO_ACIDS)
}
