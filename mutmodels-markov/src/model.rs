use std::collections::HashMap;

use mutmodels_core::Allele;
use rand::distr::weighted::WeightedIndex;
use rand::Rng;

use crate::Error;
use crate::ModelValidationError;

/// Tolerance used when checking that probabilities sum to one.
pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// A finite-site Markov mutation model.
///
/// The model is an allele alphabet, the distribution of
/// ancestral states at new sites, and a transition matrix
/// whose entry `(i, j)` is the probability that a mutation
/// arising on allele `i` produces allele `j`.
/// Diagonal entries are silent mutations and may be non-zero.
///
/// Models are validated once, on construction, and are
/// immutable afterwards.
///
/// ```
/// use mutmodels_markov::MutationModel;
///
/// let model = MutationModel::new(
///     ["0", "1"],
///     vec![0.5, 0.5],
///     vec![vec![0.0, 1.0], vec![1.0, 0.0]],
/// )
/// .unwrap();
/// assert_eq!(model.num_alleles(), 2);
/// assert_eq!(model.index_of("1").unwrap(), 1);
/// assert!(model.index_of("2").is_err());
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "ModelParts", into = "ModelParts")
)]
pub struct MutationModel {
    alleles: Vec<Allele>,
    root_distribution: Vec<f64>,
    transition_matrix: Vec<Vec<f64>>,
    lookup: HashMap<Allele, usize>,
    root_sampler: WeightedIndex<f64>,
    row_samplers: Vec<WeightedIndex<f64>>,
}

fn check_probabilities(values: &[f64]) -> Result<f64, ModelValidationError> {
    let mut sum = 0.0;
    for &value in values {
        if !value.is_finite() {
            return Err(ModelValidationError::NonFiniteProbability { value });
        }
        if value < 0.0 {
            return Err(ModelValidationError::NegativeProbability { value });
        }
        sum += value;
    }
    Ok(sum)
}

fn check_length(what: &str, expected: usize, found: usize) -> Result<(), ModelValidationError> {
    if expected != found {
        Err(ModelValidationError::LengthMismatch {
            what: what.to_owned(),
            expected,
            found,
        })
    } else {
        Ok(())
    }
}

impl MutationModel {
    /// Build a model.
    ///
    /// # Errors
    ///
    /// [`ModelValidationError`] if there are fewer than two alleles,
    /// an allele is repeated, lengths disagree, a probability is
    /// negative or not finite, or the root distribution or any
    /// row of the transition matrix does not sum to one within
    /// [`PROBABILITY_TOLERANCE`].
    pub fn new<I, A>(
        alleles: I,
        root_distribution: Vec<f64>,
        transition_matrix: Vec<Vec<f64>>,
    ) -> Result<Self, ModelValidationError>
    where
        I: IntoIterator<Item = A>,
        A: Into<Allele>,
    {
        let alleles = alleles.into_iter().map(|a| a.into()).collect::<Vec<_>>();
        let k = alleles.len();
        if k < 2 {
            return Err(ModelValidationError::TooFewAlleles { found: k });
        }
        let mut lookup = HashMap::with_capacity(k);
        for (i, a) in alleles.iter().enumerate() {
            if lookup.insert(a.clone(), i).is_some() {
                return Err(ModelValidationError::DuplicateAllele { allele: a.clone() });
            }
        }

        check_length("root distribution", k, root_distribution.len())?;
        check_length("transition matrix", k, transition_matrix.len())?;
        for (i, row) in transition_matrix.iter().enumerate() {
            check_length(&format!("transition matrix row {i}"), k, row.len())?;
        }

        let sum = check_probabilities(&root_distribution)?;
        if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(ModelValidationError::RootDistributionSum { sum });
        }
        for (row, values) in transition_matrix.iter().enumerate() {
            let sum = check_probabilities(values)?;
            if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
                return Err(ModelValidationError::RowSum { row, sum });
            }
        }

        let root_sampler = WeightedIndex::new(root_distribution.iter())
            .map_err(|_| ModelValidationError::RootDistributionSum { sum })?;
        let row_samplers = transition_matrix
            .iter()
            .enumerate()
            .map(|(row, values)| {
                WeightedIndex::new(values.iter()).map_err(|_| ModelValidationError::RowSum {
                    row,
                    sum: values.iter().sum(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            alleles,
            root_distribution,
            transition_matrix,
            lookup,
            root_sampler,
            row_samplers,
        })
    }

    /// The allele alphabet, in matrix order
    pub fn alleles(&self) -> &[Allele] {
        &self.alleles
    }

    /// Size of the alphabet
    pub fn num_alleles(&self) -> usize {
        self.alleles.len()
    }

    /// The allele at matrix index `index`
    pub fn allele(&self, index: usize) -> Option<&Allele> {
        self.alleles.get(index)
    }

    /// Distribution of ancestral states
    pub fn root_distribution(&self) -> &[f64] {
        &self.root_distribution
    }

    /// The row-stochastic transition matrix
    pub fn transition_matrix(&self) -> &[Vec<f64>] {
        &self.transition_matrix
    }

    /// Probability that a mutation on `from` produces `to`.
    pub fn transition_probability(&self, from: usize, to: usize) -> Option<f64> {
        self.transition_matrix.get(from)?.get(to).copied()
    }

    /// Probability that a mutation on allele `index` is silent.
    pub fn silent_probability(&self, index: usize) -> Option<f64> {
        self.transition_probability(index, index)
    }

    /// `true` if `allele` is in the alphabet
    pub fn contains(&self, allele: &str) -> bool {
        self.lookup.contains_key(allele)
    }

    /// Matrix index of `allele`.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownAllele`] if `allele` is not in the alphabet.
    pub fn index_of(&self, allele: &str) -> Result<usize, Error> {
        self.lookup
            .get(allele)
            .copied()
            .ok_or_else(|| Error::UnknownAllele {
                allele: Allele::from(allele),
            })
    }

    /// Draw the index of an ancestral state.
    pub fn sample_root<R: Rng>(&self, rng: &mut R) -> usize {
        rng.sample(&self.root_sampler)
    }

    /// Draw the index of the state produced by a
    /// mutation on allele `from`.
    ///
    /// `None` if `from` is out of range.
    pub fn sample_transition<R: Rng>(&self, from: usize, rng: &mut R) -> Option<usize> {
        self.row_samplers.get(from).map(|d| rng.sample(d))
    }
}

impl PartialEq for MutationModel {
    fn eq(&self, other: &Self) -> bool {
        self.alleles == other.alleles
            && self.root_distribution == other.root_distribution
            && self.transition_matrix == other.transition_matrix
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct ModelParts {
    alleles: Vec<String>,
    root_distribution: Vec<f64>,
    transition_matrix: Vec<Vec<f64>>,
}

#[cfg(feature = "serde")]
impl TryFrom<ModelParts> for MutationModel {
    type Error = ModelValidationError;

    fn try_from(value: ModelParts) -> Result<Self, Self::Error> {
        Self::new(
            value.alleles,
            value.root_distribution,
            value.transition_matrix,
        )
    }
}

#[cfg(feature = "serde")]
impl From<MutationModel> for ModelParts {
    fn from(value: MutationModel) -> Self {
        Self {
            alleles: value.alleles.into_iter().map(String::from).collect(),
            root_distribution: value.root_distribution,
            transition_matrix: value.transition_matrix,
        }
    }
}
