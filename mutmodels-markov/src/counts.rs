use std::ops::{Add, AddAssign, Range};

use mutmodels_core::Position;
use mutmodels_core::Site;
use rayon::prelude::*;
use tracing::debug;

use crate::Error;
use crate::MutationModel;
use crate::Result;

/// Observed transition counts.
///
/// Indexed like [`MutationModel::transition_matrix`]:
/// entry `(i, j)` is the number of mutations whose parent
/// state is allele `i` and whose derived state is allele `j`.
///
/// Count matrices of the same size add elementwise,
/// so counts over disjoint shards of sites can be merged
/// in any order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionCountMatrix {
    num_alleles: usize,
    counts: Vec<u64>, // row-major
}

impl TransitionCountMatrix {
    /// An all-zero `num_alleles x num_alleles` matrix
    pub fn zeros(num_alleles: usize) -> Self {
        Self {
            num_alleles,
            counts: vec![0; num_alleles * num_alleles],
        }
    }

    /// Number of rows (and columns)
    pub fn num_alleles(&self) -> usize {
        self.num_alleles
    }

    /// Count for `(from, to)`, or `None` if out of range.
    pub fn get(&self, from: usize, to: usize) -> Option<u64> {
        if from < self.num_alleles && to < self.num_alleles {
            Some(self.counts[from * self.num_alleles + to])
        } else {
            None
        }
    }

    /// Counts of row `from`
    pub fn row(&self, from: usize) -> Option<&[u64]> {
        if from < self.num_alleles {
            let start = from * self.num_alleles;
            Some(&self.counts[start..start + self.num_alleles])
        } else {
            None
        }
    }

    /// Number of mutations observed on allele `from`.
    pub fn row_total(&self, from: usize) -> Option<u64> {
        self.row(from).map(|r| r.iter().sum())
    }

    /// Total number of mutations counted
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Iterate over `(from, to, count)`
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(move |(i, &c)| (i / self.num_alleles, i % self.num_alleles, c))
    }

    fn increment(&mut self, from: usize, to: usize) {
        self.counts[from * self.num_alleles + to] += 1;
    }

    /// Add `other` into `self`.
    ///
    /// # Errors
    ///
    /// [`Error::DimensionMismatch`] if the matrices differ in size.
    pub fn merge(&mut self, other: &Self) -> Result<()> {
        if self.num_alleles != other.num_alleles {
            return Err(Error::DimensionMismatch {
                counts: other.num_alleles,
                model: self.num_alleles,
            });
        }
        self.counts
            .iter_mut()
            .zip(other.counts.iter())
            .for_each(|(a, b)| *a += b);
        Ok(())
    }
}

/// # Panics
///
/// If the matrices differ in size.
/// Use [`TransitionCountMatrix::merge`] to get an error instead.
impl AddAssign<&TransitionCountMatrix> for TransitionCountMatrix {
    fn add_assign(&mut self, rhs: &TransitionCountMatrix) {
        assert_eq!(
            self.num_alleles, rhs.num_alleles,
            "cannot add count matrices of different sizes"
        );
        self.counts
            .iter_mut()
            .zip(rhs.counts.iter())
            .for_each(|(a, b)| *a += b);
    }
}

/// # Panics
///
/// If the matrices differ in size.
impl Add for TransitionCountMatrix {
    type Output = TransitionCountMatrix;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += &rhs;
        self
    }
}

fn count_into<'a, I>(
    sites: I,
    model: &MutationModel,
    counts: &mut TransitionCountMatrix,
) -> Result<(usize, usize)>
where
    I: IntoIterator<Item = &'a Site>,
{
    let mut num_sites = 0;
    let mut num_mutations = 0;
    for site in sites {
        // An unknown ancestral state is a mismatch even at a site with no mutations.
        model.index_of(site.ancestral_state().as_str())?;
        for (from, to) in site.transitions() {
            let i = model.index_of(from.as_str())?;
            let j = model.index_of(to.as_str())?;
            counts.increment(i, j);
        }
        num_sites += 1;
        num_mutations += site.num_mutations();
    }
    Ok((num_sites, num_mutations))
}

/// Tabulate parent-state to derived-state transitions over `sites`.
///
/// The parent state of a mutation is the site's ancestral state
/// if it has no parent and the parent's derived state otherwise.
///
/// # Errors
///
/// [`Error::UnknownAllele`] if an ancestral or derived state
/// is not in the model's alphabet. No partial counts are returned.
///
/// ```
/// use mutmodels_core::{Position, Site, Time};
/// use mutmodels_markov::{count_transitions, presets};
///
/// let model = presets::jc69().unwrap();
/// let mut site = Site::new(Position::new_valid(1), "A");
/// site.add_mutation("C", Time::new_valid(1.0), None).unwrap();
/// let counts = count_transitions(&[site], &model).unwrap();
/// assert_eq!(counts.get(0, 1), Some(1));
/// assert_eq!(counts.total(), 1);
/// ```
pub fn count_transitions(sites: &[Site], model: &MutationModel) -> Result<TransitionCountMatrix> {
    let mut counts = TransitionCountMatrix::zeros(model.num_alleles());
    let (num_sites, num_mutations) = count_into(sites, model, &mut counts)?;
    debug!(num_sites, num_mutations, "counted transitions");
    Ok(counts)
}

/// As [`count_transitions`], restricted to sites with positions in `window`.
pub fn count_transitions_in(
    sites: &[Site],
    model: &MutationModel,
    window: Range<Position>,
) -> Result<TransitionCountMatrix> {
    let mut counts = TransitionCountMatrix::zeros(model.num_alleles());
    let (num_sites, num_mutations) = count_into(
        sites.iter().filter(|s| window.contains(&s.position())),
        model,
        &mut counts,
    )?;
    debug!(
        left = %window.start,
        right = %window.end,
        num_sites,
        num_mutations,
        "counted transitions in window"
    );
    Ok(counts)
}

/// Count each shard in parallel and merge the results.
///
/// The result equals [`count_transitions`] applied to
/// the concatenation of all shards.
pub fn count_transitions_par(
    shards: &[&[Site]],
    model: &MutationModel,
) -> Result<TransitionCountMatrix> {
    let k = model.num_alleles();
    shards
        .par_iter()
        .map(|shard| -> Result<TransitionCountMatrix> {
            let mut counts = TransitionCountMatrix::zeros(k);
            count_into(shard.iter(), model, &mut counts)?;
            Ok(counts)
        })
        .try_reduce(
            || TransitionCountMatrix::zeros(k),
            |mut a, b| {
                a += &b;
                Ok(a)
            },
        )
}
