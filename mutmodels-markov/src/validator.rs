//! Compare observed transition counts with a model.
//!
//! Each row is scored by the maximum absolute deviation between
//! the empirical proportions `counts[i][j] / n_i` and the model's
//! probabilities `P[i][j]`. A row passes when that deviation is
//! at most the tolerance. Rows with no observations are reported
//! as [`RowStatus::InsufficientData`], never as failures.

use mutmodels_core::Allele;
use tracing::debug;

use crate::Error;
use crate::MutationModel;
use crate::Result;
use crate::TransitionCountMatrix;

/// Outcome for one row of the transition matrix
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RowStatus {
    /// Deviation within tolerance
    Pass,
    /// Deviation above tolerance
    Fail,
    /// No mutations were observed on this allele
    InsufficientData,
}

/// Conformance of a single row.
#[derive(Clone, Debug, PartialEq)]
pub struct RowConformance {
    /// Row index
    pub row: usize,
    /// The allele of this row
    pub allele: Allele,
    /// Number of mutations observed on `allele`
    pub observations: u64,
    /// Maximum absolute deviation, `None` without observations
    pub statistic: Option<f64>,
    /// Pearson's chi-squared over cells with positive expected count.
    ///
    /// Infinite if a transition the model forbids was observed.
    /// Informational only: it does not affect `status`.
    pub chi_squared: Option<f64>,
    /// Pass, fail, or insufficient data
    pub status: RowStatus,
}

/// Result of [`check_conformance`]
#[derive(Clone, Debug, PartialEq)]
pub struct ConformanceReport {
    tolerance: f64,
    rows: Vec<RowConformance>,
}

impl ConformanceReport {
    /// One entry per allele, in matrix order
    pub fn rows(&self) -> &[RowConformance] {
        &self.rows
    }

    /// The tolerance rows were checked against
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// `true` if no row failed.
    ///
    /// Rows without data do not count against conformance.
    pub fn passed(&self) -> bool {
        self.rows.iter().all(|r| r.status != RowStatus::Fail)
    }

    /// Rows whose deviation exceeded the tolerance
    pub fn failed_rows(&self) -> impl Iterator<Item = &RowConformance> {
        self.rows.iter().filter(|r| r.status == RowStatus::Fail)
    }

    /// Rows with no observations
    pub fn insufficient_rows(&self) -> impl Iterator<Item = &RowConformance> {
        self.rows
            .iter()
            .filter(|r| r.status == RowStatus::InsufficientData)
    }
}

fn max_abs_deviation(observed: &[u64], n: u64, expected: &[f64]) -> f64 {
    let n = n as f64;
    observed
        .iter()
        .zip(expected.iter())
        .map(|(&o, &p)| (o as f64 / n - p).abs())
        .fold(0.0, f64::max)
}

fn chi_squared(observed: &[u64], n: u64, expected: &[f64]) -> f64 {
    let n = n as f64;
    let mut stat = 0.0;
    for (&o, &p) in observed.iter().zip(expected.iter()) {
        let e = n * p;
        if e > 0.0 {
            stat += (o as f64 - e).powi(2) / e;
        } else if o > 0 {
            return f64::INFINITY;
        }
    }
    stat
}

/// Check observed transition counts against a model.
///
/// # Errors
///
/// * [`Error::DimensionMismatch`] if `counts` and `model`
///   have different alphabet sizes.
/// * [`Error::InvalidTolerance`] unless `0 <= tolerance <= 1`.
pub fn check_conformance(
    counts: &TransitionCountMatrix,
    model: &MutationModel,
    tolerance: f64,
) -> Result<ConformanceReport> {
    if counts.num_alleles() != model.num_alleles() {
        return Err(Error::DimensionMismatch {
            counts: counts.num_alleles(),
            model: model.num_alleles(),
        });
    }
    if !(0.0..=1.0).contains(&tolerance) {
        return Err(Error::InvalidTolerance(tolerance));
    }

    let rows = model
        .alleles()
        .iter()
        .zip(model.transition_matrix().iter())
        .enumerate()
        .map(|(row, (allele, expected))| {
            let observed = counts.row(row).unwrap_or(&[]);
            let n = observed.iter().sum::<u64>();
            if n == 0 {
                return RowConformance {
                    row,
                    allele: allele.clone(),
                    observations: 0,
                    statistic: None,
                    chi_squared: None,
                    status: RowStatus::InsufficientData,
                };
            }
            let statistic = max_abs_deviation(observed, n, expected);
            RowConformance {
                row,
                allele: allele.clone(),
                observations: n,
                statistic: Some(statistic),
                chi_squared: Some(chi_squared(observed, n, expected)),
                status: if statistic <= tolerance {
                    RowStatus::Pass
                } else {
                    RowStatus::Fail
                },
            }
        })
        .collect::<Vec<_>>();

    let report = ConformanceReport { tolerance, rows };
    debug!(
        tolerance,
        passed = report.passed(),
        failed = report.failed_rows().count(),
        insufficient = report.insufficient_rows().count(),
        "checked conformance"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets;

    #[test]
    fn test_invalid_tolerance() {
        let model = presets::binary().unwrap();
        let counts = TransitionCountMatrix::zeros(2);
        for t in [-0.1, 1.5, f64::NAN] {
            assert!(matches!(
                check_conformance(&counts, &model, t),
                Err(Error::InvalidTolerance(_))
            ));
        }
    }

    #[test]
    fn test_dimension_mismatch() {
        let model = presets::jc69().unwrap();
        let counts = TransitionCountMatrix::zeros(2);
        assert_eq!(
            check_conformance(&counts, &model, 0.05),
            Err(Error::DimensionMismatch {
                counts: 2,
                model: 4
            })
        );
    }

    #[test]
    fn test_no_data_is_not_failure() {
        let model = presets::jc69().unwrap();
        let counts = TransitionCountMatrix::zeros(4);
        let report = check_conformance(&counts, &model, 0.0).unwrap();
        assert!(report.passed());
        assert_eq!(report.insufficient_rows().count(), 4);
    }

    #[test]
    fn test_statistics() {
        assert_eq!(max_abs_deviation(&[1, 3], 4, &[0.5, 0.5]), 0.25);
        assert_eq!(chi_squared(&[1, 3], 4, &[0.5, 0.5]), 1.0);
        assert_eq!(chi_squared(&[1, 3], 4, &[0.0, 1.0]), f64::INFINITY);
        assert_eq!(chi_squared(&[0, 4], 4, &[0.0, 1.0]), 0.0);
    }
}
