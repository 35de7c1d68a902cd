use mutmodels_core::Allele;
use mutmodels_core::Position;
use thiserror::Error;

/// Reasons a [`MutationModel`](crate::MutationModel) cannot be built.
#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum ModelValidationError {
    /// Fewer than two alleles.
    #[error("a mutation model needs at least 2 alleles, found {found}")]
    TooFewAlleles {
        /// Number of alleles supplied
        found: usize,
    },
    /// The same allele appears more than once.
    #[error("duplicate allele: {allele}")]
    DuplicateAllele {
        /// The repeated allele
        allele: Allele,
    },
    /// A vector or matrix row has the wrong length.
    #[error("{what} has length {found}, expected {expected}")]
    LengthMismatch {
        /// Which input is malformed
        what: String,
        /// Number of alleles
        expected: usize,
        /// Length found
        found: usize,
    },
    /// A probability below zero.
    #[error("negative probability: {value}")]
    NegativeProbability {
        /// The offending value
        value: f64,
    },
    /// A NaN or infinite probability.
    #[error("non-finite probability: {value}")]
    NonFiniteProbability {
        /// The offending value
        value: f64,
    },
    /// The root distribution does not sum to one.
    #[error("root distribution sums to {sum}")]
    RootDistributionSum {
        /// The observed sum
        sum: f64,
    },
    /// A row of the transition matrix does not sum to one.
    #[error("transition matrix row {row} sums to {sum}")]
    RowSum {
        /// Row index
        row: usize,
        /// The observed sum
        sum: f64,
    },
    /// A preset received an invalid parameter.
    #[error("invalid value for {name}: {value}")]
    InvalidParameter {
        /// Parameter name
        name: String,
        /// The offending value
        value: f64,
    },
}

/// Primary error type.
///
/// Statistical non-conformance is never an error:
/// it is reported by [`check_conformance`](crate::check_conformance).
#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A malformed mutation model.
    #[error(transparent)]
    ModelValidation(#[from] ModelValidationError),
    /// An observed state is not in the model's alphabet.
    #[error("allele {allele} is not in the model's alphabet")]
    UnknownAllele {
        /// The unknown allele
        allele: Allele,
    },
    /// Count matrix and model disagree on the number of alleles.
    #[error("count matrix has {counts} alleles but the model has {model}")]
    DimensionMismatch {
        /// Alphabet size of the counts
        counts: usize,
        /// Alphabet size of the model
        model: usize,
    },
    /// Conformance tolerance outside of `[0, 1]`.
    #[error("invalid tolerance: {0}")]
    InvalidTolerance(f64),
    /// A rate interval with `left >= right` or an invalid rate.
    #[error("invalid rate interval [{left}, {right}) with rate {rate}")]
    InvalidRateInterval {
        /// Left end
        left: Position,
        /// Right end
        right: Position,
        /// Rate
        rate: f64,
    },
    /// Two rate intervals overlap.
    #[error("rate intervals overlap at {0}")]
    OverlappingRateIntervals(Position),
    /// A rate interval extends past the end of the genealogy.
    #[error("rate map ends at {rate_map_end}, past sequence length {sequence_length}")]
    RateMapOutOfBounds {
        /// Right end of the last interval
        rate_map_end: Position,
        /// Genealogy sequence length
        sequence_length: Position,
    },
    /// `start_time >= end_time`, or a non-finite start time.
    #[error("invalid time window [{start}, {end})")]
    InvalidTimeWindow {
        /// Window start
        start: f64,
        /// Window end
        end: f64,
    },
    /// A pre-existing mutation has no node, so it cannot be stacked on.
    #[error("mutation at position {0} has no node")]
    MissingMutationNode(Position),
    /// A pre-existing mutation maps to a node not in the genealogy.
    #[error("mutation at position {position} maps to unknown node {node}")]
    UnknownMutationNode {
        /// Site position
        position: Position,
        /// The unknown node
        node: mutmodels_core::NodeId,
    },
    /// A pre-existing site lies at or past the end of the genealogy.
    #[error("site at position {0} is outside of the genealogy")]
    SiteOutOfBounds(Position),
    /// A pre-existing mutation's time is not on the branch above its node.
    #[error("mutation at position {position} on node {node} has time {time}, outside of the node's branch")]
    MutationTimeOutsideBranch {
        /// Site position
        position: Position,
        /// The node the mutation maps to
        node: mutmodels_core::NodeId,
        /// Mutation time
        time: f64,
    },
    /// A redirection of a [`mutmodels_core::Error`].
    #[error(transparent)]
    Core(#[from] mutmodels_core::Error),
}

/// Result type for this crate
pub type Result<T> = std::result::Result<T, Error>;
