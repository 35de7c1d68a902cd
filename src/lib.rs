#![warn(missing_docs)]

//! Finite-site Markov mutation models.
//!
//! # Overview
//!
//! A [`MutationModel`] is an allele alphabet, a distribution of
//! ancestral states, and a row-stochastic transition matrix.
//! Given a collection of [`Site`]s, [`count_transitions`] tabulates
//! the observed parent-state to derived-state transitions, and
//! [`check_conformance`] compares them to the model.
//! [`MutationOverlay`] places mutations on a [`Genealogy`] so the
//! whole loop can be run in-process.
//!
//! # Where to find examples
//!
//! In the `demos/` directory of the project repository.

pub use mutmodels_core::validate_site_table;
pub use mutmodels_core::Allele;
pub use mutmodels_core::Error as RecordError;
pub use mutmodels_core::Genealogy;
pub use mutmodels_core::MutationEvent;
pub use mutmodels_core::MutationId;
pub use mutmodels_core::Node;
pub use mutmodels_core::NodeId;
pub use mutmodels_core::Position;
pub use mutmodels_core::Site;
pub use mutmodels_core::SiteTable;
pub use mutmodels_core::Time;
pub use mutmodels_markov::*;

/// Get the mutmodels version number.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
