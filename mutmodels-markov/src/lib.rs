//! Finite-site Markov mutation models.
//!
//! * [`MutationModel`]: an allele alphabet, a root distribution
//!   and a transition matrix, validated on construction.
//!   Named models live in [`presets`].
//! * [`count_transitions`]: tabulate the parent-state to
//!   derived-state transitions observed at a set of sites.
//! * [`check_conformance`]: compare those counts to the model.
//! * [`MutationOverlay`]: place mutations on a genealogy.

mod counts;
mod error;
mod model;
mod overlay;
pub mod presets;
mod rate_map;
mod validator;

pub use counts::count_transitions;
pub use counts::count_transitions_in;
pub use counts::count_transitions_par;
pub use counts::TransitionCountMatrix;
pub use error::Error;
pub use error::ModelValidationError;
pub use error::Result;
pub use model::MutationModel;
pub use model::PROBABILITY_TOLERANCE;
pub use overlay::MutationOverlay;
pub use overlay::OverlayConfig;
pub use rate_map::RateInterval;
pub use rate_map::RateMap;
pub use rate_map::RateMapBuilder;
pub use validator::check_conformance;
pub use validator::ConformanceReport;
pub use validator::RowConformance;
pub use validator::RowStatus;
