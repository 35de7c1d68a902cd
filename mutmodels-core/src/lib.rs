//! Core record types for finite-site mutation models.
//!
//! Sites, the mutations stacked on them, and the single-tree
//! genealogy that mutations are placed on.

use thiserror::Error;

mod macros;

mod allele;
mod genealogy;
mod newtypes;
mod position;
#[cfg(feature = "rand")]
mod rand_position;
mod site;
mod time;

pub use allele::Allele;
pub use genealogy::Genealogy;
pub use genealogy::Node;
pub use newtypes::MutationId;
pub use newtypes::NodeId;
pub use position::Position;
pub use site::validate_site_table;
pub use site::MutationEvent;
pub use site::Site;
pub use site::SiteTable;
pub use time::Time;

/// Error type for record construction and validation.
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    /// A negative genomic coordinate.
    #[error("invalid position: {0:?}")]
    PositionError(i64),
    /// A negative or non-finite time.
    #[error("invalid time: {0:?}")]
    TimeError(f64),
    /// A mutation names a parent that has not been added to its site.
    #[error("mutation parent {parent} out of bounds for site with {num_mutations} mutations")]
    MutationParentOutOfBounds {
        /// The requested parent
        parent: MutationId,
        /// Number of mutations at the site when the parent was requested
        num_mutations: usize,
    },
    /// A mutation is not strictly more recent than its parent.
    #[error("mutation time {time:?} is not more recent than parent time {parent_time:?}")]
    MutationTimeOrder {
        /// Time of the offending mutation
        time: Time,
        /// Time of its parent
        parent_time: Time,
    },
    /// Returned when site tables are not sorted by position.
    #[error("Site positions are unsorted")]
    UnsortedSitePosition,
    /// Returned when site tables contain duplicate positions.
    #[error("Duplicated site positions found")]
    DuplicatedSitePosition,
    /// Returned by [`Genealogy::new`].
    #[error("Invalid sequence length: {0:?}")]
    InvalidSequenceLength(Position),
    /// A node id that does not exist in a [`Genealogy`].
    #[error("Node is out of bounds: {0}")]
    NodeOutOfBounds(NodeId),
    /// A child node that is not strictly more recent than its parent.
    #[error("Node time order violation")]
    NodeTimesUnordered,
}

/// Result type for operations on records.
pub type Result<T> = std::result::Result<T, Error>;
