/// Index of a node in a [`Genealogy`](crate::Genealogy).
///
/// ```
/// # use mutmodels_core::NodeId;
/// let n = NodeId::from(3);
/// assert_eq!(n, 3);
/// assert_eq!(usize::from(n), 3);
/// assert_eq!(NodeId::new(3), n);
/// assert_eq!(n.raw(), 3);
/// ```
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, std::hash::Hash)]
pub struct NodeId(usize);

/// Index of a mutation within its [`Site`](crate::Site).
///
/// Ids are local to a site: the first mutation
/// added to a site is always `MutationId(0)`.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, std::hash::Hash)]
pub struct MutationId(usize);

impl_index_id!(NodeId);
impl_index_id!(MutationId);
