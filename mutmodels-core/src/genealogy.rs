use crate::Error;
use crate::NodeId;
use crate::Position;
use crate::Result;
use crate::Time;

/// A node of a [`Genealogy`]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Node {
    /// Birth time
    pub time: Time,
    /// The parent node, `None` for a root
    pub parent: Option<NodeId>,
}

/// A single tree spanning `[0, sequence_length)`.
///
/// Time runs forwards, so every child is strictly
/// more recent than its parent. Nodes must be added
/// parents-first. More than one root is allowed.
///
/// ```
/// # use mutmodels_core::*;
/// let mut g = Genealogy::new(Position::new_valid(100)).unwrap();
/// let root = g.add_node(Time::new_valid(0.0), None).unwrap();
/// let a = g.add_node(Time::new_valid(10.0), Some(root)).unwrap();
/// let b = g.add_node(Time::new_valid(10.0), Some(root)).unwrap();
/// assert_eq!(g.branches().count(), 2);
/// assert_eq!(g.branch_length(a), Some(10.0));
/// assert!(g.is_ancestor(root, b));
/// assert!(!g.is_ancestor(a, b));
/// ```
#[derive(Clone, Debug)]
pub struct Genealogy {
    sequence_length: Position,
    nodes: Vec<Node>,
}

impl Genealogy {
    /// # Errors
    ///
    /// [`Error::InvalidSequenceLength`] if `sequence_length` is zero.
    pub fn new(sequence_length: Position) -> Result<Self> {
        if sequence_length == 0 {
            return Err(Error::InvalidSequenceLength(sequence_length));
        }
        Ok(Self {
            sequence_length,
            nodes: vec![],
        })
    }

    /// Add a node.
    ///
    /// # Errors
    ///
    /// * [`Error::NodeOutOfBounds`] if `parent` has not been added.
    /// * [`Error::NodeTimesUnordered`] if `time` is not strictly
    ///   greater than the parent's time.
    pub fn add_node(&mut self, time: Time, parent: Option<NodeId>) -> Result<NodeId> {
        if let Some(p) = parent {
            let pnode = self.node(p).ok_or(Error::NodeOutOfBounds(p))?;
            if pnode.time >= time {
                return Err(Error::NodeTimesUnordered);
            }
        }
        self.nodes.push(Node { time, parent });
        Ok(NodeId::new(self.nodes.len() - 1))
    }

    /// Length of the genome
    pub fn sequence_length(&self) -> Position {
        self.sequence_length
    }

    /// Get a node
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.raw())
    }

    /// All nodes, indexed by [`NodeId`]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Parent of `id`, if any
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Iterate over `(parent, child)` for every non-root node
    pub fn branches(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.parent.map(|p| (p, NodeId::from(i))))
    }

    /// Length of the branch above `child`.
    ///
    /// `None` for roots and unknown nodes.
    pub fn branch_length(&self, child: NodeId) -> Option<f64> {
        let c = self.node(child)?;
        let p = self.node(c.parent?)?;
        Some(c.time.value() - p.time.value())
    }

    /// `true` if `ancestor` is `node` or lies on the path from `node` to its root.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(c) = current {
            if c == ancestor {
                return true;
            }
            current = self.parent(c);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_sequence_length() {
        assert!(matches!(
            Genealogy::new(Position::new_valid(0)),
            Err(Error::InvalidSequenceLength(_))
        ));
    }

    #[test]
    fn test_add_node_bad_parent() {
        let mut g = Genealogy::new(Position::new_valid(10)).unwrap();
        assert_eq!(
            g.add_node(Time::new_valid(1.0), Some(NodeId::from(0))),
            Err(Error::NodeOutOfBounds(NodeId::from(0)))
        );
    }

    #[test]
    fn test_node_time_order_violation() {
        let mut g = Genealogy::new(Position::new_valid(10)).unwrap();
        let root = g.add_node(Time::new_valid(5.0), None).unwrap();
        assert_eq!(
            g.add_node(Time::new_valid(5.0), Some(root)),
            Err(Error::NodeTimesUnordered)
        );
        assert_eq!(
            g.add_node(Time::new_valid(4.0), Some(root)),
            Err(Error::NodeTimesUnordered)
        );
        assert_eq!(g.num_nodes(), 1);
    }

    #[test]
    fn test_roots_have_no_branch() {
        let mut g = Genealogy::new(Position::new_valid(10)).unwrap();
        let r0 = g.add_node(Time::new_valid(0.0), None).unwrap();
        let r1 = g.add_node(Time::new_valid(1.0), None).unwrap();
        let c = g.add_node(Time::new_valid(3.0), Some(r1)).unwrap();
        assert!(g.branch_length(r0).is_none());
        assert_eq!(g.branch_length(c), Some(2.0));
        assert_eq!(g.branches().collect::<Vec<_>>(), vec![(r1, c)]);
        assert!(!g.is_ancestor(r0, c));
    }
}
