// SPDX-License-Identifier: Apache-2.0

use crate::int_parser::Integer;
use crate::parse_error::{ParseError, Resource};

/// Index of a node in the pool, valid for the rest of the decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) const fn new(index: u32) -> Self {
        NodeId(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A leaf value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Scalar<'a> {
    Str(&'a str),
    Int(Integer),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Kind<'a> {
    Leaf(Scalar<'a>),
    /// First member of the nested object, `None` when it is empty
    Object(Option<NodeId>),
}

/// One object member.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Node<'a> {
    pub key: &'a str,
    pub kind: Kind<'a>,
    /// Following member of the same object
    pub next: Option<NodeId>,
}

impl<'a> Node<'a> {
    /// Freshly allocated member, its key and value are bound later.
    pub const UNBOUND: Self = Node {
        key: "",
        kind: Kind::Object(None),
        next: None,
    };
}

/// Fixed-capacity bump allocator for tree nodes.
///
/// Nodes are never freed one by one. [`reset`](Self::reset) only rewinds the
/// allocation index; slots past it hold stale data and are never read.
pub(crate) struct NodePool<'a, const N: usize> {
    nodes: [Node<'a>; N],
    top: usize,
}

impl<'a, const N: usize> NodePool<'a, N> {
    pub const fn new() -> Self {
        Self {
            nodes: [Node::UNBOUND; N],
            top: 0,
        }
    }

    pub fn reset(&mut self) {
        self.top = 0;
    }

    pub fn alloc(&mut self) -> Result<NodeId, ParseError> {
        let slot = self
            .nodes
            .get_mut(self.top)
            .ok_or(ParseError::NoMoreSpace(Resource::NodePool))?;
        *slot = Node::UNBOUND;
        let id = u32::try_from(self.top)
            .map(NodeId::new)
            .map_err(|_| ParseError::NoMoreSpace(Resource::NodePool))?;
        self.top += 1;
        Ok(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Result<&mut Node<'a>, ParseError> {
        self.nodes
            .get_mut(..self.top)
            .and_then(|live| live.get_mut(id.index()))
            .ok_or(ParseError::UnexpectedState("Node id past pool top"))
    }

    /// The allocated prefix of the pool.
    pub fn nodes(&self) -> &[Node<'a>] {
        self.nodes.get(..self.top).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.top
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_in_order_until_full() {
        let mut pool = NodePool::<3>::new();
        assert_eq!(pool.capacity(), 3);
        assert_eq!(pool.alloc().map(NodeId::index), Ok(0));
        assert_eq!(pool.alloc().map(NodeId::index), Ok(1));
        assert_eq!(pool.alloc().map(NodeId::index), Ok(2));
        assert_eq!(pool.alloc(), Err(ParseError::NoMoreSpace(Resource::NodePool)));
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn reset_rewinds_and_clears_reused_slots() {
        let mut pool = NodePool::<2>::new();
        let id = pool.alloc().unwrap();
        {
            let node = pool.get_mut(id).unwrap();
            node.key = "stale";
            node.kind = Kind::Leaf(Scalar::Int(7));
        }
        pool.reset();
        assert_eq!(pool.len(), 0);
        assert!(pool.nodes().is_empty());

        let id = pool.alloc().unwrap();
        assert_eq!(id.index(), 0);
        assert_eq!(pool.nodes()[0], Node::UNBOUND);
    }

    #[test]
    fn ids_past_top_are_rejected() {
        let mut pool = NodePool::<4>::new();
        let first = pool.alloc().unwrap();
        let second = pool.alloc().unwrap();
        pool.reset();
        pool.alloc().unwrap();
        assert!(pool.get_mut(first).is_ok());
        assert!(matches!(
            pool.get_mut(second),
            Err(ParseError::UnexpectedState(_))
        ));
    }

    #[test]
    fn zero_capacity_pool() {
        let mut pool = NodePool::<0>::new();
        assert_eq!(pool.alloc(), Err(ParseError::NoMoreSpace(Resource::NodePool)));
    }
}
