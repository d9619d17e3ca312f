// SPDX-License-Identifier: Apache-2.0

//! Read-only views over a decoded tree.
//!
//! Lifetimes: `'t` borrows the decoder's node pool, `'a` is the input
//! buffer lifetime. Keys and string values are slices of the input.

use crate::int_parser::Integer;
use crate::pool::{Kind, Node, NodeId, Scalar};

/// A successfully decoded document.
#[derive(Debug, Clone, Copy)]
pub struct Tree<'t, 'a> {
    nodes: &'t [Node<'a>],
    root: Option<NodeId>,
}

impl<'t, 'a> Tree<'t, 'a> {
    pub(crate) fn new(nodes: &'t [Node<'a>], root: Option<NodeId>) -> Self {
        Self { nodes, root }
    }

    /// The root object.
    pub fn root(&self) -> Object<'t, 'a> {
        Object {
            nodes: self.nodes,
            first: self.root,
        }
    }

    /// Number of pool slots used, which is the total member count.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Follows `keys` through nested objects starting at the root.
    ///
    /// # Example
    /// ```
    /// use picotree::Decoder;
    /// let mut decoder = Decoder::<8>::new();
    /// let tree = decoder.decode(r#"{"net": {"port": 8080}}"#).unwrap();
    /// assert_eq!(tree.path(&["net", "port"]).and_then(|v| v.as_int()), Some(8080));
    /// ```
    pub fn path(&self, keys: &[&str]) -> Option<Value<'t, 'a>> {
        let mut value = Value::Object(self.root());
        for key in keys {
            value = value.as_object()?.get(key)?;
        }
        Some(value)
    }
}

/// An object: a chain of members in document order.
#[derive(Debug, Clone, Copy)]
pub struct Object<'t, 'a> {
    nodes: &'t [Node<'a>],
    first: Option<NodeId>,
}

impl<'t, 'a> Object<'t, 'a> {
    pub fn members(&self) -> Members<'t, 'a> {
        Members {
            nodes: self.nodes,
            next: self.first,
        }
    }

    /// Value of the first member named `key`. Duplicate keys are kept, later
    /// ones are only reachable through [`members`](Self::members).
    pub fn get(&self, key: &str) -> Option<Value<'t, 'a>> {
        self.members().find(|m| m.key == key).map(|m| m.value)
    }

    pub fn len(&self) -> usize {
        self.members().count()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }
}

/// A key/value pair of an object.
#[derive(Debug, Clone, Copy)]
pub struct Member<'t, 'a> {
    pub key: &'a str,
    pub value: Value<'t, 'a>,
}

/// A member value.
#[derive(Debug, Clone, Copy)]
pub enum Value<'t, 'a> {
    /// A string, borrowed from the input.
    Str(&'a str),
    /// An integer of the configured width.
    Int(Integer),
    /// A nested object.
    Object(Object<'t, 'a>),
}

impl<'t, 'a> Value<'t, 'a> {
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::Str(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<Integer> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<Object<'t, 'a>> {
        match self {
            Value::Object(o) => Some(*o),
            _ => None,
        }
    }
}

/// Iterator over the members of an [`Object`].
pub struct Members<'t, 'a> {
    nodes: &'t [Node<'a>],
    next: Option<NodeId>,
}

impl<'t, 'a> Iterator for Members<'t, 'a> {
    type Item = Member<'t, 'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.next?.index())?;
        self.next = node.next;
        let value = match node.kind {
            Kind::Leaf(Scalar::Str(s)) => Value::Str(s),
            Kind::Leaf(Scalar::Int(n)) => Value::Int(n),
            Kind::Object(first) => Value::Object(Object {
                nodes: self.nodes,
                first,
            }),
        };
        Some(Member {
            key: node.key,
            value,
        })
    }
}
