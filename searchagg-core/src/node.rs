//! # Recursive Named Container
//!
//! A [`Node`] pairs a variant payload with an ordered map of named child nodes, an open metadata
//! map, and (for pass-through families) the keys that matched nothing. On the wire all of them are
//! siblings in one flat object:
//!
//! ```json
//! {
//!   "aggregations": { "per_day": { "date_histogram": { "field": "ts", "calendar_interval": "day" } } },
//!   "meta": { "owner": "billing" },
//!   "terms": { "field": "customer" }
//! }
//! ```
//!
//! Trees can be arbitrarily deep. Decoding and encoding walk them with a heap-allocated work
//! stack (see [`decode`] and [`encode`]) so input depth never translates into call-stack depth.
//!
//! ## Example
//!
//! ```rust
//! use searchagg_core::node::Node;
//! use searchagg_core::{json_object, tagged_union};
//!
//! json_object! {
//!     pub struct Square {
//!         builder: SquareBuilder,
//!         fields {
//!             required side: f64 = "side",
//!         }
//!     }
//! }
//!
//! tagged_union! {
//!     pub enum Shape {
//!         kind: ShapeKind,
//!         family: "shape",
//!         unknown_fields: Reject,
//!         variants {
//!             Square(Square) = "square",
//!         }
//!     }
//! }
//!
//! let input = serde_json::json!({
//!     "aggregations": { "inner": { "square": { "side": 1.0 } } },
//!     "square": { "side": 2.0 }
//! });
//!
//! let node = Node::<Shape>::from_json(&input).unwrap();
//! assert_eq!(node.depth(), 2);
//! assert!(node.child("inner").is_some());
//! assert_eq!(node.to_json().unwrap(), input);
//! ```
pub mod decode;
pub mod encode;

use crate::builder::{ObjectBuilder, require};
use crate::error::{BuildError, DecodeError, EncodeError};
use crate::path::JsonPath;
use crate::value::JsonData;
use crate::variant::{TaggedUnion, VariantOf};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Wire key holding the named child map.
pub const AGGREGATIONS_KEY: &str = "aggregations";

/// Accepted alias of [`AGGREGATIONS_KEY`]. Never written.
pub const AGGS_ALIAS: &str = "aggs";

/// Wire key holding the metadata map.
pub const META_KEY: &str = "meta";

/// Keys with a fixed meaning at every node level.
pub const RESERVED_KEYS: &[&str] = &[AGGREGATIONS_KEY, AGGS_ALIAS, META_KEY];

/// A variant payload together with its named children.
///
/// Dropping a tree is iterative. Cloning and comparing recurse once per level.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<U> {
    payload: U,
    children: Children<U>,
    meta: IndexMap<String, JsonData>,
    unknown: IndexMap<String, JsonData>,
}

impl<U: TaggedUnion> Node<U> {
    /// A leaf node around `payload`.
    pub fn new(payload: impl Into<U>) -> Self {
        Self {
            payload: payload.into(),
            children: Children::default(),
            meta: IndexMap::new(),
            unknown: IndexMap::new(),
        }
    }

    pub fn builder() -> NodeBuilder<U> {
        NodeBuilder::default()
    }

    pub fn payload(&self) -> &U {
        &self.payload
    }

    pub fn into_payload(self) -> U {
        self.payload
    }

    pub fn kind(&self) -> U::Kind {
        self.payload.kind()
    }

    /// Borrows the payload as `P`, or `None` when another kind is active.
    pub fn payload_as<P: VariantOf<U>>(&self) -> Option<&P> {
        P::from_ref(&self.payload)
    }

    pub fn child(&self, name: &str) -> Option<&Node<U>> {
        self.children.get(name)
    }

    pub fn children(&self) -> &IndexMap<String, Node<U>> {
        &self.children
    }

    pub fn meta(&self) -> &IndexMap<String, JsonData> {
        &self.meta
    }

    /// Keys captured by a pass-through family that were neither reserved nor a known kind.
    pub fn unknown(&self) -> &IndexMap<String, JsonData> {
        &self.unknown
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Follows a chain of child names from this node.
    pub fn lookup(&self, names: &[&str]) -> Option<&Node<U>> {
        names
            .iter()
            .try_fold(self, |node, name| node.children.get(*name))
    }

    /// Number of levels in the tree, counting this node as 1.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.children.values().map(|child| (child, level + 1)));
        }
        deepest
    }

    /// Pre-order walk of this node and every node below it, with the child names leading there.
    pub fn descendants(&self) -> Descendants<'_, U> {
        Descendants {
            stack: vec![(Vec::new(), self)],
        }
    }

    /// Decodes a flat node object rooted at the document root, without a depth limit.
    pub fn from_json(value: &Value) -> Result<Self, DecodeError> {
        decode::decode_node(value, &JsonPath::root(), None)
    }

    pub fn to_json(&self) -> Result<Value, EncodeError> {
        encode::encode_node(self)
    }
}

/// The child map of a [`Node`]. Dropping it takes the subtree apart on the heap.
#[derive(Clone, PartialEq)]
pub(crate) struct Children<U>(IndexMap<String, Node<U>>);

impl<U> Default for Children<U> {
    fn default() -> Self {
        Self(IndexMap::new())
    }
}

impl<U> Deref for Children<U> {
    type Target = IndexMap<String, Node<U>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<U> DerefMut for Children<U> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<U: fmt::Debug> fmt::Debug for Children<U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<U> Drop for Children<U> {
    fn drop(&mut self) {
        let mut stack: Vec<Node<U>> = self.0.drain(..).map(|(_, node)| node).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.0.drain(..).map(|(_, child)| child));
        }
    }
}

/// Iterator returned by [`Node::descendants`].
pub struct Descendants<'a, U> {
    stack: Vec<(Vec<&'a str>, &'a Node<U>)>,
}

impl<'a, U> Iterator for Descendants<'a, U> {
    type Item = (Vec<&'a str>, &'a Node<U>);

    fn next(&mut self) -> Option<Self::Item> {
        let (names, node) = self.stack.pop()?;
        for (name, child) in node.children.iter().rev() {
            let mut child_names = names.clone();
            child_names.push(name.as_str());
            self.stack.push((child_names, child));
        }
        Some((names, node))
    }
}

/// Single-use builder for [`Node`].
#[derive(Debug)]
pub struct NodeBuilder<U> {
    payload: Option<U>,
    children: IndexMap<String, Node<U>>,
    meta: IndexMap<String, JsonData>,
    unknown: IndexMap<String, JsonData>,
}

impl<U> Default for NodeBuilder<U> {
    fn default() -> Self {
        Self {
            payload: None,
            children: IndexMap::new(),
            meta: IndexMap::new(),
            unknown: IndexMap::new(),
        }
    }
}

impl<U: TaggedUnion> NodeBuilder<U> {
    pub fn build(self) -> Result<Node<U>, BuildError> {
        <Self as ObjectBuilder>::build(self)
    }

    pub fn payload(mut self, payload: impl Into<U>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Adds a named child. A name that is already present is overwritten in place.
    pub fn child(mut self, name: impl Into<String>, node: Node<U>) -> Self {
        self.children.insert(name.into(), node);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = (String, Node<U>)>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn meta(mut self, key: impl Into<String>, value: impl Into<JsonData>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    pub fn unknown(mut self, key: impl Into<String>, value: impl Into<JsonData>) -> Self {
        self.unknown.insert(key.into(), value.into());
        self
    }
}

impl<U: TaggedUnion> ObjectBuilder for NodeBuilder<U> {
    type Output = Node<U>;

    fn build(self) -> Result<Node<U>, BuildError> {
        Ok(Node {
            payload: require(self.payload, U::FAMILY, "payload")?,
            children: Children(self.children),
            meta: self.meta,
            unknown: self.unknown,
        })
    }
}

impl<U: TaggedUnion> Serialize for Node<U> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de, U: TaggedUnion> Deserialize<'de> for Node<U> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).map_err(serde::de::Error::custom)
    }
}
