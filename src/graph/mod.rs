//! JSON-like value graph
//!
//! A [`Document`] owns an arena of containers (sequences and keyed maps) and
//! a root [`Value`]. Values refer to containers by [`NodeId`], so the same
//! container can appear at several positions or point back at one of its
//! ancestors. Container identity is the `NodeId`, never structural equality.

use indexmap::IndexMap;
use std::fmt;

use crate::error::{GraphError, GraphResult};

pub mod json;

/// Index of a container inside a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A leaf scalar or a reference to a container
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value; dropped from maps and rendered as `null` in sequences
    /// when expanded to JSON
    Undefined,
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Node(NodeId),
}

impl Value {
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Value::Node(_))
    }

    pub fn as_node(&self) -> Option<NodeId> {
        match self {
            Value::Node(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<NodeId> for Value {
    fn from(id: NodeId) -> Self {
        Value::Node(id)
    }
}

/// A container stored in the arena
#[derive(Debug, Clone, PartialEq)]
pub enum Container {
    Sequence(Vec<Value>),
    Map(IndexMap<String, Value>),
}

impl Container {
    pub fn kind(&self) -> &'static str {
        match self {
            Container::Sequence(_) => "sequence",
            Container::Map(_) => "map",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Container::Sequence(items) => items.len(),
            Container::Map(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values held directly by this container, in order
    pub fn values(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
        match self {
            Container::Sequence(items) => Box::new(items.iter()),
            Container::Map(entries) => Box::new(entries.values()),
        }
    }
}

/// An arena of containers plus a root value
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    nodes: Vec<Container>,
    root: Value,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            root: Value::Undefined,
        }
    }
}

impl Document {
    /// Create a document with no containers whose root is the leaf `root`
    pub fn new(root: impl Into<Value>) -> GraphResult<Self> {
        let mut doc = Self::default();
        doc.set_root(root)?;
        Ok(doc)
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Replace the root. A container root must already be in the arena.
    pub fn set_root(&mut self, root: impl Into<Value>) -> GraphResult<()> {
        let root = root.into();
        self.check_ref(&root)?;
        self.root = root;
        Ok(())
    }

    // Callers guarantee `root` was allocated in this document
    pub(crate) fn set_root_unchecked(&mut self, root: Value) {
        self.root = root;
    }

    /// Number of containers in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate an empty keyed map
    pub fn add_map(&mut self) -> NodeId {
        self.alloc(Container::Map(IndexMap::new()))
    }

    /// Allocate an empty sequence
    pub fn add_sequence(&mut self) -> NodeId {
        self.alloc(Container::Sequence(Vec::new()))
    }

    pub(crate) fn alloc(&mut self, container: Container) -> NodeId {
        self.nodes.push(container);
        NodeId(self.nodes.len() - 1)
    }

    /// Insert (or overwrite) `key` in a map node
    pub fn insert(
        &mut self,
        map: NodeId,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> GraphResult<()> {
        let value = value.into();
        self.check_ref(&value)?;
        self.map_mut(map)?.insert(key.into(), value);
        Ok(())
    }

    /// Append a value to a sequence node
    pub fn push(&mut self, sequence: NodeId, value: impl Into<Value>) -> GraphResult<()> {
        let value = value.into();
        self.check_ref(&value)?;
        self.sequence_mut(sequence)?.push(value);
        Ok(())
    }

    pub fn get(&self, id: NodeId) -> Option<&Container> {
        self.nodes.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Container> {
        self.nodes.get_mut(id.0)
    }

    pub fn map(&self, id: NodeId) -> GraphResult<&IndexMap<String, Value>> {
        match self.get(id) {
            Some(Container::Map(entries)) => Ok(entries),
            Some(other) => Err(wrong_container(id, "map", other)),
            None => Err(GraphError::UnknownNode(id)),
        }
    }

    pub fn sequence(&self, id: NodeId) -> GraphResult<&[Value]> {
        match self.get(id) {
            Some(Container::Sequence(items)) => Ok(items),
            Some(other) => Err(wrong_container(id, "sequence", other)),
            None => Err(GraphError::UnknownNode(id)),
        }
    }

    fn map_mut(&mut self, id: NodeId) -> GraphResult<&mut IndexMap<String, Value>> {
        match self.nodes.get_mut(id.0) {
            Some(Container::Map(entries)) => Ok(entries),
            Some(other) => Err(wrong_container(id, "map", other)),
            None => Err(GraphError::UnknownNode(id)),
        }
    }

    fn sequence_mut(&mut self, id: NodeId) -> GraphResult<&mut Vec<Value>> {
        match self.nodes.get_mut(id.0) {
            Some(Container::Sequence(items)) => Ok(items),
            Some(other) => Err(wrong_container(id, "sequence", other)),
            None => Err(GraphError::UnknownNode(id)),
        }
    }

    /// Containers referenced directly by `id`, in order, with repeats
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.get(id)
            .map(|c| c.values().filter_map(Value::as_node).collect())
            .unwrap_or_default()
    }

    fn check_ref(&self, value: &Value) -> GraphResult<()> {
        match value {
            Value::Node(id) if id.0 >= self.nodes.len() => Err(GraphError::UnknownNode(*id)),
            _ => Ok(()),
        }
    }
}

fn wrong_container(node: NodeId, expected: &'static str, found: &Container) -> GraphError {
    GraphError::WrongContainer {
        node,
        expected,
        found: found.kind(),
    }
}
