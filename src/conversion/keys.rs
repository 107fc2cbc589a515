//! Recursive key renaming
//!
//! Every map key reachable from the root is passed through a [`KeyNamer`].
//! Containers are tracked by identity in a visited-set that lives for one
//! top-level call: a container is marked before its children are walked, so
//! cycles terminate and a container shared by several parents is renamed
//! exactly once. Children are converted before the keys of their parent map.
//! Document graphs are walked with an explicit stack, so nesting depth is
//! bounded by memory rather than by the call stack.
//!
//! When a key renames onto a name already present in its map, the
//! renamed-from value overwrites it. A key whose name does not change never
//! overwrites a value renamed onto it. The surviving key keeps the position
//! of its first occurrence. Such collisions are counted in [`KeyStats`] and
//! logged.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value as Json};
use std::collections::{HashMap, HashSet};

use crate::graph::{Container, Document, NodeId, Value};
use crate::naming::{Convention, KeyNamer};

/// Counters collected during one conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KeyStats {
    /// Distinct containers walked
    pub containers_visited: usize,
    /// Map keys passed to the namer
    pub keys_seen: usize,
    /// Keys whose name changed
    pub keys_renamed: usize,
    /// Entries overwritten because two keys renamed to the same name
    pub key_collisions: usize,
}

impl KeyStats {
    pub fn combine(&mut self, other: &Self) {
        self.containers_visited += other.containers_visited;
        self.keys_seen += other.keys_seen;
        self.keys_renamed += other.keys_renamed;
        self.key_collisions += other.key_collisions;
    }

    fn log(&self, what: &str) {
        tracing::debug!(
            containers = self.containers_visited,
            keys = self.keys_seen,
            renamed = self.keys_renamed,
            "converted {} keys",
            what
        );
        if self.key_collisions > 0 {
            tracing::warn!(
                collisions = self.key_collisions,
                "{} keys collided after renaming; renamed values replaced existing entries",
                self.key_collisions
            );
        }
    }
}

/// Values whose keys can be converted recursively.
///
/// Implementors take `self` by value: the caller hands over exclusive
/// ownership, so conversion may reuse the existing allocations.
pub trait KeyConvert: Sized {
    fn convert_keys_with<N: KeyNamer + ?Sized>(self, namer: &mut N) -> Self;
}

impl KeyConvert for Document {
    fn convert_keys_with<N: KeyNamer + ?Sized>(mut self, namer: &mut N) -> Self {
        self.convert_in_place(namer);
        self
    }
}

impl KeyConvert for Json {
    fn convert_keys_with<N: KeyNamer + ?Sized>(self, namer: &mut N) -> Self {
        convert_json_keys(self, namer).0
    }
}

/// Rename every key of `value` according to `convention`
pub fn convert_keys_recursive<T: KeyConvert>(value: T, convention: Convention) -> T {
    let mut namer = convention;
    value.convert_keys_with(&mut namer)
}

pub fn convert_to_camel_recursive<T: KeyConvert>(value: T) -> T {
    convert_keys_recursive(value, Convention::Camel)
}

pub fn convert_to_snake_recursive<T: KeyConvert>(value: T) -> T {
    convert_keys_recursive(value, Convention::Snake)
}

/// Convert a JSON tree, consuming it.
///
/// A `serde_json::Value` is always a tree, so no visited-set is needed.
pub fn convert_json_keys<N: KeyNamer + ?Sized>(value: Json, namer: &mut N) -> (Json, KeyStats) {
    let mut stats = KeyStats::default();
    let converted = convert_json_value(value, namer, &mut stats);
    stats.log("JSON");
    (converted, stats)
}

fn convert_json_value<N: KeyNamer + ?Sized>(value: Json, namer: &mut N, stats: &mut KeyStats) -> Json {
    match value {
        Json::Array(items) => {
            stats.containers_visited += 1;
            Json::Array(
                items
                    .into_iter()
                    .map(|item| convert_json_value(item, namer, stats))
                    .collect(),
            )
        }
        Json::Object(entries) => {
            stats.containers_visited += 1;
            let children: Vec<(String, Json)> = entries
                .into_iter()
                .map(|(key, item)| (key, convert_json_value(item, namer, stats)))
                .collect();

            let renamed = rename_entries(children, namer, stats);
            Json::Object(renamed.into_iter().collect::<Map<String, Json>>())
        }
        leaf => leaf,
    }
}

impl Document {
    /// Convert into a fresh document, leaving `self` untouched.
    ///
    /// Sharing and cycles are reproduced in the copy: every source container
    /// maps to exactly one new container.
    pub fn converted<N: KeyNamer + ?Sized>(&self, namer: &mut N) -> Document {
        self.converted_with_stats(namer).0
    }

    pub fn converted_with_stats<N: KeyNamer + ?Sized>(&self, namer: &mut N) -> (Document, KeyStats) {
        let mut walker = CopyWalker {
            src: self,
            out: Document::default(),
            namer,
            remap: HashMap::new(),
            stats: KeyStats::default(),
        };
        let root = match self.root() {
            Value::Node(id) => {
                walk_post_order(&mut walker, *id);
                walker.copied(&Value::Node(*id))
            }
            leaf => leaf.clone(),
        };
        let CopyWalker { mut out, stats, .. } = walker;
        out.set_root_unchecked(root);

        stats.log("document");
        (out, stats)
    }

    /// Convert in place. Requires exclusive access to the document.
    pub fn convert_in_place<N: KeyNamer + ?Sized>(&mut self, namer: &mut N) -> KeyStats {
        let root = self.root().as_node();
        let mut walker = InPlaceWalker {
            doc: self,
            namer,
            visited: HashSet::new(),
            stats: KeyStats::default(),
        };
        if let Some(root) = root {
            walk_post_order(&mut walker, root);
        }

        let stats = walker.stats;
        stats.log("document");
        stats
    }
}

/// One pass over the containers of a document
trait GraphWalker {
    /// Mark `id` visited; false if it already was
    fn enter(&mut self, id: NodeId) -> bool;
    fn children(&self, id: NodeId) -> Vec<NodeId>;
    /// Called once per container, after all of its children
    fn finish(&mut self, id: NodeId);
}

/// Depth-first walk from `root`, visiting children in order and finishing
/// each container after its subtree.
fn walk_post_order<W: GraphWalker>(walker: &mut W, root: NodeId) {
    enum Step {
        Enter(NodeId),
        Finish(NodeId),
    }

    let mut stack = vec![Step::Enter(root)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(id) => {
                if !walker.enter(id) {
                    continue;
                }
                stack.push(Step::Finish(id));
                // reversed so the first child is entered first
                let children = walker.children(id);
                stack.extend(children.into_iter().rev().map(Step::Enter));
            }
            Step::Finish(id) => walker.finish(id),
        }
    }
}

struct CopyWalker<'a, N: ?Sized> {
    src: &'a Document,
    out: Document,
    namer: &'a mut N,
    /// Source id -> copy id; doubles as the visited-set
    remap: HashMap<NodeId, NodeId>,
    stats: KeyStats,
}

impl<N: ?Sized> CopyWalker<'_, N> {
    // Every container reachable from a finished one has been entered
    fn copied(&self, value: &Value) -> Value {
        match value {
            Value::Node(id) => self.remap.get(id).map_or(Value::Null, |copy| Value::Node(*copy)),
            leaf => leaf.clone(),
        }
    }
}

impl<N: KeyNamer + ?Sized> GraphWalker for CopyWalker<'_, N> {
    fn enter(&mut self, id: NodeId) -> bool {
        if self.remap.contains_key(&id) {
            return false;
        }
        // Reserve the slot up front so back-references resolve to it
        let copy = self.out.alloc(Container::Sequence(Vec::new()));
        self.remap.insert(id, copy);
        true
    }

    fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.src.children(id)
    }

    fn finish(&mut self, id: NodeId) {
        let src = self.src;
        let (Some(container), Some(&copy)) = (src.get(id), self.remap.get(&id)) else {
            return;
        };
        self.stats.containers_visited += 1;

        let converted = match container {
            Container::Sequence(items) => {
                Container::Sequence(items.iter().map(|item| self.copied(item)).collect())
            }
            Container::Map(entries) => {
                let children: Vec<(String, Value)> = entries
                    .iter()
                    .map(|(key, item)| (key.clone(), self.copied(item)))
                    .collect();
                Container::Map(rename_entries(children, &mut *self.namer, &mut self.stats))
            }
        };

        if let Some(slot) = self.out.get_mut(copy) {
            *slot = converted;
        }
    }
}

struct InPlaceWalker<'a, N: ?Sized> {
    doc: &'a mut Document,
    namer: &'a mut N,
    visited: HashSet<NodeId>,
    stats: KeyStats,
}

impl<N: KeyNamer + ?Sized> GraphWalker for InPlaceWalker<'_, N> {
    fn enter(&mut self, id: NodeId) -> bool {
        self.visited.insert(id)
    }

    fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.doc.children(id)
    }

    fn finish(&mut self, id: NodeId) {
        self.stats.containers_visited += 1;
        if let Some(Container::Map(entries)) = self.doc.get_mut(id) {
            let old = std::mem::take(entries);
            *entries = rename_entries(old, &mut *self.namer, &mut self.stats);
        }
    }
}

fn rename_entries<V, N>(
    entries: impl IntoIterator<Item = (String, V)>,
    namer: &mut N,
    stats: &mut KeyStats,
) -> IndexMap<String, V>
where
    N: KeyNamer + ?Sized,
{
    let entries = entries.into_iter();
    let mut out = IndexMap::with_capacity(entries.size_hint().0);
    for (key, item) in entries {
        stats.keys_seen += 1;
        let renamed = namer.rename(&key);
        if renamed == key {
            // an unchanged key never replaces a value renamed onto it
            if out.contains_key(&key) {
                stats.key_collisions += 1;
            } else {
                out.insert(key, item);
            }
            continue;
        }

        stats.keys_renamed += 1;
        if out.insert(renamed, item).is_some() {
            stats.key_collisions += 1;
        }
    }
    out
}
