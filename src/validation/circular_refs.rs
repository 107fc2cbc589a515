//! Circular reference and depth detection
//!
//! Expanding a [`Document`] into JSON recurses once per nesting level and
//! never terminates on a cycle. The detector walks the graph iteratively,
//! tracking container identity, and reports the first cycle or the first
//! path that nests deeper than the configured limit.

use serde_json::Value as Json;
use std::collections::HashMap;

use crate::graph::{Container, Document, NodeId};

/// Validation failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Circular reference detected at path: {path}")]
    CircularReference { path: String },

    #[error("Maximum nesting depth ({max}) exceeded at depth {depth}")]
    MaxDepthExceeded { depth: usize, max: usize },
}

pub type ValidationResult<T> = Result<T, ValidationError>;

#[derive(Debug, Clone, Copy)]
enum Mark {
    OnPath,
    /// Finished; value is the number of container levels below and including it
    Done(usize),
}

struct Frame {
    id: NodeId,
    path: String,
    children: Vec<(String, NodeId)>,
    next: usize,
    height: usize,
}

/// Cycle and depth detector for document graphs
#[derive(Debug)]
pub struct CircularRefDetector {
    /// Maximum container nesting accepted
    max_depth: usize,
    marks: HashMap<NodeId, Mark>,
}

impl CircularRefDetector {
    /// Create a new circular reference detector
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            marks: HashMap::new(),
        }
    }

    /// Check `doc` for cycles and excessive nesting.
    ///
    /// Shared containers are fine; each is explored once.
    pub fn detect(&mut self, doc: &Document) -> ValidationResult<()> {
        self.marks.clear();
        let Some(root) = doc.root().as_node() else {
            return Ok(());
        };

        let mut stack = vec![self.enter(doc, root, "$".to_string())];

        while let Some(frame) = stack.last_mut() {
            if frame.next < frame.children.len() {
                let (label, child) = frame.children[frame.next].clone();
                frame.next += 1;
                let child_path = format!("{}{}", frame.path, label);

                match self.marks.get(&child) {
                    Some(Mark::OnPath) => {
                        return Err(ValidationError::CircularReference { path: child_path });
                    }
                    Some(Mark::Done(height)) => {
                        let height = *height;
                        frame.height = frame.height.max(height + 1);
                        let depth = stack.len() + height;
                        if depth > self.max_depth {
                            return Err(self.too_deep(depth));
                        }
                    }
                    None => {
                        if stack.len() + 1 > self.max_depth {
                            return Err(self.too_deep(stack.len() + 1));
                        }
                        let frame = self.enter(doc, child, child_path);
                        stack.push(frame);
                    }
                }
                continue;
            }

            // all children explored
            let done = stack.pop().map(|frame| (frame.id, frame.height));
            if let Some((id, height)) = done {
                self.marks.insert(id, Mark::Done(height));
                if let Some(parent) = stack.last_mut() {
                    parent.height = parent.height.max(height + 1);
                }
            }
        }

        Ok(())
    }

    fn enter(&mut self, doc: &Document, id: NodeId, path: String) -> Frame {
        self.marks.insert(id, Mark::OnPath);
        let children = match doc.get(id) {
            Some(Container::Sequence(items)) => items
                .iter()
                .enumerate()
                .filter_map(|(i, v)| v.as_node().map(|c| (format!("[{}]", i), c)))
                .collect(),
            Some(Container::Map(entries)) => entries
                .iter()
                .filter_map(|(k, v)| v.as_node().map(|c| (format!(".{}", k), c)))
                .collect(),
            None => Vec::new(),
        };
        Frame {
            id,
            path,
            children,
            next: 0,
            height: 1,
        }
    }

    fn too_deep(&self, depth: usize) -> ValidationError {
        ValidationError::MaxDepthExceeded {
            depth,
            max: self.max_depth,
        }
    }

    /// Check if a document can be expanded safely
    pub fn is_safe(&mut self, doc: &Document) -> bool {
        self.detect(doc).is_ok()
    }

    pub fn max_depth_limit(&self) -> usize {
        self.max_depth
    }

    /// Reset the detector for reuse
    pub fn reset(&mut self) {
        self.marks.clear();
    }
}

/// Convenience function to check a document for cycles
pub fn has_circular_refs(doc: &Document) -> bool {
    let mut detector = CircularRefDetector::new(usize::MAX);
    matches!(
        detector.detect(doc),
        Err(ValidationError::CircularReference { .. })
    )
}

/// Reject JSON trees nesting more than `max_depth` containers deep
pub fn validate_depth(value: &Json, max_depth: usize) -> ValidationResult<()> {
    fn walk(value: &Json, depth: usize, max: usize) -> ValidationResult<()> {
        let children: Box<dyn Iterator<Item = &Json> + '_> = match value {
            Json::Array(items) => Box::new(items.iter()),
            Json::Object(entries) => Box::new(entries.values()),
            _ => return Ok(()),
        };
        if depth > max {
            return Err(ValidationError::MaxDepthExceeded { depth, max });
        }
        for child in children {
            walk(child, depth + 1, max)?;
        }
        Ok(())
    }

    walk(value, 1, max_depth)
}
