//! Bridging between [`Document`] graphs and `serde_json::Value` trees

use indexmap::IndexMap;
use serde_json::{Map, Value as Json};

use super::{Container, Document, NodeId, Value};
use crate::error::{GraphError, GraphResult};

impl Document {
    /// Build a tree-shaped document from a JSON value
    pub fn from_json(json: &Json) -> Self {
        let mut doc = Document::default();
        let root = doc.import(json);
        doc.root = root;
        doc
    }

    fn import(&mut self, json: &Json) -> Value {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => Value::Number(n.clone()),
            Json::String(s) => Value::String(s.clone()),
            Json::Array(items) => {
                let values = items.iter().map(|item| self.import(item)).collect();
                Value::Node(self.alloc(Container::Sequence(values)))
            }
            Json::Object(entries) => {
                let values: IndexMap<String, Value> = entries
                    .iter()
                    .map(|(k, v)| (k.clone(), self.import(v)))
                    .collect();
                Value::Node(self.alloc(Container::Map(values)))
            }
        }
    }

    /// Expand the graph into a JSON tree.
    ///
    /// Shared containers are written out once per position. A container
    /// that contains itself (directly or through descendants) has no JSON
    /// form and yields [`GraphError::Cycle`].
    pub fn to_json(&self) -> GraphResult<Json> {
        let mut ancestors = Vec::new();
        let json = self.export(&self.root, &mut ancestors, "$".to_string())?;
        Ok(json.unwrap_or(Json::Null))
    }

    // `None` stands for undefined
    fn export(
        &self,
        value: &Value,
        ancestors: &mut Vec<NodeId>,
        path: String,
    ) -> GraphResult<Option<Json>> {
        let id = match value {
            Value::Undefined => return Ok(None),
            Value::Null => return Ok(Some(Json::Null)),
            Value::Bool(b) => return Ok(Some(Json::Bool(*b))),
            Value::Number(n) => return Ok(Some(Json::Number(n.clone()))),
            Value::String(s) => return Ok(Some(Json::String(s.clone()))),
            Value::Node(id) => *id,
        };

        if ancestors.contains(&id) {
            return Err(GraphError::Cycle { path });
        }
        let container = self.get(id).ok_or(GraphError::UnknownNode(id))?;

        ancestors.push(id);
        let json = match container {
            Container::Sequence(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let child_path = format!("{}[{}]", path, index);
                    out.push(self.export(item, ancestors, child_path)?.unwrap_or(Json::Null));
                }
                Json::Array(out)
            }
            Container::Map(entries) => {
                let mut out = Map::with_capacity(entries.len());
                for (key, item) in entries {
                    let child_path = format!("{}.{}", path, key);
                    if let Some(json) = self.export(item, ancestors, child_path)? {
                        out.insert(key.clone(), json);
                    }
                }
                Json::Object(out)
            }
        };
        ancestors.pop();

        Ok(Some(json))
    }
}
