//! Recursive snake_case / camelCase key conversion
//!
//! Renames every key of a JSON-like value, at any depth. Values are either
//! plain `serde_json::Value` trees or [`Document`] graphs, which may share
//! containers between several parents and may contain cycles. Each distinct
//! container is converted exactly once and conversion always terminates.
//!
//! ```
//! use keycase::convert_to_camel_recursive;
//! use serde_json::json;
//!
//! let body = convert_to_camel_recursive(json!({"device_id": 7, "last_seen": {"ip_addr": "10.0.0.1"}}));
//! assert_eq!(body, json!({"deviceId": 7, "lastSeen": {"ipAddr": "10.0.0.1"}}));
//! ```

pub mod cli;
pub mod conversion;
pub mod error;
pub mod graph;
pub mod naming;
pub mod parser;
pub mod validation;

// Re-export commonly used types
pub use conversion::{
    convert_json_keys, convert_json_string, convert_keys_recursive, convert_to_camel_recursive,
    convert_to_snake_recursive, ConversionConfig, ConversionEngine, ConvertedJson, KeyConvert,
    KeyStats,
};
pub use error::{ConversionError, ConversionErrorKind, GraphError, ParseError};
pub use graph::{Container, Document, NodeId, Value};
pub use naming::{camel, snake, Convention, KeyNamer};
pub use parser::JsonSource;
