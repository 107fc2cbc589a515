//! Key conversion module
//!
//! This module contains the recursive converter, the engine wrapping it for
//! whole JSON payloads, configuration, and statistics.

pub mod batch;
pub mod config;
pub mod engine;
pub mod keys;
pub mod stats;

pub use config::ConversionConfig;
pub use engine::{convert_json_string, ConversionEngine, ConvertedJson};
pub use keys::{
    convert_json_keys, convert_keys_recursive, convert_to_camel_recursive,
    convert_to_snake_recursive, KeyConvert, KeyStats,
};
pub use stats::ConversionStatistics;

pub use crate::error::ConversionResult;
