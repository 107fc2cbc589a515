//! Conversion engine for whole JSON payloads and documents

use serde_json::Value as Json;
use std::time::Instant;

use crate::conversion::config::ConversionConfig;
use crate::conversion::keys::{convert_json_keys, KeyStats};
use crate::conversion::stats::ConversionStatistics;
use crate::conversion::ConversionResult;
use crate::error::{ConversionError, ConversionErrorKind};
use crate::graph::Document;
use crate::parser::{parse_from_string, JsonSource};
use crate::validation::{validate_depth, CircularRefDetector};

/// Result of converting one JSON payload
#[derive(Debug, Clone)]
pub struct ConvertedJson {
    /// Serialized output
    pub content: String,
    /// Converted value
    pub value: Json,
    pub statistics: ConversionStatistics,
}

impl ConvertedJson {
    pub fn as_str(&self) -> &str {
        &self.content
    }
}

/// Main conversion engine
#[derive(Debug, Clone)]
pub struct ConversionEngine {
    config: ConversionConfig,
}

impl ConversionEngine {
    /// Create a new conversion engine
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Convert the keys of a parsed JSON value
    pub fn convert_value(&self, value: Json) -> ConversionResult<(Json, KeyStats)> {
        if let Some(max_depth) = self.config.max_depth {
            validate_depth(&value, max_depth)?;
        }
        let mut namer = self.config.convention;
        Ok(convert_json_keys(value, &mut namer))
    }

    /// Parse, convert and serialize a JSON string
    pub fn convert_str(&self, input: &str) -> ConversionResult<ConvertedJson> {
        let start_time = Instant::now();

        let value = parse_from_string(input)?;
        let (value, keys) = self.convert_value(value)?;
        let content = self.serialize(&value)?;

        let statistics = ConversionStatistics::for_conversion(
            input.len() as u64,
            content.len() as u64,
            start_time.elapsed(),
            keys,
        );
        tracing::debug!(
            convention = %self.config.convention,
            input_bytes = statistics.input_size_bytes,
            output_bytes = statistics.output_size_bytes,
            "converted JSON payload"
        );

        Ok(ConvertedJson {
            content,
            value,
            statistics,
        })
    }

    /// Read a source and convert it
    pub fn convert_from_source(&self, source: &JsonSource) -> ConversionResult<ConvertedJson> {
        tracing::debug!(source = %source.description(), "reading input");
        let input = source.read(self.config.memory_limit)?;
        self.convert_str(&input)
    }

    /// Convert a document into a fresh copy
    pub fn convert_document(&self, doc: &Document) -> Document {
        let mut namer = self.config.convention;
        doc.converted(&mut namer)
    }

    /// Convert a document in place
    pub fn convert_document_in_place(&self, doc: &mut Document) -> KeyStats {
        let mut namer = self.config.convention;
        doc.convert_in_place(&mut namer)
    }

    /// Serialize a document as JSON after checking it for cycles and depth
    pub fn render_document(&self, doc: &Document) -> ConversionResult<String> {
        let max_depth = self.config.max_depth.unwrap_or(usize::MAX);
        CircularRefDetector::new(max_depth).detect(doc)?;
        let json = doc.to_json()?;
        self.serialize(&json)
    }

    fn serialize(&self, value: &Json) -> ConversionResult<String> {
        let result = if self.config.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        result.map_err(|e| {
            ConversionError::conversion_with_source(
                ConversionErrorKind::Serialization {
                    message: e.to_string(),
                },
                e.into(),
            )
        })
    }
}

/// Convert a JSON string with the given configuration
pub fn convert_json_string(input: &str, config: &ConversionConfig) -> ConversionResult<ConvertedJson> {
    ConversionEngine::new(config.clone()).convert_str(input)
}
