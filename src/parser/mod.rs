//! JSON input sources

pub mod directory;

use crate::error::{ConversionError, ConversionErrorKind, ConversionResult, ParseError, ParseResult};
use std::io::Read;
use std::path::PathBuf;

/// Where a JSON payload comes from
#[derive(Debug, Clone, PartialEq)]
pub enum JsonSource {
    String(String),
    File(PathBuf),
    Stdin,
}

impl JsonSource {
    /// Read the raw text, refusing inputs larger than `limit` bytes
    pub fn read(&self, limit: usize) -> ConversionResult<String> {
        let content = match self {
            JsonSource::String(content) => content.clone(),
            JsonSource::File(path) => {
                // Check file size before reading to avoid exhausting memory
                let metadata = std::fs::metadata(path)
                    .map_err(|e| ConversionError::io(e, Some(path.clone())))?;
                check_size(metadata.len() as usize, limit)?;
                std::fs::read_to_string(path)
                    .map_err(|e| ConversionError::io(e, Some(path.clone())))?
            }
            JsonSource::Stdin => read_limited(std::io::stdin(), limit)?,
        };

        check_size(content.len(), limit)?;
        Ok(content)
    }

    /// Read and parse JSON from this source
    pub fn parse(&self, limit: usize) -> ConversionResult<serde_json::Value> {
        let content = self.read(limit)?;
        Ok(parse_from_string(&content)?)
    }

    /// Get a human-readable description of the source
    pub fn description(&self) -> String {
        match self {
            JsonSource::String(_) => "string input".to_string(),
            JsonSource::File(path) => format!("file: {}", path.display()),
            JsonSource::Stdin => "standard input".to_string(),
        }
    }

    /// Treat `input` as literal JSON when it is wrapped in `{}` or `[]`
    pub fn looks_like_json(input: &str) -> bool {
        let trimmed = input.trim();
        (trimmed.starts_with('{') && trimmed.ends_with('}'))
            || (trimmed.starts_with('[') && trimmed.ends_with(']'))
    }
}

/// Read at most one byte past `limit`, so oversized input is rejected
/// without buffering all of it
fn read_limited<R: Read>(reader: R, limit: usize) -> ConversionResult<String> {
    let mut buffer = Vec::new();
    reader
        .take((limit as u64).saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|e| ConversionError::io(e, None))?;
    // size first: the cut may have split a multi-byte character
    check_size(buffer.len(), limit)?;
    String::from_utf8(buffer).map_err(|e| {
        ConversionError::io(
            std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            None,
        )
    })
}

fn check_size(size: usize, limit: usize) -> ConversionResult<()> {
    if size > limit {
        return Err(ConversionError::conversion(ConversionErrorKind::JsonTooLarge {
            size,
            limit,
        }));
    }
    Ok(())
}

/// Parse JSON text, keeping a short preview of the input on failure
pub fn parse_from_string(content: &str) -> ParseResult<serde_json::Value> {
    serde_json::from_str(content).map_err(|e| {
        let preview: String = content.chars().take(40).collect();
        ParseError::from(e).with_preview(preview)
    })
}
