//! Configuration options for key conversion

use crate::naming::Convention;

/// Conversion configuration options
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Target key naming convention
    pub convention: Convention,
    /// Pretty-print output (vs compact)
    pub pretty: bool,
    /// Maximum input size in bytes
    pub memory_limit: usize,
    /// Maximum nesting depth accepted before conversion
    pub max_depth: Option<usize>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            convention: Convention::Camel,
            pretty: true,
            memory_limit: 100 * 1024 * 1024, // 100MB
            max_depth: Some(1000),
        }
    }
}

impl ConversionConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for decoding API responses into camelCase
    pub fn camel() -> Self {
        Self::default()
    }

    /// Configuration for encoding request bodies into snake_case
    pub fn snake() -> Self {
        Self {
            convention: Convention::Snake,
            pretty: false,
            ..Default::default()
        }
    }

    /// Configuration for batch processing
    pub fn batch_processing() -> Self {
        Self {
            memory_limit: 512 * 1024 * 1024, // 512MB
            pretty: false,
            ..Default::default()
        }
    }

    pub fn with_convention(mut self, convention: Convention) -> Self {
        self.convention = convention;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.memory_limit == 0 {
            return Err("Memory limit must be greater than zero".to_string());
        }

        if self.max_depth == Some(0) {
            return Err("Maximum depth must be at least 1".to_string());
        }

        Ok(())
    }
}
