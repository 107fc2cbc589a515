//! Statistics for conversion operations

use serde::Serialize;
use std::time::Duration;

use super::keys::KeyStats;

/// Statistics for one or more conversions
#[derive(Debug, Clone, Serialize)]
pub struct ConversionStatistics {
    /// Input JSON size in bytes
    pub input_size_bytes: u64,
    /// Output JSON size in bytes
    pub output_size_bytes: u64,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Number of inputs processed
    pub file_count: usize,
    /// Key renaming counters
    pub keys: KeyStats,
    /// Timestamp of when statistics were collected
    pub collected_at: chrono::DateTime<chrono::Utc>,
}

impl Default for ConversionStatistics {
    fn default() -> Self {
        Self {
            input_size_bytes: 0,
            output_size_bytes: 0,
            processing_time_ms: 0,
            file_count: 0,
            keys: KeyStats::default(),
            collected_at: chrono::Utc::now(),
        }
    }
}

impl ConversionStatistics {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Create statistics for a single conversion
    pub fn for_conversion(
        input_size: u64,
        output_size: u64,
        processing_time: Duration,
        keys: KeyStats,
    ) -> Self {
        Self {
            input_size_bytes: input_size,
            output_size_bytes: output_size,
            processing_time_ms: processing_time.as_millis() as u64,
            file_count: 1,
            keys,
            collected_at: chrono::Utc::now(),
        }
    }

    /// Combine statistics from multiple conversions
    pub fn combine(&mut self, other: &Self) {
        self.input_size_bytes += other.input_size_bytes;
        self.output_size_bytes += other.output_size_bytes;
        self.processing_time_ms += other.processing_time_ms;
        self.file_count += other.file_count;
        self.keys.combine(&other.keys);
        self.collected_at = chrono::Utc::now();
    }

    /// Share of seen keys that changed name, in percent
    pub fn rename_ratio(&self) -> f32 {
        if self.keys.keys_seen == 0 {
            0.0
        } else {
            self.keys.keys_renamed as f32 / self.keys.keys_seen as f32 * 100.0
        }
    }

    /// Render a short human-readable summary
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Files: {}", self.file_count),
            format!("Input size: {} bytes", self.input_size_bytes),
            format!("Output size: {} bytes", self.output_size_bytes),
            format!("Containers visited: {}", self.keys.containers_visited),
            format!(
                "Keys renamed: {}/{} ({:.1}%)",
                self.keys.keys_renamed,
                self.keys.keys_seen,
                self.rename_ratio()
            ),
            format!("Processing time: {}ms", self.processing_time_ms),
        ];
        if self.keys.key_collisions > 0 {
            lines.push(format!("Key collisions: {}", self.keys.key_collisions));
        }
        lines.join("\n")
    }
}
