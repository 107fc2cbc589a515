//! Structural validation ahead of conversion and serialization

pub mod circular_refs;

pub use circular_refs::{
    has_circular_refs, validate_depth, CircularRefDetector, ValidationError, ValidationResult,
};
