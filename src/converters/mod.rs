//! Format converters
//!
//! This module contains converters from source notation formats into the
//! score graph.

pub mod mnx_to_score;

// Re-export for convenience
pub use mnx_to_score::{mnx_to_score, ConvertError, ConvertResult};
