//! MNX to score-graph conversion engine
//!
//! Consumes a typed MNX document (deserialized upstream with serde) and
//! builds an arena-backed score graph with resolved beams, slurs and ties.

pub mod converters;
pub mod mnx;
pub mod score;

// Re-export the conversion entry point and its error taxonomy
pub use converters::mnx_to_score::{mnx_to_score, ConvertError, ConvertResult};
pub use score::{NodeId, Score};
