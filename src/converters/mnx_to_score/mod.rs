//! MNX to score-graph converter
//!
//! Converts a typed MNX document into the score graph, resolving forward
//! references and merging the global and per-part measure timelines.
//!
//! # Architecture
//!
//! ```text
//! MNX JSON text
//!   ↓ [serde_json, upstream of this module]
//! mnx::Document (typed tree)
//!   ↓ [tree walker: parts → measures → voices → events]
//! score::Score (arena graph, beam marks, slur/tie spans)
//! ```
//!
//! # Design notes
//!
//! 1. **Forward references resolve lazily.** Slur and tie targets may name
//!    ids that do not exist yet; they become deferred tasks drained on
//!    every id binding, so no ordering between voices or parts is assumed.
//! 2. **Global context merges first.** Each output measure receives the
//!    shared timeline's key/time/tempo/barline state before its voices are
//!    read.
//! 3. **Nothing is lost silently.** Unsupported durations, markings and
//!    navigation markers are typed failures; only attribute kinds that are
//!    documented gaps (endings, styles, the skipped content-item variants)
//!    are passed over.

pub mod beams;
pub mod converter;
pub mod duration;
pub mod errors;
pub mod registry;

pub use beams::resolve_beam;
pub use converter::mnx_to_score;
pub use duration::{to_duration, to_fraction};
pub use errors::{
    ConvertError, ConvertResult, IdentifierError, ReferenceError, StructuralError,
    UnsupportedError,
};
pub use registry::NodeRegistry;
