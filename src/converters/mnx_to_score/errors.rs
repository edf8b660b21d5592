//! Error types for MNX conversion
//!
//! Four sub-taxonomies matching how failures arise: structural violations
//! detected at the point of the offending construct, cross-reference
//! failures, features the score graph deliberately does not express, and
//! identifier-registry conflicts. All are fatal; nothing is retried, and
//! every variant carries the offending construct so calling tooling can
//! report which part of the document caused the problem.

use thiserror::Error;

/// Result type for MNX conversion operations
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Top-level conversion error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// Document shape violates the format's invariants
    #[error("structural error: {0}")]
    Structural(#[from] StructuralError),

    /// A symbolic cross-reference could not be resolved
    #[error("reference error: {0}")]
    Reference(#[from] ReferenceError),

    /// The document uses a feature the score graph does not express
    #[error("unsupported feature: {0}")]
    Unsupported(#[from] UnsupportedError),

    /// Identifier registry conflict (malformed document or traversal bug)
    #[error("identifier error: {0}")]
    Identifier(#[from] IdentifierError),
}

/// Eagerly-detected violations of the document's structural invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("unsupported MNX version {0}, this engine implements version 1")]
    UnsupportedVersion(u32),

    #[error("part {part_index} has {part_measures} measures but the global timeline has {global_measures}")]
    MeasureCountMismatch {
        part_index: usize,
        part_measures: usize,
        global_measures: usize,
    },

    #[error("part {0} declares no measure list")]
    PartWithoutMeasures(usize),

    #[error("event '{0}' must specify exactly one of notes or rest")]
    AmbiguousEvent(String),

    #[error("event '{0}' has no duration")]
    EventWithoutDuration(String),

    #[error("a beam must span at least one event, partial beams are hooks")]
    EmptyBeam,

    #[error("a beam level cannot carry both inner beams and hooks")]
    InvalidBeamNesting,

    #[error("beam event '{0}' does not resolve to a note or chord")]
    BeamOnRest(String),

    #[error("invalid fraction: {0}")]
    InvalidFraction(String),
}

/// Failures to resolve a symbolic id to a created node
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("identifier '{0}' is not bound")]
    UnknownId(String),

    #[error("unresolved forward reference: {0}")]
    UnresolvedReference(String),
}

/// Document constructs the score graph deliberately does not express.
/// These fail fast rather than dropping content silently; each is a
/// natural extension point for a future engine revision.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnsupportedError {
    #[error("note value '{0}' is finer than the score graph expresses")]
    Duration(String),

    #[error("marking '{0}' has no score-graph equivalent")]
    Marking(String),

    #[error("navigation marker '{0}' is not supported")]
    Navigation(String),

    #[error("clef at staff position {0} sits between staff lines")]
    ClefBetweenLines(i32),
}

/// Identifier registry conflicts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("identifier '{0}' is already bound")]
    DuplicateId(String),

    #[error("node already has identifier '{existing}', refusing to rebind as '{new}'")]
    IdentityConflict { existing: String, new: String },
}
