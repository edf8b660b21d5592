//! Score graph: the target object model the converter builds
//!
//! The graph is format-agnostic — it captures musical semantics (durations,
//! pitches, beam levels, articulations, spans) without committing to any
//! output format. Nodes live in an arena owned by [`Score`]; a [`NodeId`] is
//! a stable handle into it, so cross-references (slur and tie spans, chord
//! membership) never alias node storage even when a node's symbolic
//! identifier is rewritten.

pub mod graph;
pub mod types;

pub use graph::{
    ChordNode, MeasureNode, Node, NodeContent, NodeId, NoteNode, PartNode, RestNode, Score,
    SlurSpan, TieSpan, VoiceNode,
};
pub use types::{
    Articulation, BarlineKind, BeamMark, BeamMarkKind, Clef, ClefKind, Duration, DurationBase,
    KeySignature, Pitch, PitchStep, Pointing, SlurPlacement, TempoMark, TimeSignature,
};
