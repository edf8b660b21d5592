//! Typed MNX document model
//!
//! This module defines the source-side types the conversion engine consumes.
//! An MNX document arrives as JSON; deserialization, union/tag dispatch and
//! optional-field defaulting are all delegated to serde, so by the time the
//! engine sees a [`Document`] the tree is fully typed. Nothing in here
//! performs conversion — these are data definitions only.
//!
//! Field names are the Rust spellings; serde attributes map them to the MNX
//! camelCase wire names. Optionality follows the MNX schema, including the
//! cases where the schema is looser than what makes semantic sense (e.g.
//! `Part::measures` is optional on the wire; the converter rejects its
//! absence as a structural error).

pub mod beam;
pub mod document;
pub mod sequence;

pub use beam::{Beam, BeamHook, HookDirection};
pub use document::{
    Barline, BarlineType, Clef, ClefPlacement, ClefPosition, ClefSign, Document, Ending, Fine,
    Global, GlobalMeasure, Jump, JumpType, Key, Measure, MnxMeta, Part, RepeatEnd, RepeatStart,
    Segno, Tempo, Time,
};
pub use sequence::{
    AccidentalDisplay, Dynamic, Event, Grace, Markings, Note, NoteValue, NoteValueBase,
    NoteValueQuantity, OctaveShift, Pitch, Rest, Sequence, SequenceContent, Slur, SlurSide, Space,
    Step, Tie, Tuplet, UpOrDown,
};
