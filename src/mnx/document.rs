//! Document-level MNX types: the top-level object, the global per-measure
//! timeline shared by all parts, and the per-part measure lists.

use serde::Deserialize;

use super::beam::Beam;
use super::sequence::{NoteValue, Sequence};

/// A complete MNX document.
///
/// `global.measures` and each part's `measures` are parallel lists: entry
/// `i` of both describes the same measure of music. The `layouts`, `scores`
/// and `global.styles` sections of the format carry presentation data the
/// engine does not consume; serde skips them.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub mnx: MnxMeta,
    pub global: Global,
    pub parts: Vec<Part>,
}

/// Format metadata. `version` gates which documents the engine accepts.
#[derive(Debug, Clone, Deserialize)]
pub struct MnxMeta {
    pub version: u32,
}

/// The measure timeline shared across all parts.
#[derive(Debug, Clone, Deserialize)]
pub struct Global {
    pub measures: Vec<GlobalMeasure>,
}

/// Per-measure attributes that apply to every part: key, time, tempo,
/// barline and repeat/navigation markers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalMeasure {
    pub number: Option<i32>,
    pub index: Option<i32>,
    pub key: Option<Key>,
    pub time: Option<Time>,
    pub tempos: Option<Vec<Tempo>>,
    pub barline: Option<Barline>,
    pub repeat_start: Option<RepeatStart>,
    pub repeat_end: Option<RepeatEnd>,
    pub ending: Option<Ending>,
    pub jump: Option<Jump>,
    pub segno: Option<Segno>,
    pub fine: Option<Fine>,
}

/// Key signature as a count of fifths (negative = flats).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Key {
    pub fifths: i32,
}

/// Time signature: `count` beats of `1/unit` notes.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Time {
    pub count: u32,
    pub unit: u32,
}

/// A metronome mark: `bpm` beats of the given note value per minute.
#[derive(Debug, Clone, Deserialize)]
pub struct Tempo {
    pub value: NoteValue,
    pub bpm: u32,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Barline {
    #[serde(rename = "type")]
    pub barline_type: BarlineType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BarlineType {
    Regular,
    Dotted,
    Dashed,
    Heavy,
    LightLight,
    LightHeavy,
    HeavyLight,
    HeavyHeavy,
    Tick,
    Short,
    None,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepeatStart {}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepeatEnd {
    pub times: Option<u32>,
}

/// A volta bracket. Typed for completeness; the converter skips it.
#[derive(Debug, Clone, Deserialize)]
pub struct Ending {
    pub duration: u32,
    pub numbers: Option<Vec<u32>>,
    pub open: Option<bool>,
}

/// D.S./D.C. style jump. The measure-location grammar is underspecified in
/// the format, so the converter rejects jumps outright.
#[derive(Debug, Clone, Deserialize)]
pub struct Jump {
    #[serde(rename = "type")]
    pub jump_type: JumpType,
    pub location: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum JumpType {
    #[serde(rename = "dsalfine")]
    DsAlFine,
    #[serde(rename = "segno")]
    Segno,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Segno {
    pub location: String,
    pub glyph: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Fine {
    pub location: String,
}

/// One instrument/staff group in the document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub id: Option<String>,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub measures: Option<Vec<Measure>>,
    pub staves: Option<u32>,
}

/// One measure of one part: its voices, an optional beam forest and
/// optional clef placements.
#[derive(Debug, Clone, Deserialize)]
pub struct Measure {
    pub sequences: Vec<Sequence>,
    pub beams: Option<Vec<Beam>>,
    pub clefs: Option<Vec<ClefPlacement>>,
}

/// A clef change somewhere in a measure.
#[derive(Debug, Clone, Deserialize)]
pub struct ClefPlacement {
    pub clef: Clef,
    pub position: Option<ClefPosition>,
}

/// Staff positions count from the middle line: 0 is the center line, +1 the
/// space above it, +2 the line above that, negatives go downward.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clef {
    pub sign: ClefSign,
    pub staff_position: i32,
    pub octave: Option<i32>,
    pub glyph: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ClefSign {
    C,
    F,
    G,
}

/// Rhythmic offset of a clef within its measure, as a numerator/denominator
/// pair of whole-note fractions.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClefPosition {
    pub fraction: Vec<u32>,
    pub grace_index: Option<u32>,
}
