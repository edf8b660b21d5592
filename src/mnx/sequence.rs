//! Voice content: sequences, the tagged content-item union, events, notes
//! and their attachments (markings, slurs, ties).

use serde::Deserialize;

/// One voice within a measure, holding content items in document order.
#[derive(Debug, Clone, Deserialize)]
pub struct Sequence {
    pub content: Vec<SequenceContent>,
    pub voice: Option<String>,
    pub staff: Option<u32>,
    pub orient: Option<String>,
}

/// A content item, dispatched on the `"type"` tag.
///
/// Only [`SequenceContent::Event`] is interpreted by the converter; the
/// remaining variants are typed so documents round-trip through serde, and
/// the converter leaves them as deliberate no-ops.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SequenceContent {
    Event(Event),
    Grace(Grace),
    Tuplet(Tuplet),
    OctaveShift(OctaveShift),
    Space(Space),
    Dynamic(Dynamic),
}

/// A timed musical occurrence: a duration plus either a rest marker or one
/// or more pitched notes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Option<String>,
    pub duration: Option<NoteValue>,
    pub rest: Option<Rest>,
    pub notes: Option<Vec<Note>>,
    pub markings: Option<Markings>,
    pub slurs: Option<Vec<Slur>>,
    pub staff: Option<u32>,
    pub stem_direction: Option<String>,
    pub orient: Option<String>,
    pub measure: Option<bool>,
}

/// A rest marker. `staff_position` places the rest glyph vertically.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rest {
    pub staff_position: Option<i32>,
}

/// A symbolic note value: a base duration name plus augmentation dots.
#[derive(Debug, Clone, Deserialize)]
pub struct NoteValue {
    pub base: NoteValueBase,
    pub dots: Option<u32>,
}

/// The closed set of base duration names the format permits. The format
/// reaches one subdivision finer (`4096th`) than the score graph expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NoteValueBase {
    DuplexMaxima,
    Maxima,
    Longa,
    Breve,
    Whole,
    Half,
    Quarter,
    Eighth,
    #[serde(rename = "16th")]
    N16th,
    #[serde(rename = "32nd")]
    N32nd,
    #[serde(rename = "64th")]
    N64th,
    #[serde(rename = "128th")]
    N128th,
    #[serde(rename = "256th")]
    N256th,
    #[serde(rename = "512th")]
    N512th,
    #[serde(rename = "1024th")]
    N1024th,
    #[serde(rename = "2048th")]
    N2048th,
    #[serde(rename = "4096th")]
    N4096th,
}

/// A note value scaled by a multiple, used by tuplets and spaces.
#[derive(Debug, Clone, Deserialize)]
pub struct NoteValueQuantity {
    pub duration: NoteValue,
    pub multiple: u32,
}

/// A single pitched note within an event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub pitch: Pitch,
    pub id: Option<String>,
    pub tie: Option<Tie>,
    pub accidental_display: Option<AccidentalDisplay>,
    pub staff: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pitch {
    pub step: Step,
    pub octave: i32,
    pub alter: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Step {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

/// A tie to a later note, referenced by symbolic id. The target note may
/// appear later in document order than the tie that names it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tie {
    pub target: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccidentalDisplay {
    pub show: bool,
    pub cautionary: Option<bool>,
    pub editorial: Option<bool>,
}

/// Articulation markings on an event. Each field is present when the
/// marking applies; most are empty objects on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Markings {
    pub accent: Option<Accent>,
    pub strong_accent: Option<StrongAccent>,
    pub soft_accent: Option<SoftAccent>,
    pub staccato: Option<Staccato>,
    pub staccatissimo: Option<Staccatissimo>,
    pub spiccato: Option<Spiccato>,
    pub tenuto: Option<Tenuto>,
    pub stress: Option<Stress>,
    pub unstress: Option<Unstress>,
    pub breath: Option<Breath>,
    pub tremolo: Option<Tremolo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Accent {
    pub pointing: Option<UpOrDown>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StrongAccent {
    pub pointing: Option<UpOrDown>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SoftAccent {}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Staccato {}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Staccatissimo {}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Spiccato {}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tenuto {}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Stress {}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Unstress {}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Breath {
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tremolo {
    pub marks: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpOrDown {
    Up,
    Down,
}

/// A phrasing slur. `target` names the event that ends the slur and may
/// point forward in the document; a slur without a target is incomplete by
/// the format's own admission.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slur {
    pub target: Option<String>,
    pub start_note: Option<String>,
    pub end_note: Option<String>,
    pub side: Option<SlurSide>,
    pub side_end: Option<SlurSide>,
    pub location: Option<String>,
    pub line_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlurSide {
    Up,
    Down,
}

/// Grace-note group. Skipped by the converter.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grace {
    pub content: Vec<Event>,
    pub grace_type: Option<String>,
    pub slash: Option<bool>,
}

/// Tuplet group. Skipped by the converter.
#[derive(Debug, Clone, Deserialize)]
pub struct Tuplet {
    pub inner: NoteValueQuantity,
    pub outer: NoteValueQuantity,
    pub content: Vec<Event>,
}

/// Octave shift line. Skipped by the converter.
#[derive(Debug, Clone, Deserialize)]
pub struct OctaveShift {
    pub value: i32,
    pub end: String,
    pub staff: Option<u32>,
}

/// Horizontal spacer. Skipped by the converter.
#[derive(Debug, Clone, Deserialize)]
pub struct Space {
    pub duration: NoteValueQuantity,
}

/// Dynamic marking. Skipped by the converter.
#[derive(Debug, Clone, Deserialize)]
pub struct Dynamic {
    pub value: String,
    pub glyph: Option<String>,
}
