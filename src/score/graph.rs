//! Arena-backed score graph.
//!
//! All created nodes live in one `Vec`; structure (part → measure → voice →
//! event, chord → notes) is expressed as `NodeId` child lists, and
//! document-spanning connectors (slurs, ties) live at the graph level as
//! span records between handles.

use serde::{Deserialize, Serialize};

use super::types::{
    Articulation, BarlineKind, BeamMark, Clef, Duration, KeySignature, Pitch, SlurPlacement,
    TempoMark, TimeSignature,
};

/// Stable handle to a node in a [`Score`] arena.
///
/// Handles are plain indices; they are never reused within one graph, and
/// comparing two handles for equality is node *identity*, not equality of
/// content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One node in the graph: an optional symbolic identifier plus the typed
/// content. The identifier field is mutable by design — binding an event id
/// to a single-note event rewrites the note's identifier while the old
/// registry mapping survives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: Option<String>,
    pub content: NodeContent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum NodeContent {
    Part(PartNode),
    Measure(MeasureNode),
    Voice(VoiceNode),
    Note(NoteNode),
    Chord(ChordNode),
    Rest(RestNode),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartNode {
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub measures: Vec<NodeId>,
}

/// A measure of one part, with the global timeline's context already merged
/// in: the measure carries its own key, time, tempo and barline state so
/// per-note interpretation never has to reach back to the document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeasureNode {
    pub number: Option<i32>,
    pub key: Option<KeySignature>,
    pub time: Option<TimeSignature>,
    pub tempos: Vec<TempoMark>,
    pub barline: Option<BarlineKind>,
    pub repeat_start: bool,
    pub repeat_end: bool,
    pub repeat_times: Option<u32>,
    pub clefs: Vec<Clef>,
    pub voices: Vec<NodeId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoiceNode {
    pub name: Option<String>,
    pub events: Vec<NodeId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteNode {
    pub pitch: Pitch,
    pub duration: Duration,
    pub show_accidental: Option<bool>,
    pub beams: Vec<BeamMark>,
    pub articulations: Vec<Articulation>,
}

/// Two or more notes sharing one event's duration and identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChordNode {
    pub notes: Vec<NodeId>,
    pub duration: Duration,
    pub beams: Vec<BeamMark>,
    pub articulations: Vec<Articulation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestNode {
    pub duration: Duration,
    pub staff_position: Option<i32>,
}

/// A resolved slur between two event nodes. The note-level endpoints stay
/// symbolic; resolving them to handles is the renderer's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlurSpan {
    pub from: NodeId,
    pub to: NodeId,
    pub placement: Option<SlurPlacement>,
    pub line_type: Option<String>,
    pub start_note: Option<String>,
    pub end_note: Option<String>,
}

/// A resolved tie between two note nodes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TieSpan {
    pub from: NodeId,
    pub to: NodeId,
}

/// The output graph. Owned exclusively by the converter during
/// construction; returned by value once conversion completes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Score {
    nodes: Vec<Node>,
    pub parts: Vec<NodeId>,
    pub slurs: Vec<SlurSpan>,
    pub ties: Vec<TieSpan>,
}

impl Score {
    pub fn new() -> Self {
        Score::default()
    }

    /// Append a node and return its handle.
    pub fn add(&mut self, content: NodeContent) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { id: None, content });
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn as_part(&self, id: NodeId) -> Option<&PartNode> {
        match &self.node(id).content {
            NodeContent::Part(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_measure(&self, id: NodeId) -> Option<&MeasureNode> {
        match &self.node(id).content {
            NodeContent::Measure(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_voice(&self, id: NodeId) -> Option<&VoiceNode> {
        match &self.node(id).content {
            NodeContent::Voice(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_note(&self, id: NodeId) -> Option<&NoteNode> {
        match &self.node(id).content {
            NodeContent::Note(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_chord(&self, id: NodeId) -> Option<&ChordNode> {
        match &self.node(id).content {
            NodeContent::Chord(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_rest(&self, id: NodeId) -> Option<&RestNode> {
        match &self.node(id).content {
            NodeContent::Rest(r) => Some(r),
            _ => None,
        }
    }

    /// Beam-mark list of a note or chord; `None` for anything else.
    /// Rests and container nodes never carry beams.
    pub fn beams_mut(&mut self, id: NodeId) -> Option<&mut Vec<BeamMark>> {
        match &mut self.node_mut(id).content {
            NodeContent::Note(n) => Some(&mut n.beams),
            NodeContent::Chord(c) => Some(&mut c.beams),
            _ => None,
        }
    }

    /// Beam marks of a note or chord, read-only.
    pub fn beams(&self, id: NodeId) -> Option<&[BeamMark]> {
        match &self.node(id).content {
            NodeContent::Note(n) => Some(&n.beams),
            NodeContent::Chord(c) => Some(&c.beams),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::types::{DurationBase, PitchStep};

    fn sample_note() -> NoteNode {
        NoteNode {
            pitch: Pitch {
                step: PitchStep::C,
                octave: 4,
                alteration: None,
            },
            duration: Duration::new(DurationBase::Quarter, 0),
            show_accidental: None,
            beams: Vec::new(),
            articulations: Vec::new(),
        }
    }

    #[test]
    fn handles_are_stable_and_distinct() {
        let mut score = Score::new();
        let a = score.add(NodeContent::Note(sample_note()));
        let b = score.add(NodeContent::Note(sample_note()));
        assert_ne!(a, b);
        assert_eq!(score.node_count(), 2);
        assert!(score.as_note(a).is_some());
    }

    #[test]
    fn beams_only_on_notes_and_chords() {
        let mut score = Score::new();
        let note = score.add(NodeContent::Note(sample_note()));
        let rest = score.add(NodeContent::Rest(RestNode {
            duration: Duration::new(DurationBase::Quarter, 0),
            staff_position: None,
        }));
        assert!(score.beams_mut(note).is_some());
        assert!(score.beams_mut(rest).is_none());
    }
}
