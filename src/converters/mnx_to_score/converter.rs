//! Tree walker and graph builder
//!
//! Drives the whole conversion: document → part → measure → voice → event →
//! note/chord/rest. Each measure first merges the global timeline's
//! attributes, then builds its voices, then resolves beams against the
//! nodes those voices created, then attaches clefs. Slur and tie targets
//! may point forward in the document, so they go through the deferred task
//! queue and resolve as their target ids are bound.

use crate::mnx::{
    ClefPlacement, ClefSign, Document, Event, Global, GlobalMeasure, Markings, Measure, Note,
    Part, Sequence, SequenceContent, Slur, SlurSide, Step, Tie, UpOrDown,
};
use crate::score::{
    Articulation, BarlineKind, ChordNode, Clef, ClefKind, Duration, KeySignature, MeasureNode,
    NodeContent, NodeId, NoteNode, PartNode, Pitch, PitchStep, Pointing, RestNode, Score,
    SlurPlacement, SlurSpan, TempoMark, TieSpan, TimeSignature, VoiceNode,
};

use super::beams::resolve_beam;
use super::duration::{to_duration, to_fraction};
use super::errors::{ConvertResult, StructuralError, UnsupportedError};
use super::registry::NodeRegistry;

/// Convert a typed MNX document into a score graph.
///
/// The document must already be deserialized and schema-valid; this
/// function never touches raw JSON. On success the returned graph is fully
/// resolved — every beam mark attached, every slur and tie span connected,
/// no deferred work outstanding. On failure the partially built graph is
/// dropped with the error.
pub fn mnx_to_score(doc: &Document) -> ConvertResult<Score> {
    if doc.mnx.version != 1 {
        return Err(StructuralError::UnsupportedVersion(doc.mnx.version).into());
    }

    // Validate every part against the global timeline up front: a
    // mismatched document fails before any node is created.
    let global_measures = doc.global.measures.len();
    for (part_index, part) in doc.parts.iter().enumerate() {
        let measures = part
            .measures
            .as_ref()
            .ok_or(StructuralError::PartWithoutMeasures(part_index))?;
        if measures.len() != global_measures {
            return Err(StructuralError::MeasureCountMismatch {
                part_index,
                part_measures: measures.len(),
                global_measures,
            }
            .into());
        }
    }

    let mut converter = Converter {
        score: Score::new(),
        registry: NodeRegistry::new(),
    };

    for (part_index, part) in doc.parts.iter().enumerate() {
        let node = converter.convert_part(part_index, part, &doc.global)?;
        converter.score.parts.push(node);
    }

    // Every deferred task must have fired by now; a leftover task names an
    // id the document never declared.
    converter.registry.finish()?;

    Ok(converter.score)
}

struct Converter {
    score: Score,
    registry: NodeRegistry,
}

impl Converter {
    fn bind(
        &mut self,
        node: NodeId,
        id: Option<&str>,
        allow_shadowing: bool,
    ) -> ConvertResult<()> {
        self.registry
            .bind(&mut self.score, node, id, allow_shadowing)?;
        Ok(())
    }

    fn convert_part(
        &mut self,
        part_index: usize,
        part: &Part,
        global: &Global,
    ) -> ConvertResult<NodeId> {
        let node = self.score.add(NodeContent::Part(PartNode {
            name: part.name.clone(),
            short_name: part.short_name.clone(),
            measures: Vec::new(),
        }));
        self.bind(node, part.id.as_deref(), false)?;

        let in_measures = part
            .measures
            .as_ref()
            .ok_or(StructuralError::PartWithoutMeasures(part_index))?;

        let mut measures = Vec::with_capacity(in_measures.len());
        for (in_measure, global_measure) in in_measures.iter().zip(&global.measures) {
            measures.push(self.convert_measure(in_measure, global_measure)?);
        }
        if let NodeContent::Part(p) = &mut self.score.node_mut(node).content {
            p.measures = measures;
        }

        Ok(node)
    }

    fn convert_measure(
        &mut self,
        in_measure: &Measure,
        global_measure: &GlobalMeasure,
    ) -> ConvertResult<NodeId> {
        // Global context merges in before any sequence is read.
        let mut measure = merge_global(global_measure)?;

        for sequence in &in_measure.sequences {
            let voice = self.convert_sequence(sequence)?;
            measure.voices.push(voice);
        }

        // Beams resolve against the nodes the voices just created. Beamed
        // events never live in another measure, so every id is bound here.
        if let Some(beams) = &in_measure.beams {
            for beam in beams {
                resolve_beam(&mut self.score, &self.registry, beam, 1)?;
            }
        }

        if let Some(clefs) = &in_measure.clefs {
            for placement in clefs {
                measure.clefs.push(convert_clef(placement)?);
            }
        }

        Ok(self.score.add(NodeContent::Measure(measure)))
    }

    fn convert_sequence(&mut self, sequence: &Sequence) -> ConvertResult<NodeId> {
        let mut voice = VoiceNode {
            name: sequence.voice.clone(),
            events: Vec::new(),
        };

        for item in &sequence.content {
            match item {
                SequenceContent::Event(event) => {
                    voice.events.push(self.convert_event(event)?);
                }
                // The remaining content kinds are deliberate no-ops.
                SequenceContent::Grace(_) => {}
                SequenceContent::Tuplet(_) => {}
                SequenceContent::OctaveShift(_) => {}
                SequenceContent::Space(_) => {}
                SequenceContent::Dynamic(_) => {}
            }
        }

        Ok(self.score.add(NodeContent::Voice(voice)))
    }

    fn convert_event(&mut self, event: &Event) -> ConvertResult<NodeId> {
        let duration = event
            .duration
            .as_ref()
            .ok_or_else(|| StructuralError::EventWithoutDuration(event_label(event)))?;
        let duration = to_duration(duration)?;

        let notes = event.notes.as_deref().unwrap_or(&[]);

        let node = match (&event.rest, notes.is_empty()) {
            (Some(rest), true) => {
                if event.markings.is_some() {
                    log::warn!("dropping markings on rest event '{}'", event_label(event));
                }
                let node = self.score.add(NodeContent::Rest(RestNode {
                    duration,
                    staff_position: rest.staff_position,
                }));
                self.bind(node, event.id.as_deref(), false)?;
                node
            }
            (None, false) => {
                let articulations = match &event.markings {
                    Some(markings) => map_markings(markings)?,
                    None => Vec::new(),
                };

                let mut note_nodes = Vec::with_capacity(notes.len());
                for note in notes {
                    note_nodes.push(self.convert_note(note, duration)?);
                }

                if let [single] = note_nodes[..] {
                    // The event id replaces the note's own identifier; the
                    // note id's registry mapping survives the rewrite.
                    self.bind(single, event.id.as_deref(), true)?;
                    if let NodeContent::Note(n) = &mut self.score.node_mut(single).content {
                        n.articulations = articulations;
                    }
                    single
                } else {
                    let chord = self.score.add(NodeContent::Chord(ChordNode {
                        notes: note_nodes,
                        duration,
                        beams: Vec::new(),
                        articulations,
                    }));
                    self.bind(chord, event.id.as_deref(), false)?;
                    chord
                }
            }
            _ => return Err(StructuralError::AmbiguousEvent(event_label(event)).into()),
        };

        if let Some(slurs) = &event.slurs {
            for slur in slurs {
                self.attach_slur(node, event, slur);
            }
        }

        Ok(node)
    }

    fn convert_note(&mut self, note: &Note, duration: Duration) -> ConvertResult<NodeId> {
        let pitch = Pitch {
            step: map_step(note.pitch.step),
            octave: note.pitch.octave,
            alteration: note.pitch.alter,
        };

        let node = self.score.add(NodeContent::Note(NoteNode {
            pitch,
            duration,
            show_accidental: note.accidental_display.as_ref().map(|a| a.show),
            beams: Vec::new(),
            articulations: Vec::new(),
        }));
        self.bind(node, note.id.as_deref(), false)?;

        if let Some(tie) = &note.tie {
            self.attach_tie(node, tie);
        }

        Ok(node)
    }

    /// Connect a slur now if its target is already bound, otherwise park it
    /// on the deferred queue until the target id appears. Targets are not
    /// ordered relative to the slur — across voices and parts either side
    /// can come first.
    fn attach_slur(&mut self, from: NodeId, event: &Event, slur: &Slur) {
        let Some(target) = slur.target.clone() else {
            log::warn!(
                "slur on event '{}' has no target, dropping",
                event_label(event)
            );
            return;
        };

        let placement = slur.side.map(|side| match side {
            SlurSide::Up => SlurPlacement::Above,
            SlurSide::Down => SlurPlacement::Below,
        });
        let line_type = slur.line_type.clone();
        let start_note = slur.start_note.clone();
        let end_note = slur.end_note.clone();

        if let Ok(to) = self.registry.lookup(&target) {
            self.score.slurs.push(SlurSpan {
                from,
                to,
                placement,
                line_type,
                start_note,
                end_note,
            });
            return;
        }

        let description = format!("slur target '{target}'");
        self.registry.defer(description, move |score, bound_id, bound_node| {
            if bound_id != target {
                return false;
            }
            score.slurs.push(SlurSpan {
                from,
                to: bound_node,
                placement,
                line_type: line_type.clone(),
                start_note: start_note.clone(),
                end_note: end_note.clone(),
            });
            true
        });
    }

    /// Same deferral scheme as slurs, for a note's tie target.
    fn attach_tie(&mut self, from: NodeId, tie: &Tie) {
        let Some(target) = tie.target.clone() else {
            log::warn!("tie has no target, dropping");
            return;
        };

        if let Ok(to) = self.registry.lookup(&target) {
            self.score.ties.push(TieSpan { from, to });
            return;
        }

        let description = format!("tie target '{target}'");
        self.registry.defer(description, move |score, bound_id, bound_node| {
            if bound_id != target {
                return false;
            }
            score.ties.push(TieSpan {
                from,
                to: bound_node,
            });
            true
        });
    }
}

/// Build the output measure's merged global context. Navigation markers
/// (jump, segno, fine) fail fast — dropping them silently would corrupt
/// playback order. `ending` and `index` are not interpreted yet and are
/// skipped.
fn merge_global(global_measure: &GlobalMeasure) -> ConvertResult<MeasureNode> {
    if let Some(jump) = &global_measure.jump {
        return Err(UnsupportedError::Navigation(format!("jump to '{}'", jump.location)).into());
    }
    if global_measure.segno.is_some() {
        return Err(UnsupportedError::Navigation("segno".to_string()).into());
    }
    if global_measure.fine.is_some() {
        return Err(UnsupportedError::Navigation("fine".to_string()).into());
    }

    let mut measure = MeasureNode {
        number: global_measure.number,
        key: global_measure
            .key
            .map(|k| KeySignature { fifths: k.fifths }),
        time: global_measure.time.map(|t| TimeSignature {
            count: t.count,
            unit: t.unit,
        }),
        barline: global_measure
            .barline
            .as_ref()
            .map(|b| map_barline(b.barline_type)),
        repeat_start: global_measure.repeat_start.is_some(),
        repeat_end: global_measure.repeat_end.is_some(),
        repeat_times: global_measure
            .repeat_end
            .as_ref()
            .and_then(|r| r.times),
        ..MeasureNode::default()
    };

    if let Some(tempos) = &global_measure.tempos {
        for tempo in tempos {
            // tempo.location is typed but not interpreted
            measure.tempos.push(TempoMark {
                value: to_duration(&tempo.value)?,
                bpm: tempo.bpm,
            });
        }
    }

    Ok(measure)
}

/// Map a clef placement onto a staff line.
///
/// Source staff positions count half-steps from the middle line; the graph
/// counts lines 1 (bottom) to 5 (top). Odd positions sit between lines,
/// which the graph cannot place.
fn convert_clef(placement: &ClefPlacement) -> ConvertResult<Clef> {
    let kind = match placement.clef.sign {
        ClefSign::C => ClefKind::C,
        ClefSign::F => ClefKind::F,
        ClefSign::G => ClefKind::G,
    };

    let position = placement.clef.staff_position;
    if position.rem_euclid(2) != 0 {
        return Err(UnsupportedError::ClefBetweenLines(position).into());
    }

    let offset = match &placement.position {
        Some(pos) => Some(to_fraction(&pos.fraction)?),
        None => None,
    };

    Ok(Clef {
        kind,
        line: 3 + position / 2,
        octave_shift: placement.clef.octave,
        offset,
    })
}

/// Markings map one-to-one onto articulations; one the graph's vocabulary
/// cannot express is a typed failure, because silent marking loss is a
/// correctness regression for notation.
fn map_markings(markings: &Markings) -> Result<Vec<Articulation>, UnsupportedError> {
    if markings.soft_accent.is_some() {
        return Err(UnsupportedError::Marking("softAccent".to_string()));
    }

    let mut out = Vec::new();
    if let Some(accent) = &markings.accent {
        out.push(Articulation::Accent {
            pointing: accent.pointing.map(map_pointing),
        });
    }
    if let Some(strong) = &markings.strong_accent {
        out.push(Articulation::StrongAccent {
            pointing: strong.pointing.map(map_pointing),
        });
    }
    if markings.staccato.is_some() {
        out.push(Articulation::Staccato);
    }
    if markings.staccatissimo.is_some() {
        out.push(Articulation::Staccatissimo);
    }
    if markings.spiccato.is_some() {
        out.push(Articulation::Spiccato);
    }
    if markings.tenuto.is_some() {
        out.push(Articulation::Tenuto);
    }
    if markings.stress.is_some() {
        out.push(Articulation::Stress);
    }
    if markings.unstress.is_some() {
        out.push(Articulation::Unstress);
    }
    if let Some(breath) = &markings.breath {
        out.push(Articulation::Breath {
            symbol: breath.symbol.clone(),
        });
    }
    if let Some(tremolo) = &markings.tremolo {
        out.push(Articulation::Tremolo {
            marks: tremolo.marks,
        });
    }
    Ok(out)
}

fn map_pointing(p: UpOrDown) -> Pointing {
    match p {
        UpOrDown::Up => Pointing::Up,
        UpOrDown::Down => Pointing::Down,
    }
}

fn map_step(step: Step) -> PitchStep {
    match step {
        Step::A => PitchStep::A,
        Step::B => PitchStep::B,
        Step::C => PitchStep::C,
        Step::D => PitchStep::D,
        Step::E => PitchStep::E,
        Step::F => PitchStep::F,
        Step::G => PitchStep::G,
    }
}

fn map_barline(barline: crate::mnx::BarlineType) -> BarlineKind {
    use crate::mnx::BarlineType as B;
    match barline {
        B::Regular => BarlineKind::Regular,
        B::Dotted => BarlineKind::Dotted,
        B::Dashed => BarlineKind::Dashed,
        B::Heavy => BarlineKind::Heavy,
        B::LightLight => BarlineKind::LightLight,
        B::LightHeavy => BarlineKind::LightHeavy,
        B::HeavyLight => BarlineKind::HeavyLight,
        B::HeavyHeavy => BarlineKind::HeavyHeavy,
        B::Tick => BarlineKind::Tick,
        B::Short => BarlineKind::Short,
        B::None => BarlineKind::None,
    }
}

fn event_label(event: &Event) -> String {
    event
        .id
        .clone()
        .unwrap_or_else(|| "<anonymous>".to_string())
}
