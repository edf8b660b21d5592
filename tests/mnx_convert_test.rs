//! End-to-end conversion tests: whole MNX documents (built as JSON literals
//! and deserialized through the serde layer) driven through `mnx_to_score`.

use mnx_score::converters::mnx_to_score::{
    ConvertError, ConvertResult, IdentifierError, ReferenceError, StructuralError,
    UnsupportedError,
};
use mnx_score::mnx::Document;
use mnx_score::score::{
    Articulation, BarlineKind, BeamMarkKind, ClefKind, DurationBase, MeasureNode, NoteNode,
    PitchStep, Score,
};
use mnx_score::{mnx_to_score, NodeId};

fn convert(json: &str) -> ConvertResult<Score> {
    let doc: Document = serde_json::from_str(json).expect("test document must parse");
    mnx_to_score(&doc)
}

/// Follow part → measure → voice → event handles down to the i-th event of
/// the first voice.
fn first_measure(score: &Score) -> &MeasureNode {
    let part = score.as_part(score.parts[0]).expect("part node");
    score.as_measure(part.measures[0]).expect("measure node")
}

fn voice_event(score: &Score, voice_index: usize, event_index: usize) -> NodeId {
    let measure = first_measure(score);
    let voice = score.as_voice(measure.voices[voice_index]).expect("voice node");
    voice.events[event_index]
}

fn first_note(score: &Score) -> &NoteNode {
    score.as_note(voice_event(score, 0, 0)).expect("note node")
}

#[test]
fn test_single_whole_note_document() {
    let score = convert(
        r#"{
            "mnx": {"version": 1},
            "global": {"measures": [{"time": {"count": 4, "unit": 4}}]},
            "parts": [{
                "name": "Flute",
                "measures": [{
                    "sequences": [{
                        "content": [{
                            "type": "event",
                            "duration": {"base": "whole"},
                            "notes": [{"pitch": {"step": "C", "octave": 4}}]
                        }]
                    }]
                }]
            }]
        }"#,
    )
    .unwrap();

    assert_eq!(score.parts.len(), 1);
    let part = score.as_part(score.parts[0]).unwrap();
    assert_eq!(part.name.as_deref(), Some("Flute"));
    assert_eq!(part.measures.len(), 1);

    let measure = first_measure(&score);
    assert_eq!(measure.time.map(|t| (t.count, t.unit)), Some((4, 4)));
    assert_eq!(measure.voices.len(), 1);

    let note = first_note(&score);
    assert_eq!(note.pitch.step, PitchStep::C);
    assert_eq!(note.pitch.octave, 4);
    assert_eq!(note.duration.base, DurationBase::Whole);
    assert!(note.beams.is_empty());
    assert!(score.slurs.is_empty());
    assert!(score.ties.is_empty());
}

#[test]
fn test_part_and_measure_counts_preserved() {
    let score = convert(
        r#"{
            "mnx": {"version": 1},
            "global": {"measures": [{}, {}, {}]},
            "parts": [
                {"measures": [{"sequences": []}, {"sequences": []}, {"sequences": []}]},
                {"measures": [{"sequences": []}, {"sequences": []}, {"sequences": []}]}
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(score.parts.len(), 2);
    for part in &score.parts {
        assert_eq!(score.as_part(*part).unwrap().measures.len(), 3);
    }
}

#[test]
fn test_measure_count_mismatch_fails_before_building() {
    let err = convert(
        r#"{
            "mnx": {"version": 1},
            "global": {"measures": [{}, {}]},
            "parts": [{"measures": [{"sequences": []}]}]
        }"#,
    )
    .unwrap_err();

    assert_eq!(
        err,
        ConvertError::Structural(StructuralError::MeasureCountMismatch {
            part_index: 0,
            part_measures: 1,
            global_measures: 2,
        })
    );
}

#[test]
fn test_unsupported_version() {
    let err = convert(
        r#"{"mnx": {"version": 2}, "global": {"measures": []}, "parts": []}"#,
    )
    .unwrap_err();
    assert_eq!(
        err,
        ConvertError::Structural(StructuralError::UnsupportedVersion(2))
    );
}

#[test]
fn test_chord_receives_event_identifier() {
    let score = convert(
        r#"{
            "mnx": {"version": 1},
            "global": {"measures": [{}]},
            "parts": [{
                "measures": [{
                    "sequences": [{
                        "content": [{
                            "type": "event",
                            "id": "ev1",
                            "duration": {"base": "half"},
                            "notes": [
                                {"id": "n1", "pitch": {"step": "C", "octave": 4}},
                                {"id": "n2", "pitch": {"step": "E", "octave": 4}}
                            ]
                        }]
                    }]
                }]
            }]
        }"#,
    )
    .unwrap();

    let event = voice_event(&score, 0, 0);
    let chord = score.as_chord(event).expect("two notes make a chord");
    assert_eq!(score.node(event).id.as_deref(), Some("ev1"));
    assert_eq!(chord.notes.len(), 2);
    assert_eq!(chord.duration.base, DurationBase::Half);

    // The notes keep their own identifiers; the chord owns the event's.
    assert_eq!(score.node(chord.notes[0]).id.as_deref(), Some("n1"));
    assert_eq!(score.node(chord.notes[1]).id.as_deref(), Some("n2"));
}

#[test]
fn test_single_note_event_shadows_note_identifier() {
    let score = convert(
        r#"{
            "mnx": {"version": 1},
            "global": {"measures": [{}]},
            "parts": [{
                "measures": [{
                    "sequences": [{
                        "content": [
                            {
                                "type": "event",
                                "id": "ev1",
                                "duration": {"base": "quarter"},
                                "notes": [{"id": "n1", "pitch": {"step": "G", "octave": 4}}],
                                "slurs": [{"target": "ev2"}]
                            },
                            {
                                "type": "event",
                                "id": "ev2",
                                "duration": {"base": "quarter"},
                                "notes": [{"pitch": {"step": "A", "octave": 4}}]
                            }
                        ]
                    }]
                }]
            }]
        }"#,
    )
    .unwrap();

    let first = voice_event(&score, 0, 0);
    // A single-note event reuses the note node; its identifier now reads
    // the event id even though it was first bound as "n1".
    assert!(score.as_note(first).is_some());
    assert_eq!(score.node(first).id.as_deref(), Some("ev1"));

    assert_eq!(score.slurs.len(), 1);
    assert_eq!(score.slurs[0].from, first);
    assert_eq!(score.slurs[0].to, voice_event(&score, 0, 1));
}

#[test]
fn test_rest_event() {
    let score = convert(
        r#"{
            "mnx": {"version": 1},
            "global": {"measures": [{}]},
            "parts": [{
                "measures": [{
                    "sequences": [{
                        "content": [{
                            "type": "event",
                            "duration": {"base": "whole"},
                            "rest": {"staffPosition": -4}
                        }]
                    }]
                }]
            }]
        }"#,
    )
    .unwrap();

    let rest = score.as_rest(voice_event(&score, 0, 0)).expect("rest node");
    assert_eq!(rest.duration.base, DurationBase::Whole);
    assert_eq!(rest.staff_position, Some(-4));
}

#[test]
fn test_event_with_notes_and_rest_is_ambiguous() {
    let err = convert(
        r#"{
            "mnx": {"version": 1},
            "global": {"measures": [{}]},
            "parts": [{
                "measures": [{
                    "sequences": [{
                        "content": [{
                            "type": "event",
                            "id": "bad",
                            "duration": {"base": "whole"},
                            "rest": {},
                            "notes": [{"pitch": {"step": "C", "octave": 4}}]
                        }]
                    }]
                }]
            }]
        }"#,
    )
    .unwrap_err();

    assert_eq!(
        err,
        ConvertError::Structural(StructuralError::AmbiguousEvent("bad".to_string()))
    );
}

#[test]
fn test_event_with_neither_notes_nor_rest_is_ambiguous() {
    let err = convert(
        r#"{
            "mnx": {"version": 1},
            "global": {"measures": [{}]},
            "parts": [{
                "measures": [{
                    "sequences": [{
                        "content": [{"type": "event", "duration": {"base": "whole"}}]
                    }]
                }]
            }]
        }"#,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        ConvertError::Structural(StructuralError::AmbiguousEvent(_))
    ));
}

#[test]
fn test_beamed_run_gets_start_continue_stop() {
    let score = convert(
        r#"{
            "mnx": {"version": 1},
            "global": {"measures": [{}]},
            "parts": [{
                "measures": [{
                    "sequences": [{
                        "content": [
                            {"type": "event", "id": "e1", "duration": {"base": "eighth"},
                             "notes": [{"pitch": {"step": "C", "octave": 4}}]},
                            {"type": "event", "id": "e2", "duration": {"base": "eighth"},
                             "notes": [{"pitch": {"step": "D", "octave": 4}}]},
                            {"type": "event", "id": "e3", "duration": {"base": "eighth"},
                             "notes": [{"pitch": {"step": "E", "octave": 4}}]}
                        ]
                    }],
                    "beams": [{"events": ["e1", "e2", "e3"]}]
                }]
            }]
        }"#,
    )
    .unwrap();

    let kinds: Vec<BeamMarkKind> = (0..3)
        .map(|i| {
            let node = voice_event(&score, 0, i);
            let beams = score.beams(node).unwrap();
            assert_eq!(beams.len(), 1);
            assert_eq!(beams[0].level, 1);
            beams[0].kind
        })
        .collect();

    assert_eq!(
        kinds,
        vec![
            BeamMarkKind::Start,
            BeamMarkKind::Continue,
            BeamMarkKind::Stop
        ]
    );
}

#[test]
fn test_beam_hook_marks_partial() {
    let score = convert(
        r#"{
            "mnx": {"version": 1},
            "global": {"measures": [{}]},
            "parts": [{
                "measures": [{
                    "sequences": [{
                        "content": [
                            {"type": "event", "id": "e1", "duration": {"base": "eighth"},
                             "notes": [{"pitch": {"step": "C", "octave": 4}}]},
                            {"type": "event", "id": "e2", "duration": {"base": "16th"},
                             "notes": [{"pitch": {"step": "D", "octave": 4}}]}
                        ]
                    }],
                    "beams": [{
                        "events": ["e1", "e2"],
                        "hooks": [{"event": "e2", "direction": "right"}]
                    }]
                }]
            }]
        }"#,
    )
    .unwrap();

    let hooked = voice_event(&score, 0, 1);
    let beams = score.beams(hooked).unwrap();
    assert_eq!(beams.len(), 2);
    assert_eq!(beams[0].level, 1);
    assert_eq!(beams[0].kind, BeamMarkKind::Stop);
    assert_eq!(beams[1].level, 2);
    assert_eq!(beams[1].kind, BeamMarkKind::PartialRight);
}

#[test]
fn test_beam_referencing_undeclared_event_fails() {
    let err = convert(
        r#"{
            "mnx": {"version": 1},
            "global": {"measures": [{}]},
            "parts": [{
                "measures": [{
                    "sequences": [],
                    "beams": [{"events": ["missing"]}]
                }]
            }]
        }"#,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        ConvertError::Reference(ReferenceError::UnresolvedReference(_))
    ));
}

#[test]
fn test_slur_resolves_across_voices() {
    // The slur in voice 1 names an event that only exists once voice 2 has
    // been processed; resolution happens through the deferred queue.
    let score = convert(
        r#"{
            "mnx": {"version": 1},
            "global": {"measures": [{}]},
            "parts": [{
                "measures": [{
                    "sequences": [
                        {"content": [{
                            "type": "event", "id": "v1e1", "duration": {"base": "whole"},
                            "notes": [{"pitch": {"step": "C", "octave": 5}}],
                            "slurs": [{"target": "v2e1", "side": "up"}]
                        }]},
                        {"content": [{
                            "type": "event", "id": "v2e1", "duration": {"base": "whole"},
                            "notes": [{"pitch": {"step": "E", "octave": 3}}]
                        }]}
                    ]
                }]
            }]
        }"#,
    )
    .unwrap();

    assert_eq!(score.slurs.len(), 1);
    let slur = &score.slurs[0];
    assert_eq!(slur.from, voice_event(&score, 0, 0));
    assert_eq!(slur.to, voice_event(&score, 1, 0));
}

#[test]
fn test_slur_resolves_into_later_measure() {
    let score = convert(
        r#"{
            "mnx": {"version": 1},
            "global": {"measures": [{}, {}]},
            "parts": [{
                "measures": [
                    {"sequences": [{"content": [{
                        "type": "event", "id": "m1e1", "duration": {"base": "whole"},
                        "notes": [{"pitch": {"step": "C", "octave": 4}}],
                        "slurs": [{"target": "m2e1"}]
                    }]}]},
                    {"sequences": [{"content": [{
                        "type": "event", "id": "m2e1", "duration": {"base": "whole"},
                        "notes": [{"pitch": {"step": "D", "octave": 4}}]
                    }]}]}
                ]
            }]
        }"#,
    )
    .unwrap();

    assert_eq!(score.slurs.len(), 1);
}

#[test]
fn test_backward_slur_target_resolves_immediately() {
    let score = convert(
        r#"{
            "mnx": {"version": 1},
            "global": {"measures": [{}]},
            "parts": [{
                "measures": [{
                    "sequences": [{
                        "content": [
                            {"type": "event", "id": "e1", "duration": {"base": "quarter"},
                             "notes": [{"pitch": {"step": "C", "octave": 4}}]},
                            {"type": "event", "id": "e2", "duration": {"base": "quarter"},
                             "notes": [{"pitch": {"step": "D", "octave": 4}}],
                             "slurs": [{"target": "e1"}]}
                        ]
                    }]
                }]
            }]
        }"#,
    )
    .unwrap();

    assert_eq!(score.slurs.len(), 1);
    assert_eq!(score.slurs[0].from, voice_event(&score, 0, 1));
    assert_eq!(score.slurs[0].to, voice_event(&score, 0, 0));
}

#[test]
fn test_undeclared_slur_target_fails_conversion() {
    let err = convert(
        r#"{
            "mnx": {"version": 1},
            "global": {"measures": [{}]},
            "parts": [{
                "measures": [{
                    "sequences": [{"content": [{
                        "type": "event", "duration": {"base": "whole"},
                        "notes": [{"pitch": {"step": "C", "octave": 4}}],
                        "slurs": [{"target": "never-declared"}]
                    }]}]
                }]
            }]
        }"#,
    )
    .unwrap_err();

    assert_eq!(
        err,
        ConvertError::Reference(ReferenceError::UnresolvedReference(
            "slur target 'never-declared'".to_string()
        ))
    );
}

#[test]
fn test_slur_without_target_is_dropped() {
    let score = convert(
        r#"{
            "mnx": {"version": 1},
            "global": {"measures": [{}]},
            "parts": [{
                "measures": [{
                    "sequences": [{"content": [{
                        "type": "event", "duration": {"base": "whole"},
                        "notes": [{"pitch": {"step": "C", "octave": 4}}],
                        "slurs": [{"side": "down"}]
                    }]}]
                }]
            }]
        }"#,
    )
    .unwrap();

    assert!(score.slurs.is_empty());
}

#[test]
fn test_tie_resolves_forward() {
    let score = convert(
        r#"{
            "mnx": {"version": 1},
            "global": {"measures": [{}, {}]},
            "parts": [{
                "measures": [
                    {"sequences": [{"content": [{
                        "type": "event", "duration": {"base": "whole"},
                        "notes": [{"id": "a", "pitch": {"step": "F", "octave": 4},
                                   "tie": {"target": "b"}}]
                    }]}]},
                    {"sequences": [{"content": [{
                        "type": "event", "duration": {"base": "whole"},
                        "notes": [{"id": "b", "pitch": {"step": "F", "octave": 4}}]
                    }]}]}
                ]
            }]
        }"#,
    )
    .unwrap();

    assert_eq!(score.ties.len(), 1);
    let part = score.as_part(score.parts[0]).unwrap();
    let second = score.as_measure(part.measures[1]).unwrap();
    let target = score.as_voice(second.voices[0]).unwrap().events[0];
    assert_eq!(score.ties[0].to, target);
}

#[test]
fn test_undeclared_tie_target_fails_conversion() {
    let err = convert(
        r#"{
            "mnx": {"version": 1},
            "global": {"measures": [{}]},
            "parts": [{
                "measures": [{
                    "sequences": [{"content": [{
                        "type": "event", "duration": {"base": "whole"},
                        "notes": [{"pitch": {"step": "C", "octave": 4},
                                   "tie": {"target": "gone"}}]
                    }]}]
                }]
            }]
        }"#,
    )
    .unwrap_err();

    assert_eq!(
        err,
        ConvertError::Reference(ReferenceError::UnresolvedReference(
            "tie target 'gone'".to_string()
        ))
    );
}

#[test]
fn test_duplicate_identifier_fails() {
    let err = convert(
        r#"{
            "mnx": {"version": 1},
            "global": {"measures": [{}]},
            "parts": [{
                "measures": [{
                    "sequences": [{
                        "content": [
                            {"type": "event", "id": "dup", "duration": {"base": "quarter"},
                             "notes": [{"pitch": {"step": "C", "octave": 4}}]},
                            {"type": "event", "id": "dup", "duration": {"base": "quarter"},
                             "notes": [{"pitch": {"step": "D", "octave": 4}}]}
                        ]
                    }]
                }]
            }]
        }"#,
    )
    .unwrap_err();

    assert_eq!(
        err,
        ConvertError::Identifier(IdentifierError::DuplicateId("dup".to_string()))
    );
}

#[test]
fn test_global_context_merges_into_measure() {
    let score = convert(
        r#"{
            "mnx": {"version": 1},
            "global": {"measures": [{
                "number": 1,
                "key": {"fifths": -3},
                "time": {"count": 6, "unit": 8},
                "tempos": [{"value": {"base": "quarter", "dots": 1}, "bpm": 60}],
                "barline": {"type": "light-heavy"},
                "repeatStart": {},
                "repeatEnd": {"times": 2}
            }]},
            "parts": [{"measures": [{"sequences": []}]}]
        }"#,
    )
    .unwrap();

    let measure = first_measure(&score);
    assert_eq!(measure.number, Some(1));
    assert_eq!(measure.key.map(|k| k.fifths), Some(-3));
    assert_eq!(measure.time.map(|t| (t.count, t.unit)), Some((6, 8)));
    assert_eq!(measure.tempos.len(), 1);
    assert_eq!(measure.tempos[0].bpm, 60);
    assert_eq!(measure.tempos[0].value.dots, 1);
    assert_eq!(measure.barline, Some(BarlineKind::LightHeavy));
    assert!(measure.repeat_start);
    assert!(measure.repeat_end);
    assert_eq!(measure.repeat_times, Some(2));
}

#[test]
fn test_jump_segno_fine_are_unsupported() {
    for (attr, name) in [
        (r#""jump": {"type": "segno", "location": "4"}"#, "jump"),
        (r#""segno": {"location": "2"}"#, "segno"),
        (r#""fine": {"location": "8"}"#, "fine"),
    ] {
        let json = format!(
            r#"{{
                "mnx": {{"version": 1}},
                "global": {{"measures": [{{{attr}}}]}},
                "parts": [{{"measures": [{{"sequences": []}}]}}]
            }}"#
        );
        let err = convert(&json).unwrap_err();
        assert!(
            matches!(
                err,
                ConvertError::Unsupported(UnsupportedError::Navigation(_))
            ),
            "{name} should be an unsupported navigation marker, got {err:?}"
        );
    }
}

#[test]
fn test_markings_map_to_articulations() {
    let score = convert(
        r#"{
            "mnx": {"version": 1},
            "global": {"measures": [{}]},
            "parts": [{
                "measures": [{
                    "sequences": [{"content": [{
                        "type": "event", "duration": {"base": "quarter"},
                        "notes": [{"pitch": {"step": "B", "octave": 3}}],
                        "markings": {
                            "staccato": {},
                            "accent": {"pointing": "up"},
                            "tremolo": {"marks": 3}
                        }
                    }]}]
                }]
            }]
        }"#,
    )
    .unwrap();

    let note = first_note(&score);
    assert_eq!(note.articulations.len(), 3);
    assert!(note.articulations.contains(&Articulation::Staccato));
    assert!(note
        .articulations
        .contains(&Articulation::Tremolo { marks: 3 }));
}

#[test]
fn test_soft_accent_marking_is_unsupported() {
    let err = convert(
        r#"{
            "mnx": {"version": 1},
            "global": {"measures": [{}]},
            "parts": [{
                "measures": [{
                    "sequences": [{"content": [{
                        "type": "event", "duration": {"base": "quarter"},
                        "notes": [{"pitch": {"step": "B", "octave": 3}}],
                        "markings": {"softAccent": {}}
                    }]}]
                }]
            }]
        }"#,
    )
    .unwrap_err();

    assert_eq!(
        err,
        ConvertError::Unsupported(UnsupportedError::Marking("softAccent".to_string()))
    );
}

#[test]
fn test_too_fine_duration_is_unsupported() {
    let err = convert(
        r#"{
            "mnx": {"version": 1},
            "global": {"measures": [{}]},
            "parts": [{
                "measures": [{
                    "sequences": [{"content": [{
                        "type": "event", "duration": {"base": "4096th"},
                        "notes": [{"pitch": {"step": "C", "octave": 4}}]
                    }]}]
                }]
            }]
        }"#,
    )
    .unwrap_err();

    assert_eq!(
        err,
        ConvertError::Unsupported(UnsupportedError::Duration("4096th".to_string()))
    );
}

#[test]
fn test_clef_placements() {
    let score = convert(
        r#"{
            "mnx": {"version": 1},
            "global": {"measures": [{}]},
            "parts": [{
                "measures": [{
                    "sequences": [],
                    "clefs": [
                        {"clef": {"sign": "G", "staffPosition": -2}},
                        {"clef": {"sign": "C", "staffPosition": 0},
                         "position": {"fraction": [1, 2]}}
                    ]
                }]
            }]
        }"#,
    )
    .unwrap();

    let measure = first_measure(&score);
    assert_eq!(measure.clefs.len(), 2);

    let treble = &measure.clefs[0];
    assert_eq!(treble.kind, ClefKind::G);
    assert_eq!(treble.line, 2);
    assert!(treble.offset.is_none());

    let alto = &measure.clefs[1];
    assert_eq!(alto.kind, ClefKind::C);
    assert_eq!(alto.line, 3);
    assert_eq!(
        alto.offset,
        Some(num_rational::Rational32::new(1, 2))
    );
}

#[test]
fn test_clef_between_lines_is_unsupported() {
    let err = convert(
        r#"{
            "mnx": {"version": 1},
            "global": {"measures": [{}]},
            "parts": [{
                "measures": [{
                    "sequences": [],
                    "clefs": [{"clef": {"sign": "G", "staffPosition": -1}}]
                }]
            }]
        }"#,
    )
    .unwrap_err();

    assert_eq!(
        err,
        ConvertError::Unsupported(UnsupportedError::ClefBetweenLines(-1))
    );
}

#[test]
fn test_unhandled_content_kinds_are_skipped() {
    let score = convert(
        r#"{
            "mnx": {"version": 1},
            "global": {"measures": [{}]},
            "parts": [{
                "measures": [{
                    "sequences": [{
                        "content": [
                            {"type": "dynamic", "value": "mf"},
                            {"type": "event", "duration": {"base": "whole"},
                             "notes": [{"pitch": {"step": "C", "octave": 4}}]},
                            {"type": "space", "duration":
                                {"duration": {"base": "quarter"}, "multiple": 1}}
                        ]
                    }]
                }]
            }]
        }"#,
    )
    .unwrap();

    // Only the event produced a node; the dynamic and the space are gaps.
    let measure = first_measure(&score);
    let voice = score.as_voice(measure.voices[0]).unwrap();
    assert_eq!(voice.events.len(), 1);
}
