//! Notation vocabulary for the score graph: durations, pitches, beam marks,
//! articulations and the per-measure context merged in from the global
//! timeline.

use num_rational::Rational32;
use serde::{Deserialize, Serialize};

/// Base duration names the score graph expresses, from longest to shortest.
///
/// This stops at `2048th`: one subdivision coarser than the finest value the
/// source format permits. Mapping the finer value is an explicit failure in
/// the converter, never a truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationBase {
    DuplexMaxima,
    Maxima,
    Longa,
    Breve,
    Whole,
    Half,
    Quarter,
    Eighth,
    N16th,
    N32nd,
    N64th,
    N128th,
    N256th,
    N512th,
    N1024th,
    N2048th,
}

impl DurationBase {
    /// Length of the undotted base in whole-note units.
    pub fn whole_units(self) -> Rational32 {
        match self {
            DurationBase::DuplexMaxima => Rational32::from_integer(16),
            DurationBase::Maxima => Rational32::from_integer(8),
            DurationBase::Longa => Rational32::from_integer(4),
            DurationBase::Breve => Rational32::from_integer(2),
            DurationBase::Whole => Rational32::from_integer(1),
            DurationBase::Half => Rational32::new(1, 2),
            DurationBase::Quarter => Rational32::new(1, 4),
            DurationBase::Eighth => Rational32::new(1, 8),
            DurationBase::N16th => Rational32::new(1, 16),
            DurationBase::N32nd => Rational32::new(1, 32),
            DurationBase::N64th => Rational32::new(1, 64),
            DurationBase::N128th => Rational32::new(1, 128),
            DurationBase::N256th => Rational32::new(1, 256),
            DurationBase::N512th => Rational32::new(1, 512),
            DurationBase::N1024th => Rational32::new(1, 1024),
            DurationBase::N2048th => Rational32::new(1, 2048),
        }
    }
}

/// A concrete duration: base value plus augmentation dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Duration {
    pub base: DurationBase,
    pub dots: u8,
}

impl Duration {
    pub fn new(base: DurationBase, dots: u8) -> Self {
        Duration { base, dots }
    }

    /// Total length in whole-note units, dots included.
    /// Each dot adds half of the previous increment.
    pub fn whole_units(&self) -> Rational32 {
        let base = self.base.whole_units();
        let mut length = base;
        let mut increment = base / 2;
        for _ in 0..self.dots {
            length += increment;
            increment /= 2;
        }
        length
    }
}

/// Diatonic step names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PitchStep {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

/// A concrete pitch: step, octave, chromatic alteration in semitones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pitch {
    pub step: PitchStep,
    pub octave: i32,
    pub alteration: Option<i32>,
}

/// One beam mark on a note or chord: the subdivision level it belongs to
/// and its role within that level's group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeamMark {
    pub level: u8,
    pub kind: BeamMarkKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeamMarkKind {
    Start,
    Continue,
    Stop,
    PartialLeft,
    PartialRight,
}

/// Articulations attachable to a note or chord.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Articulation {
    Accent { pointing: Option<Pointing> },
    StrongAccent { pointing: Option<Pointing> },
    Staccato,
    Staccatissimo,
    Spiccato,
    Tenuto,
    Stress,
    Unstress,
    Breath { symbol: Option<String> },
    Tremolo { marks: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pointing {
    Up,
    Down,
}

/// Which side of the staff a slur curves toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlurPlacement {
    Above,
    Below,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySignature {
    pub fifths: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSignature {
    pub count: u32,
    pub unit: u32,
}

/// A metronome mark merged from the global timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TempoMark {
    pub value: Duration,
    pub bpm: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarlineKind {
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

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClefKind {
    C,
    F,
    G,
}

/// A clef placed in a measure. `line` counts staff lines from 1 (bottom) to
/// 5 (top); `offset` is the clef's rhythmic position within the measure in
/// whole-note units, when it is not at the barline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clef {
    pub kind: ClefKind,
    pub line: i32,
    pub octave_shift: Option<i32>,
    pub offset: Option<Rational32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_duration_lengths() {
        let plain = Duration::new(DurationBase::Quarter, 0);
        let dotted = Duration::new(DurationBase::Quarter, 1);
        let double = Duration::new(DurationBase::Quarter, 2);
        assert_eq!(plain.whole_units(), Rational32::new(1, 4));
        assert_eq!(dotted.whole_units(), Rational32::new(3, 8));
        assert_eq!(double.whole_units(), Rational32::new(7, 16));
        assert_ne!(plain, dotted);
    }

    #[test]
    fn base_lengths_halve() {
        assert_eq!(
            DurationBase::Breve.whole_units(),
            DurationBase::Whole.whole_units() * 2
        );
        assert_eq!(
            DurationBase::N2048th.whole_units(),
            Rational32::new(1, 2048)
        );
    }
}
