//! Note-value and fraction mapping
//!
//! Pure functions from the source format's duration/fraction primitives to
//! the score graph's representations. The source permits one subdivision
//! finer (`4096th`) than the graph expresses; mapping it is an explicit,
//! typed failure, never a silent truncation.

use num_rational::Rational32;

use crate::mnx::{NoteValue, NoteValueBase};
use crate::score::{Duration, DurationBase};

use super::errors::{StructuralError, UnsupportedError};

/// Map a symbolic note value to a score duration. Dots default to zero.
pub fn to_duration(value: &NoteValue) -> Result<Duration, UnsupportedError> {
    let base = match value.base {
        NoteValueBase::DuplexMaxima => DurationBase::DuplexMaxima,
        NoteValueBase::Maxima => DurationBase::Maxima,
        NoteValueBase::Longa => DurationBase::Longa,
        NoteValueBase::Breve => DurationBase::Breve,
        NoteValueBase::Whole => DurationBase::Whole,
        NoteValueBase::Half => DurationBase::Half,
        NoteValueBase::Quarter => DurationBase::Quarter,
        NoteValueBase::Eighth => DurationBase::Eighth,
        NoteValueBase::N16th => DurationBase::N16th,
        NoteValueBase::N32nd => DurationBase::N32nd,
        NoteValueBase::N64th => DurationBase::N64th,
        NoteValueBase::N128th => DurationBase::N128th,
        NoteValueBase::N256th => DurationBase::N256th,
        NoteValueBase::N512th => DurationBase::N512th,
        NoteValueBase::N1024th => DurationBase::N1024th,
        NoteValueBase::N2048th => DurationBase::N2048th,
        NoteValueBase::N4096th => {
            return Err(UnsupportedError::Duration("4096th".to_string()));
        }
    };

    let dots = value.dots.unwrap_or(0).min(u8::MAX as u32) as u8;
    Ok(Duration::new(base, dots))
}

/// Interpret a numerator/denominator pair as a rational offset.
///
/// The format never pins down the shape of a fraction beyond "a list of
/// integers"; exactly two elements with a nonzero denominator is the only
/// reading that makes sense, so anything else is rejected.
pub fn to_fraction(fraction: &[u32]) -> Result<Rational32, StructuralError> {
    if fraction.len() != 2 {
        return Err(StructuralError::InvalidFraction(format!(
            "expected two elements, got {}",
            fraction.len()
        )));
    }

    let numer = i32::try_from(fraction[0]).map_err(|_| {
        StructuralError::InvalidFraction(format!("numerator {} out of range", fraction[0]))
    })?;
    let denom = i32::try_from(fraction[1]).map_err(|_| {
        StructuralError::InvalidFraction(format!("denominator {} out of range", fraction[1]))
    })?;

    if denom == 0 {
        return Err(StructuralError::InvalidFraction(
            "zero denominator".to_string(),
        ));
    }

    Ok(Rational32::new(numer, denom))
}
