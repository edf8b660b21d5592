//! Beam hierarchy resolution
//!
//! Flattens a measure's nested beam tree into per-event beam marks. Each
//! beam node spans an ordered run of events at one subdivision level; inner
//! beams describe the next level down, and hooks are partial stubs on a
//! single event at the next level. The events a beam names must already be
//! bound — by the time beams resolve, the measure's voices have all been
//! built, and beams never reach across measures.

use crate::mnx::{Beam, HookDirection};
use crate::score::{BeamMark, BeamMarkKind, NodeId, Score};

use super::errors::{ConvertResult, ReferenceError, StructuralError};
use super::registry::NodeRegistry;

/// Resolve one beam node at `level`, recursing into inner beams at
/// `level + 1`. The outermost call per measure passes level 1.
pub fn resolve_beam(
    score: &mut Score,
    registry: &NodeRegistry,
    beam: &Beam,
    level: u8,
) -> ConvertResult<()> {
    if beam.events.is_empty() {
        return Err(StructuralError::EmptyBeam.into());
    }

    let last = beam.events.len() - 1;
    for (i, event_id) in beam.events.iter().enumerate() {
        let kind = if i == 0 {
            BeamMarkKind::Start
        } else if i == last {
            BeamMarkKind::Stop
        } else {
            BeamMarkKind::Continue
        };
        attach_mark(score, registry, event_id, BeamMark { level, kind })?;
    }

    if beam.inner.is_some() && beam.hooks.is_some() {
        return Err(StructuralError::InvalidBeamNesting.into());
    }

    if let Some(inner) = &beam.inner {
        for nested in inner {
            resolve_beam(score, registry, nested, level + 1)?;
        }
    }

    if let Some(hooks) = &beam.hooks {
        for hook in hooks {
            let kind = match hook.direction {
                HookDirection::Left => BeamMarkKind::PartialLeft,
                HookDirection::Right => BeamMarkKind::PartialRight,
            };
            attach_mark(
                score,
                registry,
                &hook.event,
                BeamMark {
                    level: level + 1,
                    kind,
                },
            )?;
        }
    }

    Ok(())
}

/// Look up a beamed event and append a mark to it.
fn attach_mark(
    score: &mut Score,
    registry: &NodeRegistry,
    event_id: &str,
    mark: BeamMark,
) -> ConvertResult<()> {
    let node = lookup_event(registry, event_id)?;
    let beams = score
        .beams_mut(node)
        .ok_or_else(|| StructuralError::BeamOnRest(event_id.to_string()))?;
    beams.push(mark);
    Ok(())
}

fn lookup_event(registry: &NodeRegistry, event_id: &str) -> Result<NodeId, ReferenceError> {
    // An unknown id here is a dangling beam reference, not a lookup typo:
    // everything beamable in this measure is already bound.
    registry.lookup(event_id).map_err(|_| {
        ReferenceError::UnresolvedReference(format!("beam references event '{event_id}'"))
    })
}
