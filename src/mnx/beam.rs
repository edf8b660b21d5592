//! The recursive beam-grouping tree.

use serde::Deserialize;

/// One beam node: the events it spans, plus either nested inner beams (the
/// next subdivision level) or partial-beam hooks — never both.
///
/// The XOR of `inner` and `hooks` is a format invariant enforced at
/// resolution time, not at deserialization: a document violating it still
/// parses, and the converter rejects it with a structural error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Beam {
    pub events: Vec<String>,
    pub inner: Option<Vec<Beam>>,
    pub hooks: Option<Vec<BeamHook>>,
}

/// A partial-beam stub on a single event that does not connect to a
/// neighbor, pointing left or right.
#[derive(Debug, Clone, Deserialize)]
pub struct BeamHook {
    pub event: String,
    pub direction: HookDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookDirection {
    Left,
    Right,
}
