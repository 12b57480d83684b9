use serde::Serialize;
use std::fmt;

/// Maximum length of a label's text, in characters.
pub const MAX_TEXT_LEN: usize = 50;

/// Unique identifier for a label.
///
/// Allocated from a monotonic counter; an id is never reused within a
/// stage, even after the label it named is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LabelId(pub u64);

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position in the normalized 0–100 viewport plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// Velocity in plane units per tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Velocity {
    pub dx: f32,
    pub dy: f32,
}

/// One active animated text label.
///
/// `text` and `color` are fixed at creation. `pos` is mutated every tick,
/// `vel` only flips sign on wall reflection. `paused` is written by the
/// input path exclusively; the tick reads it and never touches it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Label {
    pub id: LabelId,
    pub text: String,
    pub pos: Position,
    pub vel: Velocity,
    pub color: &'static str,
    pub paused: bool,
}
