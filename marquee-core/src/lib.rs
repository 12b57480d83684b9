//! Motion engine and lifecycle management for floating text labels.
//!
//! A [`Stage`] owns a small bounded set of labels bouncing inside a
//! normalized 0–100 viewport plane. Callers spawn labels with randomized
//! position, velocity, and color, advance them with [`Stage::tick`], and
//! pause or remove individual labels in response to user input.

pub mod label;
pub mod motion;
pub mod palette;
pub mod stage;

pub use label::{Label, LabelId, Position, Velocity};
pub use stage::{Stage, StageError, DEFAULT_SPEED, MAX_LABELS, SPEED_RANGE};
