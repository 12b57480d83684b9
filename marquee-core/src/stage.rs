use crate::label::{Label, LabelId, Position, Velocity};
use crate::{motion, palette};
use rand::Rng;
use std::ops::{Range, RangeInclusive};
use thiserror::Error;

/// Maximum number of concurrently active labels.
pub const MAX_LABELS: usize = 5;

/// Allowed range for the shared speed multiplier.
pub const SPEED_RANGE: RangeInclusive<f32> = 0.1..=3.0;

/// Speed multiplier a fresh stage starts with.
pub const DEFAULT_SPEED: f32 = 0.4;

// Spawn region. Narrower than the walls so a new label never starts
// touching one.
const SPAWN_X: Range<f32> = 10.0..90.0;
const SPAWN_Y: Range<f32> = 20.0..80.0;

// Initial velocity components are uniform over this range.
const SPAWN_VEL: Range<f32> = -2.0..2.0;

/// Error types for stage operations. All of them are recoverable by
/// rejecting the operation and continuing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StageError {
    /// Creation was attempted while the stage is full.
    #[error("label limit reached ({MAX_LABELS} active)")]
    LimitReached,
    /// The id is not, or no longer, on the stage.
    #[error("no label with id {0}")]
    NotFound(LabelId),
}

/// Owns the active labels, the id counter, and the shared speed scalar.
///
/// Labels are kept in insertion order, oldest first, which is what the
/// defensive cap relies on to drop the oldest entries.
#[derive(Debug)]
pub struct Stage {
    labels: Vec<Label>,
    next_id: u64,
    speed: f32,
}

impl Stage {
    pub fn new() -> Self {
        Self {
            labels: Vec::with_capacity(MAX_LABELS),
            next_id: 0,
            speed: DEFAULT_SPEED,
        }
    }

    /// Create a label for `text` with randomized position, velocity, and
    /// color, and append it to the stage.
    ///
    /// Fails with [`StageError::LimitReached`] when the stage is already
    /// full; nothing is mutated in that case, the id counter included.
    pub fn spawn(&mut self, text: &str, rng: &mut impl Rng) -> Result<LabelId, StageError> {
        if self.labels.len() >= MAX_LABELS {
            return Err(StageError::LimitReached);
        }

        let id = LabelId(self.next_id);
        self.next_id += 1;

        let label = Label {
            id,
            text: text.trim().to_string(),
            pos: Position {
                x: rng.gen_range(SPAWN_X),
                y: rng.gen_range(SPAWN_Y),
            },
            vel: Velocity {
                dx: rng.gen_range(SPAWN_VEL),
                dy: rng.gen_range(SPAWN_VEL),
            },
            color: palette::pick(rng),
            paused: false,
        };
        log::debug!(
            "spawned label {id} at ({:.1}, {:.1})",
            label.pos.x,
            label.pos.y
        );
        self.labels.push(label);
        self.enforce_cap();
        Ok(id)
    }

    /// Defensive invariant: keep only the `MAX_LABELS` most recently
    /// created labels, oldest dropped first. The pre-check in [`spawn`]
    /// means this never fires under sequential use.
    ///
    /// [`spawn`]: Stage::spawn
    fn enforce_cap(&mut self) {
        if self.labels.len() > MAX_LABELS {
            let excess = self.labels.len() - MAX_LABELS;
            for dropped in self.labels.drain(..excess) {
                log::warn!("cap overflow, dropping oldest label {}", dropped.id);
            }
        }
    }

    /// Remove the label with the given id, returning its data so the
    /// caller can surface a removal notice. Removal is immediate; an
    /// absent id is a harmless [`StageError::NotFound`].
    pub fn remove(&mut self, id: LabelId) -> Result<Label, StageError> {
        match self.labels.iter().position(|l| l.id == id) {
            Some(idx) => Ok(self.labels.remove(idx)),
            None => Err(StageError::NotFound(id)),
        }
    }

    /// Advisory hover flag: a paused label is skipped by [`tick`] until
    /// resumed. Returns whether the id was found; an unknown id is a
    /// no-op.
    ///
    /// [`tick`]: Stage::tick
    pub fn set_paused(&mut self, id: LabelId, paused: bool) -> bool {
        match self.labels.iter_mut().find(|l| l.id == id) {
            Some(label) => {
                label.paused = paused;
                true
            }
            None => false,
        }
    }

    /// Set the shared speed multiplier, clamped into [`SPEED_RANGE`].
    /// Takes effect on the next tick.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.clamp(*SPEED_RANGE.start(), *SPEED_RANGE.end());
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Advance all non-paused labels by one tick.
    pub fn tick(&mut self) {
        motion::step(&mut self.labels, self.speed);
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn get(&self, id: LabelId) -> Option<&Label> {
        self.labels.iter().find(|l| l.id == id)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}
