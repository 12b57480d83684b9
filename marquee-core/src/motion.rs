//! Per-tick position updates and wall reflection for active labels.

use crate::label::Label;

/// Lower wall coordinate in the viewport plane.
pub const MIN_COORD: f32 = 5.0;
/// Upper wall coordinate in the viewport plane.
pub const MAX_COORD: f32 = 95.0;
/// Fixed damping applied to every per-tick displacement.
pub const DAMPING: f32 = 0.3;

/// Advance all non-paused labels by one tick.
///
/// `speed` is the shared multiplier applied uniformly to every label's
/// displacement. Paused labels are left completely untouched, position and
/// velocity both.
pub fn step(labels: &mut [Label], speed: f32) {
    for label in labels.iter_mut().filter(|l| !l.paused) {
        integrate(label, speed);
    }
}

fn integrate(label: &mut Label, speed: f32) {
    label.pos.x += label.vel.dx * speed * DAMPING;
    label.pos.y += label.vel.dy * speed * DAMPING;

    // Bounce off walls. The axes are independent, so a corner hit flips
    // both in the same tick. Velocity flips at most once per axis; the
    // clamp re-applies even if the coordinate was already out of bounds.
    if label.pos.x <= MIN_COORD || label.pos.x >= MAX_COORD {
        label.vel.dx = -label.vel.dx;
        label.pos.x = label.pos.x.clamp(MIN_COORD, MAX_COORD);
    }
    if label.pos.y <= MIN_COORD || label.pos.y >= MAX_COORD {
        label.vel.dy = -label.vel.dy;
        label.pos.y = label.pos.y.clamp(MIN_COORD, MAX_COORD);
    }
}
