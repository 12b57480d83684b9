//! The render seam: serializes per-frame label state and writes it to an
//! output sink. This is the external collaborator that turns stage state
//! into something a display can draw; the core never knows about it.

use marquee_core::Stage;
use serde::Serialize;
use std::io::{self, Write};
use thiserror::Error;

/// Error types that can occur while rendering a frame.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

// One label as it appears in the frame stream.
#[derive(Serialize, Debug)]
struct LabelState<'a> {
    id: u64,
    text: &'a str,
    x: f32,
    y: f32,
    color: &'a str,
    paused: bool,
}

// Snapshot of the stage for a single rendered frame.
#[derive(Serialize, Debug)]
struct FrameSnapshot<'a> {
    frame: u64,
    speed: f32,
    labels: Vec<LabelState<'a>>,
}

/// Serializes stage state into a frame representation.
pub trait Renderer {
    fn render(&self, frame: u64, stage: &Stage) -> Result<String, ViewError>;
}

/// Writes rendered frames to a destination.
pub trait Sink {
    fn send(&mut self, data: &[u8]) -> Result<(), ViewError>;
}

/// Renders each frame as a single JSON line.
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, frame: u64, stage: &Stage) -> Result<String, ViewError> {
        let snapshot = FrameSnapshot {
            frame,
            speed: stage.speed(),
            labels: stage
                .labels()
                .iter()
                .map(|label| LabelState {
                    id: label.id.0,
                    text: &label.text,
                    x: label.pos.x,
                    y: label.pos.y,
                    color: label.color,
                    paused: label.paused,
                })
                .collect(),
        };
        Ok(serde_json::to_string(&snapshot)?)
    }
}

/// Writes each frame as a line on standard output.
pub struct StdoutSink {
    out: io::Stdout,
}

impl StdoutSink {
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }
}

impl Default for StdoutSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for StdoutSink {
    fn send(&mut self, data: &[u8]) -> Result<(), ViewError> {
        let mut lock = self.out.lock();
        lock.write_all(data)?;
        lock.write_all(b"\n")?;
        lock.flush()?;
        Ok(())
    }
}

/// Discards every frame. Useful in tests and benchmarks.
pub struct NullSink;

impl Sink for NullSink {
    fn send(&mut self, _data: &[u8]) -> Result<(), ViewError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn renders_stage_as_json_line() {
        let mut stage = Stage::new();
        let mut rng = StdRng::seed_from_u64(3);
        let id = stage.spawn("hello", &mut rng).unwrap();
        stage.set_paused(id, true);
        stage.set_speed(2.0);

        let line = JsonRenderer.render(7, &stage).unwrap();
        assert!(!line.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["frame"], 7);
        assert_eq!(value["speed"], 2.0);
        let labels = value["labels"].as_array().unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0]["id"], id.0);
        assert_eq!(labels[0]["text"], "hello");
        assert_eq!(labels[0]["paused"], true);
        assert!(labels[0]["color"].as_str().unwrap().starts_with('#'));
        assert!(labels[0]["x"].is_number());
        assert!(labels[0]["y"].is_number());
    }

    #[test]
    fn empty_stage_renders_empty_label_list() {
        let stage = Stage::new();
        let value: serde_json::Value =
            serde_json::from_str(&JsonRenderer.render(0, &stage).unwrap()).unwrap();
        assert_eq!(value["labels"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn null_sink_accepts_anything() {
        assert!(NullSink.send(b"whatever").is_ok());
    }
}
