//! The frame loop: the cancellable repeating tick that the display would
//! otherwise drive. Ticks only while something is on the stage, drains
//! user commands between frames, and paces itself to the configured
//! framerate.

use crate::command::Command;
use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};
use hdrhistogram::Histogram;
use log::{debug, info, warn};
use marquee_config::Config;
use marquee_core::{Stage, StageError, MAX_LABELS};
use marquee_view::{JsonRenderer, Renderer, Sink, StdoutSink};
use rand::Rng;
use spin_sleep::SpinSleeper;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long the loop parks on the command channel while nothing is
/// animating, so the stop flag stays responsive.
const IDLE_POLL: Duration = Duration::from_millis(200);

pub fn run(mut stage: Stage, config: &Config, commands: Receiver<Command>, stop: Arc<AtomicBool>) {
    let frame_duration = Duration::from_secs_f64(1.0 / config.framerate as f64);
    let sleeper = SpinSleeper::default();
    let renderer = JsonRenderer;
    let mut sink = StdoutSink::new();
    let mut rng = rand::thread_rng();

    let mut frame: u64 = 0;
    // Frame times in microseconds.
    let mut frame_times =
        Histogram::<u64>::new(3).expect("3 significant figures is a valid histogram precision");
    // Set to false once stdin closes; the animation keeps running, but an
    // empty stage can then never be refilled.
    let mut commands_open = true;

    info!("running at {} fps", config.framerate);

    'frames: while !stop.load(Ordering::SeqCst) {
        // Empty stage: the tick is torn down. Park until a command arrives.
        if stage.is_empty() {
            if !commands_open {
                break;
            }
            match commands.recv_timeout(IDLE_POLL) {
                Ok(cmd) => {
                    if apply(&mut stage, cmd, &mut rng) {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
            continue;
        }

        let frame_start = Instant::now();

        // Drain input that arrived since the last frame.
        loop {
            match commands.try_recv() {
                Ok(cmd) => {
                    if apply(&mut stage, cmd, &mut rng) {
                        break 'frames;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    commands_open = false;
                    break;
                }
            }
        }

        stage.tick();
        frame += 1;

        match renderer.render(frame, &stage) {
            Ok(data) => {
                if let Err(e) = sink.send(data.as_bytes()) {
                    warn!("dropping frame {frame}: {e}");
                }
            }
            Err(e) => warn!("failed to serialize frame {frame}: {e}"),
        }

        let elapsed = frame_start.elapsed();
        let _ = frame_times.record(elapsed.as_micros() as u64);
        if elapsed < frame_duration {
            sleeper.sleep(frame_duration - elapsed);
        } else {
            debug!("frame {frame} over budget: {elapsed:?} > {frame_duration:?}");
        }
    }

    report(&frame_times, frame);
}

/// Apply one command to the stage. Returns true when the loop should stop.
fn apply(stage: &mut Stage, cmd: Command, rng: &mut impl Rng) -> bool {
    match cmd {
        Command::Add(text) => match stage.spawn(&text, rng) {
            Ok(id) => info!("\"{}\" created as label {id}", text.trim()),
            Err(e @ StageError::LimitReached) => {
                info!("{e}; remove a label before adding a new one")
            }
            Err(e) => warn!("{e}"),
        },
        Command::Remove(id) => match stage.remove(id) {
            Ok(label) => info!("\"{}\" removed", label.text),
            Err(e) => info!("{e}"),
        },
        Command::Pause(id) => {
            if !stage.set_paused(id, true) {
                debug!("pause: no label {id}");
            }
        }
        Command::Resume(id) => {
            if !stage.set_paused(id, false) {
                debug!("resume: no label {id}");
            }
        }
        Command::Speed(value) => {
            stage.set_speed(value);
            info!("speed set to {:.1}x", stage.speed());
        }
        Command::List => {
            for label in stage.labels() {
                info!(
                    "label {}: \"{}\" {} at ({:.1}, {:.1}){}",
                    label.id,
                    label.text,
                    label.color,
                    label.pos.x,
                    label.pos.y,
                    if label.paused { " (paused)" } else { "" }
                );
            }
            info!("{}/{MAX_LABELS} active", stage.len());
        }
        Command::Quit => return true,
    }
    false
}

fn report(frame_times: &Histogram<u64>, frames: u64) {
    if frames == 0 {
        return;
    }
    info!(
        "rendered {frames} frames; frame time p50 {}us p99 {}us max {}us",
        frame_times.value_at_quantile(0.5),
        frame_times.value_at_quantile(0.99),
        frame_times.max(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(5)
    }

    #[test]
    fn add_then_remove_round_trips() {
        let mut stage = Stage::new();
        let mut rng = rng();

        assert!(!apply(&mut stage, Command::Add("hi".to_string()), &mut rng));
        assert_eq!(stage.len(), 1);
        let id = stage.labels()[0].id;

        assert!(!apply(&mut stage, Command::Remove(id), &mut rng));
        assert!(stage.is_empty());

        // Removing again is a logged no-op, not a failure.
        assert!(!apply(&mut stage, Command::Remove(id), &mut rng));
    }

    #[test]
    fn add_at_cap_leaves_stage_unchanged() {
        let mut stage = Stage::new();
        let mut rng = rng();
        for i in 0..MAX_LABELS {
            apply(&mut stage, Command::Add(format!("label {i}")), &mut rng);
        }

        apply(&mut stage, Command::Add("overflow".to_string()), &mut rng);
        assert_eq!(stage.len(), MAX_LABELS);
        assert!(stage.labels().iter().all(|l| l.text != "overflow"));
    }

    #[test]
    fn pause_and_resume_toggle_the_flag() {
        let mut stage = Stage::new();
        let mut rng = rng();
        apply(&mut stage, Command::Add("hoverme".to_string()), &mut rng);
        let id = stage.labels()[0].id;

        apply(&mut stage, Command::Pause(id), &mut rng);
        assert!(stage.get(id).unwrap().paused);
        apply(&mut stage, Command::Resume(id), &mut rng);
        assert!(!stage.get(id).unwrap().paused);
    }

    #[test]
    fn speed_command_clamps() {
        let mut stage = Stage::new();
        apply(&mut stage, Command::Speed(99.0), &mut rng());
        assert_eq!(stage.speed(), 3.0);
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut stage = Stage::new();
        assert!(apply(&mut stage, Command::Quit, &mut rng()));
    }
}
