//! Binary entry point: loads configuration, seeds the stage, wires up the
//! stdin command thread and Ctrl+C handling, then hands control to the
//! frame loop.

mod command;
mod driver;

use clap::Parser;
use log::{error, info, warn};
use marquee_config::load_config;
use marquee_core::Stage;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (JSON, or TOML by extension)
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Override the configured framerate
    #[arg(long)]
    framerate: Option<u32>,

    /// Override the configured speed multiplier
    #[arg(long)]
    speed: Option<f32>,
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let mut config = match load_config(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("failed to load config {}: {e}", args.config.display());
            process::exit(1);
        }
    };

    if let Some(framerate) = args.framerate {
        config.framerate = framerate;
    }
    if let Some(speed) = args.speed {
        config.speed = speed;
    }
    if let Err(e) = marquee_config::validate(&config) {
        error!("{e}");
        process::exit(1);
    }

    let mut stage = Stage::new();
    stage.set_speed(config.speed);

    let mut rng = rand::thread_rng();
    for text in &config.labels {
        match stage.spawn(text, &mut rng) {
            Ok(id) => info!("seeded \"{}\" as label {id}", text.trim()),
            Err(e) => warn!("skipping seed label \"{}\": {e}", text.trim()),
        }
    }

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        if let Err(e) = ctrlc::set_handler(move || stop.store(true, Ordering::SeqCst)) {
            warn!("failed to install Ctrl+C handler: {e}");
        }
    }

    let (tx, rx) = crossbeam_channel::unbounded();
    // Not joined: the reader blocks in stdin and only exits on EOF.
    thread::spawn(move || command::read_commands(tx));

    driver::run(stage, &config, rx, stop);
    info!("shutting down");
}
