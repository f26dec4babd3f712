//! Replay-driven gesture controller binary.
//!
//! Reads a JSONL pose recording (or stdin) and runs the full detection
//! pipeline, logging every fired action and a final per-gesture summary.

use anyhow::Result;
use clap::Parser;
use gesture_control::app::{GestureApp, PoseSource};
use gesture_control::config::GestureConfig;
use gesture_control::dispatch::LogDispatcher;
use gesture_control::replay::ReplaySource;
use log::info;
use std::io::BufReader;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSONL pose recording to replay; reads stdin when omitted
    #[arg(short, long)]
    input: Option<String>,

    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Override the jump threshold
    #[arg(long)]
    jump_threshold: Option<f64>,

    /// Override the single-hand slide threshold
    #[arg(long)]
    slide_threshold: Option<f64>,

    /// Override the slide body angle in degrees
    #[arg(long)]
    slide_angle: Option<f64>,

    /// Override the tilt sensitivity
    #[arg(long)]
    tilt: Option<f64>,

    /// Override the cooldown in seconds
    #[arg(long)]
    cooldown: Option<f64>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Body Gesture Controller");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match GestureConfig::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("Failed to load config file: {}. Using defaults.", e);
                GestureConfig::default()
            }
        }
    } else {
        GestureConfig::default()
    };

    // Apply command line overrides
    if let Some(v) = args.jump_threshold {
        config.jump_threshold = v;
    }
    if let Some(v) = args.slide_threshold {
        config.slide_single_hand_threshold = v;
    }
    if let Some(v) = args.slide_angle {
        config.slide_body_angle = v;
    }
    if let Some(v) = args.tilt {
        config.tilt_sensitivity = v;
    }
    if let Some(v) = args.cooldown {
        config.cooldown_time = v;
    }
    config.validate()?;

    // Run the pipeline over the recording
    let source: Box<dyn PoseSource> = match args.input {
        Some(path) => {
            info!("Replaying recording: {}", path);
            Box::new(ReplaySource::open(&path)?)
        }
        None => {
            info!("Reading pose frames from stdin");
            Box::new(ReplaySource::new(BufReader::new(std::io::stdin())))
        }
    };

    let mut app = GestureApp::new(source, LogDispatcher, config);
    let handle = app.handle();
    app.run()?;

    let status = handle.status();
    info!(
        "Processed {} frames ({:.1} fps) - JUMP: {} | SLIDE: {} | LEFT: {} | RIGHT: {}",
        status.frames, status.fps, status.counters.jump, status.counters.slide, status.counters.left, status.counters.right
    );

    Ok(())
}
