use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use serde::Serialize;

use facetrack_core::detection::domain::detection_outcome::DetectionOutcome;
use facetrack_core::detection::infrastructure::recording::Recording;
use facetrack_core::pipeline::replay_session_use_case::{FrameReport, ReplaySessionUseCase};
use facetrack_core::pipeline::tracking_logger::StdoutTrackingLogger;
use facetrack_core::shared::tracker_config::TrackerConfig;

/// Replays a recorded face-tracking session through the orchestrator.
#[derive(Parser)]
#[command(name = "facetrack")]
struct Cli {
    /// Recording of provider responses (JSON).
    recording: PathBuf,

    /// Config file (defaults to the per-user config, if any).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum age in ms of the previous decision for tracking to be used.
    #[arg(long)]
    detection_interval_ms: Option<u64>,

    /// Minimum tracking confidence (0.0-1.0) before falling back to detection.
    #[arg(long)]
    confidence_threshold: Option<f64>,

    /// Print one JSON object per frame instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct FrameLine<'a> {
    frame: usize,
    timestamp_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<&'a DetectionOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    if !cli.recording.exists() {
        return Err(format!("Recording not found: {}", cli.recording.display()).into());
    }

    let config = build_config(&cli)?;
    log::info!(
        "Detection interval {}ms, confidence threshold {:.2}",
        config.detection_interval_ms,
        config.tracking_confidence_threshold
    );

    let recording = Arc::new(Recording::load(&cli.recording)?);
    let mut use_case = ReplaySessionUseCase::new(
        recording,
        config,
        Box::new(StdoutTrackingLogger::default()),
    );
    let reports = use_case.execute()?;

    for report in &reports {
        if cli.json {
            println!("{}", serde_json::to_string(&frame_line(report))?);
        } else {
            println!("{}", describe(report));
        }
    }
    Ok(())
}

fn build_config(cli: &Cli) -> Result<TrackerConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => TrackerConfig::load_from(path)?,
        None => TrackerConfig::load()?,
    };
    if let Some(ms) = cli.detection_interval_ms {
        config.detection_interval_ms = ms;
    }
    if let Some(threshold) = cli.confidence_threshold {
        config.tracking_confidence_threshold = threshold;
    }
    config.validate()?;
    Ok(config)
}

fn frame_line(report: &FrameReport) -> FrameLine<'_> {
    let (outcome, error) = match &report.result {
        Ok(outcome) => (Some(outcome), None),
        Err(failure) => (None, Some(failure.to_string())),
    };
    FrameLine {
        frame: report.index,
        timestamp_ms: report.timestamp.as_millis(),
        outcome,
        error,
    }
}

fn describe(report: &FrameReport) -> String {
    let head = format!(
        "frame {:>5} @ {:>7}ms",
        report.index,
        report.timestamp.as_millis()
    );
    match &report.result {
        Ok(DetectionOutcome::NotFound) => format!("{head}  not found"),
        Ok(outcome) => match outcome.region() {
            Some(r) => format!(
                "{head}  {:<9} region ({:.3}, {:.3}, {:.3}x{:.3})  {} landmarks",
                outcome.label(),
                r.x,
                r.y,
                r.width,
                r.height,
                outcome.landmarks().len()
            ),
            None => format!("{head}  {}", outcome.label()),
        },
        Err(failure) => format!("{head}  {failure}"),
    }
}
