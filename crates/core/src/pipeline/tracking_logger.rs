use std::collections::{BTreeMap, HashMap};
use std::time::Instant;

/// Cross-cutting sink for tracking-loop events.
///
/// Lets the frame loop report progress, per-cycle timing and outcome counts
/// without knowing whether anyone is listening.
pub trait TrackingLogger: Send {
    /// Report frame-level progress.
    fn progress(&mut self, current: usize, total: usize);

    /// Record how long a named stage took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Count one occurrence of a named event (e.g. an outcome kind).
    fn count(&mut self, name: &str);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Logger that discards everything.
pub struct NullTrackingLogger;

impl TrackingLogger for NullTrackingLogger {
    fn progress(&mut self, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn count(&mut self, _name: &str) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI-oriented logger: throttled progress through `log`, plus a summary
/// of per-stage timings and event counts.
pub struct StdoutTrackingLogger {
    throttle_frames: usize,
    timings: HashMap<String, Vec<f64>>,
    counts: BTreeMap<String, usize>,
    start_time: Instant,
    total_frames: usize,
}

impl StdoutTrackingLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
            timings: HashMap::new(),
            counts: BTreeMap::new(),
            start_time: Instant::now(),
            total_frames: 0,
        }
    }

    /// Returns the formatted summary string, or `None` if no data recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() && self.counts.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let frames = self.total_frames;
        let mut lines = Vec::new();

        lines.push(format!(
            "Tracking summary ({frames} frames, {:.1}s total):",
            elapsed_ms / 1000.0
        ));

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = if durations.is_empty() {
                0.0
            } else {
                total_ms / durations.len() as f64
            };
            lines.push(format!(
                "  {stage:12}: avg {avg_ms:6.2}ms  total {total_ms:7.1}ms"
            ));
        }

        for (name, n) in &self.counts {
            let pct = if frames > 0 {
                *n as f64 / frames as f64 * 100.0
            } else {
                0.0
            };
            lines.push(format!("  {name}: {n} ({pct:.1}%)"));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }

    pub fn count_for(&self, name: &str) -> usize {
        self.counts.get(name).copied().unwrap_or(0)
    }
}

impl Default for StdoutTrackingLogger {
    fn default() -> Self {
        Self::new(30)
    }
}

impl TrackingLogger for StdoutTrackingLogger {
    fn progress(&mut self, current: usize, total: usize) {
        self.total_frames = total;
        if total > 0 && (current % self.throttle_frames == 0 || current == total) {
            let pct = current as f64 / total as f64 * 100.0;
            log::info!("Tracking: {current}/{total} frames ({pct:.1}%)");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn count(&mut self, name: &str) {
        *self.counts.entry(name.to_string()).or_default() += 1;
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
