use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::time::Instant;

/// Observer for live-session events.
///
/// Keeps the loop free of output concerns: the CLI prints a summary, tests
/// use the null logger.
pub trait SessionLogger {
    /// Called once per processed frame.
    fn frame(&mut self, index: usize);

    /// How long a named stage (`capture`, `detect`, `render`, `encode`)
    /// took for one frame.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// A per-frame measurement such as the number of faces.
    fn metric(&mut self, name: &str, value: f64);

    /// A file was written; `kind` is `recording` or `screenshot`.
    fn saved(&mut self, kind: &str, path: &Path);

    fn info(&mut self, message: &str);

    /// End-of-session report. Default: no-op.
    fn summary(&self) {}
}

/// Discards everything.
pub struct NullSessionLogger;

impl SessionLogger for NullSessionLogger {
    fn frame(&mut self, _index: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn saved(&mut self, _kind: &str, _path: &Path) {}
    fn info(&mut self, _message: &str) {}
}

/// Aggregates stage timings and metrics and logs a summary through `log`.
pub struct StdoutSessionLogger {
    timings: HashMap<String, Vec<f64>>,
    metrics: HashMap<String, Vec<f64>>,
    saved: BTreeMap<String, usize>,
    start_time: Instant,
    frames: usize,
}

impl StdoutSessionLogger {
    pub fn new() -> Self {
        Self {
            timings: HashMap::new(),
            metrics: HashMap::new(),
            saved: BTreeMap::new(),
            start_time: Instant::now(),
            frames: 0,
        }
    }

    /// Formatted report, or `None` before the first frame.
    pub fn summary_string(&self) -> Option<String> {
        if self.frames == 0 && self.timings.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Session summary ({} frames, {:.1}s):",
            self.frames,
            elapsed_ms / 1000.0
        )];

        let mut stages: Vec<_> = self.timings.iter().collect();
        stages.sort_by(|a, b| a.0.cmp(b.0));
        for (stage, durations) in stages {
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = mean(durations);
            let pct = if elapsed_ms > 0.0 {
                total_ms / elapsed_ms * 100.0
            } else {
                0.0
            };
            lines.push(format!(
                "  {stage:8}: avg {avg_ms:6.1}ms  total {total_ms:7.0}ms  ({pct:4.1}%)"
            ));
        }

        let mut names: Vec<_> = self.metrics.keys().collect();
        names.sort();
        for name in names {
            lines.push(format!("  {name}: avg {:.1}", mean(&self.metrics[name])));
        }

        for (kind, count) in &self.saved {
            lines.push(format!("  {kind}s saved: {count}"));
        }

        if self.frames > 0 && elapsed_ms > 0.0 {
            let fps = self.frames as f64 / (elapsed_ms / 1000.0);
            lines.push(format!("  Throughput: {fps:.1} fps"));
        }

        Some(lines.join("\n"))
    }
}

impl Default for StdoutSessionLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionLogger for StdoutSessionLogger {
    fn frame(&mut self, index: usize) {
        self.frames = self.frames.max(index + 1);
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics
            .entry(name.to_string())
            .or_default()
            .push(value);
    }

    fn saved(&mut self, kind: &str, path: &Path) {
        *self.saved.entry(kind.to_string()).or_default() += 1;
        log::info!("Saved {kind} {}", path.display());
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

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
