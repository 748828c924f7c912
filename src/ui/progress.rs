use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Spinners shown while an external tool runs.
pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg} ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        pb.set_message(message.to_string());
        pb
    }

    /// Run `operation` with a spinner, clearing it afterwards so later
    /// messages print on a clean line.
    pub fn with_spinner<F, R>(&self, message: &str, operation: F) -> R
    where
        F: FnOnce() -> R,
    {
        let pb = self.create_spinner(message);
        let start = Instant::now();
        let result = operation();
        pb.finish_and_clear();
        tracing::debug!(step = message, elapsed = %format_duration(start.elapsed()), "step finished");
        result
    }
}

pub(crate) fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}
