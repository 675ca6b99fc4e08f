//! Progress spinner and logging utilities.
//!
//! Entries are streamed, so the total is unknown up front and progress is a
//! spinner with a running count. In log-only mode the spinner is hidden and
//! periodic plain lines go to stderr instead.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Hides the spinner in favour of plain stderr lines (`--log-only`, `--debug`).
pub static LOG_ONLY: AtomicBool = AtomicBool::new(false);

pub fn set_log_only(enabled: bool) {
    LOG_ONLY.store(enabled, Ordering::Relaxed);
}

pub fn is_log_only() -> bool {
    LOG_ONLY.load(Ordering::Relaxed)
}

/// Elapsed conversion time for the summary line, e.g. `0.4s` or `2.5m`.
pub fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.1}m", secs / 60.0)
    }
}

/// Create a spinner counting processed entries.
/// In log-only mode, the spinner is hidden.
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if is_log_only() {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    } else {
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{msg} {spinner} {pos} entries [{elapsed_precise}]")
                .unwrap(),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
    }
    pb.set_message(msg.to_string());
    pb
}

/// Log progress periodically for tail-friendly output.
/// Only logs when in log-only mode and every `interval` entries.
pub fn log_progress(phase: &str, current: u64, interval: u64) {
    if is_log_only() && interval > 0 && current % interval == 0 {
        eprintln!("[{}] {} entries", phase, current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1.5m");
    }

    #[test]
    fn test_log_only_spinner_is_hidden() {
        set_log_only(true);
        let pb = create_spinner("Converting");
        assert!(pb.is_hidden());
        assert_eq!(pb.message(), "Converting");
        pb.finish_and_clear();
    }
}
