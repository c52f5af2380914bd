//! Stage progress display for a single conversion run

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Reports which stage of the conversion is running
///
/// A hidden reporter accepts the same calls and draws nothing, so callers
/// never branch on whether progress is shown.
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a visible reporter for `stage_count` stages
    pub fn new(stage_count: usize) -> Self {
        let bar = ProgressBar::new(stage_count as u64);
        bar.set_style(STAGE_STYLE.clone());
        Self { bar }
    }

    /// Create a reporter that draws nothing
    pub fn hidden(stage_count: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(stage_count as u64);
        Self { bar }
    }

    /// Show the stage now running
    pub fn start_stage(&self, label: &str) {
        self.bar.set_message(label.to_string());
    }

    /// Count the running stage as done
    pub fn complete_stage(&self) {
        self.bar.inc(1);
    }

    /// Stages completed so far
    pub fn completed(&self) -> u64 {
        self.bar.position()
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    /// Whether the bar has been removed
    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }
}

// An early return must not leave a stale bar above the error message
impl Drop for ProgressReporter {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
