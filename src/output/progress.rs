//! Conversion progress: an optional terminal bar plus periodic log lines.

use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::info;

/// Tracks a batch of files.
///
/// The bar is drawn only when enabled; the `[i/total]` log line is emitted
/// every `interval` files and after the last one regardless.
#[derive(Debug)]
pub struct BatchProgress {
    bar: Option<ProgressBar>,
    total: usize,
    interval: usize,
}

impl BatchProgress {
    /// Start tracking `total` files.
    pub fn new(total: usize, interval: usize, show_bar: bool) -> Self {
        Self {
            bar: file_bar(total, show_bar),
            total,
            interval: interval.max(1),
        }
    }

    /// Show the file currently being processed.
    pub fn set_current(&self, relative: &Path) {
        if let Some(bar) = &self.bar {
            bar.set_message(relative.display().to_string());
        }
    }

    /// Record that `done` files have been handled.
    pub fn tick(&self, done: usize, converted: usize, unchanged: usize) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
        if self.should_log(done) {
            let total = self.total;
            info!("[{done}/{total}] done (converted: {converted}, unchanged: {unchanged})");
        }
    }

    /// Whether a log line is due after `done` files.
    pub fn should_log(&self, done: usize) -> bool {
        done > 0 && (done % self.interval == 0 || done == self.total)
    }

    /// Clear the bar, leaving `message` in its place.
    pub fn finish(self, message: &str) {
        if let Some(bar) = self.bar {
            bar.finish_with_message(message.to_string());
        }
    }
}

fn file_bar(total: usize, enabled: bool) -> Option<ProgressBar> {
    if !enabled || total == 0 {
        return None;
    }

    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.green/white} {pos}/{len} [{elapsed_precise}<{eta}] {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    Some(bar)
}
