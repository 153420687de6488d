//! Progress display for sync runs

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

/// Per-entry progress for the materialize loop
pub struct SyncProgress {
    entry_pb: ProgressBar,
}

impl SyncProgress {
    /// Create a new progress display with the total entry count
    pub fn new(total_entries: u64) -> Self {
        let style = ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");

        let entry_pb = ProgressBar::new(total_entries);
        entry_pb.set_style(style);

        Self { entry_pb }
    }

    /// Show the entry currently being processed
    pub fn start_entry(&self, id: u64, title: &str) {
        self.entry_pb.set_message(format!("{} {}", id, title));
    }

    /// Print a completed entry line above the bar and advance it
    pub fn entry_done(&self, id: u64, title: &str, action: &str) {
        let line = format!(
            "  {} {} {}",
            Style::new().dim().apply_to(id),
            Style::new().bold().apply_to(title),
            Style::new().green().apply_to(action)
        );
        self.entry_pb.println(line);
        self.entry_pb.inc(1);
    }

    /// Print a failed entry line above the bar and advance it
    pub fn entry_failed(&self, id: u64, title: &str, reason: &str) {
        let line = format!(
            "  {} {} {}: {}",
            Style::new().dim().apply_to(id),
            Style::new().bold().apply_to(title),
            Style::new().red().apply_to("failed"),
            reason
        );
        self.entry_pb.println(line);
        self.entry_pb.inc(1);
    }

    /// Finish and clear the bar
    pub fn finish(&self) {
        self.entry_pb.finish_and_clear();
    }
}
