//! Progress tracking for export runs
//!
//! Shows a bar over the collections being exported. Status lines printed while
//! the bar is visible go through [`ProgressTracker::suspend`] so they do not
//! tear the bar.

use indicatif::{ProgressBar, ProgressStyle};

/// Progress tracker over a known number of collections
pub struct ProgressTracker {
    /// Progress bar (optional, can be disabled)
    bar: Option<ProgressBar>,
}

impl ProgressTracker {
    /// Create a new progress tracker
    ///
    /// # Arguments
    /// * `total` - Number of collections to export
    /// * `enable_bar` - Whether to display a progress bar
    pub fn new(total: u64, enable_bar: bool) -> Self {
        let bar = enable_bar.then(|| {
            let bar = ProgressBar::new(total);
            if let Ok(style) =
                ProgressStyle::default_bar().template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            {
                bar.set_style(style.progress_chars("#>-"));
            }
            bar
        });

        Self { bar }
    }

    /// Mark the start of work on a collection
    pub fn start(&self, collection: &str) {
        if let Some(ref bar) = self.bar {
            bar.set_message(collection.to_string());
        }
    }

    /// Mark one collection as done
    pub fn advance(&self) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
        }
    }

    /// Run `f` with the bar hidden
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        match self.bar {
            Some(ref bar) => bar.suspend(f),
            None => f(),
        }
    }

    /// Finish and clear the progress bar
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_tracker_runs_suspended_closure() {
        let tracker = ProgressTracker::new(3, false);
        tracker.start("users");
        tracker.advance();
        assert_eq!(tracker.suspend(|| 7), 7);
        tracker.finish();
    }

    #[test]
    fn test_enabled_tracker_counts() {
        let tracker = ProgressTracker::new(2, true);
        tracker.advance();
        tracker.advance();
        tracker.finish();
    }
}
