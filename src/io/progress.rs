//! Collection-level progress reporting for render dispatch

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static RENDER_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Items: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress display for one render dispatch
///
/// Tracks completed jobs against the total; completion order does not matter.
pub struct RenderProgress {
    bar: ProgressBar,
}

impl RenderProgress {
    /// Create a progress bar covering `total` jobs
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(RENDER_STYLE.clone());
        Self { bar }
    }

    /// Record one completed job, successful or not
    pub fn job_completed(&self) {
        self.bar.inc(1);
    }

    /// Close the display once all jobs have been attempted
    pub fn finish(&self) {
        self.bar.finish();
    }
}
