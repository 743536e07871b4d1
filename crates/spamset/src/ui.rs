use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use once_cell::sync::Lazy;
use spamset_fetch::{FetchPhase, Progress, ProgressCallback};

const PB_STYLE: &str = "{spinner:.blue} {prefix:>12.cyan.bold} [{elapsed_precise}] {wide_bar:.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta}) {wide_msg}";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const PB_CHARS: &str = "█▓▒░  ";

static PB_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| {
    let pb_style = match ProgressStyle::with_template(PB_STYLE) {
        Ok(pb_style) => pb_style.tick_chars(TICK).progress_chars(PB_CHARS),
        Err(_) => return None,
    };

    Some(pb_style)
});

/// Terminal progress bar fed by fetch progress snapshots.
#[derive(Clone)]
pub struct ProgressTracker {
    pb: ProgressBar,
}

impl ProgressTracker {
    pub fn new(prefix: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        let pb = if let Some(style) = PB_TEMPLATE.as_ref() {
            pb.with_style(style.clone())
        } else {
            pb
        };
        pb.set_prefix(prefix.to_string());
        Self { pb }
    }

    /// A tracker that never draws.
    pub fn hidden() -> Self {
        Self {
            pb: ProgressBar::hidden(),
        }
    }

    pub fn update(&self, progress: &Progress) {
        match progress.phase {
            FetchPhase::Connecting => self.pb.set_message("connecting"),
            FetchPhase::Downloading => {
                if let Some(total) = progress.total_bytes
                    && self.pb.length() != Some(total)
                {
                    self.pb.set_length(total);
                }
                self.pb.set_message("");
                self.pb.set_position(progress.bytes_downloaded);
            }
            FetchPhase::Committing => self.pb.set_message("saving"),
            FetchPhase::Completed => self.pb.finish_and_clear(),
        }
    }

    pub fn into_callback(self) -> ProgressCallback {
        Arc::new(move |progress: &Progress| self.update(progress))
    }

    #[cfg(test)]
    fn bar(&self) -> &ProgressBar {
        &self.pb
    }
}
