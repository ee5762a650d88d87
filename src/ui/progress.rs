use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Terminal progress bar fed by the extraction engine's percent and
/// status callbacks.
pub struct PipelineProgress {
    bar: ProgressBar,
}

impl PipelineProgress {
    pub fn new(enabled: bool) -> Self {
        if !enabled {
            return Self {
                bar: ProgressBar::hidden(),
            };
        }

        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}% {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );
        bar.set_message("Ready");
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar }
    }

    /// Handle for the engine callbacks; `ProgressBar` is a cheap clone
    /// sharing the same underlying state.
    pub fn bar(&self) -> ProgressBar {
        self.bar.clone()
    }

    pub fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }

    pub fn abandon(&self) {
        self.bar.abandon();
    }
}

impl Default for PipelineProgress {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_bar_when_disabled() {
        let progress = PipelineProgress::new(false);
        assert!(progress.bar().is_hidden());
    }

    #[test]
    fn test_bar_tracks_positions() {
        let progress = PipelineProgress::new(false);
        let bar = progress.bar();

        for percent in [10u64, 40, 60, 80, 100] {
            bar.set_position(percent);
        }
        assert_eq!(progress.bar().position(), 100);
    }
}
