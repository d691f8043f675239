//! Spinner shown while a check runs.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Spinner that erases itself when dropped, so early returns leave no line
/// behind.
pub struct Spinner(ProgressBar);

impl Spinner {
    /// Start spinning with `message`.
    #[must_use]
    pub fn start(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        // Fall back to indicatif's stock spinner if the template is rejected.
        if let Ok(style) = ProgressStyle::with_template("  {spinner:.cyan} {msg}") {
            pb.set_style(style.tick_chars("◐◓◑◒ "));
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(TICK_INTERVAL);
        Self(pb)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.0.is_finished()
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.0.finish_and_clear();
    }
}
