//! `ProgressReporter` for the terminal.
//!
//! Cleanup steps go to stdout alongside the rest of the human output;
//! warnings go to stderr so they survive `> file` redirection. Nothing is
//! printed in quiet or JSON mode.

use owo_colors::{OwoColorize as _, Style};

use crate::application::ports::ProgressReporter;
use crate::output::OutputContext;

pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
}

impl<'a> TerminalReporter<'a> {
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    fn line(&self, mark: &str, style: Style, message: &str) -> Option<String> {
        (!self.ctx.quiet).then(|| format!("  {} {message}", mark.style(style)))
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn step(&self, message: &str) {
        if let Some(line) = self.line("→", self.ctx.styles.info, message) {
            println!("{line}");
        }
    }

    fn success(&self, message: &str) {
        if let Some(line) = self.line("✓", self.ctx.styles.success, message) {
            println!("{line}");
        }
    }

    fn warn(&self, message: &str) {
        if let Some(line) = self.line("⚠", self.ctx.styles.warning, message) {
            eprintln!("{line}");
        }
    }
}
