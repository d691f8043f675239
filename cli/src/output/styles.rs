//! Terminal stylesheet. Every style is plain unless colors are enabled.

use mcpdoc_common::HealthState;
use owo_colors::Style;

/// Styles keyed by what the text means, not by its color.
#[derive(Default, Clone)]
pub struct Styles {
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub info: Style,
    pub dim: Style,
    pub bold: Style,
    /// Section titles.
    pub header: Style,
    /// `(advanced)` tag on servers that need extra setup.
    pub advanced: Style,
}

impl Styles {
    /// Stylesheet with ANSI colors.
    #[must_use]
    pub fn colored() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red(),
            info: Style::new().blue(),
            dim: Style::new().dimmed(),
            bold: Style::new().bold(),
            header: Style::new().bold().cyan(),
            advanced: Style::new().magenta(),
        }
    }

    /// Marker glyph and style for a health state.
    #[must_use]
    pub fn state(&self, state: HealthState) -> (&'static str, Style) {
        match state {
            HealthState::Ready => ("✓", self.success),
            HealthState::NeedsConfiguration => ("⚠", self.warning),
            HealthState::Missing => ("✗", self.error),
            HealthState::Unknown => ("?", self.dim),
        }
    }
}
