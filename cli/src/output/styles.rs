//! Colour palette for terminal output.

use owo_colors::Style;

/// Styles applied to message markers. Plain text until [`Styles::colorize`].
#[derive(Default, Clone, Copy)]
pub struct Styles {
    /// In-flight step marker (cyan)
    pub step: Style,
    /// Success marker (green)
    pub success: Style,
    /// Warning marker (yellow)
    pub warning: Style,
    /// Secondary text such as summary keys
    pub dim: Style,
}

impl Styles {
    /// Switch every style to its coloured variant.
    pub fn colorize(&mut self) {
        self.step = Style::new().cyan();
        self.success = Style::new().green();
        self.warning = Style::new().yellow();
        self.dim = Style::new().dimmed();
    }
}
