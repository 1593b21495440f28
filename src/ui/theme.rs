//! Color theme for the terminal UI.

use crossterm::style::Color;

use crate::data::TempBand;

/// Color theme for the application.
///
/// The defaults use 256-color ANSI values for a warm dashboard look;
/// everything routes through this struct so a future `--theme` flag
/// only has to build a different instance.
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,
    pub border: Color,
    pub text: Color,
    pub dim: Color,
    pub hot: Color,
    pub cold: Color,
    pub mild: Color,
    pub warn: Color,
    pub highlight: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            accent: Color::AnsiValue(208),    // orange
            border: Color::AnsiValue(245),    // gray
            text: Color::AnsiValue(255),      // near-white
            dim: Color::AnsiValue(240),       // dark gray
            hot: Color::AnsiValue(204),       // red
            cold: Color::AnsiValue(81),       // cyan
            mild: Color::AnsiValue(114),      // green
            warn: Color::AnsiValue(204),      // red, shared with hot
            highlight: Color::AnsiValue(221), // yellow
        }
    }
}

impl Theme {
    /// Color for a temperature band.
    pub fn band_color(&self, band: TempBand) -> Color {
        match band {
            TempBand::Hot => self.hot,
            TempBand::Cold => self.cold,
            TempBand::Mild => self.mild,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_colors_are_distinct() {
        let theme = Theme::default();
        let hot = theme.band_color(TempBand::Hot);
        let cold = theme.band_color(TempBand::Cold);
        let mild = theme.band_color(TempBand::Mild);
        assert_ne!(hot, cold);
        assert_ne!(cold, mild);
        assert_ne!(hot, mild);
    }
}
