//! Colors used by the dashboard.

use lstop_core::TrendLevel;
use ratatui::style::{Color, Modifier, Style};

/// Color palette for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Title line and table headers
    pub header: Color,
    /// Table borders and section titles
    pub border: Color,
    /// Footer and dim hints
    pub text_dim: Color,
    /// Delta above the trend threshold
    pub trend_positive: Color,
    /// Delta below the negative trend threshold
    pub trend_negative: Color,
    /// Fetch warning line and the paused marker
    pub warning: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            header: Color::Cyan,
            border: Color::DarkGray,
            text_dim: Color::Gray,
            trend_positive: Color::Green,
            trend_negative: Color::Red,
            warning: Color::Yellow,
        }
    }
}

impl Palette {
    pub fn header(&self) -> Style {
        Style::default().fg(self.header).add_modifier(Modifier::BOLD)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn dim(&self) -> Style {
        Style::default().fg(self.text_dim)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning).add_modifier(Modifier::BOLD)
    }

    /// Highlight for the selected overview row.
    pub fn selected_row(&self) -> Style {
        Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    /// Style of a delta cell; neutral deltas keep the default style.
    pub fn trend(&self, level: TrendLevel) -> Style {
        match level {
            TrendLevel::Positive => Style::default().fg(self.trend_positive),
            TrendLevel::Negative => Style::default().fg(self.trend_negative),
            TrendLevel::Neutral => Style::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_styles() {
        let palette = Palette::default();
        assert_eq!(palette.trend(TrendLevel::Positive).fg, Some(Color::Green));
        assert_eq!(palette.trend(TrendLevel::Negative).fg, Some(Color::Red));
        assert_eq!(palette.trend(TrendLevel::Neutral), Style::default());
    }
}
