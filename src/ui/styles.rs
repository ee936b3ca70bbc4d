use crossterm::style::Color;

use crate::app::presenter::Trend;

/// Accent color used for prompts, headers, and the selected row marker.
pub const ACCENT: Color = Color::AnsiValue(208);

pub const ALERT: Color = Color::Red;

/// Color for a price change; `None` keeps the terminal default.
pub fn trend_color(trend: Trend) -> Option<Color> {
    match trend {
        Trend::Positive => Some(Color::Green),
        Trend::Negative => Some(Color::Red),
        Trend::Neutral => None,
    }
}
