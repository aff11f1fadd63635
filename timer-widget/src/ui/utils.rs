use ratatui::style::Color;
use std::str::FromStr;

use crate::catalog::DEFAULT_PROJECT_COLOR;

pub const IDLE_COLOR: Color = Color::Rgb(0x5f, 0x5f, 0x5f);

/// Parse a `#rrggbb` project color, falling back to the default project color.
pub fn project_color(hex: &str) -> Color {
    Color::from_str(hex.trim())
        .or_else(|_| Color::from_str(DEFAULT_PROJECT_COLOR))
        .unwrap_or(Color::Blue)
}
