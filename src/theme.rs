// Colour palette for the momo-wallet shell
// Dark panels with the operator yellow as the primary accent

use ratatui::style::Color;

use crate::flows::NoticeLevel;

pub struct Theme;

impl Theme {
    // Base colors
    pub const BASE: Color = Color::Rgb(10, 12, 20);
    pub const MANTLE: Color = Color::Rgb(16, 18, 28);
    pub const PANEL_BG: Color = Color::Rgb(20, 23, 36);
    pub const SURFACE: Color = Color::Rgb(30, 34, 50);

    // Text
    pub const TEXT: Color = Color::Rgb(245, 245, 250);
    pub const SUBTEXT: Color = Color::Rgb(170, 175, 195);
    pub const DIM: Color = Color::Rgb(90, 95, 115);

    // Accents
    pub const MOMO_YELLOW: Color = Color::Rgb(255, 204, 0);
    pub const AMBER: Color = Color::Rgb(255, 160, 50);
    pub const GREEN: Color = Color::Rgb(90, 220, 140);
    pub const RED: Color = Color::Rgb(255, 95, 110);
    pub const BLUE: Color = Color::Rgb(90, 160, 255);

    // Borders
    pub const BORDER: Color = Color::Rgb(140, 140, 140);
    pub const BORDER_DIM: Color = Color::Rgb(55, 60, 80);

    /// Border of the focused panel or field
    pub const fn active_border() -> Color {
        Self::MOMO_YELLOW
    }

    pub const fn inactive_border() -> Color {
        Self::BORDER_DIM
    }

    /// Panel titles and table headers
    pub const fn header() -> Color {
        Self::MOMO_YELLOW
    }

    pub const fn success() -> Color {
        Self::GREEN
    }

    pub const fn error() -> Color {
        Self::RED
    }

    pub const fn warning() -> Color {
        Self::AMBER
    }

    pub const fn info() -> Color {
        Self::BLUE
    }

    /// Highlighted row or focused input
    pub const fn selection() -> Color {
        Self::MOMO_YELLOW
    }

    pub const fn notice(level: NoticeLevel) -> Color {
        match level {
            NoticeLevel::Info => Self::info(),
            NoticeLevel::Success => Self::success(),
            NoticeLevel::Error => Self::error(),
        }
    }
}
