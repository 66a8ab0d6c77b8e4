//! Color palettes and status coloring.

use crate::query::CharacterStatus;
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub bg: Color,
    pub bg_highlight: Color,
    pub primary: Color,
    pub secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub text: Color,
    pub text_dim: Color,
    pub border: Color,
    pub border_focus: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb(16, 16, 20),
            bg_highlight: Color::Rgb(40, 44, 52),
            primary: Color::Rgb(0, 255, 200),
            secondary: Color::Rgb(180, 120, 255),
            success: Color::Rgb(80, 220, 100),
            warning: Color::Rgb(240, 200, 60),
            error: Color::Rgb(240, 80, 80),
            text: Color::Rgb(230, 230, 230),
            text_dim: Color::Rgb(130, 130, 140),
            border: Color::Rgb(70, 70, 80),
            border_focus: Color::Rgb(0, 255, 200),
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::Rgb(245, 245, 245),
            bg_highlight: Color::Rgb(215, 225, 235),
            primary: Color::Rgb(0, 120, 110),
            secondary: Color::Rgb(110, 60, 180),
            success: Color::Rgb(30, 140, 60),
            warning: Color::Rgb(170, 130, 20),
            error: Color::Rgb(190, 40, 40),
            text: Color::Rgb(30, 30, 30),
            text_dim: Color::Rgb(110, 110, 120),
            border: Color::Rgb(170, 170, 180),
            border_focus: Color::Rgb(0, 120, 110),
        }
    }

    pub fn for_mode(dark: bool) -> Self {
        if dark {
            Self::dark()
        } else {
            Self::light()
        }
    }
}

pub fn status_color(status: CharacterStatus, theme: &Theme) -> Color {
    match status {
        CharacterStatus::Alive => theme.success,
        CharacterStatus::Dead => theme.error,
        CharacterStatus::Unknown => theme.text_dim,
    }
}
