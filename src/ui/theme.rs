//! Colours and text styles.

use ratatui::style::{Color, Modifier, Style};

/// Slate and ore palette for the form.
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Rgb(16, 20, 26);
    pub const FG: Color = Color::Rgb(220, 224, 230);
    pub const FG_DIM: Color = Color::Rgb(150, 158, 170);
    pub const FG_MUTED: Color = Color::Rgb(90, 98, 110);

    pub const ACCENT: Color = Color::Rgb(255, 140, 60);
    pub const OK: Color = Color::Rgb(90, 210, 120);
    pub const WARN: Color = Color::Rgb(250, 200, 60);
    pub const ERROR: Color = Color::Rgb(255, 85, 85);
    pub const INFO: Color = Color::Rgb(100, 170, 255);

    /// Default full-screen style.
    pub fn base() -> Style {
        Style::default().fg(Self::FG).bg(Self::BG)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::FG_MUTED)
    }

    /// Border of the focused widget.
    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    pub fn title() -> Style {
        Style::default().fg(Self::FG).add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::FG_DIM)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::FG_MUTED)
    }

    pub fn gauge() -> Style {
        Style::default().fg(Self::ACCENT).bg(Color::Rgb(40, 46, 56))
    }

    pub fn button() -> Style {
        Style::default()
            .fg(Self::BG)
            .bg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn button_disabled() -> Style {
        Style::default().fg(Self::FG_MUTED).add_modifier(Modifier::CROSSED_OUT)
    }

    pub fn ok() -> Style {
        Style::default().fg(Self::OK).add_modifier(Modifier::BOLD)
    }

    pub fn warn() -> Style {
        Style::default().fg(Self::WARN).add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::ERROR).add_modifier(Modifier::BOLD)
    }

    pub fn info() -> Style {
        Style::default().fg(Self::INFO)
    }
}
