//! Centralized color palette and styling for a consistent look.

use ratatui::style::{Color, Modifier, Style};

use hotline_client::NoticeLevel;

/// Color palette for the Hotline TUI.
#[derive(Debug, Clone, Copy)]
pub struct ColorPalette {
    pub primary: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub border: Color,
    pub border_focused: Color,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            primary: Color::Magenta,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::LightBlue,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            border: Color::DarkGray,
            border_focused: Color::Magenta,
        }
    }
}

/// Reusable style definitions.
#[derive(Debug, Clone, Default)]
pub struct Styles {
    pub palette: ColorPalette,
}

impl Styles {
    pub fn text(&self) -> Style {
        Style::default().fg(self.palette.text_primary)
    }

    pub fn text_muted(&self) -> Style {
        Style::default().fg(self.palette.text_secondary)
    }

    pub fn text_highlight(&self) -> Style {
        Style::default()
            .fg(self.palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text_success(&self) -> Style {
        Style::default().fg(self.palette.success)
    }

    pub fn text_error(&self) -> Style {
        Style::default().fg(self.palette.error)
    }

    pub fn border(&self) -> Style {
        Style::default().fg(self.palette.border)
    }

    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.palette.border_focused)
    }

    pub fn selection(&self) -> Style {
        Style::default()
            .fg(self.palette.text_primary)
            .bg(self.palette.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn badge(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(self.palette.warning)
            .add_modifier(Modifier::BOLD)
    }

    pub fn online_dot(&self) -> Style {
        Style::default().fg(self.palette.success)
    }

    pub fn notice(&self, level: NoticeLevel) -> Style {
        let fg = match level {
            NoticeLevel::Info => self.palette.info,
            NoticeLevel::Success => self.palette.success,
            NoticeLevel::Error => self.palette.error,
        };
        Style::default().fg(fg).add_modifier(Modifier::BOLD)
    }
}
