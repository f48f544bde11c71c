//! Kanagawa Dragon theme module.
//!
//! Low-contrast, warm, dark palette inspired by traditional Japanese
//! ink wash painting, specialized for the reference viewer.

#![allow(dead_code)]

use ratatui::style::Color;

/// Kanagawa Dragon color palette
pub mod colors {
    use super::Color;

    // === Background Colors ===
    /// Dragon Black - Primary background
    pub const BG_DARK: Color = Color::Rgb(0x18, 0x16, 0x16);
    /// Slightly lighter background for panels
    pub const BG_MEDIUM: Color = Color::Rgb(0x1D, 0x1C, 0x19);
    /// Background for highlighted/selected areas
    pub const BG_HIGHLIGHT: Color = Color::Rgb(0x28, 0x27, 0x27);
    /// Background for code blocks
    pub const BG_CODE: Color = Color::Rgb(0x12, 0x12, 0x12);

    // === Foreground Colors ===
    /// Old White - Primary text color
    pub const FG_PRIMARY: Color = Color::Rgb(0xC5, 0xC9, 0xC5);
    /// Dimmed text for secondary information
    pub const FG_DIM: Color = Color::Rgb(0x72, 0x71, 0x69);
    /// Very dim text for hints and placeholders
    pub const FG_HINT: Color = Color::Rgb(0x54, 0x54, 0x54);

    // === Accent Colors ===
    /// Dragon Red - For failures
    pub const RED: Color = Color::Rgb(0xC4, 0x74, 0x6E);
    /// Dragon Green - For success and tips
    pub const GREEN: Color = Color::Rgb(0x8A, 0x9A, 0x7B);
    /// Carp Yellow - For warnings and the address fragment
    pub const YELLOW: Color = Color::Rgb(0xC4, 0xB2, 0x8A);
    /// Dragon Blue - For the active navigation entry
    pub const BLUE: Color = Color::Rgb(0x8B, 0xA4, 0xB0);
    /// Purple - For section headings
    pub const PURPLE: Color = Color::Rgb(0x95, 0x7F, 0xB8);
    /// Magenta - For subsection headings
    pub const MAGENTA: Color = Color::Rgb(0xD2, 0x7E, 0x99);
    /// Teal - For code text
    pub const TEAL: Color = Color::Rgb(0x8E, 0xA4, 0x9E);

    // === UI Element Colors ===
    /// Wall Gray - For borders and separators
    pub const BORDER: Color = Color::Rgb(0x72, 0x71, 0x69);
    /// Dim border for less important separators
    pub const BORDER_DIM: Color = Color::Rgb(0x3A, 0x3A, 0x3A);
    /// Accent border for focused panes
    pub const BORDER_ACCENT: Color = Color::Rgb(0x8B, 0xA4, 0xB0);
}

/// Semantic styling helpers
pub mod styles {
    use super::colors;
    use ratatui::style::{Modifier, Style};

    /// Style for primary text
    pub fn text() -> Style {
        Style::default().fg(colors::FG_PRIMARY)
    }

    /// Style for dimmed/secondary text
    pub fn text_dim() -> Style {
        Style::default().fg(colors::FG_DIM)
    }

    /// Style for hint text (key legends)
    pub fn text_hint() -> Style {
        Style::default().fg(colors::FG_HINT)
    }

    /// Style for section headings
    pub fn section_title() -> Style {
        Style::default()
            .fg(colors::PURPLE)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for subsection headings
    pub fn subsection_title() -> Style {
        Style::default()
            .fg(colors::MAGENTA)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for code block text
    pub fn code() -> Style {
        Style::default().fg(colors::TEAL).bg(colors::BG_CODE)
    }

    /// Style for code block frames and language tags
    pub fn code_frame() -> Style {
        Style::default().fg(colors::BORDER_DIM)
    }

    /// Style for tip lines
    pub fn tip() -> Style {
        Style::default().fg(colors::GREEN)
    }

    /// Style for warning lines
    pub fn warning() -> Style {
        Style::default().fg(colors::YELLOW)
    }

    /// Style for the address fragment in the header
    pub fn address() -> Style {
        Style::default().fg(colors::YELLOW)
    }

    /// Style for the active navigation entry
    pub fn nav_active() -> Style {
        Style::default()
            .fg(colors::BG_DARK)
            .bg(colors::BLUE)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for inactive navigation entries
    pub fn nav_inactive() -> Style {
        Style::default().fg(colors::FG_DIM)
    }

    /// Style for the sidebar cursor when the sidebar has focus
    pub fn nav_cursor() -> Style {
        Style::default()
            .fg(colors::FG_PRIMARY)
            .bg(colors::BG_HIGHLIGHT)
    }

    /// Style for focused borders
    pub fn border_focused() -> Style {
        Style::default().fg(colors::BORDER_ACCENT)
    }

    /// Style for unfocused borders
    pub fn border() -> Style {
        Style::default().fg(colors::BORDER)
    }

    /// Style for block titles
    pub fn title() -> Style {
        Style::default()
            .fg(colors::FG_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for success messages
    pub fn success() -> Style {
        Style::default().fg(colors::GREEN)
    }

    /// Style for error messages
    pub fn error() -> Style {
        Style::default().fg(colors::RED)
    }

    /// Style for info messages
    pub fn info() -> Style {
        Style::default().fg(colors::BLUE)
    }
}
