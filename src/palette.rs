//! Color mapper: `TokenKind` × `Theme` → ratatui `Style`.
//!
//! Pure lookup tables. Comments land in the italic font slot and keywords
//! in the bold slot, on both themes.

use clap::ValueEnum;
use ratatui::style::{Color, Modifier, Style};

use crate::tokenizer::TokenKind;

/// Color scheme pushed in by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Background of the code area.
    pub fn background(self) -> Color {
        match self {
            Theme::Light => Color::Rgb(246, 248, 250),
            Theme::Dark => Color::Rgb(22, 27, 34),
        }
    }

    /// Line-number gutter.
    pub fn gutter_style(self) -> Style {
        let fg = match self {
            Theme::Light => Color::Rgb(140, 149, 159),
            Theme::Dark => Color::Rgb(110, 118, 129),
        };
        Style::default().fg(fg).bg(self.background())
    }

    /// Block header bar (language label and affordances).
    pub fn header_style(self) -> Style {
        let (fg, bg) = match self {
            Theme::Light => (Color::Rgb(36, 41, 47), Color::Rgb(208, 215, 222)),
            Theme::Dark => (Color::Rgb(230, 237, 243), Color::Rgb(48, 54, 61)),
        };
        Style::default().fg(fg).bg(bg)
    }
}

type Entry = (Color, Modifier);

// Indexed by `TokenKind::index()`; slot 0 is `Plain`.
const DARK: [Entry; 8] = [
    (Color::Rgb(230, 237, 243), Modifier::empty()), // plain
    (Color::Rgb(255, 123, 114), Modifier::BOLD),    // keyword
    (Color::Rgb(165, 214, 255), Modifier::empty()), // string
    (Color::Rgb(139, 148, 158), Modifier::ITALIC),  // comment
    (Color::Rgb(121, 192, 255), Modifier::empty()), // number
    (Color::Rgb(210, 168, 255), Modifier::empty()), // identifier
    (Color::Rgb(255, 166, 87), Modifier::empty()),  // operator
    (Color::Rgb(201, 209, 217), Modifier::empty()), // punctuation
];

const LIGHT: [Entry; 8] = [
    (Color::Rgb(36, 41, 47), Modifier::empty()),
    (Color::Rgb(207, 34, 46), Modifier::BOLD),
    (Color::Rgb(10, 48, 105), Modifier::empty()),
    (Color::Rgb(110, 119, 129), Modifier::ITALIC),
    (Color::Rgb(5, 80, 174), Modifier::empty()),
    (Color::Rgb(130, 80, 223), Modifier::empty()),
    (Color::Rgb(149, 56, 0), Modifier::empty()),
    (Color::Rgb(87, 96, 106), Modifier::empty()),
];

/// Resolves the display style for a token kind under a theme.
///
/// Includes the theme's code background so spans can be drawn as-is.
pub fn style_for(kind: TokenKind, theme: Theme) -> Style {
    let table = match theme {
        Theme::Light => &LIGHT,
        Theme::Dark => &DARK,
    };
    let (fg, modifier) = table.get(kind.index()).copied().unwrap_or(table[0]);
    Style::default()
        .fg(fg)
        .bg(theme.background())
        .add_modifier(modifier)
}

#[cfg(test)]
#[path = "palette_tests.rs"]
mod tests;
