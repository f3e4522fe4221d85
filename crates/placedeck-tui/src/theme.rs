//! Theme and icon definitions for the placedeck TUI.

use ratatui::style::Color;

/// Color palette for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background.
    pub base: Color,
    /// Primary text.
    pub text: Color,
    /// Secondary text.
    pub subtext: Color,
    /// De-emphasized text.
    pub muted: Color,
    /// Accent for titles, selection, key hints.
    pub primary: Color,
    /// Pane borders.
    pub border: Color,
    /// Border of the focused/selected element.
    pub border_focused: Color,
    /// Ratings and confirmations.
    pub success: Color,
    /// Degraded states (image fallback in use).
    pub warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            base: Color::Rgb(24, 26, 32),
            text: Color::Rgb(214, 219, 230),
            subtext: Color::Rgb(160, 168, 184),
            muted: Color::Rgb(104, 110, 125),
            primary: Color::Rgb(122, 168, 250),
            border: Color::Rgb(70, 76, 94),
            border_focused: Color::Rgb(122, 168, 250),
            success: Color::Rgb(140, 214, 140),
            warning: Color::Rgb(235, 196, 108),
        }
    }
}

/// Icon set with an ASCII fallback for `NO_COLOR`/plain terminals.
#[derive(Debug, Clone, Copy, Default)]
pub struct Icons {
    pub ascii: bool,
}

impl Icons {
    pub fn new(ascii: bool) -> Self {
        Self { ascii }
    }

    /// Marker in front of the city line.
    #[must_use]
    pub fn city(&self) -> &'static str {
        if self.ascii {
            "@"
        } else {
            "•"
        }
    }

    /// Marker in front of the tags line.
    #[must_use]
    pub fn tags(&self) -> &'static str {
        "#"
    }

    /// Marker in front of the rating line.
    #[must_use]
    pub fn rating(&self) -> &'static str {
        if self.ascii {
            "*"
        } else {
            "★"
        }
    }

    /// Selection marker for the focused card.
    #[must_use]
    pub fn selected(&self) -> &'static str {
        if self.ascii {
            ">"
        } else {
            "▸"
        }
    }
}
