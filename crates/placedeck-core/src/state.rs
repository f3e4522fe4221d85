//! Panel state reduction and visibility ownership.
//!
//! [`compute_state`] maps a result set to the panel's target mode and
//! content-driven visibility. [`Visibility`] is the single owner of the
//! final shown/hidden flag, reconciling the two writers (content updates
//! and the manual toggle): a toggle overrides content until the next
//! result set arrives, at which point content wins again.

use crate::place::ResultSet;

/// What the panel displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelMode {
    /// Nothing to show; the content container is cleared.
    #[default]
    Empty,
    /// One place, full-size image with an overlay caption.
    Detail,
    /// An ordered list of place cards.
    Gallery,
}

impl std::fmt::Display for PanelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty"),
            Self::Detail => write!(f, "detail"),
            Self::Gallery => write!(f, "gallery"),
        }
    }
}

/// Reducer output: target mode plus content-driven visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelState {
    pub mode: PanelMode,
    pub visible: bool,
}

/// Reduce a result set to the panel's target state.
///
/// Pure and total: every `ResultSet` (including ones decoded from garbage,
/// which decode to `Empty`) maps to exactly one state.
#[must_use]
pub fn compute_state(results: &ResultSet) -> PanelState {
    match results {
        ResultSet::Empty => PanelState {
            mode: PanelMode::Empty,
            visible: false,
        },
        ResultSet::Single(_) => PanelState {
            mode: PanelMode::Detail,
            visible: true,
        },
        ResultSet::Many(_) => PanelState {
            mode: PanelMode::Gallery,
            visible: true,
        },
    }
}

/// The shown/hidden flag and its two inputs.
///
/// `manual_override` holds a toggle decision made since the last content
/// change; it is cleared whenever a new result set arrives, so new content
/// always resets the override.
#[derive(Debug, Clone, Copy, Default)]
pub struct Visibility {
    content_visible: bool,
    manual_override: Option<bool>,
}

impl Visibility {
    /// Record a new reducer output. Clears any manual override.
    pub fn on_results(&mut self, state: PanelState) {
        self.content_visible = state.visible;
        self.manual_override = None;
    }

    /// Flip visibility by hand. Returns the new shown flag.
    pub fn toggle(&mut self) -> bool {
        let shown = !self.is_shown();
        self.manual_override = Some(shown);
        shown
    }

    /// Whether the panel is currently shown.
    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.manual_override.unwrap_or(self.content_visible)
    }
}
