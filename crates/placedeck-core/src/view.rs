//! The panel view: applies reducer output to an injected surface.
//!
//! [`Surface`] is the view handle: the host hands the panel its mount
//! points once, instead of the panel reaching into the page by id. The TUI
//! implements it over its frame state; tests implement it as a recorder.

use crate::assets::Assets;
use crate::fragment::{render_content, PanelContent};
use crate::place::ResultSet;
use crate::state::{compute_state, PanelMode, Visibility};

/// Host-side mount points for the panel.
pub trait Surface {
    /// Replace the content container with freshly rendered content.
    fn mount(&mut self, content: PanelContent);

    /// Empty the content container.
    fn clear(&mut self);

    /// Hide or show the panel wrapper.
    fn set_panel_hidden(&mut self, hidden: bool);

    /// Mirror panel visibility onto the surrounding layout so the host can
    /// reflow around an open panel.
    fn set_layout_open(&mut self, open: bool);
}

/// Owns the panel's mode and visibility, and drives the surface.
///
/// Content is rebuilt from scratch on every [`apply`](PanelView::apply);
/// applying the same result set twice leaves the surface in the same
/// observable state. While no surface is bound (e.g. before the host has
/// mounted), `apply` and `toggle` are silent no-ops.
#[derive(Debug)]
pub struct PanelView<S> {
    surface: Option<S>,
    assets: Assets,
    visibility: Visibility,
    mode: PanelMode,
}

impl<S: Surface> PanelView<S> {
    pub fn new(assets: Assets) -> Self {
        Self {
            surface: None,
            assets,
            visibility: Visibility::default(),
            mode: PanelMode::Empty,
        }
    }

    /// Bind the host surface. The previous surface, if any, is dropped.
    pub fn bind(&mut self, surface: S) {
        self.surface = Some(surface);
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn surface_mut(&mut self) -> Option<&mut S> {
        self.surface.as_mut()
    }

    /// Current content mode. Only result sets change this, never toggles.
    #[must_use]
    pub fn mode(&self) -> PanelMode {
        self.mode
    }

    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.visibility.is_shown()
    }

    /// Apply a new result set: reduce, re-render, sync visibility.
    pub fn apply(&mut self, results: &ResultSet) {
        let Some(surface) = self.surface.as_mut() else {
            tracing::debug!("panel apply with no surface bound, skipping");
            return;
        };

        let state = compute_state(results);
        self.mode = state.mode;
        self.visibility.on_results(state);

        match render_content(results, &self.assets) {
            PanelContent::Empty => surface.clear(),
            content => surface.mount(content),
        }

        let shown = self.visibility.is_shown();
        surface.set_panel_hidden(!shown);
        surface.set_layout_open(shown);
    }

    /// Manually flip visibility. Mode is untouched; the override lasts
    /// until the next result set arrives.
    pub fn toggle(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            tracing::debug!("panel toggle with no surface bound, skipping");
            return;
        };

        let shown = self.visibility.toggle();
        surface.set_panel_hidden(!shown);
        surface.set_layout_open(shown);
    }
}
