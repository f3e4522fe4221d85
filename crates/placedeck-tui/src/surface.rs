//! The TUI's implementation of the core view surface.
//!
//! [`TuiSurface`] is the frame-facing mount point: the panel view writes
//! content and visibility flags into it, and the renderer reads them back
//! on every draw. Nothing here touches the terminal directly.

use placedeck_core::{PanelContent, Surface};

/// Live mount point for the panel.
///
/// `layout_open` is the terminal analog of the page-level "panel open"
/// class: the shell layout reads it to decide whether the transcript gets
/// the full width.
#[derive(Debug, Default)]
pub struct TuiSurface {
    content: PanelContent,
    panel_hidden: bool,
    layout_open: bool,
}

impl TuiSurface {
    pub fn content(&self) -> &PanelContent {
        &self.content
    }

    /// Mutable access for the host's image presence probe.
    pub fn content_mut(&mut self) -> &mut PanelContent {
        &mut self.content
    }

    pub fn panel_hidden(&self) -> bool {
        self.panel_hidden
    }

    pub fn layout_open(&self) -> bool {
        self.layout_open
    }
}

impl Surface for TuiSurface {
    fn mount(&mut self, content: PanelContent) {
        self.content = content;
    }

    fn clear(&mut self) {
        self.content = PanelContent::Empty;
    }

    fn set_panel_hidden(&mut self, hidden: bool) {
        self.panel_hidden = hidden;
    }

    fn set_layout_open(&mut self, open: bool) {
        self.layout_open = open;
    }
}
