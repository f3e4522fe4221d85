//! placedeck-core: Headless view-state engine for the places panel
//!
//! This crate owns everything with a state or consistency concern and
//! nothing that touches a terminal:
//! - Place records and lenient result-set decoding
//! - The panel state reducer and visibility ownership
//! - Card/detail/gallery fragments and image-fallback policy
//! - The panel view over an injected surface
//! - Delegated click resolution and navigation intents

pub mod assets;
pub mod config;
pub mod fragment;
pub mod place;
pub mod router;
pub mod state;
pub mod view;

// Re-export commonly used types
pub use assets::{Assets, ImageSlot};
pub use config::{Config, ConfigError, PanelConfig};
pub use fragment::{
    render_card, render_content, render_detail, CardFragment, DetailFragment, GalleryFragment,
    PanelContent,
};
pub use place::{Place, ResultSet};
pub use router::{resolve, HitNode, NavIntent, Navigator, Router, DETAIL_ROUTE};
pub use state::{compute_state, PanelMode, PanelState, Visibility};
pub use view::{PanelView, Surface};

/// Returns the core version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
