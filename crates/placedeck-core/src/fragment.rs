//! Typed view fragments for panel content.
//!
//! Rendering is a pure mapping from places to fragment trees; nothing here
//! touches a live view. Hosts walk the structs to draw, and tests assert
//! on them directly instead of matching markup strings.

use crate::assets::{Assets, ImageSlot};
use crate::place::{Place, ResultSet};
use crate::state::{compute_state, PanelMode};

/// Placeholder for a missing card name or city.
pub const UNKNOWN: &str = "Unknown";
/// Placeholder for a missing detail caption.
pub const UNKNOWN_PLACE: &str = "Unknown Place";
/// Alt text when a place has no name.
pub const FALLBACK_ALT: &str = "Place";
/// Gallery header label.
pub const GALLERY_HEADER: &str = "Places";

/// A compact, clickable summary of one place.
#[derive(Debug, Clone, PartialEq)]
pub struct CardFragment {
    pub place_id: String,
    pub image: ImageSlot,
    pub title: String,
    pub city: String,
    /// Omitted from the card entirely when the place has no tags.
    pub tags: Option<String>,
    /// Omitted from the card entirely when the place has no rating.
    pub rating: Option<f64>,
}

/// Full-size image with an overlay caption, for a single result.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailFragment {
    pub place_id: String,
    pub image: ImageSlot,
    pub caption: String,
}

/// Header plus ordered cards, for multiple results.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryFragment {
    pub header: String,
    pub cards: Vec<CardFragment>,
}

/// Everything the panel can display.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PanelContent {
    #[default]
    Empty,
    Detail(DetailFragment),
    Gallery(GalleryFragment),
}

/// Render one place to a card fragment.
pub fn render_card(place: &Place, assets: &Assets) -> CardFragment {
    let alt = place.name.clone().unwrap_or_else(|| FALLBACK_ALT.into());
    CardFragment {
        place_id: place.id.clone(),
        image: ImageSlot::new(place.filename.as_deref(), alt, assets),
        title: place.name.clone().unwrap_or_else(|| UNKNOWN.into()),
        city: place.city.clone().unwrap_or_else(|| UNKNOWN.into()),
        tags: place.tags.clone(),
        rating: place.rating,
    }
}

/// Render a single place to the detail fragment.
pub fn render_detail(place: &Place, assets: &Assets) -> DetailFragment {
    let alt = place.name.clone().unwrap_or_else(|| FALLBACK_ALT.into());
    DetailFragment {
        place_id: place.id.clone(),
        image: ImageSlot::new(place.filename.as_deref(), alt, assets),
        caption: place.name.clone().unwrap_or_else(|| UNKNOWN_PLACE.into()),
    }
}

/// Render a whole result set to panel content, preserving order.
pub fn render_content(results: &ResultSet, assets: &Assets) -> PanelContent {
    match compute_state(results).mode {
        PanelMode::Empty => PanelContent::Empty,
        PanelMode::Detail => PanelContent::Detail(render_detail(&results.places()[0], assets)),
        PanelMode::Gallery => PanelContent::Gallery(GalleryFragment {
            header: GALLERY_HEADER.into(),
            cards: results
                .places()
                .iter()
                .map(|place| render_card(place, assets))
                .collect(),
        }),
    }
}
