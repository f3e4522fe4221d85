//! Hit-region map for mouse interaction.
//!
//! The panel renderer's geometry is registered here every frame as a tree
//! of rectangles; a mouse click finds the deepest region under the cursor
//! and hands it to the core resolver, which walks up to the nearest
//! enclosing card. This is the delegated-listener pattern: one map and one
//! router for the whole panel, regardless of how many cards are shown.

use placedeck_core::HitNode;
use ratatui::layout::{Position, Rect};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Region {
    rect: Rect,
    parent: Option<usize>,
    /// `Some` marks a selectable card; the inner option is the attached
    /// place id (a card can legitimately lack one, in which case clicks on
    /// it resolve to nothing).
    card_id: Option<Option<String>>,
    depth: usize,
}

/// Tree of hit regions, rebuilt from panel geometry on every frame.
#[derive(Debug, Default)]
pub struct HitMap {
    regions: Vec<Region>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Register a plain (non-card) region. Returns its index for use as a
    /// parent.
    pub fn push(&mut self, rect: Rect, parent: Option<usize>) -> usize {
        self.push_region(rect, parent, None)
    }

    /// Register a card region carrying an optional place id.
    pub fn push_card(&mut self, rect: Rect, place_id: Option<&str>, parent: Option<usize>) -> usize {
        self.push_region(rect, parent, Some(place_id.map(String::from)))
    }

    fn push_region(
        &mut self,
        rect: Rect,
        parent: Option<usize>,
        card_id: Option<Option<String>>,
    ) -> usize {
        let depth = parent.map_or(0, |p| self.regions[p].depth + 1);
        self.regions.push(Region {
            rect,
            parent,
            card_id,
            depth,
        });
        self.regions.len() - 1
    }

    /// The deepest region containing the given cell, later registrations
    /// winning ties.
    pub fn node_at(&self, x: u16, y: u16) -> Option<Node<'_>> {
        let position = Position::new(x, y);
        self.regions
            .iter()
            .enumerate()
            .filter(|(_, region)| region.rect.contains(position))
            .max_by_key(|(index, region)| (region.depth, *index))
            .map(|(index, _)| Node { map: self, index })
    }

    /// The card region carrying the given place id, if currently mapped.
    pub fn card_node(&self, place_id: &str) -> Option<Node<'_>> {
        self.regions
            .iter()
            .enumerate()
            .find(|(_, region)| {
                region
                    .card_id
                    .as_ref()
                    .is_some_and(|id| id.as_deref() == Some(place_id))
            })
            .map(|(index, _)| Node { map: self, index })
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Cheap handle to one region, usable as a core hit-tree node.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    map: &'a HitMap,
    index: usize,
}

impl HitNode for Node<'_> {
    fn is_card(&self) -> bool {
        self.map.regions[self.index].card_id.is_some()
    }

    fn place_id(&self) -> Option<&str> {
        self.map.regions[self.index].card_id.as_ref()?.as_deref()
    }

    fn parent(&self) -> Option<Self> {
        self.map.regions[self.index].parent.map(|index| Node {
            map: self.map,
            index,
        })
    }
}
