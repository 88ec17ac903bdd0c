//! Id-to-position lookups over the full and visible sequences.
//!
//! Lookups are plain scans by default. When enabled, [`PositionIndex`] is
//! refreshed on every rebuild and answers the same queries with hash lookups.

use std::collections::HashMap;

use crate::flatten::{FullSequence, is_group};
use crate::node::{GroupId, ItemId, NodeKind};
use crate::visibility::VisibleSequence;

/// Maps group and item ids to their positions in the current sequences.
#[derive(Debug, Clone, Default)]
pub struct PositionIndex {
    groups: HashMap<GroupId, usize>,
    items: HashMap<ItemId, usize>,
    visible_of_full: HashMap<usize, usize>,
}

impl PositionIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the full-sequence maps. Call after every structural rebuild.
    pub fn index_full(&mut self, full: &FullSequence) {
        self.groups.clear();
        self.items.clear();
        for (index, node) in full.iter().enumerate() {
            match node.kind {
                NodeKind::Group { id } => {
                    self.groups.entry(id).or_insert(index);
                }
                NodeKind::Item { id, .. } => {
                    self.items.entry(id).or_insert(index);
                }
            }
        }
    }

    /// Rebuilds the visible-position map. Call after every visibility rebuild.
    pub fn index_visible(&mut self, visible: &VisibleSequence) {
        self.visible_of_full.clear();
        self.visible_of_full
            .extend(visible.iter().enumerate().map(|(position, index)| (index, position)));
    }

    /// Returns the full-sequence position of a group.
    pub fn group(&self, id: GroupId) -> Option<usize> {
        self.groups.get(&id).copied()
    }

    /// Returns the full-sequence position of an item.
    pub fn item(&self, id: ItemId) -> Option<usize> {
        self.items.get(&id).copied()
    }

    /// Returns the visible position of a full-sequence index.
    pub fn visible(&self, full_index: usize) -> Option<usize> {
        self.visible_of_full.get(&full_index).copied()
    }

    /// Forgets everything.
    pub fn clear(&mut self) {
        self.groups.clear();
        self.items.clear();
        self.visible_of_full.clear();
    }
}

/// Scans for a group's full-sequence position.
pub fn scan_group(full: &FullSequence, id: GroupId) -> Option<usize> {
    full.iter().position(|node| is_group(&node.kind, id))
}

/// Scans for an item's full-sequence position.
pub fn scan_item(full: &FullSequence, id: ItemId) -> Option<usize> {
    full.iter().position(|node| node.item_id() == Some(id))
}

/// Scans for the visible position showing `full_index`.
pub fn scan_visible(visible: &VisibleSequence, full_index: usize) -> Option<usize> {
    visible.iter().position(|index| index == full_index)
}
