//! The position-indexed facade consumed by list widgets.
//!
//! [`NestedList`] ties the pieces together: it flattens the tree supplied by
//! a [`GroupSource`], filters it through the expansion state, and answers
//! row queries by visible position.
//!
//! # Example
//!
//! ```
//! use nested_list::{GroupId, ItemId, NestedList, Row, TreeSource};
//!
//! let tree = TreeSource::new();
//! tree.add_root(GroupId(1));
//! tree.add_item(GroupId(1), ItemId(1));
//! tree.add_item(GroupId(1), ItemId(2));
//! tree.add_group(GroupId(1), GroupId(2));
//! tree.add_item(GroupId(2), ItemId(3));
//!
//! let mut list = NestedList::new(tree).unwrap();
//! assert_eq!(list.size(), 4);
//!
//! list.expand_group(GroupId(2));
//! assert_eq!(list.size(), 5);
//! assert_eq!(
//!     list.row(4).unwrap(),
//!     Row::Item { group: GroupId(2), child_position: 0, id: ItemId(3) }
//! );
//! ```
//!
//! # Rebuild paths
//!
//! - [`notify_structural_change`](NestedList::notify_structural_change)
//!   re-flattens the tree and then recomputes the visible rows. Use it after
//!   the source's tree changed.
//! - [`notify_visibility_change`](NestedList::notify_visibility_change)
//!   only recomputes the visible rows. The expand/collapse commands call it.
//!
//! Both run to completion before returning; callers never observe a
//! half-built list. If flattening fails, the previous rows stay in place.

use nested_list_core::logging::{span_names, targets};
use nested_list_core::{PerfSpan, Signal};

use crate::config::ListConfig;
use crate::error::{Error, Result};
use crate::expansion::ExpansionStore;
use crate::flatten::{FullSequence, build_full};
use crate::lookup::{PositionIndex, scan_group, scan_item, scan_visible};
use crate::node::{GroupId, ItemId, Node, NodeKind, Row, RowKind};
use crate::source::GroupSource;
use crate::visibility::{VisibleSequence, build_visible};

/// Signals emitted by a [`NestedList`].
#[derive(Default)]
pub struct ListSignals {
    /// Emitted after every rebuild of the visible rows.
    pub layout_changed: Signal<()>,
    /// Emitted after a successful structural rebuild, with the new number of
    /// nodes in the full sequence.
    pub structure_rebuilt: Signal<usize>,
    /// Emitted when `expand_group`, `collapse_group` or `toggle_group`
    /// changes a group's effective state to expanded.
    pub group_expanded: Signal<GroupId>,
    /// Emitted when `expand_group`, `collapse_group` or `toggle_group`
    /// changes a group's effective state to collapsed.
    pub group_collapsed: Signal<GroupId>,
    /// Emitted when a group row is activated.
    pub group_activated: Signal<GroupId>,
    /// Emitted when an item row is activated.
    /// Args: (owning group, child position)
    pub item_activated: Signal<(GroupId, usize)>,
}

/// A tree of groups and items presented as a flat list of rows.
///
/// All calls are expected from a single owner; the list does no locking of
/// its own.
pub struct NestedList<S> {
    source: S,
    config: ListConfig,
    full: FullSequence,
    visible: VisibleSequence,
    expansion: ExpansionStore,
    index: Option<PositionIndex>,
    signals: ListSignals,
}

impl<S: GroupSource> NestedList<S> {
    /// Creates a list over `source` with the default configuration.
    ///
    /// Fails if the source's tree is malformed.
    pub fn new(source: S) -> Result<Self> {
        Self::with_config(source, ListConfig::default())
    }

    /// Creates a list over `source` with `config`.
    pub fn with_config(source: S, config: ListConfig) -> Result<Self> {
        let index = config.position_index.then(PositionIndex::new);
        let mut list = Self {
            source,
            config,
            full: FullSequence::new(),
            visible: VisibleSequence::new(),
            expansion: ExpansionStore::new(),
            index,
            signals: ListSignals::default(),
        };
        list.notify_structural_change()?;
        Ok(list)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the data source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the data source for mutation.
    ///
    /// Call [`notify_structural_change`](Self::notify_structural_change)
    /// afterwards if the tree changed.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ListConfig {
        &self.config
    }

    /// Returns the signals.
    pub fn signals(&self) -> &ListSignals {
        &self.signals
    }

    /// Returns the full sequence.
    pub fn full(&self) -> &FullSequence {
        &self.full
    }

    /// Returns the visible sequence.
    pub fn visible(&self) -> &VisibleSequence {
        &self.visible
    }

    /// Returns the expansion store.
    pub fn expansion(&self) -> &ExpansionStore {
        &self.expansion
    }

    // =========================================================================
    // Row queries
    // =========================================================================

    /// Returns the number of visible rows.
    pub fn size(&self) -> usize {
        self.visible.len()
    }

    /// Returns `true` if no rows are visible.
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    fn full_index(&self, position: usize) -> Result<usize> {
        self.visible
            .full_index(position)
            .ok_or_else(|| Error::out_of_range(position, self.size()))
    }

    fn node_at(&self, position: usize) -> Result<&Node> {
        let index = self.full_index(position)?;
        self.full
            .get(index)
            .ok_or_else(|| Error::out_of_range(position, self.size()))
    }

    /// Returns the row at visible position `position`.
    pub fn row(&self, position: usize) -> Result<Row> {
        Ok(self.node_at(position)?.to_row())
    }

    /// Returns whether the row at `position` is a group or an item.
    pub fn row_kind(&self, position: usize) -> Result<RowKind> {
        Ok(self.node_at(position)?.row_kind())
    }

    /// Returns the group shown at `position`.
    ///
    /// Fails with [`Error::RowKind`] if the row is an item.
    pub fn row_group_id(&self, position: usize) -> Result<GroupId> {
        self.node_at(position)?
            .group_id()
            .ok_or_else(|| Error::row_kind(position, RowKind::Group))
    }

    /// Returns `(owning group, child position)` of the item shown at `position`.
    ///
    /// Fails with [`Error::RowKind`] if the row is a group.
    pub fn row_item_ref(&self, position: usize) -> Result<(GroupId, usize)> {
        match self.node_at(position)?.kind {
            NodeKind::Item {
                group,
                child_position,
                ..
            } => Ok((group, child_position)),
            NodeKind::Group { .. } => Err(Error::row_kind(position, RowKind::Item)),
        }
    }

    /// Returns the nesting depth of the row at `position`.
    pub fn row_depth(&self, position: usize) -> Result<usize> {
        Ok(self.node_at(position)?.depth)
    }

    /// Returns whether the group row at `position` is expanded.
    pub fn row_is_expanded(&self, position: usize) -> Result<bool> {
        let id = self.row_group_id(position)?;
        Ok(self.is_group_expanded(id))
    }

    /// Returns whether the row at `position` has anything nested below it.
    pub fn row_has_children(&self, position: usize) -> Result<bool> {
        let index = self.full_index(position)?;
        Ok(self.full.descendant_count(index) > 0)
    }

    /// Iterates over the visible rows in display order.
    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        self.visible
            .iter()
            .filter_map(|index| self.full.get(index).map(Node::to_row))
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Returns a group's position in the full sequence.
    pub fn flat_position_of_group(&self, id: GroupId) -> Option<usize> {
        match &self.index {
            Some(index) => index.group(id),
            None => scan_group(&self.full, id),
        }
    }

    /// Returns an item's position in the full sequence.
    pub fn flat_position_of_item(&self, id: ItemId) -> Option<usize> {
        match &self.index {
            Some(index) => index.item(id),
            None => scan_item(&self.full, id),
        }
    }

    fn visible_position_of(&self, full_index: usize) -> Option<usize> {
        match &self.index {
            Some(index) => index.visible(full_index),
            None => scan_visible(&self.visible, full_index),
        }
    }

    /// Returns a group's visible position, `None` if it is hidden or unknown.
    pub fn visible_position_of_group(&self, id: GroupId) -> Option<usize> {
        self.flat_position_of_group(id)
            .and_then(|index| self.visible_position_of(index))
    }

    /// Returns an item's visible position, `None` if it is hidden or unknown.
    pub fn visible_position_of_item(&self, id: ItemId) -> Option<usize> {
        self.flat_position_of_item(id)
            .and_then(|index| self.visible_position_of(index))
    }

    // =========================================================================
    // Expand/Collapse
    // =========================================================================

    /// Returns whether a group is expanded.
    ///
    /// Unknown groups answer with the source's default.
    pub fn is_group_expanded(&self, id: GroupId) -> bool {
        self.expansion.is_expanded(id, &self.source)
    }

    /// Expands a group.
    pub fn expand_group(&mut self, id: GroupId) {
        self.set_group_expanded(id, true);
    }

    /// Collapses a group. Root groups cannot be collapsed.
    pub fn collapse_group(&mut self, id: GroupId) {
        self.set_group_expanded(id, false);
    }

    /// Flips a group's expansion state.
    pub fn toggle_group(&mut self, id: GroupId) {
        let expanded = self.is_group_expanded(id);
        self.set_group_expanded(id, !expanded);
    }

    /// Records the expansion state of a group and refreshes the visible rows.
    ///
    /// Groups that are not in the current tree are ignored, so they keep
    /// answering with the source's default.
    pub fn set_group_expanded(&mut self, id: GroupId, expanded: bool) {
        if self.flat_position_of_group(id).is_none() {
            tracing::debug!(target: targets::EXPANSION, group = %id, expanded, "ignoring expansion of group not in tree");
            return;
        }

        let before = self.is_group_expanded(id);
        self.expansion.set_expanded(id, expanded);
        self.notify_visibility_change();

        let after = self.is_group_expanded(id);
        if before != after {
            tracing::debug!(target: targets::EXPANSION, group = %id, expanded = after, "group expansion changed");
            if after {
                self.signals.group_expanded.emit(id);
            } else {
                self.signals.group_collapsed.emit(id);
            }
        }
    }

    /// Expands every group in the tree.
    pub fn expand_all(&mut self) {
        self.set_all(true);
    }

    /// Collapses every group in the tree. Roots stay expanded.
    pub fn collapse_all(&mut self) {
        self.set_all(false);
    }

    fn set_all(&mut self, expanded: bool) {
        let ids: Vec<GroupId> = self.full.group_ids().collect();
        for id in ids {
            self.expansion.set_expanded(id, expanded);
        }
        self.notify_visibility_change();
    }

    /// Expands every ancestor of a group so that it becomes visible.
    ///
    /// The group itself is left as it is. Returns `false` if the group is
    /// not in the tree.
    pub fn reveal_group(&mut self, id: GroupId) -> bool {
        match self.flat_position_of_group(id) {
            Some(index) => {
                self.expand_ancestors(index);
                true
            }
            None => false,
        }
    }

    /// Expands every group above an item so that it becomes visible.
    ///
    /// Returns `false` if the item is not in the tree.
    pub fn reveal_item(&mut self, id: ItemId) -> bool {
        match self.flat_position_of_item(id) {
            Some(index) => {
                self.expand_ancestors(index);
                true
            }
            None => false,
        }
    }

    fn expand_ancestors(&mut self, index: usize) {
        let mut ancestors = Vec::new();
        let mut current = self.full.get(index).and_then(|node| node.parent);
        while let Some(parent) = current {
            let Some(node) = self.full.get(parent) else {
                break;
            };
            if let Some(group) = node.group_id() {
                ancestors.push(group);
            }
            current = node.parent;
        }

        for group in ancestors {
            self.expansion.set_expanded(group, true);
        }
        self.notify_visibility_change();
    }

    // =========================================================================
    // Rebuilds
    // =========================================================================

    /// Re-flattens the tree and recomputes the visible rows.
    ///
    /// On a structural error the previous sequences are kept and the error
    /// is returned.
    pub fn notify_structural_change(&mut self) -> Result<()> {
        let _span = PerfSpan::new(span_names::STRUCTURAL_REBUILD);

        let full = match build_full(&self.source, self.config.max_depth) {
            Ok(full) => full,
            Err(err) => {
                tracing::warn!(target: targets::LIST, error = %err, "structural rebuild failed, keeping previous rows");
                return Err(err);
            }
        };

        self.expansion.set_roots(full.root_ids().iter().copied());
        self.full = full;
        if let Some(index) = &mut self.index {
            index.index_full(&self.full);
        }
        self.rebuild_visible();

        tracing::debug!(
            target: targets::LIST,
            full = self.full.len(),
            visible = self.visible.len(),
            "structural rebuild complete"
        );

        self.signals.structure_rebuilt.emit(self.full.len());
        self.signals.layout_changed.emit(());
        Ok(())
    }

    /// Recomputes the visible rows from the current full sequence.
    pub fn notify_visibility_change(&mut self) {
        let _span = PerfSpan::new(span_names::VISIBILITY_REBUILD);
        self.rebuild_visible();
        self.signals.layout_changed.emit(());
    }

    fn rebuild_visible(&mut self) {
        self.visible = build_visible(&self.full, &self.expansion, &self.source);
        if let Some(index) = &mut self.index {
            index.index_visible(&self.visible);
        }
    }

    // =========================================================================
    // Activation
    // =========================================================================

    /// Activates the row at `position`.
    ///
    /// Emits `group_activated` for group rows or `item_activated` for item
    /// rows, never both, and returns the activated row.
    pub fn on_row_activated(&self, position: usize) -> Result<Row> {
        let row = self.row(position)?;
        match row {
            Row::Group(id) => self.signals.group_activated.emit(id),
            Row::Item {
                group,
                child_position,
                ..
            } => self.signals.item_activated.emit((group, child_position)),
        }
        Ok(row)
    }
}

static_assertions::assert_impl_all!(NestedList<crate::source::TreeSource>: Send, Sync);
