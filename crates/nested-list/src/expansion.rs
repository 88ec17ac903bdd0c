//! Per-group expand/collapse state.
//!
//! Entries are keyed by group id, not by node, so they survive structural
//! rebuilds. A group without an entry falls back to the data source's
//! default. Root groups always report expanded.

use std::collections::{HashMap, HashSet};

use crate::node::GroupId;
use crate::source::GroupSource;

/// The expansion state of every group the user has touched.
#[derive(Debug, Clone, Default)]
pub struct ExpansionStore {
    states: HashMap<GroupId, bool>,
    roots: HashSet<GroupId>,
}

impl ExpansionStore {
    /// Creates an empty store with no roots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether `group` is expanded.
    ///
    /// Roots are always expanded; otherwise the stored value wins, and
    /// `source.default_expanded` answers for groups without one.
    pub fn is_expanded<S: GroupSource + ?Sized>(&self, group: GroupId, source: &S) -> bool {
        if self.roots.contains(&group) {
            return true;
        }
        match self.states.get(&group) {
            Some(&expanded) => expanded,
            None => source.default_expanded(group),
        }
    }

    /// Records the expansion state of `group`.
    pub fn set_expanded(&mut self, group: GroupId, expanded: bool) {
        self.states.insert(group, expanded);
    }

    /// Returns the stored value for `group`, ignoring roots and defaults.
    pub fn stored(&self, group: GroupId) -> Option<bool> {
        self.states.get(&group).copied()
    }

    /// Replaces the set of root groups.
    pub fn set_roots(&mut self, roots: impl IntoIterator<Item = GroupId>) {
        self.roots = roots.into_iter().collect();
    }

    /// Returns `true` if `group` is a root.
    pub fn is_root(&self, group: GroupId) -> bool {
        self.roots.contains(&group)
    }

    /// Forgets every stored value. Roots are kept.
    pub fn clear(&mut self) {
        self.states.clear();
    }

    /// Returns the number of stored values.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if no values are stored.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
