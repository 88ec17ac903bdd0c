//! Derivation of the visible rows from the full sequence.
//!
//! A node is visible iff every group on its path to a root is expanded.
//! Rather than walking each node's ancestors, [`build_visible`] makes one
//! pass over the full sequence while keeping the chain of groups that are
//! currently open, so the cost is linear in the number of nodes.

use nested_list_core::logging::targets;

use crate::expansion::ExpansionStore;
use crate::flatten::FullSequence;
use crate::node::NodeKind;
use crate::source::GroupSource;

/// The rows currently shown, as indices into the full sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleSequence {
    indices: Vec<usize>,
}

impl VisibleSequence {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of visible rows.
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Returns `true` if nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Returns the full-sequence index shown at visible position `position`.
    pub fn full_index(&self, position: usize) -> Option<usize> {
        self.indices.get(position).copied()
    }

    /// Iterates over the full-sequence indices in display order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Returns the full-sequence indices as a slice.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }
}

/// Computes the visible subsequence of `full` under `store`.
///
/// The walk keeps a stack of `(full index, open)` entries for the groups on
/// the current path, where `open` means the group is both visible and
/// expanded. A node is visible iff it is a root or its parent is the open
/// group on top of the stack.
pub fn build_visible<S: GroupSource + ?Sized>(
    full: &FullSequence,
    store: &ExpansionStore,
    source: &S,
) -> VisibleSequence {
    let mut indices = Vec::with_capacity(full.len());
    let mut chain: Vec<(usize, bool)> = Vec::new();

    for (index, node) in full.iter().enumerate() {
        chain.truncate(node.depth);

        let visible = match node.parent {
            None => true,
            Some(parent) => chain
                .last()
                .is_some_and(|&(open_index, open)| open_index == parent && open),
        };

        if visible {
            indices.push(index);
        }

        if let NodeKind::Group { id } = node.kind {
            chain.push((index, visible && store.is_expanded(id, source)));
        }
    }

    tracing::trace!(
        target: targets::VISIBILITY,
        full = full.len(),
        visible = indices.len(),
        "rebuilt visible rows"
    );

    VisibleSequence { indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::build_full;
    use crate::node::{GroupId, ItemId};
    use crate::source::TreeSource;

    /// Checks visibility the slow way, by walking ancestors.
    fn naive_visible(full: &FullSequence, store: &ExpansionStore, source: &TreeSource) -> Vec<usize> {
        (0..full.len())
            .filter(|&index| {
                let mut current = full.get(index).unwrap().parent;
                while let Some(parent) = current {
                    let node = full.get(parent).unwrap();
                    if !store.is_expanded(node.group_id().unwrap(), source) {
                        return false;
                    }
                    current = node.parent;
                }
                true
            })
            .collect()
    }

    fn scenario() -> TreeSource {
        // G1 { I1, I2, G2 { I3, G5 { I4 } } }, G3 { G4 { I5 } }
        let tree = TreeSource::new();
        tree.add_root(GroupId(1));
        tree.add_item(GroupId(1), ItemId(1));
        tree.add_item(GroupId(1), ItemId(2));
        tree.add_group(GroupId(1), GroupId(2));
        tree.add_item(GroupId(2), ItemId(3));
        tree.add_group(GroupId(2), GroupId(5));
        tree.add_item(GroupId(5), ItemId(4));
        tree.add_root(GroupId(3));
        tree.add_group(GroupId(3), GroupId(4));
        tree.add_item(GroupId(4), ItemId(5));
        tree
    }

    fn store_for(full: &FullSequence) -> ExpansionStore {
        let mut store = ExpansionStore::new();
        store.set_roots(full.root_ids().iter().copied());
        store
    }

    #[test]
    fn test_collapsed_by_default() {
        let tree = scenario();
        let full = build_full(&tree, 16).unwrap();
        let store = store_for(&full);

        let visible = build_visible(&full, &store, &tree);
        // G1, I1, I2, G2, G3, G4
        assert_eq!(visible.indices(), &[0, 1, 2, 3, 7, 8]);
        assert_eq!(visible.indices(), naive_visible(&full, &store, &tree).as_slice());
    }

    #[test]
    fn test_nested_expansion_requires_whole_chain() {
        let tree = scenario();
        let full = build_full(&tree, 16).unwrap();
        let mut store = store_for(&full);

        // G5 expanded but its parent G2 is not: I4 stays hidden.
        store.set_expanded(GroupId(5), true);
        let visible = build_visible(&full, &store, &tree);
        assert_eq!(visible.indices(), &[0, 1, 2, 3, 7, 8]);

        store.set_expanded(GroupId(2), true);
        let visible = build_visible(&full, &store, &tree);
        assert_eq!(visible.indices(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(visible.indices(), naive_visible(&full, &store, &tree).as_slice());
    }

    #[test]
    fn test_everything_expanded_shows_full_sequence() {
        let tree = scenario();
        let full = build_full(&tree, 16).unwrap();
        let mut store = store_for(&full);
        for id in full.group_ids().collect::<Vec<_>>() {
            store.set_expanded(id, true);
        }

        let visible = build_visible(&full, &store, &tree);
        assert_eq!(visible.len(), full.len());
        assert_eq!(visible.full_index(9), Some(9));
        assert_eq!(visible.full_index(10), None);
    }

    #[test]
    fn test_build_visible_is_idempotent() {
        let tree = scenario();
        let full = build_full(&tree, 16).unwrap();
        let mut store = store_for(&full);
        store.set_expanded(GroupId(4), true);

        let first = build_visible(&full, &store, &tree);
        let second = build_visible(&full, &store, &tree);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_full_sequence() {
        let tree = TreeSource::new();
        let full = FullSequence::new();
        let visible = build_visible(&full, &ExpansionStore::new(), &tree);
        assert!(visible.is_empty());
    }
}
