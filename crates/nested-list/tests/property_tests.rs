//! Property-based tests for visibility over randomly shaped trees.

use std::collections::BTreeSet;

use nested_list::{GroupId, ItemId, ListConfig, NestedList, NodeKind, TreeSource};
use proptest::prelude::*;
use proptest::sample::Index;

/// A randomly generated tree with initial expansion choices.
#[derive(Debug, Clone)]
struct TreeSpec {
    /// Parent of each group; group `i` only points at groups `< i`.
    parents: Vec<Option<usize>>,
    /// Owning group of each item.
    items: Vec<usize>,
    defaults: Vec<bool>,
    stored: Vec<Option<bool>>,
}

impl TreeSpec {
    fn build(&self) -> NestedList<TreeSource> {
        self.build_with(ListConfig::default())
    }

    fn build_with(&self, config: ListConfig) -> NestedList<TreeSource> {
        let tree = TreeSource::new();
        for (group, parent) in self.parents.iter().enumerate() {
            let id = GroupId(group as u32);
            match parent {
                None => assert!(tree.add_root(id)),
                Some(parent) => assert!(tree.add_group(GroupId(*parent as u32), id)),
            }
            tree.set_default_expanded(id, self.defaults[group]);
        }
        for (item, owner) in self.items.iter().enumerate() {
            assert!(tree.add_item(GroupId(*owner as u32), ItemId(item as u32)));
        }

        let mut list = NestedList::with_config(tree, config).unwrap();
        for (group, stored) in self.stored.iter().enumerate() {
            match stored {
                Some(true) => list.expand_group(GroupId(group as u32)),
                Some(false) => list.collapse_group(GroupId(group as u32)),
                None => {}
            }
        }
        list
    }
}

fn arb_tree() -> impl Strategy<Value = TreeSpec> {
    (1usize..24).prop_flat_map(|groups| {
        (
            prop::collection::vec((any::<bool>(), any::<Index>()), groups),
            prop::collection::vec(any::<Index>(), 0..48),
            prop::collection::vec(any::<bool>(), groups),
            prop::collection::vec(prop::option::of(any::<bool>()), groups),
        )
            .prop_map(move |(parent_picks, item_picks, defaults, stored)| {
                let parents = parent_picks
                    .iter()
                    .enumerate()
                    .map(|(group, (is_root, pick))| {
                        if group == 0 || *is_root {
                            None
                        } else {
                            Some(pick.index(group))
                        }
                    })
                    .collect();
                let items = item_picks.iter().map(|pick| pick.index(groups)).collect();
                TreeSpec {
                    parents,
                    items,
                    defaults,
                    stored,
                }
            })
    })
}

fn visible_set(list: &NestedList<TreeSource>) -> BTreeSet<usize> {
    list.visible().iter().collect()
}

/// Full indices of every node strictly below the node at `index`.
fn subtree(list: &NestedList<TreeSource>, index: usize) -> BTreeSet<usize> {
    (index + 1..=index + list.full().descendant_count(index)).collect()
}

fn ancestors_expanded(list: &NestedList<TreeSource>, index: usize) -> bool {
    let mut current = list.full().get(index).unwrap().parent;
    while let Some(parent) = current {
        let node = list.full().get(parent).unwrap();
        if !list.is_group_expanded(node.group_id().unwrap()) {
            return false;
        }
        current = node.parent;
    }
    true
}

proptest! {
    #[test]
    fn prop_visible_iff_ancestors_expanded(spec in arb_tree()) {
        let list = spec.build();
        let visible = visible_set(&list);

        for index in 0..list.full().len() {
            prop_assert_eq!(visible.contains(&index), ancestors_expanded(&list, index));
        }
    }

    #[test]
    fn prop_visible_is_ordered_subsequence(spec in arb_tree()) {
        let list = spec.build();
        let indices = list.visible().indices();

        prop_assert!(indices.len() <= list.full().len());
        prop_assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn prop_all_expanded_shows_everything(spec in arb_tree()) {
        let mut list = spec.build();
        list.expand_all();
        prop_assert_eq!(list.size(), list.full().len());
    }

    #[test]
    fn prop_equal_sizes_means_no_hidden_descendants(spec in arb_tree()) {
        let list = spec.build();
        if list.size() == list.full().len() {
            for (index, node) in list.full().iter().enumerate() {
                if let NodeKind::Group { id } = node.kind {
                    if list.full().descendant_count(index) > 0 {
                        prop_assert!(list.is_group_expanded(id));
                    }
                }
            }
        }
    }

    #[test]
    fn prop_visibility_rebuild_is_idempotent(spec in arb_tree()) {
        let mut list = spec.build();
        let first = list.visible().clone();
        list.notify_visibility_change();
        prop_assert_eq!(list.visible(), &first);
    }

    #[test]
    fn prop_collapse_removes_exactly_subtree(spec in arb_tree(), pick in any::<Index>()) {
        let mut list = spec.build();
        let candidates: Vec<(usize, GroupId)> = list
            .visible()
            .iter()
            .filter_map(|index| {
                let node = list.full().get(index)?;
                let id = node.group_id()?;
                (!node.is_root() && list.is_group_expanded(id)).then_some((index, id))
            })
            .collect();
        prop_assume!(!candidates.is_empty());

        let (index, id) = candidates[pick.index(candidates.len())];
        let before = visible_set(&list);
        list.collapse_group(id);
        let after = visible_set(&list);

        let expected: BTreeSet<usize> = before.difference(&subtree(&list, index)).copied().collect();
        prop_assert_eq!(after, expected);
    }

    #[test]
    fn prop_expand_then_collapse_round_trips(spec in arb_tree(), pick in any::<Index>()) {
        let mut list = spec.build();
        let ids: Vec<GroupId> = list
            .full()
            .group_ids()
            .filter(|&id| !list.is_group_expanded(id) || list.expansion().is_root(id))
            .collect();
        prop_assume!(!ids.is_empty());

        let id = ids[pick.index(ids.len())];
        let before = list.visible().clone();
        list.expand_group(id);
        list.collapse_group(id);
        prop_assert_eq!(list.visible(), &before);
    }

    #[test]
    fn prop_expand_leaf_group_is_noop(spec in arb_tree(), pick in any::<Index>()) {
        let mut list = spec.build();
        let leaves: Vec<GroupId> = list
            .visible()
            .iter()
            .filter(|&index| list.full().descendant_count(index) == 0)
            .filter_map(|index| list.full().get(index)?.group_id())
            .collect();
        prop_assume!(!leaves.is_empty());

        let id = leaves[pick.index(leaves.len())];
        let before = list.visible().clone();
        list.expand_group(id);
        prop_assert_eq!(list.visible(), &before);
        prop_assert!(list.is_group_expanded(id));
    }

    #[test]
    fn prop_position_index_matches_scans(spec in arb_tree()) {
        let indexed = spec.build_with(ListConfig::new().with_position_index(true));
        let scanned = spec.build_with(ListConfig::new().with_position_index(false));

        prop_assert_eq!(indexed.visible(), scanned.visible());
        for group in 0..spec.parents.len() as u32 + 2 {
            let id = GroupId(group);
            prop_assert_eq!(indexed.flat_position_of_group(id), scanned.flat_position_of_group(id));
            prop_assert_eq!(indexed.visible_position_of_group(id), scanned.visible_position_of_group(id));
        }
        for item in 0..spec.items.len() as u32 + 2 {
            let id = ItemId(item);
            prop_assert_eq!(indexed.flat_position_of_item(id), scanned.flat_position_of_item(id));
            prop_assert_eq!(indexed.visible_position_of_item(id), scanned.visible_position_of_item(id));
        }
    }
}
