//! Data sources that supply the tree to be flattened.
//!
//! The engine never owns the tree itself. It asks a [`GroupSource`] for root
//! groups, subgroups, and items every time the structure is rebuilt.
//! [`TreeSource`] is a ready-made in-memory implementation.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::node::{GroupId, ItemId};

/// The capability set the engine consumes to walk a tree of groups.
///
/// Implementations must describe an acyclic tree; the flattener reports a
/// structural error if they do not. Index-based lookups may return `None`
/// when the index is past the end, in which case that child is skipped.
pub trait GroupSource {
    /// Returns the root groups in display order.
    fn root_ids(&self) -> Vec<GroupId>;

    /// Returns the number of direct subgroups of `group`.
    fn group_count(&self, group: GroupId) -> usize;

    /// Returns the subgroup of `parent` at `index`.
    fn group_id(&self, parent: GroupId, index: usize) -> Option<GroupId>;

    /// Returns the number of items directly owned by `group`.
    fn child_count(&self, group: GroupId) -> usize;

    /// Returns the item of `group` at `index`.
    fn child_id(&self, group: GroupId, index: usize) -> Option<ItemId>;

    /// Whether `group` starts expanded when the user has not chosen yet.
    fn default_expanded(&self, group: GroupId) -> bool;
}

impl<S: GroupSource + ?Sized> GroupSource for &S {
    fn root_ids(&self) -> Vec<GroupId> {
        (**self).root_ids()
    }

    fn group_count(&self, group: GroupId) -> usize {
        (**self).group_count(group)
    }

    fn group_id(&self, parent: GroupId, index: usize) -> Option<GroupId> {
        (**self).group_id(parent, index)
    }

    fn child_count(&self, group: GroupId) -> usize {
        (**self).child_count(group)
    }

    fn child_id(&self, group: GroupId, index: usize) -> Option<ItemId> {
        (**self).child_id(group, index)
    }

    fn default_expanded(&self, group: GroupId) -> bool {
        (**self).default_expanded(group)
    }
}

impl<S: GroupSource + ?Sized> GroupSource for Arc<S> {
    fn root_ids(&self) -> Vec<GroupId> {
        (**self).root_ids()
    }

    fn group_count(&self, group: GroupId) -> usize {
        (**self).group_count(group)
    }

    fn group_id(&self, parent: GroupId, index: usize) -> Option<GroupId> {
        (**self).group_id(parent, index)
    }

    fn child_count(&self, group: GroupId) -> usize {
        (**self).child_count(group)
    }

    fn child_id(&self, group: GroupId, index: usize) -> Option<ItemId> {
        (**self).child_id(group, index)
    }

    fn default_expanded(&self, group: GroupId) -> bool {
        (**self).default_expanded(group)
    }
}

/// A group entry in the tree storage.
struct GroupEntry {
    parent: Option<GroupId>,
    subgroups: Vec<GroupId>,
    items: Vec<ItemId>,
    default_expanded: bool,
}

impl GroupEntry {
    fn new(parent: Option<GroupId>) -> Self {
        Self {
            parent,
            subgroups: Vec::new(),
            items: Vec::new(),
            default_expanded: false,
        }
    }
}

/// Internal storage for groups and items.
#[derive(Default)]
struct TreeStorage {
    groups: HashMap<GroupId, GroupEntry>,
    roots: Vec<GroupId>,
    item_owner: HashMap<ItemId, GroupId>,
}

impl TreeStorage {
    fn insert_group(&mut self, parent: Option<GroupId>, id: GroupId) -> bool {
        if self.groups.contains_key(&id) {
            return false;
        }
        match parent {
            None => self.roots.push(id),
            Some(parent_id) => match self.groups.get_mut(&parent_id) {
                Some(parent) => parent.subgroups.push(id),
                None => return false,
            },
        }
        self.groups.insert(id, GroupEntry::new(parent));
        true
    }

    fn remove_subtree(&mut self, id: GroupId) {
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(entry) = self.groups.remove(&current) {
                for item in entry.items {
                    self.item_owner.remove(&item);
                }
                pending.extend(entry.subgroups);
            }
        }
    }

    fn detach_item(&mut self, item: ItemId) -> Option<GroupId> {
        let owner = self.item_owner.remove(&item)?;
        if let Some(entry) = self.groups.get_mut(&owner) {
            entry.items.retain(|&existing| existing != item);
        }
        Some(owner)
    }
}

/// An in-memory tree of groups and items.
///
/// Ids are chosen by the caller. Mutating methods take `&self`, so a
/// `TreeSource` can be shared through an `Arc` between the code that receives
/// updates and the list that displays them; the list must be told about
/// changes with [`NestedList::notify_structural_change`].
///
/// [`NestedList::notify_structural_change`]: crate::NestedList::notify_structural_change
///
/// # Example
///
/// ```
/// use nested_list::{GroupId, ItemId, TreeSource};
///
/// let tree = TreeSource::new();
/// tree.add_root(GroupId(0));
/// tree.add_item(GroupId(0), ItemId(10));
/// tree.add_group(GroupId(0), GroupId(1));
/// tree.add_item(GroupId(1), ItemId(11));
///
/// assert_eq!(tree.group_len(), 2);
/// assert_eq!(tree.item_len(), 2);
/// ```
#[derive(Default)]
pub struct TreeSource {
    storage: RwLock<TreeStorage>,
}

impl TreeSource {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a root group.
    ///
    /// Returns `false` if a group with this id already exists.
    pub fn add_root(&self, id: GroupId) -> bool {
        self.storage.write().insert_group(None, id)
    }

    /// Adds a subgroup as the last child of `parent`.
    ///
    /// Returns `false` if `parent` doesn't exist or `id` is already taken.
    pub fn add_group(&self, parent: GroupId, id: GroupId) -> bool {
        self.storage.write().insert_group(Some(parent), id)
    }

    /// Appends an item to `group`.
    ///
    /// Returns `false` if the group doesn't exist or the item already
    /// belongs to a group.
    pub fn add_item(&self, group: GroupId, item: ItemId) -> bool {
        let mut storage = self.storage.write();
        if storage.item_owner.contains_key(&item) {
            return false;
        }
        let Some(entry) = storage.groups.get_mut(&group) else {
            return false;
        };
        entry.items.push(item);
        storage.item_owner.insert(item, group);
        true
    }

    /// Moves an item to the end of another group's item list.
    ///
    /// Returns `false` if the item or the target group doesn't exist.
    pub fn move_item(&self, item: ItemId, to: GroupId) -> bool {
        let mut storage = self.storage.write();
        if !storage.groups.contains_key(&to) || !storage.item_owner.contains_key(&item) {
            return false;
        }
        storage.detach_item(item);
        if let Some(entry) = storage.groups.get_mut(&to) {
            entry.items.push(item);
        }
        storage.item_owner.insert(item, to);
        true
    }

    /// Removes a group together with all of its subgroups and items.
    ///
    /// Returns `false` if the group doesn't exist.
    pub fn remove_group(&self, id: GroupId) -> bool {
        let mut storage = self.storage.write();
        let Some(parent) = storage.groups.get(&id).map(|entry| entry.parent) else {
            return false;
        };
        match parent {
            None => storage.roots.retain(|&root| root != id),
            Some(parent_id) => {
                if let Some(parent) = storage.groups.get_mut(&parent_id) {
                    parent.subgroups.retain(|&child| child != id);
                }
            }
        }
        storage.remove_subtree(id);
        true
    }

    /// Removes an item.
    ///
    /// Returns the group that owned it, or `None` if the item doesn't exist.
    pub fn remove_item(&self, item: ItemId) -> Option<GroupId> {
        self.storage.write().detach_item(item)
    }

    /// Sets whether a group starts expanded.
    ///
    /// Returns `false` if the group doesn't exist.
    pub fn set_default_expanded(&self, id: GroupId, expanded: bool) -> bool {
        match self.storage.write().groups.get_mut(&id) {
            Some(entry) => {
                entry.default_expanded = expanded;
                true
            }
            None => false,
        }
    }

    /// Removes every group and item.
    pub fn clear(&self) {
        let mut storage = self.storage.write();
        storage.groups.clear();
        storage.roots.clear();
        storage.item_owner.clear();
    }

    /// Returns `true` if the group exists.
    pub fn contains_group(&self, id: GroupId) -> bool {
        self.storage.read().groups.contains_key(&id)
    }

    /// Returns the group owning `item`, if any.
    pub fn owner_of(&self, item: ItemId) -> Option<GroupId> {
        self.storage.read().item_owner.get(&item).copied()
    }

    /// Returns the parent of a group, `None` for roots and unknown groups.
    pub fn parent_of(&self, id: GroupId) -> Option<GroupId> {
        self.storage.read().groups.get(&id).and_then(|entry| entry.parent)
    }

    /// Returns the total number of groups.
    pub fn group_len(&self) -> usize {
        self.storage.read().groups.len()
    }

    /// Returns the total number of items.
    pub fn item_len(&self) -> usize {
        self.storage.read().item_owner.len()
    }

    /// Returns `true` if the tree has no groups.
    pub fn is_empty(&self) -> bool {
        self.storage.read().groups.is_empty()
    }
}

impl GroupSource for TreeSource {
    fn root_ids(&self) -> Vec<GroupId> {
        self.storage.read().roots.clone()
    }

    fn group_count(&self, group: GroupId) -> usize {
        self.storage
            .read()
            .groups
            .get(&group)
            .map(|entry| entry.subgroups.len())
            .unwrap_or(0)
    }

    fn group_id(&self, parent: GroupId, index: usize) -> Option<GroupId> {
        self.storage
            .read()
            .groups
            .get(&parent)
            .and_then(|entry| entry.subgroups.get(index).copied())
    }

    fn child_count(&self, group: GroupId) -> usize {
        self.storage
            .read()
            .groups
            .get(&group)
            .map(|entry| entry.items.len())
            .unwrap_or(0)
    }

    fn child_id(&self, group: GroupId, index: usize) -> Option<ItemId> {
        self.storage
            .read()
            .groups
            .get(&group)
            .and_then(|entry| entry.items.get(index).copied())
    }

    fn default_expanded(&self, group: GroupId) -> bool {
        self.storage
            .read()
            .groups
            .get(&group)
            .is_some_and(|entry| entry.default_expanded)
    }
}

static_assertions::assert_impl_all!(TreeSource: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeSource {
        let tree = TreeSource::new();
        assert!(tree.add_root(GroupId(1)));
        assert!(tree.add_item(GroupId(1), ItemId(1)));
        assert!(tree.add_item(GroupId(1), ItemId(2)));
        assert!(tree.add_group(GroupId(1), GroupId(2)));
        assert!(tree.add_item(GroupId(2), ItemId(3)));
        tree
    }

    #[test]
    fn test_tree_source_basic() {
        let tree = sample();

        assert_eq!(tree.root_ids(), vec![GroupId(1)]);
        assert_eq!(tree.group_count(GroupId(1)), 1);
        assert_eq!(tree.group_id(GroupId(1), 0), Some(GroupId(2)));
        assert_eq!(tree.group_id(GroupId(1), 1), None);
        assert_eq!(tree.child_count(GroupId(1)), 2);
        assert_eq!(tree.child_id(GroupId(1), 1), Some(ItemId(2)));
        assert_eq!(tree.child_count(GroupId(2)), 1);
        assert_eq!(tree.parent_of(GroupId(2)), Some(GroupId(1)));
        assert_eq!(tree.owner_of(ItemId(3)), Some(GroupId(2)));
    }

    #[test]
    fn test_tree_source_rejects_duplicates() {
        let tree = sample();

        assert!(!tree.add_root(GroupId(2)));
        assert!(!tree.add_group(GroupId(1), GroupId(1)));
        assert!(!tree.add_group(GroupId(99), GroupId(5)));
        assert!(!tree.add_item(GroupId(2), ItemId(1)));
        assert!(!tree.add_item(GroupId(99), ItemId(50)));
        assert_eq!(tree.group_len(), 2);
        assert_eq!(tree.item_len(), 3);
    }

    #[test]
    fn test_tree_source_remove_group_subtree() {
        let tree = sample();
        assert!(tree.add_group(GroupId(2), GroupId(3)));
        assert!(tree.add_item(GroupId(3), ItemId(4)));

        assert!(tree.remove_group(GroupId(2)));
        assert!(!tree.remove_group(GroupId(2)));
        assert!(!tree.contains_group(GroupId(3)));
        assert_eq!(tree.group_count(GroupId(1)), 0);
        assert_eq!(tree.owner_of(ItemId(4)), None);
        assert_eq!(tree.item_len(), 2);

        assert!(tree.remove_group(GroupId(1)));
        assert!(tree.is_empty());
        assert!(tree.root_ids().is_empty());
    }

    #[test]
    fn test_tree_source_move_and_remove_item() {
        let tree = sample();

        assert!(tree.move_item(ItemId(1), GroupId(2)));
        assert_eq!(tree.child_count(GroupId(1)), 1);
        assert_eq!(tree.child_id(GroupId(2), 1), Some(ItemId(1)));
        assert!(!tree.move_item(ItemId(1), GroupId(42)));
        assert!(!tree.move_item(ItemId(77), GroupId(1)));

        assert_eq!(tree.remove_item(ItemId(1)), Some(GroupId(2)));
        assert_eq!(tree.remove_item(ItemId(1)), None);
        assert_eq!(tree.child_count(GroupId(2)), 1);
    }

    #[test]
    fn test_tree_source_default_expanded() {
        let tree = sample();

        assert!(!tree.default_expanded(GroupId(2)));
        assert!(tree.set_default_expanded(GroupId(2), true));
        assert!(tree.default_expanded(GroupId(2)));
        assert!(!tree.set_default_expanded(GroupId(9), true));
        assert!(!tree.default_expanded(GroupId(9)));
    }

    #[test]
    fn test_tree_source_clear() {
        let tree = sample();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.item_len(), 0);
    }

    #[test]
    fn test_shared_source_through_arc() {
        let tree = Arc::new(sample());
        let shared: Arc<TreeSource> = tree.clone();

        tree.add_item(GroupId(2), ItemId(8));
        assert_eq!(shared.child_count(GroupId(2)), 2);
        assert_eq!((&*shared).root_ids(), vec![GroupId(1)]);
    }
}
