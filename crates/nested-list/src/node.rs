//! Node identity and shape.
//!
//! Group ids and item ids live in independent namespaces: `GroupId(3)` and
//! `ItemId(3)` never refer to the same thing.

use std::fmt;

/// Identifier of a group node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub u32);

/// Identifier of an item (leaf) node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u32);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// The kind of a row, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    /// A group row.
    Group,
    /// An item row.
    Item,
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group => f.write_str("group"),
            Self::Item => f.write_str("item"),
        }
    }
}

/// What a node in the full sequence stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A group.
    Group {
        /// The group's id.
        id: GroupId,
    },
    /// An item owned by `group`.
    Item {
        /// The item's id.
        id: ItemId,
        /// The owning group.
        group: GroupId,
        /// Index among the owning group's items.
        child_position: usize,
    },
}

/// A node of the flattened tree.
///
/// Nodes are plain values rebuilt from scratch on every structural change;
/// `parent` is the index of the owning group inside the same sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    /// Group or item payload.
    pub kind: NodeKind,
    /// Index of the parent group in the full sequence, `None` for roots.
    pub parent: Option<usize>,
    /// Nesting depth; roots are at depth 0.
    pub depth: usize,
}

impl Node {
    pub(crate) fn group(id: GroupId, parent: Option<usize>, depth: usize) -> Self {
        Self {
            kind: NodeKind::Group { id },
            parent,
            depth,
        }
    }

    pub(crate) fn item(
        id: ItemId,
        group: GroupId,
        child_position: usize,
        parent: usize,
        depth: usize,
    ) -> Self {
        Self {
            kind: NodeKind::Item {
                id,
                group,
                child_position,
            },
            parent: Some(parent),
            depth,
        }
    }

    /// Returns the node's row kind.
    pub fn row_kind(&self) -> RowKind {
        match self.kind {
            NodeKind::Group { .. } => RowKind::Group,
            NodeKind::Item { .. } => RowKind::Item,
        }
    }

    /// Returns the group id if this is a group node.
    pub fn group_id(&self) -> Option<GroupId> {
        match self.kind {
            NodeKind::Group { id } => Some(id),
            NodeKind::Item { .. } => None,
        }
    }

    /// Returns the item id if this is an item node.
    pub fn item_id(&self) -> Option<ItemId> {
        match self.kind {
            NodeKind::Item { id, .. } => Some(id),
            NodeKind::Group { .. } => None,
        }
    }

    /// Returns `true` for root groups.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Converts the node into the row value handed to the UI layer.
    pub fn to_row(&self) -> Row {
        match self.kind {
            NodeKind::Group { id } => Row::Group(id),
            NodeKind::Item {
                id,
                group,
                child_position,
            } => Row::Item {
                group,
                child_position,
                id,
            },
        }
    }
}

/// A rendered row, as consumed by a list widget.
///
/// Renderers match on the variant to pick a row layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    /// A group header row.
    Group(GroupId),
    /// An item row.
    Item {
        /// The owning group.
        group: GroupId,
        /// Index among the owning group's items.
        child_position: usize,
        /// The item's id.
        id: ItemId,
    },
}

impl Row {
    /// Returns the row kind.
    pub fn kind(&self) -> RowKind {
        match self {
            Self::Group(_) => RowKind::Group,
            Self::Item { .. } => RowKind::Item,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_node() {
        let node = Node::group(GroupId(1), None, 0);
        assert_eq!(node.row_kind(), RowKind::Group);
        assert_eq!(node.group_id(), Some(GroupId(1)));
        assert_eq!(node.item_id(), None);
        assert!(node.is_root());
        assert_eq!(node.to_row(), Row::Group(GroupId(1)));
    }

    #[test]
    fn test_item_node() {
        let node = Node::item(ItemId(9), GroupId(2), 1, 4, 2);
        assert_eq!(node.row_kind(), RowKind::Item);
        assert_eq!(node.group_id(), None);
        assert_eq!(node.item_id(), Some(ItemId(9)));
        assert!(!node.is_root());
        assert_eq!(
            node.to_row(),
            Row::Item {
                group: GroupId(2),
                child_position: 1,
                id: ItemId(9),
            }
        );
        assert_eq!(node.to_row().kind(), RowKind::Item);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(GroupId(3).to_string(), "#3");
        assert_eq!(ItemId(3).to_string(), "@3");
        assert_eq!(RowKind::Group.to_string(), "group");
    }
}
