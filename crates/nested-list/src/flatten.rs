//! Flattening of a group tree into its full pre-order sequence.
//!
//! Each group is emitted first, followed by its items in source order, and
//! then by each of its subgroups (recursively) in source order. The walk
//! uses an explicit stack, so deep trees cannot exhaust the call stack, and
//! it stops with a structural error on cycles, repeated groups, or nesting
//! beyond the configured depth.

use std::collections::HashSet;

use nested_list_core::logging::targets;

use crate::error::{Error, Result};
use crate::node::{GroupId, ItemId, Node, NodeKind};
use crate::source::GroupSource;

/// The complete flattening of a tree, independent of expansion state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FullSequence {
    nodes: Vec<Node>,
    roots: Vec<GroupId>,
}

impl FullSequence {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if there are no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node at `index`.
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Iterates over the nodes in pre-order.
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// Returns the nodes as a slice.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Returns the root group ids in order.
    pub fn root_ids(&self) -> &[GroupId] {
        &self.roots
    }

    /// Iterates over every group id in pre-order.
    pub fn group_ids(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.nodes.iter().filter_map(Node::group_id)
    }

    /// Returns `true` if the group is part of this sequence.
    pub fn contains_group(&self, id: GroupId) -> bool {
        self.group_ids().any(|group| group == id)
    }

    /// Returns the number of nodes nested below the node at `index`.
    ///
    /// Items and unknown indices have no descendants.
    pub fn descendant_count(&self, index: usize) -> usize {
        let Some(node) = self.nodes.get(index) else {
            return 0;
        };
        self.nodes[index + 1..]
            .iter()
            .take_while(|next| next.depth > node.depth)
            .count()
    }
}

impl<'a> IntoIterator for &'a FullSequence {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

/// A group whose subgroups are still being walked.
struct Frame {
    id: GroupId,
    index: usize,
    depth: usize,
    next_subgroup: usize,
    subgroup_count: usize,
}

/// Emits a group and its items, returning the frame for walking its subgroups.
fn enter_group<S: GroupSource + ?Sized>(
    source: &S,
    nodes: &mut Vec<Node>,
    seen_items: &mut HashSet<ItemId>,
    id: GroupId,
    parent: Option<usize>,
    depth: usize,
) -> Result<Frame> {
    let index = nodes.len();
    nodes.push(Node::group(id, parent, depth));

    for position in 0..source.child_count(id) {
        match source.child_id(id, position) {
            Some(item) => {
                if !seen_items.insert(item) {
                    return Err(Error::DuplicateItem { item });
                }
                nodes.push(Node::item(item, id, position, index, depth + 1));
            }
            None => {
                tracing::trace!(target: targets::FLATTEN, group = %id, position, "item vanished during walk");
            }
        }
    }

    Ok(Frame {
        id,
        index,
        depth,
        next_subgroup: 0,
        subgroup_count: source.group_count(id),
    })
}

/// Flattens the tree described by `source` into its full pre-order sequence.
///
/// Runs in time linear in the number of nodes. Groups deeper than
/// `max_depth` (roots are depth 0) fail with [`Error::RecursionLimit`].
/// Group ids and item ids must each be unique across the whole tree.
pub fn build_full<S: GroupSource + ?Sized>(source: &S, max_depth: usize) -> Result<FullSequence> {
    let roots = source.root_ids();
    let mut nodes = Vec::new();
    let mut seen: HashSet<GroupId> = HashSet::new();
    let mut seen_items: HashSet<ItemId> = HashSet::new();
    let mut on_path: HashSet<GroupId> = HashSet::new();
    let mut stack: Vec<Frame> = Vec::new();

    for &root in &roots {
        if !seen.insert(root) {
            return Err(Error::DuplicateGroup { group: root });
        }
        on_path.insert(root);
        stack.push(enter_group(source, &mut nodes, &mut seen_items, root, None, 0)?);

        while let Some(frame) = stack.last_mut() {
            if frame.next_subgroup >= frame.subgroup_count {
                let finished = frame.id;
                stack.pop();
                on_path.remove(&finished);
                continue;
            }

            let position = frame.next_subgroup;
            frame.next_subgroup += 1;
            let (parent_id, parent_index, depth) = (frame.id, frame.index, frame.depth + 1);

            let Some(child) = source.group_id(parent_id, position) else {
                tracing::trace!(target: targets::FLATTEN, group = %parent_id, position, "subgroup vanished during walk");
                continue;
            };
            if depth > max_depth {
                return Err(Error::RecursionLimit {
                    group: child,
                    limit: max_depth,
                });
            }
            if on_path.contains(&child) {
                return Err(Error::Cycle { group: child });
            }
            if !seen.insert(child) {
                return Err(Error::DuplicateGroup { group: child });
            }

            on_path.insert(child);
            stack.push(enter_group(
                source,
                &mut nodes,
                &mut seen_items,
                child,
                Some(parent_index),
                depth,
            )?);
        }
    }

    tracing::debug!(
        target: targets::FLATTEN,
        roots = roots.len(),
        groups = seen.len(),
        nodes = nodes.len(),
        "flattened tree"
    );

    Ok(FullSequence { nodes, roots })
}

/// Returns `true` if `kind` is the group `id`.
pub(crate) fn is_group(kind: &NodeKind, id: GroupId) -> bool {
    matches!(kind, NodeKind::Group { id: group } if *group == id)
}
