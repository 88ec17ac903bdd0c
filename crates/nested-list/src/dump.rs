//! Text dumps of a list's rows for logging and diagnostics.
//!
//! ```
//! use nested_list::{DumpStyle, GroupId, ItemId, ListDump, NestedList, TreeSource};
//!
//! let tree = TreeSource::new();
//! tree.add_root(GroupId(1));
//! tree.add_item(GroupId(1), ItemId(1));
//! tree.add_group(GroupId(1), GroupId(2));
//!
//! let list = NestedList::new(tree).unwrap();
//! let text = ListDump::new().with_style(DumpStyle::Compact).visible(&list);
//! assert_eq!(text, "[-#1 @1 +#2]");
//! ```

use std::fmt::Write as FmtWrite;

use crate::list::NestedList;
use crate::node::{Node, NodeKind};
use crate::source::GroupSource;

/// Layout of a dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DumpStyle {
    /// One row per line, indented by depth.
    #[default]
    Indented,
    /// All rows on a single line.
    Compact,
}

/// Renders the rows of a [`NestedList`] as text.
///
/// Groups are prefixed with `-` when expanded and `+` when collapsed.
#[derive(Debug, Clone)]
pub struct ListDump {
    style: DumpStyle,
    indent_size: usize,
}

impl Default for ListDump {
    fn default() -> Self {
        Self {
            style: DumpStyle::default(),
            indent_size: 2,
        }
    }
}

impl ListDump {
    /// Creates a dumper with the indented style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the style.
    pub fn with_style(mut self, style: DumpStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the number of spaces per depth level in the indented style.
    pub fn with_indent_size(mut self, indent_size: usize) -> Self {
        self.indent_size = indent_size;
        self
    }

    /// Renders the visible rows.
    pub fn visible<S: GroupSource>(&self, list: &NestedList<S>) -> String {
        let nodes = list.visible().iter().filter_map(|index| list.full().get(index));
        self.render(list, nodes)
    }

    /// Renders every node, hidden or not.
    pub fn full<S: GroupSource>(&self, list: &NestedList<S>) -> String {
        self.render(list, list.full().iter())
    }

    fn render<'a, S: GroupSource>(
        &self,
        list: &NestedList<S>,
        nodes: impl Iterator<Item = &'a Node>,
    ) -> String {
        let labels = nodes.map(|node| (node.depth, Self::label(list, node)));
        match self.style {
            DumpStyle::Compact => {
                let parts: Vec<String> = labels.map(|(_, label)| label).collect();
                format!("[{}]", parts.join(" "))
            }
            DumpStyle::Indented => {
                let mut output = String::new();
                for (depth, label) in labels {
                    let indent = " ".repeat(depth * self.indent_size);
                    let _ = writeln!(output, "{indent}{label}");
                }
                output
            }
        }
    }

    fn label<S: GroupSource>(list: &NestedList<S>, node: &Node) -> String {
        match node.kind {
            NodeKind::Group { id } => {
                let marker = if list.is_group_expanded(id) { '-' } else { '+' };
                format!("{marker}{id}")
            }
            NodeKind::Item { id, .. } => id.to_string(),
        }
    }
}
