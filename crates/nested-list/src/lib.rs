//! Hierarchical-to-flat list engine.
//!
//! This crate renders a tree of groups (which own items and nested
//! subgroups) as a single scrollable list of rows, tracking which groups are
//! expanded and recomputing the visible rows whenever the tree or the
//! expansion state changes.
//!
//! # Core Types
//!
//! - [`GroupSource`]: the trait a data source implements to describe its tree
//! - [`TreeSource`]: an in-memory `GroupSource`
//! - [`NestedList`]: the facade a list widget queries by row position
//! - [`Row`]: a group or item row, matched on by renderers
//! - [`ListConfig`]: depth limit and lookup indexing
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ GroupSource │────>│  Flattener  │────>│ Visibility  │────>│ NestedList  │
//! │             │     │ (full seq.) │     │   Filter    │     │  (rows)     │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//!                                                ^                   │
//!                                                │  ┌─────────────┐  │
//!                                                └──│  Expansion  │<─┘
//!                                                   │    Store    │ expand/collapse
//!                                                   └─────────────┘
//! ```
//!
//! Structural changes re-run the flattener; expand/collapse only re-runs the
//! visibility filter.
//!
//! # Example
//!
//! ```
//! use nested_list::{GroupId, ItemId, NestedList, Row, TreeSource};
//!
//! let tree = TreeSource::new();
//! tree.add_root(GroupId(0));
//! tree.add_group(GroupId(0), GroupId(1));
//! tree.add_item(GroupId(1), ItemId(7));
//!
//! let mut list = NestedList::new(tree).unwrap();
//! list.expand_group(GroupId(1));
//!
//! for position in 0..list.size() {
//!     match list.row(position).unwrap() {
//!         Row::Group(id) => println!("group {id}"),
//!         Row::Item { id, .. } => println!("  item {id}"),
//!     }
//! }
//! ```

mod config;
mod dump;
mod error;
mod expansion;
mod flatten;
mod list;
mod lookup;
mod node;
mod source;
mod visibility;

pub use config::{DEFAULT_MAX_DEPTH, ListConfig};
pub use dump::{DumpStyle, ListDump};
pub use error::{Error, Result};
pub use expansion::ExpansionStore;
pub use flatten::{FullSequence, build_full};
pub use list::{ListSignals, NestedList};
pub use lookup::{PositionIndex, scan_group, scan_item, scan_visible};
pub use node::{GroupId, ItemId, Node, NodeKind, Row, RowKind};
pub use source::{GroupSource, TreeSource};
pub use visibility::{VisibleSequence, build_visible};

pub use nested_list_core::{ConnectionId, Signal};
