//! Drives a nested list over a small channel/member tree.
//!
//! Run with `RUST_LOG=nested_list=debug` to see rebuild logs.

use std::sync::Arc;

use nested_list::{GroupId, ItemId, ListDump, NestedList, Row, TreeSource};

const LOBBY: GroupId = GroupId(0);
const GAMES: GroupId = GroupId(1);
const RAID: GroupId = GroupId(2);
const AFK: GroupId = GroupId(3);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let channels = Arc::new(TreeSource::new());
    channels.add_root(LOBBY);
    channels.add_item(LOBBY, ItemId(100));
    channels.add_group(LOBBY, GAMES);
    channels.add_item(GAMES, ItemId(101));
    channels.add_item(GAMES, ItemId(102));
    channels.add_group(GAMES, RAID);
    channels.add_item(RAID, ItemId(103));
    channels.add_group(LOBBY, AFK);
    channels.set_default_expanded(GAMES, true);

    let mut list = NestedList::new(channels.clone())?;
    list.signals().group_activated.connect(|id| println!("activated channel {id}"));
    list.signals()
        .item_activated
        .connect(|(channel, position)| println!("activated member {position} of {channel}"));

    let dump = ListDump::new();
    println!("initial:\n{}", dump.visible(&list));

    list.expand_group(RAID);
    println!("raid expanded:\n{}", dump.visible(&list));

    // A member switches channel; the data side updates the tree and notifies.
    channels.move_item(ItemId(101), AFK);
    list.notify_structural_change()?;
    list.reveal_item(ItemId(101));
    println!("after move:\n{}", dump.visible(&list));

    for position in 0..list.size() {
        if let Row::Item { id: ItemId(101), .. } = list.row(position)? {
            list.on_row_activated(position)?;
        }
    }

    Ok(())
}
