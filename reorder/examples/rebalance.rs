// Example: exhaust key precision at a boundary, then rebalance.
use reorder::{Board, BoardOptions, Group, GroupId, Item, RelativePosition, ReorderError, spaced_key};

fn main() {
    let mut board = Board::new(BoardOptions::new());
    board.append_group(Group::new("g", 10_000)).unwrap();
    for i in 0..16 {
        board
            .append_item(Item::new(format!("i{i}"), "g", spaced_key(i, 10_000), ()))
            .unwrap();
    }

    let gid = GroupId::from("g");
    let mut order = Vec::new();
    for round in 0.. {
        board.collect_items_in_group(&gid, &mut order);
        let first = order.first().unwrap().clone();
        let last = order.last().unwrap().clone();
        match board.reorder_item(&last, &first, RelativePosition::Before) {
            Ok(()) => {}
            Err(ReorderError::KeyExhausted { group }) => {
                println!("exhausted after {round} boundary inserts (group {group:?})");
                break;
            }
            Err(other) => panic!("{other}"),
        }
    }

    board.rebalance_group(&gid).unwrap();
    println!("rebalanced keys:");
    board.for_each_item_in_group(&gid, |item| println!("  {} -> {}", item.id, item.sort_key));
}
