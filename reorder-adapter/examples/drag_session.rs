// Example: a full simulated gesture, from pointer geometry to commit.
use reorder::{Board, BoardOptions, Group, Item, spaced_key};
use reorder_adapter::{Bounds, DragPayload, DragSession, DropTarget, Edge, Point, closest_edge};

fn main() {
    let mut board = Board::new(BoardOptions::new());
    board.append_group(Group::new("inbox", 10_000)).unwrap();
    for i in 0..3 {
        board
            .append_item(Item::new(
                format!("card{i}"),
                "inbox",
                spaced_key(i, 10_000),
                (),
            ))
            .unwrap();
    }

    let mut session = DragSession::new();
    session.begin(DragPayload::item("card2", "inbox"));

    // The UI reports card0's bounds and the pointer near its top edge.
    let bounds = Bounds::new(0, 0, 200, 48);
    let pointer = Point { x: 90, y: 6 };
    let edge = closest_edge(bounds, pointer, &[Edge::Top, Edge::Bottom]);
    session.hover([DropTarget::new(
        DragPayload::item("card0", "inbox"),
        edge,
        1,
    )]);

    let outcome = session.drop_on_board(&mut board).unwrap();
    println!("outcome: {outcome:?}");
    board.for_each_item_in_group(&reorder::GroupId::from("inbox"), |item| {
        println!("  {} ({})", item.id, item.sort_key)
    });
}
