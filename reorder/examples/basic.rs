// Example: seed a small board and move a card across groups.
use reorder::{Board, BoardOptions, Group, GroupId, Item, ItemId, RelativePosition, spaced_key};

fn print_board(board: &Board) {
    board.for_each_group_sorted(|group| {
        print!("{}:", group.id);
        board.for_each_item_in_group(&group.id, |item| print!(" {}", item.id));
        println!();
    });
}

fn main() {
    let mut board = Board::new(BoardOptions::new());
    for (g, gid) in ["todo", "doing"].into_iter().enumerate() {
        board
            .append_group(Group::new(gid, spaced_key(g, 10_000)))
            .unwrap();
    }
    for i in 0..3 {
        board
            .append_item(Item::new(format!("task{i}"), "todo", spaced_key(i, 10_000), ()))
            .unwrap();
    }

    println!("before:");
    print_board(&board);

    // Drag task0 into "doing" (no anchor there yet), then task2 above it.
    board
        .move_to_empty_group(&ItemId::from("task0"), &GroupId::from("doing"))
        .unwrap();
    board
        .reorder_item(
            &ItemId::from("task2"),
            &ItemId::from("task0"),
            RelativePosition::Before,
        )
        .unwrap();

    println!("after:");
    print_board(&board);
}
