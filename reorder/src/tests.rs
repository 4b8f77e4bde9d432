use crate::*;

use alloc::format;
use alloc::vec::Vec;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        let span = (end_exclusive - start) as u64;
        start + (self.next_u64() % span) as usize
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

fn seeded_board(groups: usize, items_per_group: usize) -> Board {
    let mut board = Board::new(BoardOptions::new());
    for g in 0..groups {
        let gid = GroupId::new(format!("g{g}"));
        board
            .append_group(Group::new(gid.clone(), spaced_key(g, 10_000)))
            .unwrap();
        for i in 0..items_per_group {
            board
                .append_item(Item::new(
                    format!("g{g}-i{i}"),
                    gid.clone(),
                    spaced_key(i, 10_000),
                    (),
                ))
                .unwrap();
        }
    }
    board
}

fn item_order(board: &Board, group: &GroupId) -> Vec<ItemId> {
    let mut out = Vec::new();
    board.collect_items_in_group(group, &mut out);
    out
}

fn assert_strict_item_order(board: &Board, group: &GroupId) {
    let mut prev: Option<SortKey> = None;
    board.for_each_item_in_group(group, |item| {
        if let Some(p) = prev {
            assert!(
                p < item.sort_key,
                "duplicate or inverted keys in {group}: {p} then {} ({})",
                item.sort_key,
                item.id
            );
        }
        prev = Some(item.sort_key);
    });
}

// ---------------------------------------------------------------------------
// allocator

#[test]
fn allocate_midpoint_rounds_half_up() {
    assert_eq!(allocate(Some(10), Some(20)), Some(15));
    assert_eq!(allocate(Some(10), Some(15)), Some(13));
    assert_eq!(allocate(Some(-20), Some(-5)), Some(-12));
}

#[test]
fn allocate_boundaries_halve_and_double() {
    assert_eq!(allocate(None, Some(10)), Some(5));
    assert_eq!(allocate(Some(10), None), Some(20));
    assert_eq!(allocate(None, None), None);
}

#[test]
fn allocate_survives_extreme_keys() {
    assert_eq!(allocate(Some(SortKey::MAX), None), Some(SortKey::MAX));
    assert_eq!(
        allocate(Some(SortKey::MAX - 1), Some(SortKey::MAX)),
        Some(SortKey::MAX)
    );
}

#[test]
fn allocation_collision_is_detectable() {
    // Gap of one: midpoint lands on the upper neighbor.
    let key = allocate(Some(10), Some(11)).unwrap();
    assert!(allocation_collides(Some(10), Some(11), key));

    // Halving bottoms out at zero.
    let key = allocate(None, Some(0)).unwrap();
    assert!(allocation_collides(None, Some(0), key));

    assert!(!allocation_collides(Some(10), Some(20), 15));
}

#[test]
fn spaced_keys_leave_room_below_the_first_entry() {
    assert_eq!(spaced_key(0, 10_000), 10_000);
    assert_eq!(spaced_key(2, 10_000), 30_000);
    // First entry is never 0, so a before-first insert still has headroom.
    assert!(allocate(None, Some(spaced_key(0, 10_000))) > Some(0));
}

// ---------------------------------------------------------------------------
// model

#[test]
fn views_are_sorted_by_key() {
    let mut board = Board::<()>::default();
    board.append_group(Group::new("b", 2000)).unwrap();
    board.append_group(Group::new("a", 1000)).unwrap();
    let gid = GroupId::from("a");
    board.append_item(Item::new("y", "a", 200, ())).unwrap();
    board.append_item(Item::new("x", "a", 100, ())).unwrap();

    let mut groups = Vec::new();
    board.collect_groups_sorted(&mut groups);
    assert_eq!(groups, [GroupId::from("a"), GroupId::from("b")]);
    assert_eq!(item_order(&board, &gid), [ItemId::from("x"), ItemId::from("y")]);
}

#[test]
fn views_recompute_after_mutation() {
    let mut board = seeded_board(1, 2);
    let gid = GroupId::from("g0");
    assert_eq!(
        item_order(&board, &gid),
        [ItemId::from("g0-i0"), ItemId::from("g0-i1")]
    );

    // Insert between the two existing keys; the memoized view must pick the
    // change up on the next read.
    board.append_item(Item::new("mid", "g0", 15_000, ())).unwrap();
    assert_eq!(
        item_order(&board, &gid),
        [
            ItemId::from("g0-i0"),
            ItemId::from("mid"),
            ItemId::from("g0-i1")
        ]
    );
}

#[test]
fn append_rejects_duplicates_and_unknown_groups() {
    let mut board = seeded_board(1, 1);
    assert!(matches!(
        board.append_group(Group::new("g0", 1)),
        Err(ReorderError::DuplicateId { .. })
    ));
    assert!(matches!(
        board.append_item(Item::new("g0-i0", "g0", 1, ())),
        Err(ReorderError::DuplicateId { .. })
    ));
    assert!(matches!(
        board.append_item(Item::new("new", "nope", 1, ())),
        Err(ReorderError::UnknownGroup { .. })
    ));
    assert_eq!(board.item_count(), 1);
}

#[test]
fn set_item_position_validates_both_ends() {
    let mut board = seeded_board(1, 1);
    assert!(matches!(
        board.set_item_position(&ItemId::from("nope"), 1, &GroupId::from("g0")),
        Err(ReorderError::MovingItemNotFound { .. })
    ));
    assert!(matches!(
        board.set_item_position(&ItemId::from("g0-i0"), 1, &GroupId::from("nope")),
        Err(ReorderError::UnknownGroup { .. })
    ));
    // Failed writes must not have touched the item.
    let item = board.item_by_id(&ItemId::from("g0-i0")).unwrap();
    assert_eq!(item.sort_key, 10_000);
    assert_eq!(item.group_id, GroupId::from("g0"));
}

#[test]
fn snapshot_round_trips_losslessly() {
    let mut board = seeded_board(2, 3);
    board
        .reorder_item(
            &ItemId::from("g0-i2"),
            &ItemId::from("g1-i0"),
            RelativePosition::After,
        )
        .unwrap();

    let snapshot = board.export_snapshot();
    let restored = Board::from_snapshot(BoardOptions::new(), snapshot.clone()).unwrap();

    assert_eq!(restored.export_snapshot(), snapshot);
    for gid in [GroupId::from("g0"), GroupId::from("g1")] {
        assert_eq!(item_order(&restored, &gid), item_order(&board, &gid));
    }
}

#[test]
fn snapshot_with_dangling_group_is_rejected() {
    let snapshot = BoardSnapshot {
        groups: alloc::vec![Group::new("g0", 10_000)],
        items: alloc::vec![Item::new("a", "gone", 10_000, ())],
    };
    assert!(matches!(
        Board::from_snapshot(BoardOptions::new(), snapshot),
        Err(ReorderError::UnknownGroup { .. })
    ));
}

// ---------------------------------------------------------------------------
// engine: items

#[test]
fn reorder_within_group_before_and_after() {
    let mut board = seeded_board(1, 3);
    let gid = GroupId::from("g0");

    // i2 before i1 -> i0, i2, i1
    board
        .reorder_item(
            &ItemId::from("g0-i2"),
            &ItemId::from("g0-i1"),
            RelativePosition::Before,
        )
        .unwrap();
    assert_eq!(
        item_order(&board, &gid),
        [
            ItemId::from("g0-i0"),
            ItemId::from("g0-i2"),
            ItemId::from("g0-i1")
        ]
    );

    // i0 after i1 -> i2, i1, i0
    board
        .reorder_item(
            &ItemId::from("g0-i0"),
            &ItemId::from("g0-i1"),
            RelativePosition::After,
        )
        .unwrap();
    assert_eq!(
        item_order(&board, &gid),
        [
            ItemId::from("g0-i2"),
            ItemId::from("g0-i1"),
            ItemId::from("g0-i0")
        ]
    );
    assert_strict_item_order(&board, &gid);
}

#[test]
fn boundary_insertion_halves_and_doubles() {
    let mut board = Board::<()>::default();
    board.append_group(Group::new("g", 10_000)).unwrap();
    board.append_group(Group::new("src", 20_000)).unwrap();
    for (id, key) in [("a", 1000), ("b", 2000), ("c", 3000)] {
        board.append_item(Item::new(id, "g", key, ())).unwrap();
    }
    board.append_item(Item::new("x", "src", 1000, ())).unwrap();

    board
        .reorder_item(&ItemId::from("x"), &ItemId::from("a"), RelativePosition::Before)
        .unwrap();
    assert_eq!(board.item_by_id(&ItemId::from("x")).unwrap().sort_key, 500);

    board
        .reorder_item(&ItemId::from("x"), &ItemId::from("c"), RelativePosition::After)
        .unwrap();
    assert_eq!(board.item_by_id(&ItemId::from("x")).unwrap().sort_key, 6000);
}

#[test]
fn cross_group_move_updates_membership() {
    let mut board = seeded_board(2, 2);
    let moving = ItemId::from("g0-i0");
    let anchor = ItemId::from("g1-i0");

    board
        .reorder_item(&moving, &anchor, RelativePosition::After)
        .unwrap();

    let item = board.item_by_id(&moving).unwrap();
    assert_eq!(item.group_id, GroupId::from("g1"));
    assert!(!item_order(&board, &GroupId::from("g0")).contains(&moving));
    assert_eq!(
        item_order(&board, &GroupId::from("g1")),
        [
            ItemId::from("g1-i0"),
            moving.clone(),
            ItemId::from("g1-i1")
        ]
    );
}

#[test]
fn drop_on_self_is_a_no_op() {
    let mut board = seeded_board(1, 3);
    let before = board.export_snapshot();
    let id = ItemId::from("g0-i1");
    board
        .reorder_item(&id, &id, RelativePosition::Before)
        .unwrap();
    assert_eq!(board.export_snapshot(), before);
}

#[test]
fn moving_after_own_predecessor_is_a_no_op() {
    let mut board = seeded_board(1, 3);
    let before = board.export_snapshot();

    // i1 "after" i0 leaves the order as-is and must not burn precision.
    board
        .reorder_item(
            &ItemId::from("g0-i1"),
            &ItemId::from("g0-i0"),
            RelativePosition::After,
        )
        .unwrap();
    assert_eq!(board.export_snapshot(), before);

    // Same for "before" the own successor.
    board
        .reorder_item(
            &ItemId::from("g0-i1"),
            &ItemId::from("g0-i2"),
            RelativePosition::Before,
        )
        .unwrap();
    assert_eq!(board.export_snapshot(), before);
}

#[test]
fn reorder_reports_unknown_ids() {
    let mut board = seeded_board(1, 2);
    assert!(matches!(
        board.reorder_item(
            &ItemId::from("nope"),
            &ItemId::from("g0-i0"),
            RelativePosition::Before
        ),
        Err(ReorderError::MovingItemNotFound { .. })
    ));
    assert!(matches!(
        board.reorder_item(
            &ItemId::from("g0-i0"),
            &ItemId::from("nope"),
            RelativePosition::Before
        ),
        Err(ReorderError::AnchorNotFound { .. })
    ));
}

#[test]
fn move_to_empty_group_uses_the_default_first_key() {
    let mut board = seeded_board(1, 2);
    board.append_group(Group::new("empty", 99_000)).unwrap();

    let moving = ItemId::from("g0-i1");
    let target = GroupId::from("empty");
    board.move_to_empty_group(&moving, &target).unwrap();

    let item = board.item_by_id(&moving).unwrap();
    assert_eq!(item.group_id, target);
    assert_eq!(item.sort_key, board.options().default_first_key);
    assert_eq!(item_order(&board, &target), [moving]);
}

#[test]
fn move_to_populated_group_lands_before_the_first_item() {
    let mut board = seeded_board(2, 2);
    let moving = ItemId::from("g0-i0");
    let target = GroupId::from("g1");

    board.move_to_empty_group(&moving, &target).unwrap();

    assert_eq!(
        item_order(&board, &target),
        [
            moving.clone(),
            ItemId::from("g1-i0"),
            ItemId::from("g1-i1")
        ]
    );
    assert_strict_item_order(&board, &target);
}

#[test]
fn move_to_empty_group_validates_ids() {
    let mut board = seeded_board(1, 1);
    assert!(matches!(
        board.move_to_empty_group(&ItemId::from("nope"), &GroupId::from("g0")),
        Err(ReorderError::MovingItemNotFound { .. })
    ));
    assert!(matches!(
        board.move_to_empty_group(&ItemId::from("g0-i0"), &GroupId::from("nope")),
        Err(ReorderError::AnchorNotFound { .. })
    ));
}

// ---------------------------------------------------------------------------
// engine: exhaustion + rebalance

#[test]
fn repeated_boundary_insertion_exhausts_keys() {
    let mut board = seeded_board(1, 20);
    let gid = GroupId::from("g0");

    let mut exhausted = false;
    for _ in 0..64 {
        let order = item_order(&board, &gid);
        let first = order.first().unwrap().clone();
        let last = order.last().unwrap().clone();
        match board.reorder_item(&last, &first, RelativePosition::Before) {
            Ok(()) => assert_strict_item_order(&board, &gid),
            Err(ReorderError::KeyExhausted { group }) => {
                assert_eq!(group, Some(gid.clone()));
                exhausted = true;
                break;
            }
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
    assert!(exhausted, "halving never bottomed out");

    // The failed move wrote nothing; the order is still strict.
    assert_strict_item_order(&board, &gid);

    // A rebalance restores headroom and the same move now succeeds.
    let before = item_order(&board, &gid);
    board.rebalance_group(&gid).unwrap();
    assert_eq!(item_order(&board, &gid), before);
    board
        .for_each_item_in_group(&gid, |item| assert_eq!(item.sort_key % 10_000, 0));

    let first = before.first().unwrap().clone();
    let last = before.last().unwrap().clone();
    board
        .reorder_item(&last, &first, RelativePosition::Before)
        .unwrap();
}

#[test]
fn reorder_item_rebalanced_recovers_transparently() {
    let mut board = seeded_board(1, 8);
    let gid = GroupId::from("g0");

    for _ in 0..64 {
        let order = item_order(&board, &gid);
        let first = order.first().unwrap().clone();
        let last = order.last().unwrap().clone();
        board
            .reorder_item_rebalanced(&last, &first, RelativePosition::Before)
            .unwrap();
        assert_strict_item_order(&board, &gid);
    }
}

#[test]
fn rebalance_group_requires_a_known_group() {
    let mut board = seeded_board(1, 1);
    assert!(matches!(
        board.rebalance_group(&GroupId::from("nope")),
        Err(ReorderError::UnknownGroup { .. })
    ));
}

// ---------------------------------------------------------------------------
// engine: groups

#[test]
fn reorder_groups_before_and_after() {
    let mut board = seeded_board(3, 0);
    let mut order = Vec::new();

    board
        .reorder_group(
            &GroupId::from("g2"),
            &GroupId::from("g0"),
            RelativePosition::Before,
        )
        .unwrap();
    board.collect_groups_sorted(&mut order);
    assert_eq!(
        order,
        [GroupId::from("g2"), GroupId::from("g0"), GroupId::from("g1")]
    );

    board
        .reorder_group(
            &GroupId::from("g2"),
            &GroupId::from("g1"),
            RelativePosition::After,
        )
        .unwrap();
    board.collect_groups_sorted(&mut order);
    assert_eq!(
        order,
        [GroupId::from("g0"), GroupId::from("g1"), GroupId::from("g2")]
    );
}

#[test]
fn group_reordering_can_exhaust_and_rebalance() {
    let mut board = seeded_board(4, 0);

    let mut exhausted = false;
    let mut order = Vec::new();
    for _ in 0..64 {
        board.collect_groups_sorted(&mut order);
        let first = order.first().unwrap().clone();
        let last = order.last().unwrap().clone();
        match board.reorder_group(&last, &first, RelativePosition::Before) {
            Ok(()) => {}
            Err(ReorderError::KeyExhausted { group }) => {
                assert_eq!(group, None);
                exhausted = true;
                break;
            }
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
    assert!(exhausted);

    board.rebalance_groups();
    board.collect_groups_sorted(&mut order);
    let first = order.first().unwrap().clone();
    let last = order.last().unwrap().clone();
    board
        .reorder_group(&last, &first, RelativePosition::Before)
        .unwrap();
}

#[test]
fn group_drop_on_self_is_a_no_op() {
    let mut board = seeded_board(2, 0);
    let before = board.export_snapshot();
    let id = GroupId::from("g0");
    board
        .reorder_group(&id, &id, RelativePosition::After)
        .unwrap();
    assert_eq!(board.export_snapshot(), before);
}

// ---------------------------------------------------------------------------
// randomized

#[test]
fn random_reorders_preserve_a_strict_total_order() {
    let mut rng = Lcg::new(0x5eed);
    let groups = 3usize;
    let items_per_group = 8usize;
    let mut board = seeded_board(groups, items_per_group);

    let mut all_items = Vec::new();
    for g in 0..groups {
        for i in 0..items_per_group {
            all_items.push(ItemId::from(format!("g{g}-i{i}").as_str()));
        }
    }

    for _ in 0..500 {
        let moving = all_items[rng.gen_range_usize(0, all_items.len())].clone();
        let anchor = all_items[rng.gen_range_usize(0, all_items.len())].clone();
        let position = if rng.gen_bool() {
            RelativePosition::Before
        } else {
            RelativePosition::After
        };

        board
            .reorder_item_rebalanced(&moving, &anchor, position)
            .unwrap();

        let mut seen = 0usize;
        for g in 0..groups {
            let gid = GroupId::from(format!("g{g}").as_str());
            assert_strict_item_order(&board, &gid);
            board.for_each_item_in_group(&gid, |item| {
                assert_eq!(item.group_id, gid);
                seen += 1;
            });
        }
        assert_eq!(seen, all_items.len());
    }
}
