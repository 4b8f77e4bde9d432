//! The reorder engine: translating a completed drop gesture into one atomic
//! position update.
//!
//! Every operation here is a synchronous, single-pass computation: resolve
//! the anchor, compute the straddling neighbors from the sorted view (with
//! the moving entity conceptually removed), ask the allocator for a key,
//! commit. All precondition failures return before any write, so a failed
//! reorder is indistinguishable from a cancelled drag.

use alloc::string::String;

use crate::allocator::{allocate, allocation_collides, spaced_key};
use crate::{Board, GroupId, ItemId, RelativePosition, ReorderError, SortKey};

impl<P> Board<P> {
    /// Moves `moving` to sit immediately before/after `anchor`.
    ///
    /// The anchor's group is the destination: anchoring on an item of a
    /// different group is exactly how cross-group moves happen (the item's
    /// `sort_key` and `group_id` are committed together).
    ///
    /// Dropping an item on itself is a no-op, as is a move that would leave
    /// the item where it already is (e.g. dragging it just past its own
    /// immediate neighbor) — neither consumes key precision.
    pub fn reorder_item(
        &mut self,
        moving: &ItemId,
        anchor: &ItemId,
        position: RelativePosition,
    ) -> Result<(), ReorderError> {
        if moving == anchor {
            rtrace!(item = %moving, "reorder_item: dropped on self, no-op");
            return Ok(());
        }

        let moving_item = self
            .item_by_id(moving)
            .ok_or_else(|| ReorderError::MovingItemNotFound {
                id: String::from(moving.as_str()),
            })?;
        let moving_group = moving_item.group_id.clone();
        let moving_key = moving_item.sort_key;

        let anchor_item = self
            .item_by_id(anchor)
            .ok_or_else(|| ReorderError::AnchorNotFound {
                id: String::from(anchor.as_str()),
            })?;
        let group = anchor_item.group_id.clone();

        // Sorted destination list with the moving item conceptually removed,
        // so it can never become its own neighbor.
        let mut list = self.sorted_item_ids(&group);
        list.retain(|id| id != moving);

        let anchor_index =
            list.iter()
                .position(|id| id == anchor)
                .ok_or_else(|| ReorderError::AnchorNotInGroup {
                    id: String::from(anchor.as_str()),
                    group: group.clone(),
                })?;

        let (prev_id, next_id) = straddle(&list, anchor_index, position);
        let prev_key = prev_id.and_then(|id| self.item_by_id(id)).map(|i| i.sort_key);
        let next_key = next_id.and_then(|id| self.item_by_id(id)).map(|i| i.sort_key);

        if moving_group == group && between(moving_key, prev_key, next_key) {
            rtrace!(item = %moving, "reorder_item: already in place, no-op");
            return Ok(());
        }

        // The anchor is always one of the neighbors, so allocation only
        // comes back empty for a conceptually empty destination; that case
        // gets the same key a brand-new group's first item would.
        let key = allocate(prev_key, next_key).unwrap_or(self.options().default_first_key);
        if allocation_collides(prev_key, next_key, key) {
            rwarn!(item = %moving, group = %group, key, "reorder_item: key exhausted");
            return Err(ReorderError::KeyExhausted { group: Some(group) });
        }

        rdebug!(item = %moving, anchor = %anchor, group = %group, key, "reorder_item");
        self.set_item_position(moving, key, &group)
    }

    /// [`Self::reorder_item`], but rebalances the destination group and
    /// retries once when key precision is exhausted.
    pub fn reorder_item_rebalanced(
        &mut self,
        moving: &ItemId,
        anchor: &ItemId,
        position: RelativePosition,
    ) -> Result<(), ReorderError> {
        match self.reorder_item(moving, anchor, position) {
            Err(ReorderError::KeyExhausted { group: Some(group) }) => {
                self.rebalance_group(&group)?;
                self.reorder_item(moving, anchor, position)
            }
            other => other,
        }
    }

    /// Moves `moving` before/after `anchor` in the groups list.
    ///
    /// Same algorithm as [`Self::reorder_item`] one level up; there is no
    /// membership to update, only the group's `sort_key`.
    pub fn reorder_group(
        &mut self,
        moving: &GroupId,
        anchor: &GroupId,
        position: RelativePosition,
    ) -> Result<(), ReorderError> {
        if moving == anchor {
            rtrace!(group = %moving, "reorder_group: dropped on self, no-op");
            return Ok(());
        }

        let moving_key = self
            .group_by_id(moving)
            .ok_or_else(|| ReorderError::MovingItemNotFound {
                id: String::from(moving.as_str()),
            })?
            .sort_key;
        if self.group_by_id(anchor).is_none() {
            return Err(ReorderError::AnchorNotFound {
                id: String::from(anchor.as_str()),
            });
        }

        let mut list = self.sorted_group_ids();
        list.retain(|id| id != moving);

        let anchor_index =
            list.iter()
                .position(|id| id == anchor)
                .ok_or_else(|| ReorderError::AnchorNotFound {
                    id: String::from(anchor.as_str()),
                })?;

        let (prev_id, next_id) = straddle(&list, anchor_index, position);
        let prev_key = prev_id.and_then(|id| self.group_by_id(id)).map(|g| g.sort_key);
        let next_key = next_id.and_then(|id| self.group_by_id(id)).map(|g| g.sort_key);

        if between(moving_key, prev_key, next_key) {
            rtrace!(group = %moving, "reorder_group: already in place, no-op");
            return Ok(());
        }

        let key = allocate(prev_key, next_key).unwrap_or(self.options().default_first_key);
        if allocation_collides(prev_key, next_key, key) {
            rwarn!(group = %moving, key, "reorder_group: key exhausted");
            return Err(ReorderError::KeyExhausted { group: None });
        }

        rdebug!(group = %moving, anchor = %anchor, key, "reorder_group");
        self.set_group_position(moving, key)
    }

    /// Moves `moving` into `target_group` when there is no item to anchor
    /// on.
    ///
    /// An empty destination gets the configured default first key. If the
    /// group turns out to hold items after all, the move lands before the
    /// first of them instead of stacking on a duplicate key.
    pub fn move_to_empty_group(
        &mut self,
        moving: &ItemId,
        target_group: &GroupId,
    ) -> Result<(), ReorderError> {
        if self.item_by_id(moving).is_none() {
            return Err(ReorderError::MovingItemNotFound {
                id: String::from(moving.as_str()),
            });
        }
        if self.group_by_id(target_group).is_none() {
            return Err(ReorderError::AnchorNotFound {
                id: String::from(target_group.as_str()),
            });
        }

        let mut list = self.sorted_item_ids(target_group);
        list.retain(|id| id != moving);

        match list.first() {
            Some(first) => {
                let first = first.clone();
                self.reorder_item(moving, &first, RelativePosition::Before)
            }
            None => {
                let key = self.options().default_first_key;
                rdebug!(item = %moving, group = %target_group, key, "move_to_empty_group");
                self.set_item_position(moving, key, target_group)
            }
        }
    }

    /// Renumbers the items of `group` to evenly spaced keys, preserving
    /// their current order.
    ///
    /// This restores allocation headroom after [`ReorderError::KeyExhausted`].
    /// The original implementation never compacts; long-lived lists under
    /// repeated boundary insertion need this pass.
    pub fn rebalance_group(&mut self, group: &GroupId) -> Result<(), ReorderError> {
        if self.group_by_id(group).is_none() {
            return Err(ReorderError::UnknownGroup {
                group: group.clone(),
            });
        }
        let list = self.sorted_item_ids(group);
        let step = self.options().seed_step;
        rdebug!(group = %group, items = list.len(), step, "rebalance_group");
        for (index, id) in list.iter().enumerate() {
            self.write_item_key(id, spaced_key(index, step));
        }
        Ok(())
    }

    /// Renumbers the groups list to evenly spaced keys, preserving order.
    pub fn rebalance_groups(&mut self) {
        let list = self.sorted_group_ids();
        let step = self.options().seed_step;
        rdebug!(groups = list.len(), step, "rebalance_groups");
        for (index, id) in list.iter().enumerate() {
            self.write_group_key(id, spaced_key(index, step));
        }
    }
}

/// Neighbors straddling the insertion point around `anchor_index`.
///
/// `Before` inserts between the anchor's predecessor and the anchor;
/// `After` between the anchor and its successor.
fn straddle<T>(
    list: &[T],
    anchor_index: usize,
    position: RelativePosition,
) -> (Option<&T>, Option<&T>) {
    match position {
        RelativePosition::Before => (
            anchor_index.checked_sub(1).and_then(|i| list.get(i)),
            list.get(anchor_index),
        ),
        RelativePosition::After => (list.get(anchor_index), list.get(anchor_index + 1)),
    }
}

/// Whether `key` already sits strictly inside the `(prev, next)` gap
/// (absent bounds are open).
fn between(key: SortKey, prev: Option<SortKey>, next: Option<SortKey>) -> bool {
    prev.is_none_or(|p| p < key) && next.is_none_or(|n| key < n)
}
