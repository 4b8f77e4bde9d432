use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, Ref, RefCell};

use crate::types::IdMap;
use crate::{Group, GroupId, Item, ItemId, ReorderError, SortKey};

/// Configuration for [`Board`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardOptions {
    /// Key assigned to the first item of an otherwise empty group
    /// (used by `move_to_empty_group` and as the allocator's fallback).
    pub default_first_key: SortKey,
    /// Spacing between keys when seeding or rebalancing a list
    /// (entry `i` gets `(i + 1) * seed_step`).
    pub seed_step: SortKey,
}

impl BoardOptions {
    pub fn new() -> Self {
        Self {
            default_first_key: 10_000,
            seed_step: 10_000,
        }
    }

    pub fn with_default_first_key(mut self, default_first_key: SortKey) -> Self {
        self.default_first_key = default_first_key;
        self
    }

    pub fn with_seed_step(mut self, seed_step: SortKey) -> Self {
        self.seed_step = seed_step;
        self
    }
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Memoized sorted projections of the board.
///
/// These are derived data only: the authoritative order is always the
/// `sort_key` fields on groups/items. Ties (which only exist transiently)
/// are broken by id so the projection stays deterministic.
#[derive(Clone, Debug, Default)]
struct Views {
    groups_sorted: Vec<GroupId>,
    items_by_group: IdMap<GroupId, Vec<ItemId>>,
}

/// A serializable dump of a board's contents.
///
/// Round-trips `{id, group_id, sort_key, payload}` per item and
/// `{id, sort_key}` per group without loss; `sort_key`s are integers, so
/// there is no floating-point precision to lose on the way out.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardSnapshot<P = ()> {
    pub groups: Vec<Group>,
    pub items: Vec<Item<P>>,
}

/// The collection model: groups plus the items inside them.
///
/// This type is intentionally UI-agnostic and is meant to be constructed
/// once per session and passed by reference to whatever needs it (no global
/// singletons). All writes go through named operations; sorted views are
/// lazily recomputed projections, invalidated by any write and rebuilt on
/// the next read — a drag gesture can therefore mutate the board many times
/// without paying for a re-sort per write.
#[derive(Clone, Debug)]
pub struct Board<P = ()> {
    options: BoardOptions,
    groups: IdMap<GroupId, Group>,
    items: IdMap<ItemId, Item<P>>,

    views: RefCell<Views>,
    views_dirty: Cell<bool>,
}

impl<P> Board<P> {
    pub fn new(options: BoardOptions) -> Self {
        rdebug!(
            default_first_key = options.default_first_key,
            seed_step = options.seed_step,
            "Board::new"
        );
        Self {
            options,
            groups: IdMap::default(),
            items: IdMap::default(),
            views: RefCell::new(Views::default()),
            views_dirty: Cell::new(false),
        }
    }

    /// Rebuilds a board from a previously exported snapshot.
    ///
    /// Runs the same validation as `append_group`/`append_item`, so a
    /// snapshot with duplicate ids or dangling group references is rejected
    /// instead of producing an inconsistent board.
    pub fn from_snapshot(
        options: BoardOptions,
        snapshot: BoardSnapshot<P>,
    ) -> Result<Self, ReorderError> {
        let mut board = Self::new(options);
        for group in snapshot.groups {
            board.append_group(group)?;
        }
        for item in snapshot.items {
            board.append_item(item)?;
        }
        Ok(board)
    }

    pub fn options(&self) -> &BoardOptions {
        &self.options
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn group_by_id(&self, id: &GroupId) -> Option<&Group> {
        self.groups.get(id)
    }

    pub fn item_by_id(&self, id: &ItemId) -> Option<&Item<P>> {
        self.items.get(id)
    }

    /// Number of items currently in `group` (0 for unknown groups).
    pub fn group_len(&self, group: &GroupId) -> usize {
        self.views()
            .items_by_group
            .get(group)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Visits groups in display order.
    pub fn for_each_group_sorted(&self, mut f: impl FnMut(&Group)) {
        let views = self.views();
        for id in &views.groups_sorted {
            if let Some(group) = self.groups.get(id) {
                f(group);
            }
        }
    }

    /// Visits the items of `group` in display order.
    pub fn for_each_item_in_group(&self, group: &GroupId, mut f: impl FnMut(&Item<P>)) {
        let views = self.views();
        let Some(ids) = views.items_by_group.get(group) else {
            return;
        };
        for id in ids {
            if let Some(item) = self.items.get(id) {
                f(item);
            }
        }
    }

    /// Collects sorted group ids into `out` (clears `out` first).
    ///
    /// Convenience wrapper around [`Self::for_each_group_sorted`]; reuse
    /// `out` across reads to avoid reallocating.
    pub fn collect_groups_sorted(&self, out: &mut Vec<GroupId>) {
        out.clear();
        self.for_each_group_sorted(|g| out.push(g.id.clone()));
    }

    /// Collects the sorted item ids of `group` into `out` (clears `out`
    /// first).
    pub fn collect_items_in_group(&self, group: &GroupId, out: &mut Vec<ItemId>) {
        out.clear();
        self.for_each_item_in_group(group, |it| out.push(it.id.clone()));
    }

    /// Exports the board contents in display order.
    pub fn export_snapshot(&self) -> BoardSnapshot<P>
    where
        P: Clone,
    {
        let mut groups = Vec::with_capacity(self.groups.len());
        let mut items = Vec::with_capacity(self.items.len());
        self.for_each_group_sorted(|g| groups.push(g.clone()));
        let ids: Vec<GroupId> = groups.iter().map(|g| g.id.clone()).collect();
        for group in &ids {
            self.for_each_item_in_group(group, |it| items.push(it.clone()));
        }
        BoardSnapshot { groups, items }
    }

    /// Adds a new group. The caller picks the `sort_key` (typically
    /// [`crate::spaced_key`] of the insertion index).
    pub fn append_group(&mut self, group: Group) -> Result<(), ReorderError> {
        if self.groups.contains_key(&group.id) {
            return Err(ReorderError::DuplicateId {
                id: String::from(group.id.as_str()),
            });
        }
        rtrace!(group = %group.id, sort_key = group.sort_key, "append_group");
        self.groups.insert(group.id.clone(), group);
        self.mark_dirty();
        Ok(())
    }

    /// Adds a new item to an existing group.
    pub fn append_item(&mut self, item: Item<P>) -> Result<(), ReorderError> {
        if self.items.contains_key(&item.id) {
            return Err(ReorderError::DuplicateId {
                id: String::from(item.id.as_str()),
            });
        }
        if !self.groups.contains_key(&item.group_id) {
            return Err(ReorderError::UnknownGroup {
                group: item.group_id.clone(),
            });
        }
        rtrace!(item = %item.id, group = %item.group_id, sort_key = item.sort_key, "append_item");
        self.items.insert(item.id.clone(), item);
        self.mark_dirty();
        Ok(())
    }

    /// Atomically moves an item: `sort_key` and `group_id` are committed
    /// together or not at all. This is the engine's single write path for
    /// item reorders (including cross-group moves).
    pub fn set_item_position(
        &mut self,
        id: &ItemId,
        sort_key: SortKey,
        group_id: &GroupId,
    ) -> Result<(), ReorderError> {
        if !self.groups.contains_key(group_id) {
            return Err(ReorderError::UnknownGroup {
                group: group_id.clone(),
            });
        }
        let Some(item) = self.items.get_mut(id) else {
            return Err(ReorderError::MovingItemNotFound {
                id: String::from(id.as_str()),
            });
        };
        rtrace!(item = %id, group = %group_id, sort_key, "set_item_position");
        item.sort_key = sort_key;
        item.group_id = group_id.clone();
        self.mark_dirty();
        Ok(())
    }

    /// Moves a group among its siblings.
    pub fn set_group_position(
        &mut self,
        id: &GroupId,
        sort_key: SortKey,
    ) -> Result<(), ReorderError> {
        let Some(group) = self.groups.get_mut(id) else {
            return Err(ReorderError::MovingItemNotFound {
                id: String::from(id.as_str()),
            });
        };
        rtrace!(group = %id, sort_key, "set_group_position");
        group.sort_key = sort_key;
        self.mark_dirty();
        Ok(())
    }

    /// Direct key write used by the rebalance pass, after validation.
    pub(crate) fn write_item_key(&mut self, id: &ItemId, sort_key: SortKey) {
        if let Some(item) = self.items.get_mut(id) {
            item.sort_key = sort_key;
        }
        self.mark_dirty();
    }

    pub(crate) fn write_group_key(&mut self, id: &GroupId, sort_key: SortKey) {
        if let Some(group) = self.groups.get_mut(id) {
            group.sort_key = sort_key;
        }
        self.mark_dirty();
    }

    pub(crate) fn sorted_group_ids(&self) -> Vec<GroupId> {
        self.views().groups_sorted.clone()
    }

    pub(crate) fn sorted_item_ids(&self, group: &GroupId) -> Vec<ItemId> {
        self.views()
            .items_by_group
            .get(group)
            .cloned()
            .unwrap_or_default()
    }

    fn mark_dirty(&mut self) {
        self.views_dirty.set(true);
    }

    fn views(&self) -> Ref<'_, Views> {
        if self.views_dirty.replace(false) {
            *self.views.borrow_mut() = self.rebuild_views();
        }
        self.views.borrow()
    }

    fn rebuild_views(&self) -> Views {
        rdebug!(
            groups = self.groups.len(),
            items = self.items.len(),
            "rebuild_views"
        );
        let mut groups: Vec<(SortKey, GroupId)> = self
            .groups
            .values()
            .map(|g| (g.sort_key, g.id.clone()))
            .collect();
        groups.sort_unstable();

        let mut by_group: IdMap<GroupId, Vec<(SortKey, ItemId)>> = IdMap::default();
        for item in self.items.values() {
            by_group
                .entry(item.group_id.clone())
                .or_default()
                .push((item.sort_key, item.id.clone()));
        }

        let mut items_by_group: IdMap<GroupId, Vec<ItemId>> = IdMap::default();
        for (group, mut entries) in by_group {
            entries.sort_unstable();
            items_by_group.insert(group, entries.into_iter().map(|(_, id)| id).collect());
        }

        Views {
            groups_sorted: groups.into_iter().map(|(_, id)| id).collect(),
            items_by_group,
        }
    }
}

impl<P> Default for Board<P> {
    fn default() -> Self {
        Self::new(BoardOptions::default())
    }
}
