//! Fractional sort-key allocation.
//!
//! Keys are allocated so that only the moved entry's key ever changes:
//! - between two neighbors: their midpoint (rounded half-up),
//! - before the first entry: half of its key,
//! - after the last entry: double its key.
//!
//! Halving/doubling keeps unused numeric range available at both ends, so a
//! list can absorb boundary insertions without touching existing keys.
//!
//! The scheme is not inexhaustible: repeated insertion at the same boundary
//! converges neighbor keys until the midpoint (or half) lands *on* a
//! neighbor. That collision is deliberately left visible — see
//! [`allocation_collides`] — so callers can trigger a rebalance
//! ([`crate::Board::rebalance_group`]) instead of silently corrupting the
//! order.

use crate::SortKey;

/// Computes a new sort key between two neighbor keys.
///
/// Returns `None` when both neighbors are absent (empty list, no anchor);
/// the caller falls back to its default first key.
///
/// The returned key may equal `prev` or `next` when the gap between them is
/// exhausted; callers must check with [`allocation_collides`].
pub fn allocate(prev: Option<SortKey>, next: Option<SortKey>) -> Option<SortKey> {
    let key = match (prev, next) {
        (None, None) => return None,
        (None, Some(next)) => next.div_euclid(2),
        (Some(prev), None) => prev.saturating_mul(2),
        (Some(prev), Some(next)) => midpoint(prev, next),
    };
    Some(key)
}

/// Midpoint of two keys, rounded half-up (toward positive infinity).
///
/// Matches the original JS `Math.round((prev + next) / 2)` for every input,
/// including negative sums.
fn midpoint(prev: SortKey, next: SortKey) -> SortKey {
    // Widen to avoid overflow on prev + next.
    let sum = prev as i128 + next as i128;
    (sum + 1).div_euclid(2) as SortKey
}

/// Whether an allocated key landed on one of its neighbors.
///
/// This is the precision-exhaustion signal: a colliding key must not be
/// committed, since it would break the strict ordering of the list.
pub fn allocation_collides(prev: Option<SortKey>, next: Option<SortKey>, key: SortKey) -> bool {
    prev == Some(key) || next == Some(key)
}

/// Seed key for the entry at `index` in a freshly numbered list.
///
/// Entries are spaced `step` apart starting at `step` (never 0, so the
/// before-first half still has room below the first entry).
pub fn spaced_key(index: usize, step: SortKey) -> SortKey {
    (index as SortKey).saturating_add(1).saturating_mul(step)
}
