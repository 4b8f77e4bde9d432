use alloc::string::String;

use crate::GroupId;

/// Failure modes of the reorder operations.
///
/// Every precondition violation is reported back to the caller as a value;
/// the board is never left partially written. The interaction layer is
/// expected to treat any failure as "the drop had no effect".
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReorderError {
    /// The referenced anchor item/group does not exist.
    #[error("anchor `{id}` not found")]
    AnchorNotFound { id: String },

    /// The anchor exists but is missing from its group's sorted list
    /// (model inconsistency; should not occur).
    #[error("anchor `{id}` not present in group `{group}`")]
    AnchorNotInGroup { id: String, group: GroupId },

    /// The referenced moving item/group does not exist.
    #[error("moving entity `{id}` not found")]
    MovingItemNotFound { id: String },

    /// Key allocation collided with an existing neighbor (precision
    /// exhaustion). The affected group should be rebalanced before
    /// retrying; `group` is `None` when the groups list itself is
    /// exhausted.
    #[error("sort keys exhausted, group needs a rebalance")]
    KeyExhausted { group: Option<GroupId> },

    /// An appended group/item reused an existing id.
    #[error("duplicate id `{id}`")]
    DuplicateId { id: String },

    /// An item referenced a group the board does not know about.
    #[error("unknown group `{group}`")]
    UnknownGroup { group: GroupId },
}
