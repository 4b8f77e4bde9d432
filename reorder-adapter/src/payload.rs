use reorder::{GroupId, ItemId};

/// What a drag payload is.
///
/// Drop targets use this to decide whether they accept a drag at all: an
/// item list accepts `Item` drags, the board surface accepts `Group` drags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PayloadKind {
    Item,
    Group,
}

/// The identity carried by a draggable element.
///
/// This is a closed tagged union, validated by matching on it at the
/// interaction boundary — not by probing arbitrary objects for a marker
/// property.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum DragPayload {
    Item { item_id: ItemId, group_id: GroupId },
    Group { group_id: GroupId },
}

impl DragPayload {
    pub fn item(item_id: impl Into<ItemId>, group_id: impl Into<GroupId>) -> Self {
        Self::Item {
            item_id: item_id.into(),
            group_id: group_id.into(),
        }
    }

    pub fn group(group_id: impl Into<GroupId>) -> Self {
        Self::Group {
            group_id: group_id.into(),
        }
    }

    pub fn kind(&self) -> PayloadKind {
        match self {
            Self::Item { .. } => PayloadKind::Item,
            Self::Group { .. } => PayloadKind::Group,
        }
    }
}
