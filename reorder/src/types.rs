use alloc::string::String;
use core::fmt;

#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type IdMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type IdMap<K, V> = BTreeMap<K, V>;

/// The ordering key.
///
/// Ascending `SortKey` defines display order. Keys are allocated with gaps
/// (see [`crate::allocate`] and [`crate::spaced_key`]) so that inserting
/// between two entries never requires renumbering the rest of the list.
pub type SortKey = i64;

/// Whether a moved entity lands immediately before or after its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RelativePosition {
    Before,
    After,
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(String::from(id))
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id! {
    /// Identity of a group (a section/column of the board).
    GroupId
}

string_id! {
    /// Identity of an item (a post/card inside a group).
    ItemId
}

/// A group of items, ordered among its siblings by `sort_key`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Group {
    pub id: GroupId,
    pub sort_key: SortKey,
}

impl Group {
    pub fn new(id: impl Into<GroupId>, sort_key: SortKey) -> Self {
        Self {
            id: id.into(),
            sort_key,
        }
    }
}

/// An item living inside a group, ordered within it by `sort_key`.
///
/// The `payload` is opaque to the engine (subject, attachment, ...); it is
/// carried along unchanged by every reorder operation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item<P = ()> {
    pub id: ItemId,
    pub group_id: GroupId,
    pub sort_key: SortKey,
    pub payload: P,
}

impl<P> Item<P> {
    pub fn new(
        id: impl Into<ItemId>,
        group_id: impl Into<GroupId>,
        sort_key: SortKey,
        payload: P,
    ) -> Self {
        Self {
            id: id.into(),
            group_id: group_id.into(),
            sort_key,
            payload,
        }
    }
}
