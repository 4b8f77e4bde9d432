//! The drag-session state machine.
//!
//! One gesture at a time: `Idle -> Dragging -> (Committed | Cancelled)`.
//! The session owns all transient gesture state; the board is only touched
//! once, when a drop resolves. This replaces the callback-per-event style
//! (drag-start/drag/drop closures all mutating shared refs) with explicit
//! transitions.

use reorder::{Board, RelativePosition, ReorderError};

use crate::{DragPayload, Edge, PayloadKind};

/// A drop target the pointer is over, as reported by the interaction layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DropTarget {
    /// Identity of the anchor entity under the pointer.
    pub payload: DragPayload,
    /// Closest edge of the target's bounds, if one was computed. `None`
    /// falls back to dropping after the anchor.
    pub edge: Option<Edge>,
    /// Nesting depth of the target (0 = outermost). When several targets
    /// are hovered at once, the innermost one receives the drop.
    pub depth: usize,
}

impl DropTarget {
    pub fn new(payload: DragPayload, edge: Option<Edge>, depth: usize) -> Self {
        Self {
            payload,
            edge,
            depth,
        }
    }
}

/// How a gesture ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropOutcome {
    /// The drop resolved to a reorder and the board was updated (possibly a
    /// no-op, e.g. an item dropped on itself).
    Committed,
    /// No valid target; nothing was written.
    Cancelled,
}

#[derive(Clone, Debug)]
struct Gesture {
    source: DragPayload,
    target: Option<DropTarget>,
}

/// Serializes drag gestures into single reorder commits.
///
/// The interaction layer drives it:
/// - [`begin`](Self::begin) when a drag starts,
/// - [`hover`](Self::hover) with the currently hit targets on every move,
/// - [`drop_on_board`](Self::drop_on_board) or [`cancel`](Self::cancel)
///   when the gesture ends.
///
/// Targeting is sticky: once a target is active it stays active until a
/// *different* valid target is hovered, so a pointer resting exactly on a
/// boundary does not flicker between neighbors.
#[derive(Clone, Debug, Default)]
pub struct DragSession {
    gesture: Option<Gesture>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_some()
    }

    pub fn source(&self) -> Option<&DragPayload> {
        self.gesture.as_ref().map(|g| &g.source)
    }

    pub fn active_target(&self) -> Option<&DropTarget> {
        self.gesture.as_ref().and_then(|g| g.target.as_ref())
    }

    /// Starts a gesture. Returns `false` (and changes nothing) when one is
    /// already active — gestures are serialized, one per pointer.
    pub fn begin(&mut self, source: DragPayload) -> bool {
        if self.gesture.is_some() {
            return false;
        }
        adebug!(?source, "drag begin");
        self.gesture = Some(Gesture {
            source,
            target: None,
        });
        true
    }

    /// Reports the targets currently under the pointer.
    ///
    /// Candidates the source cannot drop on are discarded (an outer target
    /// never sees a drag an inner one handles); of the rest, the deepest
    /// wins. An empty candidate set keeps the previous target active
    /// (sticky targeting).
    pub fn hover(&mut self, candidates: impl IntoIterator<Item = DropTarget>) {
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };

        let mut best: Option<DropTarget> = None;
        for candidate in candidates {
            if !accepts(&gesture.source, &candidate.payload) {
                continue;
            }
            let deeper = best
                .as_ref()
                .is_none_or(|current| candidate.depth >= current.depth);
            if deeper {
                best = Some(candidate);
            }
        }

        if let Some(target) = best {
            atrace!(?target, "hover target");
            gesture.target = Some(target);
        }
    }

    /// Ends the gesture without touching the board.
    pub fn cancel(&mut self) -> DropOutcome {
        if self.gesture.take().is_some() {
            adebug!("drag cancelled");
        }
        DropOutcome::Cancelled
    }

    /// Ends the gesture by resolving the active target into exactly one
    /// engine operation.
    ///
    /// The session returns to idle either way. On `Err` the board is
    /// untouched; callers should treat a failed drop exactly like a
    /// cancelled drag (the item snaps back, nothing changed).
    pub fn drop_on_board<P>(
        &mut self,
        board: &mut Board<P>,
    ) -> Result<DropOutcome, ReorderError> {
        let Some(gesture) = self.gesture.take() else {
            return Ok(DropOutcome::Cancelled);
        };
        let Some(target) = gesture.target else {
            adebug!("drop outside any target");
            return Ok(DropOutcome::Cancelled);
        };

        let position = target
            .edge
            .map(Edge::relative_position)
            .unwrap_or(RelativePosition::After);

        match (&gesture.source, &target.payload) {
            (
                DragPayload::Item { item_id: moving, .. },
                DragPayload::Item { item_id: anchor, .. },
            ) => {
                adebug!(moving = %moving, anchor = %anchor, ?position, "drop: item on item");
                board.reorder_item(moving, anchor, position)?;
                Ok(DropOutcome::Committed)
            }
            (DragPayload::Item { item_id, .. }, DragPayload::Group { group_id }) => {
                adebug!(item = %item_id, group = %group_id, "drop: item on group");
                board.move_to_empty_group(item_id, group_id)?;
                Ok(DropOutcome::Committed)
            }
            (
                DragPayload::Group { group_id: moving },
                DragPayload::Group { group_id: anchor },
            ) => {
                adebug!(moving = %moving, anchor = %anchor, ?position, "drop: group on group");
                board.reorder_group(moving, anchor, position)?;
                Ok(DropOutcome::Committed)
            }
            // A group cannot land on an item; hover() filters these out,
            // but a directly injected target still must not write.
            (DragPayload::Group { .. }, DragPayload::Item { .. }) => {
                Ok(DropOutcome::Cancelled)
            }
        }
    }
}

/// Whether `source` may drop on `target`.
fn accepts(source: &DragPayload, target: &DragPayload) -> bool {
    match (source.kind(), target.kind()) {
        (PayloadKind::Item, _) => true,
        (PayloadKind::Group, PayloadKind::Group) => true,
        (PayloadKind::Group, PayloadKind::Item) => false,
    }
}
