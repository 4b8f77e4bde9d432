//! Closest-edge hitbox math.
//!
//! Given a drop target's bounds and the current pointer position, compute
//! which allowed edge of the target the pointer is nearest to, and map that
//! edge to an insertion side. Vertical lists typically allow `Top`/`Bottom`,
//! horizontal group strips `Left`/`Right`.

use reorder::RelativePosition;

/// A side of a drop target's visual bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub fn is_vertical(self) -> bool {
        matches!(self, Edge::Top | Edge::Bottom)
    }

    /// Maps an edge to the side of the anchor the drop lands on:
    /// `Top`/`Left` insert before the anchor, `Bottom`/`Right` after it.
    pub fn relative_position(self) -> RelativePosition {
        match self {
            Edge::Top | Edge::Left => RelativePosition::Before,
            Edge::Bottom | Edge::Right => RelativePosition::After,
        }
    }
}

/// A pointer position, in the same coordinate space as [`Bounds`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// A drop target's rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }
}

/// The allowed edge nearest to `pointer`.
///
/// Distances are measured perpendicular to each edge; the smallest wins,
/// with earlier entries of `allowed` winning ties. Returns `None` when
/// `allowed` is empty.
pub fn closest_edge(bounds: Bounds, pointer: Point, allowed: &[Edge]) -> Option<Edge> {
    let mut best: Option<(i64, Edge)> = None;
    for &edge in allowed {
        let distance = match edge {
            Edge::Top => (pointer.y as i64 - bounds.y as i64).abs(),
            Edge::Bottom => (pointer.y as i64 - bounds.bottom()).abs(),
            Edge::Left => (pointer.x as i64 - bounds.x as i64).abs(),
            Edge::Right => (pointer.x as i64 - bounds.right()).abs(),
        };
        if best.is_none_or(|(d, _)| distance < d) {
            best = Some((distance, edge));
        }
    }
    best.map(|(_, edge)| edge)
}
