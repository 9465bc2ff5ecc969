//! Shape masks and neighbor occupancy
//!
//! Both use the same 3x3 slot layout, indexed by `(dx + 1) + (dy + 1) * 3`:
//!   0|1|2
//!   3|4|5
//!   6|7|8
//! Slot 4 is the tile itself. `dy = -1` is the row above.

use serde::{Deserialize, Serialize};

/// Index of the center slot
pub const CENTER: usize = 4;

/// Neighbor offsets for every slot, in slot order
pub const SLOT_OFFSETS: [(i32, i32); 9] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (0, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Slot index for a neighbor offset. Returns None outside the 3x3 ring.
pub fn slot(dx: i32, dy: i32) -> Option<usize> {
    if !(-1..=1).contains(&dx) || !(-1..=1).contains(&dy) {
        return None;
    }
    Some(((dx + 1) + (dy + 1) * 3) as usize)
}

/// How one ninth of a tile sprite connects outward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShapeKind {
    /// No connection in this direction
    #[default]
    None,
    /// Solid connection
    Full,
    /// Diagonal half, filled toward the upper-left
    DiagonalUL,
    /// Diagonal half, filled toward the upper-right
    DiagonalUR,
    /// Diagonal half, filled toward the lower-left
    DiagonalDL,
    /// Diagonal half, filled toward the lower-right
    DiagonalDR,
}

impl ShapeKind {
    pub fn is_none(&self) -> bool {
        *self == ShapeKind::None
    }

    pub fn is_diagonal(&self) -> bool {
        matches!(
            self,
            ShapeKind::DiagonalUL | ShapeKind::DiagonalUR | ShapeKind::DiagonalDL | ShapeKind::DiagonalDR
        )
    }
}

/// Authored 3x3 shape description of one brush tile.
///
/// The center slot holds the tile's own shape (`Full` for solid tiles, a
/// diagonal for corner pieces). Outer slots describe how that edge or corner
/// of the sprite connects to the neighbor in that direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ShapeMask(pub [ShapeKind; 9]);

impl ShapeMask {
    /// All nine slots set to one kind
    pub fn filled(kind: ShapeKind) -> Self {
        Self([kind; 9])
    }

    /// A tile that connects nowhere, with the given center shape
    pub fn isolated(center: ShapeKind) -> Self {
        let mut slots = [ShapeKind::None; 9];
        slots[CENTER] = center;
        Self(slots)
    }

    /// Builder-style slot assignment by neighbor offset
    pub fn with(mut self, dx: i32, dy: i32, kind: ShapeKind) -> Self {
        self.set(dx, dy, kind);
        self
    }

    pub fn get(&self, dx: i32, dy: i32) -> ShapeKind {
        slot(dx, dy).map(|i| self.0[i]).unwrap_or_default()
    }

    pub fn set(&mut self, dx: i32, dy: i32, kind: ShapeKind) {
        if let Some(i) = slot(dx, dy) {
            self.0[i] = kind;
        }
    }

    /// The tile's own shape. An unset center counts as `Full`.
    pub fn center(&self) -> ShapeKind {
        match self.0[CENTER] {
            ShapeKind::None => ShapeKind::Full,
            kind => kind,
        }
    }

    /// Check the mask against live occupancy: every unoccupied outer slot must
    /// be `None` and every occupied outer slot must be non-`None`. The center
    /// slot is not part of this test.
    pub fn fits(&self, occupancy: &Occupancy) -> bool {
        (0..9)
            .filter(|&i| i != CENTER)
            .all(|i| occupancy.0[i] != self.0[i].is_none())
    }
}

/// Which slots of a cell's 3x3 neighborhood hold tiles of the same brush
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Occupancy(pub [bool; 9]);

impl Occupancy {
    pub fn get(&self, dx: i32, dy: i32) -> bool {
        slot(dx, dy).map(|i| self.0[i]).unwrap_or(false)
    }

    /// Number of occupied outer slots
    pub fn neighbor_count(&self) -> usize {
        (0..9).filter(|&i| i != CENTER && self.0[i]).count()
    }
}
