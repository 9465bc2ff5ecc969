//! Rectangular cell selections

use serde::{Deserialize, Serialize};

/// A rectangle of cells given by two inclusive corners in any order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl CellRect {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Same rectangle with `(x1, y1)` as the top-left corner
    pub fn normalized(&self) -> Self {
        Self {
            x1: self.x1.min(self.x2),
            y1: self.y1.min(self.y2),
            x2: self.x1.max(self.x2),
            y2: self.y1.max(self.y2),
        }
    }

    pub fn width(&self) -> u32 {
        self.x1.abs_diff(self.x2) + 1
    }

    pub fn height(&self) -> u32 {
        self.y1.abs_diff(self.y2) + 1
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        let r = self.normalized();
        x >= r.x1 && x <= r.x2 && y >= r.y1 && y <= r.y2
    }

    /// Covered cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let r = self.normalized();
        (r.y1..=r.y2).flat_map(move |y| (r.x1..=r.x2).map(move |x| (x, y)))
    }
}
