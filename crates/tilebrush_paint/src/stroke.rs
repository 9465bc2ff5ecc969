//! Per-gesture stroke state
//!
//! A stroke remembers where the previous event of the same drag landed, which
//! is what lets a stamp skip sub-cell jitter and lets a brush stroke turn a
//! single-click corner into a solid tile once the user starts dragging.

use tilebrush_autotile::{self as autotile, EdgePolicy, ResolvedBrush, ShapeKind};
use tilebrush_core::{Stamp, TileField};

use crate::ops::draw_stamp;

/// Stamp drawing across one drag
#[derive(Debug, Clone, Default)]
pub struct StampStroke {
    last: Option<(i32, i32)>,
}

impl StampStroke {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `stamp` at `cursor`. With `suppress_jitter`, nothing is drawn
    /// while the cursor is still inside the footprint of the last placement.
    pub fn paint(
        &mut self,
        field: &mut TileField,
        stamp: &Stamp,
        cursor: (i32, i32),
        suppress_jitter: bool,
    ) -> bool {
        if self.skips(stamp, cursor, suppress_jitter) {
            return false;
        }

        self.last = Some(cursor);
        draw_stamp(field, stamp, cursor)
    }

    /// Check if [`paint`](Self::paint) would ignore `cursor`
    pub fn skips(&self, stamp: &Stamp, cursor: (i32, i32), suppress_jitter: bool) -> bool {
        suppress_jitter
            && self
                .last
                .is_some_and(|last| stamp.footprint_contains(last, cursor))
    }

    pub fn last(&self) -> Option<(i32, i32)> {
        self.last
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Autotile brush painting across one drag
#[derive(Debug, Clone, Default)]
pub struct BrushStroke {
    first: Option<(i32, i32)>,
    last: Option<(i32, i32)>,
    cells_visited: usize,
}

impl BrushStroke {
    pub fn new() -> Self {
        Self::default()
    }

    /// First contact of a drag. The shape kind comes from where the click
    /// landed inside the cell, so a corner click can place a diagonal.
    pub fn begin(
        &mut self,
        field: &mut TileField,
        brush: &ResolvedBrush,
        edge_policy: EdgePolicy,
        cell: (i32, i32),
        pos_in_cell: (f32, f32),
        cell_size: (f32, f32),
    ) -> bool {
        let kind = autotile::fill_type_for_subposition(
            pos_in_cell.0,
            pos_in_cell.1,
            cell_size.0,
            cell_size.1,
            false,
        );

        self.first = Some(cell);
        self.last = Some(cell);
        self.cells_visited = 1;

        autotile::place(field, cell.0, cell.1, brush, edge_policy, kind)
    }

    /// A later cell of the same drag. Dragged cells are always `Full`; on the
    /// second cell the first one is re-placed as `Full` as well.
    pub fn extend(
        &mut self,
        field: &mut TileField,
        brush: &ResolvedBrush,
        edge_policy: EdgePolicy,
        cell: (i32, i32),
    ) -> bool {
        if self.is_repeat(cell) {
            return false;
        }
        if self.first.is_none() {
            self.first = Some(cell);
        }
        self.last = Some(cell);
        self.cells_visited += 1;

        let mut changed = autotile::place(field, cell.0, cell.1, brush, edge_policy, ShapeKind::Full);

        if self.cells_visited == 2 {
            if let Some((fx, fy)) = self.first {
                changed |= autotile::place(field, fx, fy, brush, edge_policy, ShapeKind::Full);
            }
        }

        changed
    }

    /// Erase the brush tile under `cell` and fix up its neighbors.
    /// Repeated events on the same cell are skipped.
    pub fn erase(
        &mut self,
        field: &mut TileField,
        brush: &ResolvedBrush,
        edge_policy: EdgePolicy,
        cell: (i32, i32),
    ) -> bool {
        if self.is_repeat(cell) {
            return false;
        }
        if self.first.is_none() {
            self.first = Some(cell);
        }
        self.last = Some(cell);
        self.cells_visited += 1;

        autotile::erase(field, cell.0, cell.1, brush, edge_policy)
    }

    /// Check if `cell` is where the previous event of this stroke landed
    pub fn is_repeat(&self, cell: (i32, i32)) -> bool {
        self.last == Some(cell)
    }

    pub fn cells_visited(&self) -> usize {
        self.cells_visited
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
