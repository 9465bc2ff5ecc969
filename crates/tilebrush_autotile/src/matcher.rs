//! Autotile matching and neighborhood fix-up
//!
//! For one cell, the matcher builds the [`Occupancy`] of its 3x3 neighborhood
//! (which neighbors are tiles of the same brush), then walks the brush's
//! catalog in declared order and takes the first entry whose mask fits.
//! Placing a tile changes the occupancy of its 8 neighbors, so every
//! placement is followed by a single, non-recursive re-evaluation of that
//! ring.

use serde::{Deserialize, Serialize};
use tilebrush_core::{Tile, TileField};
use tracing::trace;

use crate::catalog::ResolvedBrush;
use crate::shape::{Occupancy, ShapeKind, SLOT_OFFSETS};

/// How neighbors outside the field count during occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// Off-field neighbors are unconnected
    #[default]
    None,
    /// Off-field neighbors are connected, so terrain runs cleanly off the edge
    ConnectAlways,
}

/// Compute which slots around `(x, y)` hold tiles of `brush`
pub fn occupancy(
    field: &TileField,
    x: i32,
    y: i32,
    brush: &ResolvedBrush,
    edge_policy: EdgePolicy,
) -> Occupancy {
    let mut result = Occupancy::default();

    for (i, (dx, dy)) in SLOT_OFFSETS.iter().enumerate() {
        let nx = x + dx;
        let ny = y + dy;

        result.0[i] = if field.in_bounds(nx, ny) {
            brush.owns(field.get(nx, ny))
        } else {
            edge_policy == EdgePolicy::ConnectAlways
        };
    }

    result
}

/// Find the first catalog entry, in declared order, whose center shape is
/// `kind` and whose outer slots fit `occupancy`
pub fn match_best(brush: &ResolvedBrush, occupancy: &Occupancy, kind: ShapeKind) -> Option<u32> {
    brush
        .entries()
        .find(|entry| entry.mask.center() == kind && entry.mask.fits(occupancy))
        .map(|entry| entry.tile_index)
}

/// Decide which brush tile belongs at `(x, y)`, falling back to the brush's
/// default tile when nothing in the catalog fits
pub fn decide(
    field: &TileField,
    x: i32,
    y: i32,
    brush: &ResolvedBrush,
    edge_policy: EdgePolicy,
    kind: ShapeKind,
) -> u32 {
    let occupancy = occupancy(field, x, y, brush, edge_policy);
    match_best(brush, &occupancy, kind).unwrap_or_else(|| brush.default_tile())
}

/// Resolve the shape a single click intends from where it landed in the cell.
///
/// The cell is split into a 3x3 grid; a click in a corner ninth picks the
/// matching diagonal. Anything else, and any dragged stroke, is `Full`.
pub fn fill_type_for_subposition(
    px: f32,
    py: f32,
    cell_width: f32,
    cell_height: f32,
    drawn_multiple: bool,
) -> ShapeKind {
    if drawn_multiple || cell_width <= 0.0 || cell_height <= 0.0 {
        return ShapeKind::Full;
    }

    let zone = |pos: f32, size: f32| ((pos / size * 3.0).floor() as i32).clamp(0, 2);

    match (zone(px, cell_width), zone(py, cell_height)) {
        (0, 0) => ShapeKind::DiagonalUL,
        (2, 0) => ShapeKind::DiagonalUR,
        (0, 2) => ShapeKind::DiagonalDL,
        (2, 2) => ShapeKind::DiagonalDR,
        _ => ShapeKind::Full,
    }
}

/// Re-decide the tile at `(x, y)` and at each of its 8 neighbors that
/// currently holds a tile of `brush`. Every affected cell keeps its own shape
/// kind. Decisions are computed before any write and nothing outside the
/// 3x3 ring is touched. Returns the number of cells that changed.
pub fn fix_region(
    field: &mut TileField,
    x: i32,
    y: i32,
    brush: &ResolvedBrush,
    edge_policy: EdgePolicy,
) -> usize {
    let updates: Vec<(i32, i32, u32)> = SLOT_OFFSETS
        .iter()
        .filter_map(|(dx, dy)| {
            let nx = x + dx;
            let ny = y + dy;
            let tile = field.get(nx, ny)?;
            if !brush.owns(Some(tile)) {
                return None;
            }
            let kind = brush.kind_of(tile.tile_index);
            Some((nx, ny, decide(field, nx, ny, brush, edge_policy, kind)))
        })
        .collect();

    let mut changed = 0;
    for (nx, ny, tile_index) in updates {
        if field.set(nx, ny, Some(brush.tile(tile_index))) {
            trace!("fix-up ({}, {}) -> tile {}", nx, ny, tile_index);
            changed += 1;
        }
    }
    changed
}

/// Place the brush tile decided for `(x, y)` and fix up its neighborhood.
/// Returns true if any cell changed. Cells outside the field are ignored.
pub fn place(
    field: &mut TileField,
    x: i32,
    y: i32,
    brush: &ResolvedBrush,
    edge_policy: EdgePolicy,
    kind: ShapeKind,
) -> bool {
    if !field.in_bounds(x, y) {
        return false;
    }

    let tile_index = decide(field, x, y, brush, edge_policy, kind);
    let placed = field.set(x, y, Some(brush.tile(tile_index)));
    let fixed = fix_region(field, x, y, brush, edge_policy);
    placed || fixed > 0
}

/// Clear `(x, y)` and fix up the brush tiles around it.
/// Returns true if any cell changed.
pub fn erase(
    field: &mut TileField,
    x: i32,
    y: i32,
    brush: &ResolvedBrush,
    edge_policy: EdgePolicy,
) -> bool {
    if !field.set(x, y, None) {
        return false;
    }
    fix_region(field, x, y, brush, edge_policy);
    true
}

/// Compute what [`place`] would change without modifying `field`.
/// Returns the affected cells with their new contents.
pub fn preview_place(
    field: &TileField,
    x: i32,
    y: i32,
    brush: &ResolvedBrush,
    edge_policy: EdgePolicy,
    kind: ShapeKind,
) -> Vec<((i32, i32), Option<Tile>)> {
    let mut preview = field.clone();
    if !place(&mut preview, x, y, brush, edge_policy, kind) {
        return Vec::new();
    }

    SLOT_OFFSETS
        .iter()
        .map(|(dx, dy)| (x + dx, y + dy))
        .filter(|&(nx, ny)| preview.get(nx, ny) != field.get(nx, ny))
        .map(|(nx, ny)| ((nx, ny), preview.get(nx, ny)))
        .collect()
}
