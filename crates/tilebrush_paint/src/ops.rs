//! Structural edits on tile fields
//!
//! These are the building blocks of the non-brush tools. Each one mutates the
//! field in place and reports whether (or how much) it changed, so a gesture
//! can tell a no-op apart from an edit.

use std::collections::HashSet;

use tilebrush_core::{CellRect, Stamp, Tile, TileField};

/// Draw a stamp centered on `cursor`. Empty stamp cells clear the field cell.
/// Returns true if any cell changed.
pub fn draw_stamp(field: &mut TileField, stamp: &Stamp, cursor: (i32, i32)) -> bool {
    let mut changed = false;
    for cell in stamp.iter_centered() {
        changed |= field.set(cursor.0 + cell.x, cursor.1 + cell.y, cell.tile);
    }
    changed
}

/// Paste a stamp with its top-left cell at `top_left`
pub fn paste(field: &mut TileField, stamp: &Stamp, top_left: (i32, i32)) -> bool {
    let mut changed = false;
    for cell in stamp.field().iter() {
        changed |= field.set(top_left.0 + cell.x, top_left.1 + cell.y, cell.tile);
    }
    changed
}

/// Flood fill the 4-connected region of cells equal to the tile at `origin`.
///
/// Every cell of the region is overwritten with the stamp tile at
/// `(cell - origin + stamp center) mod stamp size`, so multi-cell stamps tile
/// seamlessly, anchored at the click. Returns the number of cells whose tile
/// changed, which is zero when the region already holds the stamp pattern.
pub fn flood_fill(field: &mut TileField, origin: (i32, i32), stamp: &Stamp) -> usize {
    if !field.in_bounds(origin.0, origin.1) || stamp.field().is_empty() {
        return 0;
    }

    let target = field.get(origin.0, origin.1);
    let region = connected_region(field, origin, target);

    let (cx, cy) = stamp.center();
    region
        .into_iter()
        .filter(|&(x, y)| {
            let tile = stamp.tile_at_wrapped(x - origin.0 + cx, y - origin.1 + cy);
            field.set(x, y, tile)
        })
        .count()
}

/// Collect the 4-connected cells equal to `target`, starting at `origin`
fn connected_region(field: &TileField, origin: (i32, i32), target: Option<Tile>) -> Vec<(i32, i32)> {
    let mut stack = vec![origin];
    let mut visited = HashSet::new();
    let mut region = Vec::new();

    while let Some((x, y)) = stack.pop() {
        if !field.in_bounds(x, y) || !visited.insert((x, y)) {
            continue;
        }

        if field.get(x, y) != target {
            continue;
        }
        region.push((x, y));

        stack.push((x - 1, y));
        stack.push((x + 1, y));
        stack.push((x, y - 1));
        stack.push((x, y + 1));
    }

    region
}

/// Globally substitute tiles, keyed by the stamp footprint under the cursor.
///
/// For each stamp cell, the tile currently under it (empty included) becomes
/// a pattern; every cell in the whole field holding that pattern is replaced
/// by the stamp's tile for that cell. A stamp cell hanging off the field
/// reads as empty, so its tile replaces every empty cell. Matching uses the
/// field as it was before the call. Finally the stamp itself is drawn at the
/// cursor.
/// Returns the number of cells changed.
pub fn replace(field: &mut TileField, stamp: &Stamp, cursor: (i32, i32)) -> usize {
    let original = field.clone();

    let substitutions: Vec<(Option<Tile>, Option<Tile>)> = stamp
        .iter_centered()
        .map(|cell| (original.get(cursor.0 + cell.x, cursor.1 + cell.y), cell.tile))
        .collect();

    let mut changed: HashSet<(i32, i32)> = HashSet::new();
    for (pattern, replacement) in &substitutions {
        for cell in original.iter() {
            if cell.tile == *pattern && field.set(cell.x, cell.y, *replacement) {
                changed.insert((cell.x, cell.y));
            }
        }
    }

    for cell in stamp.iter_centered() {
        let x = cursor.0 + cell.x;
        let y = cursor.1 + cell.y;
        if field.set(x, y, cell.tile) {
            changed.insert((x, y));
        }
    }

    changed.len()
}

/// Copy a rectangle of cells into a new stamp. Cells outside the field are empty.
pub fn copy_region(field: &TileField, rect: CellRect) -> Stamp {
    let rect = rect.normalized();
    let mut copy = TileField::new(rect.width(), rect.height());
    for (x, y) in rect.cells() {
        copy.set(x - rect.x1, y - rect.y1, field.get(x, y));
    }
    Stamp::from_field(copy)
}

/// Clear a rectangle of cells. Returns the number of cells cleared.
pub fn erase_region(field: &mut TileField, rect: CellRect) -> usize {
    rect.cells().filter(|&(x, y)| field.set(x, y, None)).count()
}
