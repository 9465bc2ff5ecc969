//! Rectangular tile fields

use serde::{Deserialize, Serialize};

use crate::Tile;

/// A rectangular grid of optional tile references for one layer.
///
/// Cells are stored row-major (`index = y * width + x`). The cell vector is
/// always exactly `width * height` long. Reads outside the field return
/// `None` and writes outside the field are ignored, since gestures routinely
/// cross the field edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTileField")]
pub struct TileField {
    width: u32,
    height: u32,
    cells: Vec<Option<Tile>>,
}

/// One enumerated cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub tile: Option<Tile>,
    pub x: i32,
    pub y: i32,
}

impl TileField {
    /// Create an empty field
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Create an empty field covering a pixel area, rounding up to whole cells
    pub fn for_area(cell_width: u32, cell_height: u32, area_width: u32, area_height: u32) -> Self {
        if cell_width == 0 || cell_height == 0 {
            return Self::new(0, 0);
        }
        Self::new(
            area_width.div_ceil(cell_width),
            area_height.div_ceil(cell_height),
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells (empty or not)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of non-empty cells
    pub fn tile_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Raw row-major cell data
    pub fn cells(&self) -> &[Option<Tile>] {
        &self.cells
    }

    /// Center cell, `(width / 2, height / 2)`
    pub fn center(&self) -> (i32, i32) {
        ((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Check if a cell lies inside the field
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.in_bounds(x, y) {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get the tile at a cell. Out-of-range cells are empty.
    pub fn get(&self, x: i32, y: i32) -> Option<Tile> {
        self.index(x, y).and_then(|idx| self.cells[idx])
    }

    /// Set the tile at a cell. Out-of-range cells are ignored.
    /// Returns true if the stored value changed.
    pub fn set(&mut self, x: i32, y: i32, tile: Option<Tile>) -> bool {
        let Some(idx) = self.index(x, y) else {
            return false;
        };
        if self.cells[idx] == tile {
            return false;
        }
        self.cells[idx] = tile;
        true
    }

    /// Create a resized copy. Old cell `(x, y)` moves to `(x - x_offset, y - y_offset)`;
    /// cells that land outside the new bounds are dropped.
    pub fn resize(&self, x_offset: i32, y_offset: i32, new_width: u32, new_height: u32) -> TileField {
        let mut resized = TileField::new(new_width, new_height);
        for cell in self.iter() {
            if cell.tile.is_some() {
                resized.set(cell.x - x_offset, cell.y - y_offset, cell.tile);
            }
        }
        resized
    }

    /// Enumerate every cell in row-major order
    pub fn iter(&self) -> CellIter<'_> {
        CellIter {
            field: self,
            next: 0,
            origin: (0, 0),
        }
    }

    /// Enumerate every cell with coordinates relative to the center cell,
    /// so that adding a cursor cell overlays the field centered on it
    pub fn iter_centered(&self) -> CellIter<'_> {
        CellIter {
            field: self,
            next: 0,
            origin: self.center(),
        }
    }
}

/// Lazy row-major cell enumeration
#[derive(Debug, Clone)]
pub struct CellIter<'a> {
    field: &'a TileField,
    next: usize,
    origin: (i32, i32),
}

impl Iterator for CellIter<'_> {
    type Item = CellRef;

    fn next(&mut self) -> Option<Self::Item> {
        let tile = *self.field.cells.get(self.next)?;
        let width = self.field.width as usize;
        let x = (self.next % width) as i32 - self.origin.0;
        let y = (self.next / width) as i32 - self.origin.1;
        self.next += 1;
        Some(CellRef { tile, x, y })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.field.cells.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CellIter<'_> {}

impl<'a> IntoIterator for &'a TileField {
    type Item = CellRef;
    type IntoIter = CellIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Unvalidated serialized form
#[derive(Deserialize)]
struct RawTileField {
    width: u32,
    height: u32,
    cells: Vec<Option<Tile>>,
}

impl TryFrom<RawTileField> for TileField {
    type Error = String;

    fn try_from(raw: RawTileField) -> Result<Self, Self::Error> {
        let expected = raw.width as usize * raw.height as usize;
        if raw.cells.len() != expected {
            return Err(format!(
                "tile field is {}x{} but has {} cells (expected {})",
                raw.width,
                raw.height,
                raw.cells.len(),
                expected
            ));
        }
        Ok(Self {
            width: raw.width,
            height: raw.height,
            cells: raw.cells,
        })
    }
}
