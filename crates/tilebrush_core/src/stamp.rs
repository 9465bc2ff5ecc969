//! Multi-cell tile patterns used as brush heads

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{CellIter, CellRect, Tile, TileField, TilesetGeometry};

/// A reusable tile pattern placed centered under the cursor.
///
/// Stamps come from a selection copy or from picking a rectangle of tiles in
/// a tileset. The center cell is `(width / 2, height / 2)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stamp {
    field: TileField,
}

impl Stamp {
    /// Wrap an existing field
    pub fn from_field(field: TileField) -> Self {
        Self { field }
    }

    /// A 1x1 stamp
    pub fn single(tile: Option<Tile>) -> Self {
        let mut field = TileField::new(1, 1);
        field.set(0, 0, tile);
        Self { field }
    }

    /// Build a stamp from a rectangle of tileset cells (column/row corners in
    /// either order). Cells that fall outside the tileset stay empty.
    pub fn from_tileset_rect(tileset_id: Uuid, geometry: &TilesetGeometry, rect: CellRect) -> Self {
        let rect = rect.normalized();
        let mut field = TileField::new(rect.width(), rect.height());

        for (column, row) in rect.cells() {
            if column < 0 || row < 0 {
                continue;
            }
            if let Some(index) = geometry.index_of(column as u32, row as u32) {
                field.set(
                    column - rect.x1,
                    row - rect.y1,
                    Some(Tile::new(tileset_id, index)),
                );
            }
        }

        Self { field }
    }

    pub fn field(&self) -> &TileField {
        &self.field
    }

    pub fn into_field(self) -> TileField {
        self.field
    }

    pub fn width(&self) -> u32 {
        self.field.width()
    }

    pub fn height(&self) -> u32 {
        self.field.height()
    }

    pub fn center(&self) -> (i32, i32) {
        self.field.center()
    }

    /// Cells with coordinates relative to the center
    pub fn iter_centered(&self) -> CellIter<'_> {
        self.field.iter_centered()
    }

    /// Tile at a stamp-local cell, wrapping both axes so the stamp repeats
    /// infinitely. An empty stamp yields `None`.
    pub fn tile_at_wrapped(&self, x: i32, y: i32) -> Option<Tile> {
        if self.field.is_empty() {
            return None;
        }
        let w = self.width() as i32;
        let h = self.height() as i32;
        self.field.get(x.rem_euclid(w), y.rem_euclid(h))
    }

    /// Check if `point` lies within the stamp's footprint when centered on `anchor`
    pub fn footprint_contains(&self, anchor: (i32, i32), point: (i32, i32)) -> bool {
        let (cx, cy) = self.center();
        let left = anchor.0 - cx;
        let top = anchor.1 - cy;
        point.0 >= left
            && point.1 >= top
            && point.0 < left + self.width() as i32
            && point.1 < top + self.height() as i32
    }
}

impl From<TileField> for Stamp {
    fn from(field: TileField) -> Self {
        Self::from_field(field)
    }
}
