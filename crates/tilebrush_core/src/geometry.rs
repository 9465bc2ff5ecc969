//! Tileset geometry: slicing a tileset image into a regular grid of cells

use serde::{Deserialize, Serialize};

/// How a tileset image is sliced into tiles.
///
/// Tiles are `cell_width` x `cell_height` pixels, separated by `gap_x`/`gap_y`
/// pixels, starting `offset_x`/`offset_y` pixels into the image. Only whole
/// tiles count; a partial column or row at the image edge is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TilesetGeometry {
    pub cell_width: u32,
    pub cell_height: u32,
    #[serde(default)]
    pub gap_x: u32,
    #[serde(default)]
    pub gap_y: u32,
    #[serde(default)]
    pub offset_x: u32,
    #[serde(default)]
    pub offset_y: u32,
    pub image_width: u32,
    pub image_height: u32,
}

impl TilesetGeometry {
    /// Create geometry for an image with no gaps or offsets
    pub fn new(cell_width: u32, cell_height: u32, image_width: u32, image_height: u32) -> Self {
        Self {
            cell_width,
            cell_height,
            gap_x: 0,
            gap_y: 0,
            offset_x: 0,
            offset_y: 0,
            image_width,
            image_height,
        }
    }

    /// Set the spacing between tiles
    pub fn with_gap(mut self, gap_x: u32, gap_y: u32) -> Self {
        self.gap_x = gap_x;
        self.gap_y = gap_y;
        self
    }

    /// Set the margin before the first tile
    pub fn with_offset(mut self, offset_x: u32, offset_y: u32) -> Self {
        self.offset_x = offset_x;
        self.offset_y = offset_y;
        self
    }

    /// Number of whole tiles per image row
    pub fn tiles_per_row(&self) -> u32 {
        tiles_along(self.image_width, self.offset_x, self.gap_x, self.cell_width)
    }

    /// Number of whole tiles per image column
    pub fn tiles_per_column(&self) -> u32 {
        tiles_along(self.image_height, self.offset_y, self.gap_y, self.cell_height)
    }

    /// Total tile count. Exclusive upper bound for tile indices.
    pub fn total_tiles(&self) -> u32 {
        self.tiles_per_row().saturating_mul(self.tiles_per_column())
    }

    /// Check if a tile index exists in this tileset
    pub fn contains_index(&self, index: u32) -> bool {
        index < self.total_tiles()
    }

    /// Convert (column, row) to a tile index
    /// Returns None if the column or row is out of range
    pub fn index_of(&self, column: u32, row: u32) -> Option<u32> {
        let per_row = self.tiles_per_row();
        if column >= per_row || row >= self.tiles_per_column() {
            return None;
        }
        row.checked_mul(per_row)?.checked_add(column)
    }

    /// Convert a tile index to (column, row)
    /// Returns None if the index is out of range
    pub fn cell_of(&self, index: u32) -> Option<(u32, u32)> {
        if !self.contains_index(index) {
            return None;
        }
        let per_row = self.tiles_per_row();
        Some((index % per_row, index / per_row))
    }

    /// Top-left pixel of a tile within the image
    pub fn tile_origin(&self, index: u32) -> Option<(u32, u32)> {
        let (column, row) = self.cell_of(index)?;
        let stride_x = self.cell_width.saturating_add(self.gap_x);
        let stride_y = self.cell_height.saturating_add(self.gap_y);
        Some((
            self.offset_x.saturating_add(column.saturating_mul(stride_x)),
            self.offset_y.saturating_add(row.saturating_mul(stride_y)),
        ))
    }

    /// Find the tile under an image pixel.
    /// Pixels in the offset margin, in a gap, or past the last whole tile map to None.
    pub fn tile_at_pixel(&self, px: u32, py: u32) -> Option<u32> {
        let column = slot_along(px, self.offset_x, self.gap_x, self.cell_width)?;
        let row = slot_along(py, self.offset_y, self.gap_y, self.cell_height)?;
        self.index_of(column, row)
    }

    /// Convert a pixel position in layer space to the cell containing it.
    /// Negative positions map to negative cells.
    pub fn pixel_to_cell(&self, px: f32, py: f32) -> (i32, i32) {
        let w = self.cell_width.max(1) as f32;
        let h = self.cell_height.max(1) as f32;
        ((px / w).floor() as i32, (py / h).floor() as i32)
    }

    /// Position of a layer-space pixel relative to the top-left of its cell
    pub fn pixel_in_cell(&self, px: f32, py: f32) -> (f32, f32) {
        let w = self.cell_width.max(1) as f32;
        let h = self.cell_height.max(1) as f32;
        (px.rem_euclid(w), py.rem_euclid(h))
    }
}

/// floor((extent - offset + gap) / (cell + gap)), saturating at zero
fn tiles_along(extent: u32, offset: u32, gap: u32, cell: u32) -> u32 {
    let stride = cell.saturating_add(gap);
    if stride == 0 || cell == 0 || offset >= extent {
        return 0;
    }
    (extent - offset).saturating_add(gap) / stride
}

fn slot_along(pixel: u32, offset: u32, gap: u32, cell: u32) -> Option<u32> {
    if pixel < offset || cell == 0 {
        return None;
    }
    let local = pixel - offset;
    let stride = cell.saturating_add(gap);
    if local % stride >= cell {
        return None;
    }
    Some(local / stride)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_grid() {
        let geometry = TilesetGeometry::new(16, 16, 64, 32);

        assert_eq!(geometry.tiles_per_row(), 4);
        assert_eq!(geometry.tiles_per_column(), 2);
        assert_eq!(geometry.total_tiles(), 8);
        assert_eq!(geometry.index_of(3, 1), Some(7));
        assert_eq!(geometry.index_of(4, 0), None);
        assert_eq!(geometry.cell_of(5), Some((1, 1)));
        assert_eq!(geometry.cell_of(8), None);
    }

    #[test]
    fn test_gaps_and_offsets() {
        // 2px margin, 16px tiles, 1px gaps: 2 + 16 + 1 + 16 + 1 + 16 = 52
        let geometry = TilesetGeometry::new(16, 16, 52, 35)
            .with_gap(1, 1)
            .with_offset(2, 2);

        assert_eq!(geometry.tiles_per_row(), 3);
        assert_eq!(geometry.tiles_per_column(), 2);
        assert_eq!(geometry.tile_origin(0), Some((2, 2)));
        assert_eq!(geometry.tile_origin(4), Some((19, 19)));
    }

    #[test]
    fn test_partial_tiles_are_ignored() {
        let geometry = TilesetGeometry::new(16, 16, 40, 16);
        assert_eq!(geometry.tiles_per_row(), 2);
        assert_eq!(geometry.tile_at_pixel(35, 0), None);
    }

    #[test]
    fn test_tile_at_pixel() {
        let geometry = TilesetGeometry::new(16, 16, 52, 35)
            .with_gap(1, 1)
            .with_offset(2, 2);

        assert_eq!(geometry.tile_at_pixel(0, 5), None); // margin
        assert_eq!(geometry.tile_at_pixel(2, 2), Some(0));
        assert_eq!(geometry.tile_at_pixel(18, 2), None); // gap column
        assert_eq!(geometry.tile_at_pixel(19, 20), Some(4));
    }

    #[test]
    fn test_degenerate_geometry() {
        let geometry = TilesetGeometry::new(0, 16, 64, 64);
        assert_eq!(geometry.total_tiles(), 0);
        assert_eq!(geometry.tile_at_pixel(3, 3), None);

        let geometry = TilesetGeometry::new(16, 16, 64, 64).with_offset(80, 0);
        assert_eq!(geometry.tiles_per_row(), 0);
    }

    #[test]
    fn test_huge_dimensions_saturate() {
        // 1x1 cells over a u32::MAX square image: the tile count does not fit in u32
        let geometry = TilesetGeometry::new(1, 1, u32::MAX, u32::MAX);
        assert_eq!(geometry.tiles_per_row(), u32::MAX);
        assert_eq!(geometry.total_tiles(), u32::MAX);
        assert_eq!(geometry.index_of(5, 0), Some(5));
        assert_eq!(geometry.index_of(0, 1), Some(u32::MAX));
        assert_eq!(geometry.index_of(1, 1), None);

        // cell + gap past u32::MAX
        let geometry = TilesetGeometry::new(u32::MAX, 16, u32::MAX, 64).with_gap(8, 0);
        assert_eq!(geometry.tiles_per_row(), 1);
        assert_eq!(geometry.total_tiles(), 4);
        assert_eq!(geometry.tile_at_pixel(5, 20), Some(1));
        assert_eq!(geometry.tile_origin(3), Some((0, 48)));
    }

    #[test]
    fn test_pixel_to_cell() {
        let geometry = TilesetGeometry::new(16, 8, 64, 64);

        assert_eq!(geometry.pixel_to_cell(17.0, 9.0), (1, 1));
        assert_eq!(geometry.pixel_to_cell(-1.0, -1.0), (-1, -1));
        assert_eq!(geometry.pixel_in_cell(17.0, 9.0), (1.0, 1.0));
        assert_eq!(geometry.pixel_in_cell(-1.0, 0.0), (15.0, 0.0));
    }
}
