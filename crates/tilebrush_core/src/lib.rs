//! Core data structures for tilebrush
//!
//! This crate provides the fundamental types for authoring tile layers:
//! - `TileField` - A rectangular grid of optional tile references
//! - `Tile` - A reference to one cell of a tileset image
//! - `TilesetGeometry` - Pixel/grid conversions for a sliced tileset image
//! - `Stamp` - A multi-cell tile pattern used as a brush head
//! - `CellRect` - A rectangular selection in cell coordinates
//! - `Layer` - A single layer (tiles or objects)
//!
//! Nothing in here reads or writes files; persistence is left to the caller.

mod field;
mod geometry;
mod layer;
mod selection;
mod stamp;
mod tile;

pub use field::{CellIter, CellRef, TileField};
pub use geometry::TilesetGeometry;
pub use layer::{Layer, LayerData, LayerType};
pub use selection::CellRect;
pub use stamp::Stamp;
pub use tile::Tile;
