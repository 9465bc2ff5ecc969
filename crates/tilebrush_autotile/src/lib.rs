//! Shape-mask autotile brushes
//!
//! A brush maps tile indices of one tileset to a 3x3 [`ShapeMask`] describing
//! how each tile visually connects toward its neighbors. When painting, the
//! matcher computes which neighbors are brush tiles ([`Occupancy`]) and picks
//! the first catalog entry, in declared order, whose mask fits.
//!
//! # Example
//!
//! ```rust,ignore
//! use tilebrush_autotile::{BrushCatalog, EdgePolicy, ResolvedBrush, ShapeKind, ShapeMask};
//! use tilebrush_core::{TileField, TilesetGeometry};
//! use uuid::Uuid;
//!
//! let tileset_id = Uuid::new_v4();
//! let geometry = TilesetGeometry::new(16, 16, 128, 128);
//!
//! let mut catalog = BrushCatalog::new("Grass".to_string(), tileset_id);
//! catalog.add_entry(0, ShapeMask::filled(ShapeKind::Full));
//! catalog.add_entry(1, ShapeMask::isolated(ShapeKind::DiagonalUL));
//! catalog.set_default(0);
//!
//! let brush = ResolvedBrush::new(&catalog, &geometry)?;
//! let mut field = TileField::new(10, 10);
//! tilebrush_autotile::place(&mut field, 5, 5, &brush, EdgePolicy::None, ShapeKind::Full);
//! ```

pub mod catalog;
pub mod error;
pub mod matcher;
pub mod shape;

// Re-export main types at crate root
pub use catalog::{BrushCatalog, BrushEntry, BrushLibrary, ResolvedBrush};
pub use error::BrushError;
pub use matcher::{
    decide, erase, fill_type_for_subposition, fix_region, match_best, occupancy, place,
    preview_place, EdgePolicy,
};
pub use shape::{Occupancy, ShapeKind, ShapeMask};

// Re-export tilebrush_core
pub use tilebrush_core;
