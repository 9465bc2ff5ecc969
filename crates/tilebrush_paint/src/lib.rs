//! Paint tools for tile fields
//!
//! This crate turns the tile field and autotile brush primitives into the
//! editing tools of a map editor:
//! - [`ops`] - stamp draw, flood fill, global replace, copy/paste/erase
//! - [`stroke`] - per-gesture state for stamp and brush strokes
//! - [`gesture`] - the Idle/Active gesture machine and the history hand-off
//! - [`session`] - tool dispatch from pointer events
//!
//! Everything is synchronous and single-threaded. A gesture snapshots the
//! field on mouse down and hands `(before, after)` to an [`EditHistory`] on
//! mouse up, unless nothing changed.

pub mod error;
pub mod gesture;
pub mod ops;
pub mod session;
pub mod settings;
pub mod stroke;

pub use error::PaintError;
pub use gesture::{EditHistory, Gesture, TileChanges};
pub use ops::{copy_region, draw_stamp, erase_region, flood_fill, paste, replace};
pub use session::{BrushContext, PaintSession, Tool};
pub use settings::PaintSettings;
pub use stroke::{BrushStroke, StampStroke};

// Re-export the lower layers
pub use tilebrush_autotile;
pub use tilebrush_core;
