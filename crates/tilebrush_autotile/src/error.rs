//! Brush configuration errors

use thiserror::Error;
use uuid::Uuid;

/// A brush that cannot be used for painting.
///
/// These are authoring mistakes, not runtime conditions: brush tools refuse
/// to run and the caller falls back to plain stamp drawing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BrushError {
    #[error("no brush with id {0}")]
    UnknownBrush(Uuid),
    #[error("brush {brush} references tileset {tileset} which has no geometry")]
    UnknownTileset { brush: Uuid, tileset: Uuid },
    #[error("brush {0} has no default tile")]
    NoDefaultTile(Uuid),
    #[error("default tile {tile} of brush {brush} is not in its catalog")]
    DefaultTileNotInCatalog { brush: Uuid, tile: u32 },
    #[error("default tile {tile} of brush {brush} is outside its tileset ({total} tiles)")]
    DefaultTileOutOfRange { brush: Uuid, tile: u32, total: u32 },
}
