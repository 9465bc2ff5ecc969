//! Tile references

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A reference to one cell of a tileset image.
///
/// Two tiles are the same iff both the tileset and the index match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub tileset_id: Uuid,
    pub tile_index: u32,
}

impl Tile {
    pub fn new(tileset_id: Uuid, tile_index: u32) -> Self {
        Self {
            tileset_id,
            tile_index,
        }
    }

    /// Check if this tile comes from the given tileset
    pub fn is_from(&self, tileset_id: Uuid) -> bool {
        self.tileset_id == tileset_id
    }
}
