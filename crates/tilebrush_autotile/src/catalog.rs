//! Brush catalogs
//!
//! A catalog is the authored rule set of one brush: an ordered list of
//! `(tile index, shape mask)` entries for a single tileset, plus the default
//! tile used when nothing matches. Order is significant; the matcher takes
//! the first entry that fits.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tilebrush_core::{Tile, TilesetGeometry};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::BrushError;
use crate::shape::{ShapeKind, ShapeMask};

/// One authored tile of a brush
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrushEntry {
    pub tile_index: u32,
    pub mask: ShapeMask,
}

/// An autotile brush for one tileset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrushCatalog {
    pub id: Uuid,
    pub name: String,
    /// Which tileset the brush tiles come from
    pub tileset_id: Uuid,
    /// Fallback tile when no entry matches
    #[serde(default)]
    pub default_tile: Option<u32>,
    /// Entries in match order
    #[serde(default)]
    entries: Vec<BrushEntry>,
}

impl BrushCatalog {
    pub fn new(name: String, tileset_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            tileset_id,
            default_tile: None,
            entries: Vec::new(),
        }
    }

    /// Add or update an entry. An existing entry keeps its position in the
    /// match order; a new one is appended.
    pub fn add_entry(&mut self, tile_index: u32, mask: ShapeMask) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.tile_index == tile_index) {
            entry.mask = mask;
        } else {
            self.entries.push(BrushEntry { tile_index, mask });
        }
    }

    /// Remove an entry. Clears the default tile if it was the removed one.
    pub fn remove_entry(&mut self, tile_index: u32) -> Option<BrushEntry> {
        let pos = self.entries.iter().position(|e| e.tile_index == tile_index)?;
        if self.default_tile == Some(tile_index) {
            self.default_tile = None;
        }
        Some(self.entries.remove(pos))
    }

    /// Mark the fallback tile
    pub fn set_default(&mut self, tile_index: u32) {
        self.default_tile = Some(tile_index);
    }

    /// Entries in match order
    pub fn entries(&self) -> &[BrushEntry] {
        &self.entries
    }

    /// Get the mask of a tile
    pub fn mask_of(&self, tile_index: u32) -> Option<&ShapeMask> {
        self.entries
            .iter()
            .find(|e| e.tile_index == tile_index)
            .map(|e| &e.mask)
    }

    /// Check if a tile index is governed by this brush
    pub fn contains(&self, tile_index: u32) -> bool {
        self.mask_of(tile_index).is_some()
    }
}

/// All brushes of a project
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrushLibrary {
    pub brushes: Vec<BrushCatalog>,
}

impl BrushLibrary {
    pub fn new() -> Self {
        Self {
            brushes: Vec::new(),
        }
    }

    /// Add a brush
    pub fn add(&mut self, brush: BrushCatalog) {
        self.brushes.push(brush);
    }

    /// Get brush by ID
    pub fn get(&self, id: Uuid) -> Option<&BrushCatalog> {
        self.brushes.iter().find(|b| b.id == id)
    }

    /// Get mutable brush by ID
    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut BrushCatalog> {
        self.brushes.iter_mut().find(|b| b.id == id)
    }

    /// Remove brush by ID
    pub fn remove(&mut self, id: Uuid) -> Option<BrushCatalog> {
        let pos = self.brushes.iter().position(|b| b.id == id)?;
        Some(self.brushes.remove(pos))
    }

    /// Get all brushes for a specific tileset
    pub fn for_tileset(&self, tileset_id: Uuid) -> Vec<&BrushCatalog> {
        self.brushes
            .iter()
            .filter(|b| b.tileset_id == tileset_id)
            .collect()
    }

    /// Look up a brush and validate it against its tileset geometry
    pub fn resolve<'a>(
        &'a self,
        id: Uuid,
        geometries: &HashMap<Uuid, TilesetGeometry>,
    ) -> Result<ResolvedBrush<'a>, BrushError> {
        let catalog = self.get(id).ok_or(BrushError::UnknownBrush(id))?;
        let geometry = geometries
            .get(&catalog.tileset_id)
            .ok_or(BrushError::UnknownTileset {
                brush: id,
                tileset: catalog.tileset_id,
            })?;
        ResolvedBrush::new(catalog, geometry)
    }
}

/// A catalog checked against its tileset and ready for matching.
///
/// Construction fails for brushes that must not be painted with. Entries
/// whose index lies outside the tileset are kept in the catalog but never
/// matched.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedBrush<'a> {
    catalog: &'a BrushCatalog,
    total_tiles: u32,
    default_tile: u32,
}

impl<'a> ResolvedBrush<'a> {
    pub fn new(catalog: &'a BrushCatalog, geometry: &TilesetGeometry) -> Result<Self, BrushError> {
        let default_tile = catalog
            .default_tile
            .ok_or(BrushError::NoDefaultTile(catalog.id))?;
        if !catalog.contains(default_tile) {
            return Err(BrushError::DefaultTileNotInCatalog {
                brush: catalog.id,
                tile: default_tile,
            });
        }
        let total_tiles = geometry.total_tiles();
        if default_tile >= total_tiles {
            return Err(BrushError::DefaultTileOutOfRange {
                brush: catalog.id,
                tile: default_tile,
                total: total_tiles,
            });
        }

        let out_of_range = catalog
            .entries()
            .iter()
            .filter(|e| e.tile_index >= total_tiles)
            .count();
        if out_of_range > 0 {
            warn!(
                "brush '{}' has {} entries outside its tileset ({} tiles); they will never match",
                catalog.name, out_of_range, total_tiles
            );
        }
        debug!("resolved brush '{}' ({} entries)", catalog.name, catalog.entries().len());

        Ok(Self {
            catalog,
            total_tiles,
            default_tile,
        })
    }

    pub fn catalog(&self) -> &'a BrushCatalog {
        self.catalog
    }

    pub fn tileset_id(&self) -> Uuid {
        self.catalog.tileset_id
    }

    pub fn default_tile(&self) -> u32 {
        self.default_tile
    }

    /// Entries that can be placed, in match order
    pub fn entries(&self) -> impl Iterator<Item = &'a BrushEntry> {
        let total = self.total_tiles;
        self.catalog
            .entries()
            .iter()
            .filter(move |e| e.tile_index < total)
    }

    /// Make a tile reference into this brush's tileset
    pub fn tile(&self, tile_index: u32) -> Tile {
        Tile::new(self.catalog.tileset_id, tile_index)
    }

    /// Check if a placed tile is governed by this brush
    pub fn owns(&self, tile: Option<Tile>) -> bool {
        match tile {
            Some(tile) => {
                tile.is_from(self.catalog.tileset_id)
                    && tile.tile_index < self.total_tiles
                    && self.catalog.contains(tile.tile_index)
            }
            None => false,
        }
    }

    /// Shape kind of a placed brush tile (its mask's center)
    pub fn kind_of(&self, tile_index: u32) -> ShapeKind {
        self.catalog
            .mask_of(tile_index)
            .map(|m| m.center())
            .unwrap_or(ShapeKind::Full)
    }
}
