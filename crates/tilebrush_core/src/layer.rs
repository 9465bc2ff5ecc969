//! Layer types for tile and object layers

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::TileField;

/// A layer (tiles or objects)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub id: Uuid,
    pub name: String,
    pub visible: bool,
    pub data: LayerData,
}

impl Layer {
    /// Create a new empty tile layer
    pub fn new_tile_layer(name: String, width: u32, height: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            visible: true,
            data: LayerData::Tiles {
                field: TileField::new(width, height),
            },
        }
    }

    /// Create a new object layer
    pub fn new_object_layer(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            visible: true,
            data: LayerData::Objects {
                entities: Vec::new(),
            },
        }
    }

    /// Get the type of this layer
    pub fn layer_type(&self) -> LayerType {
        match &self.data {
            LayerData::Tiles { .. } => LayerType::Tiles,
            LayerData::Objects { .. } => LayerType::Objects,
        }
    }

    /// Get the tile field if this is a tile layer
    pub fn tile_field(&self) -> Option<&TileField> {
        match &self.data {
            LayerData::Tiles { field } => Some(field),
            LayerData::Objects { .. } => None,
        }
    }

    /// Get the tile field mutably if this is a tile layer
    pub fn tile_field_mut(&mut self) -> Option<&mut TileField> {
        match &mut self.data {
            LayerData::Tiles { field } => Some(field),
            LayerData::Objects { .. } => None,
        }
    }
}

/// The type of a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerType {
    Tiles,
    Objects,
}

/// The data contained in a layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LayerData {
    /// Tile layer
    Tiles { field: TileField },
    /// Object layer containing entity references
    Objects {
        /// Entity IDs placed on this layer
        entities: Vec<Uuid>,
    },
}
