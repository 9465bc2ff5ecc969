//! Paint errors

use thiserror::Error;
use tilebrush_autotile::BrushError;

/// Errors returned by paint sessions.
///
/// None of these leave a field partially written: they are raised before a
/// gesture touches any cell.
#[derive(Debug, Error)]
pub enum PaintError {
    #[error("brush unavailable: {0}")]
    Brush(#[from] BrushError),
    #[error("no brush selected")]
    NoBrushSelected,
    #[error("layer '{0}' is not a tile layer")]
    NotATileLayer(String),
    #[error("Settings error: {0}")]
    Settings(String),
}

impl From<toml::de::Error> for PaintError {
    fn from(err: toml::de::Error) -> Self {
        PaintError::Settings(err.to_string())
    }
}

impl From<toml::ser::Error> for PaintError {
    fn from(err: toml::ser::Error) -> Self {
        PaintError::Settings(err.to_string())
    }
}
