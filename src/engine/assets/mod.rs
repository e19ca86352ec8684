// Asset management system
//
// Finds sprite sheets, backgrounds and the HUD font on disk and decodes them.

mod loader;
mod manager;

pub use loader::{AssetLoader, AssetType};
pub use manager::AssetManager;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to decode {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to parse font {name}: {source}")]
    InvalidFont {
        name: String,
        #[source]
        source: ab_glyph::InvalidFont,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
