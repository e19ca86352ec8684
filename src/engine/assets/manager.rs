// Central asset management system

use super::{AssetError, AssetLoader, AssetType};
use crate::engine::renderer::text::EMBEDDED_FONT;
use crate::engine::renderer::{Texture, TextureHandle, TextureManager};
use ab_glyph::FontArc;
use log::{info, warn};
use std::path::Path;

/// Central asset manager for the game
///
/// Loads textures into a `TextureManager` and the HUD font, substituting
/// generated placeholders or the built-in font for files that are missing.
pub struct AssetManager {
    loader: AssetLoader,
    stats: AssetStats,
}

impl AssetManager {
    /// Create a new asset manager rooted at `asset_path`
    pub fn new<P: AsRef<Path>>(asset_path: P) -> Self {
        let loader = AssetLoader::new(asset_path);
        info!("Loading assets from {}", loader.base_path().display());
        Self {
            loader,
            stats: AssetStats::default(),
        }
    }

    /// Load a texture from disk, or register `fallback()` if the file is absent.
    ///
    /// A file that exists but cannot be read or decoded is an error.
    pub fn load_texture_or<F>(
        &mut self,
        textures: &mut TextureManager,
        name: &str,
        fallback: F,
    ) -> Result<TextureHandle, AssetError>
    where
        F: FnOnce() -> Texture,
    {
        // Check if already loaded
        if let Some(handle) = textures.handle(name) {
            return Ok(handle);
        }

        let texture = match self.loader.load_bytes(AssetType::Texture, name) {
            Ok(bytes) => {
                let texture = Texture::from_bytes(&bytes).map_err(|source| AssetError::Decode {
                    name: name.to_string(),
                    source,
                })?;
                self.stats.loaded += 1;
                texture
            }
            Err(AssetError::NotFound(path)) => {
                warn!("Asset not found: {}, using placeholder", path);
                self.stats.placeholders += 1;
                fallback()
            }
            Err(err) => return Err(err),
        };

        Ok(textures.insert(name, texture))
    }

    /// Load a TrueType/OpenType font from `fonts/`, or the font compiled into
    /// the binary if the file is absent.
    pub fn load_font(&mut self, name: &str) -> Result<FontArc, AssetError> {
        match self.loader.load_bytes(AssetType::Font, name) {
            Ok(bytes) => {
                let font = FontArc::try_from_vec(bytes).map_err(|source| {
                    AssetError::InvalidFont {
                        name: name.to_string(),
                        source,
                    }
                })?;
                self.stats.loaded += 1;
                Ok(font)
            }
            Err(AssetError::NotFound(path)) => {
                warn!("Font not found: {}, using built-in font", path);
                self.stats.placeholders += 1;
                FontArc::try_from_slice(EMBEDDED_FONT).map_err(|source| AssetError::InvalidFont {
                    name: name.to_string(),
                    source,
                })
            }
            Err(err) => Err(err),
        }
    }

    /// Get statistics about loaded assets
    pub fn stats(&self) -> AssetStats {
        self.stats
    }
}

/// Statistics about loaded assets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssetStats {
    /// Textures and fonts read from disk
    pub loaded: usize,
    /// Generated textures or built-in fonts used because the file was missing
    pub placeholders: usize,
}
