// Texture loading and management system

use glam::Vec2;
use image::RgbaImage;
use std::collections::HashMap;

/// Handle to a loaded texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(usize);

impl TextureHandle {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

/// A decoded RGBA texture, kept in system memory until the renderer uploads it
pub struct Texture {
    pub pixels: RgbaImage,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Create a texture from encoded image bytes (PNG or JPEG)
    pub fn from_bytes(bytes: &[u8]) -> image::ImageResult<Self> {
        let img = image::load_from_memory(bytes)?;
        Ok(Self::from_image(img.to_rgba8()))
    }

    /// Wrap an already decoded image
    pub fn from_image(pixels: RgbaImage) -> Self {
        let (width, height) = pixels.dimensions();
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Create a solid color texture
    pub fn from_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        Self::from_image(RgbaImage::from_pixel(
            width.max(1),
            height.max(1),
            image::Rgba(color),
        ))
    }

    /// Create a stand-in sprite strip with `frames` columns.
    ///
    /// Odd frames are drawn darker so frame changes stay visible.
    pub fn placeholder_strip(frame_width: u32, frame_height: u32, frames: u32, color: [u8; 4]) -> Self {
        let frame_width = frame_width.max(1);
        let width = frame_width * frames.max(1);
        let dark = [color[0] / 2, color[1] / 2, color[2] / 2, color[3]];
        let pixels = RgbaImage::from_fn(width, frame_height.max(1), |x, _| {
            if (x / frame_width) % 2 == 0 {
                image::Rgba(color)
            } else {
                image::Rgba(dark)
            }
        });
        Self::from_image(pixels)
    }

    /// White disc on a transparent square, anti-aliased at the rim.
    ///
    /// Tinted and stretched, it draws filled ellipses of any color.
    pub fn disc(diameter: u32) -> Self {
        let diameter = diameter.max(1);
        let radius = diameter as f32 / 2.0;
        let pixels = RgbaImage::from_fn(diameter, diameter, |x, y| {
            let offset = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - Vec2::splat(radius);
            let coverage = (radius - offset.length() + 0.5).clamp(0.0, 1.0);
            image::Rgba([255, 255, 255, (coverage * 255.0).round() as u8])
        });
        Self::from_image(pixels)
    }

    /// Get the RGBA value of a texel, or None outside the texture
    #[cfg(test)]
    pub fn texel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels.get_pixel(x, y).0)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Manages texture loading and caching
#[derive(Default)]
pub struct TextureManager {
    textures: Vec<Texture>,
    name_to_handle: HashMap<String, TextureHandle>,
}

impl TextureManager {
    /// Create a new texture manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture under a name, returning the cached handle if the
    /// name is already known
    pub fn insert(&mut self, name: &str, texture: Texture) -> TextureHandle {
        if let Some(&handle) = self.name_to_handle.get(name) {
            return handle;
        }

        let handle = TextureHandle(self.textures.len());
        self.textures.push(texture);
        self.name_to_handle.insert(name.to_string(), handle);
        handle
    }

    /// Look up a texture handle by name
    pub fn handle(&self, name: &str) -> Option<TextureHandle> {
        self.name_to_handle.get(name).copied()
    }

    /// Get a texture by handle
    pub fn get(&self, handle: TextureHandle) -> Option<&Texture> {
        self.textures.get(handle.0)
    }

    /// Get the number of loaded textures
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }
}
