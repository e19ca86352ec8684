// Drawing primitives consumed by the game layer

use glam::{Affine2, Vec2};

use super::texture::TextureHandle;
use crate::core::math::Rect;

/// RGBA color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const WHITE: Color = Color([255, 255, 255, 255]);
    pub const BLACK: Color = Color([0, 0, 0, 255]);
    pub const RED: Color = Color([255, 0, 0, 255]);

    /// Channels scaled to `0.0..=1.0`
    pub fn to_f32_array(self) -> [f32; 4] {
        self.0.map(|channel| channel as f32 / 255.0)
    }
}

/// Horizontal anchoring of a text line relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// Immediate-mode 2D drawing surface.
///
/// Everything the match draws goes through this trait, so the game layer never
/// touches GPU state directly.
pub trait Canvas {
    /// Draw the `src` region of a texture.
    ///
    /// The region's local space `[0, w) x [0, h)` is mapped to the screen by
    /// `transform`; a negative x scale mirrors the image.
    fn blit(&mut self, texture: TextureHandle, src: Rect, transform: Affine2);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Filled circle/ellipse of the given diameter centred on `center`
    fn fill_ellipse(&mut self, center: Vec2, diameter: f32, color: Color);

    /// Draw a single line of text; `position.y` is the baseline
    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, align: TextAlign, color: Color);

    /// Stretch a whole texture over `dest`
    fn draw_image(&mut self, texture: TextureHandle, texture_size: Vec2, dest: Rect) {
        if texture_size.x <= 0.0 || texture_size.y <= 0.0 {
            return;
        }
        let scale = dest.size() / texture_size;
        let transform = Affine2::from_scale_angle_translation(scale, 0.0, dest.min());
        self.blit(
            texture,
            Rect::from_min_size(Vec2::ZERO, texture_size),
            transform,
        );
    }
}
