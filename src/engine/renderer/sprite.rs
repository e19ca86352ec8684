// Sprite batching: the canvas the match draws into, replayed by the GPU

use ab_glyph::FontArc;
use glam::{Affine2, Mat4, Vec2, Vec4};
use std::ops::Range;

use super::canvas::{Canvas, Color, TextAlign};
use super::text::GlyphAtlas;
use super::texture::{Texture, TextureHandle, TextureManager};
use super::vertex::SpriteInstance;
use crate::core::math::Rect;

/// Edge length of the generated disc texture used for filled ellipses
const DISC_RESOLUTION: u32 = 64;

/// Whole-texture source rect in UV space
const FULL_UV: Rect = Rect::new(0.0, 0.0, 1.0, 1.0);

/// A textured quad
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub texture: TextureHandle,
    /// Source region in normalised texture coordinates
    pub uv: Rect,
    /// Maps the unit square onto the screen; mirroring is a negative x scale
    pub transform: Affine2,
    /// Multiplied with every texel
    pub color: Color,
}

impl Sprite {
    /// Get the model matrix for this sprite
    pub fn transform_matrix(&self) -> Mat4 {
        let Affine2 {
            matrix2,
            translation,
        } = self.transform;
        Mat4::from_cols(
            matrix2.x_axis.extend(0.0).extend(0.0),
            matrix2.y_axis.extend(0.0).extend(0.0),
            Vec4::Z,
            translation.extend(0.0).extend(1.0),
        )
    }

    pub fn instance(&self) -> SpriteInstance {
        SpriteInstance {
            model: self.transform_matrix().to_cols_array_2d(),
            uv_rect: [self.uv.x, self.uv.y, self.uv.width, self.uv.height],
            color: self.color.to_f32_array(),
        }
    }
}

/// Collects one frame of sprites in draw order.
///
/// The batch keeps its sprites until `begin_frame`, so a redraw that runs no
/// tick presents the previous frame again.
pub struct SpriteBatch {
    textures: TextureManager,
    glyphs: GlyphAtlas,
    white: TextureHandle,
    disc: TextureHandle,
    sprites: Vec<Sprite>,
}

impl SpriteBatch {
    pub fn new(font: FontArc) -> Self {
        let mut textures = TextureManager::new();
        let white = textures.insert("white", Texture::from_color(1, 1, [255; 4]));
        let disc = textures.insert("disc", Texture::disc(DISC_RESOLUTION));
        let glyphs = GlyphAtlas::new(font, &mut textures);

        Self {
            textures,
            glyphs,
            white,
            disc,
            sprites: Vec::new(),
        }
    }

    pub fn textures(&self) -> &TextureManager {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut TextureManager {
        &mut self.textures
    }

    #[cfg(test)]
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    /// Drop the previous frame's sprites
    pub fn begin_frame(&mut self) {
        self.sprites.clear();
    }

    pub fn instances(&self) -> Vec<SpriteInstance> {
        self.sprites.iter().map(Sprite::instance).collect()
    }

    /// Runs of consecutive sprites sharing a texture, as instance ranges.
    ///
    /// Drawing the runs in order keeps the painter's order of the frame.
    pub fn batches(&self) -> Vec<(TextureHandle, Range<u32>)> {
        let mut batches: Vec<(TextureHandle, Range<u32>)> = Vec::new();
        for (index, sprite) in self.sprites.iter().enumerate() {
            let index = index as u32;
            match batches.last_mut() {
                Some((texture, range)) if *texture == sprite.texture => range.end = index + 1,
                _ => batches.push((sprite.texture, index..index + 1)),
            }
        }
        batches
    }

    /// Stretch the `uv` part of `texture` over an axis-aligned screen rect
    fn push_quad(&mut self, texture: TextureHandle, uv: Rect, dest: Rect, color: Color) {
        self.sprites.push(Sprite {
            texture,
            uv,
            transform: Affine2::from_scale_angle_translation(dest.size(), 0.0, dest.min()),
            color,
        });
    }

    fn uv_rect(&self, texture: TextureHandle, src: Rect) -> Option<Rect> {
        let size = self.textures.get(texture)?.size();
        Some(Rect::from_min_size(src.min() / size, src.size() / size))
    }
}

impl Canvas for SpriteBatch {
    fn blit(&mut self, texture: TextureHandle, src: Rect, transform: Affine2) {
        if src.width <= 0.0 || src.height <= 0.0 {
            return;
        }
        let Some(uv) = self.uv_rect(texture, src) else {
            return;
        };
        self.sprites.push(Sprite {
            texture,
            uv,
            transform: transform * Affine2::from_scale(src.size()),
            color: Color::WHITE,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        self.push_quad(self.white, FULL_UV, rect, color);
    }

    fn fill_ellipse(&mut self, center: Vec2, diameter: f32, color: Color) {
        if diameter <= 0.0 {
            return;
        }
        let dest = Rect::from_min_size(center - Vec2::splat(diameter / 2.0), Vec2::splat(diameter));
        self.push_quad(self.disc, FULL_UV, dest, color);
    }

    fn draw_text(&mut self, text: &str, position: Vec2, size: f32, align: TextAlign, color: Color) {
        let atlas = self.glyphs.texture();
        for glyph in self.glyphs.layout(text, position, size, align) {
            if let Some(uv) = self.uv_rect(atlas, glyph.src) {
                self.push_quad(atlas, uv, glyph.dest, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::renderer::text::EMBEDDED_FONT;
    use approx::assert_relative_eq;

    fn batch() -> SpriteBatch {
        SpriteBatch::new(FontArc::try_from_slice(EMBEDDED_FONT).unwrap())
    }

    /// 3 frames of 10x20 side by side
    fn strip(batch: &mut SpriteBatch) -> TextureHandle {
        batch
            .textures_mut()
            .insert("strip", Texture::placeholder_strip(10, 20, 3, [200, 0, 0, 255]))
    }

    fn corner(sprite: &Sprite, local: Vec2) -> Vec2 {
        sprite.transform_matrix().transform_point3(local.extend(0.0)).truncate()
    }

    #[test]
    fn test_blit_selects_frame_through_uvs() {
        let mut batch = batch();
        let texture = strip(&mut batch);
        batch.blit(
            texture,
            Rect::new(10.0, 0.0, 10.0, 20.0),
            Affine2::from_translation(Vec2::new(100.0, 50.0)),
        );

        let sprite = &batch.sprites()[0];
        assert_eq!(sprite.texture, texture);
        assert_relative_eq!(sprite.uv.x, 1.0 / 3.0);
        assert_relative_eq!(sprite.uv.width, 1.0 / 3.0);
        assert_relative_eq!(sprite.uv.height, 1.0);
        assert_eq!(corner(sprite, Vec2::ZERO), Vec2::new(100.0, 50.0));
        assert_eq!(corner(sprite, Vec2::ONE), Vec2::new(110.0, 70.0));
    }

    #[test]
    fn test_mirrored_blit_flips_in_the_model_matrix() {
        let mut batch = batch();
        let texture = strip(&mut batch);
        // translate(x + box width) * scale(-1, 1) * translate(offset)
        let mirror = Affine2::from_translation(Vec2::new(100.0 + 14.0, 0.0))
            * Affine2::from_scale(Vec2::new(-1.0, 1.0))
            * Affine2::from_translation(Vec2::new(2.0, 0.0));
        batch.blit(texture, Rect::new(0.0, 0.0, 10.0, 20.0), mirror);

        let sprite = &batch.sprites()[0];
        // uv stays unflipped; the left texel column lands on the right
        assert_relative_eq!(sprite.uv.x, 0.0);
        assert_eq!(corner(sprite, Vec2::ZERO), Vec2::new(112.0, 0.0));
        assert_eq!(corner(sprite, Vec2::new(1.0, 0.0)), Vec2::new(102.0, 0.0));
        assert!(sprite.transform.matrix2.determinant() < 0.0);
    }

    #[test]
    fn test_blit_unknown_texture_is_skipped() {
        let mut batch = batch();
        batch.blit(
            TextureHandle::from_index(99),
            Rect::new(0.0, 0.0, 4.0, 4.0),
            Affine2::IDENTITY,
        );
        batch.blit(batch.white, Rect::new(0.0, 0.0, 0.0, 4.0), Affine2::IDENTITY);
        assert!(batch.sprites().is_empty());
    }

    #[test]
    fn test_fill_rect_tints_white_texture() {
        let mut batch = batch();
        batch.fill_rect(Rect::new(100.0, 380.0, 95.0, 10.0), Color::RED);
        batch.fill_rect(Rect::new(0.0, 0.0, 0.0, 10.0), Color::RED);

        assert_eq!(batch.sprites().len(), 1);
        let sprite = &batch.sprites()[0];
        assert_eq!(sprite.texture, batch.white);
        assert_eq!(sprite.color, Color::RED);
        assert_eq!(corner(sprite, Vec2::ONE), Vec2::new(195.0, 390.0));
    }

    #[test]
    fn test_fill_ellipse_is_centred_disc() {
        let mut batch = batch();
        batch.fill_ellipse(Vec2::new(50.0, 60.0), 20.0, Color::WHITE);

        let sprite = &batch.sprites()[0];
        assert_eq!(sprite.texture, batch.disc);
        assert_eq!(corner(sprite, Vec2::ZERO), Vec2::new(40.0, 50.0));
        assert_eq!(corner(sprite, Vec2::ONE), Vec2::new(60.0, 70.0));
    }

    #[test]
    fn test_text_becomes_glyph_sprites() {
        let mut batch = batch();
        batch.draw_text(
            "Width: 64 Action: idle Frame: 0",
            Vec2::new(136.5, 370.0),
            16.0,
            TextAlign::Center,
            Color::WHITE,
        );

        let atlas = batch.glyphs.texture();
        // one quad per non-space character
        assert_eq!(batch.sprites().len(), 26);
        for sprite in batch.sprites() {
            assert_eq!(sprite.texture, atlas);
            assert!(sprite.uv.x >= 0.0 && sprite.uv.x + sprite.uv.width <= 1.0);
        }
    }

    #[test]
    fn test_sprites_survive_until_next_frame() {
        let mut batch = batch();
        batch.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0), Color::RED);
        let before = batch.instances();

        // a redraw without a tick presents the same sprites
        assert_eq!(batch.instances(), before);
        assert_eq!(batch.sprites().len(), 1);

        batch.begin_frame();
        assert!(batch.sprites().is_empty());
    }

    #[test]
    fn test_batches_follow_draw_order() {
        let mut batch = batch();
        let texture = strip(&mut batch);
        let src = Rect::new(0.0, 0.0, 10.0, 20.0);
        batch.blit(texture, src, Affine2::IDENTITY);
        batch.blit(texture, src, Affine2::IDENTITY);
        batch.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::RED);
        batch.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::RED);
        batch.blit(texture, src, Affine2::IDENTITY);

        assert_eq!(
            batch.batches(),
            vec![(texture, 0..2), (batch.white, 2..4), (texture, 4..5)]
        );
    }

    #[test]
    fn test_instance_carries_uv_and_tint() {
        let sprite = Sprite {
            texture: TextureHandle::from_index(0),
            uv: Rect::new(0.25, 0.0, 0.5, 1.0),
            transform: Affine2::from_translation(Vec2::new(3.0, 4.0)),
            color: Color::RED,
        };
        let instance = sprite.instance();
        assert_eq!(instance.uv_rect, [0.25, 0.0, 0.5, 1.0]);
        assert_eq!(instance.color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(instance.model[3], [3.0, 4.0, 0.0, 1.0]);
    }
}
