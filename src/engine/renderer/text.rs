// Glyph atlas: font outlines rasterised once with ab_glyph, drawn as sprites

use ab_glyph::{point, Font, FontArc, GlyphId, PxScale, ScaleFont};
use glam::Vec2;
use image::{Rgba, RgbaImage};
use std::collections::HashMap;

use super::canvas::TextAlign;
use super::texture::{Texture, TextureHandle, TextureManager};
use crate::core::math::Rect;

/// Font compiled into the binary, used when no font file is found on disk
pub const EMBEDDED_FONT: &[u8] = include_bytes!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/fonts/DejaVuSans.ttf"
));

/// Pixel size glyphs are rasterised at; other sizes scale the quads
const ATLAS_PX: f32 = 32.0;
const ATLAS_WIDTH: u32 = 512;
/// Transparent gap around each glyph so filtering never picks up a neighbour
const PADDING: u32 = 1;

struct GlyphInfo {
    id: GlyphId,
    /// Atlas region in pixels; None for blank glyphs such as space
    src: Option<Rect>,
    /// Top-left of the bitmap relative to the pen on the baseline
    offset: Vec2,
}

/// A glyph placed on screen: which part of the atlas goes where
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad {
    pub src: Rect,
    pub dest: Rect,
}

/// Printable ASCII rasterised into a single white texture whose alpha is
/// glyph coverage, so any text color is a tint.
pub struct GlyphAtlas {
    font: FontArc,
    glyphs: HashMap<char, GlyphInfo>,
    texture: TextureHandle,
}

impl GlyphAtlas {
    pub fn new(font: FontArc, textures: &mut TextureManager) -> Self {
        let scale = PxScale::from(ATLAS_PX);
        let mut glyphs = HashMap::new();
        let mut outlines = Vec::new();
        let (mut cursor_x, mut cursor_y, mut row_height) = (PADDING, PADDING, 0);

        // Shelf packing, left to right then row by row
        for ch in ' '..='~' {
            let id = font.glyph_id(ch);
            let Some(outline) = font.outline_glyph(id.with_scale_and_position(scale, point(0.0, 0.0)))
            else {
                glyphs.insert(
                    ch,
                    GlyphInfo {
                        id,
                        src: None,
                        offset: Vec2::ZERO,
                    },
                );
                continue;
            };

            let bounds = outline.px_bounds();
            let width = bounds.width().ceil().max(1.0) as u32;
            let height = bounds.height().ceil().max(1.0) as u32;
            if cursor_x + width + PADDING > ATLAS_WIDTH {
                cursor_x = PADDING;
                cursor_y += row_height + PADDING;
                row_height = 0;
            }

            glyphs.insert(
                ch,
                GlyphInfo {
                    id,
                    src: Some(Rect::new(
                        cursor_x as f32,
                        cursor_y as f32,
                        width as f32,
                        height as f32,
                    )),
                    offset: Vec2::new(bounds.min.x, bounds.min.y),
                },
            );
            outlines.push((cursor_x, cursor_y, outline));
            cursor_x += width + PADDING;
            row_height = row_height.max(height);
        }

        let atlas_height = cursor_y + row_height + PADDING;
        let mut pixels = RgbaImage::from_pixel(ATLAS_WIDTH, atlas_height, Rgba([255, 255, 255, 0]));
        for (left, top, outline) in &outlines {
            outline.draw(|x, y, coverage| {
                if let Some(pixel) = pixels.get_pixel_mut_checked(left + x, top + y) {
                    pixel.0[3] = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                }
            });
        }

        let texture = textures.insert("glyph_atlas", Texture::from_image(pixels));
        Self {
            font,
            glyphs,
            texture,
        }
    }

    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    /// Width of a single line drawn at `size` pixels, kerning included
    pub fn measure(&self, text: &str, size: f32) -> f32 {
        self.walk(text, |_, _| {}) * size / ATLAS_PX
    }

    /// Place each visible glyph of `text`; `position.y` is the baseline
    pub fn layout(&self, text: &str, position: Vec2, size: f32, align: TextAlign) -> Vec<GlyphQuad> {
        let factor = size / ATLAS_PX;
        let left = match align {
            TextAlign::Left => position.x,
            TextAlign::Center => position.x - self.measure(text, size) / 2.0,
        };
        let origin = Vec2::new(left, position.y);

        let mut quads = Vec::with_capacity(text.len());
        self.walk(text, |pen, glyph| {
            if let Some(src) = glyph.src {
                let min = origin + (Vec2::new(pen, 0.0) + glyph.offset) * factor;
                quads.push(GlyphQuad {
                    src,
                    dest: Rect::from_min_size(min, src.size() * factor),
                });
            }
        });
        quads
    }

    /// Visit every atlas glyph with its pen position at atlas scale; returns
    /// the total advance. Characters outside the atlas still advance the pen.
    fn walk(&self, text: &str, mut visit: impl FnMut(f32, &GlyphInfo)) -> f32 {
        let scaled = self.font.as_scaled(PxScale::from(ATLAS_PX));
        let mut pen = 0.0;
        let mut previous: Option<GlyphId> = None;

        for ch in text.chars() {
            let glyph = self.glyphs.get(&ch);
            let id = glyph.map_or_else(|| self.font.glyph_id(ch), |g| g.id);
            if let Some(previous) = previous {
                pen += scaled.kern(previous, id);
            }
            if let Some(glyph) = glyph {
                visit(pen, glyph);
            }
            pen += scaled.h_advance(id);
            previous = Some(id);
        }
        pen
    }
}
