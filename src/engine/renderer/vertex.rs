// Vertex and per-sprite instance layouts for the sprite pipeline

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Corner of the unit quad every sprite is drawn from
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    /// Position in sprite-local space, `[0, 1] x [0, 1]`
    pub position: [f32; 2],
    /// Texture coordinates (UV) before the instance's source rect is applied
    pub tex_coords: [f32; 2],
}

impl Vertex {
    pub fn new(position: Vec2, tex_coords: Vec2) -> Self {
        Self {
            position: position.to_array(),
            tex_coords: tex_coords.to_array(),
        }
    }

    /// Unit square with its origin at the top-left, matching texture space
    pub fn unit_quad() -> [Vertex; 4] {
        [
            Vertex::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0)),
            Vertex::new(Vec2::new(1.0, 0.0), Vec2::new(1.0, 0.0)),
            Vertex::new(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0)),
            Vertex::new(Vec2::new(0.0, 1.0), Vec2::new(0.0, 1.0)),
        ]
    }

    pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

    /// Get the vertex buffer layout descriptor
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // Position
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                // Tex Coords
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Per-sprite data streamed to the GPU every frame
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    /// Unit quad to screen pixels
    pub model: [[f32; 4]; 4],
    /// Source rect in UV space: min x, min y, width, height
    pub uv_rect: [f32; 4],
    /// Tint multiplied with the texel
    pub color: [f32; 4],
}

impl SpriteInstance {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<SpriteInstance>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &wgpu::vertex_attr_array![
            2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4,
            6 => Float32x4, 7 => Float32x4
        ],
    };
}
