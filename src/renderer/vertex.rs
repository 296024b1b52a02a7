//! Vertex types for the flat and textured pipelines

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ColorVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl ColorVertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ColorVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// 2D vertex with position and texture coordinates
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TexturedVertex {
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
}

impl TexturedVertex {
    /// Vertex at an NDC position, sampling the texture so that the image
    /// spans the whole viewport
    pub fn at(position: Vec2) -> Self {
        Self {
            position: position.to_array(),
            tex_coords: ndc_to_uv(position).to_array(),
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TexturedVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Map NDC (y up) to texture space (v down)
#[inline]
pub fn ndc_to_uv(p: Vec2) -> Vec2 {
    Vec2::new((p.x + 1.0) * 0.5, (1.0 - p.y) * 0.5)
}

/// Pair positions with per-vertex colors, in order
pub fn flat_vertices(positions: &[Vec2], colors: &[[f32; 4]]) -> Vec<ColorVertex> {
    debug_assert_eq!(positions.len(), colors.len());
    positions
        .iter()
        .zip(colors)
        .map(|(p, c)| ColorVertex::new(p.x, p.y, *c))
        .collect()
}

/// Textured vertices for the given positions
pub fn textured_vertices(positions: &[Vec2]) -> Vec<TexturedVertex> {
    positions.iter().copied().map(TexturedVertex::at).collect()
}

/// Colors for scene elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const WALL_YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const WALL_BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    /// Per-vertex needle shading: tail bottom, tail top, tip bottom, tip top
    pub const NEEDLE: [[f32; 4]; 4] = [
        [0.5, 0.5, 0.5, 1.0],
        [1.0, 1.0, 1.0, 1.0],
        [0.0, 0.0, 0.0, 1.0],
        [1.0, 1.0, 1.0, 1.0],
    ];
    /// Frame clear color
    pub const CLEAR: wgpu::Color = wgpu::Color::BLACK;
}
