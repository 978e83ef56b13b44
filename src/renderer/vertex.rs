//! Vertex type for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::palette::Rgba;

/// 2D vertex with position and color, laid out for direct upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Rgba,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Rgba) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Byte stride of one vertex
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Reinterpret vertices as raw bytes for a vertex buffer
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

