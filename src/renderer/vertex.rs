//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
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

/// Colors for scene elements (0xRRGGBB)
pub mod colors {
    pub const ANCHOR: u32 = 0x00ddff;
    pub const SEGMENT: u32 = 0xff00ff;
    pub const BACKGROUND: u32 = 0x333333;
    pub const GUIDE: u32 = 0x44ff44;
    pub const BALL: u32 = 0xffdd00;
}

/// Unpack a 0xRRGGBB color with an alpha
pub fn rgba(hex: u32, alpha: f32) -> [f32; 4] {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    [channel(16), channel(8), channel(0), alpha]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_unpacks_channels() {
        assert_eq!(rgba(0xff00ff, 0.5), [1.0, 0.0, 1.0, 0.5]);
        let [r, g, b, a] = rgba(colors::BALL, 1.0);
        assert_eq!(r, 1.0);
        assert!((g - 221.0 / 255.0).abs() < 1e-6);
        assert_eq!(b, 0.0);
        assert_eq!(a, 1.0);
    }
}
