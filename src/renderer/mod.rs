//! WebGPU rendering module
//!
//! The scene is recorded as 2D drawing commands in screen pixels, tessellated
//! to colored triangles, and drawn in a single pass.

pub mod graphics;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use graphics::Graphics;
pub use pipeline::RenderState;
pub use scene::draw_scene;
pub use vertex::Vertex;
