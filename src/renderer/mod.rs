//! WebGPU rendering module
//!
//! The scene is flat-colored rectangles: [`scene::build_scene`] turns the game
//! state into triangles in world space, and [`RenderState`] maps them to clip
//! space and draws them.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
