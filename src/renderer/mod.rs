//! Rendering module
//!
//! The scene is built as vertex-colored triangles in world coordinates, then
//! mapped to NDC and drawn through a single WebGPU pipeline.

pub mod pipeline;
pub mod scene;
pub mod shapes;

pub use pipeline::{RenderError, RenderState, world_to_ndc};
pub use scene::build_scene;
pub use shapes::Vertex;
