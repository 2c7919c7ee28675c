//! WebGPU rendering module
//!
//! This module contains the GPU context, the 2D camera, shape tessellation and
//! the shape renderer.

pub mod camera;
pub mod context;
pub mod mesh;
pub mod pipeline;
pub mod renderer;

pub use camera::Camera;
pub use context::{GpuContext, RenderError};
pub use mesh::{Mesh, MeshBuilder, Vertex};
pub use renderer::{ShapeRenderer, BACKGROUND};
