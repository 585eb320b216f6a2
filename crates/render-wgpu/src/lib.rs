//! wgpu render backend for the showroom.
//!
//! Each frame the scene tree is flattened on the CPU into world-space
//! triangles and drawn with a single lit pipeline.
//!
//! # Invariants
//! - The renderer reads the session; it never mutates scene or interaction state.
//! - Geometry is rebuilt every frame, so the picture always matches the scene.

mod frame;
mod gpu;
mod shaders;

pub use frame::{FrameGeometry, SceneFlattener, Vertex};
pub use gpu::WgpuRenderer;
