//! Scene description: meshes, the object hierarchy, the camera and the room layout.
//!
//! # Invariants
//! - Ray queries never mutate the scene.
//! - Intersection tests walk an object and all of its descendants.
//! - The model slot may be empty; every query treats that as "nothing there".

mod camera;
mod geometry;
mod object;
mod scene;

pub use camera::Camera;
pub use geometry::{Aabb, Mesh, Ray};
pub use object::SceneObject;
pub use scene::{AmbientLight, PointLight, Scene, Wall, placeholder_model};

pub fn crate_info() -> &'static str {
    "showroom-scene v0.1.0"
}
