//! Shared types for the showroom scene: transforms, viewport, errors, configuration.
//!
//! # Invariants
//! - A `Transform` keeps its Euler rotation and its quaternion orientation in sync.
//! - A `Viewport` always has finite, strictly positive dimensions.

pub mod config;
pub mod error;
pub mod types;

pub use config::{
    AmbientLightConfig, CameraConfig, ModelConfig, ParallaxConfig, PointLightConfig, RoomConfig,
    RotationConfig, ShowroomConfig, WallMaterial, WallSide, WallsConfig,
};
pub use error::{Result, ShowroomError};
pub use types::{Transform, Viewport};

pub fn crate_info() -> &'static str {
    "showroom-common v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("common"));
    }
}
