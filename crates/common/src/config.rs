use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, ShowroomError};

/// Top-level scene and interaction configuration.
///
/// Every field has a default, so a config file only needs to name what it
/// overrides. Load with [`ShowroomConfig::load`]; the result is validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowroomConfig {
    pub room: RoomConfig,
    pub camera: CameraConfig,
    pub ambient_light: AmbientLightConfig,
    pub point_light: PointLightConfig,
    pub parallax: ParallaxConfig,
    pub rotation: RotationConfig,
    pub walls: WallsConfig,
    pub model: ModelConfig,
    /// Upper bound applied to the host's device pixel ratio.
    pub max_pixel_ratio: f32,
}

impl Default for ShowroomConfig {
    fn default() -> Self {
        Self {
            room: RoomConfig::default(),
            camera: CameraConfig::default(),
            ambient_light: AmbientLightConfig::default(),
            point_light: PointLightConfig::default(),
            parallax: ParallaxConfig::default(),
            rotation: RotationConfig::default(),
            walls: WallsConfig::default(),
            model: ModelConfig::default(),
            max_pixel_ratio: 2.0,
        }
    }
}

impl ShowroomConfig {
    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&text)?;
        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would put NaN or runaway motion into the scene.
    pub fn validate(&self) -> Result<()> {
        let room = &self.room;
        if !(positive(room.width) && positive(room.height) && positive(room.depth)) {
            return Err(ShowroomError::Config(format!(
                "room dimensions must be positive, got {}x{}x{}",
                room.width, room.height, room.depth
            )));
        }

        let cam = &self.camera;
        if !(cam.fov_degrees > 0.0 && cam.fov_degrees < 180.0) {
            return Err(ShowroomError::Config(format!(
                "camera fov {} must be within (0, 180)",
                cam.fov_degrees
            )));
        }
        if !(positive(cam.near) && cam.far.is_finite() && cam.far > cam.near) {
            return Err(ShowroomError::Config(format!(
                "camera clip planes must satisfy 0 < near < far, got near={} far={}",
                cam.near, cam.far
            )));
        }
        if !(cam.position.is_finite() && cam.look_at.is_finite()) {
            return Err(ShowroomError::Config("camera vectors must be finite".into()));
        }

        let rot = &self.rotation;
        if !(rot.damping > 0.0 && rot.damping < 1.0) {
            return Err(ShowroomError::InvalidDamping(rot.damping));
        }
        if !(rot.sensitivity.is_finite() && rot.sensitivity >= 0.0) {
            return Err(ShowroomError::InvalidSensitivity(rot.sensitivity));
        }
        if let Some(min) = rot.min_velocity {
            if !(min.is_finite() && min >= 0.0) {
                return Err(ShowroomError::InvalidThreshold(min));
            }
        }
        if !(rot.base_speed.is_finite() && rot.base_speed >= 0.0) {
            return Err(ShowroomError::Config(format!(
                "base rotation speed {} must be finite and non-negative",
                rot.base_speed
            )));
        }

        let par = &self.parallax;
        if !(par.strength.is_finite() && (0.0..=1.0).contains(&par.smoothing)) {
            return Err(ShowroomError::Config(format!(
                "parallax strength must be finite and smoothing within [0, 1], got {} / {}",
                par.strength, par.smoothing
            )));
        }

        if !positive(self.model.size) || !self.model.position.is_finite() {
            return Err(ShowroomError::Config(
                "model placeholder needs a positive size and finite position".into(),
            ));
        }

        if !positive(self.max_pixel_ratio) {
            return Err(ShowroomError::Config(format!(
                "max pixel ratio {} must be positive",
                self.max_pixel_ratio
            )));
        }

        Ok(())
    }

    /// Clamp the host-reported device pixel ratio.
    pub fn pixel_ratio(&self, device_ratio: f32) -> f32 {
        device_ratio.min(self.max_pixel_ratio)
    }
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

/// Inner dimensions of the room box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            width: 14.0,
            height: 10.0,
            depth: 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub look_at: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 50.0,
            near: 0.1,
            far: 100.0,
            position: Vec3::new(0.0, 0.0, -10.0),
            look_at: Vec3::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientLightConfig {
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Default for AmbientLightConfig {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            intensity: 1.4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointLightConfig {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
}

impl Default for PointLightConfig {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            intensity: 100.0,
            position: Vec3::new(0.0, 0.0, -4.0),
        }
    }
}

/// Camera drift that follows the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// World units of camera offset at the viewport edge.
    pub strength: f32,
    /// Fraction of the remaining distance covered per frame.
    pub smoothing: f32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            strength: 1.0,
            smoothing: 0.1,
        }
    }
}

/// Automatic and manual model rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Radians per frame; each auto-rotation axis draws from [-base, base).
    pub base_speed: f32,
    /// Per-frame velocity multiplier after a drag ends.
    pub damping: f32,
    /// Radians of velocity per pixel of horizontal drag.
    pub sensitivity: f32,
    /// Velocities whose magnitude falls below this snap to zero. `None` disables the floor.
    pub min_velocity: Option<f32>,
    /// When set, a pointer-down only starts a drag over the model.
    pub require_hover_to_drag: bool,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            base_speed: 0.003,
            damping: 0.95,
            sensitivity: 0.005,
            min_velocity: None,
            require_hover_to_drag: false,
        }
    }
}

/// The five visible room surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallSide {
    Left,
    Right,
    Ceiling,
    Floor,
    Back,
}

impl WallSide {
    pub const ALL: [WallSide; 5] = [
        WallSide::Left,
        WallSide::Right,
        WallSide::Ceiling,
        WallSide::Floor,
        WallSide::Back,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Ceiling => "ceiling",
            Self::Floor => "floor",
            Self::Back => "back",
        }
    }
}

/// Surface parameters for one wall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallMaterial {
    /// Base colour used in place of the diffuse texture.
    pub color: [f32; 3],
    pub metalness: f32,
    pub roughness: f32,
    pub ao_map_intensity: f32,
    pub displacement_scale: f32,
    pub normal_scale: Vec2,
}

impl Default for WallMaterial {
    fn default() -> Self {
        Self {
            color: [0.72, 0.68, 0.62],
            metalness: 0.3,
            roughness: 1.0,
            ao_map_intensity: 0.5,
            displacement_scale: 0.05,
            normal_scale: Vec2::ONE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallsConfig {
    pub left: WallMaterial,
    pub right: WallMaterial,
    pub ceiling: WallMaterial,
    pub floor: WallMaterial,
    pub back: WallMaterial,
}

impl Default for WallsConfig {
    fn default() -> Self {
        let base = WallMaterial::default();
        Self {
            left: WallMaterial {
                normal_scale: Vec2::new(0.65, 2.0),
                ..base
            },
            right: WallMaterial {
                normal_scale: Vec2::new(1.57, 1.0),
                ..base
            },
            ceiling: WallMaterial {
                color: [0.8, 0.78, 0.74],
                ao_map_intensity: 1.0,
                normal_scale: Vec2::new(0.4, 1.5),
                ..base
            },
            floor: WallMaterial {
                color: [0.55, 0.5, 0.45],
                roughness: 0.6,
                ao_map_intensity: 2.7,
                normal_scale: Vec2::new(0.0, 0.7),
                ..base
            },
            back: WallMaterial {
                normal_scale: Vec2::new(2.0, 0.8),
                ..base
            },
        }
    }
}

impl WallsConfig {
    pub fn get(&self, side: WallSide) -> &WallMaterial {
        match side {
            WallSide::Left => &self.left,
            WallSide::Right => &self.right,
            WallSide::Ceiling => &self.ceiling,
            WallSide::Floor => &self.floor,
            WallSide::Back => &self.back,
        }
    }

    pub fn get_mut(&mut self, side: WallSide) -> &mut WallMaterial {
        match side {
            WallSide::Left => &mut self.left,
            WallSide::Right => &mut self.right,
            WallSide::Ceiling => &mut self.ceiling,
            WallSide::Floor => &mut self.floor,
            WallSide::Back => &mut self.back,
        }
    }
}

/// Placeholder model shown until a real asset is attached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Edge length of the placeholder cube.
    pub size: f32,
    pub position: Vec3,
    pub color: [f32; 3],
}

impl Default for ModelConfig {
    fn default() -> Self {
        // Resting on y = -0.5.
        Self {
            size: 0.8,
            position: Vec3::new(0.0, -0.5 + 0.4, 2.0),
            color: [0.0, 0.667, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = ShowroomConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rotation.damping, 0.95);
        assert_eq!(config.rotation.sensitivity, 0.005);
        assert!(!config.rotation.require_hover_to_drag);
        assert_eq!(config.room.width, 14.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ShowroomConfig::from_json_str(
            r#"{ "rotation": { "damping": 0.9, "require_hover_to_drag": true } }"#,
        )
        .unwrap();
        assert_eq!(config.rotation.damping, 0.9);
        assert!(config.rotation.require_hover_to_drag);
        assert_eq!(config.rotation.sensitivity, 0.005);
        assert_eq!(config.camera.fov_degrees, 50.0);
    }

    #[test]
    fn rejects_damping_outside_unit_interval() {
        for damping in [0.0, 1.0, 1.2, -0.5] {
            let mut config = ShowroomConfig::default();
            config.rotation.damping = damping;
            assert!(matches!(
                config.validate(),
                Err(ShowroomError::InvalidDamping(_))
            ));
        }
    }

    #[test]
    fn rejects_negative_threshold() {
        let mut config = ShowroomConfig::default();
        config.rotation.min_velocity = Some(-1e-4);
        assert!(matches!(
            config.validate(),
            Err(ShowroomError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn rejects_inverted_clip_planes() {
        let mut config = ShowroomConfig::default();
        config.camera.far = 0.05;
        assert!(matches!(config.validate(), Err(ShowroomError::Config(_))));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = ShowroomConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ShowroomError::Json(_)));
        assert!(!err.is_invalid_input());
    }

    #[test]
    fn json_round_trip_preserves_walls() {
        let config = ShowroomConfig::default();
        let text = config.to_json_pretty().unwrap();
        let back = ShowroomConfig::from_json_str(&text).unwrap();
        assert_eq!(back.walls.get(WallSide::Floor).roughness, 0.6);
        assert_eq!(back, config);
    }

    #[test]
    fn pixel_ratio_is_capped() {
        let config = ShowroomConfig::default();
        assert_eq!(config.pixel_ratio(3.0), 2.0);
        assert_eq!(config.pixel_ratio(1.25), 1.25);
    }
}
