use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::error::{Result, ShowroomError};

/// Spatial transform: position, rotation, scale.
///
/// Rotation is held twice: as XYZ Euler angles (radians, unbounded) and as a
/// quaternion. Writing either view recomputes the other, so callers may add to
/// the Euler angles and compose quaternions on the same object in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub scale: Vec3,
    rotation: Vec3,
    orientation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Builder-style Euler rotation (XYZ order).
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.set_rotation(rotation);
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Euler angles in XYZ order, radians.
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.orientation = euler_to_quat(rotation);
    }

    /// Add a per-axis increment to the Euler angles. Angles are not wrapped.
    pub fn rotate_euler(&mut self, delta: Vec3) {
        self.set_rotation(self.rotation + delta);
    }

    pub fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation.normalize();
        let (x, y, z) = self.orientation.to_euler(EulerRot::XYZ);
        self.rotation = Vec3::new(x, y, z);
    }

    /// Compose `delta` before the current orientation: `orientation = delta * orientation`.
    ///
    /// The delta acts about world axes, not the object's own tilted axes.
    pub fn premultiply(&mut self, delta: Quat) {
        self.set_orientation(delta * self.orientation);
    }

    /// Model matrix (scale, then rotation, then translation).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.orientation, self.position)
    }
}

fn euler_to_quat(rotation: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z)
}

/// Drawable area in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    /// Rejects zero, negative and non-finite dimensions.
    pub fn new(width: f32, height: f32) -> Result<Self> {
        let valid = width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0;
        if !valid {
            return Err(ShowroomError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn transform_default_is_identity() {
        let t = Transform::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.orientation(), Quat::IDENTITY);
        assert_eq!(t.rotation(), Vec3::ZERO);
        assert_eq!(t.scale, Vec3::ONE);
    }

    #[test]
    fn euler_increment_updates_orientation() {
        let mut t = Transform::default();
        t.rotate_euler(Vec3::new(0.0, FRAC_PI_2, 0.0));
        let forward = t.orientation() * Vec3::Z;
        assert!(approx(forward, Vec3::X));
    }

    #[test]
    fn euler_angles_grow_unbounded() {
        let mut t = Transform::default();
        for _ in 0..10 {
            t.rotate_euler(Vec3::new(1.0, 0.0, 0.0));
        }
        assert!((t.rotation().x - 10.0).abs() < 1e-5);
    }

    #[test]
    fn premultiply_rotates_about_world_axis() {
        // Tilt the object first so its local Y differs from world Y.
        let mut t = Transform::default().with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0));
        let before = t.orientation() * Vec3::Y;
        t.premultiply(Quat::from_rotation_y(FRAC_PI_2));
        let after = t.orientation() * Vec3::Y;
        // The object's Y axis was lying along world +Z; a world-Y turn moves it to +X.
        assert!(approx(before, Vec3::Z));
        assert!(approx(after, Vec3::X));
    }

    #[test]
    fn premultiply_keeps_euler_view_in_sync() {
        let mut t = Transform::default();
        t.premultiply(Quat::from_rotation_y(0.3));
        let rebuilt = Quat::from_euler(
            EulerRot::XYZ,
            t.rotation().x,
            t.rotation().y,
            t.rotation().z,
        );
        assert!(rebuilt.dot(t.orientation()).abs() > 1.0 - 1e-6);
    }

    #[test]
    fn viewport_rejects_degenerate_sizes() {
        assert!(Viewport::new(0.0, 600.0).is_err());
        assert!(Viewport::new(800.0, -1.0).is_err());
        assert!(Viewport::new(f32::NAN, 600.0).is_err());
        assert!(Viewport::new(f32::INFINITY, 600.0).is_err());
        let v = Viewport::new(800.0, 600.0).unwrap();
        assert!((v.aspect() - 4.0 / 3.0).abs() < 1e-6);
    }
}
