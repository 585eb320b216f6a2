use glam::{Mat4, Vec2, Vec3};
use showroom_common::{CameraConfig, Viewport};

use crate::geometry::Ray;

const MIN_NEAR: f32 = 1e-3;
const MIN_DEPTH: f32 = 0.1;

/// Perspective camera that always looks at a fixed target.
///
/// Parallax moves the eye in X/Y; the target stays put, so the view swings
/// around the room centre instead of panning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), 16.0 / 9.0)
    }
}

impl Camera {
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            position: config.position,
            target: config.look_at,
            fov: config.fov_degrees.to_radians(),
            aspect,
            near: config.near,
            far: config.far,
        }
    }

    pub fn set_aspect(&mut self, viewport: &Viewport) {
        self.aspect = viewport.aspect();
    }

    /// Set both clip planes, pushing `far` past `near` when they cross.
    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        self.near = near.max(MIN_NEAR);
        self.far = far.max(self.near + MIN_DEPTH);
    }

    /// Ease the eye toward `pointer * strength` in X/Y.
    ///
    /// `pointer` is in normalized device coordinates; `smoothing` is the
    /// fraction of the remaining distance covered by this call.
    pub fn apply_parallax(&mut self, pointer: Vec2, strength: f32, smoothing: f32) {
        let goal = pointer * strength;
        self.position.x += (goal.x - self.position.x) * smoothing;
        self.position.y += (goal.y - self.position.y) * smoothing;
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray from the near plane through `ndc`.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        // perspective_rh maps depth to [0, 1].
        let near = inv.project_point3(ndc.extend(0.0));
        let far = inv.project_point3(ndc.extend(1.0));
        Ray::new(near, far - near)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera() {
        let cam = Camera::default();
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, -10.0));
        let vp = cam.view_projection();
        // Should produce a valid matrix (no NaN)
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn centre_ray_points_at_target() {
        let cam = Camera::default();
        let ray = cam.ray_from_ndc(Vec2::ZERO);
        assert!((ray.direction - Vec3::Z).length() < 1e-4);
        assert!((ray.origin.z - (-10.0 + cam.near)).abs() < 1e-2);
    }

    #[test]
    fn ndc_right_maps_to_world_negative_x() {
        // Looking down +Z with +Y up puts screen-right on world -X.
        let cam = Camera::default();
        let ray = cam.ray_from_ndc(Vec2::new(0.5, 0.0));
        assert!(ray.direction.x < 0.0);
        let ray = cam.ray_from_ndc(Vec2::new(0.0, 0.5));
        assert!(ray.direction.y > 0.0);
    }

    #[test]
    fn parallax_converges_on_pointer_offset() {
        let mut cam = Camera::default();
        for _ in 0..200 {
            cam.apply_parallax(Vec2::new(1.0, -0.5), 1.0, 0.1);
        }
        assert!((cam.position.x - 1.0).abs() < 1e-4);
        assert!((cam.position.y + 0.5).abs() < 1e-4);
        assert_eq!(cam.position.z, -10.0);
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn single_parallax_step_moves_a_tenth() {
        let mut cam = Camera::default();
        cam.apply_parallax(Vec2::new(1.0, 0.0), 1.0, 0.1);
        assert!((cam.position.x - 0.1).abs() < 1e-6);
    }

    #[test]
    fn aspect_follows_viewport() {
        let mut cam = Camera::default();
        cam.set_aspect(&Viewport::new(800.0, 600.0).unwrap());
        assert!((cam.aspect - 800.0 / 600.0).abs() < 1e-6);
    }

    #[test]
    fn crossed_clip_planes_are_separated() {
        let mut cam = Camera::default();
        cam.set_clip_planes(10.0, 10.0);
        assert_eq!(cam.near, 10.0);
        assert!(cam.far > cam.near);

        cam.set_clip_planes(8.0, 2.0);
        assert!(cam.far > cam.near);
        let ray = cam.ray_from_ndc(Vec2::ZERO);
        assert!(ray.origin.is_finite() && ray.direction.is_finite());
        assert!(cam.view_projection().is_finite());
    }

    #[test]
    fn clip_planes_kept_when_ordered() {
        let mut cam = Camera::default();
        cam.set_clip_planes(0.5, 50.0);
        assert_eq!((cam.near, cam.far), (0.5, 50.0));
        cam.set_clip_planes(0.0, 50.0);
        assert!(cam.near > 0.0);
    }
}
