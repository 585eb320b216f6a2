use glam::{Mat4, Vec2};
use showroom_scene::{Camera, SceneObject};

/// Ray-casts the pointer against the model and remembers the latest answer.
#[derive(Debug, Clone, Default)]
pub struct HoverDetector {
    hovered: bool,
}

impl HoverDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Result of the most recent [`test`](Self::test).
    pub fn hovered(&self) -> bool {
        self.hovered
    }

    /// Whether the ray through `pointer` hits `target` or any of its descendants.
    pub fn test(&mut self, pointer: Vec2, camera: &Camera, target: Option<&SceneObject>) -> bool {
        self.hovered = target.is_some_and(|target| {
            let ray = camera.ray_from_ndc(pointer);
            target.intersect_ray(&ray, &Mat4::IDENTITY).is_some()
        });
        self.hovered
    }

    /// Drop the cached answer, e.g. when the pointer leaves the surface.
    pub fn clear(&mut self) {
        self.hovered = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use showroom_common::Transform;
    use showroom_scene::Mesh;

    fn cube_at(position: Vec3) -> SceneObject {
        SceneObject::with_mesh("cube", Mesh::cuboid(Vec3::splat(0.8)))
            .with_transform(Transform::from_position(position))
    }

    #[test]
    fn centre_pointer_hits_centred_cube() {
        let mut hover = HoverDetector::new();
        let cube = cube_at(Vec3::new(0.0, -0.1, 2.0));
        assert!(hover.test(Vec2::ZERO, &Camera::default(), Some(&cube)));
        assert!(hover.hovered());
    }

    #[test]
    fn corner_pointer_misses() {
        let mut hover = HoverDetector::new();
        let cube = cube_at(Vec3::new(0.0, -0.1, 2.0));
        assert!(!hover.test(Vec2::new(0.9, 0.9), &Camera::default(), Some(&cube)));
    }

    #[test]
    fn absent_target_is_never_hovered() {
        let mut hover = HoverDetector::new();
        assert!(!hover.test(Vec2::ZERO, &Camera::default(), None));
    }

    #[test]
    fn nested_geometry_is_hoverable() {
        let model = SceneObject::group("model").with_child(cube_at(Vec3::new(0.0, 0.0, 2.0)));
        let mut hover = HoverDetector::new();
        assert!(hover.test(Vec2::ZERO, &Camera::default(), Some(&model)));
        hover.clear();
        assert!(!hover.hovered());
    }
}
