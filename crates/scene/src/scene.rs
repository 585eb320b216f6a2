use glam::{Mat4, Vec3};
use showroom_common::{
    ModelConfig, RoomConfig, ShowroomConfig, Transform, Viewport, WallMaterial, WallSide,
    WallsConfig,
};
use std::f32::consts::{FRAC_PI_2, PI};

use crate::camera::Camera;
use crate::geometry::Mesh;
use crate::object::SceneObject;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
}

/// One inward-facing room surface.
#[derive(Debug, Clone)]
pub struct Wall {
    pub side: WallSide,
    pub material: WallMaterial,
    pub object: SceneObject,
}

/// Everything the showroom draws: camera, lights, room and the model slot.
///
/// The model slot starts empty. Until something is attached, queries against
/// it see nothing and rotation work has nothing to act on.
#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: Camera,
    pub ambient: AmbientLight,
    pub point_light: PointLight,
    pub walls: Vec<Wall>,
    model: Option<SceneObject>,
}

impl Scene {
    pub fn from_config(config: &ShowroomConfig, viewport: &Viewport) -> Self {
        let walls = WallSide::ALL
            .iter()
            .map(|&side| build_wall(side, &config.room, &config.walls))
            .collect();

        tracing::debug!(
            "scene assembled: room {}x{}x{}",
            config.room.width,
            config.room.height,
            config.room.depth
        );

        Self {
            camera: Camera::from_config(&config.camera, viewport.aspect()),
            ambient: AmbientLight {
                color: config.ambient_light.color,
                intensity: config.ambient_light.intensity,
            },
            point_light: PointLight {
                color: config.point_light.color,
                intensity: config.point_light.intensity,
                position: config.point_light.position,
            },
            walls,
            model: None,
        }
    }

    pub fn model(&self) -> Option<&SceneObject> {
        self.model.as_ref()
    }

    pub fn model_mut(&mut self) -> Option<&mut SceneObject> {
        self.model.as_mut()
    }

    /// Place a model in the slot, returning whatever was there before.
    pub fn attach_model(&mut self, model: SceneObject) -> Option<SceneObject> {
        tracing::info!("model attached: {} ({} nodes)", model.name, model.node_count());
        self.model.replace(model)
    }

    pub fn detach_model(&mut self) -> Option<SceneObject> {
        self.model.take()
    }

    /// Push edited wall materials back onto the wall nodes.
    pub fn apply_wall_materials(&mut self, walls: &WallsConfig) {
        for wall in &mut self.walls {
            wall.material = *walls.get(wall.side);
            wall.object.color = wall.material.color;
        }
    }

    /// Visit every node of the room and the model with its world matrix.
    ///
    /// Wall nodes come with their wall's material; model nodes with `None`.
    pub fn visit<F>(&self, f: &mut F)
    where
        F: FnMut(&SceneObject, &Mat4, Option<&WallMaterial>),
    {
        for wall in &self.walls {
            wall.object.visit(&Mat4::IDENTITY, &mut |node: &SceneObject, world: &Mat4| {
                f(node, world, Some(&wall.material))
            });
        }
        if let Some(model) = &self.model {
            model.visit(&Mat4::IDENTITY, &mut |node: &SceneObject, world: &Mat4| {
                f(node, world, None)
            });
        }
    }
}

/// The cube shown while no real model is loaded.
pub fn placeholder_model(config: &ModelConfig) -> SceneObject {
    SceneObject::with_mesh("placeholder", Mesh::cuboid(Vec3::splat(config.size)))
        .with_transform(Transform::from_position(config.position))
        .with_color(config.color)
}

fn build_wall(side: WallSide, room: &RoomConfig, walls: &WallsConfig) -> Wall {
    let (hw, hh, hd) = (room.width / 2.0, room.height / 2.0, room.depth / 2.0);
    let (mesh, position, rotation) = match side {
        WallSide::Left => (
            Mesh::plane(room.depth, room.height),
            Vec3::new(hw, 0.0, 0.0),
            Vec3::new(0.0, -FRAC_PI_2, 0.0),
        ),
        WallSide::Right => (
            Mesh::plane(room.depth, room.height),
            Vec3::new(-hw, 0.0, 0.0),
            Vec3::new(0.0, FRAC_PI_2, 0.0),
        ),
        WallSide::Ceiling => (
            Mesh::plane(room.width, room.depth),
            Vec3::new(0.0, hh, 0.0),
            Vec3::new(FRAC_PI_2, 0.0, 0.0),
        ),
        WallSide::Floor => (
            Mesh::plane(room.width, room.depth),
            Vec3::new(0.0, -hh, 0.0),
            Vec3::new(-FRAC_PI_2, 0.0, 0.0),
        ),
        WallSide::Back => (
            Mesh::plane(room.width, room.height),
            Vec3::new(0.0, 0.0, hd),
            Vec3::new(0.0, PI, 0.0),
        ),
    };
    let material = *walls.get(side);
    let object = SceneObject::with_mesh(format!("wall:{}", side.as_str()), mesh)
        .with_transform(Transform::from_position(position).with_rotation(rotation))
        .with_color(material.color);
    Wall {
        side,
        material,
        object,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Ray;

    fn scene() -> Scene {
        let config = ShowroomConfig::default();
        Scene::from_config(&config, &Viewport::new(800.0, 600.0).unwrap())
    }

    #[test]
    fn room_has_five_walls_and_no_model() {
        let s = scene();
        assert_eq!(s.walls.len(), 5);
        assert!(s.model().is_none());
    }

    #[test]
    fn walls_face_into_the_room() {
        // Each wall's +Z normal should point at the room centre.
        for wall in scene().walls {
            let t = wall.object.transform;
            let normal = t.orientation() * Vec3::Z;
            let to_centre = (-t.position).normalize();
            assert!(
                normal.dot(to_centre) > 0.99,
                "{} faces {normal:?}",
                wall.side.as_str()
            );
        }
    }

    #[test]
    fn back_wall_stops_a_centre_ray() {
        let s = scene();
        let back = s.walls.iter().find(|w| w.side == WallSide::Back).unwrap();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let t = back.object.intersect_ray(&ray, &Mat4::IDENTITY).unwrap();
        assert!((t - 6.0).abs() < 1e-4);
    }

    #[test]
    fn attach_replaces_and_detach_empties() {
        let mut s = scene();
        let config = ModelConfig::default();
        assert!(s.attach_model(placeholder_model(&config)).is_none());
        assert!(s.attach_model(placeholder_model(&config)).is_some());
        assert!(s.detach_model().is_some());
        assert!(s.model().is_none());
    }

    #[test]
    fn wall_material_edits_reach_the_nodes() {
        let mut s = scene();
        let mut walls = WallsConfig::default();
        walls.get_mut(WallSide::Floor).color = [1.0, 0.0, 0.0];
        s.apply_wall_materials(&walls);
        let floor = s.walls.iter().find(|w| w.side == WallSide::Floor).unwrap();
        assert_eq!(floor.object.color, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn visit_covers_room_and_model() {
        let mut s = scene();
        s.attach_model(placeholder_model(&ModelConfig::default()));
        let (mut walls, mut models) = (0, 0);
        s.visit(&mut |_: &SceneObject, _: &Mat4, material: Option<&WallMaterial>| {
            if material.is_some() {
                walls += 1;
            } else {
                models += 1;
            }
        });
        assert_eq!((walls, models), (5, 1));
    }
}
