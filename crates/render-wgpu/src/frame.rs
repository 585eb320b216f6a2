use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use showroom_common::WallMaterial;
use showroom_kernel::Session;
use showroom_render::Renderer;
use showroom_scene::{Scene, SceneObject};

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub(crate) struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    /// Ambient colour pre-multiplied by intensity.
    pub ambient: [f32; 4],
    pub light_pos: [f32; 4],
    /// RGB colour, intensity in `w`.
    pub light_color: [f32; 4],
}

/// One world-space vertex with its flat face normal, colour and surface.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
    /// Metalness, roughness.
    pub surface: [f32; 2],
}

/// Surface used for the model, which carries no material of its own.
pub const MODEL_SURFACE: [f32; 2] = [0.0, 0.5];

/// Everything the GPU needs for one frame, computed on the CPU.
#[derive(Debug, Clone)]
pub struct FrameGeometry {
    pub(crate) uniforms: Uniforms,
    pub vertices: Vec<Vertex>,
}

impl FrameGeometry {
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }
}

/// Flattens the scene tree into a single world-space triangle list.
///
/// Meshes are small (a room and one model), so re-uploading every frame keeps
/// the GPU side free of per-object buffers.
#[derive(Debug, Default)]
pub struct SceneFlattener;

impl Renderer for SceneFlattener {
    type Output = FrameGeometry;

    fn render(&self, session: &Session) -> FrameGeometry {
        flatten_scene(session.scene())
    }
}

pub(crate) fn flatten_scene(scene: &Scene) -> FrameGeometry {
    let camera = &scene.camera;
    let light = &scene.point_light;
    let ambient = Vec3::from(scene.ambient.color) * scene.ambient.intensity;

    let mut vertices = Vec::new();
    scene.visit(&mut |node: &SceneObject, world: &Mat4, material: Option<&WallMaterial>| {
        let surface = material.map_or(MODEL_SURFACE, |m| [m.metalness, m.roughness]);
        push_node(node, world, surface, &mut vertices)
    });

    FrameGeometry {
        uniforms: Uniforms {
            view_proj: camera.view_projection().to_cols_array_2d(),
            camera_pos: camera.position.extend(1.0).to_array(),
            ambient: ambient.extend(1.0).to_array(),
            light_pos: light.position.extend(1.0).to_array(),
            light_color: Vec3::from(light.color).extend(light.intensity).to_array(),
        },
        vertices,
    }
}

fn push_node(node: &SceneObject, world: &Mat4, surface: [f32; 2], out: &mut Vec<Vertex>) {
    let Some(mesh) = &node.mesh else {
        return;
    };
    for [a, b, c] in mesh.triangles() {
        let [a, b, c] = [a, b, c].map(|p| world.transform_point3(p));
        let normal = (b - a).cross(c - a).normalize_or_zero();
        out.extend([a, b, c].map(|p| Vertex {
            position: p.to_array(),
            normal: normal.to_array(),
            color: node.color,
            surface,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showroom_common::{ShowroomConfig, Viewport, WallSide};
    use showroom_scene::placeholder_model;

    fn scene() -> Scene {
        Scene::from_config(&ShowroomConfig::default(), &Viewport::new(800.0, 600.0).unwrap())
    }

    #[test]
    fn room_flattens_to_ten_triangles() {
        let frame = flatten_scene(&scene());
        assert_eq!(frame.vertex_count(), 5 * 2 * 3);
    }

    #[test]
    fn model_adds_cube_triangles() {
        let mut s = scene();
        s.attach_model(placeholder_model(&ShowroomConfig::default().model));
        let frame = flatten_scene(&s);
        assert_eq!(frame.vertex_count(), (10 + 12) * 3);
    }

    #[test]
    fn wall_normals_point_inward() {
        let frame = flatten_scene(&scene());
        for tri in frame.vertices.chunks_exact(3) {
            let centroid = tri
                .iter()
                .map(|v| Vec3::from(v.position))
                .sum::<Vec3>()
                / 3.0;
            let n = Vec3::from(tri[0].normal);
            assert!(n.dot(-centroid) > 0.0);
        }
    }

    #[test]
    fn lights_reach_the_uniforms() {
        let frame = flatten_scene(&scene());
        assert_eq!(frame.uniforms.light_pos, [0.0, 0.0, -4.0, 1.0]);
        assert_eq!(frame.uniforms.light_color[3], 100.0);
        assert!((frame.uniforms.ambient[0] - 1.4).abs() < 1e-6);
    }

    #[test]
    fn wall_material_edits_reach_the_vertices() {
        let mut s = scene();
        let mut walls = ShowroomConfig::default().walls;
        walls.get_mut(WallSide::Floor).metalness = 0.9;
        walls.get_mut(WallSide::Floor).roughness = 0.2;
        s.apply_wall_materials(&walls);

        let frame = flatten_scene(&s);
        let floor = s
            .walls
            .iter()
            .position(|w| w.side == WallSide::Floor)
            .unwrap();
        let floor_tris = &frame.vertices[floor * 6..floor * 6 + 6];
        assert!(floor_tris.iter().all(|v| v.surface == [0.9, 0.2]));
        let edited = frame.vertices.iter().filter(|v| v.surface == [0.9, 0.2]);
        assert_eq!(edited.count(), 6);
    }

    #[test]
    fn model_uses_default_surface() {
        let mut s = scene();
        s.attach_model(placeholder_model(&ShowroomConfig::default().model));
        let frame = flatten_scene(&s);
        let model_verts = &frame.vertices[30..];
        assert_eq!(model_verts.len(), 36);
        assert!(model_verts.iter().all(|v| v.surface == MODEL_SURFACE));
    }
}
