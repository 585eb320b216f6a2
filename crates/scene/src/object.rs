use glam::Mat4;
use showroom_common::Transform;

use crate::geometry::{Mesh, Ray};

/// A node in the scene hierarchy: optional geometry plus child nodes.
///
/// Child transforms are relative to the parent. A loaded model is usually a
/// group node whose meshes all live in descendants.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub transform: Transform,
    pub mesh: Option<Mesh>,
    /// Linear RGB used by renderers.
    pub color: [f32; 3],
    pub children: Vec<SceneObject>,
}

impl SceneObject {
    /// An empty group node.
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            mesh: None,
            color: [1.0, 1.0, 1.0],
            children: Vec::new(),
        }
    }

    pub fn with_mesh(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            mesh: Some(mesh),
            ..Self::group(name)
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_child(mut self, child: SceneObject) -> Self {
        self.children.push(child);
        self
    }

    /// World matrix given the parent's world matrix.
    pub fn world_matrix(&self, parent: &Mat4) -> Mat4 {
        *parent * self.transform.matrix()
    }

    /// Nearest hit distance along `ray` across this node and all descendants.
    pub fn intersect_ray(&self, ray: &Ray, parent: &Mat4) -> Option<f32> {
        let world = self.world_matrix(parent);

        let own = self.mesh.as_ref().and_then(|mesh| {
            // A degenerate scale makes the inverse meaningless; such a node cannot be hit.
            if world.determinant().abs() <= f32::EPSILON * f32::EPSILON {
                return None;
            }
            let local = ray.transformed(&world.inverse());
            mesh.intersect_ray(&local)
        });

        self.children
            .iter()
            .filter_map(|child| child.intersect_ray(ray, &world))
            .chain(own)
            .min_by(f32::total_cmp)
    }

    /// Visit every node with its world matrix, parents before children.
    pub fn visit<F>(&self, parent: &Mat4, f: &mut F)
    where
        F: FnMut(&SceneObject, &Mat4),
    {
        let world = self.world_matrix(parent);
        f(self, &world);
        for child in &self.children {
            child.visit(&world, f);
        }
    }

    /// Total number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SceneObject::node_count).sum::<usize>()
    }
}
