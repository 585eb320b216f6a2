use glam::{Mat4, Vec3};

/// Below this determinant a ray is treated as parallel to a triangle.
const PARALLEL_EPSILON: f32 = 1e-9;

/// A half-line used for hover and pick queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray with a normalized direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Map the ray through an affine matrix without renormalizing.
    ///
    /// Distances measured along the result equal distances along `self`, so
    /// hits found in an object's local space compare directly in world space.
    pub fn transformed(&self, matrix: &Mat4) -> Self {
        Self {
            origin: matrix.transform_point3(self.origin),
            direction: matrix.transform_vector3(self.direction),
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Bounds of a point set; `None` when empty.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self::new(*first, *first);
        for p in rest {
            bounds.min = bounds.min.min(*p);
            bounds.max = bounds.max.max(*p);
        }
        Some(bounds)
    }

    /// Slab test. Returns the entry distance, or the exit distance when the
    /// origin is inside the box.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let inv = ray.direction.recip();
        let t0 = (self.min - ray.origin) * inv;
        let t1 = (self.max - ray.origin) * inv;

        let t_near = t0.min(t1).max_element();
        let t_far = t0.max(t1).min_element();

        if t_near <= t_far && t_far >= 0.0 {
            Some(if t_near >= 0.0 { t_near } else { t_far })
        } else {
            None
        }
    }
}

/// Exclusive upper bound for valid `u32` indices into `len` vertices.
///
/// Saturates at `u32::MAX`; larger vertex lists cannot be fully indexed.
fn index_limit(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Indexed triangle mesh in local space.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
    bounds: Option<Aabb>,
}

impl Mesh {
    /// Build a mesh, dropping any trailing indices that do not form a full
    /// triangle or that point past the vertex list.
    pub fn new(positions: Vec<Vec3>, mut indices: Vec<u32>) -> Self {
        indices.truncate(indices.len() - indices.len() % 3);
        let vertex_count = index_limit(positions.len());
        if indices.iter().any(|&i| i >= vertex_count) {
            tracing::warn!("mesh index out of range, discarding triangles");
            indices = indices
                .chunks_exact(3)
                .filter(|tri| tri.iter().all(|&i| i < vertex_count))
                .flatten()
                .copied()
                .collect();
        }
        let bounds = Aabb::from_points(&positions);
        Self {
            positions,
            indices,
            bounds,
        }
    }

    /// Box centred on the origin.
    pub fn cuboid(size: Vec3) -> Self {
        let h = size * 0.5;
        #[rustfmt::skip]
        let positions = vec![
            Vec3::new(-h.x, -h.y, -h.z),
            Vec3::new( h.x, -h.y, -h.z),
            Vec3::new( h.x,  h.y, -h.z),
            Vec3::new(-h.x,  h.y, -h.z),
            Vec3::new(-h.x, -h.y,  h.z),
            Vec3::new( h.x, -h.y,  h.z),
            Vec3::new( h.x,  h.y,  h.z),
            Vec3::new(-h.x,  h.y,  h.z),
        ];
        #[rustfmt::skip]
        let indices = vec![
            4,5,6, 6,7,4, // +Z
            1,0,3, 3,2,1, // -Z
            5,1,2, 2,6,5, // +X
            0,4,7, 7,3,0, // -X
            7,6,2, 2,3,7, // +Y
            0,1,5, 5,4,0, // -Y
        ];
        Self::new(positions, indices)
    }

    /// Rectangle in the XY plane facing +Z, centred on the origin.
    pub fn plane(width: f32, height: f32) -> Self {
        let (w, h) = (width * 0.5, height * 0.5);
        let positions = vec![
            Vec3::new(-w, -h, 0.0),
            Vec3::new(w, -h, 0.0),
            Vec3::new(w, h, 0.0),
            Vec3::new(-w, h, 0.0),
        ];
        Self::new(positions, vec![0, 1, 2, 2, 3, 0])
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds
    }

    /// Iterate triangles as vertex triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.positions[tri[0] as usize],
                self.positions[tri[1] as usize],
                self.positions[tri[2] as usize],
            ]
        })
    }

    /// Nearest hit distance, testing both triangle faces.
    pub fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        self.bounds?.intersect_ray(ray)?;
        self.triangles()
            .filter_map(|[a, b, c]| intersect_triangle(ray, a, b, c))
            .min_by(f32::total_cmp)
    }
}

/// Möller–Trumbore ray/triangle test.
fn intersect_triangle(ray: &Ray, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    let edge1 = b - a;
    let edge2 = c - a;
    let p = ray.direction.cross(edge2);
    let det = edge1.dot(p);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let s = ray.origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = ray.direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aabb_from_points() {
        let aabb = Aabb::from_points(&[
            Vec3::ZERO,
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, -1.0, -1.0),
        ])
        .unwrap();
        assert_eq!(aabb.min, Vec3::splat(-1.0));
        assert_eq!(aabb.max, Vec3::splat(1.0));
        assert!(Aabb::from_points(&[]).is_none());
    }

    #[test]
    fn ray_aabb_hit_and_miss() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let hit = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        assert_eq!(aabb.intersect_ray(&hit), Some(4.0));

        let miss = Ray::new(Vec3::new(5.0, 0.0, -5.0), Vec3::Z);
        assert!(aabb.intersect_ray(&miss).is_none());

        let behind = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(aabb.intersect_ray(&behind).is_none());
    }

    #[test]
    fn cuboid_hit_distance() {
        let mesh = Mesh::cuboid(Vec3::splat(2.0));
        assert_eq!(mesh.triangle_count(), 12);
        let ray = Ray::new(Vec3::new(0.2, 0.3, -5.0), Vec3::Z);
        let t = mesh.intersect_ray(&ray).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn ray_from_inside_hits_far_face() {
        let mesh = Mesh::cuboid(Vec3::splat(2.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = mesh.intersect_ray(&ray).unwrap();
        assert!((t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn plane_is_hit_from_both_sides() {
        let mesh = Mesh::plane(2.0, 2.0);
        let front = Ray::new(Vec3::new(0.0, 0.0, 3.0), -Vec3::Z);
        let back = Ray::new(Vec3::new(0.0, 0.0, -3.0), Vec3::Z);
        assert!(mesh.intersect_ray(&front).is_some());
        assert!(mesh.intersect_ray(&back).is_some());
        let outside = Ray::new(Vec3::new(1.5, 0.0, 3.0), -Vec3::Z);
        assert!(mesh.intersect_ray(&outside).is_none());
    }

    #[test]
    fn transformed_ray_keeps_distances() {
        let m = Mat4::from_scale(Vec3::splat(0.5));
        let ray = Ray::new(Vec3::new(0.0, 0.0, -4.0), Vec3::Z);
        let local = ray.transformed(&m);
        let world_hit = ray.point_at(2.0);
        let local_hit = local.origin + local.direction * 2.0;
        assert!((m.transform_point3(world_hit) - local_hit).length() < 1e-6);
    }

    #[test]
    fn malformed_indices_are_dropped() {
        let mesh = Mesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 2, 0, 1, 9, 2]);
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn index_limit_saturates_past_u32() {
        assert_eq!(index_limit(3), 3);
        assert_eq!(index_limit(u32::MAX as usize), u32::MAX);
        assert_eq!(index_limit(usize::MAX), u32::MAX);
    }
}
