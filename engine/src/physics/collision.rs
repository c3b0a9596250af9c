//! Collision geometry and raycasting
//!
//! Static triangle meshes used as invisible collision geometry for the
//! walkthrough. Movement only ever *reads* this data through
//! [`CollisionField::raycast`].
//!
//! # Ray-AABB Early Out
//!
//! Every [`ColliderMesh`] keeps its axis-aligned bounds. A ray is tested
//! against the bounds with the slab method first and only walks the
//! triangle list when the box is hit within range.
//!
//! # Example
//!
//! ```ignore
//! use archviz_engine::physics::collision::{CollisionField, ColliderMesh};
//! use glam::Vec3;
//!
//! let mut field = CollisionField::new();
//! field.insert(ColliderMesh::floor(Vec3::ZERO, 10.0));
//!
//! let hit = field.raycast(Vec3::new(0.0, 1.6, 0.0), Vec3::NEG_Y, f32::INFINITY);
//! assert!(hit.is_some());
//! ```

use glam::{Mat4, Vec3};

/// Triangles whose determinant is smaller than this are treated as parallel to the ray.
const PARALLEL_EPSILON: f32 = 1e-8;

/// Nearest intersection found by a raycast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin to the hit point
    pub distance: f32,
    /// World-space hit position
    pub point: Vec3,
    /// Geometric normal of the hit triangle, facing the ray origin
    pub normal: Vec3,
}

/// Performs ray-AABB intersection using the slab method.
///
/// # Returns
///
/// * `Some(t)` - Distance along the ray to the entry point (or exit point when
///   the origin is inside the box)
/// * `None` - No intersection, or the box is entirely behind the origin
pub fn ray_aabb_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    aabb_min: Vec3,
    aabb_max: Vec3,
) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray_origin[axis];
        let dir = ray_dir[axis];
        let (lo, hi) = (aabb_min[axis], aabb_max[axis]);

        if dir.abs() < 1e-10 {
            // Parallel to this slab: miss unless the origin lies between the planes
            if origin < lo || origin > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / dir;
        let t1 = (lo - origin) * inv;
        let t2 = (hi - origin) * inv;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));
    }

    if t_max >= t_min && t_max >= 0.0 {
        Some(t_min.max(0.0))
    } else {
        None
    }
}

/// A single collision triangle in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    /// Möller–Trumbore intersection. Both faces are solid.
    ///
    /// Returns the distance along `dir` (which must be normalized) to the hit.
    pub fn intersect(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        let edge1 = self.b - self.a;
        let edge2 = self.c - self.a;
        let p = dir.cross(edge2);
        let det = edge1.dot(p);
        if det.abs() < PARALLEL_EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = origin - self.a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = dir.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(q) * inv_det;
        (t >= 0.0).then_some(t)
    }

    /// Unit normal following the winding order (a, b, c).
    pub fn normal(&self) -> Vec3 {
        (self.b - self.a).cross(self.c - self.a).normalize_or_zero()
    }

    fn transformed(&self, transform: &Mat4) -> Self {
        Self {
            a: transform.transform_point3(self.a),
            b: transform.transform_point3(self.b),
            c: transform.transform_point3(self.c),
        }
    }
}

/// A static mesh made of triangles, with cached bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ColliderMesh {
    triangles: Vec<Triangle>,
    aabb_min: Vec3,
    aabb_max: Vec3,
}

impl ColliderMesh {
    /// Build a mesh from a triangle list.
    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        let mut aabb_min = Vec3::splat(f32::INFINITY);
        let mut aabb_max = Vec3::splat(f32::NEG_INFINITY);
        for tri in &triangles {
            for v in [tri.a, tri.b, tri.c] {
                aabb_min = aabb_min.min(v);
                aabb_max = aabb_max.max(v);
            }
        }
        Self {
            triangles,
            aabb_min,
            aabb_max,
        }
    }

    /// Build a mesh from indexed positions (the layout glTF primitives use).
    ///
    /// Trailing indices that do not form a whole triangle are ignored, as are
    /// indices pointing outside `positions`.
    pub fn from_indexed(positions: &[Vec3], indices: &[u32]) -> Self {
        let triangles = indices
            .chunks_exact(3)
            .filter_map(|chunk| {
                let a = *positions.get(chunk[0] as usize)?;
                let b = *positions.get(chunk[1] as usize)?;
                let c = *positions.get(chunk[2] as usize)?;
                Some(Triangle::new(a, b, c))
            })
            .collect();
        Self::from_triangles(triangles)
    }

    /// Axis-aligned box spanning `min`..`max`, two triangles per face.
    pub fn cuboid(min: Vec3, max: Vec3) -> Self {
        let corner = |x: bool, y: bool, z: bool| {
            Vec3::new(
                if x { max.x } else { min.x },
                if y { max.y } else { min.y },
                if z { max.z } else { min.z },
            )
        };
        let quad = |p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3| {
            [Triangle::new(p0, p1, p2), Triangle::new(p0, p2, p3)]
        };

        let mut triangles = Vec::with_capacity(12);
        // -X / +X
        triangles.extend(quad(
            corner(false, false, false),
            corner(false, false, true),
            corner(false, true, true),
            corner(false, true, false),
        ));
        triangles.extend(quad(
            corner(true, false, false),
            corner(true, true, false),
            corner(true, true, true),
            corner(true, false, true),
        ));
        // -Y / +Y
        triangles.extend(quad(
            corner(false, false, false),
            corner(true, false, false),
            corner(true, false, true),
            corner(false, false, true),
        ));
        triangles.extend(quad(
            corner(false, true, false),
            corner(false, true, true),
            corner(true, true, true),
            corner(true, true, false),
        ));
        // -Z / +Z
        triangles.extend(quad(
            corner(false, false, false),
            corner(false, true, false),
            corner(true, true, false),
            corner(true, false, false),
        ));
        triangles.extend(quad(
            corner(false, false, true),
            corner(true, false, true),
            corner(true, true, true),
            corner(false, true, true),
        ));
        Self::from_triangles(triangles)
    }

    /// Square horizontal floor centred on `center`.
    pub fn floor(center: Vec3, half_extent: f32) -> Self {
        let a = center + Vec3::new(-half_extent, 0.0, -half_extent);
        let b = center + Vec3::new(half_extent, 0.0, -half_extent);
        let c = center + Vec3::new(half_extent, 0.0, half_extent);
        let d = center + Vec3::new(-half_extent, 0.0, half_extent);
        Self::from_triangles(vec![Triangle::new(a, d, c), Triangle::new(a, c, b)])
    }

    /// Apply a world transform to every vertex.
    pub fn transformed(&self, transform: &Mat4) -> Self {
        Self::from_triangles(
            self.triangles
                .iter()
                .map(|tri| tri.transformed(transform))
                .collect(),
        )
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Bounds as `(min, max)`.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        (self.aabb_min, self.aabb_max)
    }

    /// Nearest hit within `max_distance`, if any.
    pub fn raycast(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<RayHit> {
        if self.triangles.is_empty() {
            return None;
        }
        let entry = ray_aabb_intersect(origin, dir, self.aabb_min, self.aabb_max)?;
        if entry > max_distance {
            return None;
        }

        let mut best: Option<(f32, &Triangle)> = None;
        for tri in &self.triangles {
            if let Some(t) = tri.intersect(origin, dir) {
                if t <= max_distance && best.is_none_or(|(best_t, _)| t < best_t) {
                    best = Some((t, tri));
                }
            }
        }

        best.map(|(distance, tri)| {
            let mut normal = tri.normal();
            if normal.dot(dir) > 0.0 {
                normal = -normal;
            }
            RayHit {
                distance,
                point: origin + dir * distance,
                normal,
            }
        })
    }
}

/// The static collision geometry of the current scene step.
///
/// Owned and mutated only by the asset stage; movement borrows it for
/// the duration of a frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionField {
    meshes: Vec<ColliderMesh>,
}

impl CollisionField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mesh. Empty meshes are dropped.
    pub fn insert(&mut self, mesh: ColliderMesh) {
        if !mesh.is_empty() {
            self.meshes.push(mesh);
        }
    }

    pub fn clear(&mut self) {
        self.meshes.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.triangles().len()).sum()
    }

    /// Nearest hit across every mesh.
    ///
    /// `dir` must be normalized. Pass `f32::INFINITY` for an unbounded ray.
    pub fn raycast(&self, origin: Vec3, dir: Vec3, max_distance: f32) -> Option<RayHit> {
        self.meshes
            .iter()
            .filter_map(|mesh| mesh.raycast(origin, dir, max_distance))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_aabb_hit_from_outside() {
        let t = ray_aabb_intersect(
            Vec3::new(0.0, 0.0, -5.0),
            Vec3::Z,
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
        );
        assert_eq!(t, Some(4.0));
    }

    #[test]
    fn test_ray_aabb_miss_parallel_outside() {
        let t = ray_aabb_intersect(
            Vec3::new(0.0, 5.0, -5.0),
            Vec3::Z,
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
        );
        assert!(t.is_none());
    }

    #[test]
    fn test_ray_aabb_behind_origin() {
        let t = ray_aabb_intersect(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::Z,
            Vec3::splat(-1.0),
            Vec3::splat(1.0),
        );
        assert!(t.is_none());
    }

    #[test]
    fn test_triangle_hit_is_double_sided() {
        let tri = Triangle::new(
            Vec3::new(-1.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(0.0, 0.0, 1.0),
        );
        let down = tri.intersect(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y);
        let up = tri.intersect(Vec3::new(0.0, -3.0, 0.0), Vec3::Y);
        assert!((down.unwrap() - 2.0).abs() < 1e-5);
        assert!((up.unwrap() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_triangle_miss_outside_edges() {
        let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Z);
        assert!(tri.intersect(Vec3::new(2.0, 1.0, 2.0), Vec3::NEG_Y).is_none());
    }

    #[test]
    fn test_floor_raycast_distance() {
        let floor = ColliderMesh::floor(Vec3::ZERO, 5.0);
        let hit = floor
            .raycast(Vec3::new(1.0, 1.6, -2.0), Vec3::NEG_Y, f32::INFINITY)
            .unwrap();
        assert!((hit.distance - 1.6).abs() < 1e-5);
        assert!((hit.point.y).abs() < 1e-5);
        // Normal faces back toward the origin
        assert!(hit.normal.y > 0.99);
    }

    #[test]
    fn test_cuboid_has_twelve_triangles_and_bounds() {
        let cube = ColliderMesh::cuboid(Vec3::ZERO, Vec3::ONE);
        assert_eq!(cube.triangles().len(), 12);
        assert_eq!(cube.bounds(), (Vec3::ZERO, Vec3::ONE));
    }

    #[test]
    fn test_max_distance_limits_hits() {
        let wall = ColliderMesh::cuboid(Vec3::new(2.0, 0.0, -5.0), Vec3::new(2.2, 3.0, 5.0));
        let origin = Vec3::new(0.0, 1.0, 0.0);
        assert!(wall.raycast(origin, Vec3::X, 1.0).is_none());
        let hit = wall.raycast(origin, Vec3::X, 10.0).unwrap();
        assert!((hit.distance - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_field_returns_nearest_of_many() {
        let mut field = CollisionField::new();
        field.insert(ColliderMesh::floor(Vec3::new(0.0, -1.0, 0.0), 10.0));
        field.insert(ColliderMesh::floor(Vec3::new(0.0, 0.5, 0.0), 10.0));
        let hit = field
            .raycast(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y, f32::INFINITY)
            .unwrap();
        assert!((hit.distance - 1.5).abs() < 1e-5);
        assert_eq!(field.mesh_count(), 2);
        assert_eq!(field.triangle_count(), 4);
    }

    #[test]
    fn test_empty_meshes_not_inserted() {
        let mut field = CollisionField::new();
        field.insert(ColliderMesh::from_triangles(Vec::new()));
        assert!(field.is_empty());
    }

    #[test]
    fn test_from_indexed_skips_bad_indices() {
        let positions = [Vec3::ZERO, Vec3::X, Vec3::Z];
        let mesh = ColliderMesh::from_indexed(&positions, &[0, 1, 2, 0, 1, 9, 2]);
        assert_eq!(mesh.triangles().len(), 1);
    }

    #[test]
    fn test_transformed_mesh_moves_hits() {
        let floor = ColliderMesh::floor(Vec3::ZERO, 1.0);
        let raised = floor.transformed(&Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0)));
        let hit = raised
            .raycast(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y, f32::INFINITY)
            .unwrap();
        assert!((hit.distance - 3.0).abs() < 1e-5);
    }
}
