//! Triangles and the triangle-built box mesh.

use std::sync::Arc;

use glam::Vec3A;

use crate::hittable::{HitRecord, Hittable, HittableList};
use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;

/// Determinants smaller than this mean the ray lies in the triangle's plane.
const PARALLEL_EPSILON: f32 = 1e-8;

/// Single triangle. Counter-clockwise winding (seen from outside) gives the
/// outward normal `(v1 - v0) x (v2 - v0)`.
#[derive(Debug, Clone)]
pub struct Triangle {
    /// First vertex.
    pub v0: Vec3A,
    /// Second vertex.
    pub v1: Vec3A,
    /// Third vertex.
    pub v2: Vec3A,
    /// Shared surface material.
    pub material: Arc<Material>,
}

impl Triangle {
    /// Create a triangle.
    pub fn new(v0: Vec3A, v1: Vec3A, v2: Vec3A, material: Arc<Material>) -> Self {
        Self {
            v0,
            v1,
            v2,
            material,
        }
    }
}

impl Hittable for Triangle {
    /// Möller–Trumbore intersection; texture coordinates are the barycentric weights.
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let e1 = self.v1 - self.v0;
        let e2 = self.v2 - self.v0;
        let pvec = r.direction.cross(e2);
        let det = e1.dot(pvec);

        if det.abs() < PARALLEL_EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        let tvec = r.origin - self.v0;
        let u = tvec.dot(pvec) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let qvec = tvec.cross(e1);
        let v = r.direction.dot(qvec) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = e2.dot(qvec) * inv_det;
        if !ray_t.surrounds(t) {
            return None;
        }

        let outward_normal = e1.cross(e2).normalize();
        Some(HitRecord::new(r, t, outward_normal, (u, v), &self.material))
    }
}

/// Axis-aligned box made of 12 outward-wound triangles.
#[derive(Clone)]
pub struct BoxMesh {
    /// Minimum corner.
    pub min: Vec3A,
    /// Maximum corner.
    pub max: Vec3A,
    sides: HittableList,
}

impl BoxMesh {
    /// Create the box spanned by two opposite corners, in any order.
    pub fn new(a: Vec3A, b: Vec3A, material: Arc<Material>) -> Self {
        let min = a.min(b);
        let max = a.max(b);

        let dx = Vec3A::new(max.x - min.x, 0.0, 0.0);
        let dy = Vec3A::new(0.0, max.y - min.y, 0.0);
        let dz = Vec3A::new(0.0, 0.0, max.z - min.z);

        // (corner, edge_a, edge_b) with edge_a x edge_b pointing outward
        let faces = [
            (min + dx, dy, dz), // +X
            (min, dz, dy),      // -X
            (min + dy, dz, dx), // +Y
            (min, dx, dz),      // -Y
            (min + dz, dx, dy), // +Z
            (min, dy, dx),      // -Z
        ];

        let mut sides = HittableList::new();
        for (q, ea, eb) in faces {
            sides.add(Arc::new(Triangle::new(q, q + ea, q + ea + eb, Arc::clone(&material))));
            sides.add(Arc::new(Triangle::new(q, q + ea + eb, q + eb, Arc::clone(&material))));
        }

        Self { min, max, sides }
    }

    /// The triangles making up the box.
    pub fn triangles(&self) -> &HittableList {
        &self.sides
    }
}

impl Hittable for BoxMesh {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        self.sides.hit(r, ray_t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Color;

    fn material() -> Arc<Material> {
        Arc::new(Material::solid(Color::ONE, 0.1, 10.0))
    }

    fn range() -> Interval {
        Interval::new(0.001, f32::INFINITY)
    }

    fn unit_triangle() -> Triangle {
        Triangle::new(Vec3A::ZERO, Vec3A::X, Vec3A::Y, material())
    }

    #[test]
    fn triangle_hit_reports_barycentrics() {
        let r = Ray::new(Vec3A::new(0.25, 0.5, 3.0), Vec3A::NEG_Z);
        let rec = unit_triangle().hit(&r, range()).expect("hit");

        assert!((rec.t - 3.0).abs() < 1e-6);
        assert!((rec.u - 0.25).abs() < 1e-6);
        assert!((rec.v - 0.5).abs() < 1e-6);
        assert_eq!(rec.normal, Vec3A::Z);
        assert!(rec.front_face);
    }

    #[test]
    fn triangle_back_side_flips_normal() {
        let r = Ray::new(Vec3A::new(0.25, 0.25, -3.0), Vec3A::Z);
        let rec = unit_triangle().hit(&r, range()).expect("hit");

        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3A::NEG_Z);
    }

    #[test]
    fn triangle_rejects_parallel_and_outside_rays() {
        let parallel = Ray::new(Vec3A::new(-1.0, 0.2, 0.0), Vec3A::X);
        assert!(unit_triangle().hit(&parallel, range()).is_none());

        let outside = Ray::new(Vec3A::new(0.8, 0.8, 3.0), Vec3A::NEG_Z);
        assert!(unit_triangle().hit(&outside, range()).is_none());

        let behind = Ray::new(Vec3A::new(0.2, 0.2, -3.0), Vec3A::NEG_Z);
        assert!(unit_triangle().hit(&behind, range()).is_none());
    }

    #[test]
    fn box_faces_are_outward_from_every_axis() {
        let b = BoxMesh::new(Vec3A::ONE, Vec3A::ZERO, material());
        assert_eq!(b.min, Vec3A::ZERO);
        assert_eq!(b.max, Vec3A::ONE);
        assert_eq!(b.triangles().len(), 12);

        let center = Vec3A::splat(0.5);
        for axis in [Vec3A::X, Vec3A::NEG_X, Vec3A::Y, Vec3A::NEG_Y, Vec3A::Z, Vec3A::NEG_Z] {
            // Slightly off-center so the ray avoids the shared diagonal edge.
            let origin = center + axis * 5.0 + Vec3A::new(0.1, 0.2, 0.3) * (Vec3A::ONE - axis.abs());
            let r = Ray::new(origin, -axis);
            let rec = b.hit(&r, range()).expect("hit");

            assert!((rec.t - 4.5).abs() < 1e-5, "axis {axis:?}");
            assert!(rec.front_face, "axis {axis:?}");
            assert!((rec.normal - axis).length() < 1e-6, "axis {axis:?}");
        }
    }

    #[test]
    fn box_from_inside_hits_back_face() {
        let b = BoxMesh::new(Vec3A::ZERO, Vec3A::ONE, material());
        let r = Ray::new(Vec3A::new(0.5, 0.3, 0.4), Vec3A::X);
        let rec = b.hit(&r, range()).expect("hit");

        assert!((rec.t - 0.5).abs() < 1e-6);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3A::NEG_X);
    }
}
