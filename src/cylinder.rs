//! Capped cylinder centered on the origin, axis along Y.

use std::f32::consts::PI;
use std::sync::Arc;

use glam::Vec3A;

use crate::hittable::{nearest, HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;

/// Below this the ray runs parallel to the axis and only the caps can be hit.
const AXIS_PARALLEL_EPSILON: f32 = 1e-8;

/// Closed cylinder spanning `y` in `[-height/2, height/2]`.
///
/// Place it elsewhere by wrapping it in an [`crate::instance::Instance`].
#[derive(Debug, Clone)]
pub struct Cylinder {
    /// Total extent along Y.
    pub height: f32,
    /// Radius in the XZ plane.
    pub radius: f32,
    /// Shared surface material.
    pub material: Arc<Material>,
}

impl Cylinder {
    /// Create a cylinder.
    pub fn new(height: f32, radius: f32, material: Arc<Material>) -> Self {
        Self {
            height,
            radius,
            material,
        }
    }

    fn side(&self, r: &Ray, t: f32, ray_t: Interval) -> Option<HitRecord> {
        if !ray_t.surrounds(t) {
            return None;
        }
        let p = r.at(t);
        let half = self.height / 2.0;
        if p.y < -half || p.y > half {
            return None;
        }

        let outward_normal = Vec3A::new(p.x, 0.0, p.z) / self.radius;
        let phi = p.z.atan2(p.x);
        let u = 1.0 - (phi + PI) / (2.0 * PI);
        let v = (p.y + half) / self.height;

        Some(HitRecord::new(r, t, outward_normal, (u, v), &self.material))
    }

    fn cap(&self, r: &Ray, y_plane: f32, ray_t: Interval) -> Option<HitRecord> {
        // direction.y == 0 gives inf or NaN here, both rejected by the interval
        let t = (y_plane - r.origin.y) / r.direction.y;
        if !ray_t.surrounds(t) {
            return None;
        }
        let p = r.at(t);
        if p.x * p.x + p.z * p.z > self.radius * self.radius {
            return None;
        }

        let outward_normal = Vec3A::new(0.0, y_plane.signum(), 0.0);
        let uv = ((p.x / self.radius + 1.0) / 2.0, (p.z / self.radius + 1.0) / 2.0);

        Some(HitRecord::new(r, t, outward_normal, uv, &self.material))
    }
}

impl Hittable for Cylinder {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        // Flat or zero-radius cylinders have no well-defined normal or uv
        if !(self.radius > 0.0 && self.height > 0.0) {
            return None;
        }

        let o = r.origin;
        let d = r.direction;
        let mut best = None;

        let a = d.x * d.x + d.z * d.z;
        if a > AXIS_PARALLEL_EPSILON {
            let half_b = o.x * d.x + o.z * d.z;
            let c = o.x * o.x + o.z * o.z - self.radius * self.radius;
            let discriminant = half_b * half_b - a * c;

            if discriminant >= 0.0 {
                let sqrtd = discriminant.sqrt();
                best = self.side(r, (-half_b - sqrtd) / a, ray_t);
                if best.is_none() {
                    best = self.side(r, (-half_b + sqrtd) / a, ray_t);
                }
            }
        }

        let half = self.height / 2.0;
        for y_plane in [half, -half] {
            let limit = best.as_ref().map_or(ray_t.max, |rec| rec.t);
            best = nearest(best, self.cap(r, y_plane, ray_t.with_max(limit)));
        }

        best
    }
}
