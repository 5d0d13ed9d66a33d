//! Capped cone with its base on the XZ plane and apex on +Y.

use std::f32::consts::PI;
use std::sync::Arc;

use glam::Vec3A;

use crate::hittable::{nearest, HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;

const DEGENERATE_EPSILON: f32 = 1e-8;

/// Cone with base disk of `radius` at `y = 0` and apex at `y = height`.
#[derive(Debug, Clone)]
pub struct Cone {
    /// Apex height.
    pub height: f32,
    /// Base radius.
    pub radius: f32,
    /// Shared surface material.
    pub material: Arc<Material>,
}

impl Cone {
    /// Create a cone.
    pub fn new(height: f32, radius: f32, material: Arc<Material>) -> Self {
        Self {
            height,
            radius,
            material,
        }
    }

    /// Radius over height, the tangent of the half-angle.
    fn slope(&self) -> f32 {
        self.radius / self.height
    }

    /// Outward normal on the lateral surface at `p`.
    fn lateral_normal(&self, p: Vec3A) -> Vec3A {
        let rho = (p.x * p.x + p.z * p.z).sqrt();
        if rho < DEGENERATE_EPSILON {
            return Vec3A::Y;
        }
        Vec3A::new(p.x / rho, self.slope(), p.z / rho).normalize()
    }

    fn lateral(&self, r: &Ray, t: f32, ray_t: Interval) -> Option<HitRecord> {
        if !ray_t.surrounds(t) {
            return None;
        }
        let p = r.at(t);
        if p.y < 0.0 || p.y > self.height {
            return None;
        }

        let phi = p.z.atan2(p.x);
        let u = 1.0 - (phi + PI) / (2.0 * PI);
        let v = p.y / self.height;

        Some(HitRecord::new(r, t, self.lateral_normal(p), (u, v), &self.material))
    }

    fn base(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let t = -r.origin.y / r.direction.y;
        if !ray_t.surrounds(t) {
            return None;
        }
        let p = r.at(t);
        if p.x * p.x + p.z * p.z > self.radius * self.radius {
            return None;
        }

        let uv = ((p.x / self.radius + 1.0) / 2.0, (p.z / self.radius + 1.0) / 2.0);
        Some(HitRecord::new(r, t, Vec3A::NEG_Y, uv, &self.material))
    }

    /// Parameters where the ray meets the infinite double cone, nearest first.
    ///
    /// Missing roots are NaN, which no interval surrounds.
    fn lateral_roots(&self, r: &Ray) -> [f32; 2] {
        let o = r.origin;
        let d = r.direction;
        let k2 = self.slope() * self.slope();
        let above = self.height - o.y;

        let a = d.x * d.x + d.z * d.z - k2 * d.y * d.y;
        let half_b = o.x * d.x + o.z * d.z + k2 * d.y * above;
        let c = o.x * o.x + o.z * o.z - k2 * above * above;

        if a.abs() < DEGENERATE_EPSILON {
            // Ray parallel to a generator line: one crossing at most
            if half_b.abs() < DEGENERATE_EPSILON {
                return [f32::NAN; 2];
            }
            return [-c / (2.0 * half_b), f32::NAN];
        }

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return [f32::NAN; 2];
        }
        let sqrtd = discriminant.sqrt();
        let t0 = (-half_b - sqrtd) / a;
        let t1 = (-half_b + sqrtd) / a;
        [t0.min(t1), t0.max(t1)]
    }
}

impl Hittable for Cone {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        if !(self.radius > 0.0 && self.height > 0.0) {
            return None;
        }

        let best = self
            .lateral_roots(r)
            .into_iter()
            .find_map(|t| self.lateral(r, t, ray_t));

        let limit = best.as_ref().map_or(ray_t.max, |rec| rec.t);
        nearest(best, self.base(r, ray_t.with_max(limit)))
    }
}
