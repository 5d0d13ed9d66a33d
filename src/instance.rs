//! Affine-transformed placement of a shared primitive.

use std::sync::Arc;

use glam::Mat4;

use crate::error::RenderError;
use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::ray::Ray;
use crate::transform::Transform;

/// A primitive seen through a [`Transform`].
///
/// The wrapped object is shared, so mirrored or repeated copies reuse one
/// base shape. Because the transform is affine, the ray parameter `t` is the
/// same in object and world space.
#[derive(Clone)]
pub struct Instance {
    object: Arc<dyn Hittable>,
    transform: Transform,
}

impl Instance {
    /// Wrap `object` with an already validated transform.
    pub fn new(object: Arc<dyn Hittable>, transform: Transform) -> Self {
        Self { object, transform }
    }

    /// Wrap `object` with `forward`, computing the inverse.
    pub fn from_matrix(object: Arc<dyn Hittable>, forward: Mat4) -> Result<Self, RenderError> {
        Ok(Self::new(object, Transform::new(forward)?))
    }

    /// The object-to-world transform.
    pub fn transform(&self) -> &Transform {
        &self.transform
    }
}

impl Hittable for Instance {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let local = Ray::new(
            self.transform.inverse_point(r.origin),
            self.transform.inverse_vector(r.direction),
        );

        let mut rec = self.object.hit(&local, ray_t)?;

        // Undo the local flip before mapping, then re-orient against the world ray.
        let local_outward = if rec.front_face { rec.normal } else { -rec.normal };
        let outward = self.transform.normal(local_outward).normalize();

        rec.p = self.transform.point(rec.p);
        rec.set_face_normal(r, outward);
        Some(rec)
    }
}
