//! Ray-object intersection system.
//!
//! Defines the Hittable trait for geometric primitives, HitRecord for
//! storing intersection data, and the linear-scan aggregate used as the scene.

use std::sync::Arc;

use glam::Vec3A;

use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;

/// Ray-object intersection information.
///
/// Contains intersection point, surface normal, distance, texture coordinates
/// and material data needed for shading calculations.
#[derive(Debug, Clone)]
pub struct HitRecord {
    /// Point where the ray intersects the object
    pub p: Vec3A,
    /// Surface normal at the intersection point (unit vector, facing the ray)
    pub normal: Vec3A,
    /// Material of the object at the hit point
    pub material: Arc<Material>,
    /// Ray parameter of the intersection point
    pub t: f32,
    /// Horizontal texture coordinate
    pub u: f32,
    /// Vertical texture coordinate
    pub v: f32,
    /// True if ray hits the front face, false if hits the back face
    pub front_face: bool,
}

impl HitRecord {
    /// Build a record at parameter `t` along `r`, orienting `outward_normal`
    /// against the ray.
    ///
    /// `outward_normal` must be unit length.
    pub fn new(
        r: &Ray,
        t: f32,
        outward_normal: Vec3A,
        (u, v): (f32, f32),
        material: &Arc<Material>,
    ) -> Self {
        let mut rec = Self {
            p: r.at(t),
            normal: outward_normal,
            material: Arc::clone(material),
            t,
            u,
            v,
            front_face: true,
        };
        rec.set_face_normal(r, outward_normal);
        rec
    }

    /// Set surface normal and determine front/back face.
    ///
    /// Ensures normal always points against the incident ray.
    pub fn set_face_normal(&mut self, r: &Ray, outward_normal: Vec3A) {
        self.front_face = r.direction.dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be intersected by rays.
///
/// Core abstraction for geometric primitives. Must be thread-safe (Sync + Send)
/// so one immutable scene can be queried from anywhere.
pub trait Hittable: Send + Sync {
    /// Nearest intersection with `t` strictly inside `ray_t`, if any.
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord>;
}

/// Keep whichever of two optional hits is nearer.
///
/// Ties go to `a`.
pub(crate) fn nearest(a: Option<HitRecord>, b: Option<HitRecord>) -> Option<HitRecord> {
    match (a, b) {
        (Some(a), Some(b)) => Some(if b.t < a.t { b } else { a }),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Collection of objects forming a scene.
///
/// Uses linear search for intersection testing. Members are shared
/// (`Arc<dyn Hittable>`) so one base shape can appear under several instances.
#[derive(Default, Clone)]
pub struct HittableList {
    /// Members in insertion order
    pub objects: Vec<Arc<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Create a new list with a single hittable object
    pub fn with_object(object: Arc<dyn Hittable>) -> Self {
        let mut list = Self::new();
        list.add(object);
        list
    }

    /// Clear all objects from the list
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Number of direct members.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when the list has no members.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableList {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if let Some(rec) = object.hit(r, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}
