//! Pixel picking: report what the camera sees through one pixel.

use std::fmt;

use glam::Vec3A;
use rand::Rng;

use crate::camera::Camera;
use crate::error::RenderError;
use crate::hittable::Hittable;
use crate::interval::Interval;
use crate::ray::Ray;
use crate::shading::T_MIN;

/// Surface data at a picked pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// World-space hit point.
    pub point: Vec3A,
    /// Unit normal facing the camera ray.
    pub normal: Vec3A,
    /// Ray parameter of the hit.
    pub t: f32,
    /// Texture coordinate u.
    pub u: f32,
    /// Texture coordinate v.
    pub v: f32,
    /// Whether the outside of the surface was hit.
    pub front_face: bool,
}

/// Result of casting one ray through a pixel center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickResult {
    /// Column, as requested.
    pub x: u32,
    /// Row counted from the bottom, as requested.
    pub y: u32,
    /// The cast ray.
    pub ray: Ray,
    /// The nearest hit, or `None` for background.
    pub hit: Option<PickHit>,
}

/// Cast the camera ray through pixel `(x, y)` of a `width` x `height` image.
///
/// `y = 0` is the bottom row, matching the camera's screen `t`.
pub fn pick<R: Rng + ?Sized>(
    camera: &Camera,
    world: &dyn Hittable,
    (x, y): (i64, i64),
    (width, height): (u32, u32),
    rng: &mut R,
) -> Result<PickResult, RenderError> {
    let in_bounds = (0..width as i64).contains(&x) && (0..height as i64).contains(&y);
    if !in_bounds {
        return Err(RenderError::PixelOutOfBounds {
            x,
            y,
            width,
            height,
        });
    }

    let s = x as f32 / (width.max(2) - 1) as f32;
    let t = y as f32 / (height.max(2) - 1) as f32;
    let ray = camera.get_ray(s, t, rng);

    let hit = world
        .hit(&ray, Interval::new(T_MIN, f32::INFINITY))
        .map(|rec| PickHit {
            point: rec.p,
            normal: rec.normal,
            t: rec.t,
            u: rec.u,
            v: rec.v,
            front_face: rec.front_face,
        });

    Ok(PickResult {
        x: x as u32,
        y: y as u32,
        ray,
        hit,
    })
}

impl fmt::Display for PickResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- pick at ({}, {}) ---", self.x, self.y)?;
        writeln!(
            f,
            "ray: origin {} direction {}",
            self.ray.origin, self.ray.direction
        )?;
        match &self.hit {
            Some(hit) => {
                writeln!(f, "hit:")?;
                writeln!(f, "  point:    {}", hit.point)?;
                writeln!(f, "  normal:   {}", hit.normal)?;
                writeln!(f, "  distance: {}", hit.t)?;
                writeln!(f, "  uv:       {}, {}", hit.u, hit.v)?;
                write!(f, "  face:     {}", if hit.front_face { "front" } else { "back" })
            }
            None => write!(f, "background: the ray hit nothing"),
        }
    }
}
