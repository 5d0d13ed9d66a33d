//! Thin-lens camera for primary ray generation.

use glam::Vec3A;
use rand::Rng;

use crate::error::RenderError;
use crate::random;
use crate::ray::Ray;

/// Camera placement and lens settings.
///
/// Builder-style input to [`Camera::new`]; all derived quantities are
/// computed once there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// Point camera is looking from (camera position)
    pub lookfrom: Vec3A,
    /// Point camera is looking at (look target)
    pub lookat: Vec3A,
    /// Camera-relative "up" direction vector
    pub vup: Vec3A,
    /// Vertical field of view in degrees
    pub vfov: f32,
    /// Viewport width over height
    pub aspect_ratio: f32,
    /// Lens diameter; 0 gives a pinhole camera
    pub aperture: f32,
    /// Distance from lookfrom to the plane of perfect focus
    pub focus_dist: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            lookfrom: Vec3A::ZERO,
            lookat: Vec3A::NEG_Z,
            vup: Vec3A::Y,
            vfov: 90.0,
            aspect_ratio: 1.0,
            aperture: 0.0,
            focus_dist: 1.0,
        }
    }
}

/// Immutable camera mapping screen coordinates to world-space rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    origin: Vec3A,
    lower_left_corner: Vec3A,
    horizontal: Vec3A,
    vertical: Vec3A,
    /// Camera frame basis vector pointing right
    u: Vec3A,
    /// Camera frame basis vector pointing up
    v: Vec3A,
    /// Camera frame basis vector pointing opposite view direction
    w: Vec3A,
    lens_radius: f32,
}

impl Camera {
    /// Derive the camera frame and viewport from `settings`.
    ///
    /// Fails when the view direction is undefined (`lookfrom == lookat`) or
    /// `vup` is parallel to it.
    pub fn new(settings: &CameraSettings) -> Result<Self, RenderError> {
        let back = settings.lookfrom - settings.lookat;
        if back.length_squared() == 0.0 {
            return Err(RenderError::DegenerateCamera {
                reason: "lookfrom and lookat coincide",
            });
        }
        let w = back.normalize();

        let right = settings.vup.cross(w);
        if right.length_squared() < 1e-12 {
            return Err(RenderError::DegenerateCamera {
                reason: "vup is parallel to the view direction",
            });
        }
        let u = right.normalize();
        let v = w.cross(u);

        let theta = settings.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = settings.aspect_ratio * viewport_height;

        let origin = settings.lookfrom;
        let horizontal = settings.focus_dist * viewport_width * u;
        let vertical = settings.focus_dist * viewport_height * v;
        let lower_left_corner =
            origin - horizontal / 2.0 - vertical / 2.0 - settings.focus_dist * w;

        Ok(Self {
            origin,
            lower_left_corner,
            horizontal,
            vertical,
            u,
            v,
            w,
            lens_radius: settings.aperture / 2.0,
        })
    }

    /// Ray through screen point `(s, t)`, both in `[0, 1]` from the lower left.
    ///
    /// With a non-zero aperture the origin is jittered across the lens disk;
    /// a pinhole camera draws nothing from `rng`.
    pub fn get_ray<R: Rng + ?Sized>(&self, s: f32, t: f32, rng: &mut R) -> Ray {
        let offset = if self.lens_radius > 0.0 {
            let rd = self.lens_radius * random::random_in_unit_disk(rng);
            self.u * rd.x + self.v * rd.y
        } else {
            Vec3A::ZERO
        };

        Ray::new(
            self.origin + offset,
            self.lower_left_corner + s * self.horizontal + t * self.vertical
                - self.origin
                - offset,
        )
    }

    /// Camera position.
    pub fn origin(&self) -> Vec3A {
        self.origin
    }

    /// Orthonormal frame `(right, up, back)`.
    pub fn basis(&self) -> (Vec3A, Vec3A, Vec3A) {
        (self.u, self.v, self.w)
    }

    /// Lens radius (half the aperture).
    pub fn lens_radius(&self) -> f32 {
        self.lens_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded;

    fn close(a: Vec3A, b: Vec3A) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn basis_is_orthonormal_right_handed() {
        let cam = Camera::new(&CameraSettings {
            lookfrom: Vec3A::new(0.0, 8.0, 12.0),
            lookat: Vec3A::new(0.0, 2.0, 0.0),
            ..CameraSettings::default()
        })
        .expect("valid camera");

        let (u, v, w) = cam.basis();
        assert!((u.length() - 1.0).abs() < 1e-5);
        assert!((v.length() - 1.0).abs() < 1e-5);
        assert!(u.dot(v).abs() < 1e-5 && v.dot(w).abs() < 1e-5 && w.dot(u).abs() < 1e-5);
        assert!(close(u.cross(v), w));
    }

    #[test]
    fn pinhole_rays_hit_viewport_corners_and_center() {
        let cam = Camera::new(&CameraSettings {
            aspect_ratio: 2.0,
            ..CameraSettings::default()
        })
        .expect("valid camera");
        let mut rng = seeded(0);

        let center = cam.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(center.origin, Vec3A::ZERO);
        assert!(close(center.direction, Vec3A::NEG_Z));

        // vfov 90 gives a viewport 2 high and 4 wide at unit focus distance
        let corner = cam.get_ray(0.0, 0.0, &mut rng);
        assert!(close(corner.direction, Vec3A::new(-2.0, -1.0, -1.0)));
        let top_right = cam.get_ray(1.0, 1.0, &mut rng);
        assert!(close(top_right.direction, Vec3A::new(2.0, 1.0, -1.0)));
    }

    #[test]
    fn lens_rays_converge_on_focus_plane() {
        let settings = CameraSettings {
            aperture: 0.5,
            focus_dist: 10.0,
            ..CameraSettings::default()
        };
        let cam = Camera::new(&settings).expect("valid camera");
        assert_eq!(cam.lens_radius(), 0.25);

        let mut rng = seeded(42);
        let focus_point = Vec3A::new(0.0, 0.0, -10.0);
        for _ in 0..32 {
            let r = cam.get_ray(0.5, 0.5, &mut rng);
            assert!(r.origin.length() <= 0.25 + 1e-6);
            assert_eq!(r.origin.z, 0.0);
            assert!(close(r.at(1.0), focus_point));
        }
    }

    #[test]
    fn degenerate_inputs_are_rejected() {
        let same = Camera::new(&CameraSettings {
            lookfrom: Vec3A::ONE,
            lookat: Vec3A::ONE,
            ..CameraSettings::default()
        });
        assert!(matches!(same, Err(RenderError::DegenerateCamera { .. })));

        let straight_down = Camera::new(&CameraSettings {
            lookfrom: Vec3A::new(0.0, 10.0, 0.0),
            lookat: Vec3A::ZERO,
            ..CameraSettings::default()
        });
        assert!(matches!(straight_down, Err(RenderError::DegenerateCamera { .. })));
    }
}
