//! Serial render loop with jittered supersampling.

use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};

use crate::camera::Camera;
use crate::error::RenderError;
use crate::hittable::Hittable;
use crate::light::PointLight;
use crate::material::Color;
use crate::random;
use crate::shading::shade_lights;

/// Linear HDR image produced by [`Renderer::render`].
pub type HdrImage = ImageBuffer<Rgb<f32>, Vec<f32>>;

/// Image size, sampling and seed for one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Renderer {
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Rendered image height in pixel count
    pub image_height: u32,
    /// Number of jittered samples for each pixel (for anti-aliasing)
    pub samples_per_pixel: u32,
    /// Seed of the sampling generator
    pub seed: u64,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl Renderer {
    /// Size the image from its width and aspect ratio (height is at least 1).
    ///
    /// Fails unless `aspect_ratio` is finite and positive.
    pub fn new(
        image_width: u32,
        aspect_ratio: f32,
        samples_per_pixel: u32,
        seed: u64,
    ) -> Result<Self, RenderError> {
        if !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
            return Err(RenderError::InvalidAspectRatio { ratio: aspect_ratio });
        }

        let image_width = image_width.max(1);
        let image_height = ((image_width as f32 / aspect_ratio) as u32).max(1);
        Ok(Self {
            image_width,
            image_height,
            samples_per_pixel: samples_per_pixel.max(1),
            seed,
            show_progress: true,
        })
    }

    /// Width over height of the output image.
    pub fn aspect_ratio(&self) -> f32 {
        self.image_width as f32 / self.image_height as f32
    }

    /// Cast `samples_per_pixel` jittered rays per pixel and average their colors.
    ///
    /// Image row 0 is the top of the picture; screen `t` grows upward. The
    /// returned values are linear (no gamma applied).
    pub fn render(&self, camera: &Camera, world: &dyn Hittable, lights: &[PointLight]) -> HdrImage {
        let width = self.image_width;
        let height = self.image_height;
        let mut image = HdrImage::new(width, height);
        let mut rng = random::seeded(self.seed);

        info!(
            "Rendering {}x{} with {} samples per pixel (seed {})",
            width, height, self.samples_per_pixel, self.seed
        );
        let started = std::time::Instant::now();
        let pb = if self.show_progress {
            let pb = ProgressBar::new(height as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{bar:40} {pos}/{len} rows ETA: {eta}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let s_span = (width.max(2) - 1) as f32;
        let t_span = (height.max(2) - 1) as f32;
        let scale = 1.0 / self.samples_per_pixel as f32;

        for row in 0..height {
            let j = height - 1 - row;
            for i in 0..width {
                let mut pixel_color = Color::ZERO;
                for _ in 0..self.samples_per_pixel {
                    let s = (i as f32 + random::random_f32(&mut rng)) / s_span;
                    let t = (j as f32 + random::random_f32(&mut rng)) / t_span;
                    let r = camera.get_ray(s, t, &mut rng);
                    pixel_color += shade_lights(&r, world, lights);
                }
                pixel_color *= scale;
                image.put_pixel(i, row, Rgb([pixel_color.x, pixel_color.y, pixel_color.z]));
            }
            pb.inc(1);
            if row % 50 == 0 {
                debug!("Rows remaining: {}", height - row);
            }
        }

        pb.finish_and_clear();
        info!("Image rendered in {:.2?}", started.elapsed());
        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::CameraSettings;
    use crate::hittable::HittableList;
    use crate::material::Material;
    use crate::sphere::Sphere;
    use glam::Vec3A;
    use std::sync::Arc;

    fn quiet(width: u32, samples: u32, seed: u64) -> Renderer {
        Renderer {
            show_progress: false,
            ..Renderer::new(width, 1.0, samples, seed).expect("valid aspect ratio")
        }
    }

    fn scene() -> (Camera, HittableList, Vec<PointLight>) {
        let camera = Camera::new(&CameraSettings {
            lookfrom: Vec3A::new(0.0, 0.0, 5.0),
            lookat: Vec3A::ZERO,
            vfov: 40.0,
            ..CameraSettings::default()
        })
        .expect("valid camera");
        let world = HittableList::with_object(Arc::new(Sphere::new(
            Vec3A::ZERO,
            1.0,
            Arc::new(Material::solid(Color::new(0.9, 0.1, 0.1), 0.1, 32.0)),
        )));
        let lights = vec![PointLight::new(Vec3A::new(10.0, 20.0, 10.0), Color::ONE)];
        (camera, world, lights)
    }

    #[test]
    fn height_follows_aspect_ratio() {
        let height = |width, ratio| Renderer::new(width, ratio, 1, 0).expect("valid aspect ratio").image_height;
        assert_eq!(height(400, 2.0), 200);
        assert_eq!(height(3, 16.0), 1);
        assert_eq!(height(500, 1.7), 294);

        let renderer = Renderer::new(100, 1.0, 0, 0).expect("valid aspect ratio");
        assert_eq!(renderer.samples_per_pixel, 1);
        assert_eq!(renderer.aspect_ratio(), 1.0);
    }

    #[test]
    fn unusable_aspect_ratios_are_rejected() {
        for ratio in [0.0, -0.0, -1.5, f32::NAN, f32::INFINITY] {
            let err = Renderer::new(500, ratio, 1, 0).unwrap_err();
            assert!(matches!(err, RenderError::InvalidAspectRatio { .. }), "ratio {ratio}");
        }
    }

    #[test]
    fn same_seed_renders_identical_images() {
        let (camera, world, lights) = scene();
        let a = quiet(16, 4, 9).render(&camera, &world, &lights);
        let b = quiet(16, 4, 9).render(&camera, &world, &lights);
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn center_shows_object_and_corner_shows_sky() {
        let (camera, world, lights) = scene();
        let image = quiet(21, 1, 0).render(&camera, &world, &lights);

        let center = image.get_pixel(10, 10);
        assert!(center[0] > center[2], "center should be the red sphere");

        let top_left = image.get_pixel(0, 0);
        assert!(top_left[2] > top_left[0], "corner should be sky");
        // Upper rows are bluer than lower rows in the background gradient.
        let bottom_left = image.get_pixel(0, 20);
        assert!(top_left[0] < bottom_left[0]);
    }
}
