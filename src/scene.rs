//! Built-in demo scene.

use std::sync::Arc;

use glam::Vec3A;

use crate::camera::CameraSettings;
use crate::cone::Cone;
use crate::cylinder::Cylinder;
use crate::error::RenderError;
use crate::hittable::{Hittable, HittableList};
use crate::instance::Instance;
use crate::light::PointLight;
use crate::material::{Color, Material};
use crate::mesh::BoxMesh;
use crate::sphere::Sphere;
use crate::texture::CheckerTexture;
use crate::transform::{reflection, rotate_y, translate, Transform};

/// Everything needed to render: geometry, lights and a camera placement.
#[derive(Clone)]
pub struct Scene {
    /// All surfaces.
    pub world: HittableList,
    /// Point lights.
    pub lights: Vec<PointLight>,
    /// Camera placement.
    pub camera: CameraSettings,
}

/// Altar scene: a gold pedestal holding a ruby sphere on a checker floor,
/// flanked by a silver cone and its mirror image, with a rotated blue box.
pub fn altar(aspect_ratio: f32) -> Result<Scene, RenderError> {
    let checker = Arc::new(CheckerTexture::new(
        1.0,
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
    ));
    let floor = Arc::new(Material::new(checker, 0.1, 10.0));
    let gold = Arc::new(
        Material::solid(Color::new(0.8, 0.6, 0.2), 0.2, 128.0).with_specular(Color::new(1.0, 0.9, 0.5)),
    );
    let silver = Arc::new(Material::solid(Color::new(0.7, 0.7, 0.7), 0.1, 200.0));
    let ruby = Arc::new(Material::solid(Color::new(0.9, 0.1, 0.1), 0.2, 100.0));
    let blue = Arc::new(Material::solid(Color::new(0.1, 0.2, 0.5), 0.1, 64.0));

    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(Vec3A::new(0.0, -1000.0, 0.0), 1000.0, floor)));

    let pedestal: Arc<dyn Hittable> = Arc::new(Cylinder::new(3.0, 1.5, gold));
    let raised = Transform::from_pair(
        translate(Vec3A::new(0.0, 1.5, 0.0)),
        translate(Vec3A::new(0.0, -1.5, 0.0)),
    )?;
    world.add(Arc::new(Instance::new(pedestal, raised)));

    world.add(Arc::new(Sphere::new(Vec3A::new(0.0, 4.0, 0.0), 1.0, ruby)));

    let spire: Arc<dyn Hittable> = Arc::new(Cone::new(4.0, 1.0, silver));
    let spire_place = Transform::new(translate(Vec3A::new(4.0, 0.0, 0.0)))?;
    let mirror = Transform::new(reflection(true, false, false))?;
    world.add(Arc::new(Instance::new(Arc::clone(&spire), spire_place)));
    world.add(Arc::new(Instance::new(spire, spire_place.then(&mirror))));

    let cube: Arc<dyn Hittable> = Arc::new(BoxMesh::new(Vec3A::ZERO, Vec3A::ONE, blue));
    world.add(Arc::new(Instance::from_matrix(
        cube,
        translate(Vec3A::new(-4.0, 1.0, 1.0)) * rotate_y(45.0_f32.to_radians()),
    )?));

    let lights = vec![PointLight::new(Vec3A::new(10.0, 20.0, 10.0), Color::ONE)];

    let lookfrom = Vec3A::new(0.0, 8.0, 12.0);
    let lookat = Vec3A::new(0.0, 2.0, 0.0);
    let camera = CameraSettings {
        lookfrom,
        lookat,
        vup: Vec3A::Y,
        vfov: 40.0,
        aspect_ratio,
        aperture: 0.0,
        focus_dist: (lookfrom - lookat).length(),
    };

    Ok(Scene {
        world,
        lights,
        camera,
    })
}
