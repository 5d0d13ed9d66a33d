//! Blinn-Phong shading with hard shadows.
//!
//! One bounce only: a primary hit is lit directly by point lights, each
//! light tested for occlusion with a single shadow ray. No reflection or
//! refraction rays are spawned.

use glam::Vec3A;

use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::light::PointLight;
use crate::material::Color;
use crate::ray::Ray;

/// Nearest accepted ray parameter, for primary and shadow rays alike.
pub const T_MIN: f32 = 0.001;
/// Offset along the normal for shadow ray origins, against self-shadowing.
pub const SHADOW_BIAS: f32 = 1e-3;

const WHITE: Color = Color::ONE;
const SKY_BLUE: Color = Color::new(0.5, 0.7, 1.0);

/// Vertical white-to-blue gradient seen by rays that hit nothing.
pub fn background(r: &Ray) -> Color {
    let unit_direction = r.direction.normalize();
    // Y = -1 (down) gives a = 0, Y = 1 (up) gives a = 1
    let a = 0.5 * (unit_direction.y + 1.0);
    (1.0 - a) * WHITE + a * SKY_BLUE
}

/// Color seen along `r` lit by a single light.
pub fn shade(r: &Ray, world: &dyn Hittable, light: &PointLight) -> Color {
    shade_lights(r, world, std::slice::from_ref(light))
}

/// Color seen along `r` lit by every light in `lights`.
///
/// The ambient term is counted once; each unoccluded light adds its own
/// diffuse and specular contribution.
pub fn shade_lights(r: &Ray, world: &dyn Hittable, lights: &[PointLight]) -> Color {
    let Some(rec) = world.hit(r, Interval::new(T_MIN, f32::INFINITY)) else {
        return background(r);
    };

    let diffuse_color = rec.material.texture.value(rec.u, rec.v, rec.p);
    let ambient = rec.material.ambient * diffuse_color;
    let view_dir = (-r.direction).normalize();

    lights
        .iter()
        .filter(|light| !in_shadow(world, &rec, light))
        .fold(ambient, |color, light| {
            color + direct(&rec, diffuse_color, view_dir, light)
        })
}

/// True when something lies between the hit point and the light.
pub fn in_shadow(world: &dyn Hittable, rec: &HitRecord, light: &PointLight) -> bool {
    let to_light = light.position - rec.p;
    let distance = to_light.length();
    let shadow_ray = Ray::new(rec.p + SHADOW_BIAS * rec.normal, to_light / distance);

    world
        .hit(&shadow_ray, Interval::new(T_MIN, distance))
        .is_some()
}

/// Diffuse plus specular contribution of one light, scaled by its intensity.
fn direct(rec: &HitRecord, diffuse_color: Color, view_dir: Vec3A, light: &PointLight) -> Color {
    let light_dir = (light.position - rec.p).normalize();
    let normal = rec.normal;

    let diff = normal.dot(light_dir).max(0.0);
    let diffuse = diff * diffuse_color;

    let halfway = (light_dir + view_dir).normalize();
    let spec = normal.dot(halfway).max(0.0).powf(rec.material.shininess);
    let specular = spec * rec.material.specular;

    (diffuse + specular) * light.intensity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::HittableList;
    use crate::material::Material;
    use crate::sphere::Sphere;
    use std::sync::Arc;

    fn close(a: Color, b: Color) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    fn unit_sphere_world(material: Material) -> HittableList {
        HittableList::with_object(Arc::new(Sphere::new(Vec3A::ZERO, 1.0, Arc::new(material))))
    }

    fn primary() -> Ray {
        Ray::new(Vec3A::new(0.0, 0.0, 5.0), Vec3A::NEG_Z)
    }

    #[test]
    fn background_gradient_endpoints() {
        let world = HittableList::new();
        let light = PointLight::new(Vec3A::Y, Color::ONE);

        let up = Ray::new(Vec3A::ZERO, Vec3A::Y);
        assert!(close(shade(&up, &world, &light), Color::new(0.5, 0.7, 1.0)));

        let down = Ray::new(Vec3A::ZERO, Vec3A::NEG_Y);
        assert!(close(shade(&down, &world, &light), Color::ONE));

        let level = Ray::new(Vec3A::ZERO, Vec3A::new(3.0, 0.0, 0.0));
        assert!(close(background(&level), Color::new(0.75, 0.85, 1.0)));
    }

    #[test]
    fn occluded_point_gets_ambient_only() {
        let mut world = unit_sphere_world(Material::solid(Color::splat(0.9), 0.1, 32.0));
        world.add(Arc::new(Sphere::new(
            Vec3A::new(0.0, 5.0, 1.0),
            0.5,
            Arc::new(Material::solid(Color::ONE, 0.5, 1.0)),
        )));
        let light = PointLight::new(Vec3A::new(0.0, 10.0, 1.0), Color::ONE);

        assert!(close(shade(&primary(), &world, &light), Color::splat(0.09)));
    }

    #[test]
    fn light_behind_surface_leaves_ambient() {
        let world = unit_sphere_world(Material::solid(Color::splat(0.9), 0.1, 32.0));
        // The sphere itself blocks a light on the far side.
        let light = PointLight::new(Vec3A::new(0.0, 0.0, -10.0), Color::ONE);

        assert!(close(shade(&primary(), &world, &light), Color::splat(0.09)));
    }

    #[test]
    fn aligned_light_and_view_give_full_specular() {
        let kd = Color::new(0.5, 0.4, 0.3);
        let ks = Color::new(1.0, 0.9, 0.5);
        let ka = 0.2;
        let world = unit_sphere_world(Material::solid(kd, ka, 128.0).with_specular(ks));
        let light = PointLight::new(Vec3A::new(0.0, 0.0, 10.0), Color::ONE);

        let color = shade(&primary(), &world, &light);
        let specular = color - ka * kd - kd;
        assert!(close(specular, ks * 1.0_f32.powf(128.0)));
    }

    #[test]
    fn light_intensity_scales_direct_terms_only() {
        let kd = Color::splat(0.5);
        let world = unit_sphere_world(Material::solid(kd, 0.1, 1.0).with_specular(Color::ZERO));
        let light = PointLight::new(Vec3A::new(0.0, 0.0, 10.0), Color::new(2.0, 1.0, 0.0));

        let color = shade(&primary(), &world, &light);
        assert!(close(color, 0.1 * kd + kd * Color::new(2.0, 1.0, 0.0)));
    }

    #[test]
    fn multiple_lights_add_ambient_once() {
        let kd = Color::splat(0.5);
        let world = unit_sphere_world(Material::solid(kd, 0.1, 1.0).with_specular(Color::ZERO));
        let front = PointLight::new(Vec3A::new(0.0, 0.0, 10.0), Color::ONE);
        let behind = PointLight::new(Vec3A::new(0.0, 0.0, -10.0), Color::ONE);

        let one = shade_lights(&primary(), &world, &[front]);
        let two = shade_lights(&primary(), &world, &[front, front]);
        let with_blocked = shade_lights(&primary(), &world, &[front, behind]);
        let none = shade_lights(&primary(), &world, &[]);

        assert!(close(two - one, kd));
        assert!(close(with_blocked, one));
        assert!(close(none, 0.1 * kd));
    }
}
