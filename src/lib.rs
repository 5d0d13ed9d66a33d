//! Raycaster: an offline Blinn-Phong ray caster
//!
//! Spheres, capped cylinders, cones, triangles and box meshes are placed in
//! the scene through affine [`instance::Instance`] transforms. Each pixel is
//! shaded with ambient, diffuse and specular terms under point lights with
//! hard shadows. Output is PNG, EXR or PPM.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod cone;
pub mod cylinder;
pub mod error;
pub mod hittable;
pub mod instance;
pub mod interval;
pub mod light;
pub mod material;
pub mod mesh;
pub mod output;
pub mod pick;
pub mod random;
pub mod ray;
pub mod render;
pub mod scene;
pub mod shading;
pub mod sphere;
pub mod texture;
pub mod transform;
