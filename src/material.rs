//! Blinn-Phong surface description.
//!
//! A material is immutable and shared between primitives through `Arc`.
//! Shading itself lives in [`crate::shading`].

use std::fmt;
use std::sync::Arc;

use crate::texture::{SolidColor, Texture};

pub use crate::texture::Color;

/// Specular color used when none is given.
pub const DEFAULT_SPECULAR: Color = Color::ONE;

/// Local illumination parameters.
#[derive(Clone)]
pub struct Material {
    /// Diffuse color source (`kd`).
    pub texture: Arc<dyn Texture>,
    /// Specular color (`ks`).
    pub specular: Color,
    /// Ambient coefficient (`ka`), scales the diffuse color.
    pub ambient: f32,
    /// Blinn-Phong exponent.
    pub shininess: f32,
}

impl Material {
    /// Create a material from a texture with the default white specular color.
    pub fn new(texture: Arc<dyn Texture>, ambient: f32, shininess: f32) -> Self {
        Self {
            texture,
            specular: DEFAULT_SPECULAR,
            ambient,
            shininess,
        }
    }

    /// Create a material with a uniform diffuse color.
    pub fn solid(diffuse: Color, ambient: f32, shininess: f32) -> Self {
        Self::new(Arc::new(SolidColor::new(diffuse)), ambient, shininess)
    }

    /// Replace the specular color.
    pub fn with_specular(mut self, specular: Color) -> Self {
        self.specular = specular;
        self
    }
}

impl fmt::Debug for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Material")
            .field("specular", &self.specular)
            .field("ambient", &self.ambient)
            .field("shininess", &self.shininess)
            .finish_non_exhaustive()
    }
}
