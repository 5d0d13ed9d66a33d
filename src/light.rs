//! Point light source.

use glam::Vec3A;

use crate::material::Color;

/// Omnidirectional light at a world position, without falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// World-space position.
    pub position: Vec3A,
    /// Per-channel intensity multiplying diffuse and specular terms.
    pub intensity: Color,
}

impl PointLight {
    /// Create a light.
    pub fn new(position: Vec3A, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }
}
