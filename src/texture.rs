//! Diffuse color sources sampled by materials.

use glam::Vec3A;

/// RGB color type using Vec3A for SIMD optimization.
pub type Color = Vec3A;

/// Color lookup at a surface point.
///
/// Implementations must be pure: the same `(u, v, p)` always yields the same color.
pub trait Texture: Send + Sync {
    /// Diffuse color at texture coordinates `(u, v)` and world point `p`.
    fn value(&self, u: f32, v: f32, p: Vec3A) -> Color;
}

/// Uniform color everywhere.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    /// The returned color.
    pub albedo: Color,
}

impl SolidColor {
    /// Create a solid texture.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f32, _v: f32, _p: Vec3A) -> Color {
        self.albedo
    }
}

/// 3D checkerboard keyed on the hit point.
///
/// Cells are unit cubes scaled by `scale`; the parity of the summed floor
/// coordinates picks `even` or `odd`.
#[derive(Debug, Clone, Copy)]
pub struct CheckerTexture {
    inv_scale: f32,
    /// Color of cells whose floor sum is even.
    pub even: Color,
    /// Color of the remaining cells.
    pub odd: Color,
}

impl CheckerTexture {
    /// Create a checker with cells of edge `scale`.
    pub fn new(scale: f32, even: Color, odd: Color) -> Self {
        Self {
            inv_scale: 1.0 / scale,
            even,
            odd,
        }
    }
}

impl Texture for CheckerTexture {
    fn value(&self, _u: f32, _v: f32, p: Vec3A) -> Color {
        let cell = (p * self.inv_scale).floor();
        let sum = cell.x as i64 + cell.y as i64 + cell.z as i64;

        if sum.rem_euclid(2) == 0 {
            self.even
        } else {
            self.odd
        }
    }
}
