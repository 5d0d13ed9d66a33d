//! Affine transforms for instanced geometry.
//!
//! Matrices are `glam::Mat4` in column-vector convention, so `a * b` applies
//! `b` first. Points are mapped with an implicit `w = 1`, directions with
//! `w = 0` (no translation), normals with the inverse-transpose.

use glam::{Mat3A, Mat4, Vec3, Vec3A};

use crate::error::RenderError;

/// Smallest determinant magnitude accepted as invertible.
const SINGULAR_EPSILON: f32 = 1e-8;
/// Largest allowed entry of `forward * inverse - I` for supplied pairs.
const INVERSE_TOLERANCE: f32 = 1e-4;

/// Translation by `offset`.
pub fn translate(offset: Vec3A) -> Mat4 {
    Mat4::from_translation(Vec3::from(offset))
}

/// Per-axis scale.
pub fn scale(factors: Vec3A) -> Mat4 {
    Mat4::from_scale(Vec3::from(factors))
}

/// Right-handed rotation about X.
pub fn rotate_x(radians: f32) -> Mat4 {
    Mat4::from_rotation_x(radians)
}

/// Right-handed rotation about Y.
pub fn rotate_y(radians: f32) -> Mat4 {
    Mat4::from_rotation_y(radians)
}

/// Right-handed rotation about Z.
pub fn rotate_z(radians: f32) -> Mat4 {
    Mat4::from_rotation_z(radians)
}

/// Mirror across the planes orthogonal to each selected axis.
pub fn reflection(x: bool, y: bool, z: bool) -> Mat4 {
    let flip = |on: bool| if on { -1.0 } else { 1.0 };
    Mat4::from_scale(Vec3::new(flip(x), flip(y), flip(z)))
}

/// A forward matrix paired with its exact inverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    forward: Mat4,
    inverse: Mat4,
    normal: Mat3A,
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Transform = Transform {
        forward: Mat4::IDENTITY,
        inverse: Mat4::IDENTITY,
        normal: Mat3A::IDENTITY,
    };

    /// Build from a forward matrix, computing its inverse.
    pub fn new(forward: Mat4) -> Result<Self, RenderError> {
        check_affine(&forward)?;

        let determinant = forward.determinant();
        if !determinant.is_finite() || determinant.abs() < SINGULAR_EPSILON {
            return Err(RenderError::SingularTransform { determinant });
        }

        Ok(Self::from_parts(forward, forward.inverse()))
    }

    /// Build from a caller-supplied inverse, checking that it undoes `forward`.
    pub fn from_pair(forward: Mat4, inverse: Mat4) -> Result<Self, RenderError> {
        check_affine(&forward)?;
        check_affine(&inverse)?;

        let product = (forward * inverse).to_cols_array();
        let identity = Mat4::IDENTITY.to_cols_array();
        let deviation = product
            .iter()
            .zip(identity.iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0_f32, f32::max);

        if deviation > INVERSE_TOLERANCE || product.iter().any(|x| !x.is_finite()) {
            return Err(RenderError::InverseMismatch { deviation });
        }

        Ok(Self::from_parts(forward, inverse))
    }

    fn from_parts(forward: Mat4, inverse: Mat4) -> Self {
        Self {
            forward,
            inverse,
            normal: Mat3A::from_mat4(inverse).transpose(),
        }
    }

    /// Apply `self` first, then `outer`.
    pub fn then(&self, outer: &Transform) -> Transform {
        Self::from_parts(outer.forward * self.forward, self.inverse * outer.inverse)
    }

    /// Local-to-world matrix.
    pub fn forward(&self) -> Mat4 {
        self.forward
    }

    /// World-to-local matrix.
    pub fn inverse(&self) -> Mat4 {
        self.inverse
    }

    /// Map a local point to world space.
    pub fn point(&self, p: Vec3A) -> Vec3A {
        self.forward.transform_point3a(p)
    }

    /// Map a local direction to world space.
    pub fn vector(&self, v: Vec3A) -> Vec3A {
        self.forward.transform_vector3a(v)
    }

    /// Map a local surface normal to world space (not normalized).
    pub fn normal(&self, n: Vec3A) -> Vec3A {
        self.normal * n
    }

    /// Map a world point to local space.
    pub fn inverse_point(&self, p: Vec3A) -> Vec3A {
        self.inverse.transform_point3a(p)
    }

    /// Map a world direction to local space.
    pub fn inverse_vector(&self, v: Vec3A) -> Vec3A {
        self.inverse.transform_vector3a(v)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn check_affine(m: &Mat4) -> Result<(), RenderError> {
    if m.row(3) == glam::Vec4::W {
        Ok(())
    } else {
        Err(RenderError::NonAffineTransform)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use std::f32::consts::FRAC_PI_4;

    fn close(a: Vec3A, b: Vec3A) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn computed_inverse_round_trips_points() {
        let forward = translate(Vec3A::new(-4.0, 1.0, 1.0)) * rotate_y(FRAC_PI_4) * scale(Vec3A::new(2.0, 1.0, 0.5));
        let t = Transform::new(forward).expect("invertible");

        for p in [Vec3A::ZERO, Vec3A::new(1.0, 2.0, 3.0), Vec3A::new(-7.5, 0.25, 9.0)] {
            assert!(close(t.point(t.inverse_point(p)), p));
            assert!(close(t.inverse_point(t.point(p)), p));
        }
    }

    #[test]
    fn directions_ignore_translation() {
        let t = Transform::new(translate(Vec3A::new(5.0, 6.0, 7.0))).expect("invertible");
        assert_eq!(t.vector(Vec3A::X), Vec3A::X);
        assert_eq!(t.inverse_vector(Vec3A::Y), Vec3A::Y);
        assert_eq!(t.point(Vec3A::ZERO), Vec3A::new(5.0, 6.0, 7.0));
    }

    #[test]
    fn normals_use_inverse_transpose() {
        let t = Transform::new(scale(Vec3A::new(2.0, 1.0, 1.0))).expect("invertible");
        let n = t.normal(Vec3A::new(1.0, 1.0, 0.0)).normalize();
        assert!(close(n, Vec3A::new(0.5, 1.0, 0.0).normalize()));
    }

    #[test]
    fn singular_matrix_is_rejected() {
        let err = Transform::new(scale(Vec3A::new(1.0, 0.0, 1.0))).unwrap_err();
        assert!(matches!(err, RenderError::SingularTransform { .. }));
    }

    #[test]
    fn projective_matrix_is_rejected() {
        let m = Mat4::from_cols(Vec4::new(1.0, 0.0, 0.0, 1.0), Vec4::Y, Vec4::Z, Vec4::W);
        assert!(matches!(Transform::new(m), Err(RenderError::NonAffineTransform)));
    }

    #[test]
    fn supplied_pairs_are_validated() {
        let forward = translate(Vec3A::new(0.0, 1.5, 0.0));
        let good = Transform::from_pair(forward, translate(Vec3A::new(0.0, -1.5, 0.0)));
        assert!(good.is_ok());

        let bad = Transform::from_pair(forward, translate(Vec3A::new(0.0, 1.5, 0.0)));
        assert!(matches!(bad, Err(RenderError::InverseMismatch { .. })));
    }

    #[test]
    fn reflection_is_its_own_inverse() {
        let m = reflection(true, false, false);
        assert_eq!(m * m, Mat4::IDENTITY);
        assert!(Transform::from_pair(m, m).is_ok());
        assert_eq!(m.transform_point3a(Vec3A::new(4.0, 1.0, 2.0)), Vec3A::new(-4.0, 1.0, 2.0));
    }

    #[test]
    fn then_composes_in_application_order() {
        let rotate = Transform::new(rotate_z(std::f32::consts::FRAC_PI_2)).expect("invertible");
        let shift = Transform::new(translate(Vec3A::X)).expect("invertible");
        let both = rotate.then(&shift);

        assert!(close(both.point(Vec3A::X), Vec3A::new(1.0, 1.0, 0.0)));
        assert!(close(both.inverse_point(Vec3A::new(1.0, 1.0, 0.0)), Vec3A::X));
    }
}
