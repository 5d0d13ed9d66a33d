//! Error type for scene construction and image output.
//!
//! Intersection queries never fail: a miss is `None`. Errors only arise when
//! building transforms or cameras from bad input, picking outside the image,
//! or writing the rendered image.

use thiserror::Error;

/// Failures raised outside the intersection hot path.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The forward matrix has no inverse.
    #[error("transform is singular (determinant {determinant})")]
    SingularTransform {
        /// Determinant of the rejected matrix.
        determinant: f32,
    },

    /// The matrix bottom row is not `(0, 0, 0, 1)`.
    #[error("transform is not affine")]
    NonAffineTransform,

    /// A caller-supplied inverse does not undo the forward matrix.
    #[error("supplied inverse does not match the forward transform (max deviation {deviation})")]
    InverseMismatch {
        /// Largest absolute difference between `forward * inverse` and identity.
        deviation: f32,
    },

    /// The camera basis cannot be built from the given vectors.
    #[error("degenerate camera: {reason}")]
    DegenerateCamera {
        /// Which input made the basis undefined.
        reason: &'static str,
    },

    /// Image aspect ratio that cannot size an image.
    #[error("aspect ratio must be finite and positive, got {ratio}")]
    InvalidAspectRatio {
        /// The rejected ratio.
        ratio: f32,
    },

    /// Picking coordinate outside the image.
    #[error("pixel ({x}, {y}) is outside the {width}x{height} image")]
    PixelOutOfBounds {
        /// Requested column.
        x: i64,
        /// Requested row (0 at the bottom).
        y: i64,
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
    },

    /// Output path has an extension we cannot encode.
    #[error("unsupported output format '{extension}', expected .png, .exr or .ppm")]
    UnsupportedFormat {
        /// The offending extension (may be empty).
        extension: String,
    },

    /// PNG encoding failed.
    #[error("failed to save image: {0}")]
    Image(#[from] image::ImageError),

    /// EXR encoding failed.
    #[error("failed to save EXR image: {0}")]
    Exr(#[from] exr::error::Error),

    /// Plain I/O failure (PPM output, stdin).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
