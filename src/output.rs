//! # Output Module
//!
//! Writes rendered images to disk. The format is picked from the file extension:
//! - `.png`: 8-bit with gamma 2 correction
//! - `.exr`: linear f32 HDR values, untouched
//! - `.ppm`: plain-text `P3` with the same 8-bit conversion as PNG

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use exr::prelude::write_rgb_file;
use image::{ImageBuffer, Rgb};
use log::info;

use crate::error::RenderError;
use crate::render::HdrImage;

/// Convert one linear channel to an 8-bit value.
///
/// Applies gamma 2 (square root), clamps to `[0, 0.999]` and scales by 256 so
/// that 1.0 maps to 255.
pub fn to_byte(linear: f32) -> u8 {
    let gamma = linear.max(0.0).sqrt();
    (256.0 * gamma.clamp(0.0, 0.999)) as u8
}

/// Gamma-corrected 8-bit copy of a linear image.
pub fn to_rgb8(image: &HdrImage) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
    ImageBuffer::from_fn(image.width(), image.height(), |x, y| {
        let pixel = image.get_pixel(x, y);
        Rgb([to_byte(pixel[0]), to_byte(pixel[1]), to_byte(pixel[2])])
    })
}

/// Save `image` to `path`, choosing the encoder from the extension.
pub fn save_image(image: &HdrImage, path: &Path) -> Result<(), RenderError> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => save_image_as_png(image, path),
        "exr" => save_image_as_exr(image, path),
        "ppm" => save_image_as_ppm(image, path),
        _ => Err(RenderError::UnsupportedFormat { extension }),
    }
}

/// Save an f32 RGB image as gamma-corrected 8-bit PNG.
pub fn save_image_as_png(image: &HdrImage, path: &Path) -> Result<(), RenderError> {
    to_rgb8(image).save(path)?;
    info!("Image saved as {}", path.display());
    Ok(())
}

/// Save an f32 RGB image as EXR with full HDR precision.
pub fn save_image_as_exr(image: &HdrImage, path: &Path) -> Result<(), RenderError> {
    let width = image.width() as usize;
    write_rgb_file(path, width, image.height() as usize, |x, y| {
        let pixel = image.get_pixel(x as u32, y as u32);
        (pixel[0], pixel[1], pixel[2])
    })?;
    info!("HDR image saved as EXR: {}", path.display());
    Ok(())
}

/// Save an f32 RGB image as plain-text PPM.
pub fn save_image_as_ppm(image: &HdrImage, path: &Path) -> Result<(), RenderError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_ppm(image, &mut writer)?;
    writer.flush()?;
    info!("Image saved as {}", path.display());
    Ok(())
}

/// Stream `image` as `P3` text, top row first.
pub fn write_ppm<W: Write>(image: &HdrImage, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "P3\n{} {}\n255", image.width(), image.height())?;
    for pixel in to_rgb8(image).pixels() {
        writeln!(out, "{} {} {}", pixel[0], pixel[1], pixel[2])?;
    }
    Ok(())
}
