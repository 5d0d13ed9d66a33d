use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Parse a pixel coordinate written as `X,Y`.
fn parse_pixel(s: &str) -> Result<(i64, i64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{s}'"))?;
    let x = x.trim().parse().map_err(|e| format!("bad X in '{s}': {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad Y in '{s}': {e}"))?;
    Ok((x, y))
}

/// Parse an aspect ratio, which must be finite and positive.
fn parse_aspect_ratio(s: &str) -> Result<f32, String> {
    let ratio: f32 = s.trim().parse().map_err(|e| format!("bad aspect ratio '{s}': {e}"))?;
    if ratio.is_finite() && ratio > 0.0 {
        Ok(ratio)
    } else {
        Err(format!("aspect ratio must be finite and positive, got {ratio}"))
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Debug, Parser)]
#[command(name = "raycaster")]
#[command(about = "Blinn-Phong ray caster with hard shadows")]
pub struct Args {
    /// Set the logging level (defaults to "info")
    #[arg(long, value_enum, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long, default_value_t = 500, help = "Image width in pixels")]
    pub width: u32,

    /// Image width over height
    #[arg(long, default_value_t = 1.0, value_parser = parse_aspect_ratio, help = "Image width over height")]
    pub aspect_ratio: f32,

    /// Number of samples per pixel
    #[arg(long, short = 's', default_value_t = 20, help = "Number of jittered samples per pixel")]
    pub samples_per_pixel: u32,

    /// Seed for pixel jitter and lens sampling
    #[arg(long, default_value_t = 0, help = "Seed for pixel jitter and lens sampling")]
    pub seed: u64,

    /// Vertical field of view in degrees (overrides the scene's)
    #[arg(long, help = "Vertical field of view in degrees (overrides the scene's)")]
    pub vfov: Option<f32>,

    /// Lens aperture; 0 is a pinhole
    #[arg(long, default_value_t = 0.0, help = "Lens aperture diameter (0 for a pinhole camera)")]
    pub aperture: f32,

    /// Output file path (.png, .exr or .ppm)
    #[arg(short, long, default_value = "output.png", help = "Output file path (.png, .exr or .ppm)")]
    pub output: String,

    /// Pixels to inspect after rendering, as X,Y with Y=0 at the bottom
    #[arg(long, value_parser = parse_pixel, help = "Inspect a pixel, as X,Y with Y=0 at the bottom (repeatable)")]
    pub pick: Vec<(i64, i64)>,

    /// Read pixel coordinates from stdin after rendering
    #[arg(long, help = "Read 'X Y' pixel coordinates from stdin after rendering (-1 quits)")]
    pub interactive: bool,

    /// Skip rendering (useful with --pick or --interactive)
    #[arg(long, help = "Skip rendering and image output")]
    pub no_render: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_coordinates_parse() {
        assert_eq!(parse_pixel("250,250"), Ok((250, 250)));
        assert_eq!(parse_pixel(" 3 , -1 "), Ok((3, -1)));
        assert!(parse_pixel("250").is_err());
        assert!(parse_pixel("a,b").is_err());
    }

    #[test]
    fn defaults_and_repeated_picks() {
        let args = Args::parse_from(["raycaster", "--pick", "1,2", "--pick", "3,4", "-s", "4"]);
        assert_eq!(args.width, 500);
        assert_eq!(args.samples_per_pixel, 4);
        assert_eq!(args.debug_level, LogLevel::Info);
        assert_eq!(args.pick, vec![(1, 2), (3, 4)]);
        assert!(!args.interactive);
    }

    #[test]
    fn aspect_ratio_must_be_positive_and_finite() {
        assert_eq!(parse_aspect_ratio("1.7"), Ok(1.7));
        for bad in ["0", "-2", "NaN", "inf", "wide"] {
            assert!(parse_aspect_ratio(bad).is_err(), "{bad}");
        }
        assert!(Args::try_parse_from(["raycaster", "--aspect-ratio", "0"]).is_err());
    }
}
