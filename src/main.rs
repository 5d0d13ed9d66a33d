use std::io::{self, BufRead, Write};
use std::path::Path;

use clap::Parser;
use log::{info, warn};

use raycaster::camera::Camera;
use raycaster::error::RenderError;
use raycaster::hittable::Hittable;
use raycaster::output::save_image;
use raycaster::pick::pick;
use raycaster::random;
use raycaster::render::Renderer;
use raycaster::scene;

mod cli;
mod logger;

use cli::Args;
use logger::init_logger;

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.into());

    // Log application startup with version information
    info!("Raycaster - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), RenderError> {
    let renderer = Renderer::new(args.width, args.aspect_ratio, args.samples_per_pixel, args.seed)?;
    info!(
        "Image resolution: {}x{}, samples per pixel: {}",
        renderer.image_width, renderer.image_height, renderer.samples_per_pixel
    );

    // The viewport follows the rounded pixel grid, not the requested ratio
    let mut scene = scene::altar(renderer.aspect_ratio())?;
    if let Some(vfov) = args.vfov {
        scene.camera.vfov = vfov;
    }
    scene.camera.aperture = args.aperture;
    let camera = Camera::new(&scene.camera)?;
    info!("Scene: {} objects, {} lights", scene.world.len(), scene.lights.len());

    if args.no_render {
        info!("Skipping render");
    } else {
        let image = renderer.render(&camera, &scene.world, &scene.lights);
        save_image(&image, Path::new(&args.output))?;
    }

    let size = (renderer.image_width, renderer.image_height);
    let mut rng = random::seeded(args.seed);
    for &coords in &args.pick {
        match pick(&camera, &scene.world, coords, size, &mut rng) {
            Ok(result) => println!("{result}"),
            Err(e) => warn!("{}", e),
        }
    }

    if args.interactive {
        interactive(&camera, &scene.world, size, args.seed)?;
    }
    Ok(())
}

/// Read `X Y` pairs from stdin and print what each pixel sees, until `-1` or EOF.
fn interactive(camera: &Camera, world: &dyn Hittable, size: (u32, u32), seed: u64) -> Result<(), RenderError> {
    let mut rng = random::seeded(seed);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("pixel (X Y, -1 to quit)> ");
        io::stdout().flush()?;

        let Some(line) = lines.next().transpose()? else {
            break;
        };
        let mut fields = line.split_whitespace();
        let Some(first) = fields.next() else {
            continue;
        };
        if first == "-1" {
            break;
        }

        let coords = match (first.parse::<i64>(), fields.next().map(str::parse::<i64>)) {
            (Ok(x), Some(Ok(y))) => (x, y),
            _ => {
                warn!("Invalid input '{}', expected two integers", line.trim());
                continue;
            }
        };
        match pick(camera, world, coords, size, &mut rng) {
            Ok(result) => println!("{result}"),
            Err(e) => warn!("{}", e),
        }
    }
    Ok(())
}
