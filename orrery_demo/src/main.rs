//! Headless orrery demo
//!
//! Builds the reference solar system, drops in a few random bodies while it
//! runs and builds a draw list every frame, logging what a renderer would be
//! asked to draw.
//!
//! ```text
//! orrery_demo [config.toml|config.ron] [frames]
//! ```

use orrery::config::{Config, ConfigError, OrreryConfig};
use orrery::foundation::logging;
use orrery::foundation::math::{utils, Mat4, Point3, Vec3};
use orrery::foundation::time::FrameClock;
use orrery::render::DrawList;
use orrery::scene::{BodySpec, Scene, SceneError};
use rand::Rng;

const DEFAULT_FRAMES: u64 = 600;
const FRAME_SECONDS: f32 = 1.0 / 60.0;
const INSERT_EVERY: u64 = 150;
const REPORT_EVERY: u64 = 120;

#[derive(thiserror::Error, Debug)]
enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    #[error("Invalid argument: {0}")]
    Argument(String),
}

struct Options {
    config_path: Option<String>,
    frames: u64,
}

impl Options {
    fn from_args() -> Result<Self, AppError> {
        let mut args = std::env::args().skip(1);
        let config_path = args.next();
        let frames = match args.next() {
            Some(raw) => raw
                .parse()
                .map_err(|_| AppError::Argument(format!("frame count '{raw}' is not a number")))?,
            None => DEFAULT_FRAMES,
        };
        Ok(Self { config_path, frames })
    }
}

fn load_config(path: Option<&str>) -> Result<OrreryConfig, AppError> {
    let config = match path {
        Some(path) => {
            log::info!("Loading configuration from {path}");
            OrreryConfig::load_from_file(path)?
        }
        None => OrreryConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn random_body(rng: &mut impl Rng) -> BodySpec {
    BodySpec {
        dx_sun: rng.gen_range(40.0..160.0),
        size: rng.gen_range(0.5..3.0),
        orbit_rotation: rng.gen_range(0.5..4.0),
        planet_rotation: rng.gen_range(1.0..8.0),
        orbit_theta: rng.gen_range(-0.6..0.6),
        orbit_phi: rng.gen_range(0.0..std::f32::consts::TAU),
        red: rng.gen_range(0.0..1.0),
        green: rng.gen_range(0.0..1.0),
        blue: rng.gen_range(0.0..1.0),
    }
}

fn view_projection() -> Mat4 {
    let projection = Mat4::new_perspective(16.0 / 9.0, 60f32.to_radians(), 1.0, 2000.0);
    let view = Mat4::look_at_rh(
        &Point3::new(0.0, 150.0, 300.0),
        &Point3::origin(),
        &Vec3::y(),
    );
    projection * view
}

fn run(options: &Options) -> Result<(), AppError> {
    let config = load_config(options.config_path.as_deref())?;
    let mut scene = Scene::solar_system(&config)?;
    let mut clock = FrameClock::new(config.rotation.reference_fps);
    let mut rng = rand::thread_rng();
    let view_projection = view_projection();

    for frame in 1..=options.frames {
        if frame % INSERT_EVERY == 0 {
            scene.insert_body(&random_body(&mut rng))?;
        }

        let fps_adjust = clock.advance_by(FRAME_SECONDS);
        scene.frame(fps_adjust)?;
        let draw_list = DrawList::build(&scene, &view_projection);

        if frame % REPORT_EVERY == 0 {
            let earth = scene
                .solar_system_nodes()
                .and_then(|nodes| scene.graph().world_matrix(nodes.earth))
                .map(utils::translation_of)
                .unwrap_or_else(Vec3::zeros);
            log::info!(
                "Frame {frame}: {} draws, {} program binds, earth at ({:.1}, {:.1}, {:.1})",
                draw_list.len(),
                draw_list.program_binds(),
                earth.x,
                earth.y,
                earth.z
            );
        }
    }

    log::info!(
        "Ran {} frames ({:.1}s simulated) with {} inserted bodies",
        clock.frame_count(),
        clock.total_time(),
        scene.inserted_bodies()
    );
    Ok(())
}

fn main() {
    logging::init();

    let result = Options::from_args().and_then(|options| run(&options));
    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
