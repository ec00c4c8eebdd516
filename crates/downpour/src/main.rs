//! Downpour: rain and snow weather-effects demo
//!
//! Runs the engine headlessly over a scripted camera flight, first in rain
//! and then in snow, and reports per-run statistics. Initialization
//! failures terminate with a nonzero exit status.

mod scenario;

use storm_engine::config::EngineConfig;
use storm_engine::render::headless::SoftwareBackend;
use storm_engine::{Engine, EngineError};

const CONFIG_PATH: &str = "downpour.toml";
const DEFAULT_FRAME_BUDGET: u64 = 600;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("Application error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), EngineError> {
    let mut config = EngineConfig::load_or_default(CONFIG_PATH)?;
    if config.main_loop.max_frames.is_none() {
        // Headless runs always terminate on a budget
        config.main_loop.max_frames = Some(DEFAULT_FRAME_BUDGET);
    }

    let mut backend = SoftwareBackend::new(config.window.width, config.window.height);
    let mut input = scenario::flythrough(&config);

    let mut engine = Engine::new(config, &mut backend)?;
    engine.run(&mut backend, &mut input)?;

    let camera = engine.camera();
    log::info!(
        "Run complete: {} frames presented, camera ended at ({:.2}, {:.2}, {:.2}) in {:?} mode",
        backend.frames_presented(),
        camera.position().x,
        camera.position().y,
        camera.position().z,
        engine.mode(),
    );
    Ok(())
}
