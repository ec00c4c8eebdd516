//! Core engine implementation
//!
//! Single-threaded main loop at a fixed target interval: poll input, update
//! the camera and weather mode, render the frame, then sleep out the rest of
//! the interval. All mutable state lives on the [`Engine`] struct; there is
//! no cross-call hidden state.

use crate::camera::CameraController;
use crate::config::{ConfigError, EngineConfig};
use crate::foundation::noise::WindNoise;
use crate::foundation::time::{FrameLimiter, Timer};
use crate::input::{InputSample, InputSource, KeyCode, MoveDirection, PointerTracker};
use crate::render::{RenderBackend, RenderError, Renderer};
use crate::sky::{ParticleField, WeatherMode};
use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Initialization error
    #[error("Engine initialization failed: {0}")]
    InitializationFailed(String),

    /// Rendering error
    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Main engine struct
///
/// Owns the simulation state and drives the per-frame pipeline against an
/// external backend and input source.
pub struct Engine {
    config: EngineConfig,
    camera: CameraController,
    mode: WeatherMode,
    noise: WindNoise,
    renderer: Renderer,
    timer: Timer,
    limiter: FrameLimiter,
    pointer: PointerTracker,
    running: bool,
}

impl Engine {
    /// Initialize the engine against a backend
    ///
    /// Seeds the particle field and uploads all static buffers. Failures
    /// here are fatal; no rendering can proceed without them.
    pub fn new(config: EngineConfig, backend: &mut dyn RenderBackend) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");

        let camera = CameraController::new(&config.camera);
        let field = ParticleField::new(
            config.sky.particle_count,
            config.sky.box_size,
            config.sky.seed,
        );
        let noise = WindNoise::new(config.sky.seed as u32);
        let renderer = Renderer::new(backend, &field)?;
        let limiter = FrameLimiter::new(config.main_loop.frame_interval);

        Ok(Self {
            config,
            camera,
            mode: WeatherMode::Rain,
            noise,
            renderer,
            timer: Timer::new(),
            limiter,
            pointer: PointerTracker::new(),
            running: true,
        })
    }

    /// Current camera state
    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    /// Active weather mode
    pub fn mode(&self) -> WeatherMode {
        self.mode
    }

    /// Whether the loop will run another iteration
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run the main loop until close is requested or the frame budget runs out
    pub fn run(
        &mut self,
        backend: &mut dyn RenderBackend,
        input: &mut dyn InputSource,
    ) -> Result<(), EngineError> {
        log::info!("Starting main loop...");

        while self.running {
            self.step(backend, input)?;
        }

        log::info!(
            "Main loop finished after {} frames ({:.1} fps average)",
            self.timer.frame_count(),
            self.timer.average_fps()
        );
        Ok(())
    }

    /// Execute exactly one frame: poll, update, render, throttle
    ///
    /// The close flag raised by Escape (or the frame budget) is observed at
    /// the top of the next iteration, so the flagged frame still renders.
    pub fn step(
        &mut self,
        backend: &mut dyn RenderBackend,
        input: &mut dyn InputSource,
    ) -> Result<(), EngineError> {
        let frame_start = std::time::Instant::now();
        self.timer.update();

        let sample = input.poll();
        self.apply_input(&sample, backend.extent());

        self.renderer.render_frame(
            backend,
            &self.camera,
            self.mode,
            self.timer.total_time(),
            &self.noise,
        )?;

        if let Some(max_frames) = self.config.main_loop.max_frames {
            if self.timer.frame_count() >= max_frames {
                log::info!("Frame budget of {max_frames} reached");
                self.running = false;
            }
        }

        self.limiter.throttle(frame_start);
        Ok(())
    }

    fn apply_input(&mut self, sample: &InputSample, extent: (u32, u32)) {
        if sample.keys.is_down(KeyCode::Escape) {
            log::info!("Close requested");
            self.running = false;
        }

        if sample.keys.is_down(KeyCode::R) && self.mode != WeatherMode::Snow {
            log::debug!("Weather mode -> Snow");
            self.mode = WeatherMode::Snow;
        }
        if sample.keys.is_down(KeyCode::T) && self.mode != WeatherMode::Rain {
            log::debug!("Weather mode -> Rain");
            self.mode = WeatherMode::Rain;
        }

        // Fixed-step movement keeps headless runs deterministic
        let dt = self.limiter.interval_secs();
        if sample.keys.is_down(KeyCode::W) {
            self.camera.apply_movement(MoveDirection::Forward, dt);
        }
        if sample.keys.is_down(KeyCode::S) {
            self.camera.apply_movement(MoveDirection::Backward, dt);
        }
        if sample.keys.is_down(KeyCode::A) {
            self.camera.apply_movement(MoveDirection::Left, dt);
        }
        if sample.keys.is_down(KeyCode::D) {
            self.camera.apply_movement(MoveDirection::Right, dt);
        }

        if let Some(position) = sample.pointer {
            if let Some(delta) = self.pointer.delta(position, extent) {
                self.camera.apply_pointer_delta(delta.x, delta.y);
            }
        }
    }
}
