//! # Storm Engine
//!
//! A small real-time 3D engine demonstrating rain and snow rendered as
//! motion-blur streaks and soft point sprites.
//!
//! The interesting machinery is the precipitation field: a fixed particle
//! buffer tiled through a wrap-around cube that follows the camera, drawn
//! four times per frame with different gravity/wind layers, with streak
//! geometry stretched between the current and previous view-projection
//! transforms. Windowing and GPU submission sit behind the
//! [`render::backend::RenderBackend`] trait; the crate ships a
//! deterministic software backend for headless runs and tests.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use storm_engine::prelude::*;
//! use storm_engine::input::script::{ScriptedInput, ScriptStep};
//! use storm_engine::render::headless::SoftwareBackend;
//!
//! fn main() -> Result<(), EngineError> {
//!     let mut config = EngineConfig::default();
//!     config.main_loop.max_frames = Some(100);
//!
//!     let mut backend = SoftwareBackend::new(config.window.width, config.window.height);
//!     let mut input = ScriptedInput::new((640.0, 360.0), vec![ScriptStep::idle(100)]);
//!
//!     let mut engine = Engine::new(config, &mut backend)?;
//!     engine.run(&mut backend, &mut input)
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod camera;
pub mod config;
pub mod foundation;
pub mod input;
pub mod render;
pub mod sky;

mod engine;

pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        camera::CameraController,
        config::EngineConfig,
        foundation::{
            math::{Mat4, Vec3},
            time::Timer,
        },
        input::{InputSource, KeyCode, MoveDirection},
        render::{RenderBackend, Renderer, Topology},
        sky::{ParticleField, WeatherMode},
        Engine, EngineError,
    };
}
