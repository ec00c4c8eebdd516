//! Engine configuration
//!
//! Serializable configuration for the window, camera, sky volume, and main
//! loop. All sections have sensible defaults; a missing config file is not
//! an error, only a malformed one is.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,

    /// Framebuffer width in pixels
    pub width: u32,

    /// Framebuffer height in pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Weather Effects".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// First-person camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Movement speed in world units per second
    pub linear_speed: f32,

    /// Pointer sensitivity in degrees per unit of normalized cursor travel
    pub sensitivity: f32,

    /// Starting eye position
    pub position: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            linear_speed: 7.5,
            sensitivity: 25.0,
            position: [0.0, 1.6, 0.0],
        }
    }
}

/// Precipitation volume configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    /// Number of particles in the fixed buffer
    pub particle_count: u32,

    /// Edge length of the wrap-around simulation cube
    pub box_size: f32,

    /// Seed for particle placement and wind noise
    pub seed: u64,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            particle_count: 5000,
            box_size: 30.0,
            seed: 0,
        }
    }
}

/// Main loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Target frame interval in seconds
    pub frame_interval: f32,

    /// Optional frame budget; the loop closes itself once reached.
    /// `None` runs until a close is requested.
    pub max_frames: Option<u64>,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            frame_interval: 0.02,
            max_frames: None,
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Window settings
    pub window: WindowConfig,

    /// Camera settings
    pub camera: CameraConfig,

    /// Sky/precipitation settings
    pub sky: SkyConfig,

    /// Main loop settings
    pub main_loop: LoopConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = toml::from_str(&text)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            log::info!("Loading configuration from {}", path.display());
            Self::load(path)
        } else {
            log::info!(
                "No configuration at {}, using defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading the config file failed
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for the expected schema
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
