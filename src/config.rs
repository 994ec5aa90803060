use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::controller::input::KeyBindings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
}

/// How key presses turn into velocity impulses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// One impulse per key-down event (OS auto-repeat included)
    #[default]
    Impulse,
    /// One impulse per tick for every key currently held down
    Held,
}

/// How a tick maps onto wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Integration {
    /// One tick is one rendered frame, whatever its duration
    #[default]
    PerFrame,
    /// Ticks are scaled by `dt * reference_fps`, so motion speed no longer depends on frame rate
    TimeScaled { reference_fps: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub acceleration: f32,
    pub friction: f32,
    pub mouse_sensitivity: f32,
    pub input_mode: InputMode,
    pub integration: Integration,
    pub start_position: Vec3,
    pub start_yaw: f32,
    pub start_pitch: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            acceleration: 0.01,
            friction: 0.95,
            mouse_sensitivity: 0.002,
            input_mode: InputMode::Impulse,
            integration: Integration::PerFrame,
            start_position: Vec3::new(0.0, 2.0, 5.0),
            start_yaw: 0.0,
            start_pitch: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub fov_y_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            z_near: 0.1,
            z_far: 1000.0,
        }
    }
}

/// Everything tunable about a walkthrough session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub motion: MotionConfig,
    pub bindings: KeyBindings,
    pub projection: ProjectionConfig,
}

impl GalleryConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        tracing::info!(path = %path.display(), "loaded gallery config");
        Ok(config)
    }
}
