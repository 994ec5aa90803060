// Re-export all public modules so they can be used from main.rs
pub mod config;
pub mod logging;
pub mod script;
pub mod ui;

// MVC Architecture (the view lives in the host renderer)
pub mod model;
pub mod controller;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{ConfigError, GalleryConfig, InputMode, Integration, MotionConfig};
pub use controller::{FrameLoop, FrameOutput, InputEvent, MotionController, MoveIntent};
pub use model::{CameraPose, CompassHeading, GalleryAnimation};
pub use script::{ScriptError, Walkthrough};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::wasm_bindgen;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    logging::init();
    tracing::info!("gallery-walk loaded");
}
