//! Browser bindings. The page owns the canvas, the scene graph and the pointer-lock request;
//! it forwards DOM events here and applies the returned pose to its camera every frame.

use js_sys::Float32Array;
use wasm_bindgen::prelude::*;
use web_sys::{KeyboardEvent, MouseEvent};

use crate::config::GalleryConfig;
use crate::controller::input::wasm::{keyboard_event_to_input, mouse_move_to_input};
use crate::controller::{FrameLoop, InputEvent};
use crate::ui::CompassRose;

#[wasm_bindgen]
pub struct GalleryWalk {
    frame_loop: FrameLoop,
    compass: CompassRose,
    last_ms: Option<f64>,
}

#[wasm_bindgen]
impl GalleryWalk {
    /// `config_json` may be empty for the defaults
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, config_json: &str) -> Result<GalleryWalk, JsValue> {
        let config = if config_json.trim().is_empty() {
            GalleryConfig::default()
        } else {
            GalleryConfig::from_json(config_json).map_err(|e| js_error(e.to_string()))?
        };
        Ok(Self {
            frame_loop: FrameLoop::new(&config, width, height),
            compass: CompassRose::find(),
            last_ms: None,
        })
    }

    pub fn key_down(&mut self, e: &KeyboardEvent) {
        self.frame_loop.push_event(keyboard_event_to_input(e, true));
    }

    pub fn key_up(&mut self, e: &KeyboardEvent) {
        self.frame_loop.push_event(keyboard_event_to_input(e, false));
    }

    pub fn mouse_move(&mut self, e: &MouseEvent) {
        self.frame_loop.push_event(mouse_move_to_input(e));
    }

    pub fn pointer_lock_changed(&mut self, locked: bool) {
        self.frame_loop.push_event(InputEvent::PointerLockChanged { locked });
    }

    pub fn focus_lost(&mut self) {
        self.frame_loop.push_event(InputEvent::FocusLost);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.frame_loop.resize(width, height);
    }

    /// Advance one frame at `now_ms` (requestAnimationFrame timestamp).
    /// Returns `[px, py, pz, qx, qy, qz, qw]`.
    pub fn frame(&mut self, now_ms: f64) -> Float32Array {
        let dt = self
            .last_ms
            .map(|last| ((now_ms - last) / 1000.0).clamp(0.0, 0.1) as f32)
            .unwrap_or(0.0);
        self.last_ms = Some(now_ms);

        let out = self.frame_loop.frame(dt, now_ms);
        self.compass.show(out.heading);

        let p = out.pose.position;
        let q = out.orientation;
        Float32Array::from(&[p.x, p.y, p.z, q.x, q.y, q.z, q.w][..])
    }

    pub fn heading(&self) -> f32 {
        self.frame_loop.motion.compass_heading()
    }

    pub fn main_light_intensity(&self) -> f32 {
        self.frame_loop.gallery.main_light_intensity
    }

    /// Column-major view-projection matrix for the current pose
    pub fn view_proj(&self) -> Float32Array {
        Float32Array::from(&self.frame_loop.output().view_proj.to_cols_array()[..])
    }
}

fn js_error(msg: String) -> JsValue {
    JsValue::from_str(&msg)
}
