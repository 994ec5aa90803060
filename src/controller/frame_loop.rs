use std::collections::VecDeque;

use glam::{Mat4, Quat};
use tracing::{debug, info};

use crate::config::GalleryConfig;
use crate::controller::input::InputEvent;
use crate::controller::motion::MotionController;
use crate::model::{Camera, CameraPose, GalleryAnimation};

/// Log the pose every this many frames at debug level
const POSE_LOG_INTERVAL: u64 = 60;

/// What the renderer needs after a frame
#[derive(Debug, Clone, Copy)]
pub struct FrameOutput {
    pub frame: u64,
    pub pose: CameraPose,
    pub orientation: Quat,
    pub view_proj: Mat4,
    /// Compass rose rotation in degrees, unwrapped
    pub heading: f32,
    pub main_light_intensity: f32,
}

/// Main loop state: queued input, camera motion, projection and scene animation
pub struct FrameLoop {
    pub motion: MotionController,
    pub camera: Camera,
    pub gallery: GalleryAnimation,
    pending: VecDeque<InputEvent>,
    frame: u64,
}

impl FrameLoop {
    pub fn new(config: &GalleryConfig, width: u32, height: u32) -> Self {
        info!(width, height, mode = ?config.motion.input_mode, "starting gallery walkthrough");
        Self {
            motion: MotionController::new(config.motion.clone(), config.bindings.clone()),
            camera: Camera::from_config(&config.projection, width, height),
            gallery: GalleryAnimation::standard(),
            pending: VecDeque::new(),
            frame: 0,
        }
    }

    /// Queue an event for the next frame
    pub fn push_event(&mut self, event: InputEvent) {
        self.pending.push_back(event);
    }

    pub fn pending_events(&self) -> usize {
        self.pending.len()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        debug!(width, height, "resize");
        self.camera.set_aspect(width, height);
    }

    /// Run one frame: every queued event in arrival order, then one motion tick, the compass,
    /// and the scene animation.
    pub fn frame(&mut self, dt: f32, elapsed_ms: f64) -> FrameOutput {
        while let Some(event) = self.pending.pop_front() {
            self.motion.handle_event(&event);
        }

        self.motion.advance(dt);
        self.motion.update_compass();
        self.gallery.advance(elapsed_ms);
        self.frame += 1;

        let out = self.output();
        if self.frame % POSE_LOG_INTERVAL == 0 {
            debug!(
                frame = out.frame,
                position = ?out.pose.position,
                heading = out.heading,
                "pose"
            );
        }
        out
    }

    pub fn output(&self) -> FrameOutput {
        let pose = *self.motion.pose();
        FrameOutput {
            frame: self.frame,
            pose,
            orientation: pose.orientation(),
            view_proj: self.camera.view_proj(&pose),
            heading: self.motion.compass_heading(),
            main_light_intensity: self.gallery.main_light_intensity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::f32::consts::FRAC_PI_2;

    fn frame_loop() -> FrameLoop {
        let mut cfg = GalleryConfig::default();
        cfg.motion.start_position = Vec3::ZERO;
        FrameLoop::new(&cfg, 800, 600)
    }

    #[test]
    fn queued_events_apply_before_tick() {
        let mut fl = frame_loop();
        fl.push_event(InputEvent::key_down("w"));
        assert_eq!(fl.pending_events(), 1);
        let out = fl.frame(1.0 / 60.0, 16.0);
        assert_eq!(fl.pending_events(), 0);
        // Moved by the full impulse in the same frame
        assert!((out.pose.position.z + 0.01).abs() < 1e-6);
        assert_eq!(out.frame, 1);
    }

    #[test]
    fn events_apply_in_arrival_order() {
        let mut fl = frame_loop();
        fl.push_event(InputEvent::PointerLockChanged { locked: true });
        // Turn to face -X, then push forward
        fl.push_event(InputEvent::MouseMove { dx: -FRAC_PI_2 / 0.002, dy: 0.0 });
        fl.push_event(InputEvent::key_down("w"));
        fl.frame(1.0 / 60.0, 16.0);

        let v = fl.motion.velocity();
        assert!((v.x + 0.01 * 0.95).abs() < 1e-5, "{v:?}");
        assert!(v.z.abs() < 1e-5, "{v:?}");
        assert!((fl.output().heading - 90.0).abs() < 1e-3);
    }

    #[test]
    fn mouse_before_capture_is_dropped() {
        let mut fl = frame_loop();
        fl.push_event(InputEvent::MouseMove { dx: 300.0, dy: 0.0 });
        fl.push_event(InputEvent::PointerLockChanged { locked: true });
        fl.frame(1.0 / 60.0, 16.0);
        assert_eq!(fl.motion.pose().yaw, 0.0);
    }

    #[test]
    fn animation_advances_with_frames() {
        let mut fl = frame_loop();
        for i in 0..10 {
            fl.frame(1.0 / 60.0, i as f64 * 16.0);
        }
        let installation = fl.gallery.installation().unwrap();
        assert!((installation.rotation - 0.05).abs() < 1e-5);
        assert_eq!(fl.frame_count(), 10);
    }

    #[test]
    fn resize_changes_projection() {
        let mut fl = frame_loop();
        let before = fl.output().view_proj;
        fl.resize(1600, 600);
        assert_ne!(before, fl.output().view_proj);
    }
}
