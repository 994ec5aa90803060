use glam::{Quat, Vec3};
use tracing::{debug, trace};

use crate::config::{InputMode, Integration, MotionConfig};
use crate::controller::input::{InputEvent, InputProcessor, InputState, KeyBindings, MoveIntent, PointerCapture};
use crate::model::camera::{clamp_pitch, CameraPose};
use crate::model::CompassHeading;

/// Below this speed the camera counts as stopped. Friction only approaches zero.
pub const REST_SPEED: f32 = 1e-5;

/// Unscaled direction of the impulse for `intent` given the camera's forward vector.
///
/// Horizontal intents use only the XZ part of `forward` and are not normalized, so looking
/// up or down shortens the push by cos(pitch).
pub fn impulse_direction(intent: MoveIntent, forward: Vec3) -> Vec3 {
    match intent {
        MoveIntent::Forward => Vec3::new(forward.x, 0.0, forward.z),
        MoveIntent::Backward => Vec3::new(-forward.x, 0.0, -forward.z),
        MoveIntent::Left => Vec3::new(forward.z, 0.0, -forward.x),
        MoveIntent::Right => Vec3::new(-forward.z, 0.0, forward.x),
        MoveIntent::Up => Vec3::Y,
        MoveIntent::Down => Vec3::NEG_Y,
    }
}

/// First-person fly camera with inertia.
///
/// Owns the pose, velocity, held keys, pointer capture and compass heading. One instance
/// per session, driven by the frame loop.
pub struct MotionController {
    pose: CameraPose,
    velocity: Vec3,
    input: InputState,
    processor: InputProcessor,
    compass: CompassHeading,
    config: MotionConfig,
}

impl MotionController {
    pub fn new(config: MotionConfig, bindings: KeyBindings) -> Self {
        let pose = CameraPose::new(config.start_position, config.start_yaw, config.start_pitch);
        let mut compass = CompassHeading::default();
        compass.update(pose.forward());
        Self {
            pose,
            velocity: Vec3::ZERO,
            input: InputState::new(),
            processor: InputProcessor::new(bindings),
            compass,
            config,
        }
    }

    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn forward(&self) -> Vec3 {
        self.pose.forward()
    }

    pub fn orientation(&self) -> Quat {
        self.pose.orientation()
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn pointer_capture(&self) -> PointerCapture {
        self.input.pointer
    }

    pub fn set_pointer_capture(&mut self, locked: bool) {
        let before = self.input.pointer;
        self.input.set_pointer_locked(locked);
        if self.input.pointer != before {
            debug!(next = ?self.input.pointer, "pointer capture changed");
        }
    }

    pub fn is_at_rest(&self) -> bool {
        self.velocity.length() < REST_SPEED
    }

    /// Add one impulse along the direction derived from `forward`
    pub fn apply_key_intent(&mut self, intent: MoveIntent, forward: Vec3) {
        self.velocity += impulse_direction(intent, forward) * self.config.acceleration;
        trace!(?intent, velocity = ?self.velocity, "impulse");
    }

    /// Mouse look. Ignored unless the pointer is captured.
    pub fn apply_mouse_delta(&mut self, dx: f32, dy: f32) {
        if !self.input.pointer.is_captured() {
            return;
        }
        let s = self.config.mouse_sensitivity;
        self.pose.yaw -= dx * s;
        self.pose.pitch = clamp_pitch(self.pose.pitch - dy * s);
    }

    /// Apply one platform event immediately, in arrival order
    pub fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown { key } => {
                if let Some(intent) = self.processor.intent_for_key(key) {
                    self.input.press(intent);
                    if self.config.input_mode == InputMode::Impulse {
                        let forward = self.forward();
                        self.apply_key_intent(intent, forward);
                    }
                }
            }
            InputEvent::KeyUp { key } => {
                if let Some(intent) = self.processor.intent_for_key(key) {
                    self.input.release(intent);
                }
            }
            InputEvent::MouseMove { dx, dy } => self.apply_mouse_delta(*dx, *dy),
            InputEvent::PointerLockChanged { locked } => self.set_pointer_capture(*locked),
            InputEvent::FocusLost => {
                debug!("focus lost, releasing held keys");
                self.input.clear_keys();
            }
            InputEvent::VisibilityChanged { visible } => {
                debug!(visible, "visibility changed, releasing held keys");
                self.input.clear_keys();
            }
        }
    }

    /// One rendered frame without time scaling: integrate, then apply friction
    pub fn advance_tick(&mut self) {
        self.step(1.0);
    }

    /// One rendered frame lasting `dt` seconds. Only `Integration::TimeScaled` looks at `dt`.
    pub fn advance(&mut self, dt: f32) {
        let k = match self.config.integration {
            Integration::PerFrame => 1.0,
            Integration::TimeScaled { reference_fps } => (dt * reference_fps).max(0.0),
        };
        self.step(k);
    }

    fn step(&mut self, k: f32) {
        if self.config.input_mode == InputMode::Held {
            self.apply_held_impulses(k);
        }
        self.pose.position += self.velocity * k;
        self.velocity *= self.config.friction.powf(k);
    }

    fn apply_held_impulses(&mut self, k: f32) {
        let forward = self.forward();
        let mut push = Vec3::ZERO;
        for intent in &self.input.held {
            push += impulse_direction(*intent, forward);
        }
        self.velocity += push * self.config.acceleration * k;
    }

    /// Recompute the compass from the current forward vector.
    /// Degenerate directions leave the previous heading in place and return `None`.
    pub fn update_compass(&mut self) -> Option<f32> {
        let heading = self.compass.update(self.pose.forward());
        if heading.is_none() {
            debug!(forward = ?self.pose.forward(), "skipping compass update");
        }
        heading
    }

    /// Current compass heading in degrees (unwrapped running value)
    pub fn compass_heading(&self) -> f32 {
        self.compass.degrees()
    }
}

impl Default for MotionController {
    fn default() -> Self {
        Self::new(MotionConfig::default(), KeyBindings::default())
    }
}
