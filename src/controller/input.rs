//! Platform-agnostic input handling
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Platform-independent input events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    // Keyboard events, carrying the logical key ("w", "ArrowUp", ...)
    KeyDown { key: String },
    KeyUp { key: String },

    // Raw pointer movement, only honoured while the pointer is captured
    MouseMove { dx: f32, dy: f32 },

    // Window events
    PointerLockChanged { locked: bool },
    FocusLost,
    VisibilityChanged { visible: bool },
}

impl InputEvent {
    pub fn key_down(key: &str) -> Self {
        InputEvent::KeyDown { key: key.to_string() }
    }

    pub fn key_up(key: &str) -> Self {
        InputEvent::KeyUp { key: key.to_string() }
    }
}

/// The six movement directions a key can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveIntent {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Exclusive raw-mouse mode, toggled only by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerCapture {
    #[default]
    Released,
    Captured,
}

impl PointerCapture {
    pub fn from_locked(locked: bool) -> Self {
        if locked {
            PointerCapture::Captured
        } else {
            PointerCapture::Released
        }
    }

    pub fn is_captured(self) -> bool {
        self == PointerCapture::Captured
    }
}

/// Held movement keys and pointer capture
#[derive(Debug, Default)]
pub struct InputState {
    pub held: HashSet<MoveIntent>,
    pub pointer: PointerCapture,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, intent: MoveIntent) {
        self.held.insert(intent);
    }

    pub fn release(&mut self, intent: MoveIntent) {
        self.held.remove(&intent);
    }

    pub fn is_held(&self, intent: MoveIntent) -> bool {
        self.held.contains(&intent)
    }

    pub fn clear_keys(&mut self) {
        self.held.clear();
    }

    pub fn set_pointer_locked(&mut self, locked: bool) {
        self.pointer = PointerCapture::from_locked(locked);
    }
}

/// Key mapping configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub forward: String,
    pub backward: String,
    pub left: String,
    pub right: String,
    pub up: String,
    pub down: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: "w".to_string(),
            backward: "s".to_string(),
            left: "a".to_string(),
            right: "d".to_string(),
            up: "q".to_string(),
            down: "e".to_string(),
        }
    }
}

/// Maps logical keys onto movement intents
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    bindings: KeyBindings,
}

impl InputProcessor {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn intent_for_key(&self, key: &str) -> Option<MoveIntent> {
        let b = &self.bindings;
        let matches = |bound: &str| key.eq_ignore_ascii_case(bound);

        if matches(&b.forward) || key == "ArrowUp" {
            Some(MoveIntent::Forward)
        } else if matches(&b.backward) || key == "ArrowDown" {
            Some(MoveIntent::Backward)
        } else if matches(&b.left) || key == "ArrowLeft" {
            Some(MoveIntent::Left)
        } else if matches(&b.right) || key == "ArrowRight" {
            Some(MoveIntent::Right)
        } else if matches(&b.up) {
            Some(MoveIntent::Up)
        } else if matches(&b.down) {
            Some(MoveIntent::Down)
        } else {
            None
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub mod native {
    use super::InputEvent;
    use winit::event::{ElementState, WindowEvent};
    use winit::keyboard::{Key, NamedKey};

    /// Logical key to the browser-style key string the bindings use
    pub fn key_name(key: &Key) -> Option<String> {
        match key {
            Key::Character(s) => Some(s.to_string()),
            Key::Named(NamedKey::ArrowUp) => Some("ArrowUp".to_string()),
            Key::Named(NamedKey::ArrowDown) => Some("ArrowDown".to_string()),
            Key::Named(NamedKey::ArrowLeft) => Some("ArrowLeft".to_string()),
            Key::Named(NamedKey::ArrowRight) => Some("ArrowRight".to_string()),
            Key::Named(NamedKey::Escape) => Some("Escape".to_string()),
            _ => None,
        }
    }

    pub fn key_to_input(key: &Key, state: ElementState) -> Option<InputEvent> {
        let key = key_name(key)?;
        Some(match state {
            ElementState::Pressed => InputEvent::KeyDown { key },
            ElementState::Released => InputEvent::KeyUp { key },
        })
    }

    pub fn window_event_to_input(event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => key_to_input(&event.logical_key, event.state),
            WindowEvent::Focused(false) => Some(InputEvent::FocusLost),
            WindowEvent::Occluded(occluded) => Some(InputEvent::VisibilityChanged { visible: !occluded }),
            _ => None,
        }
    }

    /// `DeviceEvent::MouseMotion` delta
    pub fn mouse_motion_to_input(delta: (f64, f64)) -> InputEvent {
        InputEvent::MouseMove {
            dx: delta.0 as f32,
            dy: delta.1 as f32,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use super::InputEvent;
    use web_sys::{KeyboardEvent, MouseEvent};

    pub fn keyboard_event_to_input(e: &KeyboardEvent, is_down: bool) -> InputEvent {
        let key = e.key();
        if is_down {
            InputEvent::KeyDown { key }
        } else {
            InputEvent::KeyUp { key }
        }
    }

    pub fn mouse_move_to_input(e: &MouseEvent) -> InputEvent {
        InputEvent::MouseMove {
            dx: e.movement_x() as f32,
            dy: e.movement_y() as f32,
        }
    }
}
