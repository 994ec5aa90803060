// CONTROLLER: Input, camera motion, and update loop
pub mod input;
pub mod motion;
pub mod frame_loop;

pub use input::{InputEvent, InputProcessor, InputState, KeyBindings, MoveIntent, PointerCapture};
pub use motion::MotionController;
pub use frame_loop::{FrameLoop, FrameOutput};
