//! Scripted walkthroughs: input events pinned to frame numbers, replayed headlessly.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::controller::{FrameLoop, FrameOutput, InputEvent};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid script json: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    /// Queued right before this frame runs (0-based)
    pub frame: u64,
    pub event: InputEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Walkthrough {
    pub frames: u64,
    #[serde(default = "default_frame_ms")]
    pub frame_ms: f64,
    #[serde(default)]
    pub events: Vec<ScriptedEvent>,
}

fn default_frame_ms() -> f64 {
    1000.0 / 60.0
}

impl Walkthrough {
    pub fn from_json(text: &str) -> Result<Self, ScriptError> {
        let mut script: Walkthrough = serde_json::from_str(text)?;
        script.events.sort_by_key(|e| e.frame);
        Ok(script)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// A short tour: grab the mouse, walk in, look around the room, drift upward, settle.
    pub fn demo_tour() -> Self {
        let mut events = vec![ScriptedEvent {
            frame: 0,
            event: InputEvent::PointerLockChanged { locked: true },
        }];
        for frame in (0..60).step_by(6) {
            events.push(ScriptedEvent { frame, event: InputEvent::key_down("w") });
        }
        for frame in 60..120 {
            events.push(ScriptedEvent {
                frame,
                event: InputEvent::MouseMove { dx: -13.0, dy: 0.0 },
            });
        }
        for frame in (120..150).step_by(5) {
            events.push(ScriptedEvent { frame, event: InputEvent::key_down("a") });
        }
        events.push(ScriptedEvent { frame: 150, event: InputEvent::key_down("q") });
        for frame in 160..200 {
            events.push(ScriptedEvent {
                frame,
                event: InputEvent::MouseMove { dx: 20.0, dy: 2.0 },
            });
        }
        events.push(ScriptedEvent {
            frame: 240,
            event: InputEvent::PointerLockChanged { locked: false },
        });
        Walkthrough {
            frames: 300,
            frame_ms: default_frame_ms(),
            events,
        }
    }

    /// Replay onto `frame_loop`, calling `on_frame` after every frame. Returns the last output.
    pub fn run<F>(&self, frame_loop: &mut FrameLoop, mut on_frame: F) -> Option<FrameOutput>
    where
        F: FnMut(&FrameOutput),
    {
        info!(frames = self.frames, events = self.events.len(), "running walkthrough");
        let dt = (self.frame_ms / 1000.0) as f32;

        // Hand-built scripts may be unsorted; the stable sort keeps same-frame order
        let mut ordered: Vec<&ScriptedEvent> = self.events.iter().collect();
        ordered.sort_by_key(|e| e.frame);

        let mut next = 0;
        let mut last = None;

        for frame in 0..self.frames {
            while let Some(scripted) = ordered.get(next).filter(|e| e.frame <= frame) {
                frame_loop.push_event(scripted.event.clone());
                next += 1;
            }
            let out = frame_loop.frame(dt, frame as f64 * self.frame_ms);
            on_frame(&out);
            last = Some(out);
        }
        last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GalleryConfig;

    #[test]
    fn events_are_sorted_by_frame() {
        let script = Walkthrough::from_json(
            r#"{
                "frames": 5,
                "events": [
                    { "frame": 3, "event": { "type": "key_down", "key": "s" } },
                    { "frame": 1, "event": { "type": "key_down", "key": "w" } }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(script.events[0].frame, 1);
        assert!((script.frame_ms - 1000.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn events_land_on_their_frame() {
        let script = Walkthrough::from_json(
            r#"{ "frames": 4, "events": [ { "frame": 2, "event": { "type": "key_down", "key": "q" } } ] }"#,
        )
        .unwrap();
        let mut fl = FrameLoop::new(&GalleryConfig::default(), 800, 600);
        let mut heights = Vec::new();
        let last = script.run(&mut fl, |out| heights.push(out.pose.position.y));

        assert_eq!(heights.len(), 4);
        assert_eq!(heights[0], 2.0);
        assert_eq!(heights[1], 2.0);
        assert!(heights[2] > 2.0);
        assert_eq!(last.unwrap().frame, 4);
    }

    #[test]
    fn unsorted_events_still_land_on_their_frame() {
        let script = Walkthrough {
            frames: 4,
            frame_ms: 16.0,
            events: vec![
                ScriptedEvent { frame: 3, event: InputEvent::key_down("e") },
                ScriptedEvent { frame: 1, event: InputEvent::key_down("q") },
            ],
        };
        let mut fl = FrameLoop::new(&GalleryConfig::default(), 800, 600);
        let mut heights = Vec::new();
        script.run(&mut fl, |out| heights.push(out.pose.position.y));

        assert_eq!(heights[0], 2.0);
        assert!(heights[1] > 2.0, "upward push must apply on frame 1, got {heights:?}");
    }

    #[test]
    fn demo_tour_moves_the_camera() {
        let script = Walkthrough::demo_tour();
        let mut fl = FrameLoop::new(&GalleryConfig::default(), 800, 600);
        let start = fl.output().pose.position;
        let last = script.run(&mut fl, |_| {}).unwrap();
        assert_eq!(last.frame, script.frames);
        assert!(last.pose.position.distance(start) > 0.5);
        assert!(last.heading.is_finite());
        assert!(!fl.motion.pointer_capture().is_captured());
    }

    #[test]
    fn bad_json_is_rejected() {
        assert!(matches!(
            Walkthrough::from_json(r#"{ "events": [] }"#),
            Err(ScriptError::Parse(_))
        ));
    }
}
