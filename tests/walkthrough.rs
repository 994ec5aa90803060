use gallery_walk::{FrameLoop, GalleryConfig, InputEvent, InputMode, Walkthrough};

const SCRIPT: &str = r#"{
    "frames": 120,
    "frame_ms": 16.0,
    "events": [
        { "frame": 0, "event": { "type": "pointer_lock_changed", "locked": true } },
        { "frame": 0, "event": { "type": "key_down", "key": "w" } },
        { "frame": 10, "event": { "type": "mouse_move", "dx": -785.398, "dy": 0.0 } },
        { "frame": 10, "event": { "type": "key_down", "key": "w" } },
        { "frame": 20, "event": { "type": "pointer_lock_changed", "locked": false } },
        { "frame": 21, "event": { "type": "mouse_move", "dx": 5000.0, "dy": 0.0 } }
    ]
}"#;

#[test]
fn scripted_walk_moves_north_then_west() {
    let mut cfg = GalleryConfig::default();
    cfg.motion.start_position = glam::Vec3::ZERO;
    let mut frame_loop = FrameLoop::new(&cfg, 1280, 720);

    let script = Walkthrough::from_json(SCRIPT).unwrap();
    let last = script.run(&mut frame_loop, |_| {}).unwrap();

    assert_eq!(last.frame, 120);
    let p = last.pose.position;
    // Each impulse of 0.01 travels at most 0.01 / (1 - 0.95) = 0.2 units
    assert!(p.z < -0.1 && p.z > -0.2, "z = {}", p.z);
    assert!(p.x < -0.1 && p.x > -0.2, "x = {}", p.x);
    assert!(p.y.abs() < 1e-6);

    // Turned left by 90 degrees; the late mouse move arrived after release
    assert!((last.heading - 90.0).abs() < 0.01, "heading = {}", last.heading);
}

#[test]
fn held_mode_keeps_accelerating_until_key_up() {
    let mut cfg = GalleryConfig::default();
    cfg.motion.input_mode = InputMode::Held;
    let mut frame_loop = FrameLoop::new(&cfg, 800, 600);

    frame_loop.push_event(InputEvent::key_down("e"));
    let mut speeds = Vec::new();
    for i in 0..30 {
        let out = frame_loop.frame(1.0 / 60.0, i as f64 * 16.0);
        speeds.push(frame_loop.motion.velocity().y);
        assert!(out.pose.position.y < 2.0);
    }
    assert!(speeds.windows(2).all(|w| w[1] < w[0]), "should keep speeding downward");

    frame_loop.push_event(InputEvent::key_up("e"));
    frame_loop.frame(1.0 / 60.0, 480.0);
    let v1 = frame_loop.motion.velocity().y;
    frame_loop.frame(1.0 / 60.0, 496.0);
    let v2 = frame_loop.motion.velocity().y;
    assert!((v2 - v1 * 0.95).abs() < 1e-6);
}
