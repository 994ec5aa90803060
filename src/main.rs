//! Headless walkthrough: replays a scripted tour through the motion controller and logs
//! where the camera ends up.
//!
//! Usage: `gallery-walk [config.json] [script.json]`

use std::process::ExitCode;

use tracing::{error, info};

use gallery_walk::{logging, ui, FrameLoop, GalleryConfig, Walkthrough};

/// Log a pose line every this many frames
const REPORT_EVERY: u64 = 30;

fn main() -> ExitCode {
    logging::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match GalleryConfig::load(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => GalleryConfig::default(),
    };
    let script = match args.next() {
        Some(path) => match Walkthrough::load(&path) {
            Ok(script) => script,
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Walkthrough::demo_tour(),
    };

    let mut frame_loop = FrameLoop::new(&config, 1280, 720);
    let last = script.run(&mut frame_loop, |out| {
        if out.frame % REPORT_EVERY == 0 {
            let p = out.pose.position;
            info!(
                frame = out.frame,
                x = p.x,
                y = p.y,
                z = p.z,
                heading = out.heading,
                facing = ui::cardinal_label(out.heading),
                light = out.main_light_intensity,
                "frame"
            );
        }
    });

    match last {
        Some(out) => {
            info!(
                frames = out.frame,
                position = ?out.pose.position,
                yaw = out.pose.display_yaw(),
                pitch = out.pose.pitch,
                facing = ui::cardinal_label(out.heading),
                at_rest = frame_loop.motion.is_at_rest(),
                "walkthrough finished"
            );
        }
        None => info!("empty walkthrough, nothing to do"),
    }
    ExitCode::SUCCESS
}
