use glam::{EulerRot, Mat4, Quat, Vec3};
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::config::ProjectionConfig;

/// Where the viewer stands and where they look. Roll is always zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl CameraPose {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch: clamp_pitch(pitch),
        }
    }

    /// Yaw about world up first, then pitch about the resulting local right axis.
    /// Any other order leaks roll into the view.
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Unit look direction; (0, 0, -1) at yaw = pitch = 0
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    /// Yaw wrapped to [0, 2π) for display
    pub fn display_yaw(&self) -> f32 {
        let wrapped = self.yaw.rem_euclid(TAU);
        // rem_euclid rounds tiny negative yaws up to exactly TAU
        if wrapped >= TAU { 0.0 } else { wrapped }
    }

    /// World-to-camera transform, inverse of the pose's rigid transform.
    /// Built from the orientation so it stays defined when looking straight up or down.
    pub fn view(&self) -> Mat4 {
        Mat4::from_quat(self.orientation().conjugate()) * Mat4::from_translation(-self.position)
    }
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 0.0, 0.0)
    }
}

pub fn clamp_pitch(pitch: f32) -> f32 {
    pitch.clamp(-FRAC_PI_2, FRAC_PI_2)
}

/// Perspective projection handed to the renderer
pub struct Camera {
    pub fov_y: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_config(&ProjectionConfig::default(), width, height)
    }

    pub fn from_config(cfg: &ProjectionConfig, width: u32, height: u32) -> Self {
        Self {
            fov_y: cfg.fov_y_degrees.to_radians(),
            aspect: aspect_ratio(width, height),
            z_near: cfg.z_near,
            z_far: cfg.z_far,
        }
    }

    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.z_near, self.z_far)
    }

    pub fn view_proj(&self, pose: &CameraPose) -> Mat4 {
        self.projection() * pose.view()
    }
}

// A zero-height window (minimized) would otherwise produce an infinite aspect
fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}
