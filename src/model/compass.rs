use glam::Vec3;

/// Horizontal extent below which the look direction is treated as straight up or down.
/// At the poles the XZ part is rounding noise and its angle is meaningless.
const MIN_HORIZONTAL: f32 = 1e-6;

/// Heading shown by the HUD compass rose, in degrees.
///
/// The stored value is never re-wrapped: after crossing the 0/360 seam it can sit outside
/// [0, 360), and the next comparison is made against that running value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CompassHeading {
    previous: f32,
}

impl CompassHeading {
    pub fn new(initial_degrees: f32) -> Self {
        Self {
            previous: initial_degrees,
        }
    }

    /// Last accepted heading, possibly outside [0, 360)
    pub fn degrees(&self) -> f32 {
        self.previous
    }

    /// Fold a new forward vector into the heading.
    /// Returns `None` (and keeps the previous value) when the direction has no usable
    /// horizontal component.
    pub fn update(&mut self, forward: Vec3) -> Option<f32> {
        let raw = raw_heading(forward)?;
        Some(self.update_degrees(raw))
    }

    /// Shortest-path adjust an already normalized heading against the previous one
    pub fn update_degrees(&mut self, raw: f32) -> f32 {
        let mut angle = raw;
        let diff = angle - self.previous;
        if diff > 180.0 {
            angle -= 360.0;
        } else if diff < -180.0 {
            angle += 360.0;
        }
        self.previous = angle;
        angle
    }
}

/// atan2(-x, -z) in degrees, normalized to [0, 360). 0 faces -Z, 90 faces -X.
pub fn raw_heading(forward: Vec3) -> Option<f32> {
    if !forward.is_finite() || forward.x.hypot(forward.z) < MIN_HORIZONTAL {
        return None;
    }
    let angle = (-forward.x).atan2(-forward.z).to_degrees();
    if !angle.is_finite() {
        return None;
    }
    Some(normalize_degrees(angle))
}

pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
