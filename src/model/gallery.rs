//! Per-frame animated values of the gallery scene.
//!
//! Every animated prop is registered once and addressed by its `PropId` afterwards; nothing
//! is found again by walking the scene graph.

pub const SPIN_PER_FRAME: f32 = 0.005;
pub const MAIN_LIGHT_PEAK: f32 = 2.0;
pub const LIGHT_BASE_HEIGHT: f32 = 7.0;
pub const LIGHT_BOB_AMPLITUDE: f32 = 0.5;

/// Stable handle to an animated prop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinAxis {
    Y,
    Z,
}

#[derive(Debug, Clone)]
pub struct Sculpture {
    pub id: PropId,
    pub name: String,
    pub axis: SpinAxis,
    /// Accumulated rotation about `axis`, radians
    pub rotation: f32,
}

#[derive(Debug, Clone)]
pub struct BobbingLight {
    pub id: PropId,
    /// Phase offset; the light's registration order
    pub index: usize,
    pub height: f32,
}

#[derive(Debug, Clone)]
pub struct Installation {
    pub id: PropId,
    pub rotation: f32,
}

#[derive(Debug, Clone, Default)]
pub struct GalleryAnimation {
    pub main_light_intensity: f32,
    sculptures: Vec<Sculpture>,
    lights: Vec<BobbingLight>,
    installation: Option<Installation>,
    next_id: usize,
}

impl GalleryAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    /// The room as it is hung: four sculptures, six pedestal spots plus eight chandelier
    /// crystals, and the spinning installation on the mid-left pedestal.
    pub fn standard() -> Self {
        let mut gallery = Self::new();
        gallery.add_sculpture("V1", SpinAxis::Y);
        gallery.add_sculpture("vase", SpinAxis::Z);
        gallery.add_sculpture("clock", SpinAxis::Y);
        gallery.add_sculpture("cube", SpinAxis::Y);
        for _ in 0..(6 + 8) {
            gallery.add_light();
        }
        gallery.set_installation();
        gallery
    }

    fn alloc_id(&mut self) -> PropId {
        let id = PropId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn add_sculpture(&mut self, name: &str, axis: SpinAxis) -> PropId {
        let id = self.alloc_id();
        self.sculptures.push(Sculpture {
            id,
            name: name.to_string(),
            axis,
            rotation: 0.0,
        });
        id
    }

    pub fn add_light(&mut self) -> PropId {
        let id = self.alloc_id();
        let index = self.lights.len();
        self.lights.push(BobbingLight {
            id,
            index,
            height: LIGHT_BASE_HEIGHT,
        });
        id
    }

    /// Replaces any previous installation
    pub fn set_installation(&mut self) -> PropId {
        let id = self.alloc_id();
        self.installation = Some(Installation { id, rotation: 0.0 });
        id
    }

    pub fn sculpture(&self, id: PropId) -> Option<&Sculpture> {
        self.sculptures.iter().find(|s| s.id == id)
    }

    pub fn light(&self, id: PropId) -> Option<&BobbingLight> {
        self.lights.iter().find(|l| l.id == id)
    }

    pub fn installation(&self) -> Option<&Installation> {
        self.installation.as_ref()
    }

    pub fn sculptures(&self) -> &[Sculpture] {
        &self.sculptures
    }

    pub fn lights(&self) -> &[BobbingLight] {
        &self.lights
    }

    /// Advance one frame. `elapsed_ms` drives the sine waves, spins are per frame.
    pub fn advance(&mut self, elapsed_ms: f64) {
        let t = elapsed_ms * 0.001;

        // Negative half of the wave is passed through unclamped
        self.main_light_intensity = (t.sin() as f32) * MAIN_LIGHT_PEAK;

        for sculpture in &mut self.sculptures {
            sculpture.rotation += SPIN_PER_FRAME;
        }

        for light in &mut self.lights {
            light.height = bob_height(t, light.index);
        }

        if let Some(installation) = &mut self.installation {
            installation.rotation += SPIN_PER_FRAME;
        }
    }
}

fn bob_height(t: f64, index: usize) -> f32 {
    LIGHT_BASE_HEIGHT + ((t + index as f64).sin() as f32) * LIGHT_BOB_AMPLITUDE
}
