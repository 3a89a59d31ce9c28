use glam::Vec3;

use crate::resources::color::hex_to_linear;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    /// Parallel light shining from the node position towards `target`.
    Directional { target: Vec3 },
    /// Uniform light with no direction.
    Ambient,
}

/// Light component in the scene.
#[derive(Debug, Clone)]
pub struct Light {
    pub color: Vec3,
    pub intensity: f32,
    pub kind: LightKind,
}

impl Light {
    /// Directional light aimed at the origin.
    #[must_use]
    pub fn new_directional(color: u32, intensity: f32) -> Self {
        Self {
            color: hex_to_linear(color),
            intensity,
            kind: LightKind::Directional { target: Vec3::ZERO },
        }
    }

    #[must_use]
    pub fn new_ambient(color: u32, intensity: f32) -> Self {
        Self {
            color: hex_to_linear(color),
            intensity,
            kind: LightKind::Ambient,
        }
    }

    /// Direction the light travels towards, given its world position.
    #[must_use]
    pub fn direction_from(&self, position: Vec3) -> Option<Vec3> {
        match self.kind {
            LightKind::Directional { target } => (target - position).try_normalize(),
            LightKind::Ambient => None,
        }
    }
}
