use crate::resources::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// Distance at which the light's contribution reaches zero; `0.0` means unlimited.
    pub distance: f32,
}

// High-level abstraction: light component in the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Ambient,
    /// Parallel rays coming from the object position towards the origin.
    Directional,
    Point(PointLight),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub color: Color,
    pub intensity: f32,
    pub kind: LightKind,
}

impl Light {
    #[must_use]
    pub fn new_ambient(color: Color, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            kind: LightKind::Ambient,
        }
    }

    #[must_use]
    pub fn new_directional(color: Color, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            kind: LightKind::Directional,
        }
    }

    #[must_use]
    pub fn new_point(color: Color, intensity: f32, distance: f32) -> Self {
        Self {
            color,
            intensity,
            kind: LightKind::Point(PointLight { distance }),
        }
    }
}
