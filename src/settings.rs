//! Surface & Scene Program Settings
//!
//! Every tunable of the scene system lives here so hosting pages can ship a
//! JSON blob instead of recompiling. Missing fields fall back to the values
//! the portal pages were designed around.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use backdrop::settings::Settings;
//!
//! // Defaults
//! let settings = Settings::default();
//!
//! // Partial override from JSON
//! let settings = Settings::from_json_str(r#"{ "ambient": { "particle_count": 500 } }"#)?;
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::errors::Result;

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Root configuration object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub surface: SurfaceSettings,
    pub ambient: AmbientSettings,
    pub contact: ContactSettings,
}

impl Settings {
    /// Parses settings from JSON. Unknown fields are ignored, missing fields
    /// take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ---------------------------------------------------------------------------
// SurfaceSettings
// ---------------------------------------------------------------------------

/// Rendering context and default camera parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSettings {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Initial camera distance along +Z.
    pub camera_distance: f32,
    /// Device pixel ratios above this value are clamped.
    pub max_pixel_ratio: f32,
    /// Clear colour as `0xRRGGBB`.
    pub clear_color: u32,
    /// Clear alpha; `0.0` keeps the page behind the canvas visible.
    pub clear_alpha: f32,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_distance: 5.0,
            max_pixel_ratio: 2.0,
            clear_color: 0x000000,
            clear_alpha: 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// AmbientSettings
// ---------------------------------------------------------------------------

/// Parameters of the ambient education scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmbientSettings {
    // === Particle field ===
    pub particle_count: usize,
    /// Edge length of the cube particles are scattered in.
    pub particle_spread: f32,
    pub particle_size: f32,
    pub particle_opacity: f32,
    /// Inclusive hue band `[min, max]` shared by particles and solids.
    pub hue_range: [f32; 2],
    pub particle_saturation: f32,
    pub particle_lightness: f32,

    // === Solids ===
    pub solid_count: usize,
    pub solid_spread: f32,
    /// Half-open radius range `[min, max)`.
    pub solid_radius: [f32; 2],
    pub solid_opacity: f32,

    // === Motion ===
    /// Added to the scene clock every tick.
    pub time_step: f32,
    pub wave_amplitude: f32,
    pub rise_speed: f32,
    /// Particles leaving `[-bound, bound]` vertically re-enter on the other side.
    pub vertical_bound: f32,
    /// Field rotation about Y per tick, in radians.
    pub rotation_increment: f32,
    pub solid_spin: f32,
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
    pub light_orbit_radius: f32,

    // === Camera ===
    /// Smoothing factor `k` in `new = old + (target - old) * k`.
    pub camera_smoothing: f32,
    /// World units the camera drifts at the viewport edge.
    pub camera_range: f32,

    // === Lights ===
    pub ambient_light: LightSettings,
    pub directional_light: LightSettings,
    pub point_lights: [LightSettings; 2],
}

impl Default for AmbientSettings {
    fn default() -> Self {
        Self {
            particle_count: 2000,
            particle_spread: 20.0,
            particle_size: 0.05,
            particle_opacity: 0.8,
            hue_range: [0.6, 0.9],
            particle_saturation: 0.7,
            particle_lightness: 0.6,

            solid_count: 15,
            solid_spread: 30.0,
            solid_radius: [0.3, 0.8],
            solid_opacity: 0.7,

            time_step: 0.01,
            wave_amplitude: 0.002,
            rise_speed: 0.002,
            vertical_bound: 10.0,
            rotation_increment: 0.0005,
            solid_spin: 0.005,
            bob_amplitude: 0.5,
            bob_frequency: 1.0,
            light_orbit_radius: 10.0,

            camera_smoothing: 0.05,
            camera_range: 2.0,

            ambient_light: LightSettings::new(0x404040, 0.4, Vec3::ZERO),
            directional_light: LightSettings::new(0xffffff, 0.8, Vec3::new(5.0, 5.0, 5.0)),
            point_lights: [
                LightSettings::new(0x0ea5e9, 1.0, Vec3::new(10.0, 0.0, 0.0)).with_distance(50.0),
                LightSettings::new(0xf59e0b, 1.0, Vec3::new(-10.0, 0.0, 0.0)).with_distance(50.0),
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// ContactSettings
// ---------------------------------------------------------------------------

/// Parameters of the contact-page scene and its explosion effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactSettings {
    pub globe_radius: f32,
    pub globe_segments: u32,
    pub globe_color: u32,
    pub globe_opacity: f32,
    pub globe_position: Vec3,
    /// Per-tick rotation increment `(x, y)` in radians.
    pub globe_spin: [f32; 2],
    pub camera_distance: f32,
    pub ambient_light: LightSettings,
    pub directional_light: LightSettings,
    pub explosion: ExplosionSettings,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            globe_radius: 3.0,
            globe_segments: 32,
            globe_color: 0x0ea5e9,
            globe_opacity: 0.7,
            globe_position: Vec3::new(0.0, 0.0, -5.0),
            globe_spin: [0.002, 0.005],
            camera_distance: 10.0,
            ambient_light: LightSettings::new(0x404040, 0.6, Vec3::ZERO),
            directional_light: LightSettings::new(0x0ea5e9, 1.0, Vec3::new(5.0, 5.0, 5.0)),
            explosion: ExplosionSettings::default(),
        }
    }
}

/// One-shot particle burst parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplosionSettings {
    pub count: usize,
    /// Velocity components are drawn from `[-max_speed, max_speed)`.
    pub max_speed: f32,
    pub color: u32,
    pub size: f32,
    pub initial_opacity: f32,
    /// Opacity removed per step; must be positive.
    pub fade_step: f32,
}

impl Default for ExplosionSettings {
    fn default() -> Self {
        Self {
            count: 100,
            max_speed: 0.25,
            color: 0xf59e0b,
            size: 0.2,
            initial_opacity: 1.0,
            fade_step: 0.02,
        }
    }
}

// ---------------------------------------------------------------------------
// LightSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightSettings {
    pub color: u32,
    pub intensity: f32,
    pub position: Vec3,
    /// Reach of a point light; `0.0` means unlimited. Ignored by other kinds.
    #[serde(default)]
    pub distance: f32,
}

impl LightSettings {
    #[must_use]
    pub const fn new(color: u32, intensity: f32, position: Vec3) -> Self {
        Self {
            color,
            intensity,
            position,
            distance: 0.0,
        }
    }

    #[must_use]
    pub const fn with_distance(mut self, distance: f32) -> Self {
        self.distance = distance;
        self
    }
}
