#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod errors;
pub mod host;
pub mod programs;
pub mod renderer;
pub mod resources;
pub mod scene;
pub mod settings;
pub mod surface;

pub use errors::{Result, SceneError};
pub use host::{HostWindow, PointerEvent, TriggerToken};
pub use programs::{AmbientProgram, CONTACT_EXPLOSION_TRIGGER, ContactProgram, Explosion};
pub use renderer::{FrameStats, HeadlessRenderer, RenderBackend, UnsupportedRenderer, Viewport};
pub use resources::{Color, Geometry, PointCloud, PolyhedronKind};
pub use scene::{Camera, Light, ObjectKey, Scene, SceneObject};
pub use settings::Settings;
pub use surface::{
    Container, Effect, EffectState, OnReady, SceneContext, SceneProgram, SceneSurface,
    SurfaceState, TickOutcome, on_ready,
};
