//! Scene programs shipped with the crate
//!
//! - [`AmbientProgram`]: the drifting particle field and floating solids
//!   shown behind the login and default pages.
//! - [`ContactProgram`]: the spinning wireframe globe of the contact page,
//!   plus the [`Explosion`] burst fired through the
//!   [`CONTACT_EXPLOSION_TRIGGER`] host trigger.

pub mod ambient;
pub mod contact;
pub mod explosion;

use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;
use uuid::Uuid;

use crate::scene::{Light, SceneObject, Transform};
use crate::settings::LightSettings;

pub use ambient::AmbientProgram;
pub use contact::{CONTACT_EXPLOSION_TRIGGER, ContactProgram};
pub use explosion::{Explosion, ExplosionPhase, lifetime_steps};

/// A generator seeded from the OS entropy source.
pub(crate) fn entropy_rng() -> StdRng {
    StdRng::seed_from_u64(Uuid::new_v4().as_u64_pair().0)
}

pub(crate) fn ambient_light(name: &'static str, settings: &LightSettings) -> SceneObject {
    SceneObject::light(
        name,
        Light::new_ambient(settings.color.into(), settings.intensity),
    )
}

pub(crate) fn directional_light(name: &'static str, settings: &LightSettings) -> SceneObject {
    SceneObject::light(
        name,
        Light::new_directional(settings.color.into(), settings.intensity),
    )
    .with_transform(Transform::from_position(settings.position))
}

/// Re-aims the camera at the world origin.
pub(crate) fn face_origin(camera: &mut crate::scene::Camera) {
    camera.look_at(Vec3::ZERO);
}
