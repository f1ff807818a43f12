use flume::{Receiver, Sender};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::errors::Result;
use crate::host::{HostWindow, TriggerToken};
use crate::programs::explosion::Explosion;
use crate::resources::{Color, MeshMaterial, SphereOptions, create_sphere};
use crate::scene::{ObjectKey, SceneObject, Solid, SolidShape, Transform};
use crate::settings::ContactSettings;
use crate::surface::{SceneContext, SceneProgram};

use super::{ambient_light, directional_light, entropy_rng, face_origin};

/// Host trigger name other components call to fire an explosion.
///
/// Invoking the trigger only queues the request. The burst is added to the
/// scene on the next tick, so callers observing the scene synchronously see
/// it one frame late.
pub const CONTACT_EXPLOSION_TRIGGER: &str = "createContactExplosion";

pub const GLOBE_NAME: &str = "contact_globe";

/// One trigger invocation waiting for the next tick.
#[derive(Debug, Clone, Copy)]
struct ExplosionRequest;

/// Contact page scene: a slowly spinning wireframe globe, and an explosion
/// trigger the page's form fires on submit.
pub struct ContactProgram {
    settings: ContactSettings,
    rng: StdRng,
    requests_tx: Sender<ExplosionRequest>,
    requests_rx: Receiver<ExplosionRequest>,
    host: Option<HostWindow>,
    token: Option<TriggerToken>,
    globe: Option<ObjectKey>,
}

impl Default for ContactProgram {
    fn default() -> Self {
        Self::new(ContactSettings::default())
    }
}

impl ContactProgram {
    #[must_use]
    pub fn new(settings: ContactSettings) -> Self {
        let (requests_tx, requests_rx) = flume::unbounded();
        Self {
            settings,
            rng: entropy_rng(),
            requests_tx,
            requests_rx,
            host: None,
            token: None,
            globe: None,
        }
    }

    /// Makes explosion velocities reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn globe(&self) -> Option<ObjectKey> {
        self.globe
    }

    fn spawn_requested(&mut self, ctx: &mut SceneContext<'_>) {
        for ExplosionRequest in self.requests_rx.try_iter() {
            let explosion = Explosion::spawn(ctx.scene, &self.settings.explosion, &mut self.rng);
            ctx.effects.spawn(Box::new(explosion));
        }
    }
}

impl SceneProgram for ContactProgram {
    fn name(&self) -> &'static str {
        "contact"
    }

    fn setup(&mut self, ctx: &mut SceneContext<'_>) -> Result<()> {
        if !ctx.renderer.is_available() {
            log::warn!(
                "ContactProgram: renderer '{}' unavailable, skipping setup",
                ctx.renderer.name()
            );
            return Ok(());
        }
        let s = &self.settings;

        let geometry = create_sphere(&SphereOptions {
            radius: s.globe_radius,
            width_segments: s.globe_segments,
            height_segments: s.globe_segments,
        });
        let material = MeshMaterial::new(Color::from_hex(s.globe_color))
            .with_opacity(s.globe_opacity)
            .with_wireframe(true);
        let globe = SceneObject::solid(GLOBE_NAME, Solid::new(SolidShape::Sphere, geometry, material))
            .with_transform(Transform::from_position(s.globe_position));
        self.globe = Some(ctx.scene.add(globe));

        ctx.scene.add(ambient_light("contact_ambient", &s.ambient_light));
        ctx.scene.add(directional_light("contact_directional", &s.directional_light));

        ctx.camera.position.z = s.camera_distance;
        face_origin(ctx.camera);

        let tx = self.requests_tx.clone();
        let token = ctx.host.register_trigger(CONTACT_EXPLOSION_TRIGGER, move || {
            if tx.send(ExplosionRequest).is_err() {
                log::trace!("ContactProgram: explosion requested after teardown");
            }
        });
        self.token = Some(token);
        self.host = Some(ctx.host.clone());

        log::debug!("ContactProgram: globe and trigger '{CONTACT_EXPLOSION_TRIGGER}' ready");
        Ok(())
    }

    fn update(&mut self, ctx: &mut SceneContext<'_>) -> Result<()> {
        let Some(key) = self.globe else {
            return Ok(());
        };

        if let Some(globe) = ctx.scene.get_mut(key) {
            let [spin_x, spin_y] = self.settings.globe_spin;
            globe.transform.rotation.x += spin_x;
            globe.transform.rotation.y += spin_y;
        }

        self.spawn_requested(ctx);
        Ok(())
    }

    fn cleanup(&mut self) {
        if let (Some(host), Some(token)) = (self.host.take(), self.token.take()) {
            if host.unregister_trigger(token) {
                log::debug!("ContactProgram: trigger '{}' removed", token.name());
            } else {
                log::debug!(
                    "ContactProgram: trigger '{}' already taken by a newer mount",
                    token.name()
                );
            }
        }
        let dropped = self.requests_rx.drain().count();
        if dropped > 0 {
            log::debug!("ContactProgram: dropped {dropped} pending explosion request(s)");
        }
        self.globe = None;
    }
}
