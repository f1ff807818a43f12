use glam::Vec3;
use rand::RngExt;
use rand::rngs::StdRng;

use crate::errors::Result;
use crate::resources::{Color, PointCloud, PointsMaterial};
use crate::scene::{ObjectKey, Scene, SceneObject};
use crate::settings::ExplosionSettings;
use crate::surface::{Effect, EffectState};

pub const EXPLOSION_NAME: &str = "contact_explosion";

/// Number of steps a burst fading from `initial_opacity` by `fade_step`
/// per step stays alive: `ceil(initial_opacity / fade_step)`, at least one.
///
/// Ratios within `1e-6` of an integer are treated as exact, so `1.0 / 0.02`
/// gives 50 steps even though the quotient is not exactly representable.
#[must_use]
pub fn lifetime_steps(initial_opacity: f32, fade_step: f32) -> u32 {
    if !fade_step.is_finite() || fade_step <= 0.0 {
        log::warn!("Explosion: fade step {fade_step} never fades out, using a single step");
        return 1;
    }
    if initial_opacity.is_nan() || initial_opacity <= 0.0 {
        return 1;
    }

    let ratio = f64::from(initial_opacity) / f64::from(fade_step);
    let rounded = ratio.round();
    let steps = if (ratio - rounded).abs() < 1e-6 {
        rounded
    } else {
        ratio.ceil()
    };
    (steps as u32).max(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplosionPhase {
    Expanding,
    Disposed,
}

/// One-shot particle burst.
///
/// Every point leaves the origin with its own constant velocity while the
/// whole cloud fades out. When the opacity is used up the cloud is removed
/// from the scene and the effect reports itself finished.
#[derive(Debug)]
pub struct Explosion {
    key: ObjectKey,
    velocities: Vec<Vec3>,
    fade_step: f32,
    remaining: u32,
    phase: ExplosionPhase,
}

impl Explosion {
    /// Adds the burst's point cloud to `scene`.
    pub fn spawn(scene: &mut Scene, settings: &ExplosionSettings, rng: &mut StdRng) -> Self {
        let speed = settings.max_speed;
        let velocities: Vec<Vec3> = (0..settings.count)
            .map(|_| {
                if speed > 0.0 {
                    Vec3::new(
                        rng.random_range(-speed..speed),
                        rng.random_range(-speed..speed),
                        rng.random_range(-speed..speed),
                    )
                } else {
                    Vec3::ZERO
                }
            })
            .collect();

        let material = PointsMaterial::new(Color::from_hex(settings.color), settings.size)
            .with_opacity(settings.initial_opacity);
        let key = scene.add(SceneObject::points(
            EXPLOSION_NAME,
            PointCloud::new(settings.count, material),
        ));

        Self {
            key,
            velocities,
            fade_step: settings.fade_step,
            remaining: lifetime_steps(settings.initial_opacity, settings.fade_step),
            phase: ExplosionPhase::Expanding,
        }
    }

    #[must_use]
    pub fn phase(&self) -> ExplosionPhase {
        self.phase
    }

    #[must_use]
    pub fn key(&self) -> ObjectKey {
        self.key
    }

    /// Steps left before the burst disposes itself.
    #[must_use]
    pub fn remaining_steps(&self) -> u32 {
        self.remaining
    }

    fn dispose(&mut self, scene: &mut Scene) {
        scene.remove(self.key);
        self.phase = ExplosionPhase::Disposed;
    }
}

impl Effect for Explosion {
    fn name(&self) -> &'static str {
        EXPLOSION_NAME
    }

    fn step(&mut self, scene: &mut Scene) -> Result<EffectState> {
        if self.phase == ExplosionPhase::Disposed {
            return Ok(EffectState::Finished);
        }

        let Some(cloud) = scene.get_mut(self.key).and_then(SceneObject::as_points_mut) else {
            log::warn!("Explosion: point cloud left the scene early");
            self.phase = ExplosionPhase::Disposed;
            return Ok(EffectState::Finished);
        };

        cloud.advance(&self.velocities)?;
        cloud.material.opacity = (cloud.material.opacity - self.fade_step).max(0.0);

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.dispose(scene);
            return Ok(EffectState::Finished);
        }
        Ok(EffectState::Running)
    }
}
