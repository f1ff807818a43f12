use std::cell::Cell;
use std::f32::consts::TAU;
use std::rc::Rc;

use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::errors::Result;
use crate::host::{HostWindow, ListenerId};
use crate::resources::{
    Color, MeshMaterial, PointCloud, PointsMaterial, PolyhedronKind, create_polyhedron,
    wrap_vertical,
};
use crate::scene::{Light, ObjectKey, SceneObject, Solid, SolidShape, Transform};
use crate::settings::AmbientSettings;
use crate::surface::{SceneContext, SceneProgram};

use super::{ambient_light, directional_light, entropy_rng, face_origin};

pub const FIELD_NAME: &str = "ambient_field";
pub const SOLID_NAME: &str = "ambient_solid";
pub const POINT_LIGHT_NAME: &str = "ambient_point_light";

/// Moves `current` a fraction `k` of the way towards `target`.
///
/// With `0 < k < 1` the result never overshoots and only equals `target`
/// once `current` already does.
#[inline]
#[must_use]
pub fn smooth_toward(current: Vec2, target: Vec2, k: f32) -> Vec2 {
    current + (target - current) * k
}

#[derive(Debug, Clone, Copy)]
struct FloatingSolid {
    key: ObjectKey,
    base_y: f32,
    index: usize,
}

/// Background scene for the login and default pages: a drifting particle
/// field, floating translucent polyhedra and two orbiting coloured lights,
/// with the camera following the pointer.
pub struct AmbientProgram {
    settings: AmbientSettings,
    rng: StdRng,
    time: f32,

    field: Option<ObjectKey>,
    solids: Vec<FloatingSolid>,
    point_lights: Vec<ObjectKey>,

    /// Camera x/y, nudged by the pointer listener once per event.
    camera_offset: Rc<Cell<Vec2>>,
    host: Option<HostWindow>,
    listener: Option<ListenerId>,
}

impl Default for AmbientProgram {
    fn default() -> Self {
        Self::new(AmbientSettings::default())
    }
}

impl AmbientProgram {
    #[must_use]
    pub fn new(settings: AmbientSettings) -> Self {
        Self {
            settings,
            rng: entropy_rng(),
            time: 0.0,
            field: None,
            solids: Vec::new(),
            point_lights: Vec::new(),
            camera_offset: Rc::new(Cell::new(Vec2::ZERO)),
            host: None,
            listener: None,
        }
    }

    /// Makes the generated scene reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Scene clock, advanced by `time_step` every tick.
    #[must_use]
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Camera x/y after the pointer events seen so far.
    #[must_use]
    pub fn camera_offset(&self) -> Vec2 {
        self.camera_offset.get()
    }

    #[must_use]
    pub fn field(&self) -> Option<ObjectKey> {
        self.field
    }

    // ========================================================================
    // Setup
    // ========================================================================

    fn random_hue(&mut self) -> f32 {
        let [lo, hi] = self.settings.hue_range;
        if hi > lo {
            self.rng.random_range(lo..=hi)
        } else {
            lo
        }
    }

    fn build_field(&mut self) -> Result<SceneObject> {
        let s = &self.settings;
        let half = (s.particle_spread / 2.0).max(0.0);
        let count = s.particle_count;

        let positions: Vec<Vec3> = (0..count)
            .map(|_| {
                Vec3::new(
                    self.rng.random_range(-half..=half),
                    self.rng.random_range(-half..=half),
                    self.rng.random_range(-half..=half),
                )
            })
            .collect();

        let (saturation, lightness) = (s.particle_saturation, s.particle_lightness);
        let material = PointsMaterial::new(Color::WHITE, s.particle_size)
            .with_opacity(s.particle_opacity)
            .with_vertex_colors();

        let colors: Vec<Color> = (0..count)
            .map(|_| Color::from_hsl(self.random_hue(), saturation, lightness))
            .collect();

        let cloud = PointCloud::from_positions(positions, material).with_colors(colors)?;
        Ok(SceneObject::points(FIELD_NAME, cloud))
    }

    fn build_solid(&mut self) -> SceneObject {
        let kind = PolyhedronKind::sample(&mut self.rng);
        let [r_min, r_max] = self.settings.solid_radius;
        let radius = if r_max > r_min {
            self.rng.random_range(r_min..r_max)
        } else {
            r_min
        };
        let half = (self.settings.solid_spread / 2.0).max(0.0);

        let mut transform = Transform::from_position(Vec3::new(
            self.rng.random_range(-half..=half),
            self.rng.random_range(-half..=half),
            self.rng.random_range(-half..=half),
        ));
        transform.set_rotation_euler(
            self.rng.random_range(0.0..TAU),
            self.rng.random_range(0.0..TAU),
            self.rng.random_range(0.0..TAU),
        );

        let hue = self.random_hue();
        let material = MeshMaterial::new(Color::from_hsl(hue, 0.7, 0.5))
            .with_emissive(Color::from_hsl(hue, 0.7, 0.2))
            .with_opacity(self.settings.solid_opacity)
            .with_shininess(100.0);

        SceneObject::solid(
            SOLID_NAME,
            Solid::new(
                SolidShape::Polyhedron(kind),
                create_polyhedron(kind, radius),
                material,
            ),
        )
        .with_transform(transform)
    }

    // ========================================================================
    // Per-frame motion
    // ========================================================================

    fn animate_field(&self, ctx: &mut SceneContext<'_>) {
        let Some(field) = self.field.and_then(|key| ctx.scene.get_mut(key)) else {
            return;
        };
        let s = &self.settings;
        let time = self.time;

        field.transform.rotation.y += s.rotation_increment;
        if let Some(cloud) = field.as_points_mut() {
            for p in cloud.positions_mut() {
                p.y += (time + p.x).sin() * s.wave_amplitude + s.rise_speed;
                p.y = wrap_vertical(p.y, s.vertical_bound);
            }
        }
    }

    fn animate_solids(&self, ctx: &mut SceneContext<'_>) {
        let s = &self.settings;
        for solid in &self.solids {
            let Some(object) = ctx.scene.get_mut(solid.key) else {
                continue;
            };
            let i = solid.index as f32;
            object.transform.rotation.x += s.solid_spin * (1.0 + i * 0.1);
            object.transform.rotation.y += s.solid_spin * (1.0 + i * 0.05);
            object.transform.position.y =
                solid.base_y + (self.time * s.bob_frequency + i).sin() * s.bob_amplitude;
        }
    }

    fn animate_lights(&self, ctx: &mut SceneContext<'_>) {
        let r = self.settings.light_orbit_radius;
        let t = self.time;
        let paths = [
            Vec3::new(t.cos() * r, (t * 0.5).sin() * r * 0.5, t.sin() * r),
            Vec3::new((t * 0.7).sin() * r, (t * 0.3).cos() * r * 0.5, (t * 0.7).cos() * r),
        ];
        for (key, position) in self.point_lights.iter().zip(paths) {
            if let Some(light) = ctx.scene.get_mut(*key) {
                light.transform.position = position;
            }
        }
    }

    fn follow_pointer(&self, ctx: &mut SceneContext<'_>) {
        let camera = &mut *ctx.camera;
        let offset = self.camera_offset.get();
        camera.position.x = offset.x;
        camera.position.y = offset.y;
        face_origin(camera);
    }
}

impl SceneProgram for AmbientProgram {
    fn name(&self) -> &'static str {
        "ambient"
    }

    fn setup(&mut self, ctx: &mut SceneContext<'_>) -> Result<()> {
        if !ctx.renderer.is_available() {
            log::warn!(
                "AmbientProgram: renderer '{}' unavailable, skipping setup",
                ctx.renderer.name()
            );
            return Ok(());
        }

        let field = self.build_field()?;
        self.field = Some(ctx.scene.add(field));

        for index in 0..self.settings.solid_count {
            let solid = self.build_solid();
            let base_y = solid.transform.position.y;
            let key = ctx.scene.add(solid);
            self.solids.push(FloatingSolid { key, base_y, index });
        }

        let s = &self.settings;
        ctx.scene.add(ambient_light("ambient_fill", &s.ambient_light));
        ctx.scene.add(directional_light("ambient_key", &s.directional_light));
        for light in &s.point_lights {
            let object = SceneObject::light(
                POINT_LIGHT_NAME,
                Light::new_point(light.color.into(), light.intensity, light.distance),
            )
            .with_transform(Transform::from_position(light.position));
            self.point_lights.push(ctx.scene.add(object));
        }

        self.camera_offset
            .set(Vec2::new(ctx.camera.position.x, ctx.camera.position.y));
        let offset = Rc::clone(&self.camera_offset);
        let range = self.settings.camera_range;
        let k = self.settings.camera_smoothing;
        let listener = ctx.host.add_pointer_listener(move |event| {
            offset.set(smooth_toward(offset.get(), event.ndc() * range, k));
        });
        self.listener = Some(listener);
        self.host = Some(ctx.host.clone());

        log::debug!(
            "AmbientProgram: {} particles, {} solids",
            self.settings.particle_count,
            self.solids.len()
        );
        Ok(())
    }

    fn update(&mut self, ctx: &mut SceneContext<'_>) -> Result<()> {
        if self.field.is_none() {
            return Ok(());
        }
        self.time += self.settings.time_step;

        self.animate_field(ctx);
        self.animate_solids(ctx);
        self.animate_lights(ctx);
        self.follow_pointer(ctx);
        Ok(())
    }

    fn cleanup(&mut self) {
        if let (Some(host), Some(listener)) = (self.host.take(), self.listener.take())
            && !host.remove_pointer_listener(listener)
        {
            log::warn!("AmbientProgram: pointer listener was already removed");
        }
        self.field = None;
        self.solids.clear();
        self.point_lights.clear();
    }
}
