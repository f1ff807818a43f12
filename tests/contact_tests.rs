//! Contact program tests
//!
//! Tests for:
//! - globe, lights and camera placement
//! - explosion trigger registration, invocation and shadowing
//! - explosion lifetime and fade
//! - globe spin

use backdrop::host::HostWindow;
use backdrop::programs::contact::GLOBE_NAME;
use backdrop::programs::explosion::EXPLOSION_NAME;
use backdrop::programs::{CONTACT_EXPLOSION_TRIGGER, ContactProgram, lifetime_steps};
use backdrop::renderer::{HeadlessRenderer, UnsupportedRenderer};
use backdrop::scene::{Scene, SceneObject};
use backdrop::settings::{ContactSettings, ExplosionSettings};
use backdrop::surface::{Container, SceneSurface};
use glam::Vec3;

const DT: f32 = 1.0 / 60.0;
const EPSILON: f32 = 1e-5;

// ============================================================================
// Helper
// ============================================================================

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn mount_contact(host: &HostWindow, program: ContactProgram) -> SceneSurface {
    let mut surface = SceneSurface::new(host.clone());
    surface
        .mount(
            Container::fill_window(host),
            Box::new(HeadlessRenderer::new()),
            Some(Box::new(program)),
        )
        .unwrap();
    surface
}

fn explosions(scene: &Scene) -> Vec<&SceneObject> {
    scene
        .iter()
        .map(|(_, o)| o)
        .filter(|o| o.name == EXPLOSION_NAME)
        .collect()
}

fn globe(scene: &Scene) -> &SceneObject {
    scene
        .iter()
        .map(|(_, o)| o)
        .find(|o| o.name == GLOBE_NAME)
        .expect("globe")
}

// ============================================================================
// Setup
// ============================================================================

#[test]
fn setup_places_globe_lights_and_camera() {
    let host = HostWindow::default();
    let surface = mount_contact(&host, ContactProgram::default());
    let scene = surface.scene().unwrap();

    let globe = globe(scene);
    assert_eq!(globe.transform.position, Vec3::new(0.0, 0.0, -5.0));
    let solid = globe.as_solid().unwrap();
    assert!(solid.material.wireframe);
    assert!(solid.material.transparent);
    assert!(approx(solid.material.opacity, 0.7));
    assert_eq!(solid.material.color.to_hex(), 0x0ea5e9);

    assert_eq!(scene.light_count(), 2);
    assert_eq!(surface.camera().unwrap().position.z, 10.0);
    assert!(host.has_trigger(CONTACT_EXPLOSION_TRIGGER));
}

#[test]
fn globe_spins_every_tick() {
    let host = HostWindow::default();
    let mut surface = mount_contact(&host, ContactProgram::default());
    surface.run_frames(10, DT).unwrap();

    let rotation = globe(surface.scene().unwrap()).transform.rotation;
    assert!(approx(rotation.y, 0.05));
    assert!(approx(rotation.x, 0.02));
}

// ============================================================================
// Explosion trigger
// ============================================================================

#[test]
fn trigger_absent_before_mount_is_tolerated() {
    let host = HostWindow::default();
    assert!(!host.invoke_trigger(CONTACT_EXPLOSION_TRIGGER));
}

#[test]
fn trigger_spawns_explosion_on_next_tick() {
    let host = HostWindow::default();
    let mut surface = mount_contact(&host, ContactProgram::default().with_seed(1));

    assert!(host.invoke_trigger(CONTACT_EXPLOSION_TRIGGER));
    assert!(explosions(surface.scene().unwrap()).is_empty());

    surface.tick(DT).unwrap();
    let scene = surface.scene().unwrap();
    let bursts = explosions(scene);
    assert_eq!(bursts.len(), 1);

    let cloud = bursts[0].as_points().unwrap();
    assert_eq!(cloud.len(), 100);
    assert_eq!(cloud.material.color.to_hex(), 0xf59e0b);
    assert!(approx(cloud.material.size, 0.2));
    // First step already happened on the spawning tick
    assert!(approx(cloud.material.opacity, 0.98));
    assert!(cloud.positions().iter().all(|p| p.abs().max_element() < 0.25));
}

#[test]
fn two_triggers_make_two_independent_bursts() {
    let host = HostWindow::default();
    let mut surface = mount_contact(&host, ContactProgram::default().with_seed(2));

    host.invoke_trigger(CONTACT_EXPLOSION_TRIGGER);
    host.invoke_trigger(CONTACT_EXPLOSION_TRIGGER);
    surface.tick(DT).unwrap();

    assert_eq!(explosions(surface.scene().unwrap()).len(), 2);
    assert_eq!(surface.effect_count(), 2);
}

#[test]
fn explosion_lives_exactly_its_lifetime() {
    let host = HostWindow::default();
    let mut surface = mount_contact(&host, ContactProgram::default().with_seed(3));
    let lifetime = lifetime_steps(1.0, 0.02);
    assert_eq!(lifetime, 50);

    host.invoke_trigger(CONTACT_EXPLOSION_TRIGGER);
    surface.run_frames(lifetime as usize - 1, DT).unwrap();
    assert_eq!(explosions(surface.scene().unwrap()).len(), 1);
    assert_eq!(surface.effect_count(), 1);

    surface.tick(DT).unwrap();
    assert!(explosions(surface.scene().unwrap()).is_empty());
    assert_eq!(surface.effect_count(), 0);
}

#[test]
fn explosion_lifetime_follows_settings() {
    let settings = ContactSettings {
        explosion: ExplosionSettings {
            fade_step: 0.3,
            ..ExplosionSettings::default()
        },
        ..ContactSettings::default()
    };
    let host = HostWindow::default();
    let mut surface = mount_contact(&host, ContactProgram::new(settings));

    host.invoke_trigger(CONTACT_EXPLOSION_TRIGGER);
    surface.run_frames(3, DT).unwrap();
    assert_eq!(surface.effect_count(), 1);
    surface.tick(DT).unwrap();
    assert_eq!(surface.effect_count(), 0);
}

#[test]
fn staggered_bursts_finish_independently() {
    let host = HostWindow::default();
    let mut surface = mount_contact(&host, ContactProgram::default().with_seed(4));

    host.invoke_trigger(CONTACT_EXPLOSION_TRIGGER);
    surface.run_frames(10, DT).unwrap();
    host.invoke_trigger(CONTACT_EXPLOSION_TRIGGER);
    surface.run_frames(40, DT).unwrap();
    assert_eq!(surface.effect_count(), 1);

    surface.run_frames(10, DT).unwrap();
    assert_eq!(surface.effect_count(), 0);
    assert_eq!(surface.scene().unwrap().point_cloud_count(), 0);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn unmount_unregisters_trigger() {
    let host = HostWindow::default();
    let mut surface = mount_contact(&host, ContactProgram::default());
    host.invoke_trigger(CONTACT_EXPLOSION_TRIGGER);
    surface.tick(DT).unwrap();

    surface.unmount();
    assert!(!host.has_trigger(CONTACT_EXPLOSION_TRIGGER));
    assert!(!host.invoke_trigger(CONTACT_EXPLOSION_TRIGGER));
    assert_eq!(surface.effect_count(), 0);
}

#[test]
fn newer_mount_shadows_stale_trigger() {
    let host = HostWindow::default();
    let mut older = mount_contact(&host, ContactProgram::default());
    let mut newer = mount_contact(&host, ContactProgram::default());

    // Stale cleanup must not remove the newer registration
    older.unmount();
    assert!(host.has_trigger(CONTACT_EXPLOSION_TRIGGER));

    assert!(host.invoke_trigger(CONTACT_EXPLOSION_TRIGGER));
    newer.tick(DT).unwrap();
    assert_eq!(newer.effect_count(), 1);

    newer.unmount();
    assert!(!host.has_trigger(CONTACT_EXPLOSION_TRIGGER));
}

#[test]
fn shadowed_mount_no_longer_receives_requests() {
    let host = HostWindow::default();
    let mut older = mount_contact(&host, ContactProgram::default());
    let mut newer = mount_contact(&host, ContactProgram::default());

    host.invoke_trigger(CONTACT_EXPLOSION_TRIGGER);
    older.tick(DT).unwrap();
    newer.tick(DT).unwrap();
    assert_eq!(older.effect_count(), 0);
    assert_eq!(newer.effect_count(), 1);
}

#[test]
fn unsupported_renderer_registers_nothing() {
    let host = HostWindow::default();
    let mut surface = SceneSurface::new(host.clone());
    surface
        .mount(
            Container::fill_window(&host),
            Box::new(UnsupportedRenderer),
            Some(Box::new(ContactProgram::default())),
        )
        .unwrap();

    assert!(!host.has_trigger(CONTACT_EXPLOSION_TRIGGER));
    assert!(surface.scene().unwrap().is_empty());
    surface.run_frames(5, DT).unwrap();
}
