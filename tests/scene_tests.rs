//! Scene Integration Tests
//!
//! Tests for:
//! - Scene: add/remove objects, per-kind counts, matrix refresh
//! - Camera: projection, look_at and frustum culling
//! - HeadlessRenderer: what a frame submits
//! - Globe geometry built from sphere options

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use backdrop::renderer::{HeadlessRenderer, RenderBackend, Viewport};
use backdrop::resources::{
    Color, MeshMaterial, PointCloud, PointsMaterial, PolyhedronKind, SphereOptions, Topology,
    create_polyhedron, create_sphere,
};
use backdrop::scene::{Camera, Light, Scene, SceneObject, Solid, SolidShape, Transform};

const EPSILON: f32 = 1e-4;

// ============================================================================
// Helper
// ============================================================================

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn unit_solid(at: Vec3) -> SceneObject {
    let kind = PolyhedronKind::Octahedron;
    SceneObject::solid(
        "solid",
        Solid::new(
            SolidShape::Polyhedron(kind),
            create_polyhedron(kind, 1.0),
            MeshMaterial::new(Color::WHITE),
        ),
    )
    .with_transform(Transform::from_position(at))
}

fn camera_at_z(z: f32) -> Camera {
    let mut camera = Camera::new_perspective(75.0, 1.0, 0.1, 1000.0);
    camera.position = Vec3::new(0.0, 0.0, z);
    camera.look_at(Vec3::ZERO);
    camera
}

// ============================================================================
// Scene container
// ============================================================================

#[test]
fn scene_add_and_remove() {
    let mut scene = Scene::new();
    let key = scene.add(unit_solid(Vec3::ZERO));
    assert!(scene.contains(key));
    assert_eq!(scene.len(), 1);

    let removed = scene.remove(key).unwrap();
    assert_eq!(removed.name, "solid");
    assert!(!scene.contains(key));
    assert!(scene.remove(key).is_none());
}

#[test]
fn scene_counts_per_kind() {
    let mut scene = Scene::new();
    scene.add(unit_solid(Vec3::ZERO));
    scene.add(SceneObject::points(
        "cloud",
        PointCloud::new(10, PointsMaterial::default()),
    ));
    scene.add(SceneObject::light("sun", Light::new_directional(Color::WHITE, 1.0)));
    scene.add(SceneObject::light("fill", Light::new_ambient(Color::WHITE, 0.3)));

    assert_eq!(scene.solid_count(), 1);
    assert_eq!(scene.point_cloud_count(), 1);
    assert_eq!(scene.light_count(), 2);

    scene.clear();
    assert!(scene.is_empty());
}

#[test]
fn objects_get_distinct_ids() {
    let mut scene = Scene::new();
    let a = scene.add(unit_solid(Vec3::ZERO));
    let b = scene.add(unit_solid(Vec3::ZERO));
    assert_ne!(scene.get(a).unwrap().uuid, scene.get(b).unwrap().uuid);
}

#[test]
fn update_matrices_applies_transforms() {
    let mut scene = Scene::new();
    let key = scene.add(unit_solid(Vec3::new(1.0, 2.0, 3.0)));
    scene.get_mut(key).unwrap().transform.rotation.y = FRAC_PI_2;
    scene.update_matrices();

    let matrix = *scene.get(key).unwrap().transform.local_matrix();
    let p = matrix.transform_point3(Vec3::X);
    assert!(p.distance(Vec3::new(1.0, 2.0, 2.0)) < EPSILON);
}

// ============================================================================
// Camera
// ============================================================================

#[test]
fn camera_aspect_guards_invalid_values() {
    let mut camera = camera_at_z(5.0);
    camera.set_aspect(2.0);
    assert!(approx(camera.aspect, 2.0));
    camera.set_aspect(0.0);
    camera.set_aspect(f32::NAN);
    assert!(approx(camera.aspect, 2.0));
}

#[test]
fn frustum_contains_points_in_front_only() {
    let camera = camera_at_z(5.0);
    let frustum = camera.frustum();
    assert!(frustum.contains_point(Vec3::ZERO));
    assert!(frustum.contains_point(Vec3::new(0.0, 0.0, -500.0)));
    assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 10.0)));
    assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -2000.0)));
    assert!(!frustum.contains_point(Vec3::new(100.0, 0.0, 0.0)));
}

#[test]
fn frustum_sphere_test_uses_radius() {
    let camera = camera_at_z(5.0);
    // Just behind the camera, but large enough to reach into view
    assert!(camera.frustum().intersects_sphere(Vec3::new(0.0, 0.0, 6.0), 2.0));
    assert!(!camera.frustum().intersects_sphere(Vec3::new(0.0, 0.0, 6.0), 0.5));
}

// ============================================================================
// Headless rendering
// ============================================================================

#[test]
fn headless_frame_counts_visible_content() {
    let mut scene = Scene::new();
    scene.add(unit_solid(Vec3::ZERO));
    scene.add(unit_solid(Vec3::new(0.0, 0.0, 50.0)));
    let mut hidden = unit_solid(Vec3::ZERO);
    hidden.visible = false;
    scene.add(hidden);

    let cloud = PointCloud::from_positions(
        vec![Vec3::ZERO, Vec3::new(0.0, 0.0, 50.0)],
        PointsMaterial::default(),
    );
    scene.add(SceneObject::points("cloud", cloud));
    scene.add(SceneObject::light("fill", Light::new_ambient(Color::WHITE, 0.5)));
    scene.update_matrices();

    let mut renderer = HeadlessRenderer::new();
    renderer.set_viewport(Viewport::new(640, 480, 1.0));
    let stats = renderer.render(&scene, &camera_at_z(5.0)).unwrap();

    assert_eq!(stats.draw_calls, 3);
    assert_eq!(stats.solids, 2);
    assert_eq!(stats.solids_in_view, 1);
    assert_eq!(stats.points, 2);
    assert_eq!(stats.points_in_view, 1);
    assert_eq!(stats.lights, 1);
    assert_eq!(renderer.frames_rendered(), 1);
    assert_eq!(renderer.last_frame(), stats);
}

#[test]
fn headless_refuses_to_render_after_dispose() {
    let mut renderer = HeadlessRenderer::new();
    renderer.dispose();
    assert!(renderer.is_disposed());
    assert!(renderer.render(&Scene::new(), &camera_at_z(5.0)).is_err());
}

// ============================================================================
// Globe geometry
// ============================================================================

#[test]
fn globe_sphere_geometry() {
    let geometry = create_sphere(&SphereOptions {
        radius: 3.0,
        width_segments: 32,
        height_segments: 32,
    });
    assert_eq!(geometry.topology, Topology::TriangleList);
    assert_eq!(geometry.vertex_count(), 33 * 33);
    assert!(geometry.positions.iter().all(|p| approx(p.length(), 3.0)));
    assert!(geometry.bounding_sphere().radius >= 3.0 - EPSILON);

    let wire = geometry.to_wireframe();
    assert_eq!(wire.topology, Topology::LineList);
    assert!(wire.primitive_count() > 0);
}
