//! SceneSurface lifecycle tests
//!
//! Tests for:
//! - mount validation (zero-area container, double mount)
//! - resize before mount and while stalled
//! - unmount: loop cancellation, cleanup exactly once, idempotence, Drop
//! - tick failures stopping the loop
//! - effect stepping

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use backdrop::errors::{Result, SceneError};
use backdrop::host::HostWindow;
use backdrop::renderer::{FrameStats, HeadlessRenderer, RenderBackend, Viewport};
use backdrop::resources::Color;
use backdrop::scene::{Camera, Light, Scene, SceneObject};
use backdrop::surface::{
    Container, Effect, EffectState, SceneSurface, SurfaceState, TickOutcome, on_ready,
};

const DT: f32 = 1.0 / 60.0;

// ============================================================================
// Helper
// ============================================================================

#[derive(Default)]
struct RenderLog {
    viewports: Vec<Viewport>,
    renders: usize,
    disposed: usize,
}

/// Backend that records every call into a shared log.
struct RecordingRenderer {
    log: Rc<RefCell<RenderLog>>,
    fail_at: Option<usize>,
}

impl RecordingRenderer {
    fn new() -> (Box<dyn RenderBackend>, Rc<RefCell<RenderLog>>) {
        let log = Rc::new(RefCell::new(RenderLog::default()));
        let renderer = Self {
            log: Rc::clone(&log),
            fail_at: None,
        };
        (Box::new(renderer), log)
    }

    fn failing_at(frame: usize) -> (Box<dyn RenderBackend>, Rc<RefCell<RenderLog>>) {
        let log = Rc::new(RefCell::new(RenderLog::default()));
        let renderer = Self {
            log: Rc::clone(&log),
            fail_at: Some(frame),
        };
        (Box::new(renderer), log)
    }
}

impl RenderBackend for RecordingRenderer {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.log.borrow_mut().viewports.push(viewport);
    }

    fn set_clear_color(&mut self, _color: Color, _alpha: f32) {}

    fn render(&mut self, _scene: &Scene, _camera: &Camera) -> Result<FrameStats> {
        let mut log = self.log.borrow_mut();
        log.renders += 1;
        if self.fail_at == Some(log.renders) {
            return Err(SceneError::TickFailed("context lost".into()));
        }
        Ok(FrameStats::default())
    }

    fn dispose(&mut self) {
        self.log.borrow_mut().disposed += 1;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn headless() -> Box<dyn RenderBackend> {
    Box::new(HeadlessRenderer::new())
}

fn new_surface() -> SceneSurface {
    SceneSurface::new(HostWindow::default())
}

// ============================================================================
// Mount
// ============================================================================

#[test]
fn mount_schedules_exactly_one_tick() {
    let mut surface = new_surface();
    assert_eq!(surface.state(), SurfaceState::Unmounted);
    assert_eq!(surface.pending_ticks(), 0);

    surface.mount(Container::new(800, 600), headless(), None).unwrap();
    assert_eq!(surface.state(), SurfaceState::Active);
    assert_eq!(surface.pending_ticks(), 1);
}

#[test]
fn mount_zero_area_container_fails() {
    let mut surface = new_surface();
    let (renderer, log) = RecordingRenderer::new();

    let err = surface.mount(Container::new(0, 600), renderer, None).unwrap_err();
    assert!(matches!(err, SceneError::InvalidContainer { width: 0, height: 600 }));
    assert_eq!(surface.state(), SurfaceState::Unmounted);
    assert_eq!(surface.pending_ticks(), 0);
    assert!(surface.scene().is_none());
    assert!(log.borrow().viewports.is_empty());
    assert_eq!(surface.tick(DT).unwrap(), TickOutcome::Idle);
}

#[test]
fn double_mount_is_rejected_and_keeps_first_mount() {
    let mut surface = new_surface();
    let (first, first_log) = RecordingRenderer::new();
    let handle = surface.mount(Container::new(800, 600), first, None).unwrap();

    let (second, second_log) = RecordingRenderer::new();
    let err = surface.mount(Container::new(100, 100), second, None).unwrap_err();
    assert!(matches!(err, SceneError::AlreadyMounted));

    assert_eq!(surface.animation_handle(), Some(handle));
    assert_eq!(surface.pending_ticks(), 1);
    surface.tick(DT).unwrap();
    assert_eq!(first_log.borrow().renders, 1);
    assert_eq!(second_log.borrow().renders, 0);
}

#[test]
fn mount_without_program_renders_empty_scene() {
    let mut surface = new_surface();
    surface.mount(Container::new(640, 480), headless(), None).unwrap();

    let outcome = surface.tick(DT).unwrap();
    assert_eq!(outcome, TickOutcome::Rendered(FrameStats::default()));
    assert!(surface.scene().unwrap().is_empty());
}

#[test]
fn program_setup_sees_mounted_context() {
    let mut surface = new_surface();
    let program = on_ready(|ctx| {
        assert!(ctx.renderer.is_available());
        assert_eq!(ctx.camera.position.z, 5.0);
        ctx.scene
            .add(SceneObject::light("fill", Light::new_ambient(Color::WHITE, 0.5)));
        Ok(None)
    });
    surface
        .mount(Container::new(640, 480), headless(), Some(Box::new(program)))
        .unwrap();

    assert_eq!(surface.scene().unwrap().light_count(), 1);
    match surface.tick(DT).unwrap() {
        TickOutcome::Rendered(stats) => assert_eq!(stats.lights, 1),
        TickOutcome::Idle => panic!("mounted surface should render"),
    }
}

#[test]
fn setup_error_leaves_surface_unmounted() {
    let mut surface = new_surface();
    let (renderer, log) = RecordingRenderer::new();
    let program = on_ready(|_| Err(SceneError::TickFailed("setup".into())));

    assert!(
        surface
            .mount(Container::new(640, 480), renderer, Some(Box::new(program)))
            .is_err()
    );
    assert_eq!(surface.state(), SurfaceState::Unmounted);
    assert_eq!(surface.pending_ticks(), 0);
    assert_eq!(log.borrow().disposed, 1);

    // The surface is reusable afterwards
    surface.mount(Container::new(640, 480), headless(), None).unwrap();
    assert_eq!(surface.state(), SurfaceState::Active);
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn resize_before_mount_fails() {
    let mut surface = new_surface();
    let err = surface.resize(800, 600).unwrap_err();
    assert!(matches!(
        err,
        SceneError::NotActive {
            state: SurfaceState::Unmounted
        }
    ));
}

#[test]
fn resize_updates_viewport_and_aspect() {
    let mut surface = new_surface();
    let (renderer, log) = RecordingRenderer::new();
    surface
        .mount(Container::new(800, 600).with_pixel_ratio(1.5), renderer, None)
        .unwrap();

    surface.resize(1000, 500).unwrap();
    let last = *log.borrow().viewports.last().unwrap();
    assert_eq!((last.width, last.height), (1000, 500));
    assert_eq!(last.pixel_ratio, 1.5);
    assert!((surface.camera().unwrap().aspect - 2.0).abs() < 1e-6);
}

#[test]
fn resize_to_zero_area_is_rejected() {
    let mut surface = new_surface();
    surface.mount(Container::new(800, 600), headless(), None).unwrap();

    assert!(matches!(
        surface.resize(800, 0),
        Err(SceneError::InvalidContainer { .. })
    ));
    assert!((surface.camera().unwrap().aspect - 800.0 / 600.0).abs() < 1e-6);
}

#[test]
fn resize_after_unmount_fails() {
    let mut surface = new_surface();
    surface.mount(Container::new(800, 600), headless(), None).unwrap();
    surface.unmount();
    assert!(surface.resize(10, 10).is_err());
}

// ============================================================================
// Unmount
// ============================================================================

#[test]
fn unmount_stops_ticks() {
    let mut surface = new_surface();
    let (renderer, log) = RecordingRenderer::new();
    surface.mount(Container::new(800, 600), renderer, None).unwrap();
    assert_eq!(surface.run_frames(3, DT).unwrap(), 3);

    surface.unmount();
    assert_eq!(surface.state(), SurfaceState::Unmounted);
    assert_eq!(surface.pending_ticks(), 0);
    assert_eq!(surface.tick(DT).unwrap(), TickOutcome::Idle);
    assert_eq!(log.borrow().renders, 3);
    assert_eq!(log.borrow().disposed, 1);
}

#[test]
fn unmount_is_idempotent() {
    let mut surface = new_surface();
    let (renderer, log) = RecordingRenderer::new();
    surface.mount(Container::new(800, 600), renderer, None).unwrap();

    surface.unmount();
    surface.unmount();
    assert_eq!(log.borrow().disposed, 1);

    let mut never_mounted = new_surface();
    never_mounted.unmount();
    assert_eq!(never_mounted.state(), SurfaceState::Unmounted);
}

#[test]
fn cleanup_runs_exactly_once() {
    let calls = Rc::new(Cell::new(0));
    let mut surface = new_surface();

    let counter = Rc::clone(&calls);
    let program = on_ready(move |_| {
        Ok(Some(Box::new(move || counter.set(counter.get() + 1)) as Box<dyn FnOnce()>))
    });
    surface
        .mount(Container::new(800, 600), headless(), Some(Box::new(program)))
        .unwrap();
    surface.run_frames(5, DT).unwrap();
    assert_eq!(calls.get(), 0);

    surface.unmount();
    surface.unmount();
    drop(surface);
    assert_eq!(calls.get(), 1);
}

#[test]
fn failed_ready_still_runs_registered_teardown() {
    let host = HostWindow::default();
    let mut surface = SceneSurface::new(host.clone());
    let registered = Rc::new(Cell::new(None));

    let slot = Rc::clone(&registered);
    let released = Rc::clone(&registered);
    let teardown_host = host.clone();
    let program = on_ready(move |ctx| {
        slot.set(Some(ctx.host.add_pointer_listener(|_| {})));
        Err(SceneError::TickFailed("late failure".into()))
    })
    .with_cleanup(move || {
        if let Some(id) = released.take() {
            teardown_host.remove_pointer_listener(id);
        }
    });

    assert!(
        surface
            .mount(Container::fill_window(&host), headless(), Some(Box::new(program)))
            .is_err()
    );
    assert_eq!(surface.state(), SurfaceState::Unmounted);
    assert_eq!(host.pointer_listener_count(), 0);
    assert!(registered.get().is_none());
}

#[test]
fn teardown_runs_after_ready_cleanup_on_unmount() {
    let order = Rc::new(RefCell::new(Vec::new()));
    let mut surface = new_surface();

    let first = Rc::clone(&order);
    let second = Rc::clone(&order);
    let program = on_ready(move |_| {
        Ok(Some(Box::new(move || first.borrow_mut().push("ready")) as Box<dyn FnOnce()>))
    })
    .with_cleanup(move || second.borrow_mut().push("teardown"));
    surface
        .mount(Container::new(800, 600), headless(), Some(Box::new(program)))
        .unwrap();

    surface.unmount();
    surface.unmount();
    assert_eq!(*order.borrow(), vec!["ready", "teardown"]);
}

#[test]
fn drop_releases_host_listeners() {
    let host = HostWindow::default();
    {
        let mut surface = SceneSurface::new(host.clone());
        let program = on_ready(|ctx| {
            let host = ctx.host.clone();
            let id = host.add_pointer_listener(|_| {});
            Ok(Some(Box::new(move || {
                host.remove_pointer_listener(id);
            }) as Box<dyn FnOnce()>))
        });
        surface
            .mount(Container::fill_window(&host), headless(), Some(Box::new(program)))
            .unwrap();
        assert_eq!(host.pointer_listener_count(), 1);
    }
    assert_eq!(host.pointer_listener_count(), 0);
}

#[test]
fn remount_cycles_never_stack_ticks() {
    let mut surface = new_surface();
    let mut handles = Vec::new();
    for _ in 0..5 {
        handles.push(surface.mount(Container::new(320, 240), headless(), None).unwrap());
        assert_eq!(surface.pending_ticks(), 1);
        surface.tick(DT).unwrap();
        assert_eq!(surface.pending_ticks(), 1);
        surface.unmount();
        assert_eq!(surface.pending_ticks(), 0);
    }
    handles.dedup();
    assert_eq!(handles.len(), 5);
}

#[test]
fn frame_count_restarts_on_remount() {
    let mut surface = new_surface();
    surface.mount(Container::new(320, 240), headless(), None).unwrap();
    surface.run_frames(4, DT).unwrap();
    assert_eq!(surface.frame_count(), 4);
    assert!((surface.frame().unwrap().time - 4.0 * DT).abs() < 1e-6);

    surface.unmount();
    assert_eq!(surface.frame_count(), 0);
    surface.mount(Container::new(320, 240), headless(), None).unwrap();
    surface.tick(DT).unwrap();
    assert_eq!(surface.frame_count(), 1);
}

// ============================================================================
// Tick failures
// ============================================================================

#[test]
fn renderer_failure_stops_the_loop() {
    let mut surface = new_surface();
    let (renderer, log) = RecordingRenderer::failing_at(3);
    surface.mount(Container::new(800, 600), renderer, None).unwrap();

    surface.tick(DT).unwrap();
    surface.tick(DT).unwrap();
    let err = surface.tick(DT).unwrap_err();
    assert!(matches!(err, SceneError::TickFailed(_)));
    assert_eq!(surface.state(), SurfaceState::Stalled);
    assert_eq!(surface.pending_ticks(), 0);

    // No retry
    assert_eq!(surface.tick(DT).unwrap(), TickOutcome::Idle);
    assert_eq!(log.borrow().renders, 3);

    surface.unmount();
    assert_eq!(surface.state(), SurfaceState::Unmounted);
    assert_eq!(log.borrow().disposed, 1);
}

#[test]
fn program_failure_is_reported_as_tick_failure() {
    let mut surface = new_surface();
    let program = on_ready(|_| Ok(None)).with_update(|ctx| {
        if ctx.frame.frame_count == 2 {
            return Err(SceneError::BufferMismatch {
                expected: 3,
                actual: 2,
            });
        }
        Ok(())
    });
    surface
        .mount(Container::new(800, 600), headless(), Some(Box::new(program)))
        .unwrap();

    let err = surface.run_frames(10, DT).unwrap_err();
    match err {
        SceneError::TickFailed(message) => assert!(message.contains("expected 3")),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(surface.frame_count(), 2);
    assert_eq!(surface.run_frames(10, DT).unwrap(), 0);
}

// ============================================================================
// Effects
// ============================================================================

struct Countdown {
    steps: Rc<Cell<u32>>,
    left: u32,
}

impl Effect for Countdown {
    fn name(&self) -> &'static str {
        "countdown"
    }

    fn step(&mut self, _scene: &mut Scene) -> Result<EffectState> {
        self.steps.set(self.steps.get() + 1);
        self.left -= 1;
        Ok(if self.left == 0 {
            EffectState::Finished
        } else {
            EffectState::Running
        })
    }
}

#[test]
fn effects_step_once_per_tick_until_finished() {
    let steps = Rc::new(Cell::new(0));
    let mut surface = new_surface();

    let shared = Rc::clone(&steps);
    let program = on_ready(|_| Ok(None)).with_update(move |ctx| {
        if ctx.frame.frame_count == 1 {
            ctx.effects.spawn(Box::new(Countdown {
                steps: Rc::clone(&shared),
                left: 3,
            }));
        }
        Ok(())
    });
    surface
        .mount(Container::new(800, 600), headless(), Some(Box::new(program)))
        .unwrap();

    surface.tick(DT).unwrap();
    assert_eq!(steps.get(), 1);
    assert_eq!(surface.effect_count(), 1);

    surface.run_frames(5, DT).unwrap();
    assert_eq!(steps.get(), 3);
    assert_eq!(surface.effect_count(), 0);
}

#[test]
fn unmount_drops_live_effects() {
    let steps = Rc::new(Cell::new(0));
    let mut surface = new_surface();
    let shared = Rc::clone(&steps);
    let program = on_ready(|_| Ok(None)).with_update(move |ctx| {
        if ctx.frame.frame_count == 1 {
            ctx.effects.spawn(Box::new(Countdown {
                steps: Rc::clone(&shared),
                left: 100,
            }));
        }
        Ok(())
    });
    surface
        .mount(Container::new(800, 600), headless(), Some(Box::new(program)))
        .unwrap();
    surface.run_frames(2, DT).unwrap();

    surface.unmount();
    assert_eq!(surface.effect_count(), 0);
    assert_eq!(steps.get(), 2);
}
