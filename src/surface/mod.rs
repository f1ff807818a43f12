//! Scene surface
//!
//! [`SceneSurface`] is the reusable unit every page embeds: it owns one
//! rendering context, one camera, the scene, the live effects and the
//! per-frame loop, and guarantees that everything it (or its program)
//! registered on the host is released again when it unmounts.
//!
//! # Lifecycle
//!
//! ```text
//! Unmounted -> Mounting -> Active -> Unmounting -> Unmounted
//!                            |
//!                            +-- tick failure --> Stalled (until unmount)
//! ```
//!
//! The host drives the loop by calling [`SceneSurface::tick`] once per
//! display refresh. A surface that is not scheduled answers
//! [`TickOutcome::Idle`] and touches nothing.

mod animation;
mod clock;
mod effect;
mod program;

use glam::Vec3;

use crate::errors::{Result, SceneError};
use crate::host::HostWindow;
use crate::renderer::{FrameStats, RenderBackend, Viewport};
use crate::resources::Color;
use crate::scene::{Camera, Scene};
use crate::settings::SurfaceSettings;

pub use animation::AnimationHandle;
pub use clock::{FrameState, Timer};
pub use effect::{Effect, EffectState, Effects};
pub use program::{Cleanup, OnReady, SceneContext, SceneProgram, on_ready};

use animation::AnimationLoop;

/// Lifecycle state of a [`SceneSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    Unmounted,
    Mounting,
    Active,
    /// Mounted, but the loop was stopped by a failed tick.
    Stalled,
    Unmounting,
}

/// The page element a surface renders into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Container {
    /// Width in CSS pixels.
    pub width: u32,
    /// Height in CSS pixels.
    pub height: u32,
    pub device_pixel_ratio: f32,
}

impl Container {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio: 1.0,
        }
    }

    #[must_use]
    pub fn with_pixel_ratio(mut self, ratio: f32) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    /// A container covering the whole host window.
    #[must_use]
    pub fn fill_window(host: &HostWindow) -> Self {
        let size = host.inner_size();
        Self::new(size.x as u32, size.y as u32).with_pixel_ratio(host.device_pixel_ratio())
    }

    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneError::InvalidContainer {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Result of one [`SceneSurface::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The scene was updated and redrawn.
    Rendered(FrameStats),
    /// Nothing is scheduled; the call did nothing.
    Idle,
}

// ============================================================================
// Mounted resources
// ============================================================================

struct Mounted {
    container: Container,
    host: HostWindow,
    scene: Scene,
    camera: Camera,
    renderer: Box<dyn RenderBackend>,
    program: Option<Box<dyn SceneProgram>>,
    effects: Effects,
    frame: FrameState,
}

impl Mounted {
    fn context(&mut self) -> SceneContext<'_> {
        SceneContext {
            scene: &mut self.scene,
            camera: &mut self.camera,
            renderer: self.renderer.as_ref(),
            host: &self.host,
            effects: &mut self.effects,
            frame: self.frame,
        }
    }

    fn setup_program(&mut self) -> Result<()> {
        let Some(mut program) = self.program.take() else {
            return Ok(());
        };
        log::debug!("SceneSurface: setting up program '{}'", program.name());
        let result = program.setup(&mut self.context());
        self.program = Some(program);
        result
    }

    fn run_frame(&mut self, dt: f32) -> Result<FrameStats> {
        self.frame.advance(dt);

        if let Some(mut program) = self.program.take() {
            let result = program.update(&mut self.context());
            self.program = Some(program);
            result?;
        }

        self.effects.step_all(&mut self.scene)?;

        self.scene.update_matrices();
        self.camera.update_view_matrix();

        self.renderer.render(&self.scene, &self.camera)
    }

    fn release(mut self) {
        if let Some(mut program) = self.program.take() {
            log::debug!("SceneSurface: cleaning up program '{}'", program.name());
            program.cleanup();
        }
        self.effects.clear();
        self.scene.clear();
        self.renderer.dispose();
    }
}

// ============================================================================
// SceneSurface
// ============================================================================

/// Hosts one scene: rendering context, camera, scene graph and frame loop.
pub struct SceneSurface {
    host: HostWindow,
    settings: SurfaceSettings,
    state: SurfaceState,
    animation: AnimationLoop,
    mounted: Option<Mounted>,
}

impl SceneSurface {
    #[must_use]
    pub fn new(host: HostWindow) -> Self {
        Self::with_settings(host, SurfaceSettings::default())
    }

    #[must_use]
    pub fn with_settings(host: HostWindow, settings: SurfaceSettings) -> Self {
        Self {
            host,
            settings,
            state: SurfaceState::Unmounted,
            animation: AnimationLoop::default(),
            mounted: None,
        }
    }

    /// Creates the camera, wires the renderer into `container`, runs the
    /// program setup and schedules the loop.
    pub fn mount(
        &mut self,
        container: Container,
        mut renderer: Box<dyn RenderBackend>,
        program: Option<Box<dyn SceneProgram>>,
    ) -> Result<AnimationHandle> {
        if self.mounted.is_some() {
            return Err(SceneError::AlreadyMounted);
        }
        container.validate()?;

        self.state = SurfaceState::Mounting;

        let viewport = self.viewport_for(&container);
        renderer.set_viewport(viewport);
        renderer.set_clear_color(
            Color::from_hex(self.settings.clear_color),
            self.settings.clear_alpha,
        );

        let mut camera = Camera::new_perspective(
            self.settings.fov,
            viewport.aspect(),
            self.settings.near,
            self.settings.far,
        );
        camera.position = Vec3::new(0.0, 0.0, self.settings.camera_distance);
        camera.look_at(Vec3::ZERO);

        let mut mounted = Mounted {
            container,
            host: self.host.clone(),
            scene: Scene::new(),
            camera,
            renderer,
            program,
            effects: Effects::new(),
            frame: FrameState::default(),
        };

        if let Err(err) = mounted.setup_program() {
            log::error!("SceneSurface: program setup failed: {err}");
            mounted.release();
            self.state = SurfaceState::Unmounted;
            return Err(err);
        }

        let handle = self.animation.start();
        log::info!(
            "SceneSurface: mounted {}x{} on '{}' (handle {})",
            container.width,
            container.height,
            mounted.renderer.name(),
            handle.id()
        );
        self.mounted = Some(mounted);
        self.state = SurfaceState::Active;
        Ok(handle)
    }

    /// Adapts camera aspect and drawing buffer to a new container size.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let state = self.state;
        let Some(mounted) = self.mounted.as_mut().filter(|_| state == SurfaceState::Active) else {
            return Err(SceneError::NotActive { state });
        };

        let container = Container {
            width,
            height,
            ..mounted.container
        };
        container.validate()?;

        let ratio = mounted.container.device_pixel_ratio.min(self.settings.max_pixel_ratio);
        let viewport = Viewport::new(width, height, ratio);
        mounted.container = container;
        mounted.camera.set_aspect(viewport.aspect());
        mounted.renderer.set_viewport(viewport);
        log::debug!("SceneSurface: resized to {width}x{height}");
        Ok(())
    }

    /// Stops the loop and releases everything the mount acquired.
    /// Calling it on an unmounted surface does nothing.
    pub fn unmount(&mut self) {
        let Some(mounted) = self.mounted.take() else {
            return;
        };
        self.state = SurfaceState::Unmounting;

        if let Some(handle) = self.animation.cancel() {
            log::debug!("SceneSurface: cancelled handle {}", handle.id());
        }
        mounted.release();

        self.state = SurfaceState::Unmounted;
        log::info!("SceneSurface: unmounted");
    }

    /// Runs one display refresh.
    ///
    /// An error from the program, an effect or the renderer stops the loop
    /// for good; the surface stays [`SurfaceState::Stalled`] until unmounted.
    pub fn tick(&mut self, dt: f32) -> Result<TickOutcome> {
        if !self.animation.is_scheduled() {
            return Ok(TickOutcome::Idle);
        }
        let Some(mounted) = self.mounted.as_mut() else {
            return Ok(TickOutcome::Idle);
        };

        match mounted.run_frame(dt) {
            Ok(stats) => Ok(TickOutcome::Rendered(stats)),
            Err(err) => {
                self.animation.cancel();
                self.state = SurfaceState::Stalled;
                log::error!("SceneSurface: tick failed, loop stopped: {err}");
                Err(match err {
                    SceneError::TickFailed(_) => err,
                    other => SceneError::TickFailed(other.to_string()),
                })
            }
        }
    }

    /// Ticks up to `frames` times with a fixed `dt`, stopping early when the
    /// surface goes idle. Returns how many frames were rendered.
    pub fn run_frames(&mut self, frames: usize, dt: f32) -> Result<usize> {
        for rendered in 0..frames {
            if self.tick(dt)? == TickOutcome::Idle {
                return Ok(rendered);
            }
        }
        Ok(frames)
    }

    fn viewport_for(&self, container: &Container) -> Viewport {
        Viewport::new(
            container.width,
            container.height,
            container.device_pixel_ratio.min(self.settings.max_pixel_ratio),
        )
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    #[must_use]
    pub fn state(&self) -> SurfaceState {
        self.state
    }

    #[must_use]
    pub fn host(&self) -> &HostWindow {
        &self.host
    }

    #[must_use]
    pub fn scene(&self) -> Option<&Scene> {
        self.mounted.as_ref().map(|m| &m.scene)
    }

    #[must_use]
    pub fn camera(&self) -> Option<&Camera> {
        self.mounted.as_ref().map(|m| &m.camera)
    }

    #[must_use]
    pub fn renderer(&self) -> Option<&dyn RenderBackend> {
        self.mounted.as_ref().map(|m| m.renderer.as_ref())
    }

    /// Ticks completed since the current mount.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.mounted.as_ref().map_or(0, |m| m.frame.frame_count)
    }

    #[must_use]
    pub fn frame(&self) -> Option<FrameState> {
        self.mounted.as_ref().map(|m| m.frame)
    }

    #[must_use]
    pub fn animation_handle(&self) -> Option<AnimationHandle> {
        self.animation.handle()
    }

    /// Outstanding scheduled ticks: 0 or 1.
    #[must_use]
    pub fn pending_ticks(&self) -> usize {
        self.animation.pending()
    }

    #[must_use]
    pub fn effect_count(&self) -> usize {
        self.mounted.as_ref().map_or(0, |m| m.effects.len())
    }
}

impl Drop for SceneSurface {
    fn drop(&mut self) {
        self.unmount();
    }
}
