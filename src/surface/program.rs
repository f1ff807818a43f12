use crate::errors::Result;
use crate::host::HostWindow;
use crate::renderer::RenderBackend;
use crate::scene::{Camera, Scene};
use crate::surface::clock::FrameState;
use crate::surface::effect::Effects;

/// Everything a scene program may touch during setup or a tick.
///
/// Borrowed from the surface for the duration of one call; programs keep
/// only keys and shared handles between calls.
pub struct SceneContext<'a> {
    pub scene: &'a mut Scene,
    pub camera: &'a mut Camera,
    pub renderer: &'a dyn RenderBackend,
    pub host: &'a HostWindow,
    pub effects: &'a mut Effects,
    pub frame: FrameState,
}

/// Page-specific content driven by a [`SceneSurface`](super::SceneSurface).
///
/// Lifecycle: `setup` once right after mount, `update` once per tick before
/// the redraw, `cleanup` exactly once when the surface unmounts (also after a
/// failed `setup`, so implementations must tolerate partial setup).
pub trait SceneProgram {
    fn name(&self) -> &'static str {
        "program"
    }

    fn setup(&mut self, ctx: &mut SceneContext<'_>) -> Result<()>;

    fn update(&mut self, _ctx: &mut SceneContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Removes every host registration the program made.
    fn cleanup(&mut self) {}
}

/// Teardown closure returned by an [`OnReady`] callback.
pub type Cleanup = Box<dyn FnOnce()>;

type UpdateFn = Box<dyn FnMut(&mut SceneContext<'_>) -> Result<()>>;

/// Closure-based program for one-off pages.
///
/// The ready callback runs once with the freshly mounted context and may
/// hand back a cleanup closure; the surface invokes it exactly once on
/// unmount.
///
/// A callback that fails never returns its cleanup, so anything it
/// registered before the error is not undone by it. Registrations that must
/// be released even after a failed setup belong in [`OnReady::with_cleanup`],
/// which runs on unmount as well as after a failed `setup`.
///
/// ```rust,ignore
/// let program = on_ready(|ctx| {
///     ctx.scene.add(SceneObject::light("fill", Light::new_ambient(Color::WHITE, 0.5)));
///     Ok(None)
/// });
/// surface.mount(container, Box::new(HeadlessRenderer::new()), Some(Box::new(program)))?;
/// ```
pub struct OnReady<F> {
    ready: Option<F>,
    update: Option<UpdateFn>,
    cleanup: Option<Cleanup>,
    teardown: Option<Cleanup>,
}

impl<F> OnReady<F>
where
    F: FnOnce(&mut SceneContext<'_>) -> Result<Option<Cleanup>>,
{
    #[must_use]
    pub fn new(ready: F) -> Self {
        Self {
            ready: Some(ready),
            update: None,
            cleanup: None,
            teardown: None,
        }
    }

    /// Adds a per-tick callback.
    #[must_use]
    pub fn with_update(
        mut self,
        update: impl FnMut(&mut SceneContext<'_>) -> Result<()> + 'static,
    ) -> Self {
        self.update = Some(Box::new(update));
        self
    }

    /// Adds a teardown that runs exactly once, after the ready callback's own
    /// cleanup, whether or not the ready callback succeeded.
    #[must_use]
    pub fn with_cleanup(mut self, teardown: impl FnOnce() + 'static) -> Self {
        self.teardown = Some(Box::new(teardown));
        self
    }
}

/// Shorthand for [`OnReady::new`].
#[must_use]
pub fn on_ready<F>(ready: F) -> OnReady<F>
where
    F: FnOnce(&mut SceneContext<'_>) -> Result<Option<Cleanup>>,
{
    OnReady::new(ready)
}

impl<F> SceneProgram for OnReady<F>
where
    F: FnOnce(&mut SceneContext<'_>) -> Result<Option<Cleanup>>,
{
    fn name(&self) -> &'static str {
        "on_ready"
    }

    fn setup(&mut self, ctx: &mut SceneContext<'_>) -> Result<()> {
        if let Some(ready) = self.ready.take() {
            self.cleanup = ready(ctx)?;
        }
        Ok(())
    }

    fn update(&mut self, ctx: &mut SceneContext<'_>) -> Result<()> {
        match self.update.as_mut() {
            Some(update) => update(ctx),
            None => Ok(()),
        }
    }

    fn cleanup(&mut self) {
        if let Some(cleanup) = self.cleanup.take() {
            cleanup();
        }
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}
