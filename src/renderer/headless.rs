use std::any::Any;

use crate::errors::{Result, SceneError};
use crate::renderer::{FrameStats, RenderBackend, Viewport};
use crate::resources::Color;
use crate::scene::{Camera, ObjectKind, Scene};

/// CPU-only backend that walks the scene like a real renderer would and
/// records what it would have drawn.
#[derive(Debug)]
pub struct HeadlessRenderer {
    viewport: Viewport,
    clear_color: Color,
    clear_alpha: f32,
    frames_rendered: u64,
    last_frame: FrameStats,
    disposed: bool,
}

impl HeadlessRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            viewport: Viewport::new(0, 0, 1.0),
            clear_color: Color::BLACK,
            clear_alpha: 1.0,
            frames_rendered: 0,
            last_frame: FrameStats::default(),
            disposed: false,
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn clear_color(&self) -> (Color, f32) {
        (self.clear_color, self.clear_alpha)
    }

    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    #[must_use]
    pub fn last_frame(&self) -> FrameStats {
        self.last_frame
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for HeadlessRenderer {
    fn name(&self) -> &'static str {
        "headless"
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn set_clear_color(&mut self, color: Color, alpha: f32) {
        self.clear_color = color;
        self.clear_alpha = alpha;
    }

    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<FrameStats> {
        if self.disposed {
            return Err(SceneError::TickFailed(
                "headless renderer used after dispose".into(),
            ));
        }

        let frustum = camera.frustum();
        let mut stats = FrameStats::default();

        for (_, object) in scene.iter() {
            if !object.visible {
                continue;
            }
            let matrix = object.transform.local_matrix();

            match &object.kind {
                ObjectKind::Points(cloud) => {
                    stats.draw_calls += 1;
                    stats.points += cloud.len();
                    stats.points_in_view += cloud
                        .positions()
                        .iter()
                        .filter(|p| frustum.contains_point(matrix.transform_point3(**p)))
                        .count();
                }
                ObjectKind::Solid(solid) => {
                    stats.draw_calls += 1;
                    stats.solids += 1;
                    let sphere = solid.geometry.bounding_sphere().transform(matrix);
                    if frustum.intersects_sphere(sphere.center, sphere.radius) {
                        stats.solids_in_view += 1;
                    }
                }
                ObjectKind::Light(_) => stats.lights += 1,
            }
        }

        self.frames_rendered += 1;
        self.last_frame = stats;
        Ok(stats)
    }

    fn dispose(&mut self) {
        if !self.disposed {
            log::debug!(
                "HeadlessRenderer: disposed after {} frames",
                self.frames_rendered
            );
        }
        self.disposed = true;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
