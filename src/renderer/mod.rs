//! Rendering capability
//!
//! The surface never talks to a graphics API directly. It is handed a
//! [`RenderBackend`] at mount time and redraws the whole scene through it
//! once per tick. This keeps the scene system runnable in headless hosts
//! and lets tests substitute their own backend.
//!
//! Backends shipped here:
//!
//! - [`HeadlessRenderer`]: projects the scene through the camera on the CPU
//!   and records per-frame statistics. No pixels are produced.
//! - [`UnsupportedRenderer`]: reports the capability as missing, so scene
//!   programs skip their setup and the surface shows nothing.

pub mod headless;

use std::any::Any;

use crate::errors::Result;
use crate::resources::Color;
use crate::scene::{Camera, Scene};

pub use headless::HeadlessRenderer;

/// Drawable area of a rendering context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: u32,
    /// Height in CSS pixels.
    pub height: u32,
    pub pixel_ratio: f32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32, pixel_ratio: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    /// Backing-store size in physical pixels.
    #[must_use]
    pub fn physical_size(&self) -> (u32, u32) {
        (
            (self.width as f32 * self.pixel_ratio).round() as u32,
            (self.height as f32 * self.pixel_ratio).round() as u32,
        )
    }

    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

/// What one full redraw submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Visible objects handed to the backend (lights excluded).
    pub draw_calls: usize,
    pub solids: usize,
    /// Solids whose bounding sphere intersects the view frustum.
    pub solids_in_view: usize,
    /// Total points across all visible point clouds.
    pub points: usize,
    pub points_in_view: usize,
    pub lights: usize,
}

/// A rendering context owned by one mounted surface.
pub trait RenderBackend {
    /// Short backend identifier used in logs.
    fn name(&self) -> &'static str;

    /// Whether the host environment actually provides this capability.
    ///
    /// Scene programs check this during setup and no-op when it is `false`.
    fn is_available(&self) -> bool {
        true
    }

    /// Sizes the drawing buffer. Called on mount and on every resize.
    fn set_viewport(&mut self, viewport: Viewport);

    fn set_clear_color(&mut self, color: Color, alpha: f32);

    /// Redraws the entire scene from its current state.
    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<FrameStats>;

    /// Releases every resource held by the context. Called once, at unmount.
    fn dispose(&mut self);

    /// Downcasting hook for hosts and tests that need the concrete backend.
    fn as_any(&self) -> &dyn Any;
}

/// Backend for hosts without any rendering capability.
#[derive(Debug, Default)]
pub struct UnsupportedRenderer;

impl RenderBackend for UnsupportedRenderer {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn set_viewport(&mut self, _viewport: Viewport) {}

    fn set_clear_color(&mut self, _color: Color, _alpha: f32) {}

    fn render(&mut self, _scene: &Scene, _camera: &Camera) -> Result<FrameStats> {
        Ok(FrameStats::default())
    }

    fn dispose(&mut self) {}

    fn as_any(&self) -> &dyn Any {
        self
    }
}
