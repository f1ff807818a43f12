//! Platform-agnostic pointer input
//!
//! Hosts translate their native cursor events into [`PointerEvent`]s and
//! hand them to [`HostWindow::dispatch_pointer_move`](super::HostWindow::dispatch_pointer_move).

use glam::Vec2;

/// Identifies one registered pointer listener. Removing a listener requires
/// the exact id its registration returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// A pointer-move event in window client coordinates (origin top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Vec2,
    /// Window inner size at the time of the event.
    pub viewport: Vec2,
}

impl PointerEvent {
    #[must_use]
    pub fn new(x: f32, y: f32, viewport: Vec2) -> Self {
        Self {
            position: Vec2::new(x, y),
            viewport,
        }
    }

    /// Normalized device coordinates: x in `[-1, 1]` left to right, y in
    /// `[-1, 1]` bottom to top. A degenerate viewport maps to the centre.
    #[must_use]
    pub fn ndc(&self) -> Vec2 {
        if self.viewport.x <= 0.0 || self.viewport.y <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            self.position.x / self.viewport.x * 2.0 - 1.0,
            -(self.position.y / self.viewport.y) * 2.0 + 1.0,
        )
    }
}
