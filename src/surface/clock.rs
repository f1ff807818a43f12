#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// Per-frame timing handed to scene programs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameState {
    /// Total time fed into the surface since mount (in seconds).
    pub time: f32,
    /// Delta time of the current tick (in seconds).
    pub dt: f32,
    /// Ticks completed since mount, including the current one.
    pub frame_count: u64,
}

impl FrameState {
    pub(crate) fn advance(&mut self, dt: f32) {
        self.dt = dt;
        self.time += dt;
        self.frame_count += 1;
    }
}

/// Wall-clock source for hosts that drive the surface in real time.
///
/// Deterministic hosts (tests, replays) skip this and pass a fixed `dt`
/// to [`SceneSurface::tick`](super::SceneSurface::tick) directly.
pub struct Timer {
    last_update: Instant,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_update: Instant::now(),
        }
    }

    /// Seconds elapsed since the previous call (or since creation).
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last_update).as_secs_f32();
        self.last_update = now;
        dt
    }
}
