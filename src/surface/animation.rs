/// The live link between a mounted surface and its per-frame callback.
///
/// Ids are never reused, so a handle from an earlier mount can be told apart
/// from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationHandle(u64);

impl AnimationHandle {
    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Scheduling state of one surface: at most one outstanding handle.
#[derive(Debug, Default)]
pub(crate) struct AnimationLoop {
    handle: Option<AnimationHandle>,
    next_id: u64,
}

impl AnimationLoop {
    /// Schedules the loop. Starting an already running loop returns the
    /// existing handle instead of creating a second one.
    pub fn start(&mut self) -> AnimationHandle {
        if let Some(handle) = self.handle {
            log::warn!("AnimationLoop: start requested while handle {} is live", handle.0);
            return handle;
        }
        self.next_id += 1;
        let handle = AnimationHandle(self.next_id);
        self.handle = Some(handle);
        handle
    }

    /// Cancels the outstanding handle. Returns it the first time, `None` after.
    pub fn cancel(&mut self) -> Option<AnimationHandle> {
        self.handle.take()
    }

    #[must_use]
    pub fn handle(&self) -> Option<AnimationHandle> {
        self.handle
    }

    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.handle.is_some()
    }

    /// Number of outstanding scheduled ticks: always 0 or 1.
    #[must_use]
    pub fn pending(&self) -> usize {
        usize::from(self.handle.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_is_single_and_ids_are_fresh() {
        let mut anim = AnimationLoop::default();
        let a = anim.start();
        assert_eq!(anim.start(), a);
        assert_eq!(anim.pending(), 1);

        assert_eq!(anim.cancel(), Some(a));
        assert_eq!(anim.cancel(), None);
        assert_eq!(anim.pending(), 0);

        let b = anim.start();
        assert_ne!(a, b);
    }
}
