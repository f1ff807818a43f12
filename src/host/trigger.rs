//! Single-slot trigger registry
//!
//! A [`TriggerSlot`] holds at most one zero-argument callback. Registering
//! overwrites whatever was there: only the most recent registrant is
//! reachable, and stale callbacks are dropped instead of piling up.
//! Unregistering is token-checked so an old owner cannot remove a newer
//! owner's callback.

use std::rc::Rc;

pub type Trigger = Rc<dyn Fn()>;

/// Proof of a registration, required to unregister it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerToken {
    pub(crate) name: &'static str,
    pub(crate) id: u64,
}

impl TriggerToken {
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

#[derive(Default)]
pub struct TriggerSlot {
    current: Option<(u64, Trigger)>,
}

impl TriggerSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `trigger` under registration `id`, replacing any previous one.
    /// Returns whether something was shadowed.
    pub fn register(&mut self, id: u64, trigger: Trigger) -> bool {
        self.current.replace((id, trigger)).is_some()
    }

    /// Clears the slot only if it still holds registration `id`.
    pub fn unregister(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|(current, _)| *current == id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Clones the current callback out so it can run without holding a borrow.
    #[must_use]
    pub fn get(&self) -> Option<Trigger> {
        self.current.as_ref().map(|(_, t)| Rc::clone(t))
    }

    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.current.is_some()
    }
}
