//! Window-scoped host capability.
//!
//! [`HostWindow`] stands in for the browser `window` (or any native window)
//! that hosts a surface. It carries the process-wide state scene programs
//! are allowed to touch:
//!
//! - the window inner size and device pixel ratio,
//! - pointer-move listeners (a keyed list; each registrant removes its own),
//! - named single-slot triggers such as the contact-page explosion.
//!
//! The handle is a cheap `Rc` clone; host and programs share one instance.
//! Everything is single-threaded, matching the frame-driven model.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use glam::Vec2;

use super::input::{ListenerId, PointerEvent};
use super::trigger::{Trigger, TriggerSlot, TriggerToken};

type PointerListener = Rc<dyn Fn(&PointerEvent)>;

struct HostState {
    inner_size: Cell<Vec2>,
    device_pixel_ratio: Cell<f32>,
    pointer_listeners: RefCell<Vec<(ListenerId, PointerListener)>>,
    triggers: RefCell<HashMap<&'static str, TriggerSlot>>,
    next_id: Cell<u64>,
}

#[derive(Clone)]
pub struct HostWindow {
    state: Rc<HostState>,
}

impl HostWindow {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            state: Rc::new(HostState {
                inner_size: Cell::new(Vec2::new(width as f32, height as f32)),
                device_pixel_ratio: Cell::new(1.0),
                pointer_listeners: RefCell::new(Vec::new()),
                triggers: RefCell::new(HashMap::new()),
                next_id: Cell::new(1),
            }),
        }
    }

    fn next_id(&self) -> u64 {
        let id = self.state.next_id.get();
        self.state.next_id.set(id + 1);
        id
    }

    // ========================================================================
    // Viewport
    // ========================================================================

    #[must_use]
    pub fn inner_size(&self) -> Vec2 {
        self.state.inner_size.get()
    }

    pub fn set_inner_size(&self, width: u32, height: u32) {
        self.state
            .inner_size
            .set(Vec2::new(width as f32, height as f32));
    }

    #[must_use]
    pub fn device_pixel_ratio(&self) -> f32 {
        self.state.device_pixel_ratio.get()
    }

    pub fn set_device_pixel_ratio(&self, ratio: f32) {
        self.state.device_pixel_ratio.set(ratio);
    }

    // ========================================================================
    // Pointer listeners
    // ========================================================================

    /// Subscribes to pointer-move events for the whole window.
    pub fn add_pointer_listener(&self, listener: impl Fn(&PointerEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id());
        self.state
            .pointer_listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    /// Removes the listener registered under `id`. Returns `false` if it was
    /// already gone.
    pub fn remove_pointer_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.state.pointer_listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }

    #[must_use]
    pub fn pointer_listener_count(&self) -> usize {
        self.state.pointer_listeners.borrow().len()
    }

    /// Delivers a pointer move at client coordinates `(x, y)` to every
    /// listener. Returns how many listeners were invoked.
    pub fn dispatch_pointer_move(&self, x: f32, y: f32) -> usize {
        let event = PointerEvent::new(x, y, self.inner_size());
        // Snapshot so listeners may (un)register while being called
        let listeners: Vec<PointerListener> = self
            .state
            .pointer_listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();

        for listener in &listeners {
            listener(&event);
        }
        listeners.len()
    }

    // ========================================================================
    // Named triggers
    // ========================================================================

    /// Registers `trigger` under `name`, overwriting any previous trigger of
    /// that name.
    pub fn register_trigger(&self, name: &'static str, trigger: impl Fn() + 'static) -> TriggerToken {
        let id = self.next_id();
        let trigger: Trigger = Rc::new(trigger);
        let shadowed = self
            .state
            .triggers
            .borrow_mut()
            .entry(name)
            .or_default()
            .register(id, trigger);
        if shadowed {
            log::debug!("HostWindow: trigger '{name}' replaced by a newer registration");
        }
        TriggerToken { name, id }
    }

    /// Removes the trigger registered with `token`, unless a newer
    /// registration has already taken the slot.
    pub fn unregister_trigger(&self, token: TriggerToken) -> bool {
        self.state
            .triggers
            .borrow_mut()
            .get_mut(token.name)
            .is_some_and(|slot| slot.unregister(token.id))
    }

    /// Invokes the trigger named `name`. Absence is not an error: returns
    /// `false` and does nothing.
    pub fn invoke_trigger(&self, name: &str) -> bool {
        let trigger = self
            .state
            .triggers
            .borrow()
            .get(name)
            .and_then(TriggerSlot::get);

        match trigger {
            Some(trigger) => {
                trigger();
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn has_trigger(&self, name: &str) -> bool {
        self.state
            .triggers
            .borrow()
            .get(name)
            .is_some_and(TriggerSlot::is_occupied)
    }
}

impl Default for HostWindow {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

impl std::fmt::Debug for HostWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostWindow")
            .field("inner_size", &self.inner_size())
            .field("pointer_listeners", &self.pointer_listener_count())
            .finish_non_exhaustive()
    }
}
