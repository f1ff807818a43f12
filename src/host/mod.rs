//! Host environment capabilities
//!
//! What a hosting page lends to a mounted surface: the window-scoped
//! listener list, the named trigger slots, and the viewport metrics.

pub mod input;
pub mod trigger;
pub mod window;

pub use input::{ListenerId, PointerEvent};
pub use trigger::{Trigger, TriggerSlot, TriggerToken};
pub use window::HostWindow;
