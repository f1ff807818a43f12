//! Error Types
//!
//! This module defines the error types used throughout the scene system.
//!
//! # Overview
//!
//! The main error type [`SceneError`] covers the failure modes of the
//! surface lifecycle and of scene programs:
//! - Invalid mount targets (zero-area or missing containers)
//! - Lifecycle misuse (double mount, resize while unmounted)
//! - Fatal per-frame failures
//! - Configuration decoding errors
//!
//! # Usage
//!
//! All public APIs return [`Result<T>`] which is an alias for `std::result::Result<T, SceneError>`.
//!
//! ```rust,ignore
//! use backdrop::errors::{SceneError, Result};
//!
//! fn mount_background() -> Result<()> {
//!     // Operations that may fail return Result
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::surface::SurfaceState;

/// The main error type for the scene system.
#[derive(Error, Debug)]
pub enum SceneError {
    // ========================================================================
    // Mount & Lifecycle Errors
    // ========================================================================
    /// The container handed to `mount` or `resize` has no drawable area.
    #[error("Invalid container: {width}x{height} has zero area")]
    InvalidContainer {
        /// Requested width in CSS pixels
        width: u32,
        /// Requested height in CSS pixels
        height: u32,
    },

    /// `mount` was called on a surface that is already live.
    #[error("Surface is already mounted")]
    AlreadyMounted,

    /// The operation requires an active surface.
    #[error("Surface is not active (state: {state:?})")]
    NotActive {
        /// State the surface was in when the call was made
        state: SurfaceState,
    },

    // ========================================================================
    // Frame Errors
    // ========================================================================
    /// A tick failed; the surface stops scheduling further ticks.
    #[error("Tick failed: {0}")]
    TickFailed(String),

    /// A fixed-length buffer was handed data of the wrong length.
    #[error("Buffer length mismatch: expected {expected}, got {actual}")]
    BufferMismatch {
        /// Length fixed at creation
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// JSON parsing error while loading settings.
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Alias for `Result<T, SceneError>`.
pub type Result<T> = std::result::Result<T, SceneError>;
