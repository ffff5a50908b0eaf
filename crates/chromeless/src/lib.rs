//! Frameless window chrome for winit applications.
//!
//! `chromeless` removes a window's native title bar and borders while
//! keeping everything the frame used to provide:
//!
//! - **Frame stripping**: the native frame is removed without losing the
//!   OS shadow, snap layouts, or the minimize/maximize animations
//! - **Hit testing**: window edges resize, a configurable top strip drags,
//!   regions inside the strip can be carved out for custom buttons
//! - **Interaction**: drag-to-move, edge and corner resizing with minimum
//!   size enforcement, double-click-to-maximize, resize cursor feedback
//! - **Geometry**: maximized windows stop at the work area instead of
//!   covering the taskbar, including the auto-hide taskbar edge case
//!
//! On Windows this is done natively: the window keeps its styles, a
//! subclass answers the non-client messages, and the OS runs its own
//! move/size loops so snapping and modal drag behavior are exactly what a
//! framed window gets. Everywhere else the same behavior is rebuilt on
//! winit's portable API.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use chromeless::{ChromeConfig, ChromeRegistry};
//! use chromeless_core::Rect;
//!
//! // Once, next to the event loop:
//! let registry = ChromeRegistry::new();
//!
//! // For each window that should lose its native frame:
//! let managed = registry.manage_with(
//!     Arc::clone(&window),
//!     ChromeConfig::new()
//!         .with_title_bar_height(40)
//!         // Keep the close button clickable inside the drag strip.
//!         .with_exempt_region(Rect::new(760, 0, 40, 40)),
//! )?;
//!
//! // In the winit event handler, before your own processing:
//! if chromeless::handle_window_event(&registry, window_id, &event) {
//!     return;
//! }
//!
//! // To get the native frame back:
//! registry.unmanage(window.id());
//! ```
//!
//! The hit-testing and interaction engine lives in [`chromeless_core`]
//! and is re-exported here; it is pure and can be driven directly in
//! tests or from a custom platform layer.

pub mod config;
pub mod cursor;
pub mod dispatch;
pub mod error;
pub mod native;
pub mod registry;

pub use config::{
    ChromeConfig, DEFAULT_DOUBLE_CLICK_INTERVAL, DEFAULT_DOUBLE_CLICK_SLOP, DEFAULT_MIN_SIZE,
};
pub use cursor::resize_cursor;
pub use dispatch::{create_event_handler, handle_window_event};
pub use error::{ChromeError, ChromeResult};
pub use native::FrameSnapshot;
pub use registry::{ChromeRegistry, ManagedWindow};

pub use chromeless_core::*;
