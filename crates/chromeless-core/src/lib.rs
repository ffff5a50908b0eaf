//! Pure engine for frameless window chrome.
//!
//! This crate contains the platform-independent half of Chromeless. When an
//! application strips the native title bar and borders from a window, it
//! takes over duties the window system normally performs: deciding what part
//! of the frame the pointer is over, running move and resize drags, showing
//! resize cursors, and computing maximized geometry. Everything needed for
//! those decisions lives here as plain data and pure functions:
//!
//! - **Geometry**: [`Point`], [`Size`], [`Rect`] in physical pixels
//! - **Frame Metrics**: border thickness and title bar height at a given
//!   DPI, merged with application overrides
//! - **Capabilities**: what the platform can be asked for, probed once
//! - **Hit-Testing**: pointer position to [`FrameSection`] classification
//! - **Interaction Sessions**: the per-window move/resize state machine
//! - **Work Area Math**: maximized bounds, auto-hidden taskbar handling
//!
//! Nothing in this crate touches a window handle or performs I/O, so every
//! rule is testable with literal coordinates. The `chromeless` crate feeds
//! real window events in and applies the returned commands.
//!
//! # Hit-Test Example
//!
//! ```
//! use chromeless_core::{frame_section, FrameMetrics, FrameSection, Point, Size, WindowState};
//!
//! let metrics = FrameMetrics::from_os(96, 8, 32);
//! let size = Size::new(800, 600);
//! let section = frame_section(Point::new(796, 300), size, WindowState::Normal, &metrics, true);
//! assert_eq!(section, FrameSection::Right);
//! ```
//!
//! # Drag Example
//!
//! ```
//! use chromeless_core::{
//!     ChromeEvent, InteractionSession, MouseButton, Point, Rect, SessionCommand, SessionContext,
//! };
//!
//! let mut session = InteractionSession::new();
//! let ctx = SessionContext::new(Rect::new(0, 0, 800, 600));
//!
//! session.on_event(
//!     &ChromeEvent::ButtonPress {
//!         button: MouseButton::Left,
//!         local: Point::new(796, 300),
//!         global: Point::new(796, 300),
//!     },
//!     &ctx,
//! );
//! let reply = session.on_event(
//!     &ChromeEvent::PointerMove {
//!         local: Point::new(846, 300),
//!         global: Point::new(846, 300),
//!     },
//!     &ctx,
//! );
//! assert_eq!(
//!     reply.commands[0],
//!     SessionCommand::SetGeometry(Rect::new(0, 0, 850, 600))
//! );
//! ```

pub mod capabilities;
pub mod event;
pub mod geometry;
pub mod hit_test;
pub mod metrics;
pub mod session;
pub mod work_area;

pub use capabilities::{DpiTier, PlatformCapabilities};
pub use event::{ChromeEvent, GeometryAnswer, GeometryQuery, MouseButton};
pub use geometry::{Point, Rect, Size};
pub use hit_test::{frame_section, FrameSection, ResizeEdges};
pub use metrics::{
    scale_metric, FrameMetrics, BASE_DPI, DEFAULT_BORDER_THICKNESS, DEFAULT_TITLE_BAR_HEIGHT,
};
pub use session::{
    InteractionSession, SessionCommand, SessionContext, SessionReply, WindowState,
};
pub use work_area::{max_bounds, maximized_client_rect, MaxBounds, TaskbarEdge};
