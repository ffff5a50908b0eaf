//! Event dispatch from winit into the chrome.
//!
//! [`handle_window_event`] is the single entry point: call it for every
//! [`WindowEvent`] before your own handling and skip the event when it
//! returns `true`, meaning the chrome consumed it for a drag, a resize or
//! a double click.
//!
//! On Windows most chrome interaction never reaches this shim because the
//! subclass answers `WM_NCHITTEST` and the OS runs its own move and size
//! loops. The shim is what makes the same windows behave on platforms
//! without that machinery, and it still applies portable concerns (DPI
//! changes, focus loss) everywhere.
//!
//! # Usage
//!
//! ```ignore
//! use winit::event::{Event, WindowEvent};
//!
//! event_loop.run(move |event, target| {
//!     if let Event::WindowEvent { window_id, ref event } = event {
//!         if chromeless::handle_window_event(&registry, window_id, event) {
//!             return;
//!         }
//!         // Application handling.
//!     }
//! })?;
//! ```

use std::time::{Duration, Instant};

use tracing::{debug, trace};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, WindowEvent};
use winit::window::{ResizeDirection, WindowId};

use chromeless_core::{
    ChromeEvent, FrameMetrics, MouseButton, Point, Rect, ResizeEdges, SessionCommand,
    SessionContext, BASE_DPI,
};

use crate::cursor;
use crate::registry::{ChromeRegistry, ManagedWindow};

/// Feed a winit window event to the chrome.
///
/// Returns `true` when the chrome consumed the event and the application
/// should not process it further. Events for windows the registry does
/// not manage are never consumed.
pub fn handle_window_event(
    registry: &ChromeRegistry,
    window_id: WindowId,
    event: &WindowEvent,
) -> bool {
    let Some(managed) = registry.get(window_id) else {
        return false;
    };

    match event {
        WindowEvent::CursorMoved { position, .. } => {
            let local = Point::new(position.x as i32, position.y as i32);
            managed.pointer().set_position(local);
            let (geometry, metrics) = context_inputs(&managed);
            let global = geometry.origin.offset(local.x, local.y);
            dispatch_to_session(
                &managed,
                geometry,
                metrics,
                ChromeEvent::PointerMove { local, global },
            )
        }

        WindowEvent::MouseInput {
            state: ElementState::Pressed,
            button,
            ..
        } => {
            let button = map_button(*button);
            let local = managed.pointer().position();
            let (geometry, metrics) = context_inputs(&managed);
            let global = geometry.origin.offset(local.x, local.y);
            let (interval, slop) = {
                let config = managed.config();
                (
                    config.double_click_interval(),
                    config.double_click_slop_for_dpi(metrics.dpi),
                )
            };
            let double = button.is_primary()
                && managed
                    .pointer()
                    .register_press(Instant::now(), local, interval, slop);
            let event = if double {
                ChromeEvent::DoubleClick {
                    button,
                    local,
                    global,
                }
            } else {
                ChromeEvent::ButtonPress {
                    button,
                    local,
                    global,
                }
            };
            dispatch_to_session(&managed, geometry, metrics, event)
        }

        WindowEvent::MouseInput {
            state: ElementState::Released,
            button,
            ..
        } => {
            let button = map_button(*button);
            let (geometry, metrics) = context_inputs(&managed);
            dispatch_to_session(
                &managed,
                geometry,
                metrics,
                ChromeEvent::ButtonRelease { button },
            )
        }

        WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
            debug!(
                target: "chromeless::dispatch",
                scale_factor = *scale_factor,
                "scale factor changed"
            );
            managed.apply_min_size();
            false
        }

        // An abandoned drag must not resume when focus returns.
        WindowEvent::Focused(false) => {
            managed.session().reset();
            managed.pointer().reset();
            false
        }

        _ => false,
    }
}

/// Create an event handler closure borrowing the registry.
///
/// Convenience for event loops that take a callback.
pub fn create_event_handler(
    registry: &ChromeRegistry,
) -> impl FnMut(WindowId, &WindowEvent) -> bool + '_ {
    move |window_id, event| handle_window_event(registry, window_id, event)
}

// =============================================================================
// Session plumbing
// =============================================================================

/// Resolve the geometry and metrics a session context needs.
///
/// Both have fallbacks: without a global position (Wayland) hit testing
/// still works window-locally and drags go through the system loop, and
/// without OS metrics the scaled defaults apply.
fn context_inputs(managed: &ManagedWindow) -> (Rect, FrameMetrics) {
    let geometry = match managed.geometry() {
        Ok(geometry) => geometry,
        Err(error) => {
            trace!(target: "chromeless::dispatch", %error, "window position unavailable");
            let size = managed.window().inner_size();
            Rect::new(0, 0, size.width as i32, size.height as i32)
        }
    };
    let metrics = match managed.effective_metrics() {
        Ok(metrics) => metrics,
        Err(error) => {
            trace!(target: "chromeless::dispatch", %error, "frame metrics unavailable");
            let dpi = (managed.window().scale_factor() * f64::from(BASE_DPI)).round() as u32;
            FrameMetrics::with_scale(dpi.max(1))
        }
    };
    (geometry, metrics)
}

fn dispatch_to_session(
    managed: &ManagedWindow,
    geometry: Rect,
    metrics: FrameMetrics,
    event: ChromeEvent,
) -> bool {
    let (min_size, exempt, resizable, system_drag) = {
        let config = managed.config();
        (
            config.min_size_for_dpi(metrics.dpi),
            config.exempt_regions_for_dpi(metrics.dpi),
            config.is_resizable(),
            config.uses_system_drag() && managed.capabilities().system_drag_loops,
        )
    };
    let context = SessionContext {
        geometry,
        min_size,
        state: managed.state(),
        metrics,
        resizable,
        exempt: &exempt,
        system_drag,
    };
    // The session lock must be released before commands run: applying a
    // command can re-enter the platform synchronously.
    let reply = {
        let mut session = managed.session();
        session.on_event(&event, &context)
    };
    apply_commands(managed, &reply.commands);
    reply.handled
}

fn apply_commands(managed: &ManagedWindow, commands: &[SessionCommand]) {
    for command in commands {
        match *command {
            SessionCommand::SetCursor(section) => {
                cursor::apply_resize_cursor(managed.window(), section);
            }
            SessionCommand::ClearCursor => cursor::clear_cursor(managed.window()),
            SessionCommand::BeginSystemMove => {
                if let Err(error) = managed.window().drag_window() {
                    debug!(target: "chromeless::dispatch", %error, "system move rejected");
                }
            }
            SessionCommand::BeginSystemResize(edges) => {
                if let Some(direction) = resize_direction(edges) {
                    if let Err(error) = managed.window().drag_resize_window(direction) {
                        debug!(target: "chromeless::dispatch", %error, "system resize rejected");
                    }
                }
            }
            SessionCommand::MoveTo(origin) => {
                managed
                    .window()
                    .set_outer_position(PhysicalPosition::new(origin.x, origin.y));
            }
            SessionCommand::SetGeometry(rect) => {
                managed
                    .window()
                    .set_outer_position(PhysicalPosition::new(rect.origin.x, rect.origin.y));
                let _ = managed.window().request_inner_size(PhysicalSize::new(
                    rect.size.width.max(1) as u32,
                    rect.size.height.max(1) as u32,
                ));
            }
            SessionCommand::RestoreBeforeMove {
                pointer,
                press_local,
            } => {
                // Leave fullscreen or maximize, then place the window so
                // the grab point stays under the pointer: centered
                // horizontally, same local height as the original press.
                if managed.window().fullscreen().is_some() {
                    managed.window().set_fullscreen(None);
                }
                managed.window().set_maximized(false);
                let width = managed.window().outer_size().width as i32;
                managed.window().set_outer_position(PhysicalPosition::new(
                    pointer.x - width / 2,
                    pointer.y - press_local.y,
                ));
            }
            SessionCommand::ToggleMaximize => {
                let maximized = managed.window().is_maximized();
                managed.window().set_maximized(!maximized);
            }
        }
    }
}

// =============================================================================
// Translation helpers
// =============================================================================

fn map_button(button: winit::event::MouseButton) -> MouseButton {
    match button {
        winit::event::MouseButton::Left => MouseButton::Left,
        winit::event::MouseButton::Right => MouseButton::Right,
        winit::event::MouseButton::Middle => MouseButton::Middle,
        winit::event::MouseButton::Back => MouseButton::Back,
        winit::event::MouseButton::Forward => MouseButton::Forward,
        winit::event::MouseButton::Other(code) => MouseButton::Other(code),
    }
}

/// Map active resize edges to winit's compass direction.
fn resize_direction(edges: ResizeEdges) -> Option<ResizeDirection> {
    match (edges.left, edges.top, edges.right, edges.bottom) {
        (true, true, false, false) => Some(ResizeDirection::NorthWest),
        (false, true, true, false) => Some(ResizeDirection::NorthEast),
        (true, false, false, true) => Some(ResizeDirection::SouthWest),
        (false, false, true, true) => Some(ResizeDirection::SouthEast),
        (true, false, false, false) => Some(ResizeDirection::West),
        (false, true, false, false) => Some(ResizeDirection::North),
        (false, false, true, false) => Some(ResizeDirection::East),
        (false, false, false, true) => Some(ResizeDirection::South),
        _ => None,
    }
}

// =============================================================================
// Pointer tracking
// =============================================================================

/// Tracks the pointer position and detects double clicks.
///
/// winit reports button presses without coordinates, so the last cursor
/// position is remembered here. Double click detection is done chrome-side
/// because the second press of a pair must be swallowed before the
/// application sees it.
#[derive(Debug)]
pub(crate) struct PointerTracker {
    position: Point,
    last_press: Option<(Instant, Point)>,
}

impl PointerTracker {
    pub(crate) fn new() -> Self {
        Self {
            position: Point::ZERO,
            last_press: None,
        }
    }

    /// The last observed cursor position, window-local.
    pub(crate) fn position(&self) -> Point {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Record a primary press; returns `true` when it completes a double
    /// click.
    ///
    /// A completed pair is consumed, so a third press within the interval
    /// starts a new pair instead of chaining.
    pub(crate) fn register_press(
        &mut self,
        now: Instant,
        position: Point,
        interval: Duration,
        slop: i32,
    ) -> bool {
        let double = match self.last_press {
            Some((at, first)) => {
                now.duration_since(at) <= interval
                    && (position.x - first.x).abs() <= slop
                    && (position.y - first.y).abs() <= slop
            }
            None => false,
        };
        self.last_press = if double { None } else { Some((now, position)) };
        double
    }

    /// Forget the pending press pair.
    pub(crate) fn reset(&mut self) {
        self.last_press = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(500);

    #[test]
    fn test_double_click_within_interval_and_slop() {
        let mut tracker = PointerTracker::new();
        let start = Instant::now();
        assert!(!tracker.register_press(start, Point::new(100, 10), INTERVAL, 4));
        assert!(tracker.register_press(
            start + Duration::from_millis(200),
            Point::new(102, 12),
            INTERVAL,
            4
        ));
    }

    #[test]
    fn test_slow_presses_are_single_clicks() {
        let mut tracker = PointerTracker::new();
        let start = Instant::now();
        assert!(!tracker.register_press(start, Point::new(100, 10), INTERVAL, 4));
        assert!(!tracker.register_press(
            start + Duration::from_millis(700),
            Point::new(100, 10),
            INTERVAL,
            4
        ));
    }

    #[test]
    fn test_moved_presses_are_single_clicks() {
        let mut tracker = PointerTracker::new();
        let start = Instant::now();
        assert!(!tracker.register_press(start, Point::new(100, 10), INTERVAL, 4));
        assert!(!tracker.register_press(
            start + Duration::from_millis(100),
            Point::new(120, 10),
            INTERVAL,
            4
        ));
    }

    #[test]
    fn test_third_press_starts_a_new_pair() {
        let mut tracker = PointerTracker::new();
        let start = Instant::now();
        let position = Point::new(100, 10);
        assert!(!tracker.register_press(start, position, INTERVAL, 4));
        assert!(tracker.register_press(start + Duration::from_millis(100), position, INTERVAL, 4));
        // The pair is consumed; this press arms a fresh one.
        assert!(!tracker.register_press(start + Duration::from_millis(200), position, INTERVAL, 4));
        assert!(tracker.register_press(start + Duration::from_millis(300), position, INTERVAL, 4));
    }

    #[test]
    fn test_reset_forgets_pending_press() {
        let mut tracker = PointerTracker::new();
        let start = Instant::now();
        let position = Point::new(100, 10);
        assert!(!tracker.register_press(start, position, INTERVAL, 4));
        tracker.reset();
        assert!(!tracker.register_press(start + Duration::from_millis(100), position, INTERVAL, 4));
    }

    #[test]
    fn test_resize_direction_mapping() {
        let west = ResizeEdges {
            left: true,
            ..ResizeEdges::default()
        };
        assert_eq!(resize_direction(west), Some(ResizeDirection::West));

        let north_west = ResizeEdges {
            left: true,
            top: true,
            ..ResizeEdges::default()
        };
        assert_eq!(resize_direction(north_west), Some(ResizeDirection::NorthWest));

        let south_east = ResizeEdges {
            right: true,
            bottom: true,
            ..ResizeEdges::default()
        };
        assert_eq!(resize_direction(south_east), Some(ResizeDirection::SouthEast));

        assert_eq!(resize_direction(ResizeEdges::default()), None);
    }

    #[test]
    fn test_button_mapping() {
        assert_eq!(map_button(winit::event::MouseButton::Left), MouseButton::Left);
        assert_eq!(
            map_button(winit::event::MouseButton::Right),
            MouseButton::Right
        );
        assert_eq!(
            map_button(winit::event::MouseButton::Other(9)),
            MouseButton::Other(9)
        );
    }
}
