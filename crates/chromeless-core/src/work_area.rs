//! Work-area geometry for maximized frameless windows.
//!
//! With the native frame gone, the OS no longer clamps a maximized window to
//! the monitor work area; these functions compute the answers the host hands
//! back from the platform's non-client geometry queries. They are pure so
//! the taskbar edge cases stay unit-testable without a compositor.

use crate::geometry::{Point, Rect, Size};

/// Screen edge an auto-hidden taskbar is docked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskbarEdge {
    Left,
    Top,
    Right,
    Bottom,
}

/// Maximize bounds for a window: where the maximized window sits and how
/// large it may get.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxBounds {
    /// Position of the maximized window, relative to the monitor origin.
    pub position: Point,
    /// Size of the maximized window.
    pub size: Size,
    /// Largest size the user may drag the window to.
    pub track_size: Size,
}

/// Client rectangle for a maximized frameless window.
///
/// The client area fills the monitor work area. If the work area covers the
/// whole monitor while an auto-hidden taskbar is docked there, the shell
/// would treat a work-area-sized client as fullscreen and stop raising the
/// taskbar; shaving one pixel off the taskbar's edge keeps it reachable.
pub fn maximized_client_rect(
    work_area: Rect,
    monitor: Rect,
    auto_hide_taskbar: Option<TaskbarEdge>,
) -> Rect {
    let mut rect = work_area;
    if rect == monitor
        && let Some(edge) = auto_hide_taskbar
    {
        match edge {
            TaskbarEdge::Bottom => rect.size.height -= 1,
            TaskbarEdge::Left => {
                rect.origin.x += 1;
                rect.size.width -= 1;
            }
            TaskbarEdge::Top => {
                rect.origin.y += 1;
                rect.size.height -= 1;
            }
            TaskbarEdge::Right => rect.size.width -= 1,
        }
    }
    rect
}

/// Maximize bounds from the monitor and work-area rectangles, so a maximized
/// window does not cover a docked taskbar.
pub fn max_bounds(work_area: Rect, monitor: Rect) -> MaxBounds {
    let position = Point::new(
        (work_area.left() - monitor.left()).abs(),
        (work_area.top() - monitor.top()).abs(),
    );
    let size = Size::new(work_area.width().abs(), work_area.height().abs());
    MaxBounds {
        position,
        size,
        track_size: size,
    }
}
