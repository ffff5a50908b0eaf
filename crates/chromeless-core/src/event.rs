//! Typed chrome events.
//!
//! Raw platform messages are translated by the host into [`ChromeEvent`]
//! values and dispatched to the per-window interaction session via pattern
//! matching. Geometry queries carry their platform-resolved inputs (work
//! area, monitor bounds, taskbar state) so the answers stay pure.

use crate::geometry::{Point, Rect};
use crate::work_area::{MaxBounds, TaskbarEdge, max_bounds, maximized_client_rect};

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

impl MouseButton {
    /// Whether this is the primary (drag-initiating) button.
    pub fn is_primary(&self) -> bool {
        matches!(self, MouseButton::Left)
    }
}

/// A non-client geometry question from the platform.
///
/// Each variant carries the monitor state resolved by the host at query
/// time; the answer is computed without further platform calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryQuery {
    /// What client rectangle should a window with this frame get?
    ClientArea {
        /// The window rectangle proposed by the platform.
        proposed: Rect,
        /// Whether the window is maximized.
        maximized: bool,
        /// Work area of the window's monitor.
        work_area: Rect,
        /// Full bounds of the window's monitor.
        monitor: Rect,
        /// Edge of an auto-hidden taskbar on that monitor, if any.
        auto_hide_taskbar: Option<TaskbarEdge>,
    },
    /// Where may a maximized window sit and how large may it grow?
    MaxBounds {
        /// Work area of the window's monitor.
        work_area: Rect,
        /// Full bounds of the window's monitor.
        monitor: Rect,
    },
}

impl GeometryQuery {
    /// Compute the answer from the carried inputs.
    ///
    /// This is a pure function of the query; hosts answering platform
    /// messages on a window procedure thread can call it without touching
    /// any session state.
    pub fn answer(&self) -> GeometryAnswer {
        match *self {
            GeometryQuery::ClientArea {
                proposed,
                maximized,
                work_area,
                monitor,
                auto_hide_taskbar,
            } => {
                // A normal window keeps the proposed rectangle untouched;
                // that is what makes the client area cover the whole frame.
                let rect = if maximized {
                    maximized_client_rect(work_area, monitor, auto_hide_taskbar)
                } else {
                    proposed
                };
                GeometryAnswer::ClientArea(rect)
            }
            GeometryQuery::MaxBounds { work_area, monitor } => {
                GeometryAnswer::MaxBounds(max_bounds(work_area, monitor))
            }
        }
    }
}

/// Answer to a [`GeometryQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryAnswer {
    ClientArea(Rect),
    MaxBounds(MaxBounds),
}

/// A platform window/input event, translated into chrome vocabulary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChromeEvent {
    /// A mouse button was pressed. Positions are window-local and global
    /// physical pixels.
    ButtonPress {
        button: MouseButton,
        local: Point,
        global: Point,
    },
    /// The pointer moved. Delivered both hovering and mid-drag.
    PointerMove { local: Point, global: Point },
    /// A mouse button was released.
    ButtonRelease { button: MouseButton },
    /// Two primary presses within the double-click interval and slop box.
    DoubleClick {
        button: MouseButton,
        local: Point,
        global: Point,
    },
    /// The window's DPI changed; previously resolved metrics are stale.
    DpiChanged { dpi: u32 },
    /// Compositor availability changed.
    CompositionChanged { enabled: bool },
    /// Visual theming was switched on or off.
    ThemeChanged { active: bool },
    /// The platform is asking for non-client geometry.
    GeometryQuery(GeometryQuery),
}
