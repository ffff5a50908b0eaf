//! Per-window interaction state machine.
//!
//! Once the native frame is stripped, the window system no longer runs the
//! modal move and resize loops for us. [`InteractionSession`] replaces them:
//! it consumes a stream of [`ChromeEvent`]s for one window and answers with
//! [`SessionCommand`]s the host applies (move the window, set a cursor,
//! hand the drag to the OS). The session itself never touches the window,
//! which keeps every transition testable with plain values.
//!
//! Each managed window owns exactly one session. Sessions share nothing, so
//! concurrent drags on different windows cannot interfere.
//!
//! # Drag life cycle
//!
//! - A primary press on the title bar arms a move without starting it; the
//!   drag begins on the first pointer motion. A press followed by a release
//!   in place is not a move.
//! - A primary press on a resize border starts a resize immediately. Every
//!   subsequent motion recomputes the geometry from the geometry captured
//!   at press time, so intermediate clamping never accumulates drift.
//! - Releasing the primary button returns to idle, always. A press that
//!   arrives while a drag is still active resets the session first and is
//!   then processed normally.
//!
//! # Example
//!
//! ```
//! use chromeless_core::{
//!     ChromeEvent, InteractionSession, MouseButton, Point, Rect, SessionCommand,
//!     SessionContext,
//! };
//!
//! let mut session = InteractionSession::new();
//! let ctx = SessionContext::new(Rect::new(100, 100, 800, 600));
//!
//! // Press on the title bar, then drag 10 px right.
//! session.on_event(
//!     &ChromeEvent::ButtonPress {
//!         button: MouseButton::Left,
//!         local: Point::new(400, 20),
//!         global: Point::new(500, 120),
//!     },
//!     &ctx,
//! );
//! let reply = session.on_event(
//!     &ChromeEvent::PointerMove {
//!         local: Point::new(410, 20),
//!         global: Point::new(510, 120),
//!     },
//!     &ctx,
//! );
//! assert_eq!(reply.commands[0], SessionCommand::MoveTo(Point::new(110, 100)));
//! ```

use crate::event::{ChromeEvent, GeometryAnswer, GeometryQuery, MouseButton};
use crate::geometry::{Point, Rect, Size};
use crate::hit_test::{frame_section, FrameSection, ResizeEdges};
use crate::metrics::FrameMetrics;

/// Coarse window display state, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowState {
    #[default]
    Normal,
    Minimized,
    Maximized,
    Fullscreen,
}

impl WindowState {
    /// Check if the window is in its normal (restored) state.
    pub fn is_normal(&self) -> bool {
        matches!(self, WindowState::Normal)
    }

    /// Check if the window is maximized.
    pub fn is_maximized(&self) -> bool {
        matches!(self, WindowState::Maximized)
    }

    /// Check if the window is minimized.
    pub fn is_minimized(&self) -> bool {
        matches!(self, WindowState::Minimized)
    }

    /// Check if the window is fullscreen.
    pub fn is_fullscreen(&self) -> bool {
        matches!(self, WindowState::Fullscreen)
    }
}

/// Read-only snapshot of one window, captured by the host per event.
///
/// The session never queries the window system itself; everything it needs
/// to decide a transition arrives through this context. `geometry` is the
/// window's outer rectangle in global coordinates and must be current for
/// the event being delivered.
#[derive(Debug, Clone, Copy)]
pub struct SessionContext<'a> {
    /// Current outer geometry in global physical pixels.
    pub geometry: Rect,
    /// Minimum outer size resize drags may not go below.
    pub min_size: Size,
    /// Current display state.
    pub state: WindowState,
    /// Effective frame metrics at the window's current DPI.
    pub metrics: FrameMetrics,
    /// Whether edge and corner resizing is allowed.
    pub resizable: bool,
    /// Window-local rectangles carved out of the title bar for application
    /// widgets.
    pub exempt: &'a [Rect],
    /// Prefer handing drags to the native modal loop over tracking them
    /// manually.
    pub system_drag: bool,
}

impl SessionContext<'static> {
    /// Context with defaults for a resizable normal window at `geometry`.
    pub fn new(geometry: Rect) -> Self {
        SessionContext {
            geometry,
            min_size: Size::new(1, 1),
            state: WindowState::Normal,
            metrics: FrameMetrics::default(),
            resizable: true,
            exempt: &[],
            system_drag: false,
        }
    }
}

/// Internal drag progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DragState {
    /// No drag; pointer motion only drives cursor feedback.
    #[default]
    Idle,
    /// Primary button went down on the title bar; waiting for motion.
    MovePending { anchor: Point, press_local: Point },
    /// Move drag in progress; `anchor` is the last applied pointer position.
    Moving { anchor: Point },
    /// Resize drag in progress, recomputed from the press-time geometry.
    Resizing {
        edges: ResizeEdges,
        anchor: Point,
        anchor_geometry: Rect,
    },
}

/// Action the host must apply in response to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Show the resize cursor for the given frame section.
    SetCursor(FrameSection),
    /// Restore the default cursor. Emitted once when leaving the border.
    ClearCursor,
    /// Hand the move drag to the native modal loop.
    BeginSystemMove,
    /// Hand the resize drag to the native modal loop.
    BeginSystemResize(ResizeEdges),
    /// Move the window's outer origin to this global position.
    MoveTo(Point),
    /// Apply this outer geometry.
    SetGeometry(Rect),
    /// Leave the maximized state before a manual move drag. The host
    /// restores the window, then places it so the pointer stays over the
    /// title bar: horizontally centered under `pointer`, keeping the
    /// pointer's original vertical offset `press_local.y` into the bar.
    RestoreBeforeMove { pointer: Point, press_local: Point },
    /// Toggle between maximized and normal.
    ToggleMaximize,
}

/// Outcome of feeding one event to a session.
#[derive(Debug, Default)]
pub struct SessionReply {
    /// Whether the event was consumed by chrome handling. Unconsumed events
    /// belong to the application, even if `commands` is non-empty.
    pub handled: bool,
    /// Actions for the host to apply, in order.
    pub commands: Vec<SessionCommand>,
    /// Answer to a [`ChromeEvent::GeometryQuery`].
    pub answer: Option<GeometryAnswer>,
}

impl SessionReply {
    fn consumed() -> Self {
        SessionReply {
            handled: true,
            ..SessionReply::default()
        }
    }

    fn consumed_with(command: SessionCommand) -> Self {
        SessionReply {
            handled: true,
            commands: vec![command],
            answer: None,
        }
    }
}

/// Interaction state for a single managed window.
///
/// Create one per window and feed it every translated input event through
/// [`on_event`](InteractionSession::on_event). The session holds no window
/// handle and performs no I/O.
#[derive(Debug, Default)]
pub struct InteractionSession {
    drag: DragState,
    cursor_shown: bool,
}

impl InteractionSession {
    /// Create an idle session.
    pub fn new() -> Self {
        InteractionSession::default()
    }

    /// Whether no drag is in progress.
    pub fn is_idle(&self) -> bool {
        self.drag == DragState::Idle
    }

    /// Whether a move drag is in progress or armed.
    pub fn is_moving(&self) -> bool {
        matches!(
            self.drag,
            DragState::MovePending { .. } | DragState::Moving { .. }
        )
    }

    /// Whether a resize drag is in progress.
    pub fn is_resizing(&self) -> bool {
        matches!(self.drag, DragState::Resizing { .. })
    }

    /// Abort any drag in progress.
    ///
    /// Used when the window leaves the managed set mid-drag and as the
    /// recovery path for a press that arrives while another drag is still
    /// active (a lost release).
    pub fn reset(&mut self) {
        if self.drag != DragState::Idle {
            tracing::debug!(target: "chromeless_core::session", state = ?self.drag, "session reset");
            self.drag = DragState::Idle;
        }
    }

    /// Feed one event; returns what the host must do about it.
    pub fn on_event(&mut self, event: &ChromeEvent, ctx: &SessionContext<'_>) -> SessionReply {
        match *event {
            ChromeEvent::ButtonPress {
                button,
                local,
                global,
            } => self.on_button_press(button, local, global, ctx),
            ChromeEvent::PointerMove { local, global } => self.on_pointer_move(local, global, ctx),
            ChromeEvent::ButtonRelease { button } => self.on_button_release(button),
            ChromeEvent::DoubleClick { button, local, .. } => {
                self.on_double_click(button, local, ctx)
            }
            ChromeEvent::GeometryQuery(ref query) => self.on_geometry_query(query),
            // Environment changes are handled by the owning registry; the
            // session carries no derived state to refresh.
            ChromeEvent::DpiChanged { .. }
            | ChromeEvent::CompositionChanged { .. }
            | ChromeEvent::ThemeChanged { .. } => SessionReply::default(),
        }
    }

    // =========================================================================
    // Event Handlers
    // =========================================================================

    fn on_button_press(
        &mut self,
        button: MouseButton,
        local: Point,
        global: Point,
        ctx: &SessionContext<'_>,
    ) -> SessionReply {
        if !button.is_primary() {
            return SessionReply::default();
        }

        if self.drag != DragState::Idle {
            tracing::warn!(
                target: "chromeless_core::session",
                state = ?self.drag,
                "button press during active drag; resetting"
            );
            self.drag = DragState::Idle;
        }

        let section = self.effective_section(local, ctx);

        if let Some(edges) = section.resize_edges() {
            if ctx.system_drag {
                tracing::debug!(
                    target: "chromeless_core::session",
                    ?edges,
                    "handing resize drag to the system"
                );
                return SessionReply::consumed_with(SessionCommand::BeginSystemResize(edges));
            }
            tracing::debug!(target: "chromeless_core::session", ?edges, "resize drag started");
            self.drag = DragState::Resizing {
                edges,
                anchor: global,
                anchor_geometry: ctx.geometry,
            };
            return SessionReply::consumed();
        }

        if section.is_draggable() {
            self.drag = DragState::MovePending {
                anchor: global,
                press_local: local,
            };
            return SessionReply::consumed();
        }

        SessionReply::default()
    }

    fn on_pointer_move(
        &mut self,
        local: Point,
        global: Point,
        ctx: &SessionContext<'_>,
    ) -> SessionReply {
        match self.drag {
            DragState::Idle => self.hover_feedback(local, ctx),
            DragState::MovePending {
                anchor,
                press_local,
            } => {
                if global == anchor {
                    // Not an actual movement yet.
                    return SessionReply::consumed();
                }
                if ctx.system_drag {
                    tracing::debug!(
                        target: "chromeless_core::session",
                        "handing move drag to the system"
                    );
                    self.drag = DragState::Idle;
                    return SessionReply::consumed_with(SessionCommand::BeginSystemMove);
                }
                tracing::debug!(target: "chromeless_core::session", "move drag started");
                let mut reply = SessionReply::consumed();
                if ctx.state.is_maximized() || ctx.state.is_fullscreen() {
                    // Dragging a maximized or fullscreen window out of its
                    // state: the host restores it and re-anchors it under
                    // the pointer before regular move deltas apply.
                    reply.commands.push(SessionCommand::RestoreBeforeMove {
                        pointer: global,
                        press_local,
                    });
                } else {
                    let delta = global.delta(anchor);
                    reply.commands.push(SessionCommand::MoveTo(
                        ctx.geometry.origin.offset(delta.x, delta.y),
                    ));
                }
                self.drag = DragState::Moving { anchor: global };
                reply
            }
            DragState::Moving { anchor } => {
                let delta = global.delta(anchor);
                let mut reply = SessionReply::consumed();
                if delta != Point::ZERO {
                    reply.commands.push(SessionCommand::MoveTo(
                        ctx.geometry.origin.offset(delta.x, delta.y),
                    ));
                    self.drag = DragState::Moving { anchor: global };
                }
                reply
            }
            DragState::Resizing {
                edges,
                anchor,
                anchor_geometry,
            } => {
                let delta = global.delta(anchor);
                let resized =
                    resized_geometry(edges, anchor_geometry, delta.x, delta.y, ctx.min_size);
                let mut reply = SessionReply::consumed();
                if resized != ctx.geometry {
                    reply.commands.push(SessionCommand::SetGeometry(resized));
                }
                reply
            }
        }
    }

    fn on_button_release(&mut self, button: MouseButton) -> SessionReply {
        if !button.is_primary() {
            return SessionReply::default();
        }
        if self.drag == DragState::Idle {
            return SessionReply::default();
        }
        tracing::debug!(target: "chromeless_core::session", state = ?self.drag, "drag finished");
        self.drag = DragState::Idle;
        SessionReply::consumed()
    }

    fn on_double_click(
        &mut self,
        button: MouseButton,
        local: Point,
        ctx: &SessionContext<'_>,
    ) -> SessionReply {
        if !button.is_primary() {
            return SessionReply::default();
        }
        // A double click supersedes whatever the first press armed.
        self.drag = DragState::Idle;

        if ctx.state.is_fullscreen() {
            // Fullscreen is entered and left by the application, not by the
            // title bar.
            return SessionReply::default();
        }
        if self.effective_section(local, ctx).is_draggable() {
            tracing::debug!(target: "chromeless_core::session", "title bar double click");
            return SessionReply::consumed_with(SessionCommand::ToggleMaximize);
        }
        SessionReply::default()
    }

    fn on_geometry_query(&self, query: &GeometryQuery) -> SessionReply {
        SessionReply {
            handled: true,
            commands: Vec::new(),
            answer: Some(query.answer()),
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Hover handling while idle: resize cursors over the border, cleared
    /// exactly once after leaving it. The move itself stays unconsumed.
    fn hover_feedback(&mut self, local: Point, ctx: &SessionContext<'_>) -> SessionReply {
        let section = self.effective_section(local, ctx);
        let mut reply = SessionReply::default();
        if section.is_resize() {
            self.cursor_shown = true;
            reply.commands.push(SessionCommand::SetCursor(section));
        } else if self.cursor_shown {
            self.cursor_shown = false;
            reply.commands.push(SessionCommand::ClearCursor);
        }
        reply
    }

    /// Hit-test with the application's title bar carve-outs applied.
    fn effective_section(&self, local: Point, ctx: &SessionContext<'_>) -> FrameSection {
        let section = frame_section(
            local,
            ctx.geometry.size,
            ctx.state,
            &ctx.metrics,
            ctx.resizable,
        );
        if section == FrameSection::TitleBar
            && ctx.exempt.iter().any(|region| region.contains(local))
        {
            return FrameSection::Client;
        }
        section
    }
}

/// Geometry after dragging `edges` by `(dx, dy)` from the press-time
/// rectangle, with each dragged edge pinned so the window never shrinks
/// below `min` and edges never cross.
fn resized_geometry(edges: ResizeEdges, anchor: Rect, dx: i32, dy: i32, min: Size) -> Rect {
    let min_width = min.width.max(1);
    let min_height = min.height.max(1);

    let mut left = anchor.left();
    let mut top = anchor.top();
    let mut right = anchor.right();
    let mut bottom = anchor.bottom();

    if edges.left {
        left = (left + dx).min(right - min_width);
    }
    if edges.right {
        right = (right + dx).max(left + min_width);
    }
    if edges.top {
        top = (top + dy).min(bottom - min_height);
    }
    if edges.bottom {
        bottom = (bottom + dy).max(top + min_height);
    }

    Rect::from_corners(Point::new(left, top), Point::new(right, bottom))
}
