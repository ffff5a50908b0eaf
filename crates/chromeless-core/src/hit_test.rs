//! Frame section hit-testing.
//!
//! When a window has no native decorations, the application must decide for
//! every pointer position which non-client region it belongs to: a resize
//! edge or corner, the (invisible) title bar, or the client area. This
//! module is that decision as a pure function, so the behavior the OS
//! normally provides for free can be reproduced exactly and tested with
//! literal geometries.
//!
//! # Classification rules
//!
//! - Out-of-bounds points and degenerate window sizes map to
//!   [`FrameSection::Nowhere`].
//! - Maximized and fullscreen windows only recognize the title bar strip
//!   (`y < title_bar_height`, full width); everything else is client. The
//!   window already fills the screen, so resize regions are suppressed.
//! - For a normal window, a border frame of the effective resize thickness
//!   runs along all four sides. The four corner squares (border x border)
//!   take priority over the edge strips: a point on their shared boundary
//!   classifies as the corner.
//! - Non-resizable windows keep the title bar but lose all resize sections:
//!   border zones degrade to title bar or client by vertical position.
//!
//! Tie-break order: corners > edges > title bar > client.
//!
//! # Example
//!
//! ```
//! use chromeless_core::{frame_section, FrameMetrics, FrameSection, Point, Size, WindowState};
//!
//! let metrics = FrameMetrics::from_os(96, 8, 32);
//! let size = Size::new(800, 600);
//!
//! let section = frame_section(Point::new(4, 4), size, WindowState::Normal, &metrics, true);
//! assert_eq!(section, FrameSection::TopLeft);
//!
//! let section = frame_section(Point::new(400, 20), size, WindowState::Normal, &metrics, true);
//! assert_eq!(section, FrameSection::TitleBar);
//! ```

use crate::geometry::{Point, Size};
use crate::metrics::FrameMetrics;
use crate::session::WindowState;

/// Symbolic frame region a pointer position maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSection {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    /// The draggable title bar strip.
    TitleBar,
    /// Ordinary client area; events belong to the application.
    Client,
    /// Outside the window, or the window has no meaningful geometry.
    Nowhere,
}

/// Which window edges a resize drag adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResizeEdges {
    pub left: bool,
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
}

impl ResizeEdges {
    /// Whether any edge is active.
    pub fn is_any(&self) -> bool {
        self.left || self.top || self.right || self.bottom
    }

    /// Whether this is a corner (two perpendicular edges).
    pub fn is_corner(&self) -> bool {
        (self.left || self.right) && (self.top || self.bottom)
    }
}

impl FrameSection {
    /// The edges adjusted when dragging from this section, if it is a
    /// resize section.
    pub fn resize_edges(self) -> Option<ResizeEdges> {
        let edges = match self {
            FrameSection::TopLeft => ResizeEdges {
                left: true,
                top: true,
                ..Default::default()
            },
            FrameSection::Top => ResizeEdges {
                top: true,
                ..Default::default()
            },
            FrameSection::TopRight => ResizeEdges {
                top: true,
                right: true,
                ..Default::default()
            },
            FrameSection::Right => ResizeEdges {
                right: true,
                ..Default::default()
            },
            FrameSection::BottomRight => ResizeEdges {
                right: true,
                bottom: true,
                ..Default::default()
            },
            FrameSection::Bottom => ResizeEdges {
                bottom: true,
                ..Default::default()
            },
            FrameSection::BottomLeft => ResizeEdges {
                left: true,
                bottom: true,
                ..Default::default()
            },
            FrameSection::Left => ResizeEdges {
                left: true,
                ..Default::default()
            },
            _ => return None,
        };
        Some(edges)
    }

    /// Check if this section starts a resize drag.
    pub fn is_resize(self) -> bool {
        self.resize_edges().is_some()
    }

    /// Check if this section starts a move drag.
    pub fn is_draggable(self) -> bool {
        matches!(self, FrameSection::TitleBar)
    }
}

/// Map a window-local pointer position to its frame section.
///
/// `pos` and `size` are physical pixels with the origin at the window's
/// top-left. The effective resize border and title bar height come from
/// `metrics` (already merged with any configured overrides). Pure function:
/// no I/O, fully deterministic.
pub fn frame_section(
    pos: Point,
    size: Size,
    state: WindowState,
    metrics: &FrameMetrics,
    resizable: bool,
) -> FrameSection {
    if size.is_empty() {
        return FrameSection::Nowhere;
    }
    if pos.x < 0 || pos.y < 0 || pos.x >= size.width || pos.y >= size.height {
        return FrameSection::Nowhere;
    }

    let title_bar = metrics.title_bar_height.max(0);

    match state {
        WindowState::Minimized => return FrameSection::Nowhere,
        WindowState::Maximized | WindowState::Fullscreen => {
            // The OS already fills the screen; only the title bar strip is
            // recognized.
            return if pos.y < title_bar {
                FrameSection::TitleBar
            } else {
                FrameSection::Client
            };
        }
        WindowState::Normal => {}
    }

    let border = metrics.border_thickness.max(0);
    if resizable && border > 0 {
        let on_left = pos.x < border;
        let on_right = pos.x >= size.width - border;
        let on_top = pos.y < border;
        let on_bottom = pos.y >= size.height - border;

        // Corners win over edges, including on the shared boundary pixel.
        if on_top && on_left {
            return FrameSection::TopLeft;
        }
        if on_top && on_right {
            return FrameSection::TopRight;
        }
        if on_bottom && on_left {
            return FrameSection::BottomLeft;
        }
        if on_bottom && on_right {
            return FrameSection::BottomRight;
        }
        if on_top {
            return FrameSection::Top;
        }
        if on_bottom {
            return FrameSection::Bottom;
        }
        if on_left {
            return FrameSection::Left;
        }
        if on_right {
            return FrameSection::Right;
        }
    }

    if pos.y < title_bar {
        FrameSection::TitleBar
    } else {
        FrameSection::Client
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Size = Size::new(800, 600);

    fn metrics() -> FrameMetrics {
        FrameMetrics::from_os(96, 8, 32)
    }

    fn section(pos: (i32, i32), state: WindowState, resizable: bool) -> FrameSection {
        frame_section(Point::new(pos.0, pos.1), SIZE, state, &metrics(), resizable)
    }

    #[test]
    fn test_normal_window_sections() {
        // 800x600, border 8, title bar 32.
        assert_eq!(section((4, 4), WindowState::Normal, true), FrameSection::TopLeft);
        assert_eq!(section((400, 4), WindowState::Normal, true), FrameSection::Top);
        assert_eq!(section((796, 300), WindowState::Normal, true), FrameSection::Right);
        assert_eq!(section((400, 20), WindowState::Normal, true), FrameSection::TitleBar);
        assert_eq!(section((400, 100), WindowState::Normal, true), FrameSection::Client);
    }

    #[test]
    fn test_all_corners_and_edges() {
        assert_eq!(section((796, 3), WindowState::Normal, true), FrameSection::TopRight);
        assert_eq!(section((3, 597), WindowState::Normal, true), FrameSection::BottomLeft);
        assert_eq!(
            section((796, 597), WindowState::Normal, true),
            FrameSection::BottomRight
        );
        assert_eq!(section((400, 597), WindowState::Normal, true), FrameSection::Bottom);
        assert_eq!(section((3, 300), WindowState::Normal, true), FrameSection::Left);
    }

    #[test]
    fn test_corner_interior_points() {
        // Every point strictly inside the corner square classifies as the
        // corner.
        for x in 0..8 {
            for y in 0..8 {
                assert_eq!(
                    section((x, y), WindowState::Normal, true),
                    FrameSection::TopLeft,
                    "point ({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn test_corner_wins_over_edge_on_boundary() {
        // (7, 3) is in both the top strip and the left strip; the corner
        // takes it.
        assert_eq!(section((7, 3), WindowState::Normal, true), FrameSection::TopLeft);
        assert_eq!(section((3, 7), WindowState::Normal, true), FrameSection::TopLeft);
        // One pixel past the corner column is the plain edge again.
        assert_eq!(section((8, 3), WindowState::Normal, true), FrameSection::Top);
        assert_eq!(section((3, 8), WindowState::Normal, true), FrameSection::Left);
    }

    #[test]
    fn test_title_bar_threshold() {
        // y = 8 is the first row past the border, y = 31 the last title bar
        // row.
        assert_eq!(section((400, 8), WindowState::Normal, true), FrameSection::TitleBar);
        assert_eq!(section((400, 31), WindowState::Normal, true), FrameSection::TitleBar);
        assert_eq!(section((400, 32), WindowState::Normal, true), FrameSection::Client);
    }

    #[test]
    fn test_maximized_suppresses_resize_sections() {
        for &pos in &[(4, 4), (400, 4), (796, 300), (3, 597), (796, 597)] {
            let result = section(pos, WindowState::Maximized, true);
            assert!(!result.is_resize(), "point {pos:?} returned {result:?}");
        }
    }

    #[test]
    fn test_maximized_title_bar_threshold() {
        // The title bar strip still applies window-relative when maximized.
        assert_eq!(section((400, 20), WindowState::Maximized, true), FrameSection::TitleBar);
        assert_eq!(section((400, 40), WindowState::Maximized, true), FrameSection::Client);
        // Even inside what would be the corner square.
        assert_eq!(section((4, 4), WindowState::Maximized, true), FrameSection::TitleBar);
    }

    #[test]
    fn test_fullscreen_behaves_like_maximized() {
        assert_eq!(section((4, 4), WindowState::Fullscreen, true), FrameSection::TitleBar);
        assert_eq!(section((400, 300), WindowState::Fullscreen, true), FrameSection::Client);
        assert!(!section((796, 597), WindowState::Fullscreen, true).is_resize());
    }

    #[test]
    fn test_non_resizable_degrades_borders() {
        // Border zones fall back to title bar or client by vertical
        // position; never a resize section.
        assert_eq!(section((4, 4), WindowState::Normal, false), FrameSection::TitleBar);
        assert_eq!(section((400, 4), WindowState::Normal, false), FrameSection::TitleBar);
        assert_eq!(section((3, 300), WindowState::Normal, false), FrameSection::Client);
        assert_eq!(section((796, 597), WindowState::Normal, false), FrameSection::Client);
    }

    #[test]
    fn test_zero_border_disables_resize() {
        let metrics = FrameMetrics::from_os(96, 0, 32);
        let result = frame_section(Point::new(2, 300), SIZE, WindowState::Normal, &metrics, true);
        assert_eq!(result, FrameSection::Client);
    }

    #[test]
    fn test_out_of_bounds_is_nowhere() {
        assert_eq!(section((-1, 10), WindowState::Normal, true), FrameSection::Nowhere);
        assert_eq!(section((800, 10), WindowState::Normal, true), FrameSection::Nowhere);
        assert_eq!(section((10, 600), WindowState::Normal, true), FrameSection::Nowhere);
    }

    #[test]
    fn test_degenerate_size_is_nowhere() {
        let result = frame_section(
            Point::ZERO,
            Size::ZERO,
            WindowState::Normal,
            &metrics(),
            true,
        );
        assert_eq!(result, FrameSection::Nowhere);
    }

    #[test]
    fn test_minimized_is_nowhere() {
        assert_eq!(section((400, 20), WindowState::Minimized, true), FrameSection::Nowhere);
    }

    #[test]
    fn test_resize_edges_mapping() {
        let edges = FrameSection::TopLeft.resize_edges().unwrap();
        assert!(edges.left && edges.top && !edges.right && !edges.bottom);
        assert!(edges.is_corner());

        let edges = FrameSection::Bottom.resize_edges().unwrap();
        assert!(edges.bottom && !edges.is_corner());

        assert!(FrameSection::TitleBar.resize_edges().is_none());
        assert!(FrameSection::Client.resize_edges().is_none());
        assert!(FrameSection::TitleBar.is_draggable());
        assert!(!FrameSection::Left.is_draggable());
    }

    #[test]
    fn test_scaled_metrics_shift_thresholds() {
        // At 150% scale the border is 12 px and the title bar 48 px.
        let metrics = FrameMetrics::from_os(144, 12, 48);
        let size = Size::new(1200, 900);
        let result = frame_section(Point::new(10, 10), size, WindowState::Normal, &metrics, true);
        assert_eq!(result, FrameSection::TopLeft);
        let result = frame_section(Point::new(600, 40), size, WindowState::Normal, &metrics, true);
        assert_eq!(result, FrameSection::TitleBar);
        let result = frame_section(Point::new(600, 48), size, WindowState::Normal, &metrics, true);
        assert_eq!(result, FrameSection::Client);
    }
}
