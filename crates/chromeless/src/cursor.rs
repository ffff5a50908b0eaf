//! Resize cursor feedback.
//!
//! A native frame changes the pointer to a double-headed arrow while it
//! hovers a resize border. With the frame stripped that feedback has to be
//! reproduced here: [`resize_cursor`] maps a hit-tested frame section to
//! the cursor the platform would have shown, and the apply helpers push it
//! through winit.

use chromeless_core::FrameSection;
use cursor_icon::CursorIcon;
use winit::window::{Cursor, Window};

/// The cursor a native frame would show over `section`.
///
/// Returns `None` for sections that keep the default arrow (the title bar,
/// the client area and points outside the window).
pub fn resize_cursor(section: FrameSection) -> Option<CursorIcon> {
    match section {
        FrameSection::Left | FrameSection::Right => Some(CursorIcon::EwResize),
        FrameSection::Top | FrameSection::Bottom => Some(CursorIcon::NsResize),
        FrameSection::TopLeft | FrameSection::BottomRight => Some(CursorIcon::NwseResize),
        FrameSection::TopRight | FrameSection::BottomLeft => Some(CursorIcon::NeswResize),
        FrameSection::TitleBar | FrameSection::Client | FrameSection::Nowhere => None,
    }
}

/// Show the cursor for `section` on `window`.
///
/// Sections without a resize cursor fall back to the default arrow, so
/// calling this for every hover position is safe.
pub fn apply_resize_cursor(window: &Window, section: FrameSection) {
    let icon = resize_cursor(section).unwrap_or(CursorIcon::Default);
    window.set_cursor(Cursor::Icon(icon));
}

/// Restore the default arrow cursor on `window`.
pub fn clear_cursor(window: &Window) {
    window.set_cursor(Cursor::Icon(CursorIcon::Default));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_edges_use_ew_cursor() {
        assert_eq!(resize_cursor(FrameSection::Left), Some(CursorIcon::EwResize));
        assert_eq!(
            resize_cursor(FrameSection::Right),
            Some(CursorIcon::EwResize)
        );
    }

    #[test]
    fn test_vertical_edges_use_ns_cursor() {
        assert_eq!(resize_cursor(FrameSection::Top), Some(CursorIcon::NsResize));
        assert_eq!(
            resize_cursor(FrameSection::Bottom),
            Some(CursorIcon::NsResize)
        );
    }

    #[test]
    fn test_corners_use_diagonal_cursors() {
        assert_eq!(
            resize_cursor(FrameSection::TopLeft),
            Some(CursorIcon::NwseResize)
        );
        assert_eq!(
            resize_cursor(FrameSection::BottomRight),
            Some(CursorIcon::NwseResize)
        );
        assert_eq!(
            resize_cursor(FrameSection::TopRight),
            Some(CursorIcon::NeswResize)
        );
        assert_eq!(
            resize_cursor(FrameSection::BottomLeft),
            Some(CursorIcon::NeswResize)
        );
    }

    #[test]
    fn test_non_resize_sections_have_no_cursor() {
        assert_eq!(resize_cursor(FrameSection::TitleBar), None);
        assert_eq!(resize_cursor(FrameSection::Client), None);
        assert_eq!(resize_cursor(FrameSection::Nowhere), None);
    }
}
