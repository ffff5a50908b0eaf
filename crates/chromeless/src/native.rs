//! Platform frame control.
//!
//! This module owns everything that touches the OS below winit: probing
//! platform capabilities, reading native frame metrics, stripping and
//! restoring the native frame, and (on Windows) the window subclass that
//! answers non-client messages.
//!
//! On Windows the frame is stripped by rewriting the window styles while a
//! subclass procedure keeps answering `WM_NCCALCSIZE` and `WM_NCHITTEST`.
//! The styles keep `WS_THICKFRAME` and `WS_MAXIMIZEBOX`, which is what
//! preserves snap layouts, the system move/size loops and the DWM shadow.
//! On other platforms the same outcome is approximated through winit's
//! `set_decorations`, and all pointer interaction runs through the event
//! shim instead of a window procedure.

use std::sync::Arc;

use chromeless_core::{FrameMetrics, PlatformCapabilities, Rect};
use winit::window::Window;

use crate::error::ChromeResult;
use crate::registry::ManagedWindow;

/// Native frame state captured before stripping, for restoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameSnapshot {
    /// Whether winit considered the window decorated.
    pub decorated: bool,
    /// Win32 `GWL_STYLE` bits; zero on other platforms.
    pub style: i32,
    /// Win32 `GWL_EXSTYLE` bits; zero on other platforms.
    pub ex_style: i32,
    /// Window geometry at capture time: the outer rect on Windows,
    /// outer position plus inner size elsewhere. Restored together with
    /// the style bits.
    pub geometry: Rect,
}

/// Probe what the platform can do for chrome management.
pub(crate) fn probe_capabilities() -> PlatformCapabilities {
    #[cfg(target_os = "windows")]
    {
        win32::probe_capabilities()
    }
    #[cfg(not(target_os = "windows"))]
    {
        use chromeless_core::DpiTier;

        PlatformCapabilities {
            // winit reports a scale factor per window on every backend.
            dpi_tier: DpiTier::PerWindow,
            dpi_aware_metrics: false,
            composition_query: false,
            system_drag_loops: true,
        }
    }
}

/// Whether the compositor is currently active.
pub(crate) fn probe_composition() -> bool {
    #[cfg(target_os = "windows")]
    {
        win32::probe_composition()
    }
    #[cfg(not(target_os = "windows"))]
    {
        true
    }
}

/// Whether visual theming is currently active.
pub(crate) fn probe_theme() -> bool {
    #[cfg(target_os = "windows")]
    {
        win32::probe_theme()
    }
    #[cfg(not(target_os = "windows"))]
    {
        true
    }
}

/// Resolve the frame metrics for `window` at its current DPI.
pub(crate) fn frame_metrics(
    window: &Window,
    capabilities: &PlatformCapabilities,
) -> ChromeResult<FrameMetrics> {
    #[cfg(target_os = "windows")]
    {
        win32::frame_metrics(window, capabilities)
    }
    #[cfg(not(target_os = "windows"))]
    {
        use chromeless_core::BASE_DPI;

        let _ = capabilities;
        let dpi = (window.scale_factor() * f64::from(BASE_DPI)).round() as u32;
        Ok(FrameMetrics::with_scale(dpi.max(1)))
    }
}

/// Capture the native frame state of `window` before stripping.
pub(crate) fn capture_snapshot(window: &Window) -> ChromeResult<FrameSnapshot> {
    #[cfg(target_os = "windows")]
    {
        win32::capture_snapshot(window)
    }
    #[cfg(not(target_os = "windows"))]
    {
        // Wayland has no global position; capture falls back to the
        // origin there, and winit ignores the reposition on restore.
        let (x, y) = window.outer_position().map_or((0, 0), |pos| (pos.x, pos.y));
        let size = window.inner_size();
        Ok(FrameSnapshot {
            decorated: window.is_decorated(),
            style: 0,
            ex_style: 0,
            geometry: Rect::new(x, y, size.width as i32, size.height as i32),
        })
    }
}

/// Remove the native frame from `window` while keeping it resizable,
/// movable and snappable.
pub(crate) fn strip_frame(window: &Window) -> ChromeResult<()> {
    #[cfg(target_os = "windows")]
    {
        win32::strip_frame(window)
    }
    #[cfg(not(target_os = "windows"))]
    {
        window.set_decorations(false);
        Ok(())
    }
}

/// Restore the native frame captured in `snapshot`.
pub(crate) fn restore_frame(window: &Window, snapshot: &FrameSnapshot) -> ChromeResult<()> {
    #[cfg(target_os = "windows")]
    {
        win32::restore_frame(window, snapshot)
    }
    #[cfg(not(target_os = "windows"))]
    {
        use winit::dpi::{PhysicalPosition, PhysicalSize};

        window.set_decorations(snapshot.decorated);
        window.set_outer_position(PhysicalPosition::new(
            snapshot.geometry.origin.x,
            snapshot.geometry.origin.y,
        ));
        let _ = window.request_inner_size(PhysicalSize::new(
            snapshot.geometry.size.width.max(1) as u32,
            snapshot.geometry.size.height.max(1) as u32,
        ));
        Ok(())
    }
}

/// Re-apply the compositor shadow policy to `window` and recalculate its
/// frame. No-op on platforms whose compositor needs no help.
pub(crate) fn refresh_shadow(window: &Window, composition_enabled: bool) -> ChromeResult<()> {
    #[cfg(target_os = "windows")]
    {
        win32::refresh_shadow(window, composition_enabled)
    }
    #[cfg(not(target_os = "windows"))]
    {
        let _ = (window, composition_enabled);
        Ok(())
    }
}

/// Install the platform hook that answers non-client messages for the
/// managed window. Returns without effect on platforms that have none.
///
/// Must be called on the thread that created the window.
pub(crate) fn install_hook(managed: &Arc<ManagedWindow>) -> ChromeResult<()> {
    #[cfg(target_os = "windows")]
    {
        win32::install_hook(managed)
    }
    #[cfg(not(target_os = "windows"))]
    {
        let _ = managed;
        Ok(())
    }
}

/// Remove the platform hook installed by [`install_hook`].
pub(crate) fn remove_hook(managed: &ManagedWindow) -> ChromeResult<()> {
    #[cfg(target_os = "windows")]
    {
        win32::remove_hook(managed)
    }
    #[cfg(not(target_os = "windows"))]
    {
        let _ = managed;
        Ok(())
    }
}

#[cfg(target_os = "windows")]
mod win32 {
    use super::*;

    use std::ffi::c_void;
    use std::mem::size_of;

    use chromeless_core::{
        frame_section, scale_metric, DpiTier, FrameSection, GeometryAnswer, GeometryQuery, Point,
        Rect, Size, TaskbarEdge, WindowState,
    };
    use raw_window_handle::{HasWindowHandle, RawWindowHandle};
    use tracing::{debug, warn};
    use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, POINT, RECT, WPARAM};
    use windows::Win32::Graphics::Dwm::{
        DwmExtendFrameIntoClientArea, DwmIsCompositionEnabled, DwmSetWindowAttribute,
        DWMNCRP_ENABLED, DWMWA_NCRENDERING_POLICY,
    };
    use windows::Win32::Graphics::Gdi::{
        GetMonitorInfoW, InvalidateRect, MonitorFromWindow, MONITORINFO, MONITOR_DEFAULTTONEAREST,
    };
    use windows::Win32::UI::Controls::{IsThemeActive, MARGINS};
    use windows::Win32::UI::HiDpi::{
        GetDpiForMonitor, GetDpiForSystem, GetDpiForWindow, GetSystemMetricsForDpi,
        MDT_EFFECTIVE_DPI,
    };
    use windows::Win32::UI::Shell::{
        DefSubclassProc, RemoveWindowSubclass, SHAppBarMessage, SetWindowSubclass, ABE_BOTTOM,
        ABE_LEFT, ABE_RIGHT, ABE_TOP, ABM_GETAUTOHIDEBAR, ABM_GETSTATE, ABS_AUTOHIDE, APPBARDATA,
    };
    use windows::Win32::UI::WindowsAndMessaging::{
        GetSystemMetrics, GetWindowLongW, GetWindowRect, IsZoomed, SetWindowLongW, SetWindowPos,
        GWL_EXSTYLE, GWL_STYLE, HTBOTTOM, HTBOTTOMLEFT, HTBOTTOMRIGHT, HTCAPTION, HTCLIENT, HTLEFT,
        HTNOWHERE, HTRIGHT, HTTOP, HTTOPLEFT, HTTOPRIGHT, MINMAXINFO, NCCALCSIZE_PARAMS,
        SM_CXFRAME, SM_CXPADDEDBORDER, SM_CYCAPTION, SM_CYFRAME, SWP_FRAMECHANGED, SWP_NOACTIVATE,
        SWP_NOMOVE, SWP_NOOWNERZORDER, SWP_NOSIZE, SWP_NOZORDER, WM_DPICHANGED,
        WM_DWMCOMPOSITIONCHANGED, WM_GETMINMAXINFO, WM_NCACTIVATE, WM_NCCALCSIZE, WM_NCDESTROY,
        WM_NCHITTEST, WM_NCPAINT, WM_SETICON, WM_SETTEXT, WM_THEMECHANGED, WM_WINDOWPOSCHANGED,
        WS_CLIPCHILDREN, WS_CLIPSIBLINGS, WS_EX_APPWINDOW, WS_OVERLAPPEDWINDOW, WS_VISIBLE,
        WVR_REDRAW,
    };

    use crate::error::ChromeError;

    /// Identifies this crate's subclass among others on the same window.
    const CHROME_SUBCLASS_ID: usize = 0x6368726d;

    /// Undocumented messages the classic theme engine uses to draw the
    /// caption and frame.
    const WM_NCUAHDRAWCAPTION: u32 = 0x00AE;
    const WM_NCUAHDRAWFRAME: u32 = 0x00AF;

    fn get_hwnd(window: &Window) -> ChromeResult<HWND> {
        let handle = window.window_handle()?;

        match handle.as_raw() {
            RawWindowHandle::Win32(handle) => {
                Ok(HWND(handle.hwnd.get() as *mut std::ffi::c_void))
            }
            _ => Err(ChromeError::UnsupportedHandle),
        }
    }

    pub(super) fn probe_capabilities() -> PlatformCapabilities {
        // The windows crate links the per-window DPI API statically, so
        // every supported target has the full ladder available.
        PlatformCapabilities {
            dpi_tier: DpiTier::PerWindow,
            dpi_aware_metrics: true,
            composition_query: true,
            system_drag_loops: true,
        }
    }

    pub(super) fn probe_composition() -> bool {
        unsafe { DwmIsCompositionEnabled().map(|b| b.as_bool()).unwrap_or(false) }
    }

    pub(super) fn probe_theme() -> bool {
        unsafe { IsThemeActive().as_bool() }
    }

    pub(super) fn frame_metrics(
        window: &Window,
        capabilities: &PlatformCapabilities,
    ) -> ChromeResult<FrameMetrics> {
        let hwnd = get_hwnd(window)?;
        let dpi = window_dpi(hwnd, capabilities);
        Ok(os_frame_metrics(dpi, capabilities))
    }

    pub(super) fn capture_snapshot(window: &Window) -> ChromeResult<FrameSnapshot> {
        let hwnd = get_hwnd(window)?;
        let (style, ex_style) =
            unsafe { (GetWindowLongW(hwnd, GWL_STYLE), GetWindowLongW(hwnd, GWL_EXSTYLE)) };
        let mut window_rect = RECT::default();
        unsafe {
            GetWindowRect(hwnd, &mut window_rect)
                .map_err(|e| ChromeError::Platform(e.to_string()))?;
        }
        Ok(FrameSnapshot {
            decorated: window.is_decorated(),
            style,
            ex_style,
            geometry: rect_from(&window_rect),
        })
    }

    pub(super) fn strip_frame(window: &Window) -> ChromeResult<()> {
        let hwnd = get_hwnd(window)?;
        unsafe {
            // WS_THICKFRAME and WS_MAXIMIZEBOX (via WS_OVERLAPPEDWINDOW)
            // keep Snap, the size loops and the minimize/maximize
            // animations alive; the caption itself is neutralized by the
            // WM_NCCALCSIZE answer.
            SetWindowLongW(
                hwnd,
                GWL_STYLE,
                (WS_OVERLAPPEDWINDOW | WS_CLIPCHILDREN | WS_CLIPSIBLINGS).0 as i32,
            );
            SetWindowLongW(hwnd, GWL_EXSTYLE, WS_EX_APPWINDOW.0 as i32);
        }
        if probe_composition() {
            apply_shadow(hwnd);
        }
        refresh_frame(hwnd)
    }

    pub(super) fn restore_frame(window: &Window, snapshot: &FrameSnapshot) -> ChromeResult<()> {
        let hwnd = get_hwnd(window)?;
        unsafe {
            SetWindowLongW(hwnd, GWL_STYLE, snapshot.style);
            SetWindowLongW(hwnd, GWL_EXSTYLE, snapshot.ex_style);
            // Zero margins hand the non-client area back to the system.
            let margins = MARGINS::default();
            if let Err(error) = DwmExtendFrameIntoClientArea(hwnd, &margins) {
                warn!(target: "chromeless::native", %error, "failed to reset frame extension");
            }
            // The captured geometry goes back in the same call that
            // recomputes the frame.
            SetWindowPos(
                hwnd,
                None,
                snapshot.geometry.origin.x,
                snapshot.geometry.origin.y,
                snapshot.geometry.size.width,
                snapshot.geometry.size.height,
                SWP_FRAMECHANGED | SWP_NOACTIVATE | SWP_NOZORDER | SWP_NOOWNERZORDER,
            )
            .map_err(|e| ChromeError::Platform(e.to_string()))
        }
    }

    pub(super) fn install_hook(managed: &Arc<ManagedWindow>) -> ChromeResult<()> {
        let hwnd = get_hwnd(managed.window())?;
        let data = Box::into_raw(Box::new(Arc::clone(managed))) as usize;
        let installed =
            unsafe { SetWindowSubclass(hwnd, Some(chrome_subclass_proc), CHROME_SUBCLASS_ID, data) };
        if !installed.as_bool() {
            unsafe { drop(Box::from_raw(data as *mut Arc<ManagedWindow>)) };
            return Err(ChromeError::Platform("SetWindowSubclass failed".into()));
        }
        managed.set_hook_data(data);
        debug!(target: "chromeless::native", hwnd = ?hwnd.0, "subclass installed");
        Ok(())
    }

    pub(super) fn remove_hook(managed: &ManagedWindow) -> ChromeResult<()> {
        let hwnd = get_hwnd(managed.window())?;
        let data = managed.take_hook_data();
        if data == 0 {
            // The window was destroyed and WM_NCDESTROY already cleaned up.
            return Ok(());
        }
        unsafe {
            let _ = RemoveWindowSubclass(hwnd, Some(chrome_subclass_proc), CHROME_SUBCLASS_ID);
            drop(Box::from_raw(data as *mut Arc<ManagedWindow>));
        }
        debug!(target: "chromeless::native", hwnd = ?hwnd.0, "subclass removed");
        Ok(())
    }

    // =========================================================================
    // Subclass Procedure
    // =========================================================================

    /// Answers the non-client messages that shape the frameless window.
    ///
    /// `ref_data` is a `Box<Arc<ManagedWindow>>` raised to a pointer at
    /// install time. It stays valid until the subclass is removed; both
    /// removal paths (explicit unmanage and `WM_NCDESTROY`) run on the
    /// window's thread and each skips the release when the other already
    /// took the pointer.
    unsafe extern "system" fn chrome_subclass_proc(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
        _subclass_id: usize,
        ref_data: usize,
    ) -> LRESULT {
        unsafe {
            if ref_data == 0 {
                return DefSubclassProc(hwnd, msg, wparam, lparam);
            }
            let managed = &*(ref_data as *const Arc<ManagedWindow>);

            match msg {
                // Claim the whole window rectangle as client area. For a
                // maximized window the client area is pinned to the work
                // area instead, since the OS intentionally oversizes the
                // window to push the (now absent) frame off screen.
                WM_NCCALCSIZE => {
                    if wparam.0 == 0 {
                        return LRESULT(0);
                    }
                    let params = &mut *(lparam.0 as *mut NCCALCSIZE_PARAMS);
                    let Some((work_area, monitor)) = monitor_rects(hwnd) else {
                        return LRESULT(0);
                    };
                    let maximized = IsZoomed(hwnd).as_bool();
                    let auto_hide_taskbar = if maximized {
                        auto_hide_taskbar_edge(rect_into(monitor))
                    } else {
                        None
                    };
                    let query = GeometryQuery::ClientArea {
                        proposed: rect_from(&params.rgrc[0]),
                        maximized,
                        work_area,
                        monitor,
                        auto_hide_taskbar,
                    };
                    if let GeometryAnswer::ClientArea(client) = query.answer() {
                        params.rgrc[0] = rect_into(client);
                    }
                    LRESULT(WVR_REDRAW as isize)
                }

                // Classic theme caption/frame painting; nothing to draw.
                WM_NCUAHDRAWCAPTION | WM_NCUAHDRAWFRAME => LRESULT(0),

                // Without composition the default handler would paint the
                // old frame into our client area.
                WM_NCPAINT => {
                    if managed.composition_enabled() {
                        DefSubclassProc(hwnd, msg, wparam, lparam)
                    } else {
                        LRESULT(0)
                    }
                }

                // lParam -1 keeps the default handler from redrawing the
                // caption on activation changes.
                WM_NCACTIVATE => DefSubclassProc(hwnd, msg, wparam, LPARAM(-1)),

                WM_NCHITTEST => {
                    let x = (lparam.0 & 0xffff) as i16 as i32;
                    let y = ((lparam.0 >> 16) & 0xffff) as i16 as i32;
                    let mut window_rect = RECT::default();
                    if GetWindowRect(hwnd, &mut window_rect).is_err() {
                        return LRESULT(HTNOWHERE as isize);
                    }
                    let local = Point::new(x - window_rect.left, y - window_rect.top);
                    let size = Size::new(
                        window_rect.right - window_rect.left,
                        window_rect.bottom - window_rect.top,
                    );
                    let state = window_state(hwnd, &window_rect);
                    let dpi = window_dpi(hwnd, managed.capabilities());
                    let (resizable, border_override, title_override, exempt) = {
                        let config = managed.config();
                        (
                            config.is_resizable(),
                            config.border_thickness(),
                            config.title_bar_height(),
                            config.exempt_regions_for_dpi(dpi),
                        )
                    };
                    let metrics = os_frame_metrics(dpi, managed.capabilities())
                        .apply_overrides(border_override, title_override);
                    let mut section = frame_section(local, size, state, &metrics, resizable);
                    if section == FrameSection::TitleBar
                        && exempt.iter().any(|region| region.contains(local))
                    {
                        section = FrameSection::Client;
                    }
                    LRESULT(hit_test_code(section) as isize)
                }

                // Let the default handler fill the minimum track size from
                // winit's bookkeeping, then bound maximization to the work
                // area so the window does not cover the taskbar.
                WM_GETMINMAXINFO => {
                    let result = DefSubclassProc(hwnd, msg, wparam, lparam);
                    if let Some((work_area, monitor)) = monitor_rects(hwnd) {
                        let query = GeometryQuery::MaxBounds { work_area, monitor };
                        if let GeometryAnswer::MaxBounds(bounds) = query.answer() {
                            let info = &mut *(lparam.0 as *mut MINMAXINFO);
                            info.ptMaxPosition = POINT {
                                x: bounds.position.x,
                                y: bounds.position.y,
                            };
                            info.ptMaxSize = POINT {
                                x: bounds.size.width,
                                y: bounds.size.height,
                            };
                            info.ptMaxTrackSize = POINT {
                                x: bounds.track_size.width,
                                y: bounds.track_size.height,
                            };
                        }
                    }
                    result
                }

                // On the classic theme without composition the default
                // handler repaints the caption from these messages. Hide
                // the window from it for the duration of the call.
                WM_SETICON | WM_SETTEXT => {
                    if managed.composition_enabled() || managed.theme_active() {
                        return DefSubclassProc(hwnd, msg, wparam, lparam);
                    }
                    let style = GetWindowLongW(hwnd, GWL_STYLE);
                    SetWindowLongW(hwnd, GWL_STYLE, style & !(WS_VISIBLE.0 as i32));
                    let result = DefSubclassProc(hwnd, msg, wparam, lparam);
                    SetWindowLongW(hwnd, GWL_STYLE, style);
                    result
                }

                WM_DWMCOMPOSITIONCHANGED => {
                    let enabled = probe_composition();
                    managed.set_composition_enabled(enabled);
                    debug!(target: "chromeless::native", enabled, "composition changed");
                    if enabled {
                        apply_shadow(hwnd);
                    }
                    let _ = refresh_frame(hwnd);
                    managed.window().request_redraw();
                    DefSubclassProc(hwnd, msg, wparam, lparam)
                }

                WM_THEMECHANGED => {
                    managed.set_theme_active(probe_theme());
                    DefSubclassProc(hwnd, msg, wparam, lparam)
                }

                // Frame changes leave stale pixels behind; repaint.
                WM_WINDOWPOSCHANGED => {
                    let _ = InvalidateRect(hwnd, None, true);
                    DefSubclassProc(hwnd, msg, wparam, lparam)
                }

                // Frame metrics derive from the DPI. Recalculate the frame
                // and let winit apply the suggested rectangle.
                WM_DPICHANGED => {
                    let _ = refresh_frame(hwnd);
                    DefSubclassProc(hwnd, msg, wparam, lparam)
                }

                WM_NCDESTROY => {
                    let result = DefSubclassProc(hwnd, msg, wparam, lparam);
                    let _ = RemoveWindowSubclass(hwnd, Some(chrome_subclass_proc), CHROME_SUBCLASS_ID);
                    if managed.take_hook_data() != 0 {
                        drop(Box::from_raw(ref_data as *mut Arc<ManagedWindow>));
                    }
                    result
                }

                _ => DefSubclassProc(hwnd, msg, wparam, lparam),
            }
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn hit_test_code(section: FrameSection) -> u32 {
        match section {
            FrameSection::TopLeft => HTTOPLEFT,
            FrameSection::Top => HTTOP,
            FrameSection::TopRight => HTTOPRIGHT,
            FrameSection::Right => HTRIGHT,
            FrameSection::BottomRight => HTBOTTOMRIGHT,
            FrameSection::Bottom => HTBOTTOM,
            FrameSection::BottomLeft => HTBOTTOMLEFT,
            FrameSection::Left => HTLEFT,
            FrameSection::TitleBar => HTCAPTION,
            FrameSection::Client => HTCLIENT,
            FrameSection::Nowhere => HTNOWHERE,
        }
    }

    fn rect_from(rect: &RECT) -> Rect {
        Rect::new(
            rect.left,
            rect.top,
            rect.right - rect.left,
            rect.bottom - rect.top,
        )
    }

    fn rect_into(rect: Rect) -> RECT {
        RECT {
            left: rect.left(),
            top: rect.top(),
            right: rect.right(),
            bottom: rect.bottom(),
        }
    }

    /// Work area and full bounds of the window's monitor.
    fn monitor_rects(hwnd: HWND) -> Option<(Rect, Rect)> {
        unsafe {
            let monitor = MonitorFromWindow(hwnd, MONITOR_DEFAULTTONEAREST);
            if monitor.is_invalid() {
                return None;
            }
            let mut info = MONITORINFO {
                cbSize: size_of::<MONITORINFO>() as u32,
                ..Default::default()
            };
            if !GetMonitorInfoW(monitor, &mut info).as_bool() {
                return None;
            }
            Some((rect_from(&info.rcWork), rect_from(&info.rcMonitor)))
        }
    }

    fn window_state(hwnd: HWND, window_rect: &RECT) -> WindowState {
        if unsafe { IsZoomed(hwnd) }.as_bool() {
            return WindowState::Maximized;
        }
        // A borderless window covering the whole monitor is fullscreen in
        // every way that matters for hit testing.
        if let Some((_, monitor)) = monitor_rects(hwnd) {
            if rect_from(window_rect) == monitor {
                return WindowState::Fullscreen;
            }
        }
        WindowState::Normal
    }

    /// Effective DPI for the window, falling back tier by tier.
    fn window_dpi(hwnd: HWND, capabilities: &PlatformCapabilities) -> u32 {
        use chromeless_core::BASE_DPI;

        if capabilities.has_dpi_query() {
            let dpi = unsafe { GetDpiForWindow(hwnd) };
            if dpi != 0 {
                return dpi;
            }
            let monitor = unsafe { MonitorFromWindow(hwnd, MONITOR_DEFAULTTONEAREST) };
            if !monitor.is_invalid() {
                let mut dpi_x = 0u32;
                let mut dpi_y = 0u32;
                let queried = unsafe {
                    GetDpiForMonitor(monitor, MDT_EFFECTIVE_DPI, &mut dpi_x, &mut dpi_y)
                };
                if queried.is_ok() && dpi_x != 0 {
                    return dpi_x;
                }
            }
            let dpi = unsafe { GetDpiForSystem() };
            if dpi != 0 {
                return dpi;
            }
        }
        BASE_DPI
    }

    /// Frame metrics as the OS resolves them at `dpi`.
    fn os_frame_metrics(dpi: u32, capabilities: &PlatformCapabilities) -> FrameMetrics {
        let (border, border_y, caption) = if capabilities.dpi_aware_metrics {
            unsafe {
                (
                    GetSystemMetricsForDpi(SM_CXFRAME, dpi)
                        + GetSystemMetricsForDpi(SM_CXPADDEDBORDER, dpi),
                    GetSystemMetricsForDpi(SM_CYFRAME, dpi)
                        + GetSystemMetricsForDpi(SM_CXPADDEDBORDER, dpi),
                    GetSystemMetricsForDpi(SM_CYCAPTION, dpi),
                )
            }
        } else {
            unsafe {
                (
                    scale_metric(
                        GetSystemMetrics(SM_CXFRAME) + GetSystemMetrics(SM_CXPADDEDBORDER),
                        dpi,
                    ),
                    scale_metric(
                        GetSystemMetrics(SM_CYFRAME) + GetSystemMetrics(SM_CXPADDEDBORDER),
                        dpi,
                    ),
                    scale_metric(GetSystemMetrics(SM_CYCAPTION), dpi),
                )
            }
        };
        FrameMetrics::from_os(dpi, border, border_y + caption)
    }

    /// Edge of an auto-hidden taskbar on the given monitor, if any.
    fn auto_hide_taskbar_edge(monitor: RECT) -> Option<TaskbarEdge> {
        unsafe {
            let mut state = APPBARDATA {
                cbSize: size_of::<APPBARDATA>() as u32,
                ..Default::default()
            };
            if SHAppBarMessage(ABM_GETSTATE, &mut state) as u32 & ABS_AUTOHIDE == 0 {
                return None;
            }
            let edges = [
                (ABE_BOTTOM, TaskbarEdge::Bottom),
                (ABE_TOP, TaskbarEdge::Top),
                (ABE_LEFT, TaskbarEdge::Left),
                (ABE_RIGHT, TaskbarEdge::Right),
            ];
            for (abe, edge) in edges {
                let mut data = APPBARDATA {
                    cbSize: size_of::<APPBARDATA>() as u32,
                    uEdge: abe,
                    rc: monitor,
                    ..Default::default()
                };
                if SHAppBarMessage(ABM_GETAUTOHIDEBAR, &mut data) != 0 {
                    return Some(edge);
                }
            }
        }
        None
    }

    pub(super) fn refresh_shadow(window: &Window, composition_enabled: bool) -> ChromeResult<()> {
        let hwnd = get_hwnd(window)?;
        if composition_enabled {
            apply_shadow(hwnd);
        }
        refresh_frame(hwnd)
    }

    /// Non-client rendering policy plus sheet-of-glass margins: the pair
    /// that brings the DWM shadow back for a window with no frame. Only
    /// meaningful while composition is enabled.
    fn apply_shadow(hwnd: HWND) {
        let policy: i32 = DWMNCRP_ENABLED.0;
        unsafe {
            let _ = DwmSetWindowAttribute(
                hwnd,
                DWMWA_NCRENDERING_POLICY,
                &policy as *const i32 as *const c_void,
                size_of::<i32>() as u32,
            );
        }
        extend_frame(hwnd);
    }

    /// DWM shadow for a window with no non-client area.
    fn extend_frame(hwnd: HWND) {
        let margins = MARGINS {
            cxLeftWidth: -1,
            cxRightWidth: -1,
            cyTopHeight: -1,
            cyBottomHeight: -1,
        };
        unsafe {
            if let Err(error) = DwmExtendFrameIntoClientArea(hwnd, &margins) {
                warn!(target: "chromeless::native", %error, "failed to extend frame into client area");
            }
        }
    }

    /// Force the frame to be recalculated without moving the window.
    fn refresh_frame(hwnd: HWND) -> ChromeResult<()> {
        unsafe {
            SetWindowPos(
                hwnd,
                None,
                0,
                0,
                0,
                0,
                SWP_FRAMECHANGED
                    | SWP_NOACTIVATE
                    | SWP_NOMOVE
                    | SWP_NOSIZE
                    | SWP_NOZORDER
                    | SWP_NOOWNERZORDER,
            )
            .map_err(|e| ChromeError::Platform(e.to_string()))
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probed_capabilities_support_drag_loops() {
        let capabilities = probe_capabilities();
        assert!(capabilities.system_drag_loops);
        assert!(capabilities.has_dpi_query());
    }

    #[test]
    #[cfg(not(target_os = "windows"))]
    fn test_portable_probe_is_not_the_fallback() {
        use chromeless_core::DpiTier;

        // winit supplies per-window scale factors and native drag loops
        // on every backend; only the Win32 metric and compositor queries
        // stay off.
        let capabilities = probe_capabilities();
        assert_ne!(capabilities, PlatformCapabilities::FALLBACK);
        assert_eq!(capabilities.dpi_tier, DpiTier::PerWindow);
        assert!(!capabilities.dpi_aware_metrics);
        assert!(!capabilities.composition_query);
        assert!(capabilities.system_drag_loops);
    }

    #[test]
    fn test_snapshot_default_is_undecorated() {
        let snapshot = FrameSnapshot::default();
        assert!(!snapshot.decorated);
        assert_eq!(snapshot.style, 0);
    }
}
