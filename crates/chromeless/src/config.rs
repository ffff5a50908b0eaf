//! Per-window chrome configuration.
//!
//! [`ChromeConfig`] describes how a managed window behaves once its native
//! frame is stripped: how thick the invisible resize borders are, how tall
//! the draggable title bar strip is, which regions inside that strip belong
//! to the application, and how drags are carried out.
//!
//! All dimensions are logical pixels at 96 DPI. They are scaled to the
//! window's physical DPI when hit testing runs, so a configuration stays
//! valid when the window moves between monitors.
//!
//! # Usage
//!
//! ```
//! use chromeless::ChromeConfig;
//! use chromeless_core::Rect;
//!
//! let config = ChromeConfig::new()
//!     .with_title_bar_height(40)
//!     .with_exempt_region(Rect::new(500, 0, 120, 40));
//!
//! assert_eq!(config.title_bar_height(), Some(40));
//! assert!(config.is_resizable());
//! ```

use std::time::Duration;

use chromeless_core::{scale_metric, Point, Rect, Size};

/// Default minimum window size in logical pixels.
///
/// Matches the platform minimum track size at 96 DPI.
pub const DEFAULT_MIN_SIZE: Size = Size {
    width: 112,
    height: 27,
};

/// Default double click interval.
pub const DEFAULT_DOUBLE_CLICK_INTERVAL: Duration = Duration::from_millis(500);

/// Default double click slop in logical pixels.
///
/// Two presses further apart than this on either axis count as separate
/// clicks regardless of timing.
pub const DEFAULT_DOUBLE_CLICK_SLOP: i32 = 4;

/// Configuration for a managed frameless window.
///
/// # Defaults
///
/// - Border thickness and title bar height: resolved from the platform
/// - Resizable: true
/// - Minimum size: 112x27 logical pixels
/// - No exempt regions
/// - System drag loops: enabled where available
#[derive(Debug, Clone)]
pub struct ChromeConfig {
    /// Resize border thickness override in logical pixels.
    ///
    /// When unset, the platform's frame border thickness is used. An
    /// override can narrow the resize grip but never widens it past where
    /// a native frame would have been.
    border_thickness: Option<i32>,

    /// Title bar height override in logical pixels.
    ///
    /// When unset, the platform's caption height (including the top
    /// border) is used.
    title_bar_height: Option<i32>,

    /// Whether edge and corner resizing is recognized.
    resizable: bool,

    /// Minimum window size enforced during interactive resizing, in
    /// logical pixels.
    min_size: Size,

    /// Window-local regions carved out of the title bar strip.
    ///
    /// Pointer input inside these regions reaches the application instead
    /// of dragging the window. Used for custom caption buttons, tab strips
    /// and search boxes drawn in the title bar.
    exempt_regions: Vec<Rect>,

    /// Whether drags hand off to the platform's modal move/size loop.
    ///
    /// When disabled, or when the platform has no such loop, the window is
    /// moved and resized manually from pointer deltas.
    use_system_drag: bool,

    /// Maximum delay between two presses that form a double click.
    double_click_interval: Duration,

    /// Maximum pointer travel between two presses that form a double
    /// click, in logical pixels.
    double_click_slop: i32,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ChromeConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self {
            border_thickness: None,
            title_bar_height: None,
            resizable: true,
            min_size: DEFAULT_MIN_SIZE,
            exempt_regions: Vec::new(),
            use_system_drag: true,
            double_click_interval: DEFAULT_DOUBLE_CLICK_INTERVAL,
            double_click_slop: DEFAULT_DOUBLE_CLICK_SLOP,
        }
    }

    /// Create a configuration for a window that must not be resized.
    ///
    /// The title bar still drags and double clicks still toggle maximize;
    /// only the resize borders are disabled.
    pub fn fixed_size() -> Self {
        Self {
            resizable: false,
            ..Self::new()
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Override the resize border thickness in logical pixels.
    pub fn with_border_thickness(mut self, thickness: i32) -> Self {
        self.border_thickness = Some(thickness.max(0));
        self
    }

    /// Override the title bar height in logical pixels.
    pub fn with_title_bar_height(mut self, height: i32) -> Self {
        self.title_bar_height = Some(height.max(0));
        self
    }

    /// Enable or disable edge resizing.
    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Set the minimum window size in logical pixels.
    pub fn with_min_size(mut self, size: Size) -> Self {
        self.min_size = size.max(Size::new(1, 1));
        self
    }

    /// Add a region carved out of the title bar strip.
    pub fn with_exempt_region(mut self, region: Rect) -> Self {
        self.exempt_regions.push(region);
        self
    }

    /// Enable or disable the platform's modal move/size loop.
    pub fn with_system_drag(mut self, enabled: bool) -> Self {
        self.use_system_drag = enabled;
        self
    }

    /// Set the double click interval.
    pub fn with_double_click_interval(mut self, interval: Duration) -> Self {
        self.double_click_interval = interval;
        self
    }

    /// Set the double click slop in logical pixels.
    pub fn with_double_click_slop(mut self, slop: i32) -> Self {
        self.double_click_slop = slop.max(0);
        self
    }

    // =========================================================================
    // Setters (for runtime modification)
    // =========================================================================

    /// Set or clear the resize border thickness override.
    pub fn set_border_thickness(&mut self, thickness: Option<i32>) {
        self.border_thickness = thickness.map(|t| t.max(0));
    }

    /// Set or clear the title bar height override.
    pub fn set_title_bar_height(&mut self, height: Option<i32>) {
        self.title_bar_height = height.map(|h| h.max(0));
    }

    /// Enable or disable edge resizing.
    pub fn set_resizable(&mut self, resizable: bool) {
        self.resizable = resizable;
    }

    /// Set the minimum window size.
    pub fn set_min_size(&mut self, size: Size) {
        self.min_size = size.max(Size::new(1, 1));
    }

    /// Add an exempt region.
    pub fn add_exempt_region(&mut self, region: Rect) {
        self.exempt_regions.push(region);
    }

    /// Clear all exempt regions.
    pub fn clear_exempt_regions(&mut self) {
        self.exempt_regions.clear();
    }

    /// Enable or disable the platform's modal move/size loop.
    pub fn set_system_drag(&mut self, enabled: bool) {
        self.use_system_drag = enabled;
    }

    // =========================================================================
    // Getters
    // =========================================================================

    /// Get the resize border thickness override, if any.
    pub fn border_thickness(&self) -> Option<i32> {
        self.border_thickness
    }

    /// Get the title bar height override, if any.
    pub fn title_bar_height(&self) -> Option<i32> {
        self.title_bar_height
    }

    /// Check if edge resizing is enabled.
    pub fn is_resizable(&self) -> bool {
        self.resizable
    }

    /// Get the minimum window size in logical pixels.
    pub fn min_size(&self) -> Size {
        self.min_size
    }

    /// Get the exempt regions in logical pixels.
    pub fn exempt_regions(&self) -> &[Rect] {
        &self.exempt_regions
    }

    /// Check if the platform's modal move/size loop is used.
    pub fn uses_system_drag(&self) -> bool {
        self.use_system_drag
    }

    /// Get the double click interval.
    pub fn double_click_interval(&self) -> Duration {
        self.double_click_interval
    }

    /// Get the double click slop in logical pixels.
    pub fn double_click_slop(&self) -> i32 {
        self.double_click_slop
    }

    // =========================================================================
    // DPI Scaling
    // =========================================================================

    /// The minimum size scaled to physical pixels at `dpi`.
    pub fn min_size_for_dpi(&self, dpi: u32) -> Size {
        Size::new(
            scale_metric(self.min_size.width, dpi),
            scale_metric(self.min_size.height, dpi),
        )
        .max(Size::new(1, 1))
    }

    /// The exempt regions scaled to physical pixels at `dpi`.
    pub fn exempt_regions_for_dpi(&self, dpi: u32) -> Vec<Rect> {
        self.exempt_regions
            .iter()
            .map(|region| {
                Rect::new(
                    scale_metric(region.origin.x, dpi),
                    scale_metric(region.origin.y, dpi),
                    scale_metric(region.size.width, dpi),
                    scale_metric(region.size.height, dpi),
                )
            })
            .collect()
    }

    /// The double click slop scaled to physical pixels at `dpi`.
    pub fn double_click_slop_for_dpi(&self, dpi: u32) -> i32 {
        scale_metric(self.double_click_slop, dpi)
    }

    /// Whether `point` (physical pixels) lies in an exempt region at `dpi`.
    pub fn is_exempt(&self, point: Point, dpi: u32) -> bool {
        self.exempt_regions_for_dpi(dpi)
            .iter()
            .any(|region| region.contains(point))
    }
}
