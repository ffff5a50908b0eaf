//! DPI-aware frame metrics.
//!
//! [`FrameMetrics`] carries the resolved border thickness and title bar
//! height for a window at its current DPI. Metrics are derived on demand by
//! the host and are never cached across DPI or composition changes: two
//! resolutions between change notifications return identical values.
//!
//! Configured overrides are expressed at the 96 DPI baseline and scaled
//! before merging. A border override never widens the frame past what the
//! OS reports: the effective border is the minimum of the scaled override
//! and the OS default.

/// The DPI all logical metric values are expressed at.
pub const BASE_DPI: u32 = 96;

/// Default resize border thickness at [`BASE_DPI`], in pixels.
pub const DEFAULT_BORDER_THICKNESS: i32 = 8;

/// Default title bar height at [`BASE_DPI`], in pixels.
pub const DEFAULT_TITLE_BAR_HEIGHT: i32 = 32;

/// Scale a logical (96 DPI) metric to a target DPI.
#[inline]
pub fn scale_metric(value: i32, dpi: u32) -> i32 {
    (value as f64 * dpi as f64 / BASE_DPI as f64).round() as i32
}

/// Resolved frame metrics for a window at a specific DPI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameMetrics {
    /// The DPI the metrics were resolved at.
    pub dpi: u32,
    /// Scale factor relative to [`BASE_DPI`].
    pub scale_factor: f64,
    /// Resize border thickness in physical pixels.
    pub border_thickness: i32,
    /// Title bar height in physical pixels, measured from the window top.
    pub title_bar_height: i32,
}

impl FrameMetrics {
    /// Fallback metrics: the 96 DPI defaults scaled to `dpi`.
    ///
    /// Used when no OS metric source is available.
    pub fn with_scale(dpi: u32) -> Self {
        let dpi = if dpi == 0 { BASE_DPI } else { dpi };
        Self {
            dpi,
            scale_factor: dpi as f64 / BASE_DPI as f64,
            border_thickness: scale_metric(DEFAULT_BORDER_THICKNESS, dpi),
            title_bar_height: scale_metric(DEFAULT_TITLE_BAR_HEIGHT, dpi),
        }
    }

    /// Metrics from OS-reported values, already in physical pixels at `dpi`.
    pub fn from_os(dpi: u32, border_thickness: i32, title_bar_height: i32) -> Self {
        let dpi = if dpi == 0 { BASE_DPI } else { dpi };
        Self {
            dpi,
            scale_factor: dpi as f64 / BASE_DPI as f64,
            border_thickness: border_thickness.max(0),
            title_bar_height: title_bar_height.max(0),
        }
    }

    /// Merge configured overrides into the resolved metrics.
    ///
    /// `border_override` and `title_bar_override` are logical 96 DPI values.
    /// The border override is clamped to the OS default (it can shrink the
    /// grab area, never extend it past the frame); the title bar override
    /// replaces the OS value outright.
    pub fn apply_overrides(
        mut self,
        border_override: Option<i32>,
        title_bar_override: Option<i32>,
    ) -> Self {
        if let Some(border) = border_override {
            let scaled = scale_metric(border.max(0), self.dpi);
            self.border_thickness = scaled.min(self.border_thickness);
        }
        if let Some(title_bar) = title_bar_override {
            self.title_bar_height = scale_metric(title_bar.max(0), self.dpi);
        }
        self
    }
}

impl Default for FrameMetrics {
    fn default() -> Self {
        Self::with_scale(BASE_DPI)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_dpi_metrics() {
        let metrics = FrameMetrics::with_scale(96);
        assert_eq!(metrics.border_thickness, 8);
        assert_eq!(metrics.title_bar_height, 32);
        assert_eq!(metrics.scale_factor, 1.0);
    }

    #[test]
    fn test_scaled_metrics() {
        let metrics = FrameMetrics::with_scale(144);
        assert_eq!(metrics.scale_factor, 1.5);
        assert_eq!(metrics.border_thickness, 12);
        assert_eq!(metrics.title_bar_height, 48);

        let metrics = FrameMetrics::with_scale(120);
        assert_eq!(metrics.border_thickness, 10);
        assert_eq!(metrics.title_bar_height, 40);
    }

    #[test]
    fn test_zero_dpi_falls_back_to_base() {
        let metrics = FrameMetrics::with_scale(0);
        assert_eq!(metrics.dpi, BASE_DPI);
        assert_eq!(metrics.border_thickness, 8);
    }

    #[test]
    fn test_border_override_is_clamped_to_os_default() {
        let metrics = FrameMetrics::from_os(96, 8, 31);

        // A wider override cannot extend past the OS frame.
        let merged = metrics.apply_overrides(Some(12), None);
        assert_eq!(merged.border_thickness, 8);

        // A narrower override shrinks the grab area.
        let merged = metrics.apply_overrides(Some(4), None);
        assert_eq!(merged.border_thickness, 4);
    }

    #[test]
    fn test_title_bar_override_replaces_os_value() {
        let metrics = FrameMetrics::from_os(96, 8, 31).apply_overrides(None, Some(40));
        assert_eq!(metrics.title_bar_height, 40);
    }

    #[test]
    fn test_overrides_scale_with_dpi() {
        let metrics = FrameMetrics::from_os(144, 12, 47).apply_overrides(Some(6), Some(32));
        assert_eq!(metrics.border_thickness, 9); // 6 * 1.5
        assert_eq!(metrics.title_bar_height, 48); // 32 * 1.5
    }

    #[test]
    fn test_resolution_is_deterministic() {
        // Two resolutions with the same inputs are identical.
        let a = FrameMetrics::from_os(120, 10, 39).apply_overrides(Some(8), None);
        let b = FrameMetrics::from_os(120, 10, 39).apply_overrides(Some(8), None);
        assert_eq!(a, b);
    }
}
