//! Platform capability model.
//!
//! Optional OS entry points (per-window DPI queries, DWM composition state,
//! native move/resize loops) are probed once at startup and recorded in an
//! immutable [`PlatformCapabilities`] value. Consumers branch on the recorded
//! capabilities instead of re-resolving symbols at each call site. A missing
//! capability is a normal configuration and selects a documented fallback,
//! never an error.

/// The most capable DPI query tier available on this platform.
///
/// Tiers are ordered from most to least specific; the metrics provider uses
/// the highest tier the probe found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DpiTier {
    /// No DPI query available; assume 96 DPI / scale 1.0.
    Static,
    /// A process- or system-wide DPI is available.
    System,
    /// Effective DPI of the monitor hosting the window is available.
    PerMonitor,
    /// The window's own DPI is available.
    PerWindow,
}

/// Immutable record of the platform features probed at startup.
///
/// Built once by the host crate's probe and passed by reference wherever
/// capability decisions are made. Equality of two probes implies identical
/// metric resolution behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformCapabilities {
    /// Best available DPI query tier.
    pub dpi_tier: DpiTier,
    /// Whether DPI-aware system metrics queries exist
    /// (`GetSystemMetricsForDpi`); otherwise metrics are scaled manually.
    pub dpi_aware_metrics: bool,
    /// Whether the compositor state can be queried
    /// (`DwmIsCompositionEnabled`).
    pub composition_query: bool,
    /// Whether the OS provides native interactive move/resize loops the
    /// host can delegate a drag to.
    pub system_drag_loops: bool,
}

impl PlatformCapabilities {
    /// The all-fallback capability set: static 96 DPI, manually scaled
    /// metrics, no compositor query, no native drag loops.
    ///
    /// Used on platforms without a probe and as the base the probe fills in.
    pub const FALLBACK: Self = Self {
        dpi_tier: DpiTier::Static,
        dpi_aware_metrics: false,
        composition_query: false,
        system_drag_loops: false,
    };

    /// Whether any real DPI source was found.
    pub fn has_dpi_query(&self) -> bool {
        self.dpi_tier > DpiTier::Static
    }
}

impl Default for PlatformCapabilities {
    fn default() -> Self {
        Self::FALLBACK
    }
}
