//! Registry of managed frameless windows.
//!
//! The [`ChromeRegistry`] tracks every window whose native frame has been
//! stripped and owns the per-window state the chrome needs: the saved
//! frame snapshot, the interaction session, the pointer tracker and the
//! chrome configuration.
//!
//! The registry is an explicit value. Create one next to the event loop
//! and pass it by reference to the event dispatch; there is no process
//! global behind it, so tests and multi-loop setups can run registries in
//! isolation.
//!
//! # Example
//!
//! ```ignore
//! use chromeless::{ChromeConfig, ChromeRegistry};
//!
//! let registry = ChromeRegistry::new();
//!
//! // Strip the frame and take over its duties.
//! let managed = registry.manage_with(
//!     window.clone(),
//!     ChromeConfig::new().with_title_bar_height(40),
//! )?;
//!
//! // In the winit event handler:
//! chromeless::handle_window_event(&registry, window_id, &event);
//!
//! // Hand the frame back.
//! registry.unmanage(window_id);
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard, RwLock, RwLockReadGuard};
use tracing::{debug, info, warn};
use winit::window::{Window, WindowId};

use chromeless_core::{
    FrameMetrics, InteractionSession, PlatformCapabilities, Rect, WindowState,
};

use crate::config::ChromeConfig;
use crate::dispatch::PointerTracker;
use crate::error::{ChromeError, ChromeResult};
use crate::native::{self, FrameSnapshot};

/// Registry of windows with stripped native frames.
///
/// Platform capabilities are probed once at construction and shared with
/// every window managed afterwards.
pub struct ChromeRegistry {
    /// All managed windows.
    windows: RwLock<HashMap<WindowId, Arc<ManagedWindow>>>,
    /// Capabilities probed at construction.
    capabilities: PlatformCapabilities,
}

impl ChromeRegistry {
    /// Create a registry, probing the platform's capabilities.
    pub fn new() -> Self {
        let capabilities = native::probe_capabilities();
        debug!(target: "chromeless::registry", ?capabilities, "platform capabilities probed");
        Self {
            windows: RwLock::new(HashMap::new()),
            capabilities,
        }
    }

    /// Create a registry with explicit capabilities.
    ///
    /// Mainly useful in tests and when degrading a platform deliberately,
    /// for example to force manual drags.
    pub fn with_capabilities(capabilities: PlatformCapabilities) -> Self {
        Self {
            windows: RwLock::new(HashMap::new()),
            capabilities,
        }
    }

    /// The capabilities this registry was created with.
    pub fn capabilities(&self) -> &PlatformCapabilities {
        &self.capabilities
    }

    /// Strip `window`'s native frame and start managing it with the
    /// default configuration.
    ///
    /// Must be called on the thread that created the window.
    pub fn manage(&self, window: Arc<Window>) -> ChromeResult<Arc<ManagedWindow>> {
        self.manage_with(window, ChromeConfig::new())
    }

    /// Strip `window`'s native frame and start managing it.
    ///
    /// Managing an already managed window is a no-op that returns the
    /// existing entry; the new configuration is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error when the native frame state cannot be captured or
    /// the platform hook cannot be installed. The window is left with its
    /// original frame in that case.
    pub fn manage_with(
        &self,
        window: Arc<Window>,
        config: ChromeConfig,
    ) -> ChromeResult<Arc<ManagedWindow>> {
        let id = window.id();
        if let Some(existing) = self.get(id) {
            debug!(target: "chromeless::registry", window = ?id, "window already managed");
            return Ok(existing);
        }

        let snapshot = native::capture_snapshot(&window)?;

        let managed = Arc::new(ManagedWindow {
            window,
            capabilities: self.capabilities,
            config: RwLock::new(config),
            session: Mutex::new(InteractionSession::new()),
            pointer: Mutex::new(PointerTracker::new()),
            snapshot,
            composition_enabled: AtomicBool::new(native::probe_composition()),
            theme_active: AtomicBool::new(native::probe_theme()),
            hook_data: AtomicUsize::new(0),
        });

        // The hook goes in first: stripping recalculates the frame, and
        // that recalculation must already be answered by the hook.
        native::install_hook(&managed)?;
        if let Err(error) = native::strip_frame(managed.window()) {
            // Leave the window as we found it rather than half managed.
            if let Err(remove_error) = native::remove_hook(&managed) {
                warn!(
                    target: "chromeless::registry",
                    %remove_error,
                    "failed to remove hook after strip failure"
                );
            }
            if let Err(restore_error) = native::restore_frame(managed.window(), &managed.snapshot)
            {
                warn!(
                    target: "chromeless::registry",
                    %restore_error,
                    "failed to restore frame after strip failure"
                );
            }
            return Err(error);
        }
        managed.apply_min_size();

        self.windows.write().insert(id, Arc::clone(&managed));
        info!(target: "chromeless::registry", window = ?id, "window managed");
        Ok(managed)
    }

    /// Stop managing a window and restore its native frame.
    ///
    /// Returns `false` if the window was not managed.
    pub fn unmanage(&self, id: WindowId) -> bool {
        let Some(managed) = self.windows.write().remove(&id) else {
            debug!(target: "chromeless::registry", window = ?id, "unmanage for unknown window");
            return false;
        };
        managed.session().reset();
        if let Err(error) = native::remove_hook(&managed) {
            warn!(target: "chromeless::registry", %error, "failed to remove platform hook");
        }
        if let Err(error) = native::restore_frame(managed.window(), &managed.snapshot) {
            warn!(target: "chromeless::registry", %error, "failed to restore native frame");
        }
        info!(target: "chromeless::registry", window = ?id, "window unmanaged");
        true
    }

    /// Stop managing every window, restoring all native frames.
    pub fn unmanage_all(&self) {
        let ids: Vec<WindowId> = self.windows.read().keys().copied().collect();
        for id in ids {
            self.unmanage(id);
        }
    }

    /// Record a compositor availability change for a managed window.
    ///
    /// Updates the cached flag, re-applies the shadow policy and requests
    /// a redraw. On Windows the platform hook observes the change itself;
    /// this entry point is for hosts that learn about it through their own
    /// channels. Unknown windows are ignored.
    pub fn handle_composition_changed(&self, id: WindowId, enabled: bool) {
        let Some(managed) = self.get(id) else {
            debug!(
                target: "chromeless::registry",
                window = ?id,
                "composition change for unmanaged window"
            );
            return;
        };
        managed.set_composition_enabled(enabled);
        if let Err(error) = native::refresh_shadow(managed.window(), enabled) {
            warn!(target: "chromeless::registry", %error, "failed to refresh shadow policy");
        }
        managed.window().request_redraw();
    }

    /// Record a visual theming change for a managed window.
    ///
    /// Updates the cached flag and requests a redraw. Unknown windows are
    /// ignored.
    pub fn handle_theme_changed(&self, id: WindowId, active: bool) {
        let Some(managed) = self.get(id) else {
            debug!(
                target: "chromeless::registry",
                window = ?id,
                "theme change for unmanaged window"
            );
            return;
        };
        managed.set_theme_active(active);
        managed.window().request_redraw();
    }

    /// Get a managed window by ID.
    pub fn get(&self, id: WindowId) -> Option<Arc<ManagedWindow>> {
        self.windows.read().get(&id).cloned()
    }

    /// Check whether a window is managed.
    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.read().contains_key(&id)
    }

    /// The number of managed windows.
    pub fn len(&self) -> usize {
        self.windows.read().len()
    }

    /// Check whether no windows are managed.
    pub fn is_empty(&self) -> bool {
        self.windows.read().is_empty()
    }

    /// IDs of all managed windows.
    pub fn managed_ids(&self) -> Vec<WindowId> {
        self.windows.read().keys().copied().collect()
    }
}

impl Default for ChromeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A window under chrome management.
///
/// Holds the winit window together with everything the chrome tracks for
/// it. Obtained from [`ChromeRegistry::manage`] and shared with the
/// platform hook, so it stays alive until both the registry entry and the
/// hook released it.
pub struct ManagedWindow {
    window: Arc<Window>,
    capabilities: PlatformCapabilities,
    config: RwLock<ChromeConfig>,
    session: Mutex<InteractionSession>,
    pointer: Mutex<PointerTracker>,
    /// Native frame state to restore at unmanage time.
    snapshot: FrameSnapshot,
    composition_enabled: AtomicBool,
    theme_active: AtomicBool,
    /// Raw pointer handed to the platform hook, zero once released.
    hook_data: AtomicUsize,
}

impl ManagedWindow {
    /// The underlying winit window.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// The window's ID.
    pub fn id(&self) -> WindowId {
        self.window.id()
    }

    /// The capabilities probed by the owning registry.
    pub fn capabilities(&self) -> &PlatformCapabilities {
        &self.capabilities
    }

    /// Read access to the chrome configuration.
    pub fn config(&self) -> RwLockReadGuard<'_, ChromeConfig> {
        self.config.read()
    }

    /// Update the chrome configuration in place.
    ///
    /// Reapplies derived window properties (such as the minimum size)
    /// after the closure returns.
    pub fn update_config(&self, update: impl FnOnce(&mut ChromeConfig)) {
        update(&mut self.config.write());
        self.apply_min_size();
    }

    /// The window's current state.
    pub fn state(&self) -> WindowState {
        if self.window.fullscreen().is_some() {
            WindowState::Fullscreen
        } else if self.window.is_maximized() {
            WindowState::Maximized
        } else if self.window.is_minimized().unwrap_or(false) {
            WindowState::Minimized
        } else {
            WindowState::Normal
        }
    }

    /// The window's outer rectangle in physical screen pixels.
    pub fn geometry(&self) -> ChromeResult<Rect> {
        let position = self
            .window
            .outer_position()
            .map_err(|e| ChromeError::PositionUnavailable(e.to_string()))?;
        let size = self.window.outer_size();
        Ok(Rect::new(
            position.x,
            position.y,
            size.width as i32,
            size.height as i32,
        ))
    }

    /// Frame metrics at the window's current DPI with configuration
    /// overrides applied.
    pub fn effective_metrics(&self) -> ChromeResult<FrameMetrics> {
        let metrics = native::frame_metrics(&self.window, &self.capabilities)?;
        let (border, title_bar) = {
            let config = self.config.read();
            (config.border_thickness(), config.title_bar_height())
        };
        Ok(metrics.apply_overrides(border, title_bar))
    }

    /// Whether the compositor was active at the last probe.
    pub fn composition_enabled(&self) -> bool {
        self.composition_enabled.load(Ordering::Relaxed)
    }

    /// Whether visual theming was active at the last probe.
    pub fn theme_active(&self) -> bool {
        self.theme_active.load(Ordering::Relaxed)
    }

    pub(crate) fn set_composition_enabled(&self, enabled: bool) {
        self.composition_enabled.store(enabled, Ordering::Relaxed);
    }

    pub(crate) fn set_theme_active(&self, active: bool) {
        self.theme_active.store(active, Ordering::Relaxed);
    }

    pub(crate) fn session(&self) -> MutexGuard<'_, InteractionSession> {
        self.session.lock()
    }

    pub(crate) fn pointer(&self) -> MutexGuard<'_, PointerTracker> {
        self.pointer.lock()
    }

    pub(crate) fn set_hook_data(&self, data: usize) {
        self.hook_data.store(data, Ordering::Relaxed);
    }

    /// Take the hook pointer, leaving zero behind. Each release path calls
    /// this so the allocation is freed exactly once.
    pub(crate) fn take_hook_data(&self) -> usize {
        self.hook_data.swap(0, Ordering::Relaxed)
    }

    /// Push the configured minimum size, scaled to the window's DPI,
    /// down to winit.
    pub(crate) fn apply_min_size(&self) {
        let dpi = match self.effective_metrics() {
            Ok(metrics) => metrics.dpi,
            Err(_) => chromeless_core::BASE_DPI,
        };
        let min = self.config.read().min_size_for_dpi(dpi);
        self.window
            .set_min_inner_size(Some(winit::dpi::PhysicalSize::new(
                min.width as u32,
                min.height as u32,
            )));
    }
}

impl std::fmt::Debug for ManagedWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagedWindow")
            .field("id", &self.id())
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
