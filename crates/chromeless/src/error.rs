//! Error types for chrome management.

use thiserror::Error;

/// Errors that can occur while managing window chrome.
#[derive(Error, Debug)]
pub enum ChromeError {
    /// The window handle could not be borrowed from winit.
    #[error("failed to access window handle: {0}")]
    HandleAccess(#[from] raw_window_handle::HandleError),

    /// The raw handle is not of the kind this platform expects.
    #[error("unsupported raw window handle for this platform")]
    UnsupportedHandle,

    /// The window is not registered with the chrome registry.
    #[error("window is not managed")]
    NotManaged,

    /// A platform call failed.
    #[error("platform call failed: {0}")]
    Platform(String),

    /// The window's outer position could not be queried.
    #[error("window position unavailable: {0}")]
    PositionUnavailable(String),

    /// The platform rejected a system-initiated move or resize loop.
    #[error("system drag rejected: {0}")]
    DragRejected(String),
}

/// Result type for chrome operations.
pub type ChromeResult<T> = Result<T, ChromeError>;
