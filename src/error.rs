//! Error types for aperture

use thiserror::Error;

/// Result type alias for aperture operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by a capture engine implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Device enumeration failed inside the engine
    #[error("device enumeration failed: {0}")]
    Enumeration(String),

    /// The engine refused to open the requested device
    #[error("could not open device '{device}': {reason}")]
    Open { device: String, reason: String },

    /// A capture is already running inside the engine
    #[error("engine is already capturing")]
    Busy,
}

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    /// Engine could not list devices, or listed none
    #[error("capture engine unavailable: {0}")]
    EngineUnavailable(String),

    /// Engine rejected the start request for a device
    #[error("failed to start capture on '{device}': {reason}")]
    SessionStart { device: String, reason: String },

    /// Device named on the command line is not in the engine's list
    #[error("device '{0}' not found")]
    DeviceNotFound(String),

    /// Operator input stream closed before a device was chosen
    #[error("input closed before a device was selected")]
    InputClosed,

    /// Operator chose to quit at the device prompt
    #[error("device selection cancelled")]
    SelectionCancelled,

    /// Terminal or console I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn session_start<S: Into<String>>(device: S, reason: impl std::fmt::Display) -> Self {
        Error::SessionStart {
            device: device.into(),
            reason: reason.to_string(),
        }
    }
}
