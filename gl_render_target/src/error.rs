//! Error types for the render target core
//!
//! This module defines the error types used throughout the crate:
//! the recoverable `Error` returned by fallible operations, the GL-style
//! error codes reported to the API layer, and the sink that records them.

use std::fmt;
use std::sync::Mutex;

/// Result type for render target operations
pub type Result<T> = std::result::Result<T, Error>;

/// Render target errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Backend-specific error (Vulkan, etc.)
    BackendError(String),

    /// Out of GPU memory, or the backend cannot support the requested
    /// format/sample combination at all
    OutOfMemory,

    /// Invalid resource (surface, format, etc.)
    InvalidResource(String),

    /// Initialization failed (instance, device, allocator)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== GL ERROR CODES =====

/// GL error codes as seen by the API layer (`glGetError`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum GlError {
    INVALID_ENUM,
    INVALID_VALUE,
    INVALID_OPERATION,
    OUT_OF_MEMORY,
    INVALID_FRAMEBUFFER_OPERATION,
}

impl GlError {
    /// GL enum value of this error
    pub fn code(self) -> u32 {
        match self {
            GlError::INVALID_ENUM => 0x0500,
            GlError::INVALID_VALUE => 0x0501,
            GlError::INVALID_OPERATION => 0x0502,
            GlError::OUT_OF_MEMORY => 0x0505,
            GlError::INVALID_FRAMEBUFFER_OPERATION => 0x0506,
        }
    }
}

impl From<&Error> for GlError {
    fn from(error: &Error) -> Self {
        match error {
            Error::OutOfMemory => GlError::OUT_OF_MEMORY,
            Error::InvalidResource(_) => GlError::INVALID_VALUE,
            Error::BackendError(_) | Error::InitializationFailed(_) => GlError::INVALID_OPERATION,
        }
    }
}

impl fmt::Display for GlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GL_{:?} (0x{:04X})", self, self.code())
    }
}

// ===== ERROR SINK =====

/// Receiver of caller-visible GL errors
///
/// Implemented by whatever owns the GL error state (usually the context).
/// Render targets report recoverable failures here instead of returning them,
/// since GL construction entry points have no return channel.
pub trait ErrorSink: Send + Sync {
    /// Record an error
    fn record(&self, error: GlError);
}

/// Error sink with GL flag semantics
///
/// Each error code is latched at most once until it is read back. `take()`
/// returns the oldest pending code and clears it, like `glGetError`.
#[derive(Debug, Default)]
pub struct ErrorFlags {
    pending: Mutex<Vec<GlError>>,
}

impl ErrorFlags {
    /// Create an empty set of error flags
    pub fn new() -> Self {
        Self::default()
    }

    /// Return and clear the oldest pending error, if any
    pub fn take(&self) -> Option<GlError> {
        let mut pending = self.pending.lock().ok()?;
        if pending.is_empty() {
            None
        } else {
            Some(pending.remove(0))
        }
    }

    /// Number of distinct pending errors
    pub fn pending_count(&self) -> usize {
        self.pending.lock().map(|p| p.len()).unwrap_or(0)
    }

    /// True when no error is pending
    pub fn is_empty(&self) -> bool {
        self.pending_count() == 0
    }
}

impl ErrorSink for ErrorFlags {
    fn record(&self, error: GlError) {
        if let Ok(mut pending) = self.pending.lock() {
            if !pending.contains(&error) {
                pending.push(error);
            }
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
