//! Error types for the sift host.
//!
//! Each variant carries a stable error code (SCREAMING_SNAKE_CASE) that is
//! included in the Display output and accessible via [`SiftError::code()`].

/// Stable error codes for programmatic error handling.
pub mod error_codes {
    /// Invalid or unreadable configuration.
    pub const CONFIG_INVALID: &str = "CONFIG_INVALID";

    /// Tool arguments failed validation.
    pub const TOOL_VALIDATION: &str = "TOOL_VALIDATION";

    /// Tool execution failed.
    pub const TOOL_FAILED: &str = "TOOL_FAILED";

    /// Filesystem or other I/O failure.
    pub const IO_ERROR: &str = "IO_ERROR";
}

/// Errors produced by the sift host.
///
/// The Display impl formats as `[CODE] message`.
#[derive(Debug, thiserror::Error)]
pub enum SiftError {
    /// Invalid or unreadable configuration.
    #[error("[{}] {}", error_codes::CONFIG_INVALID, .0)]
    Config(String),

    /// Tool arguments failed validation.
    #[error("[{}] {}", error_codes::TOOL_VALIDATION, .0)]
    ToolValidation(String),

    /// Tool execution failed.
    #[error("[{}] {}", error_codes::TOOL_FAILED, .0)]
    ToolFailed(String),

    /// Filesystem or other I/O failure.
    #[error("[{}] {}", error_codes::IO_ERROR, .0)]
    Io(String),
}

impl SiftError {
    /// Returns the stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => error_codes::CONFIG_INVALID,
            Self::ToolValidation(_) => error_codes::TOOL_VALIDATION,
            Self::ToolFailed(_) => error_codes::TOOL_FAILED,
            Self::Io(_) => error_codes::IO_ERROR,
        }
    }

    /// Returns the inner message without the code prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Config(m) | Self::ToolValidation(m) | Self::ToolFailed(m) | Self::Io(m) => m,
        }
    }
}

impl From<std::io::Error> for SiftError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SiftError>;
