//! Error handling for the voxel world core
//!
//! Lookups that can legitimately miss return `Option` or `bool`; the types
//! here cover misuse (bad configuration, malformed rays) and I/O.

use std::error::Error as StdError;
use std::fmt;

use crate::world::error::WorldError;

/// Main error type for the crate
#[derive(Debug)]
pub enum EngineError {
    // World Errors
    ChunkNotLoaded {
        pos: (i32, i32, i32),
    },
    InvalidRay {
        reason: String,
    },

    // Configuration Errors
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },

    // System Errors
    IoError {
        path: String,
        error: String,
    },
    ParseError {
        value: String,
        expected_type: String,
    },

    // Generic fallback for unexpected errors
    Internal {
        message: String,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::ChunkNotLoaded { pos } => {
                write!(f, "Chunk not loaded at position {:?}", pos)
            }
            EngineError::InvalidRay { reason } => write!(f, "Invalid ray: {}", reason),

            EngineError::InvalidConfig {
                field,
                value,
                reason,
            } => write!(f, "Invalid config: {} = {} ({})", field, value, reason),

            EngineError::IoError { path, error } => write!(f, "IO error for {}: {}", path, error),
            EngineError::ParseError {
                value,
                expected_type,
            } => write!(
                f,
                "Parse error: '{}' is not a valid {}",
                value, expected_type
            ),

            EngineError::Internal { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl StdError for EngineError {}

/// Type alias for Results in this crate
pub type EngineResult<T> = Result<T, EngineError>;

// Conversion traits for common error types

impl From<std::io::Error> for EngineError {
    fn from(error: std::io::Error) -> Self {
        EngineError::IoError {
            path: String::new(),
            error: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for EngineError {
    fn from(error: toml::de::Error) -> Self {
        EngineError::ParseError {
            value: error.message().to_string(),
            expected_type: "EngineConfig TOML".to_string(),
        }
    }
}

impl From<WorldError> for EngineError {
    fn from(error: WorldError) -> Self {
        match error {
            WorldError::ChunkNotLoaded(pos) => EngineError::ChunkNotLoaded {
                pos: (pos.x, pos.y, pos.z),
            },
            WorldError::InvalidChunkSize(size) => EngineError::InvalidConfig {
                field: "chunk_size".to_string(),
                value: size.to_string(),
                reason: error.to_string(),
            },
            WorldError::InvalidDirection { .. } | WorldError::InvalidDistance { .. } => {
                EngineError::InvalidRay {
                    reason: error.to_string(),
                }
            }
            WorldError::InvalidPosition | WorldError::OperationFailed(_) => {
                EngineError::Internal {
                    message: error.to_string(),
                }
            }
        }
    }
}

// Helper functions for common error patterns

/// Convert Option to Result with context
pub trait OptionExt<T> {
    fn ok_or_engine<F>(self, f: F) -> EngineResult<T>
    where
        F: FnOnce() -> EngineError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_engine<F>(self, f: F) -> EngineResult<T>
    where
        F: FnOnce() -> EngineError,
    {
        self.ok_or_else(f)
    }
}

/// Extension trait for adding context to errors
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> EngineResult<T>;
    fn with_context<F>(self, f: F) -> EngineResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: fmt::Display,
{
    fn context(self, msg: &str) -> EngineResult<T> {
        self.map_err(|e| EngineError::Internal {
            message: format!("{}: {}", msg, e),
        })
    }

    fn with_context<F>(self, f: F) -> EngineResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| EngineError::Internal {
            message: format!("{}: {}", f(), e),
        })
    }
}
