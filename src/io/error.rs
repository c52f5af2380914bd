//! Error types and path context for level conversion

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all conversion operations
#[derive(Debug)]
pub enum LevelError {
    /// Image dimensions are not tile multiples, or differ between inputs
    InvalidGeometry {
        /// Description of the geometry problem
        reason: String,
    },

    /// More unique composite tiles than the tileset may hold
    ///
    /// Reported only after the whole layer has been deduplicated, so `count`
    /// is the final dictionary size rather than the first overflowing index.
    CapacityExceeded {
        /// Number of unique composite tiles found
        count: usize,
        /// Configured tile ceiling
        limit: usize,
    },

    /// More unique words than a 16-bit word index can address
    WordCapacityExceeded {
        /// Number of unique words found, including the reserved one
        count: usize,
        /// Number of addressable word indices
        limit: usize,
    },

    /// Failed to decode a source PNG
    ImageDecode {
        /// Path to the image file
        path: PathBuf,
        /// Underlying decoder error
        source: png::DecodingError,
    },

    /// Failed to encode an output tileset PNG
    ImageEncode {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying encoder error
        source: png::EncodingError,
    },

    /// Image decoded fine but does not carry raw 8-bit samples
    UnsupportedFormat {
        /// Path to the image file
        path: PathBuf,
        /// What the decoder found instead
        reason: String,
    },

    /// Engine parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl LevelError {
    /// Whether the error came from the image codec or the file system
    pub const fn is_codec_error(&self) -> bool {
        matches!(
            self,
            Self::ImageDecode { .. }
                | Self::ImageEncode { .. }
                | Self::UnsupportedFormat { .. }
                | Self::FileSystem { .. }
        )
    }
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGeometry { reason } => {
                write!(f, "Invalid image geometry: {reason}")
            }
            Self::CapacityExceeded { count, limit } => {
                write!(
                    f,
                    "The resulting tileset would have {count} tiles, more than the limit of {limit}"
                )
            }
            Self::WordCapacityExceeded { count, limit } => {
                write!(
                    f,
                    "The level would have {count} unique words, more than the {limit} a 16-bit word index can address"
                )
            }
            Self::ImageDecode { path, source } => {
                write!(f, "Failed to decode image '{}': {source}", path.display())
            }
            Self::ImageEncode { path, source } => {
                write!(f, "Failed to encode image '{}': {source}", path.display())
            }
            Self::UnsupportedFormat { path, reason } => {
                write!(f, "Unsupported image '{}': {reason}", path.display())
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageDecode { source, .. } => Some(source),
            Self::ImageEncode { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for conversion results
pub type Result<T> = std::result::Result<T, LevelError>;

/// Attaches the failing path to I/O and codec results
pub trait WithPath<T> {
    /// Record which file and operation an error belongs to
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<LevelError>,
{
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|e| match e.into() {
            LevelError::FileSystem { source, .. } => LevelError::FileSystem {
                path: path.to_path_buf(),
                operation,
                source,
            },
            LevelError::ImageDecode { source, .. } => LevelError::ImageDecode {
                path: path.to_path_buf(),
                source,
            },
            LevelError::ImageEncode { source, .. } => LevelError::ImageEncode {
                path: path.to_path_buf(),
                source,
            },
            LevelError::UnsupportedFormat { reason, .. } => LevelError::UnsupportedFormat {
                path: path.to_path_buf(),
                reason,
            },
            other => other,
        })
    }
}

impl From<std::io::Error> for LevelError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<png::DecodingError> for LevelError {
    fn from(err: png::DecodingError) -> Self {
        Self::ImageDecode {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<png::EncodingError> for LevelError {
    fn from(err: png::EncodingError) -> Self {
        Self::ImageEncode {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> LevelError {
    LevelError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid geometry error
pub fn invalid_geometry(reason: &impl ToString) -> LevelError {
    LevelError::InvalidGeometry {
        reason: reason.to_string(),
    }
}
