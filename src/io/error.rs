//! Error types for collection building operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all collection building operations
#[derive(Debug)]
pub enum BuildError {
    /// Failed to read the configuration file from disk
    ConfigRead {
        /// Path to the configuration file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON
    ConfigParse {
        /// Underlying deserialization error
        source: serde_json::Error,
    },

    /// Configuration parsed but violates a shape requirement
    ConfigShape {
        /// Description of what's wrong with the configuration
        reason: String,
    },

    /// Failed to load a layer image from the filesystem
    LayerLoad {
        /// Path to the layer file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// A render job carried no layers after design mapping
    EmptyJob {
        /// Unique index of the affected job
        unique_index: String,
    },

    /// Failed to save a composited image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
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

    /// Failed to write the collection archive
    Archive {
        /// Path of the archive being written
        path: PathBuf,
        /// Description of the failure
        reason: String,
    },

    /// Worker pool construction failed
    PoolBuild {
        /// Description of the failure
        reason: String,
    },

    /// One or more render jobs failed after all jobs were attempted
    JobsFailed {
        /// Number of failed jobs
        failed: usize,
        /// Number of attempted jobs
        total: usize,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigRead { path, source } => {
                write!(
                    f,
                    "Failed to read configuration '{}': {source}",
                    path.display()
                )
            }
            Self::ConfigParse { source } => {
                write!(f, "Invalid configuration: {source}")
            }
            Self::ConfigShape { reason } => {
                write!(f, "Invalid configuration: {reason}")
            }
            Self::LayerLoad { path, source } => {
                write!(f, "Failed to load layer '{}': {source}", path.display())
            }
            Self::EmptyJob { unique_index } => {
                write!(f, "Job '{unique_index}' has no layers to composite")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
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
            Self::Archive { path, reason } => {
                write!(
                    f,
                    "Failed to write archive '{}': {reason}",
                    path.display()
                )
            }
            Self::PoolBuild { reason } => {
                write!(f, "Failed to build worker pool: {reason}")
            }
            Self::JobsFailed { failed, total } => {
                write!(f, "{failed} of {total} render jobs failed")
            }
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::LayerLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::ConfigRead { source, .. } | Self::FileSystem { source, .. } => Some(source),
            Self::ConfigParse { source } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for collection building results
pub type Result<T> = std::result::Result<T, BuildError>;
