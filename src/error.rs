//! Error types for the collection splitter.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors raised while splitting a collection.
///
/// Every variant aborts the run. Files written before the failure stay on disk.
#[derive(Debug, Error)]
pub enum SplitError {
    /// The source collection could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Path of the source collection.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The source collection is not valid JSON or has the wrong shape.
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        /// Path of the source collection.
        path: PathBuf,
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },

    /// A matched module needs `info.schema` but the source has none.
    #[error("Source collection has no info.schema (needed for module '{module}')")]
    MissingSchema {
        /// First matched module.
        module: String,
    },

    /// An output document could not be serialized.
    #[error("Failed to serialize collection for module '{module}': {source}")]
    Serialize {
        /// Module being serialized.
        module: String,
        /// Underlying JSON failure.
        #[source]
        source: serde_json::Error,
    },

    /// An output file could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A module map override file could not be loaded.
    #[error("Failed to load module map {}: {source}", path.display())]
    ModuleMap {
        /// Path of the override file.
        path: PathBuf,
        /// What went wrong.
        #[source]
        source: ModuleMapError,
    },

    /// The directory of the running executable could not be determined.
    #[error("Cannot locate the executable directory: {0}")]
    ExecutableDir(#[source] std::io::Error),
}

/// Failures while loading a module map override.
#[derive(Debug, Error)]
pub enum ModuleMapError {
    /// The file could not be read.
    #[error("cannot read file: {0}")]
    Read(#[from] std::io::Error),

    /// The file is not a YAML mapping, or a module name is not a string.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A module maps to something other than a file name.
    #[error("file name for module '{module}' must be a string: {source}")]
    FileName {
        /// Module whose value is invalid.
        module: String,
        /// Underlying YAML failure.
        #[source]
        source: serde_yaml::Error,
    },
}

/// Result type alias for splitter operations.
pub type Result<T> = std::result::Result<T, SplitError>;
