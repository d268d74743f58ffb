//! Errors raised while walking build trees and assembling a manifest.
//!
//! Every variant is fatal for the manifest build that produced it. None of
//! them are retried; they point at a misconfigured root or a filesystem
//! permission problem that a human has to fix.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result alias used by the manifest core.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the walk → classify → remap → assemble pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// The root directory of a walk does not exist.
    #[error("Root not found: {}", path.display())]
    NotFound {
        /// Missing path
        path: PathBuf,
    },

    /// The root of a walk exists but is not a directory.
    #[error("Not a directory: {}", path.display())]
    NotADirectory {
        /// Offending path
        path: PathBuf,
    },

    /// A directory could not be listed because of its permissions.
    #[error("Permission denied while reading {}", path.display())]
    PermissionDenied {
        /// Directory (or entry) that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Any other I/O failure while listing a directory.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Directory (or entry) that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A path handed to the remapper does not live below its local root.
    #[error("Path {} is outside of root {}", path.display(), root.display())]
    PathOutsideRoot {
        /// Path that was remapped
        path: PathBuf,
        /// Local root of the remapper
        root: PathBuf,
    },
}

impl Error {
    /// Classifies an I/O error raised while reading `path`.
    pub(crate) fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => Self::NotFound { path },
            io::ErrorKind::PermissionDenied => Self::PermissionDenied { path, source },
            _ => Self::Io { path, source },
        }
    }

    /// Path the error is about, for diagnostics that want a location.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::NotADirectory { path }
            | Self::PermissionDenied { path, .. }
            | Self::Io { path, .. }
            | Self::PathOutsideRoot { path, .. } => path,
        }
    }
}
