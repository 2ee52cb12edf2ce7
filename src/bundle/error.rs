//! Bundle pipeline errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::asset::BundleKind;

/// Fatal errors of a bundle run. The first one aborts the whole run.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("failed to read `{}`", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to minify {kind} bundle `{group}`: {message}")]
    Minify {
        group: String,
        kind: BundleKind,
        message: String,
    },

    #[error("failed to write `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize manifest")]
    Manifest(#[from] serde_json::Error),
}

impl BundleError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = BundleError> = std::result::Result<T, E>;
