//! Error handling for markup-editor
//!
//! Settings failures are logged and replaced by defaults. Document and render
//! failures propagate to whoever drives the shell.

use log::warn;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────────────────
    // Settings
    // ─────────────────────────────────────────────────────────────────────────
    /// The platform reports no config directory
    ConfigDirNotFound,

    /// Reading, writing, or renaming the settings file failed
    ConfigIo { path: PathBuf, source: io::Error },

    /// The settings file holds JSON that does not describe `Settings`
    ConfigFormat {
        path: PathBuf,
        source: serde_json::Error,
    },

    // ─────────────────────────────────────────────────────────────────────────
    // Document
    // ─────────────────────────────────────────────────────────────────────────
    /// The Markdown file to edit could not be read
    DocumentRead { path: PathBuf, source: io::Error },

    /// The rendering transform rejected its input
    Render(String),

    /// Bad command-line arguments
    Usage(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ConfigDirNotFound => write!(f, "no config directory on this platform"),
            Error::ConfigIo { path, source } => {
                write!(f, "settings file {}: {}", path.display(), source)
            }
            Error::ConfigFormat { path, source } => {
                write!(f, "settings file {} is malformed: {}", path.display(), source)
            }
            Error::DocumentRead { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            Error::Render(msg) => write!(f, "Rendering failed: {}", msg),
            Error::Usage(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ConfigIo { source, .. } | Error::DocumentRead { source, .. } => Some(source),
            Error::ConfigFormat { source, .. } => Some(source),
            Error::ConfigDirNotFound | Error::Render(_) | Error::Usage(_) => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Graceful Degradation
// ─────────────────────────────────────────────────────────────────────────────

/// Fall back to a default value, logging the error.
pub trait ResultExt<T> {
    /// Return the value, or log `context` with the error and return `default`.
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T;
}

impl<T> ResultExt<T> for Result<T> {
    fn unwrap_or_warn_default(self, default: T, context: &str) -> T {
        self.unwrap_or_else(|err| {
            warn!("{}: {}. Using default.", context, err);
            default
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
