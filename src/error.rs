//! Error types for the cursor bitmapper

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bitmapper operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can abort a render run
///
/// None of these are recovered locally: the first one raised ends the whole
/// run and is reported by the binary before it exits with a non-zero status.
#[derive(Error, Debug)]
pub enum Error {
    /// A source file was missing, unreadable, not UTF-8, or empty
    #[error("Failed to read source {}: {reason}", path.display())]
    Read { path: PathBuf, reason: String },

    /// The container element never appeared in the loaded document
    #[error("Timed out waiting for element '{selector}': {reason}")]
    ElementWait { selector: String, reason: String },

    /// The drawable element is missing inside the loaded container
    #[error("Element '{selector}' not found (malformed source markup?)")]
    ElementNotFound { selector: String },

    /// Output directory creation or bitmap write failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to launch the rendering engine
    #[error("Engine initialization failed: {0}")]
    InitializationError(String),

    /// Failed to load the host document into a page
    #[error("Failed to load document: {0}")]
    LoadError(String),

    /// The engine did not produce screenshot bytes
    #[error("Screenshot capture failed: {0}")]
    Capture(String),

    /// Invalid or unreadable configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// CDP-specific error
    #[cfg(feature = "cdp")]
    #[error("CDP error: {0}")]
    CdpError(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(feature = "cdp")]
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::CdpError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_error_names_the_path() {
        let err = Error::Read {
            path: PathBuf::from("svg/pointer.svg"),
            reason: "file is empty".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("svg/pointer.svg"));
        assert!(msg.contains("file is empty"));
    }

    #[test]
    fn io_error_keeps_its_source() {
        use std::error::Error as _;

        let err = Error::io(
            "bitmaps/spin-01.png",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("bitmaps/spin-01.png"));
        assert!(err.source().is_some());
    }
}
