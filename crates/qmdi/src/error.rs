//! Error types for qmdi.
//!
//! Contract violations inside the merge engine (merging a missing client,
//! deleting a client twice) are logged and ignored, never returned. The
//! errors here cover configuration I/O, parsing, and the query APIs that
//! callers explicitly ask to fail.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::mdi::ClientId;
use crate::widget::KeySequenceParseError;

/// Errors produced by qmdi.
#[derive(Debug, Error)]
pub enum MdiError {
    /// The id does not name a live client of this server.
    #[error("unknown client {0:?}")]
    UnknownClient(ClientId),

    /// A configuration file could not be read or parsed.
    #[error("failed to load configuration from {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: Box<MdiError>,
    },

    /// Configuration text is not valid TOML for [`MdiConfig`](crate::config::MdiConfig).
    #[error("invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration could not be serialized.
    #[error("failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// An I/O operation on `path` failed.
    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A shortcut string could not be parsed.
    #[error("invalid key sequence: {0}")]
    KeySequence(#[from] KeySequenceParseError),
}

impl MdiError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn config(path: impl Into<PathBuf>, source: MdiError) -> Self {
        Self::Config {
            path: path.into(),
            source: Box::new(source),
        }
    }
}

/// Result type alias for qmdi operations.
pub type Result<T> = std::result::Result<T, MdiError>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;
    use slotmap::KeyData;

    #[test]
    fn test_error_display() {
        let err = MdiError::io("/tmp/qmdi.toml", io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.to_string(), "I/O error on /tmp/qmdi.toml");
        assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("gone"));

        let err = MdiError::config("/tmp/qmdi.toml", err);
        assert_eq!(err.to_string(), "failed to load configuration from /tmp/qmdi.toml");
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("I/O error on /tmp/qmdi.toml"));
    }

    #[test]
    fn test_from_key_sequence_error() {
        let err: MdiError = KeySequenceParseError::Empty.into();
        assert!(matches!(err, MdiError::KeySequence(_)));
    }

    #[test]
    fn test_unknown_client() {
        let id = ClientId::from(KeyData::from_ffi(1));
        assert!(MdiError::UnknownClient(id).to_string().starts_with("unknown client"));
    }
}
