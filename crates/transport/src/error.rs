use std::io;
use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

/// Errors raised while talking to the cluster manager's control socket.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connecting to the control socket failed.
    #[error("failed to connect to cluster control socket {path}: {source}")]
    Connect {
        /// Socket path the connection was attempted against.
        path: PathBuf,
        /// Underlying connect failure.
        #[source]
        source: io::Error,
    },
    /// Reading or writing a frame failed mid-exchange.
    #[error("control socket i/o failed: {0}")]
    Io(#[from] io::Error),
    /// The manager announced a frame larger than the configured cap.
    #[error("reply frame of {length} bytes exceeds the {max} byte limit")]
    FrameTooLarge {
        /// Announced frame length.
        length: u64,
        /// Maximum accepted frame length.
        max: u64,
    },
    /// The reply was not valid JSON.
    #[error("cluster manager reply is not valid JSON: {0}")]
    Decode(#[source] serde_json::Error),
    /// The manager answered with its error marker instead of a result.
    #[error("cluster manager error: {message}")]
    Remote {
        /// Error text supplied by the manager, verbatim.
        message: String,
    },
}

impl TransportError {
    /// Wraps a manager-supplied error message in [`TransportError::Remote`].
    #[must_use]
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote { message: message.into() }
    }

    /// Returns the remote error message, if this is a remote failure.
    #[must_use]
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            Self::Remote { message } => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Extracts the manager's error marker from a reply, when present.
///
/// The manager signals a failed operation by replying with an object whose
/// `"err"` member holds the diagnostic. Non-object replies and objects
/// without the member are successful results. Non-string markers are
/// rendered as JSON so the diagnostic is never silently dropped.
#[must_use]
pub fn error_marker(reply: &Value) -> Option<String> {
    let marker = reply.as_object()?.get("err")?;
    match marker {
        Value::String(message) => Some(message.clone()),
        other => Some(other.to_string()),
    }
}
