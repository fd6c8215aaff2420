#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]

//! # Overview
//!
//! `transport` houses the client side of the cluster manager's control
//! socket. One call to [`Transport::execute`] sends exactly one request and
//! returns exactly one decoded JSON reply; timeout, retry, and cancellation
//! policy live behind this boundary, never above it.
//!
//! # Design
//!
//! - [`Transport`] is the seam the control layer programs against, so a
//!   connection-per-call socket client and an in-memory test double fit the
//!   same interface.
//! - [`SocketTransport`] speaks the manager's framing: 4-byte little-endian
//!   length prefixes in both directions, one frame per direction per call.
//! - [`ScriptedTransport`] replays canned replies and records the requests
//!   it served, so higher layers can assert exact wire payloads.
//!
//! # Errors
//!
//! All failures surface as [`TransportError`]. A reply that arrives intact
//! but carries the manager's `"err"` member is a *remote* failure; the
//! [`error_marker`] helper exposes it so callers can map it without
//! re-inspecting the JSON shape.

mod config;
mod error;
mod scripted;
mod socket;

pub use config::{DEFAULT_SOCKET_PATH, SOCKET_PATH_ENV, TransportConfig, TransportConfigBuilder};
pub use error::{TransportError, error_marker};
pub use scripted::ScriptedTransport;
pub use socket::{MAX_REPLY_LENGTH, SocketTransport};

use serde_json::Value;

/// A single-request, single-reply channel to the cluster manager.
///
/// Implementations take `&mut self`: every call is a fresh round trip and
/// no state is shared across concurrent callers, matching the control
/// plane's request-scoped lifecycle.
pub trait Transport {
    /// Sends one request and returns the decoded JSON reply.
    fn execute(&mut self, request: &str) -> Result<Value, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn execute(&mut self, request: &str) -> Result<Value, TransportError> {
        (**self).execute(request)
    }
}
