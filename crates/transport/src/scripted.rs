use std::collections::HashMap;

use serde_json::Value;

use crate::Transport;
use crate::error::TransportError;

/// In-memory transport replaying canned replies, for tests.
///
/// Replies are keyed by the exact request text, so a test that scripts
/// `"get_health node01"` also asserts the request builder produced that
/// precise payload. Served requests are recorded in order for further
/// assertions. Unscripted requests fail with a remote error naming the
/// request, which keeps a typo in a test visible instead of hanging it.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: HashMap<String, Value>,
    served: Vec<String>,
}

impl ScriptedTransport {
    /// Creates an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts `reply` for the exact request text.
    #[must_use]
    pub fn reply(mut self, request: impl Into<String>, reply: Value) -> Self {
        self.replies.insert(request.into(), reply);
        self
    }

    /// Returns every request served so far, in call order.
    #[must_use]
    pub fn served(&self) -> &[String] {
        &self.served
    }
}

impl Transport for ScriptedTransport {
    fn execute(&mut self, request: &str) -> Result<Value, TransportError> {
        self.served.push(request.to_owned());
        self.replies
            .get(request)
            .cloned()
            .ok_or_else(|| TransportError::remote(format!("unscripted request: {request}")))
    }
}
