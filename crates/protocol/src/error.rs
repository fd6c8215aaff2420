use thiserror::Error;

/// Errors produced while formatting or parsing request payloads.
#[derive(Debug, Error)]
pub enum RequestError {
    /// A structured argument blob could not be serialized to JSON.
    #[error("failed to encode request arguments: {0}")]
    Encode(#[source] serde_json::Error),
    /// A structured argument blob could not be parsed back from JSON.
    #[error("failed to decode request arguments: {0}")]
    Decode(#[source] serde_json::Error),
    /// The request text was empty or contained no opcode token.
    #[error("request carries no opcode token")]
    MissingOpcode,
    /// The request named a different opcode than the parser expected.
    #[error("expected opcode {expected:?}, found {found:?}")]
    UnexpectedOpcode {
        /// The opcode the parser was asked to match.
        expected: &'static str,
        /// The opcode token actually present in the request text.
        found: String,
    },
    /// The opcode requires an argument blob but none was present.
    #[error("opcode {0:?} requires an argument blob")]
    MissingArguments(&'static str),
}
