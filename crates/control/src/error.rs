use protocol::RequestError;
use thiserror::Error;
use transport::TransportError;

/// Control-plane error taxonomy.
///
/// Listing queries never raise for individual missing nodes — those are
/// reported through [`NodeListing::node_error`](crate::NodeListing) — while
/// single-node queries always raise [`ControlError::NodeNotFound`]. The
/// asymmetry is a deliberate contract.
#[derive(Debug, Error)]
pub enum ControlError {
    /// The transport failed, or the manager replied with its error marker.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// A request payload could not be built.
    #[error(transparent)]
    Request(#[from] RequestError),
    /// Caller-supplied select fields outside the allowed set.
    #[error("allowed select fields: {}; rejected fields: {}", .allowed.join(", "), .rejected.join(", "))]
    InvalidSelectFields {
        /// The fixed allow-list the selection was checked against.
        allowed: &'static [&'static str],
        /// Every offending field, so callers see the full violation at once.
        rejected: Vec<String>,
    },
    /// Caller-supplied type filter outside the allowed set.
    #[error("{given} is not a valid node type; allowed types: {}", .allowed.join(", "))]
    InvalidNodeType {
        /// The rejected type filter value.
        given: String,
        /// The fixed allow-list of node types.
        allowed: &'static [&'static str],
    },
    /// A single-node query matched zero records.
    #[error("node {0} does not exist")]
    NodeNotFound(String),
    /// The reply arrived but did not have the JSON shape the operation
    /// requires.
    #[error("malformed cluster reply: {0}")]
    MalformedReply(String),
}

impl ControlError {
    /// Reports whether the error was raised by input validation, before any
    /// data was touched.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidSelectFields { .. } | Self::InvalidNodeType { .. })
    }

    /// Process exit code for the CLI: validation failures are usage errors,
    /// a missing node is its own condition, everything else is a runtime
    /// failure.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidSelectFields { .. } | Self::InvalidNodeType { .. } => 2,
            Self::NodeNotFound(_) => 3,
            Self::Transport(_) | Self::Request(_) | Self::MalformedReply(_) => 1,
        }
    }
}
