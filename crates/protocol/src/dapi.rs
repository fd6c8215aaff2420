use serde::{Deserialize, Serialize};

use crate::error::RequestError;
use crate::request::OP_DAPI;

/// Distributed API function handling agent queries.
pub const AGENTS_FUNCTION: &str = "/agents";

/// Wildcard substituted for absent agent filters.
pub const FILTER_WILDCARD: &str = "all";

/// Field selection the agent listing always requests.
///
/// The control plane projects agents down to this fixed set; callers never
/// choose agent fields the way they choose node fields.
pub const AGENT_SELECT_FIELDS: [&str; 5] = ["id", "ip", "name", "status", "node_name"];

/// Structured envelope for agent queries routed through the `dapi` opcode.
///
/// Unlike the other opcodes this payload is a self-describing object rather
/// than positional text, because the distributed API proxy fans it into the
/// cluster unchanged. `from_cluster` is always `false` (the query originates
/// outside the cluster) and `limit` is always `0`, which the agents
/// sub-resource reads as "unlimited".
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct AgentQuery {
    function: String,
    from_cluster: bool,
    limit: u64,
    arguments: AgentArguments,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
struct AgentArguments {
    filters: AgentFilters,
    select: AgentSelect,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
struct AgentFilters {
    status: String,
    node_name: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
struct AgentSelect {
    fields: Vec<String>,
}

impl AgentQuery {
    /// Builds an agent query, substituting the [`FILTER_WILDCARD`] for any
    /// absent filter.
    #[must_use]
    pub fn new(filter_status: Option<&str>, filter_node: Option<&str>) -> Self {
        Self {
            function: AGENTS_FUNCTION.to_owned(),
            from_cluster: false,
            limit: 0,
            arguments: AgentArguments {
                filters: AgentFilters {
                    status: filter_status.unwrap_or(FILTER_WILDCARD).to_owned(),
                    node_name: filter_node.unwrap_or(FILTER_WILDCARD).to_owned(),
                },
                select: AgentSelect {
                    fields: AGENT_SELECT_FIELDS.iter().map(|field| (*field).to_owned()).collect(),
                },
            },
        }
    }

    /// Returns the status filter carried by the envelope.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.arguments.filters.status
    }

    /// Returns the node-name filter carried by the envelope.
    #[must_use]
    pub fn node_name(&self) -> &str {
        &self.arguments.filters.node_name
    }

    /// Renders the full request text: the `dapi` opcode followed by the
    /// serialized envelope.
    pub fn to_request(&self) -> Result<String, RequestError> {
        let envelope = serde_json::to_string(self).map_err(RequestError::Encode)?;
        Ok(format!("{OP_DAPI} {envelope}"))
    }
}
