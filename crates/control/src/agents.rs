use serde::{Deserialize, Serialize};

/// One monitored agent, projected to the fixed agent field set.
///
/// The `dapi` envelope always selects these five fields (see
/// [`protocol::AGENT_SELECT_FIELDS`]); anything else the agents
/// sub-resource knows about never reaches this layer.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Agent identifier, zero-padded decimal as the manager assigns it.
    pub id: String,
    /// Registered agent IP address.
    #[serde(default)]
    pub ip: String,
    /// Agent display name.
    #[serde(default)]
    pub name: String,
    /// Connection status as the manager reports it.
    #[serde(default)]
    pub status: String,
    /// Name of the cluster node the agent reports to.
    #[serde(default)]
    pub node_name: String,
}

/// The `data` member of a `dapi` agents reply.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct AgentPage {
    /// Agents in the order the sub-resource returned them.
    pub items: Vec<Agent>,
    /// Total matching agents, as counted by the sub-resource.
    #[serde(rename = "totalItems", default)]
    pub total_items: u64,
}
