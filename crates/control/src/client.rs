use std::collections::BTreeSet;

use protocol::{AgentQuery, FileQuery, health_request, list_nodes_request, sync_request};
use serde_json::Value;
use tracing::debug;
use transport::{Transport, TransportError, error_marker};

use crate::aggregate::aggregate_nodes;
use crate::agents::AgentPage;
use crate::error::ControlError;
use crate::node::{NodeListing, NodePage, NodeRecord};
use crate::projection;
use crate::query::NodeQuery;
use crate::validate;

/// Control-plane client: one operation, one transport round trip.
///
/// The client holds no state beyond the transport; every result is freshly
/// allocated per call and two consecutive calls may observe different
/// cluster snapshots.
#[derive(Debug)]
pub struct ClusterClient<T> {
    transport: T,
}

impl<T: Transport> ClusterClient<T> {
    /// Wraps a transport.
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Releases the underlying transport.
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Lists cluster nodes, optionally restricted to a requested subset.
    ///
    /// Requested names the manager did not answer for are reported in the
    /// listing's `node_error`, never as an error. No validation runs on
    /// this path.
    pub fn list_nodes(
        &mut self,
        requested_subset: Option<&BTreeSet<String>>,
    ) -> Result<NodeListing, ControlError> {
        let reply = self.transport.execute(&list_nodes_request())?;
        let listing = aggregate_nodes(reply, requested_subset)?;
        debug!(nodes = listing.items.len(), missing = listing.node_error.len(), "aggregated node listing");
        Ok(listing)
    }

    /// Runs a validated, projected node listing.
    ///
    /// Validation fails fast, before the listing request is even sent.
    pub fn query_nodes(&mut self, query: &NodeQuery) -> Result<NodePage, ControlError> {
        validate::validate_query(query)?;
        let listing = self.list_nodes(None)?;
        let page = projection::apply(listing.items, query);
        debug!(total = page.total_items, returned = page.items.len(), "projected node listing");
        Ok(page)
    }

    /// Fetches a single node by exact name, optionally projected.
    ///
    /// Fails with [`ControlError::NodeNotFound`] when the name matches no
    /// node — unlike [`list_nodes`](Self::list_nodes), which reports the
    /// miss through `node_error`.
    pub fn get_node(
        &mut self,
        name: &str,
        select: Option<&BTreeSet<String>>,
    ) -> Result<NodeRecord, ControlError> {
        if let Some(fields) = select {
            validate::validate_select(fields)?;
        }
        let listing = self.list_nodes(None)?;
        let record = projection::filter_records(listing.items, Some(name), None)
            .into_iter()
            .next()
            .ok_or_else(|| ControlError::NodeNotFound(name.to_owned()))?;
        Ok(match select {
            Some(fields) => record.project(fields),
            None => record,
        })
    }

    /// Runs a cluster health check, optionally restricted to one node
    /// server-side.
    pub fn health_check(&mut self, filter_node: Option<&str>) -> Result<Value, ControlError> {
        self.execute_checked(&health_request(filter_node))
    }

    /// Triggers a synchronization, cluster-wide or for one node.
    pub fn sync(&mut self, filter_node: Option<&str>) -> Result<Value, ControlError> {
        self.execute_checked(&sync_request(filter_node))
    }

    /// Lists synchronized files, optionally restricted by file and node
    /// lists.
    pub fn list_files(&mut self, query: &FileQuery) -> Result<Value, ControlError> {
        let request = query.to_request()?;
        self.execute_checked(&request)
    }

    /// Lists agents through the distributed API proxy, optionally filtered
    /// by status and node.
    pub fn list_agents(
        &mut self,
        filter_status: Option<&str>,
        filter_node: Option<&str>,
    ) -> Result<AgentPage, ControlError> {
        let request = AgentQuery::new(filter_status, filter_node).to_request()?;
        let reply = self.execute_checked(&request)?;
        let data = reply
            .get("data")
            .cloned()
            .ok_or_else(|| ControlError::MalformedReply("dapi reply lacks the data member".to_owned()))?;
        serde_json::from_value(data)
            .map_err(|err| ControlError::MalformedReply(format!("dapi agent payload: {err}")))
    }

    /// Executes a request and maps the manager's error marker to a
    /// transport error before the caller sees the reply.
    fn execute_checked(&mut self, request: &str) -> Result<Value, ControlError> {
        let reply = self.transport.execute(request)?;
        if let Some(message) = error_marker(&reply) {
            return Err(TransportError::remote(message).into());
        }
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Search;
    use serde_json::json;
    use transport::ScriptedTransport;

    fn cluster_reply() -> Value {
        json!({
            "master-1": {"type": "master", "version": "4.2", "ip": "10.0.0.1"},
            "worker-1": {"type": "client", "version": "4.1", "ip": "10.0.0.2"},
        })
    }

    fn subset(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|name| (*name).to_owned()).collect()
    }

    #[test]
    fn get_node_returns_the_record_directly() {
        let transport = ScriptedTransport::new().reply("get_nodes", cluster_reply());
        let mut client = ClusterClient::new(transport);

        let record = client.get_node("worker-1", None).unwrap();
        assert_eq!(record.name(), "worker-1");
        assert_eq!(record.node_type(), Some("client"));
    }

    #[test]
    fn get_node_projects_the_selected_fields() {
        let transport = ScriptedTransport::new().reply("get_nodes", cluster_reply());
        let mut client = ClusterClient::new(transport);

        let fields = subset(&["ip", "name"]);
        let record = client.get_node("master-1", Some(&fields)).unwrap();
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("ip"), Some(&json!("10.0.0.1")));
    }

    #[test]
    fn get_node_on_missing_name_is_not_found() {
        let transport = ScriptedTransport::new().reply("get_nodes", cluster_reply());
        let mut client = ClusterClient::new(transport);

        let err = client.get_node("ghost", None).unwrap_err();
        assert!(matches!(err, ControlError::NodeNotFound(name) if name == "ghost"));
    }

    #[test]
    fn same_missing_name_in_a_listing_is_data_not_error() {
        let transport = ScriptedTransport::new().reply("get_nodes", cluster_reply());
        let mut client = ClusterClient::new(transport);

        let requested = subset(&["worker-1", "ghost"]);
        let listing = client.list_nodes(Some(&requested)).unwrap();
        assert_eq!(listing.node_error, ["ghost"]);
        assert!(listing.items.contains_key("worker-1"));
    }

    #[test]
    fn invalid_select_fails_before_any_request_is_sent() {
        let transport = ScriptedTransport::new();
        let mut client = ClusterClient::new(transport);

        let query = NodeQuery::default().with_select(subset(&["os"]));
        let err = client.query_nodes(&query).unwrap_err();
        assert!(err.is_validation());
        assert!(client.into_inner().served().is_empty());
    }

    #[test]
    fn invalid_type_filter_fails_before_any_request_is_sent() {
        let transport = ScriptedTransport::new();
        let mut client = ClusterClient::new(transport);

        let query = NodeQuery::default().with_filter_type("backup");
        let err = client.query_nodes(&query).unwrap_err();
        assert!(matches!(err, ControlError::InvalidNodeType { .. }));
        assert!(client.into_inner().served().is_empty());
    }

    #[test]
    fn query_nodes_runs_the_pipeline() {
        let transport = ScriptedTransport::new().reply("get_nodes", cluster_reply());
        let mut client = ClusterClient::new(transport);

        let query = NodeQuery::default()
            .with_filter_type("client")
            .with_search(Search::matching("worker"));
        let page = client.query_nodes(&query).unwrap();
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].name(), "worker-1");
    }

    #[test]
    fn health_check_embeds_the_node_filter_in_the_request() {
        let transport = ScriptedTransport::new()
            .reply("get_health node01", json!({"node01": {"status": "connected"}}));
        let mut client = ClusterClient::new(transport);

        let reply = client.health_check(Some("node01")).unwrap();
        assert_eq!(reply["node01"]["status"], "connected");
        assert_eq!(client.into_inner().served(), ["get_health node01"]);
    }

    #[test]
    fn sync_without_filter_sends_the_bare_opcode() {
        let transport = ScriptedTransport::new().reply("sync", json!({"synchronized": 3}));
        let mut client = ClusterClient::new(transport);

        client.sync(None).unwrap();
        assert_eq!(client.into_inner().served(), ["sync"]);
    }

    #[test]
    fn error_markers_surface_as_remote_transport_errors() {
        let transport =
            ScriptedTransport::new().reply("sync", json!({"err": "cluster disabled"}));
        let mut client = ClusterClient::new(transport);

        let err = client.sync(None).unwrap_err();
        match err {
            ControlError::Transport(transport) => {
                assert_eq!(transport.remote_message(), Some("cluster disabled"));
            }
            other => panic!("expected a transport error, got {other:?}"),
        }
    }

    #[test]
    fn list_agents_decodes_the_data_member() {
        let request = AgentQuery::new(Some("active"), None).to_request().unwrap();
        let transport = ScriptedTransport::new().reply(
            request,
            json!({
                "error": 0,
                "data": {
                    "items": [{"id": "001", "ip": "10.0.1.4", "name": "web-01",
                               "status": "active", "node_name": "worker-1"}],
                    "totalItems": 1,
                },
            }),
        );
        let mut client = ClusterClient::new(transport);

        let page = client.list_agents(Some("active"), None).unwrap();
        assert_eq!(page.total_items, 1);
        assert_eq!(page.items[0].name, "web-01");
    }

    #[test]
    fn list_agents_without_data_member_is_malformed() {
        let request = AgentQuery::new(None, None).to_request().unwrap();
        let transport = ScriptedTransport::new().reply(request, json!({"error": 0}));
        let mut client = ClusterClient::new(transport);

        let err = client.list_agents(None, None).unwrap_err();
        assert!(matches!(err, ControlError::MalformedReply(_)));
    }

    #[test]
    fn list_files_sends_the_structured_payload() {
        let query = FileQuery::new(
            Some(vec!["a.conf".to_owned()]),
            Some(vec!["node01".to_owned(), "node02".to_owned()]),
        );
        let request = query.to_request().unwrap();
        let transport = ScriptedTransport::new().reply(request.clone(), json!({"a.conf": "ok"}));
        let mut client = ClusterClient::new(transport);

        client.list_files(&query).unwrap();
        assert_eq!(client.into_inner().served(), [request]);
    }
}
