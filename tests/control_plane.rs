//! End-to-end exercises of the control plane over a scripted transport.

use std::collections::BTreeSet;

use serde_json::json;

use control::{ClusterClient, ControlError, NodeQuery, Search, Sort};
use protocol::{AgentQuery, FileQuery};
use transport::ScriptedTransport;

fn cluster_reply() -> serde_json::Value {
    json!({
        "master-1": {"type": "master", "version": "4.2", "ip": "10.0.0.1"},
        "worker-1": {"type": "client", "version": "4.1", "ip": "10.0.0.2"},
        "worker-2": {"type": "client", "version": "4.2", "ip": "10.0.0.3"},
    })
}

#[test]
fn listing_query_and_single_node_query_disagree_on_misses_by_design() {
    let transport = ScriptedTransport::new().reply("get_nodes", cluster_reply());
    let mut client = ClusterClient::new(transport);

    let requested: BTreeSet<String> =
        ["worker-1", "ghost"].iter().map(|name| (*name).to_owned()).collect();
    let listing = client.list_nodes(Some(&requested)).expect("listing succeeds");
    assert_eq!(listing.node_error, ["ghost"]);

    let transport = ScriptedTransport::new().reply("get_nodes", cluster_reply());
    let mut client = ClusterClient::new(transport);
    let err = client.get_node("ghost", None).expect_err("single-node query raises");
    assert!(matches!(err, ControlError::NodeNotFound(_)));
}

#[test]
fn full_pipeline_filters_projects_sorts_and_pages() {
    let transport = ScriptedTransport::new().reply("get_nodes", cluster_reply());
    let mut client = ClusterClient::new(transport);

    let select: BTreeSet<String> =
        ["name", "version"].iter().map(|field| (*field).to_owned()).collect();
    let query = NodeQuery::default()
        .with_filter_type("client")
        .with_select(select)
        .with_search(Search::matching("worker"))
        .with_sort(Sort::descending(vec!["version".to_owned()]))
        .with_page(0, 1);

    let page = client.query_nodes(&query).expect("query succeeds");
    assert_eq!(page.total_items, 2);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name(), "worker-2");
    assert_eq!(page.items[0].len(), 2);
}

#[test]
fn files_request_round_trips_through_the_reference_decoder() {
    let query = FileQuery::new(
        Some(vec!["a.conf".to_owned()]),
        Some(vec!["node01".to_owned(), "node02".to_owned()]),
    );
    let request = query.to_request().expect("encoding succeeds");
    assert_eq!(FileQuery::parse_request(&request).expect("decoding succeeds"), query);
}

#[test]
fn agents_request_reaches_the_transport_verbatim() {
    let request = AgentQuery::new(None, Some("worker-1")).to_request().expect("encodes");
    let transport = ScriptedTransport::new().reply(
        request.clone(),
        json!({"data": {"items": [], "totalItems": 0}}),
    );
    let mut client = ClusterClient::new(transport);

    let page = client.list_agents(None, Some("worker-1")).expect("agent listing succeeds");
    assert_eq!(page.total_items, 0);
    assert_eq!(client.into_inner().served(), [request]);
}
