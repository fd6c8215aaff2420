//! Aggregation of raw node replies into a [`NodeListing`].
//!
//! This is the only place where partial failure is surfaced as data rather
//! than as an error: when a subset was requested, every requested name the
//! manager did not answer for lands in `node_error`, and the union of the
//! item keys and `node_error` equals the requested subset exactly.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::debug;
use transport::{TransportError, error_marker};

use crate::error::ControlError;
use crate::node::{NodeListing, NodeRecord, NodeSet};

/// Aggregates a raw node reply, optionally restricted to a requested subset.
///
/// A reply carrying the manager's error marker is propagated as a transport
/// error without any aggregation. Otherwise each entry of the reply object
/// becomes a [`NodeRecord`] whose `name` field is set from the listing key.
pub fn aggregate_nodes(
    reply: Value,
    requested_subset: Option<&BTreeSet<String>>,
) -> Result<NodeListing, ControlError> {
    if let Some(message) = error_marker(&reply) {
        return Err(TransportError::remote(message).into());
    }

    let entries = match reply {
        Value::Object(entries) => entries,
        other => {
            return Err(ControlError::MalformedReply(format!(
                "node listing must be a JSON object, got {}",
                json_kind(&other)
            )));
        }
    };

    let mut items = NodeSet::new();
    for (name, value) in entries {
        if requested_subset.is_some_and(|subset| !subset.contains(&name)) {
            continue;
        }
        let mut record = NodeRecord::from_value(value).ok_or_else(|| {
            ControlError::MalformedReply(format!("entry for node {name} is not a JSON object"))
        })?;
        record.set_name(&name);
        items.insert(name, record);
    }

    let node_error: Vec<String> = requested_subset
        .map(|subset| subset.iter().filter(|name| !items.contains_key(*name)).cloned().collect())
        .unwrap_or_default();
    if !node_error.is_empty() {
        debug!(missing = node_error.len(), "requested nodes absent from listing");
    }

    Ok(NodeListing { items, node_error })
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
