use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One aggregated node listing, keyed by node name.
///
/// `BTreeMap` iteration is name order, which is the deterministic
/// "insertion order" the projection pipeline falls back to when no sort was
/// requested.
pub type NodeSet = BTreeMap<String, NodeRecord>;

/// Snapshot of one cluster member.
///
/// The manager decides which fields a node carries; besides the well-known
/// `name`, `type`, `version`, and `ip` members a record keeps whatever extra
/// fields the transport supplied. Records are request-scoped and never
/// cached across calls.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeRecord(Map<String, Value>);

impl NodeRecord {
    /// Wraps a JSON object as a node record; non-objects yield `None`.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self(fields)),
            _ => None,
        }
    }

    /// Returns the node name. The aggregator guarantees the field is set
    /// from the listing key, which is the record's identity.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.get("name").and_then(Value::as_str).unwrap_or_default()
    }

    /// Overwrites the node name. Used by the aggregator to make the listing
    /// key authoritative even when the per-node payload disagrees.
    pub fn set_name(&mut self, name: &str) {
        self.0.insert("name".to_owned(), Value::String(name.to_owned()));
    }

    /// Returns the node type (`client` or `master`), when present.
    #[must_use]
    pub fn node_type(&self) -> Option<&str> {
        self.0.get("type").and_then(Value::as_str)
    }

    /// Returns the raw value of a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Returns a field rendered as text: strings verbatim, everything else
    /// as compact JSON. Used by the search and sort collaborators.
    #[must_use]
    pub fn field_text(&self, field: &str) -> Option<String> {
        self.0.get(field).map(|value| match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
    }

    /// Returns a new record holding only the selected fields, with values
    /// copied. Fields the record does not carry are simply absent from the
    /// projection.
    #[must_use]
    pub fn project(&self, fields: &BTreeSet<String>) -> Self {
        let mut projected = Map::new();
        for field in fields {
            if let Some(value) = self.0.get(field) {
                projected.insert(field.clone(), value.clone());
            }
        }
        Self(projected)
    }

    /// Iterates over the field names the record carries.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of fields the record carries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Reports whether the record carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Result of a raw (unprojected) node listing.
///
/// When an explicit node subset was requested, `node_error` lists every
/// requested name the manager did not answer for. Partial failure is data
/// here, not an error: callers must check `node_error` even on success.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NodeListing {
    /// Aggregated nodes, keyed by name.
    pub items: NodeSet,
    /// Requested-but-missing node names; empty when no subset was given.
    pub node_error: Vec<String>,
}

/// One page of a projected node listing.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct NodePage {
    /// Records in final pipeline order.
    pub items: Vec<NodeRecord>,
    /// Size of the filtered and searched set, counted before pagination.
    #[serde(rename = "totalItems")]
    pub total_items: usize,
}
