//! Fail-fast validation of caller-supplied query parameters.
//!
//! The allow-lists live here as immutable constants; nothing at runtime can
//! widen or narrow them. Validation runs once per request, before the
//! projection pipeline touches any data, and is side-effect free. The raw
//! [`list_nodes`](crate::ClusterClient::list_nodes) path deliberately
//! performs no validation at all — only projected queries do.

use std::collections::BTreeSet;

use crate::error::ControlError;
use crate::query::NodeQuery;

/// Fields a caller may select from a node record.
pub const SELECT_FIELDS: [&str; 4] = ["name", "version", "type", "ip"];

/// Node types a caller may filter on.
pub const NODE_TYPES: [&str; 2] = ["client", "master"];

/// Checks a select-field set against [`SELECT_FIELDS`].
///
/// Unknown fields are never silently dropped: the error lists every
/// offender together with the allowed set.
pub fn validate_select(fields: &BTreeSet<String>) -> Result<(), ControlError> {
    let rejected: Vec<String> = fields
        .iter()
        .filter(|field| !SELECT_FIELDS.contains(&field.as_str()))
        .cloned()
        .collect();
    if rejected.is_empty() {
        Ok(())
    } else {
        Err(ControlError::InvalidSelectFields { allowed: &SELECT_FIELDS, rejected })
    }
}

/// Checks a type filter against [`NODE_TYPES`].
pub fn validate_node_type(node_type: &str) -> Result<(), ControlError> {
    if NODE_TYPES.contains(&node_type) {
        Ok(())
    } else {
        Err(ControlError::InvalidNodeType {
            given: node_type.to_owned(),
            allowed: &NODE_TYPES,
        })
    }
}

/// Validates everything a [`NodeQuery`] carries that is subject to an
/// allow-list. Sort and search parameters are intentionally unchecked.
pub fn validate_query(query: &NodeQuery) -> Result<(), ControlError> {
    if let Some(fields) = &query.select {
        validate_select(fields)?;
    }
    if let Some(node_type) = &query.filter_type {
        validate_node_type(node_type)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_set(fields: &[&str]) -> BTreeSet<String> {
        fields.iter().map(|field| (*field).to_owned()).collect()
    }

    #[test]
    fn every_allowed_subset_passes() {
        assert!(validate_select(&field_set(&["name"])).is_ok());
        assert!(validate_select(&field_set(&["name", "version", "type", "ip"])).is_ok());
        assert!(validate_select(&BTreeSet::new()).is_ok());
    }

    #[test]
    fn rejection_lists_exactly_the_offending_fields() {
        let err = validate_select(&field_set(&["name", "os", "uptime"])).unwrap_err();
        match err {
            ControlError::InvalidSelectFields { rejected, allowed } => {
                assert_eq!(rejected, ["os", "uptime"]);
                assert_eq!(allowed, &SELECT_FIELDS);
            }
            other => panic!("expected InvalidSelectFields, got {other:?}"),
        }
    }

    #[test]
    fn both_node_types_pass_and_others_fail() {
        assert!(validate_node_type("client").is_ok());
        assert!(validate_node_type("master").is_ok());

        let err = validate_node_type("Master").unwrap_err();
        assert!(matches!(err, ControlError::InvalidNodeType { .. }));
        assert!(err.to_string().contains("client, master"));
    }

    #[test]
    fn query_validation_checks_select_before_type() {
        let query = NodeQuery::default()
            .with_select(field_set(&["bogus"]))
            .with_filter_type("bogus");
        let err = validate_query(&query).unwrap_err();
        assert!(matches!(err, ControlError::InvalidSelectFields { .. }));
    }
}
