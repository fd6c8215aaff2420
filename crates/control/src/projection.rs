//! The filter → select → search → sort → paginate pipeline.
//!
//! Stages run in that fixed order, each only when the caller supplied
//! the corresponding parameter.
//! `total_items` is always counted after search and before pagination, so
//! callers can page through a result set whose size they know. The final
//! sequence order is the sort order or, when no sort was requested, the
//! name order the [`NodeSet`] iterates in.

use std::cmp::Ordering;

use crate::node::{NodePage, NodeRecord, NodeSet};
use crate::query::{NodeQuery, Search, Sort, SortOrder};

/// Fields the free-text search inspects, regardless of any projection.
pub const SEARCH_FIELDS: [&str; 4] = ["name", "type", "version", "ip"];

/// Node-name and type filtering, exact match only.
///
/// A record survives iff (no node filter or its name matches) and (no type
/// filter or its type matches). Consumes the set and returns the survivors
/// in iteration order.
#[must_use]
pub fn filter_records(
    items: NodeSet,
    filter_node: Option<&str>,
    filter_type: Option<&str>,
) -> Vec<NodeRecord> {
    items
        .into_iter()
        .filter(|(name, record)| {
            filter_node.is_none_or(|wanted| name == wanted)
                && filter_type.is_none_or(|wanted| record.node_type() == Some(wanted))
        })
        .map(|(_, record)| record)
        .collect()
}

/// Substring search over [`SEARCH_FIELDS`].
///
/// Matching is case-insensitive on both sides and skips fields a record
/// does not carry (a projected record only exposes its selected fields).
/// Negation inverts the keep condition.
#[must_use]
pub fn search_records(records: Vec<NodeRecord>, search: &Search) -> Vec<NodeRecord> {
    let needle = search.value.to_lowercase();
    records
        .into_iter()
        .filter(|record| {
            let hit = SEARCH_FIELDS.iter().any(|field| {
                record
                    .field_text(field)
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            });
            hit != search.negation
        })
        .collect()
}

/// Stable sort by the requested field list and direction.
///
/// Field values compare as text; fields a record lacks compare as the empty
/// string. Descending order reverses the comparator only, so records with
/// equal keys keep their relative input order in both directions.
pub fn sort_records(records: &mut [NodeRecord], sort: &Sort) {
    records.sort_by(|a, b| {
        let mut ordering = Ordering::Equal;
        for field in &sort.fields {
            let left = a.field_text(field).unwrap_or_default();
            let right = b.field_text(field).unwrap_or_default();
            ordering = left.cmp(&right);
            if ordering != Ordering::Equal {
                break;
            }
        }
        match sort.order {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    });
}

/// Offset/limit slicing.
///
/// A limit of `None` or `Some(0)` returns the records untouched (the offset
/// is only meaningful together with a limit). Out-of-range windows yield an
/// empty result, never an error.
#[must_use]
pub fn paginate(records: Vec<NodeRecord>, offset: usize, limit: Option<usize>) -> Vec<NodeRecord> {
    match limit {
        Some(limit) if limit > 0 => records.into_iter().skip(offset).take(limit).collect(),
        _ => records,
    }
}

/// Runs the full listing pipeline over an aggregated node set.
///
/// Filter, select, search, and sort in that order, with `total_items`
/// snapshotted before the final pagination slice. Validation is the
/// caller's duty; this function assumes the query already passed
/// [`validate_query`](crate::validate::validate_query).
#[must_use]
pub fn apply(items: NodeSet, query: &NodeQuery) -> NodePage {
    let mut records = filter_records(items, None, query.filter_type.as_deref());
    if let Some(fields) = &query.select {
        records = records.iter().map(|record| record.project(fields)).collect();
    }
    if let Some(search) = &query.search {
        records = search_records(records, search);
    }
    if let Some(sort) = &query.sort {
        sort_records(&mut records, sort);
    }
    let total_items = records.len();
    let items = paginate(records, query.offset, query.limit);
    NodePage { items, total_items }
}
