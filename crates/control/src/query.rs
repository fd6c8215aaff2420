use std::collections::BTreeSet;

/// Caller intent for a projected node listing.
///
/// Every part is optional; `limit` of `None` or `Some(0)` means "no
/// pagination, return all". The offset is ignored unless a non-zero limit
/// is present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeQuery {
    /// Keep only nodes of this type (`client` or `master`).
    pub filter_type: Option<String>,
    /// Project surviving records down to these fields.
    pub select: Option<BTreeSet<String>>,
    /// Free-text search applied after projection.
    pub search: Option<Search>,
    /// Stable sort applied after search.
    pub sort: Option<Sort>,
    /// First record of the returned page.
    pub offset: usize,
    /// Page size; `None` or `Some(0)` disables pagination.
    pub limit: Option<usize>,
}

impl NodeQuery {
    /// Sets the node type filter.
    #[must_use]
    pub fn with_filter_type(mut self, filter_type: impl Into<String>) -> Self {
        self.filter_type = Some(filter_type.into());
        self
    }

    /// Sets the select-field set.
    #[must_use]
    pub fn with_select(mut self, fields: BTreeSet<String>) -> Self {
        self.select = Some(fields);
        self
    }

    /// Sets the search spec.
    #[must_use]
    pub fn with_search(mut self, search: Search) -> Self {
        self.search = Some(search);
        self
    }

    /// Sets the sort spec.
    #[must_use]
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Sets the pagination window.
    #[must_use]
    pub const fn with_page(mut self, offset: usize, limit: usize) -> Self {
        self.offset = offset;
        self.limit = Some(limit);
        self
    }
}

/// Free-text search spec: substring value plus a negation flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Search {
    /// Substring to look for across the searchable fields.
    pub value: String,
    /// When set, keep the records that do NOT match.
    pub negation: bool,
}

impl Search {
    /// Search keeping the records that match `value`.
    #[must_use]
    pub fn matching(value: impl Into<String>) -> Self {
        Self { value: value.into(), negation: false }
    }

    /// Search keeping the records that do not match `value`.
    #[must_use]
    pub fn excluding(value: impl Into<String>) -> Self {
        Self { value: value.into(), negation: true }
    }
}

/// Sort spec: field list and direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sort {
    /// Fields compared in order; later fields break ties of earlier ones.
    pub fields: Vec<String>,
    /// Direction applied to the whole field list.
    pub order: SortOrder,
}

impl Sort {
    /// Ascending sort over the given fields.
    #[must_use]
    pub fn ascending(fields: Vec<String>) -> Self {
        Self { fields, order: SortOrder::Ascending }
    }

    /// Descending sort over the given fields.
    #[must_use]
    pub fn descending(fields: Vec<String>) -> Self {
        Self { fields, order: SortOrder::Descending }
    }
}

/// Sort direction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SortOrder {
    /// Smallest key first.
    Ascending,
    /// Largest key first.
    Descending,
}
