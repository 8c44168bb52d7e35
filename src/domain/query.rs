//! Listing queries shared by the product and category collections.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// Column of a remote table that can be filtered or ordered on.
pub trait Column: Copy + Debug + PartialEq + Send + Sync + 'static {
    /// Name of the column as stored in the remote table.
    fn name(&self) -> &'static str;
}

/// Sort direction requested from the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "asc")]
    Ascending,
    #[default]
    #[serde(rename = "desc")]
    Descending,
}

/// Row predicate applied by the remote store.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter<C> {
    /// Column equals the value.
    Eq(C, String),
    /// Column differs from the value.
    Neq(C, String),
    /// Column holds a value.
    NotNull(C),
}

/// Ordering applied to a listing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortOrder<C> {
    pub column: C,
    pub direction: Direction,
}

/// Query definition used to list records of one collection.
///
/// Ordering and truncation are delegated to the store; nothing is re-sorted
/// locally.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery<C> {
    /// Predicates that every returned row satisfies.
    pub filters: Vec<Filter<C>>,
    /// Optional ordering of the returned rows.
    pub order: Option<SortOrder<C>>,
    /// Optional maximum number of rows.
    pub limit: Option<usize>,
}

impl<C: Column> Default for ListQuery<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Column> ListQuery<C> {
    /// Construct a query that targets every row of the collection.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Keep only rows where `column` equals `value`.
    pub fn eq(mut self, column: C, value: impl Into<String>) -> Self {
        self.filters.push(Filter::Eq(column, value.into()));
        self
    }

    /// Drop rows where `column` equals `value`.
    pub fn neq(mut self, column: C, value: impl Into<String>) -> Self {
        self.filters.push(Filter::Neq(column, value.into()));
        self
    }

    /// Keep only rows where `column` is not null.
    pub fn not_null(mut self, column: C) -> Self {
        self.filters.push(Filter::NotNull(column));
        self
    }

    /// Order the rows by `column`.
    pub fn order_by(mut self, column: C, direction: Direction) -> Self {
        self.order = Some(SortOrder { column, direction });
        self
    }

    /// Truncate the result to at most `limit` rows.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}
