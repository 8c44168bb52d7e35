//! Translation of listing queries into the store's query-string dialect.

use crate::domain::query::{Column, Direction, Filter, ListQuery};

/// Query-string pairs sent to the store.
pub type Params = Vec<(String, String)>;

/// Build the query string for a listing.
///
/// Descending orders put rows without a value last so they never outrank
/// rows that have one.
pub fn list_params<C: Column>(query: &ListQuery<C>) -> Params {
    let mut params = vec![("select".to_string(), "*".to_string())];

    for filter in &query.filters {
        params.push(filter_param(filter));
    }

    if let Some(order) = &query.order {
        let value = match order.direction {
            Direction::Ascending => format!("{}.asc", order.column.name()),
            Direction::Descending => format!("{}.desc.nullslast", order.column.name()),
        };
        params.push(("order".to_string(), value));
    }

    if let Some(limit) = query.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }

    params
}

/// Build the query string addressing the row with the given identity.
pub fn id_params(id: i64) -> Params {
    vec![("id".to_string(), format!("eq.{id}"))]
}

/// Build the query string addressing a product by key.
///
/// Products may be keyed by `id` or by the older `product_id` column, so
/// either one matching is enough.
pub fn product_key_params(id: i64) -> Params {
    vec![("or".to_string(), format!("(id.eq.{id},product_id.eq.{id})"))]
}

fn filter_param<C: Column>(filter: &Filter<C>) -> (String, String) {
    match filter {
        Filter::Eq(column, value) => (column.name().to_string(), format!("eq.{value}")),
        Filter::Neq(column, value) => (column.name().to_string(), format!("neq.{value}")),
        Filter::NotNull(column) => (column.name().to_string(), "not.is.null".to_string()),
    }
}
