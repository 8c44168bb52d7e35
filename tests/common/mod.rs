//! Helpers for integration tests.
//!
//! [`TestStore`] is an in-process stand-in for the hosted table store. It
//! speaks the subset of the PostgREST dialect the repository uses and keeps
//! rows in memory.

#![allow(dead_code)]

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Mutex;

use actix_web::http::{Method, StatusCode};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use chrono::{Duration, TimeZone, Utc};
use serde_json::{Map, Value, json};

use pushkind_storefront::config::StoreConfig;
use pushkind_storefront::repository::RestRepository;
use pushkind_storefront::repository::client::StoreClient;

pub const TEST_KEY: &str = "test-anon-key";

type Row = Map<String, Value>;

struct Tables {
    rows: HashMap<String, Vec<Row>>,
    next_id: i64,
}

struct State {
    key: String,
    tables: Mutex<Tables>,
}

/// In-memory table store served over HTTP on a random local port.
pub struct TestStore {
    url: String,
    state: web::Data<State>,
}

impl TestStore {
    pub async fn start() -> Self {
        let state = web::Data::new(State {
            key: TEST_KEY.to_string(),
            tables: Mutex::new(Tables {
                rows: HashMap::from([
                    ("products".to_string(), Vec::new()),
                    ("categories".to_string(), Vec::new()),
                ]),
                next_id: 1,
            }),
        });

        let app_state = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(app_state.clone())
                .route("/rest/v1/{table}", web::route().to(handle))
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .expect("Failed to bind test store.");

        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());

        TestStore {
            url: format!("http://{addr}"),
            state,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn config(&self) -> StoreConfig {
        StoreConfig::new(self.url.clone(), TEST_KEY)
    }

    pub fn repo(&self) -> RestRepository {
        RestRepository::new(StoreClient::new(&self.config()))
    }

    /// Store `row` as is, bypassing every constraint.
    pub fn seed(&self, table: &str, row: Value) {
        let Value::Object(row) = row else {
            panic!("seeded rows must be objects");
        };
        let mut tables = self.state.tables.lock().expect("lock");
        tables.rows.entry(table.to_string()).or_default().push(row);
    }

    pub fn row_count(&self, table: &str) -> usize {
        let tables = self.state.tables.lock().expect("lock");
        tables.rows.get(table).map_or(0, Vec::len)
    }
}

/// Repository pointing at a port nothing listens on.
pub fn unreachable_repo() -> RestRepository {
    RestRepository::new(StoreClient::new(&StoreConfig::new(
        "http://127.0.0.1:1",
        TEST_KEY,
    )))
}

fn store_error(status: u16, code: &str, message: &str) -> HttpResponse {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    HttpResponse::build(status).json(json!({
        "code": code,
        "message": message,
        "details": null,
        "hint": null,
    }))
}

async fn handle(
    req: HttpRequest,
    table: web::Path<String>,
    query: web::Query<Vec<(String, String)>>,
    body: web::Bytes,
    state: web::Data<State>,
) -> HttpResponse {
    let key = req.headers().get("apikey").and_then(|v| v.to_str().ok());
    let bearer = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    if key != Some(state.key.as_str()) || bearer != Some(state.key.as_str()) {
        return store_error(401, "PGRST301", "Invalid API key");
    }

    let table = table.into_inner();
    let params = query.into_inner();
    let mut tables = state.tables.lock().expect("lock");

    if !tables.rows.contains_key(&table) {
        return store_error(
            404,
            "42P01",
            &format!("relation \"public.{table}\" does not exist"),
        );
    }

    match *req.method() {
        Method::GET => {
            let single = req
                .headers()
                .get("Accept")
                .and_then(|v| v.to_str().ok())
                == Some("application/vnd.pgrst.object+json");
            let rows = select(&tables.rows[&table], &params);
            if single {
                if rows.len() == 1 {
                    HttpResponse::Ok().json(&rows[0])
                } else {
                    store_error(
                        406,
                        "PGRST116",
                        "JSON object requested, multiple (or no) rows returned",
                    )
                }
            } else {
                HttpResponse::Ok().json(rows)
            }
        }
        Method::POST => {
            let incoming: Vec<Row> = match serde_json::from_slice::<Value>(&body) {
                Ok(Value::Array(items)) => items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Object(row) => Some(row),
                        _ => None,
                    })
                    .collect(),
                Ok(Value::Object(row)) => vec![row],
                _ => return store_error(400, "PGRST102", "Empty or invalid json"),
            };

            let existing = &tables.rows[&table];
            let mut batch: Vec<Row> = Vec::new();
            for row in &incoming {
                if let Err(response) = check_constraints(&table, row, existing.iter().chain(&batch))
                {
                    return response;
                }
                batch.push(row.clone());
            }

            let mut inserted = Vec::with_capacity(batch.len());
            for mut row in batch {
                let id = tables.next_id;
                tables.next_id += 1;
                row.insert("id".to_string(), json!(id));
                row.insert("created_at".to_string(), json!(timestamp(id)));
                inserted.push(row);
            }
            tables
                .rows
                .entry(table)
                .or_default()
                .extend(inserted.iter().cloned());

            HttpResponse::Created().json(inserted)
        }
        Method::PATCH => {
            let Ok(Value::Object(patch)) = serde_json::from_slice::<Value>(&body) else {
                return store_error(400, "PGRST102", "Empty or invalid json");
            };

            let rows = tables.rows.get(&table).cloned().unwrap_or_default();
            let (matching, others): (Vec<Row>, Vec<Row>) =
                rows.into_iter().partition(|row| matches_all(row, &params));

            let mut updated = Vec::with_capacity(matching.len());
            for mut row in matching {
                for (column, value) in &patch {
                    row.insert(column.clone(), value.clone());
                }
                if let Err(response) =
                    check_constraints(&table, &row, others.iter().chain(&updated))
                {
                    return response;
                }
                updated.push(row);
            }

            let mut all = others;
            all.extend(updated.iter().cloned());
            all.sort_by_key(|row| row.get("id").and_then(Value::as_i64));
            tables.rows.insert(table, all);

            HttpResponse::Ok().json(updated)
        }
        Method::DELETE => {
            if let Some(rows) = tables.rows.get_mut(&table) {
                rows.retain(|row| !matches_all(row, &params));
            }
            HttpResponse::NoContent().finish()
        }
        _ => HttpResponse::MethodNotAllowed().finish(),
    }
}

fn timestamp(id: i64) -> String {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .map(|base| (base + Duration::seconds(id)).to_rfc3339())
        .unwrap_or_default()
}

fn check_constraints<'a>(
    table: &str,
    row: &Row,
    others: impl Iterator<Item = &'a Row>,
) -> Result<(), HttpResponse> {
    let required: &[&str] = match table {
        "products" => &["title", "price"],
        "categories" => &["title", "slug"],
        _ => &[],
    };
    for column in required {
        if row.get(*column).is_none_or(Value::is_null) {
            return Err(store_error(
                400,
                "23502",
                &format!(
                    "null value in column \"{column}\" of relation \"{table}\" violates not-null constraint"
                ),
            ));
        }
    }

    if table == "categories" {
        let slug = row.get("slug");
        let id = row.get("id");
        let duplicate = others
            .filter(|other| id.is_none() || other.get("id") != id)
            .any(|other| other.get("slug") == slug);
        if duplicate {
            return Err(store_error(
                409,
                "23505",
                "duplicate key value violates unique constraint \"categories_slug_key\"",
            ));
        }
    }

    Ok(())
}

fn select(rows: &[Row], params: &[(String, String)]) -> Vec<Row> {
    let mut selected: Vec<Row> = rows
        .iter()
        .filter(|row| matches_all(row, params))
        .cloned()
        .collect();

    if let Some((_, order)) = params.iter().find(|(key, _)| key == "order") {
        let mut parts = order.split('.');
        let column = parts.next().unwrap_or_default().to_string();
        let descending = parts.next() == Some("desc");
        let nulls_first = match parts.next() {
            Some("nullsfirst") => true,
            Some("nullslast") => false,
            _ => descending,
        };

        selected.sort_by(|a, b| {
            let a = a.get(&column).filter(|value| !value.is_null());
            let b = b.get(&column).filter(|value| !value.is_null());
            match (a, b) {
                (None, None) => Ordering::Equal,
                (None, Some(_)) if nulls_first => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) if nulls_first => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => {
                    let ordering = compare(a, b);
                    if descending { ordering.reverse() } else { ordering }
                }
            }
        });
    }

    if let Some(limit) = params
        .iter()
        .find(|(key, _)| key == "limit")
        .and_then(|(_, value)| value.parse::<usize>().ok())
    {
        selected.truncate(limit);
    }

    selected
}

fn matches_all(row: &Row, params: &[(String, String)]) -> bool {
    params
        .iter()
        .filter(|(key, _)| !matches!(key.as_str(), "select" | "order" | "limit"))
        .all(|(column, predicate)| {
            if column == "or" {
                matches_any(row, predicate)
            } else {
                matches(row, column, predicate)
            }
        })
}

/// Evaluate `(col.op.value,col.op.value)`.
fn matches_any(row: &Row, alternatives: &str) -> bool {
    alternatives
        .trim_start_matches('(')
        .trim_end_matches(')')
        .split(',')
        .filter_map(|alternative| alternative.split_once('.'))
        .any(|(column, predicate)| matches(row, column, predicate))
}

fn matches(row: &Row, column: &str, predicate: &str) -> bool {
    let value = row.get(column).filter(|value| !value.is_null());
    if let Some(expected) = predicate.strip_prefix("eq.") {
        value.map(text).as_deref() == Some(expected)
    } else if let Some(unexpected) = predicate.strip_prefix("neq.") {
        value.map(text).is_some_and(|actual| actual != unexpected)
    } else if predicate == "not.is.null" {
        value.is_some()
    } else if predicate == "is.null" {
        value.is_none()
    } else {
        false
    }
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) if f.fract() == 0.0 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

fn compare(a: &Value, b: &Value) -> Ordering {
    match (a.as_f64(), b.as_f64()) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        _ => text(a).cmp(&text(b)),
    }
}
