//! HTTP client for the hosted table store (PostgREST dialect).

use std::fmt;

use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;
use crate::repository::errors::{RepositoryError, RepositoryResult};

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Error code used by the store when a single-row request matched zero or
/// several rows.
const NO_SINGLE_ROW: &str = "PGRST116";
/// Postgres `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Table-scoped client for the remote store.
///
/// Holds configuration only; cloning is cheap and every call is an
/// independent request.
#[derive(Clone)]
pub struct StoreClient {
    base_url: String,
    anon_key: String,
    http: Client,
}

impl fmt::Debug for StoreClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreClient")
            .field("base_url", &self.base_url)
            .field("anon_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl StoreClient {
    /// Create a client for the configured endpoint.
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
            http: Client::new(),
        }
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let url = format!("{}/rest/v1/{table}", self.base_url);
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    /// Fetch every row matching `params`.
    pub async fn select<T>(&self, table: &str, params: &[(String, String)]) -> RepositoryResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let response = self.request(Method::GET, table).query(params).send().await?;
        read_body(response).await
    }

    /// Fetch exactly one row matching `params`.
    ///
    /// Zero or several matches surface as [`RepositoryError::NotFound`].
    pub async fn select_one<T>(&self, table: &str, params: &[(String, String)]) -> RepositoryResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::GET, table)
            .header(ACCEPT, SINGLE_OBJECT)
            .query(&[("select", "*")])
            .query(params)
            .send()
            .await?;
        read_body(response).await
    }

    /// Insert `rows` and return them as stored.
    pub async fn insert<B, T>(&self, table: &str, rows: &[B]) -> RepositoryResult<Vec<T>>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::POST, table)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(rows)
            .send()
            .await?;
        read_body(response).await
    }

    /// Apply `patch` to the rows matching `params` and return them.
    pub async fn update<B, T>(
        &self,
        table: &str,
        params: &[(String, String)],
        patch: &B,
    ) -> RepositoryResult<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::PATCH, table)
            .header("Prefer", RETURN_REPRESENTATION)
            .query(params)
            .json(patch)
            .send()
            .await?;
        read_body(response).await
    }

    /// Delete the rows matching `params`.
    pub async fn delete(&self, table: &str, params: &[(String, String)]) -> RepositoryResult<()> {
        let response = self.request(Method::DELETE, table).query(params).send().await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        Ok(())
    }
}

async fn read_body<T: DeserializeOwned>(response: Response) -> RepositoryResult<T> {
    if !response.status().is_success() {
        return Err(error_from_response(response).await);
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

async fn error_from_response(response: Response) -> RepositoryError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    classify_error(status, &text)
}

fn classify_error(status: StatusCode, text: &str) -> RepositoryError {
    let body: ErrorBody = serde_json::from_str(text).unwrap_or_default();

    let message = body
        .message
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| {
            if text.is_empty() {
                format!("store request failed with status {status}")
            } else {
                text.to_string()
            }
        });

    match body.code.as_deref() {
        Some(NO_SINGLE_ROW) => RepositoryError::NotFound,
        Some(UNIQUE_VIOLATION) => RepositoryError::Conflict(message),
        _ => RepositoryError::Remote {
            status: status.as_u16(),
            message,
        },
    }
}
