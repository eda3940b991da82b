//! HTTP client for a PostgREST notes table.
//!
//! Requests follow the conventions of PostgREST's generated table API:
//! filters travel in the query string (`id=eq.1`), and the `Prefer` header
//! selects whether mutations echo the written rows back.

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{ClientError, NoteStorage};
use crate::config::Config;
use crate::models::{Draft, Note, NoteId, NotePatch};

/// Error object PostgREST returns for failed requests.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
}

/// HTTP client for the notes table.
#[derive(Debug, Clone)]
pub struct RestClient {
    table_url: String,
    api_key: String,
    client: Client,
}

impl RestClient {
    pub fn new(config: &Config) -> Self {
        Self {
            table_url: format!(
                "{}/rest/v1/{}",
                config.url.trim_end_matches('/'),
                config.table
            ),
            api_key: config.anon_key.clone(),
            client: Client::new(),
        }
    }

    /// Build a request against the table with the key headers attached.
    fn request(&self, method: Method) -> reqwest::RequestBuilder {
        self.client
            .request(method, &self.table_url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn id_filter(id: &NoteId) -> [(&'static str, String); 1] {
        [("id", format!("eq.{}", id))]
    }

    /// Handle response, converting HTTP errors to ClientError.
    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<PostgrestError>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        match status {
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
            StatusCode::BAD_REQUEST => Err(ClientError::BadRequest(message)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ClientError::Unauthorized),
            _ => Err(ClientError::Server(format!("{}: {}", status, message))),
        }
    }
}

#[async_trait]
impl NoteStorage for RestClient {
    async fn list(&self) -> Result<Vec<Note>, ClientError> {
        tracing::debug!("GET {}", self.table_url);
        let response = self
            .request(Method::GET)
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn insert(&self, draft: &Draft) -> Result<Note, ClientError> {
        tracing::debug!("POST {}", self.table_url);
        let response = self
            .request(Method::POST)
            .header("Prefer", "return=representation")
            .json(&[draft])
            .send()
            .await?;
        let rows: Vec<Note> = Self::handle_response(response).await?;
        rows.into_iter().next().ok_or(ClientError::EmptyResponse)
    }

    async fn update_by_id(&self, id: &NoteId, patch: &NotePatch) -> Result<(), ClientError> {
        tracing::debug!("PATCH {} id={}", self.table_url, id);
        let response = self
            .request(Method::PATCH)
            .header("Prefer", "return=minimal")
            .query(&Self::id_filter(id))
            .json(patch)
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: &NoteId) -> Result<(), ClientError> {
        tracing::debug!("DELETE {} id={}", self.table_url, id);
        let response = self
            .request(Method::DELETE)
            .query(&Self::id_filter(id))
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }
}
