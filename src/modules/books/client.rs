//! Catalog API client.
//!
//! Both operations collapse every failure (unreachable host, non-2xx status,
//! malformed body) into an empty or absent result after logging it. Callers
//! never see an error.

use async_trait::async_trait;
use thiserror::Error;

use super::models::{Book, NewBook};

/// Read and create access to the remote catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// All records, in the order the catalog returned them. Empty on failure.
    async fn list(&self) -> Vec<Book>;

    /// Creates `book` and returns the stored record. `None` on failure.
    async fn create(&self, book: &NewBook) -> Option<Book>;
}

/// Why a catalog call failed. Only used for logging.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("catalog answered {status}")]
    Status { status: reqwest::StatusCode },

    #[error("catalog body could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
}

/// [`CatalogApi`] over HTTP: `GET` and `POST` on a single collection URL.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpCatalogClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    async fn try_list(&self) -> Result<Vec<Book>, CatalogError> {
        let response = self
            .http
            .get(&self.endpoint)
            .send()
            .await
            .map_err(CatalogError::Transport)?;
        let response = ensure_success(response)?;
        response.json().await.map_err(CatalogError::Decode)
    }

    async fn try_create(&self, book: &NewBook) -> Result<Book, CatalogError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(book)
            .send()
            .await
            .map_err(CatalogError::Transport)?;
        let response = ensure_success(response)?;
        response.json().await.map_err(CatalogError::Decode)
    }
}

fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(CatalogError::Status { status })
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn list(&self) -> Vec<Book> {
        match self.try_list().await {
            Ok(books) => {
                tracing::debug!(endpoint = %self.endpoint, count = books.len(), "catalog listed");
                books
            }
            Err(err) => {
                tracing::warn!(endpoint = %self.endpoint, error = %err, "failed to list catalog");
                Vec::new()
            }
        }
    }

    async fn create(&self, book: &NewBook) -> Option<Book> {
        match self.try_create(book).await {
            Ok(created) => {
                tracing::info!(endpoint = %self.endpoint, id = created.id, "book created");
                Some(created)
            }
            Err(err) => {
                tracing::warn!(
                    endpoint = %self.endpoint,
                    title = %book.title,
                    error = %err,
                    "failed to create book"
                );
                None
            }
        }
    }
}
