//! Typed HTTP client for the match service.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::ApiError;
use crate::types::{Coord, HistoryItem, MatchState, OpponentKind};

/// The four operations of the match service contract.
///
/// Each is a single request/response exchange with no retry and no caching;
/// callers that no longer care about a result simply drop it. The trait is
/// the seam that lets tests drive the session machine with a scripted
/// service.
#[async_trait]
pub trait MatchService: Send + Sync {
    /// Creates a match against the given opponent kind.
    async fn create_match(&self, opponent: OpponentKind) -> Result<MatchState, ApiError>;

    /// Fetches a match by id. An unknown id yields a not-found
    /// [`ApiError::Status`].
    async fn get_match(&self, id: &str) -> Result<MatchState, ApiError>;

    /// Submits a move and returns the refreshed state. A rejected move
    /// surfaces as [`ApiError::Status`] with the server's message; the
    /// client does not guess why the server refused.
    async fn post_move(&self, id: &str, coord: Coord) -> Result<MatchState, ApiError>;

    /// Lists past and active matches, most recent first. Ordering is
    /// server-determined and must not be re-sorted.
    async fn list_history(&self) -> Result<Vec<HistoryItem>, ApiError>;
}

/// Body of `POST /matches`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CreateMatchRequest {
    opponent: OpponentKind,
}

/// Body of `POST /matches/{id}/move`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct MoveRequest {
    row: u8,
    col: u8,
}

/// Reqwest-backed [`MatchService`] against a `/api/v1` base path.
#[derive(Debug, Clone)]
pub struct MatchClient {
    base_url: String,
    http: reqwest::Client,
}

impl MatchClient {
    /// Creates a client for the service at `base_url` (scheme + authority,
    /// with or without a trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.base_url, path)
    }

    /// Reads a response into `T`, mapping non-success statuses to
    /// [`ApiError::Status`] with the body text verbatim.
    async fn read<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl MatchService for MatchClient {
    #[instrument(skip(self))]
    async fn create_match(&self, opponent: OpponentKind) -> Result<MatchState, ApiError> {
        debug!("Creating match");
        let response = self
            .http
            .post(self.url("/matches"))
            .json(&CreateMatchRequest { opponent })
            .send()
            .await?;
        let state: MatchState = Self::read(response).await?;
        debug!(id = %state.id, "Match created");
        Ok(state)
    }

    #[instrument(skip(self))]
    async fn get_match(&self, id: &str) -> Result<MatchState, ApiError> {
        debug!("Fetching match");
        let response = self
            .http
            .get(self.url(&format!("/matches/{id}")))
            .send()
            .await?;
        Self::read(response).await
    }

    #[instrument(skip(self), fields(row = coord.row, col = coord.col))]
    async fn post_move(&self, id: &str, coord: Coord) -> Result<MatchState, ApiError> {
        debug!("Submitting move");
        let response = self
            .http
            .post(self.url(&format!("/matches/{id}/move")))
            .json(&MoveRequest {
                row: coord.row,
                col: coord.col,
            })
            .send()
            .await?;
        Self::read(response).await
    }

    #[instrument(skip(self))]
    async fn list_history(&self) -> Result<Vec<HistoryItem>, ApiError> {
        debug!("Fetching history");
        let response = self.http.get(self.url("/history")).send().await?;
        Self::read(response).await
    }
}
