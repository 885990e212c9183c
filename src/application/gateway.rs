//! Gateway trait describing the posts backend as seen by the view.

use async_trait::async_trait;
use quaderno_api_types::Post;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request url: {0}")]
    Url(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("backend returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode response body: {0}")]
    Decode(String),
    #[error("failed to encode request body: {0}")]
    Encode(String),
}

impl GatewayError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }
}

/// The backend's REST contract, consumed verbatim.
///
/// The view machine is generic over this trait so transitions can be
/// exercised against an in-memory backend in tests.
#[async_trait]
pub trait PostsGateway {
    /// `GET /posts`: the full ordered collection.
    async fn list(&self) -> Result<Vec<Post>, GatewayError>;

    /// `GET /posts?title_like={keyword}`: substring match on title.
    async fn search(&self, keyword: &str) -> Result<Vec<Post>, GatewayError>;

    /// `POST /posts`: the backend assigns the id.
    async fn create(&self, post: &Post) -> Result<Post, GatewayError>;

    /// `PUT /posts/{id}`: full record replace.
    async fn update(&self, id: i64, post: &Post) -> Result<Post, GatewayError>;

    /// `PATCH /posts/{id}`: status-only partial update.
    async fn set_status(&self, id: i64, status: bool) -> Result<Post, GatewayError>;

    /// `DELETE /posts/{id}`.
    async fn delete(&self, id: i64) -> Result<(), GatewayError>;
}
