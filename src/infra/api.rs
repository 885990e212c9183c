//! HTTP adapter for the posts backend.

use async_trait::async_trait;
use quaderno_api_types::{Post, StatusPatch};
use reqwest::{Client, Method, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::application::gateway::{GatewayError, PostsGateway};

/// Thin `reqwest` wrapper around the backend's `posts` collection.
///
/// No authentication, timeouts, or retries: the backend is a trusted local
/// resource and transient failures are surfaced to the caller as typed
/// errors instead of being retried.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        let base = Url::parse(base_url)
            .and_then(|url| url.join("/"))
            .map_err(|err| GatewayError::Url(err.to_string()))?;
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .build()
            .map_err(GatewayError::transport)?;
        Ok(Self { client, base })
    }

    pub fn user_agent() -> &'static str {
        concat!("quaderno/", env!("CARGO_PKG_VERSION"))
    }

    fn url(&self, path: &str) -> Result<Url, GatewayError> {
        self.base
            .join(path)
            .map_err(|err| GatewayError::Url(err.to_string()))
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&str, String)]>,
        body: Option<serde_json::Value>,
    ) -> Result<T, GatewayError> {
        let mut url = self.url(path)?;
        if let Some(q) = query {
            url.set_query(None);
            let mut pairs = url.query_pairs_mut();
            for (key, value) in q {
                pairs.append_pair(key, value);
            }
        }

        debug!(%method, %url, "issuing backend request");
        let mut req = self.client.request(method, url);
        if let Some(b) = body {
            req = req.json(&b);
        }

        let resp = req.send().await.map_err(GatewayError::transport)?;
        Self::handle(resp).await
    }

    async fn request_unit(
        &self,
        method: Method,
        path: &str,
    ) -> Result<(), GatewayError> {
        let url = self.url(path)?;
        debug!(%method, %url, "issuing backend request");
        let resp = self
            .client
            .request(method, url)
            .send()
            .await
            .map_err(GatewayError::transport)?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    async fn handle<T: DeserializeOwned>(resp: Response) -> Result<T, GatewayError> {
        let status = resp.status();
        let bytes = resp.bytes().await.map_err(GatewayError::transport)?;
        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }
        serde_json::from_slice(&bytes).map_err(|err| GatewayError::Decode(err.to_string()))
    }
}

fn to_value<T: Serialize>(value: &T) -> Result<serde_json::Value, GatewayError> {
    serde_json::to_value(value).map_err(|err| GatewayError::Encode(err.to_string()))
}

#[async_trait]
impl PostsGateway for ApiClient {
    async fn list(&self) -> Result<Vec<Post>, GatewayError> {
        self.request(Method::GET, "posts", None, None).await
    }

    async fn search(&self, keyword: &str) -> Result<Vec<Post>, GatewayError> {
        let query = [("title_like", keyword.to_string())];
        self.request(Method::GET, "posts", Some(&query), None).await
    }

    async fn create(&self, post: &Post) -> Result<Post, GatewayError> {
        self.request(Method::POST, "posts", None, Some(to_value(post)?))
            .await
    }

    async fn update(&self, id: i64, post: &Post) -> Result<Post, GatewayError> {
        let path = format!("posts/{id}");
        self.request(Method::PUT, &path, None, Some(to_value(post)?))
            .await
    }

    async fn set_status(&self, id: i64, status: bool) -> Result<Post, GatewayError> {
        let path = format!("posts/{id}");
        self.request(
            Method::PATCH,
            &path,
            None,
            Some(to_value(&StatusPatch { status })?),
        )
        .await
    }

    async fn delete(&self, id: i64) -> Result<(), GatewayError> {
        let path = format!("posts/{id}");
        self.request_unit(Method::DELETE, &path).await
    }
}
