use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use reqwest::Url;
use tracing::debug;

use crate::errors::AppError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Upstream response passed back to the browser as-is.
#[derive(Debug)]
pub struct Relayed {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl IntoResponse for Relayed {
    fn into_response(self) -> Response {
        let mut resp = Response::new(Body::from(self.body));
        *resp.status_mut() = self.status;
        if let Some(ct) = self.content_type {
            resp.headers_mut().insert(header::CONTENT_TYPE, ct);
        }
        resp
    }
}

/// Client for the external chat backend. Cheap to clone; clones share the
/// connection pool.
#[derive(Clone, Debug)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: Url,
}

impl UpstreamClient {
    pub fn new(base_url: Url) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| AppError::config(format!("HTTP client: {e}")))?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `base_url` with the given path segments appended, each one escaped.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AppError::config(format!("UPSTREAM_API_URL '{}' cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Forwards a chat turn. The body is passed through without inspection.
    pub async fn post_chat(&self, body: &serde_json::Value) -> Result<Relayed, AppError> {
        let url = self.endpoint(&["api", "chat"])?;
        debug!(%url, "forwarding chat request");
        let resp = self
            .http
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|source| AppError::UpstreamUnavailable {
                url: url.to_string(),
                source,
            })?;
        relay(resp).await
    }

    pub async fn get_history(&self, session_id: &str) -> Result<Relayed, AppError> {
        let url = self.endpoint(&["api", "session", session_id, "history"])?;
        debug!(%url, "forwarding history request");
        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| AppError::UpstreamUnavailable {
                url: url.to_string(),
                source,
            })?;
        relay(resp).await
    }
}

async fn relay(resp: reqwest::Response) -> Result<Relayed, AppError> {
    let status = resp.status();
    let content_type = resp.headers().get(header::CONTENT_TYPE).cloned();
    let body = resp.bytes().await.map_err(AppError::UpstreamBody)?;
    debug!(%status, bytes = body.len(), "upstream responded");
    Ok(Relayed {
        status,
        content_type,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_escapes_session_segment() {
        let client = UpstreamClient::new(Url::parse("http://backend:5001").unwrap()).unwrap();
        let url = client
            .endpoint(&["api", "session", "a/b c", "history"])
            .unwrap();
        assert_eq!(url.as_str(), "http://backend:5001/api/session/a%2Fb%20c/history");
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let client =
            UpstreamClient::new(Url::parse("https://example.com/backend").unwrap()).unwrap();
        let url = client.endpoint(&["api", "chat"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/backend/api/chat");
    }
}
