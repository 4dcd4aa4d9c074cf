//! HTTP client for the society management backend.
//!
//! `ApiClient` is the single place that knows how to talk to the
//! server: URL construction, the `Authorization: Token <value>`
//! header, JSON bodies, and error classification all live here so
//! every command reports failures the same way.

pub mod auth;
pub mod complaints;
pub mod error;
pub mod facilities;
pub mod notices;
pub mod payments;
pub mod profile;
pub mod reports;
pub mod residents;
pub mod visitors;

pub use error::ApiError;

use anyhow::{Context, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout_secs: u64,
        token: Option<String>,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            token,
        })
    }

    pub fn has_session(&self) -> bool {
        self.token.is_some()
    }

    /// Header value sent on authenticated requests, if a session
    /// exists.
    pub fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Token {}", t))
    }

    /// Join a relative API path onto the base URL.
    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/api/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Build a request that carries the session token, or fail fast
    /// when there is none.
    fn authed(&self, method: Method, path: &str) -> std::result::Result<RequestBuilder, ApiError> {
        let header = self.auth_header().ok_or(ApiError::AuthRequired)?;
        Ok(self
            .http
            .request(method, self.endpoint(path))
            .header(AUTHORIZATION, header))
    }

    async fn execute(&self, req: RequestBuilder) -> std::result::Result<Response, ApiError> {
        let resp = req.send().await.map_err(ApiError::Network)?;
        let status = resp.status();
        debug!(status = %status, "response received");
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::from_status_body(status.as_u16(), &body));
        }
        Ok(resp)
    }

    async fn read_json<T: DeserializeOwned>(resp: Response) -> std::result::Result<T, ApiError> {
        let body = resp.text().await.map_err(ApiError::Network)?;
        decode_body(&body)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> std::result::Result<T, ApiError> {
        debug!(path, "GET");
        let resp = self.execute(self.authed(Method::GET, path)?).await?;
        Self::read_json(resp).await
    }

    pub(crate) async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> std::result::Result<T, ApiError> {
        debug!(path, "POST");
        let resp = self
            .execute(self.authed(Method::POST, path)?.json(body))
            .await?;
        Self::read_json(resp).await
    }

    pub(crate) async fn patch_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> std::result::Result<T, ApiError> {
        debug!(path, "PATCH");
        let resp = self
            .execute(self.authed(Method::PATCH, path)?.json(body))
            .await?;
        Self::read_json(resp).await
    }

    /// PATCH without a body, for bare status-transition endpoints.
    pub(crate) async fn patch_empty<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> std::result::Result<T, ApiError> {
        debug!(path, "PATCH");
        let resp = self.execute(self.authed(Method::PATCH, path)?).await?;
        Self::read_json(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> std::result::Result<(), ApiError> {
        debug!(path, "DELETE");
        self.execute(self.authed(Method::DELETE, path)?).await?;
        Ok(())
    }

    /// POST to an endpoint that does not require authentication
    /// (login, register). No Authorization header is attached even
    /// when a session exists.
    pub(crate) async fn post_public<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> std::result::Result<T, ApiError> {
        debug!(path, "POST (public)");
        let resp = self
            .execute(self.http.post(self.endpoint(path)).json(body))
            .await?;
        Self::read_json(resp).await
    }

    /// Fetch a non-JSON body, used for CSV report downloads.
    pub(crate) async fn get_text(&self, path: &str) -> std::result::Result<String, ApiError> {
        debug!(path, "GET (text)");
        let resp = self.execute(self.authed(Method::GET, path)?).await?;
        resp.text().await.map_err(ApiError::Network)
    }
}

/// Decode a 2xx body into the expected type. A mismatch (an error
/// page, an object where a list was expected) is a protocol error,
/// never a silent empty result.
pub(crate) fn decode_body<T: DeserializeOwned>(body: &str) -> std::result::Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Protocol(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn client(token: Option<&str>) -> ApiClient {
        ApiClient::new("http://localhost:8000", 30, token.map(String::from)).unwrap()
    }

    #[test]
    fn test_endpoint_joining() {
        let api = client(None);
        assert_eq!(
            api.endpoint("notices/"),
            "http://localhost:8000/api/notices/"
        );
        assert_eq!(
            api.endpoint("/complaints/3/update_status/"),
            "http://localhost:8000/api/complaints/3/update_status/"
        );

        let api = ApiClient::new("http://localhost:8000/", 30, None).unwrap();
        assert_eq!(api.endpoint("login/"), "http://localhost:8000/api/login/");
    }

    #[test]
    fn test_auth_header_exact_format() {
        assert_eq!(client(None).auth_header(), None);
        assert_eq!(
            client(Some("9f2c")).auth_header(),
            Some("Token 9f2c".to_string())
        );
    }

    #[test]
    fn test_authed_without_session_is_auth_required() {
        let api = client(None);
        match api.authed(Method::GET, "notices/") {
            Err(ApiError::AuthRequired) => {}
            other => panic!("expected AuthRequired, got {:?}", other.map(|_| ())),
        }
    }

    #[derive(Debug, Deserialize)]
    struct Item {
        id: i64,
    }

    #[test]
    fn test_decode_list() {
        let items: Vec<Item> = decode_body(r#"[{"id": 1}, {"id": 2}]"#).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].id, 2);
    }

    #[test]
    fn test_non_list_where_list_expected_is_protocol_error() {
        let result: std::result::Result<Vec<Item>, ApiError> =
            decode_body(r#"{"detail": "throttled"}"#);
        match result {
            Err(ApiError::Protocol(_)) => {}
            other => panic!("expected Protocol error, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_body_is_protocol_error() {
        let result: std::result::Result<Item, ApiError> = decode_body("<!DOCTYPE html>");
        assert!(matches!(result, Err(ApiError::Protocol(_))));
    }

    #[test]
    fn test_unreachable_server_is_network_error() {
        // Nothing listens on the discard port, so the request fails
        // in transit (connect refused or timed out), never as an Api
        // or Protocol error.
        let api = ApiClient::new("http://127.0.0.1:9", 5, Some("tok".to_string())).unwrap();
        let result: std::result::Result<Vec<Item>, ApiError> =
            tokio_test::block_on(api.get_json("notices/"));
        assert!(matches!(result, Err(ApiError::Network(_))));
    }
}
