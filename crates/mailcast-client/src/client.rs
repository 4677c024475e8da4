//! HTTP client core: builder configuration, authenticated request
//! plumbing, and error classification.
//!
//! The component modules ([`templates`](crate::templates),
//! [`submit`](crate::submit), [`tracker`](crate::tracker),
//! [`actions`](crate::actions)) build their own URLs and payloads and
//! delegate transport concerns to this type.

use std::time::{Duration, Instant};

use mailcast_api_models::ApiErrorBody;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::{ClientError, Result};
use crate::session::Session;

pub(crate) const HEADER_REQUEST_ID: &str = "x-request-id";
pub(crate) const HEADER_IDEMPOTENCY_KEY: &str = "idempotency-key";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Authenticated HTTP client for the campaign API.
///
/// Use [`MailcastClient::builder`] to construct instances.
#[derive(Debug, Clone)]
pub struct MailcastClient {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
}

impl MailcastClient {
    /// Create a new builder for configuring the client.
    #[must_use]
    pub fn builder() -> MailcastClientBuilder {
        MailcastClientBuilder::new()
    }

    /// Session context the client was built with.
    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|err| ClientError::validation(format!("invalid base URL: {err}")))
    }

    pub(crate) fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header(AUTHORIZATION, self.session.bearer_header())
    }

    pub(crate) async fn expect_json<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T> {
        let response = self.check(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|source| ClientError::Decode { source })
    }

    pub(crate) async fn expect_ok(&self, builder: reqwest::RequestBuilder) -> Result<()> {
        self.check(builder).await.map(drop)
    }

    async fn check(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let started = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|source| ClientError::Transport { source })?;
        let status = response.status();
        tracing::debug!(
            %status,
            url = %response.url(),
            elapsed = ?started.elapsed(),
            "campaign API response"
        );

        if status == StatusCode::UNAUTHORIZED {
            self.session.notify_unauthorized();
            return Err(ClientError::Unauthorized);
        }
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = serde_json::from_slice::<ApiErrorBody>(&body)
            .ok()
            .and_then(|parsed| parsed.detail().map(str::to_string))
            .unwrap_or_else(|| format!("request failed with status {status}"));
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Builder for configuring [`MailcastClient`] instances.
#[derive(Debug)]
pub struct MailcastClientBuilder {
    base_url: Option<Url>,
    timeout: Duration,
    session: Option<Session>,
    request_id: Option<String>,
}

impl MailcastClientBuilder {
    fn new() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            session: None,
            request_id: None,
        }
    }

    /// Set the base URL of the campaign API.
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the request timeout (default 10 seconds).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the session context (required).
    #[must_use]
    pub fn session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Set the trace identifier sent as `x-request-id` on every request.
    /// A random UUID is used when unset.
    #[must_use]
    pub fn request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `base_url` or `session` is missing
    /// or the underlying HTTP client cannot be constructed.
    pub fn build(self) -> Result<MailcastClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::validation("base_url is required"))?;
        let session = self
            .session
            .ok_or_else(|| ClientError::validation("session is required"))?;

        let mut default_headers = HeaderMap::new();
        let trace_id = self
            .request_id
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        if let Ok(value) = HeaderValue::from_str(&trace_id) {
            default_headers.insert(HEADER_REQUEST_ID, value);
        }

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|err| ClientError::validation(format!("failed to build HTTP client: {err}")))?;

        Ok(MailcastClient {
            http,
            base_url,
            session,
        })
    }
}
