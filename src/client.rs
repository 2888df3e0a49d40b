//! Session-bound HTTP client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every backend call goes through [`ApiClient::request`]. It reads the access
//! token from the [`Session`], injects `Authorization: Bearer <token>`, always
//! sends a JSON content type, and returns an [`ApiResponse`] whose body has
//! already been parsed (or is `None` when the body is not JSON).
//!
//! ERROR HANDLING
//! ==============
//! A 401 clears the whole session and surfaces [`ApiError::Unauthenticated`].
//! The client never navigates or retries; deciding what happens next belongs
//! to the caller (see [`crate::routes::redirect_for`]).

use std::time::Duration;

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{ClientConfig, ConfigError};
use crate::error::ApiError;
use crate::session::{FileStore, Session};

const JSON_CONTENT_TYPE: &str = "application/json";
const NGROK_SKIP_WARNING: &str = "ngrok-skip-browser-warning";

// =============================================================================
// REQUEST OPTIONS
// =============================================================================

/// Per-request configuration: verb, extra headers, pre-serialized body.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Defaults to `GET`.
    pub method: Method,
    /// Merged over the default headers; later entries win.
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    /// The request presents credentials itself (login, registration). A 401
    /// is then a rejected credential, reported as an application error, and
    /// the stored session is left alone.
    pub credential_exchange: bool,
}

impl RequestOptions {
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self { method, ..Self::default() }
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn credential_exchange(mut self) -> Self {
        self.credential_exchange = true;
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `payload` as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the payload cannot be serialized.
    pub fn json(self, payload: &impl Serialize) -> Result<Self, ApiError> {
        let body = serde_json::to_string(payload).map_err(|e| ApiError::Validation(e.to_string()))?;
        Ok(self.body(body))
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

/// Normalized response: status, success flag, parsed body.
#[derive(Debug)]
pub struct ApiResponse {
    status: u16,
    body: Option<Value>,
}

impl ApiResponse {
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// True for any 2xx status.
    #[must_use]
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parsed JSON body; `None` when the body was empty or not JSON.
    #[must_use]
    pub fn json(self) -> Option<Value> {
        self.body
    }

    /// Turn a non-2xx response into [`ApiError::Application`].
    ///
    /// # Errors
    ///
    /// Returns the application error carrying the extracted backend message.
    pub fn into_result(self) -> Result<Option<Value>, ApiError> {
        if self.ok() {
            Ok(self.body)
        } else {
            Err(ApiError::application(self.status, self.body))
        }
    }

    /// Decode a successful body into `T`. An absent body decodes as JSON `null`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Application`] for non-2xx statuses and
    /// [`ApiError::Decode`] when the body does not match `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let body = self.into_result()?.unwrap_or(Value::Null);
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

// =============================================================================
// CLIENT
// =============================================================================

/// HTTP client bound to one backend origin and one persisted session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// Build a client over an explicit session handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn new(config: &ClientConfig, session: Session) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ConfigError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone(), session })
    }

    /// Build a client whose session lives in the configured session file.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client fails to build.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let session = Session::new(FileStore::new(&config.session_file));
        Self::new(config, session)
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve `path` against the base URL; absolute URLs pass through.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_owned();
        }
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// Issue one request and normalize the response.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Transport`] if no response arrives.
    /// - [`ApiError::Unauthenticated`] on 401, after clearing the session,
    ///   unless the request is a credential exchange.
    /// - [`ApiError::Session`] if the token cannot be read.
    /// - [`ApiError::Validation`] if an extra header is malformed.
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<ApiResponse, ApiError> {
        let url = self.url(path);
        let headers = self.headers(&options.headers)?;
        let method = options.method;

        let mut request = self.http.request(method.clone(), &url).headers(headers);
        if let Some(body) = options.body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|error| {
            tracing::warn!(%method, %url, %error, "request failed");
            ApiError::from(error)
        })?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        tracing::debug!(%method, %url, status, len = bytes.len(), "response received");

        if status == 401 && !options.credential_exchange {
            tracing::warn!(%method, %url, "credentials rejected; clearing session");
            if let Err(error) = self.session.clear() {
                tracing::warn!(%error, "failed to clear session after 401");
            }
            return Err(ApiError::Unauthenticated);
        }

        let body = parse_body(&bytes);
        if body.is_none() && !bytes.is_empty() {
            tracing::debug!(%url, status, "response body is not JSON");
        }
        Ok(ApiResponse { status, body })
    }

    /// Issue a request and decode a 2xx body into `T`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`] and [`ApiResponse::decode`].
    pub async fn send_json<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> Result<T, ApiError> {
        self.request(path, options).await?.decode()
    }

    /// `GET path` decoded into `T`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send_json`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send_json(path, RequestOptions::new(Method::GET)).await
    }

    /// `POST path` with a JSON body, decoded into `T`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send_json`].
    pub async fn post<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T, ApiError> {
        self.send_json(path, RequestOptions::new(Method::POST).json(body)?).await
    }

    /// `POST path` for a login or registration, decoded into `T`. A 401 here
    /// is an [`ApiError::Application`] carrying the backend's message.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send_json`].
    pub async fn post_credentials<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T, ApiError> {
        let options = RequestOptions::new(Method::POST).credential_exchange().json(body)?;
        self.send_json(path, options).await
    }

    /// `PUT path` with a JSON body, decoded into `T`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send_json`].
    pub async fn put<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T, ApiError> {
        self.send_json(path, RequestOptions::new(Method::PUT).json(body)?).await
    }

    /// `PATCH path` with a JSON body, decoded into `T`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send_json`].
    pub async fn patch<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T, ApiError> {
        self.send_json(path, RequestOptions::new(Method::PATCH).json(body)?).await
    }

    /// `DELETE path`; the body, if any, is returned untyped.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`] and [`ApiResponse::into_result`].
    pub async fn delete(&self, path: &str) -> Result<Option<Value>, ApiError> {
        self.request(path, RequestOptions::new(Method::DELETE)).await?.into_result()
    }

    fn headers(&self, extra: &[(String, String)]) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        // The hosted backend sits behind ngrok's free tier, which otherwise
        // answers with an HTML interstitial.
        headers.insert(NGROK_SKIP_WARNING, HeaderValue::from_static("true"));
        if let Some(token) = self.session.access_token()? {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ApiError::Validation(format!("access token is not a valid header: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }
        for (name, value) in extra {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::Validation(format!("invalid header name {name:?}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::Validation(format!("invalid header value for {name}: {e}")))?;
            headers.insert(name, value);
        }
        Ok(headers)
    }
}

fn parse_body(bytes: &[u8]) -> Option<Value> {
    if bytes.is_empty() {
        return None;
    }
    serde_json::from_slice(bytes).ok()
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
