use std::fmt;

use anyhow::{Context, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode, Url};
use secrecy::ExposeSecret;
use serde_json::value::RawValue;

use crate::config::Config;

/// Why a relay call produced no usable response
#[derive(Debug)]
pub enum RelayError {
    /// Connection, TLS or protocol failure before a response arrived
    Transport(reqwest::Error),
    /// Upstream answered with a non-2xx status
    Status(StatusCode),
    /// Upstream body was not JSON
    Decode(serde_json::Error),
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelayError::Transport(err) => write!(f, "transport error: {}", err),
            RelayError::Status(status) => write!(f, "upstream returned {}", status),
            RelayError::Decode(err) => write!(f, "upstream body is not JSON: {}", err),
        }
    }
}

impl std::error::Error for RelayError {}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::Transport(err)
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::Decode(err)
    }
}

/// Shareable client for the document-signing API
///
/// Cloning is cheap: the underlying connection pool is reference counted.
/// The bearer credential is installed once as a sensitive default header.
#[derive(Clone)]
pub struct UpstreamClient {
    http: Client,
    base_url: Url,
}

impl UpstreamClient {
    pub fn from_config(config: &Config) -> Result<Self> {
        anyhow::ensure!(
            !config.upstream_url.cannot_be_a_base(),
            "Upstream URL '{}' cannot take path segments",
            config.upstream_url
        );

        let mut bearer = HeaderValue::from_str(&format!(
            "Bearer {}",
            config.api_key.expose_secret()
        ))
        .context("DOCUMENSO_API_KEY contains characters not allowed in an HTTP header")?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to build upstream HTTP client")?;

        tracing::info!("Upstream client ready for {}", config.upstream_url);

        Ok(Self {
            http,
            base_url: config.upstream_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Forward one request upstream and hand back its JSON body untouched
    ///
    /// `segments` are appended to the base URL one path segment each, so an
    /// id containing `/` or `?` cannot escape its segment. `body` must already
    /// be JSON text and is sent as is. An empty 2xx body is returned as the
    /// JSON string `""`.
    pub async fn relay(
        &self,
        method: Method,
        segments: &[&str],
        query: Option<&[(&'static str, String)]>,
        body: Option<&str>,
    ) -> Result<Box<RawValue>, RelayError> {
        let url = self.url_for(segments);

        let mut request = self.http.request(method.clone(), url);
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_owned());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Status(status));
        }

        let bytes = response.bytes().await?;
        tracing::debug!(
            "{} /{} -> {} ({} bytes)",
            method,
            segments.join("/"),
            status,
            bytes.len()
        );

        if bytes.is_empty() {
            return Ok(serde_json::value::to_raw_value("")?);
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    fn url_for(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // from_config only accepts bases that can carry segments
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
