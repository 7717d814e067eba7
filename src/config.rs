use std::env;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};

pub const DEFAULT_UPSTREAM_URL: &str = "https://app.documenso.com/api/v1";

#[derive(Debug)]
pub struct Config {
    pub api_key: SecretString,
    pub upstream_url: Url,
    pub service_port: u16,
    pub service_host: String,
    pub keep_alive_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("DOCUMENSO_API_KEY")
            .context("DOCUMENSO_API_KEY environment variable is required")?;
        if api_key.trim().is_empty() {
            bail!("DOCUMENSO_API_KEY must not be empty");
        }

        let upstream_url = env::var("DOCUMENSO_API_URL")
            .unwrap_or_else(|_| DEFAULT_UPSTREAM_URL.to_string());
        let upstream_url = parse_upstream_url(&upstream_url)?;

        let service_port = env::var("PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number (0-65535)")?;

        let service_host = env::var("SERVICE_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        let keep_alive_secs = env::var("KEEP_ALIVE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".to_string())
            .parse::<u64>()
            .context("KEEP_ALIVE_TIMEOUT_SECS must be a whole number of seconds")?;
        if keep_alive_secs == 0 {
            bail!("KEEP_ALIVE_TIMEOUT_SECS must be at least 1");
        }

        Ok(Config {
            api_key: SecretString::from(api_key),
            upstream_url,
            service_port,
            service_host,
            keep_alive_timeout: Duration::from_secs(keep_alive_secs),
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Upstream API: {}", self.upstream_url);
        tracing::info!(
            "  API key: {} characters (redacted)",
            self.api_key.expose_secret().len()
        );
        tracing::info!(
            "  Inbound keep-alive/header timeout: {}s",
            self.keep_alive_timeout.as_secs()
        );
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }
}

/// Relay paths are appended as segments, so the base must be able to carry them.
fn parse_upstream_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .with_context(|| format!("DOCUMENSO_API_URL is not a valid URL: '{}'", raw))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        bail!("DOCUMENSO_API_URL must be an absolute http(s) URL, got '{}'", raw);
    }

    Ok(url)
}
