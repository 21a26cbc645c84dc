//! Configuration management

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use url::Url;

/// Public Keybase API root. Every endpoint path is joined under it.
pub const DEFAULT_BASE_URL: &str = "https://keybase.io/_/api/1.0/";

#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: Url,
    pub timeout: Option<Duration>, // None leaves reqwest's default (no timeout)
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
            timeout: None,
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Build a config pointing at `base_url`, keeping the other defaults.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            ..Self::default()
        })
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(
                &env::var("KEYBASE_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            )?,

            timeout: env::var("KEYBASE_TIMEOUT_SECS")
                .ok()
                .map(|secs| secs.parse::<u64>().context("Invalid KEYBASE_TIMEOUT_SECS"))
                .transpose()?
                .map(Duration::from_secs),

            user_agent: env::var("KEYBASE_USER_AGENT").unwrap_or_else(|_| default_user_agent()),
        })
    }
}

fn default_user_agent() -> String {
    format!("keybase-api/{}", env!("CARGO_PKG_VERSION"))
}

/// Parse a base URL, forcing a trailing slash so that `Url::join` appends
/// endpoint paths instead of replacing the last segment.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw).with_context(|| format!("Invalid base URL: {}", raw))?;
    if url.cannot_be_a_base() {
        anyhow::bail!("Base URL cannot carry a path: {}", raw);
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
