//! HTTP transport for the Keybase API

use tracing::instrument;
use url::Url;

use crate::config::Config;
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::models::{
    KeyFetchParams, KeyFetchResponse, UserAutocompleteParams, UserAutocompleteResponse,
    UserDiscoverParams, UserDiscoverResponse, UserLookupParams, UserLookupResponse,
};

/// Client bound to one API root.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
}

impl Client {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self::with_http_client(builder.build()?, config.base_url.clone()))
    }

    /// Use a caller-provided reqwest client (proxies, TLS settings, ...).
    pub fn with_http_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full request URL for `params`, query included.
    pub fn url_for<E: Endpoint>(&self, params: &E) -> Result<Url> {
        let mut url = self.base_url.join(&format!("{}.json", E::PATH))?;
        let pairs = params.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    /// GET the endpoint described by `params` and decode its JSON body.
    ///
    /// The returned response may still carry an API-level failure in its
    /// `status` field; that is left to the caller.
    #[instrument(name = "keybase.get", skip_all, fields(endpoint = E::PATH))]
    pub async fn get<E: Endpoint>(&self, params: &E) -> Result<E::Response> {
        let url = self.url_for(params)?;
        tracing::debug!(%url, "sending request");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        tracing::debug!(http_status = status.as_u16(), bytes = body.len(), "received response");

        match serde_json::from_slice::<E::Response>(&body) {
            Ok(decoded) => Ok(decoded),
            Err(_) if !status.is_success() => Err(Error::Http {
                endpoint: E::PATH,
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            }),
            Err(source) => {
                tracing::warn!(error = %source, "response did not match schema");
                Err(Error::Decode {
                    endpoint: E::PATH,
                    source,
                })
            }
        }
    }

    pub async fn key_fetch(&self, params: &KeyFetchParams) -> Result<KeyFetchResponse> {
        self.get(params).await
    }

    pub async fn user_lookup(&self, params: &UserLookupParams) -> Result<UserLookupResponse> {
        self.get(params).await
    }

    pub async fn user_autocomplete(
        &self,
        params: &UserAutocompleteParams,
    ) -> Result<UserAutocompleteResponse> {
        self.get(params).await
    }

    pub async fn user_discover(&self, params: &UserDiscoverParams) -> Result<UserDiscoverResponse> {
        self.get(params).await
    }
}
