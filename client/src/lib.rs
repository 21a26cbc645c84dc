//! Typed client for the Keybase HTTP API.
//!
//! Each endpoint has a params struct implementing [`Endpoint`] and a
//! response struct mirroring the documented JSON. A [`Client`] performs one
//! GET per call and decodes the body; the response's `status` field carries
//! the API's own verdict and is returned as-is.
//!
//! ```no_run
//! # async fn run() -> keybase::Result<()> {
//! let resp = keybase::user_lookup(&keybase::UserLookupParams::usernames("max")).await?;
//! for user in resp.users() {
//!     println!("{}", user.profile.full_name);
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::OnceLock;

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod models;

pub use client::Client;
pub use config::Config;
pub use endpoint::{encode_query, Endpoint};
pub use error::{Error, Result};
pub use models::*;

static DEFAULT_CLIENT: OnceLock<Client> = OnceLock::new();

/// Shared client for the public API, built from [`Config::default`] on
/// first use.
pub fn default_client() -> Result<&'static Client> {
    if let Some(client) = DEFAULT_CLIENT.get() {
        return Ok(client);
    }
    let client = Client::new(&Config::default())?;
    Ok(DEFAULT_CLIENT.get_or_init(|| client))
}

pub async fn key_fetch(params: &KeyFetchParams) -> Result<KeyFetchResponse> {
    default_client()?.key_fetch(params).await
}

pub async fn user_lookup(params: &UserLookupParams) -> Result<UserLookupResponse> {
    default_client()?.user_lookup(params).await
}

pub async fn user_autocomplete(params: &UserAutocompleteParams) -> Result<UserAutocompleteResponse> {
    default_client()?.user_autocomplete(params).await
}

pub async fn user_discover(params: &UserDiscoverParams) -> Result<UserDiscoverResponse> {
    default_client()?.user_discover(params).await
}
