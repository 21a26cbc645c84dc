//! Error types for the Keybase API client

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single GET-and-decode round trip.
///
/// API-level failures (unknown user, bad input, ...) are not errors: they
/// arrive in the `status` field of a successfully decoded response.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Could not decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("HTTP {status} from {endpoint}: {body}")]
    Http {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True when the request never produced a readable reply.
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// True when a 2xx reply did not match the expected schema.
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }

    /// True for a non-2xx reply whose body was not an API envelope,
    /// e.g. a gateway error page.
    pub fn is_http(&self) -> bool {
        matches!(self, Error::Http { .. })
    }
}
