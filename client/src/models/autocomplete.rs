//! user/autocomplete

use serde::{Deserialize, Serialize};

use super::de::{nullable, nullable_seq};
use super::status::Status;
use crate::endpoint::{Endpoint, QueryPairs};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserAutocompleteParams {
    /// Search text; matched against usernames, names, fingerprints and proofs.
    pub q: String,
}

impl UserAutocompleteParams {
    pub fn new(q: impl Into<String>) -> Self {
        Self { q: q.into() }
    }
}

impl Endpoint for UserAutocompleteParams {
    const PATH: &'static str = "user/autocomplete";
    type Response = UserAutocompleteResponse;

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        QueryPairs::new().required("q", &self.q).finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserAutocompleteResponse {
    #[serde(deserialize_with = "nullable")]
    pub status: Status,
    #[serde(deserialize_with = "nullable_seq")]
    pub completions: Vec<Completion>,
}

/// One ranked candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Completion {
    #[serde(deserialize_with = "nullable")]
    pub total_score: f64,
    #[serde(deserialize_with = "nullable")]
    pub components: Components,
    #[serde(deserialize_with = "nullable")]
    pub uid: String,
    #[serde(deserialize_with = "nullable")]
    pub thumbnail: String,
    #[serde(deserialize_with = "nullable")]
    pub is_followee: bool,
}

/// The parts of an identity that matched, each with its own score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Components {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<Component>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_fingerprint: Option<KeyFingerprintComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<Component>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<Component>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<Component>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reddit: Option<Component>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hackernews: Option<Component>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coinbase: Option<Component>,
    #[serde(deserialize_with = "nullable_seq", skip_serializing_if = "Vec::is_empty")]
    pub websites: Vec<WebsiteComponent>,
}

impl Components {
    /// The matched username, or "" when the completion carries none.
    pub fn username(&self) -> &str {
        self.username.as_ref().map_or("", |c| c.val.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Component {
    #[serde(deserialize_with = "nullable")]
    pub val: String,
    #[serde(deserialize_with = "nullable")]
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyFingerprintComponent {
    #[serde(flatten)]
    pub component: Component,
    #[serde(deserialize_with = "nullable")]
    pub algo: i64,
    #[serde(deserialize_with = "nullable")]
    pub nbits: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebsiteComponent {
    #[serde(flatten)]
    pub component: Component,
    /// `http:` or `https:`
    #[serde(deserialize_with = "nullable")]
    pub protocol: String,
}
