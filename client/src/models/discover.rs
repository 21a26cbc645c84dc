//! user/discover

use serde::{Deserialize, Serialize};

use super::de::{nullable, nullable_groups, nullable_seq};
use super::status::Status;
use crate::endpoint::{Endpoint, QueryPairs};

/// Params for user/discover. Service fields take comma-separated handles
/// and are omitted when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDiscoverParams {
    pub twitter: String,
    pub github: String,
    pub hackernews: String,
    pub web: String,
    pub coinbase: String,
    pub key_fingerprint: String,
    /// Ask for one flat candidate list per service instead of one group
    /// per searched handle.
    pub flatten: bool,
}

impl Endpoint for UserDiscoverParams {
    const PATH: &'static str = "user/discover";
    type Response = UserDiscoverResponse;

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        QueryPairs::new()
            .optional("twitter", &self.twitter)
            .optional("github", &self.github)
            .optional("hackernews", &self.hackernews)
            .optional("web", &self.web)
            .optional("coinbase", &self.coinbase)
            .optional("key_fingerprint", &self.key_fingerprint)
            .flag("flatten", self.flatten)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserDiscoverResponse {
    #[serde(deserialize_with = "nullable")]
    pub status: Status,
    #[serde(deserialize_with = "nullable")]
    pub matches: DiscoverMatches,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoverMatches {
    #[serde(deserialize_with = "nullable")]
    pub twitter: ServiceMatches,
    #[serde(deserialize_with = "nullable")]
    pub github: ServiceMatches,
    #[serde(deserialize_with = "nullable")]
    pub hackernews: ServiceMatches,
    #[serde(deserialize_with = "nullable")]
    pub web: ServiceMatches,
    #[serde(deserialize_with = "nullable")]
    pub coinbase: ServiceMatches,
}

impl DiscoverMatches {
    /// Every candidate across services, labelled with the service name.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Candidate)> {
        [
            ("twitter", &self.twitter),
            ("github", &self.github),
            ("hackernews", &self.hackernews),
            ("web", &self.web),
            ("coinbase", &self.coinbase),
        ]
        .into_iter()
        .flat_map(|(service, matches)| matches.candidates().map(move |c| (service, c)))
    }
}

/// Candidates for one service.
///
/// By default Keybase answers with one group per searched handle, in
/// request order. With `flatten=1` the groups are merged into one list.
/// A `null` group decodes as an empty group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServiceMatches {
    Grouped(#[serde(deserialize_with = "nullable_groups")] Vec<Vec<Candidate>>),
    Flat(#[serde(deserialize_with = "nullable_seq")] Vec<Candidate>),
}

impl Default for ServiceMatches {
    fn default() -> Self {
        ServiceMatches::Grouped(Vec::new())
    }
}

impl ServiceMatches {
    pub fn candidates(&self) -> Box<dyn Iterator<Item = &Candidate> + '_> {
        match self {
            ServiceMatches::Grouped(groups) => Box::new(groups.iter().flatten()),
            ServiceMatches::Flat(list) => Box::new(list.iter()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates().next().is_none()
    }
}

/// A Keybase account that has proven the searched identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Candidate {
    #[serde(deserialize_with = "nullable")]
    pub thumbnail: String,
    #[serde(deserialize_with = "nullable")]
    pub username: String,
    #[serde(deserialize_with = "nullable")]
    pub public_key: CandidateKey,
    #[serde(deserialize_with = "nullable")]
    pub ctime: i64,
    #[serde(deserialize_with = "nullable")]
    pub remote_proofs: RemoteProofs,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateKey {
    #[serde(deserialize_with = "nullable")]
    pub key_fingerprint: String,
    #[serde(deserialize_with = "nullable")]
    pub bits: i64,
    #[serde(deserialize_with = "nullable")]
    pub algo: i64,
}

/// Proofs the account has posted, by service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteProofs {
    #[serde(deserialize_with = "nullable_seq")]
    pub dns: Vec<String>,
    #[serde(deserialize_with = "nullable_seq")]
    pub generic_web_site: Vec<WebSiteProof>,
    #[serde(deserialize_with = "nullable")]
    pub twitter: String,
    #[serde(deserialize_with = "nullable")]
    pub github: String,
    #[serde(deserialize_with = "nullable")]
    pub reddit: String,
    #[serde(deserialize_with = "nullable")]
    pub hackernews: String,
    #[serde(deserialize_with = "nullable")]
    pub coinbase: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebSiteProof {
    #[serde(deserialize_with = "nullable")]
    pub hostname: String,
    #[serde(deserialize_with = "nullable")]
    pub protocol: String,
}
