//! user/lookup and the Keybase "User Object"
//!
//! Documented at <https://keybase.io/docs/api/1.0/user_objects>.

use serde::{Deserialize, Serialize};

use super::de::nullable;
use super::status::Status;
use crate::endpoint::{Endpoint, QueryPairs};

/// Params for user/lookup. Every field is optional and omitted from the
/// query when empty. List-valued fields take comma-separated values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserLookupParams {
    pub usernames: String,
    pub domain: String,
    pub twitter: String,
    pub github: String,
    pub reddit: String,
    pub hackernews: String,
    pub coinbase: String,
    pub key_fingerprint: String,
    /// Restricts which top-level user fields are returned, e.g. `basics,profile`.
    pub fields: String,
}

impl UserLookupParams {
    pub fn usernames(usernames: impl Into<String>) -> Self {
        Self {
            usernames: usernames.into(),
            ..Self::default()
        }
    }
}

impl Endpoint for UserLookupParams {
    const PATH: &'static str = "user/lookup";
    type Response = UserLookupResponse;

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        QueryPairs::new()
            .optional("usernames", &self.usernames)
            .optional("domain", &self.domain)
            .optional("twitter", &self.twitter)
            .optional("github", &self.github)
            .optional("reddit", &self.reddit)
            .optional("hackernews", &self.hackernews)
            .optional("coinbase", &self.coinbase)
            .optional("key_fingerprint", &self.key_fingerprint)
            .optional("fields", &self.fields)
            .finish()
    }
}

/// If the caller is the user being fetched, `me` is filled in,
/// otherwise `them` is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserLookupResponse {
    #[serde(deserialize_with = "nullable")]
    pub status: Status,
    /// One slot per requested identity; `None` where Keybase knows no such user.
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub them: Vec<Option<User>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub me: Option<User>,
}

impl UserLookupResponse {
    /// Users that were found, skipping unknown slots.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.them.iter().flatten().chain(self.me.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub basics: Basics,
    #[serde(deserialize_with = "nullable")]
    pub invitation_stats: InvitationStats,
    #[serde(deserialize_with = "nullable")]
    pub profile: Profile,
    #[serde(deserialize_with = "nullable")]
    pub emails: Emails,
    #[serde(deserialize_with = "nullable")]
    pub public_keys: PublicKeys,
    #[serde(deserialize_with = "nullable")]
    pub private_keys: PrivateKeys,
    #[serde(deserialize_with = "nullable")]
    pub cryptocurrency_addresses: CryptocurrencyAddresses,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Basics {
    #[serde(deserialize_with = "nullable")]
    pub ctime: i64,
    #[serde(deserialize_with = "nullable")]
    pub mtime: i64,
    #[serde(deserialize_with = "nullable")]
    pub salt: String,
    #[serde(deserialize_with = "nullable")]
    pub uid: String,
    #[serde(deserialize_with = "nullable")]
    pub username: String,
}

/// Only present when looking up yourself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvitationStats {
    #[serde(deserialize_with = "nullable")]
    pub available: i64,
    #[serde(deserialize_with = "nullable")]
    pub open: i64,
    #[serde(deserialize_with = "nullable")]
    pub power: i64,
    #[serde(deserialize_with = "nullable")]
    pub used: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    #[serde(deserialize_with = "nullable")]
    pub bio: String,
    #[serde(deserialize_with = "nullable")]
    pub full_name: String,
    #[serde(deserialize_with = "nullable")]
    pub location: String,
    #[serde(deserialize_with = "nullable")]
    pub mtime: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Emails {
    #[serde(deserialize_with = "nullable")]
    pub primary: Email,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Email {
    #[serde(deserialize_with = "nullable")]
    pub email: String,
    #[serde(deserialize_with = "nullable")]
    pub is_verified: i64,
}

impl Email {
    pub fn verified(&self) -> bool {
        self.is_verified != 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicKeys {
    #[serde(deserialize_with = "nullable")]
    pub primary: PublicKey,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicKey {
    #[serde(deserialize_with = "nullable")]
    pub key_fingerprint: String,
    #[serde(deserialize_with = "nullable")]
    pub kid: String,
    #[serde(deserialize_with = "nullable")]
    pub key_type: i64,
    #[serde(deserialize_with = "nullable")]
    pub bundle: String,
    #[serde(deserialize_with = "nullable")]
    pub ctime: i64,
    #[serde(deserialize_with = "nullable")]
    pub mtime: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivateKeys {
    #[serde(deserialize_with = "nullable")]
    pub bundle: String,
    #[serde(deserialize_with = "nullable")]
    pub key_type: i64,
    #[serde(deserialize_with = "nullable")]
    pub kid: String,
    #[serde(deserialize_with = "nullable")]
    pub ctime: i64,
    #[serde(deserialize_with = "nullable")]
    pub mtime: i64,
}

/// Bitcoin is the only currency Keybase attaches to users.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptocurrencyAddresses {
    #[serde(deserialize_with = "nullable")]
    pub bitcoin: CryptocurrencyAddress,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptocurrencyAddress {
    #[serde(deserialize_with = "nullable")]
    pub address: String,
    #[serde(deserialize_with = "nullable")]
    pub sig_id: String,
}
