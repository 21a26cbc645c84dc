//! key/fetch

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::de::{nullable, nullable_seq};
use super::status::Status;
use crate::endpoint::{Endpoint, QueryPairs};

/// Bits of the `ops` filter: only keys usable for the requested
/// operations are returned.
pub mod key_ops {
    pub const ENCRYPT: u32 = 0x1;
    pub const DECRYPT: u32 = 0x2;
    pub const VERIFY: u32 = 0x4;
    pub const SIGN: u32 = 0x8;
}

/// Params for key/fetch. Both fields are always sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyFetchParams {
    /// Comma-separated 64-bit PGP key ids.
    pub pgp_key_ids: String,
    pub ops: u32,
}

impl Endpoint for KeyFetchParams {
    const PATH: &'static str = "key/fetch";
    type Response = KeyFetchResponse;

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        QueryPairs::new()
            .required("pgp_key_ids", &self.pgp_key_ids)
            .required("ops", self.ops)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyFetchResponse {
    #[serde(deserialize_with = "nullable")]
    pub status: Status,
    #[serde(deserialize_with = "nullable_seq")]
    pub keys: Vec<Key>,
}

/// A key bundle returned by key/fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Key {
    #[serde(deserialize_with = "nullable")]
    pub bundle: String,
    #[serde(deserialize_with = "nullable")]
    pub key_type: i64,
    #[serde(deserialize_with = "nullable")]
    pub kid: String,
    #[serde(deserialize_with = "nullable")]
    pub primary_bundle_in_keyring: i64,
    #[serde(deserialize_with = "nullable")]
    pub secret: i64,
    #[serde(deserialize_with = "nullable")]
    pub self_sign_type: i64,
    #[serde(deserialize_with = "nullable")]
    pub self_signed: i64,
    /// Keyed by sub-key id.
    #[serde(deserialize_with = "nullable")]
    pub subkeys: BTreeMap<String, SubKey>,
}

impl Key {
    pub fn is_secret(&self) -> bool {
        self.secret != 0
    }

    pub fn is_primary_bundle(&self) -> bool {
        self.primary_bundle_in_keyring != 0
    }

    pub fn is_self_signed(&self) -> bool {
        self.self_signed != 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubKey {
    #[serde(deserialize_with = "nullable")]
    pub flags: i64,
    #[serde(deserialize_with = "nullable")]
    pub is_primary: i64,
}

impl SubKey {
    pub fn is_primary(&self) -> bool {
        self.is_primary != 0
    }
}
