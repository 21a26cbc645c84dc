//! Mapping from typed request parameters to Keybase endpoints

use serde::de::DeserializeOwned;
use url::form_urlencoded;

/// A Keybase API endpoint, described by its parameter struct.
pub trait Endpoint {
    /// Path below the API root, without the `.json` suffix.
    const PATH: &'static str;

    type Response: DeserializeOwned;

    /// Query entries in declaration order, keyed by wire name.
    /// Optional fields left empty are not included.
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

/// Render query entries as an `application/x-www-form-urlencoded` string.
pub fn encode_query<E: Endpoint>(params: &E) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.query_pairs())
        .finish()
}

/// Collects query entries, skipping optional values that are empty.
#[derive(Default)]
pub(crate) struct QueryPairs(Vec<(&'static str, String)>);

impl QueryPairs {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Always sent, even when empty.
    pub(crate) fn required(mut self, name: &'static str, value: impl ToString) -> Self {
        self.0.push((name, value.to_string()));
        self
    }

    /// Dropped when `value` is the empty string.
    pub(crate) fn optional(mut self, name: &'static str, value: &str) -> Self {
        if !value.is_empty() {
            self.0.push((name, value.to_string()));
        }
        self
    }

    /// Sent as `name=1` when set, dropped otherwise.
    pub(crate) fn flag(mut self, name: &'static str, value: bool) -> Self {
        if value {
            self.0.push((name, "1".to_string()));
        }
        self
    }

    pub(crate) fn finish(self) -> Vec<(&'static str, String)> {
        self.0
    }
}
