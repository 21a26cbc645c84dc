//! Deserialization helpers shared by the response models

use serde::{Deserialize, Deserializer};

/// Decode `null` as the type's default value.
///
/// Keybase sends `null` for sub-objects a user never filled in (no private
/// key, no profile, ...). Combine with `#[serde(default)]` to also cover
/// absent fields.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Element wrapper applying the `nullable` rule inside sequences.
struct OrDefault<T>(T);

impl<'de, T> Deserialize<'de> for OrDefault<T>
where
    T: Default + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        nullable(deserializer).map(OrDefault)
    }
}

/// Like `nullable`, and a `null` element also decodes as its default.
pub(crate) fn nullable_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let items: Vec<OrDefault<T>> = nullable(deserializer)?;
    Ok(items.into_iter().map(|OrDefault(item)| item).collect())
}

/// `nullable_seq` one level deeper: a `null` group is an empty group.
pub(crate) fn nullable_groups<'de, D, T>(deserializer: D) -> Result<Vec<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let groups: Vec<OrDefault<Vec<OrDefault<T>>>> = nullable(deserializer)?;
    Ok(groups
        .into_iter()
        .map(|OrDefault(group)| group.into_iter().map(|OrDefault(item)| item).collect())
        .collect())
}
