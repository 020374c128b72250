//! Wire Decoding Helpers
//!
//! The backend leaves optional choice fields blank ("") instead of null,
//! and older records may carry codes this client does not know. Catalog
//! decoding treats both as absent rather than failing the whole payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Decode a value that may be blank, null, or an unknown code as `None`
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Like [`lenient`], but fall back to the type's default instead of `None`
pub fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}
