//! # Lenient (de)serialization helpers
//!
//! Stored posts were written by several versions of the editor, so attribute
//! values may be `null`, missing or of the wrong type. None of that should
//! make the whole document unreadable.
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize `null` as the default value
pub fn deserialize_or_default<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: Default + Deserialize<'de>,
    D: Deserializer<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize any value, substituting the default if it has the wrong shape
pub fn lenient<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: Default + DeserializeOwned,
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// An item that can carry a JSON value it could not interpret.
///
/// Used for nodes and marks of kinds that this crate does not know about,
/// so that they survive a decode/encode cycle untouched.
pub trait Opaque: Sized {
    /// Wrap an uninterpreted value
    fn opaque(raw: Value) -> Self;
    /// The uninterpreted value, if this is one
    fn as_opaque(&self) -> Option<&Value>;
}

/// Sequences of nodes or marks.
///
/// Every element is decoded on its own: an element that does not decode
/// is kept as an opaque value instead of failing its siblings. A field that
/// is not an array at all decodes as empty.
pub mod seq {
    use super::Opaque;
    use serde::de::DeserializeOwned;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    #[allow(clippy::ptr_arg)]
    pub fn serialize<T, S>(items: &Vec<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize + Opaque,
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(items.len()))?;
        for item in items {
            match item.as_opaque() {
                Some(raw) => seq.serialize_element(raw)?,
                None => seq.serialize_element(item)?,
            }
        }
        seq.end()
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        T: DeserializeOwned + Opaque,
        D: Deserializer<'de>,
    {
        let items = match Value::deserialize(deserializer)? {
            Value::Array(items) => items,
            _ => return Ok(Vec::new()),
        };
        Ok(items
            .into_iter()
            .map(|raw| serde_json::from_value(raw.clone()).unwrap_or_else(|_| T::opaque(raw)))
            .collect())
    }
}
