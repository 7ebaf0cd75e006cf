use serde::{Deserialize, Deserializer};

/// Deserializes a value that the API may send as `null`, mapping `null` to the
/// type's default.
///
/// `content` and `finish_reason` are both nullable on the wire even though the
/// model always treats them as text.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
