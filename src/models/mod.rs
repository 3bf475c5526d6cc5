pub mod consent;
pub mod privacy;
pub mod score;
pub mod session;
pub mod trip;

use serde::{Deserialize, Deserializer};

/// Decodes an explicit `null` the same way as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
