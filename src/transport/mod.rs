//! Protocol adapters over [`crate::tracker::services::TrackerService`].
//!
//! Both adapters only parse input, call the service and translate
//! [`crate::tracker::services::ErrorKind`] into protocol errors.

pub mod rest;
pub mod tools;
pub mod views;

use serde::{Deserialize, Deserializer};

/// Distinguishes an explicit `null` from an absent field.
///
/// Used with `#[serde(default)]` on `Option<Option<T>>` fields, where the
/// outer `None` means "absent" and `Some(None)` means "clear".
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
