// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Deserializer};

/// Distinguishes an absent member from an explicit `null`.
///
/// Use with `#[serde(default, deserialize_with = "...")]` on an
/// `Option<Option<T>>` field: absent is `None`, `null` is `Some(None)`.
pub mod nullable {
    use super::*;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
