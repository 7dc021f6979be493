//! Wire record returned by a provider call.

use serde::{Deserialize, Serialize};

/// One generated vocabulary entry.
///
/// Every field is serde-defaulted: adapters validate that the response is a
/// JSON array but deliberately perform no field-level validation, so an entry
/// missing `definition` or `example` deserializes with an empty string and
/// simply renders as an empty fragment. Only `word` outlives the fetch, into
/// the per-language history.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WordEntry {
    pub language: String,
    pub word: String,
    pub definition: String,
    pub example: String,
}
