//! Configuration options for record validation.

use serde::{Deserialize, Serialize};

/// How length rules treat an empty value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmptyLengthMode {
    /// An empty value also breaks the length rule, so an empty required
    /// field is reported under both its "required" and its "length" reason.
    #[default]
    Report,
    /// Length rules only fire for over-length values; emptiness is reported
    /// solely as "required".
    Ignore,
}

/// Options controlling the record validator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOptions {
    pub empty_length_mode: EmptyLengthMode,
}

impl ValidationOptions {
    /// Options where length rules never double-report empty values.
    pub fn strict_length() -> Self {
        Self {
            empty_length_mode: EmptyLengthMode::Ignore,
        }
    }
}
