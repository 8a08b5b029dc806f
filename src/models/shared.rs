//! Field bundles embedded by value into the catalog input types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Origin system plus the origin's native id. Unique per entity type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Provenance {
    pub info_source: String,
    pub id_source: String,
}

impl Provenance {
    pub fn new(info_source: impl Into<String>, id_source: impl Into<String>) -> Self {
        Self {
            info_source: info_source.into(),
            id_source: id_source.into(),
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.info_source.trim().is_empty() && !self.id_source.trim().is_empty()
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.info_source, self.id_source)
    }
}

/// Entry of a controlled vocabulary: stable `code` plus display `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeName {
    pub code: String,
    pub name: String,
}

impl CodeName {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffProfile {
    pub name: String,
    pub description: String,
    pub gender: String,
    /// Heterogeneous per source, e.g. `{"year": 1980, "month": 4, "day": 1}`.
    pub birth: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterProfile {
    pub name: String,
    pub image_original: String,
    pub image_thumbnail: String,
    pub description: String,
    pub gender: String,
    pub birth: Map<String, Value>,
    pub age: Option<i32>,
    pub height: String,
    pub weight: String,
    /// Bust/waist/hips as reported by the source, e.g. `{"b": 82, "w": 56, "h": 84}`.
    pub bwh: Map<String, Value>,
    pub blood_type: String,
}
