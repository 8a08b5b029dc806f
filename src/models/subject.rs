use super::Provenance;
use crate::domain::{SortOrder, SubjectType};
use crate::entities::{anime, galgame};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One infobox line as published by the source, e.g. `{"key": "Director", "value": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoboxEntry {
    pub key: String,
    pub value: Value,
}

impl InfoboxEntry {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSubject {
    pub subject_type: SubjectType,
    pub title: String,
    pub date: Option<NaiveDate>,
    pub ambiguous_date: Option<NaiveDate>,
    pub image_original: String,
    pub image_thumbnail: String,
    pub description: String,
    pub nsfw: bool,
    pub infobox: Vec<InfoboxEntry>,
    pub tags: Vec<Value>,
    pub provenance: Provenance,
}

impl NewSubject {
    pub fn new(subject_type: SubjectType, title: impl Into<String>, provenance: Provenance) -> Self {
        Self {
            subject_type,
            title: title.into(),
            date: None,
            ambiguous_date: None,
            image_original: String::new(),
            image_thumbnail: String::new(),
            description: String::new(),
            nsfw: false,
            infobox: Vec::new(),
            tags: Vec::new(),
            provenance,
        }
    }

    /// Exact and ambiguous dates are mutually exclusive.
    pub fn validate(&self) -> Result<(), String> {
        if !self.provenance.is_complete() {
            return Err(format!("incomplete provenance: {}", self.provenance));
        }
        if self.date.is_some() && self.ambiguous_date.is_some() {
            return Err(format!(
                "subject {} carries both an exact and an ambiguous date",
                self.provenance
            ));
        }
        Ok(())
    }
}

/// Listing filter for subjects. Defaults list everything, newest first.
#[derive(Debug, Clone, Default)]
pub struct SubjectFilter {
    pub subject_type: Option<SubjectType>,
    pub title_contains: Option<String>,
    pub nsfw: Option<bool>,
    pub date_order: SortOrder,
    pub offset: u64,
    pub limit: Option<u64>,
}

/// The single detail row selected by a subject's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectDetail {
    Anime(anime::Model),
    Galgame(galgame::Model),
}
