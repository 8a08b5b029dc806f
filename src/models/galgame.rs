use super::{CharacterProfile, Provenance, StaffProfile};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Galgame-specific attributes attached to a `galgame` subject.
///
/// An empty `provenance` inherits the owning subject's pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalgameDetail {
    pub aliases: Vec<String>,
    pub titles: Map<String, Value>,
    pub released_date: Option<NaiveDate>,
    pub description: String,
    pub image_original: String,
    pub image_thumbnail: String,
    pub screenshots: Vec<String>,
    pub platforms: Vec<String>,
    pub galgame_status: String,
    pub external_links: Vec<Value>,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewGalgameProducer {
    pub name: String,
    pub aliases: Vec<String>,
    /// "co" (company), "in" (individual), "ng" (amateur group) on VNDB.
    pub producer_type: String,
    pub description: String,
    pub official_website: String,
    pub external_link: Map<String, Value>,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewGalgameStaff {
    pub profile: StaffProfile,
    pub aliases: Vec<String>,
    pub external_link: Map<String, Value>,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewGalgameCharacter {
    pub profile: CharacterProfile,
    pub provenance: Provenance,
}
