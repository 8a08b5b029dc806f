use super::{CharacterProfile, Provenance, StaffProfile};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Anime-specific attributes attached to an `anime` subject.
///
/// An empty `provenance` inherits the owning subject's pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimeDetail {
    pub aliases: Vec<String>,
    pub titles: Map<String, Value>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub anime_type: String,
    pub anime_source: String,
    pub official_websites: Vec<String>,
    pub description: String,
    pub image_original: String,
    pub image_thumbnail: String,
    pub image_extra: Vec<String>,
    pub anime_status: String,
    pub ep_total: Option<i32>,
    /// e.g. `{"weekday": "Saturday", "time": "23:30", "timezone": "JST"}`
    pub broadcast: Map<String, Value>,
    /// e.g. `{"year": 2024, "season": "fall"}`
    pub broadcast_season: Map<String, Value>,
    pub external_links: Map<String, Value>,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewAnimeStaff {
    pub profile: StaffProfile,
    pub staff_type: String,
    pub career: String,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewAnimeCharacter {
    pub profile: CharacterProfile,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewAnimeEpisode {
    pub title: String,
    /// Main, special, opening, ... as labelled by the source.
    pub episode_type: String,
    pub ep_num: Option<i32>,
    pub duration_secs: Option<i64>,
    pub airdate: Option<NaiveDate>,
    pub description: String,
    pub provenance: Provenance,
}
