//! Domain primitives shared by the catalog entities and repositories.
//!
//! The enums here are persisted as their lowercase string form, matching the
//! values the external catalogs and operator tooling use.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Media type of a catalog [`Subject`](crate::entities::subject).
///
/// Each variant with a detail table (`Anime`, `Galgame`) owns exactly one
/// detail row keyed by the subject id.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(64))")]
#[serde(rename_all = "lowercase")]
pub enum SubjectType {
    #[sea_orm(string_value = "anime")]
    Anime,
    #[sea_orm(string_value = "galgame")]
    Galgame,
    #[sea_orm(string_value = "manga")]
    Manga,
    #[sea_orm(string_value = "game")]
    Game,
    #[sea_orm(string_value = "novel")]
    Novel,
    #[sea_orm(string_value = "music")]
    Music,
    #[sea_orm(string_value = "other")]
    Other,
}

impl SubjectType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Anime => "anime",
            Self::Galgame => "galgame",
            Self::Manga => "manga",
            Self::Game => "game",
            Self::Novel => "novel",
            Self::Music => "music",
            Self::Other => "other",
        }
    }

    /// Whether subjects of this type carry a dedicated detail table.
    #[must_use]
    pub const fn has_detail_table(&self) -> bool {
        matches!(self, Self::Anime | Self::Galgame)
    }
}

impl fmt::Display for SubjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "anime" => Ok(Self::Anime),
            "galgame" => Ok(Self::Galgame),
            "manga" => Ok(Self::Manga),
            "game" => Ok(Self::Game),
            "novel" => Ok(Self::Novel),
            "music" => Ok(Self::Music),
            "other" => Ok(Self::Other),
            other => Err(format!("unknown subject type: {other}")),
        }
    }
}

/// Severity of the current [`SubjectStatus`](crate::entities::subject_status).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(64))")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[sea_orm(string_value = "info")]
    Info,
    #[sea_orm(string_value = "warning")]
    Warning,
    #[sea_orm(string_value = "error")]
    Error,
}

impl Severity {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown severity: {other}")),
        }
    }
}

/// Sort direction for subject listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    #[must_use]
    pub const fn is_ascending(&self) -> bool {
        matches!(self, Self::Ascending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;

    #[test]
    fn subject_type_round_trips_through_str() {
        for ty in SubjectType::iter() {
            assert_eq!(ty.as_str().parse::<SubjectType>().unwrap(), ty);
        }
        assert!("podcast".parse::<SubjectType>().is_err());
    }

    #[test]
    fn only_anime_and_galgame_have_detail_tables() {
        let with_detail: Vec<_> = SubjectType::iter()
            .filter(SubjectType::has_detail_table)
            .collect();
        assert_eq!(with_detail, vec![SubjectType::Anime, SubjectType::Galgame]);
    }

    #[test]
    fn severity_accepts_warn_alias() {
        assert_eq!("WARN".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!(Severity::Error.to_string(), "error");
    }
}
