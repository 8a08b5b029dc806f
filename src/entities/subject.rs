use crate::domain::SubjectType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Root catalog record, one row per media item regardless of type.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subject")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub subject_type: SubjectType,
    #[sea_orm(indexed)]
    pub title: String,
    pub date: Option<Date>,
    /// Only populated when `date` is not available.
    pub ambiguous_date: Option<Date>,
    pub image_original: String,
    pub image_thumbnail: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub nsfw: bool,
    /// Ordered list of `{"key": .., "value": ..}` entries.
    pub infobox: Json,
    pub tags: Json,
    pub info_source: String,
    pub id_source: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl Model {
    /// The authoritative release date: the exact one when known.
    #[must_use]
    pub fn release_date(&self) -> Option<Date> {
        self.date.or(self.ambiguous_date)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = if self.title.is_empty() {
            "Untitled"
        } else {
            &self.title
        };
        match self.release_date() {
            Some(date) => write!(f, "[{}] {} ({})", self.subject_type, title, date),
            None => write!(f, "[{}] {} (Unknown)", self.subject_type, title),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::anime::Entity")]
    Anime,
    #[sea_orm(has_one = "super::galgame::Entity")]
    Galgame,
    #[sea_orm(has_one = "super::subject_status::Entity")]
    SubjectStatus,
    #[sea_orm(has_one = "super::pending_update::Entity")]
    PendingUpdate,
}

impl Related<super::anime::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Anime.def()
    }
}

impl Related<super::galgame::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Galgame.def()
    }
}

impl Related<super::subject_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubjectStatus.def()
    }
}

impl Related<super::pending_update::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PendingUpdate.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
