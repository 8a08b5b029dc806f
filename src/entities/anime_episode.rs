use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A single episode. Each episode belongs to exactly one anime.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "anime_episode")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub anime_id: Uuid,
    pub title: String,
    pub episode_type: String,
    pub ep_num: Option<i32>,
    pub duration_secs: Option<i64>,
    pub airdate: Option<Date>,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub info_source: String,
    pub id_source: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::anime::Entity",
        from = "Column::AnimeId",
        to = "super::anime::Column::SubjectId",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Anime,
}

impl Related<super::anime::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Anime.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
