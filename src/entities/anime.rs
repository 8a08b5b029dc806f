use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Anime detail row. Shares its primary key with the owning subject.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "anime")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub subject_id: Uuid,
    pub aliases: Json,
    pub titles: Json,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    /// e.g. "TV", "OVA", "Movie"
    pub anime_type: String,
    /// e.g. "Manga", "Original"
    pub anime_source: String,
    pub official_websites: Json,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub image_original: String,
    pub image_thumbnail: String,
    pub image_extra: Json,
    pub anime_status: String,
    pub ep_total: Option<i32>,
    pub broadcast: Json,
    pub broadcast_season: Json,
    pub external_links: Json,
    pub info_source: String,
    pub id_source: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subject::Entity",
        from = "Column::SubjectId",
        to = "super::subject::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Subject,
    #[sea_orm(has_many = "super::anime_episode::Entity")]
    AnimeEpisode,
    #[sea_orm(has_many = "super::anime_staff_relation::Entity")]
    AnimeStaffRelation,
    #[sea_orm(has_many = "super::anime_character_relation::Entity")]
    AnimeCharacterRelation,
    #[sea_orm(has_many = "super::anime_genre_link::Entity")]
    AnimeGenreLink,
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::anime_episode::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnimeEpisode.def()
    }
}

impl Related<super::anime_genre::Entity> for Entity {
    fn to() -> RelationDef {
        super::anime_genre_link::Relation::AnimeGenre.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::anime_genre_link::Relation::Anime.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
