use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "anime_genre_link")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub anime_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub genre_id: i32,
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
    #[sea_orm(
        belongs_to = "super::anime_genre::Entity",
        from = "Column::GenreId",
        to = "super::anime_genre::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    AnimeGenre,
}

impl Related<super::anime::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Anime.def()
    }
}

impl Related<super::anime_genre::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnimeGenre.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
