use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Genre vocabulary for anime.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "anime_genre")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::anime_genre_link::Entity")]
    AnimeGenreLink,
}

impl Related<super::anime_genre_link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnimeGenreLink.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
