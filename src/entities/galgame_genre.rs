use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Genre vocabulary for galgames.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "galgame_genre")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::galgame_genre_link::Entity")]
    GalgameGenreLink,
}

impl Related<super::galgame_genre_link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GalgameGenreLink.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
