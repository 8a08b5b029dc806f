use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role a character plays in an anime (main, supporting, ...).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "anime_character_relation_role")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::anime_character_relation::Entity")]
    AnimeCharacterRelation,
}

impl Related<super::anime_character_relation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnimeCharacterRelation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
