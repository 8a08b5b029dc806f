use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role a character plays in a galgame (protagonist, main, side, ...).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "galgame_character_relation_role")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::galgame_character_relation::Entity")]
    GalgameCharacterRelation,
}

impl Related<super::galgame_character_relation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GalgameCharacterRelation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
