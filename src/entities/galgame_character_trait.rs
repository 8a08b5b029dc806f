use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Character trait vocabulary for galgame characters.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "galgame_character_trait")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::galgame_character_trait_link::Entity")]
    GalgameCharacterTraitLink,
}

impl Related<super::galgame_character_trait_link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GalgameCharacterTraitLink.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
