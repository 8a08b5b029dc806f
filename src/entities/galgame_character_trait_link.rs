use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "galgame_character_trait_link")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub character_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub trait_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::galgame_character::Entity",
        from = "Column::CharacterId",
        to = "super::galgame_character::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    GalgameCharacter,
    #[sea_orm(
        belongs_to = "super::galgame_character_trait::Entity",
        from = "Column::TraitId",
        to = "super::galgame_character_trait::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    GalgameCharacterTrait,
}

impl Related<super::galgame_character::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GalgameCharacter.def()
    }
}

impl Related<super::galgame_character_trait::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GalgameCharacterTrait.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
