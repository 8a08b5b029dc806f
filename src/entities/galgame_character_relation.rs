use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "galgame_character_relation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub galgame_id: Uuid,
    pub character_id: i32,
    pub role_id: i32,
    #[sea_orm(column_type = "Text")]
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::galgame::Entity",
        from = "Column::GalgameId",
        to = "super::galgame::Column::SubjectId",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Galgame,
    #[sea_orm(
        belongs_to = "super::galgame_character::Entity",
        from = "Column::CharacterId",
        to = "super::galgame_character::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    GalgameCharacter,
    #[sea_orm(
        belongs_to = "super::galgame_character_relation_role::Entity",
        from = "Column::RoleId",
        to = "super::galgame_character_relation_role::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Role,
}

impl Related<super::galgame::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Galgame.def()
    }
}

impl Related<super::galgame_character::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GalgameCharacter.def()
    }
}

impl Related<super::galgame_character_relation_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
