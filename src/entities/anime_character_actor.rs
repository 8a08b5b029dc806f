use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Voice actor credit linking a character to the staff member voicing it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "anime_character_actor")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub character_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub staff_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::anime_character::Entity",
        from = "Column::CharacterId",
        to = "super::anime_character::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    AnimeCharacter,
    #[sea_orm(
        belongs_to = "super::anime_staff::Entity",
        from = "Column::StaffId",
        to = "super::anime_staff::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    AnimeStaff,
}

impl Related<super::anime_character::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnimeCharacter.def()
    }
}

impl Related<super::anime_staff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnimeStaff.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
