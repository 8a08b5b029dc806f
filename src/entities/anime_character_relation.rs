use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Character appearance in an anime. Unique on `(anime_id, character_id, role_id)`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "anime_character_relation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub anime_id: Uuid,
    pub character_id: i32,
    pub role_id: i32,
    #[sea_orm(column_type = "Text")]
    pub description: String,
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
        belongs_to = "super::anime_character::Entity",
        from = "Column::CharacterId",
        to = "super::anime_character::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    AnimeCharacter,
    #[sea_orm(
        belongs_to = "super::anime_character_relation_role::Entity",
        from = "Column::RoleId",
        to = "super::anime_character_relation_role::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Role,
}

impl Related<super::anime::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Anime.def()
    }
}

impl Related<super::anime_character::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnimeCharacter.def()
    }
}

impl Related<super::anime_character_relation_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
