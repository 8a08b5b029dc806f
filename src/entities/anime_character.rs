use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "anime_character")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub image_original: String,
    pub image_thumbnail: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub gender: String,
    pub birth: Json,
    pub age: Option<i32>,
    pub height: String,
    pub weight: String,
    pub bwh: Json,
    pub blood_type: String,
    pub info_source: String,
    pub id_source: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::anime_character_relation::Entity")]
    AnimeCharacterRelation,
    #[sea_orm(has_many = "super::anime_character_actor::Entity")]
    AnimeCharacterActor,
}

impl Related<super::anime_character_relation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnimeCharacterRelation.def()
    }
}

/// Voice actors, through `anime_character_actor`.
impl Related<super::anime_staff::Entity> for Entity {
    fn to() -> RelationDef {
        super::anime_character_actor::Relation::AnimeStaff.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::anime_character_actor::Relation::AnimeCharacter.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
