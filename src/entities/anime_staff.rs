use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "anime_staff")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub gender: String,
    pub birth: Json,
    pub staff_type: String,
    pub career: String,
    pub info_source: String,
    pub id_source: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::anime_staff_relation::Entity")]
    AnimeStaffRelation,
    #[sea_orm(has_many = "super::anime_character_actor::Entity")]
    AnimeCharacterActor,
}

impl Related<super::anime_staff_relation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnimeStaffRelation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
