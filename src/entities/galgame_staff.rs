use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "galgame_staff")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub gender: String,
    pub birth: Json,
    pub aliases: Json,
    pub external_link: Json,
    pub info_source: String,
    pub id_source: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::galgame_staff_relation::Entity")]
    GalgameStaffRelation,
    #[sea_orm(has_many = "super::galgame_character_actor::Entity")]
    GalgameCharacterActor,
}

impl Related<super::galgame_staff_relation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GalgameStaffRelation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
