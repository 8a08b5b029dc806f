use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role a staff member holds on an anime (director, composer, ...).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "anime_staff_relation_role")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::anime_staff_relation::Entity")]
    AnimeStaffRelation,
}

impl Related<super::anime_staff_relation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnimeStaffRelation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
