use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of directed edge between two subjects (sequel, adaptation, ...).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subject_relation_type")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::subject_relation::Entity")]
    SubjectRelation,
}

impl Related<super::subject_relation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubjectRelation.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
