use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Directed edge `source -> target` between two subjects.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subject_relation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub source_id: Uuid,
    pub target_id: Uuid,
    pub type_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subject::Entity",
        from = "Column::SourceId",
        to = "super::subject::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Source,
    #[sea_orm(
        belongs_to = "super::subject::Entity",
        from = "Column::TargetId",
        to = "super::subject::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Target,
    #[sea_orm(
        belongs_to = "super::subject_relation_type::Entity",
        from = "Column::TypeId",
        to = "super::subject_relation_type::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    RelationType,
}

impl Related<super::subject_relation_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RelationType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
