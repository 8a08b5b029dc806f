use crate::domain::Severity;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Current validation state of a subject. At most one row per subject.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "subject_status")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub subject_id: Uuid,
    #[sea_orm(indexed)]
    pub severity: Severity,
    #[sea_orm(indexed)]
    pub headline: String,
    #[sea_orm(column_type = "Text")]
    pub detail: String,
    #[sea_orm(indexed)]
    pub is_resolved: bool,
    /// Manual override in effect; automated passes must not overwrite the row.
    #[sea_orm(indexed)]
    pub is_locked: bool,
    pub updated_at: DateTimeUtc,
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.subject_id, self.severity)?;
        if self.is_locked {
            f.write_str(" LOCKED")?;
        }
        Ok(())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subject::Entity",
        from = "Column::SubjectId",
        to = "super::subject::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Subject,
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
