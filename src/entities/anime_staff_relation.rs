use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Staff credit on an anime. Unique on `(anime_id, staff_id, role_id)`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "anime_staff_relation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub anime_id: Uuid,
    pub staff_id: i32,
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
        belongs_to = "super::anime_staff::Entity",
        from = "Column::StaffId",
        to = "super::anime_staff::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    AnimeStaff,
    #[sea_orm(
        belongs_to = "super::anime_staff_relation_role::Entity",
        from = "Column::RoleId",
        to = "super::anime_staff_relation_role::Column::Id",
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

impl Related<super::anime_staff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AnimeStaff.def()
    }
}

impl Related<super::anime_staff_relation_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
