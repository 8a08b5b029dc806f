use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "galgame_genre_link")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub galgame_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub genre_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::galgame::Entity",
        from = "Column::GalgameId",
        to = "super::galgame::Column::SubjectId",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Galgame,
    #[sea_orm(
        belongs_to = "super::galgame_genre::Entity",
        from = "Column::GenreId",
        to = "super::galgame_genre::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    GalgameGenre,
}

impl Related<super::galgame::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Galgame.def()
    }
}

impl Related<super::galgame_genre::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GalgameGenre.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
