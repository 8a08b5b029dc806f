use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Galgame (visual novel) detail row. Shares its primary key with the owning subject.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "galgame")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub subject_id: Uuid,
    pub aliases: Json,
    pub titles: Json,
    pub released_date: Option<Date>,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub image_original: String,
    pub image_thumbnail: String,
    pub screenshots: Json,
    pub platforms: Json,
    pub galgame_status: String,
    pub external_links: Json,
    pub info_source: String,
    #[sea_orm(indexed)]
    pub id_source: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
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
    #[sea_orm(has_many = "super::galgame_staff_relation::Entity")]
    GalgameStaffRelation,
    #[sea_orm(has_many = "super::galgame_character_relation::Entity")]
    GalgameCharacterRelation,
    #[sea_orm(has_many = "super::galgame_genre_link::Entity")]
    GalgameGenreLink,
    #[sea_orm(has_many = "super::galgame_producer_link::Entity")]
    GalgameProducerLink,
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::galgame_genre::Entity> for Entity {
    fn to() -> RelationDef {
        super::galgame_genre_link::Relation::GalgameGenre.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::galgame_genre_link::Relation::Galgame.def().rev())
    }
}

impl Related<super::galgame_producer::Entity> for Entity {
    fn to() -> RelationDef {
        super::galgame_producer_link::Relation::GalgameProducer.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::galgame_producer_link::Relation::Galgame.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
