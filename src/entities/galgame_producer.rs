use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Developer or publisher of a galgame.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "galgame_producer")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub aliases: Json,
    pub producer_type: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub official_website: String,
    pub external_link: Json,
    pub info_source: String,
    pub id_source: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::galgame_producer_link::Entity")]
    GalgameProducerLink,
}

impl ActiveModelBehavior for ActiveModel {}
