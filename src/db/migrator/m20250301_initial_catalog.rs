use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{EntityTrait, Schema};

#[derive(DeriveMigrationName)]
pub struct Migration;

async fn create_from_entity<E: EntityTrait>(
    manager: &SchemaManager<'_>,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    manager
        .create_table(
            schema
                .create_table_from_entity(entity)
                .if_not_exists()
                .to_owned(),
        )
        .await?;

    for mut index in schema.create_index_from_entity(entity) {
        manager
            .create_index(index.if_not_exists().to_owned())
            .await?;
    }

    Ok(())
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // Parents before children so every foreign key target exists.
        create_from_entity(manager, &schema, Subject).await?;
        create_from_entity(manager, &schema, SubjectStatus).await?;
        create_from_entity(manager, &schema, PendingUpdate).await?;
        create_from_entity(manager, &schema, SubjectRelationType).await?;
        create_from_entity(manager, &schema, SubjectRelation).await?;

        create_from_entity(manager, &schema, Anime).await?;
        create_from_entity(manager, &schema, AnimeStaff).await?;
        create_from_entity(manager, &schema, AnimeCharacter).await?;
        create_from_entity(manager, &schema, AnimeCharacterActor).await?;
        create_from_entity(manager, &schema, AnimeGenre).await?;
        create_from_entity(manager, &schema, AnimeGenreLink).await?;
        create_from_entity(manager, &schema, AnimeEpisode).await?;
        create_from_entity(manager, &schema, AnimeStaffRelationRole).await?;
        create_from_entity(manager, &schema, AnimeStaffRelation).await?;
        create_from_entity(manager, &schema, AnimeCharacterRelationRole).await?;
        create_from_entity(manager, &schema, AnimeCharacterRelation).await?;

        create_from_entity(manager, &schema, Galgame).await?;
        create_from_entity(manager, &schema, GalgameProducer).await?;
        create_from_entity(manager, &schema, GalgameProducerLink).await?;
        create_from_entity(manager, &schema, GalgameStaff).await?;
        create_from_entity(manager, &schema, GalgameCharacterTrait).await?;
        create_from_entity(manager, &schema, GalgameCharacter).await?;
        create_from_entity(manager, &schema, GalgameCharacterTraitLink).await?;
        create_from_entity(manager, &schema, GalgameCharacterActor).await?;
        create_from_entity(manager, &schema, GalgameGenre).await?;
        create_from_entity(manager, &schema, GalgameGenreLink).await?;
        create_from_entity(manager, &schema, GalgameStaffRelationRole).await?;
        create_from_entity(manager, &schema, GalgameStaffRelation).await?;
        create_from_entity(manager, &schema, GalgameCharacterRelationRole).await?;
        create_from_entity(manager, &schema, GalgameCharacterRelation).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GalgameCharacterRelation).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GalgameCharacterRelationRole).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GalgameStaffRelation).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GalgameStaffRelationRole).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GalgameGenreLink).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GalgameGenre).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GalgameCharacterActor).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GalgameCharacterTraitLink).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GalgameCharacter).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GalgameCharacterTrait).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GalgameStaff).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GalgameProducerLink).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GalgameProducer).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Galgame).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(AnimeCharacterRelation).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AnimeCharacterRelationRole).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AnimeStaffRelation).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AnimeStaffRelationRole).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AnimeEpisode).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AnimeGenreLink).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AnimeGenre).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AnimeCharacterActor).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AnimeCharacter).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AnimeStaff).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Anime).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(SubjectRelation).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubjectRelationType).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PendingUpdate).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubjectStatus).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subject).to_owned())
            .await?;

        Ok(())
    }
}
