use sea_orm_migration::prelude::*;

/// Tables carrying an `(info_source, id_source)` provenance pair.
const SOURCED_TABLES: &[&str] = &[
    "subject",
    "anime",
    "anime_staff",
    "anime_character",
    "anime_episode",
    "galgame",
    "galgame_producer",
    "galgame_staff",
    "galgame_character",
];

/// Association tables and the column triple that identifies a link.
const ASSOCIATION_KEYS: &[(&str, &str)] = &[
    ("subject_relation", "source_id, target_id, type_id"),
    ("anime_staff_relation", "anime_id, staff_id, role_id"),
    ("anime_character_relation", "anime_id, character_id, role_id"),
    ("galgame_staff_relation", "galgame_id, staff_id, role_id"),
    ("galgame_character_relation", "galgame_id, character_id, role_id"),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        for table in SOURCED_TABLES {
            conn.execute_unprepared(&format!(
                "CREATE UNIQUE INDEX IF NOT EXISTS uq_{table}_info_id_source ON {table}(info_source, id_source)"
            ))
            .await?;
        }

        for (table, columns) in ASSOCIATION_KEYS {
            conn.execute_unprepared(&format!(
                "CREATE UNIQUE INDEX IF NOT EXISTS uq_{table}_key ON {table}({columns})"
            ))
            .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        for (table, _) in ASSOCIATION_KEYS {
            conn.execute_unprepared(&format!("DROP INDEX IF EXISTS uq_{table}_key"))
                .await?;
        }

        for table in SOURCED_TABLES {
            conn.execute_unprepared(&format!("DROP INDEX IF EXISTS uq_{table}_info_id_source"))
                .await?;
        }

        Ok(())
    }
}
