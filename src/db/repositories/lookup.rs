//! Controlled vocabularies: relation types, genres, roles and character traits.
//!
//! Every vocabulary table has the same `(id, code, name)` shape with a unique
//! `code`. [`CodeNameTable`] is implemented once per table and
//! [`LookupRepository`] drives any of them.

use crate::entities::{
    anime_character_relation_role, anime_genre, anime_staff_relation_role,
    galgame_character_relation_role, galgame_character_trait, galgame_genre,
    galgame_staff_relation_role, subject_relation_type,
};
use crate::error::{CatalogError, CatalogResult};
use crate::models::CodeName;
use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::marker::PhantomData;
use tracing::info;

#[async_trait]
pub trait CodeNameTable: Send + Sync + 'static {
    type Row: Send + Sync;

    const LABEL: &'static str;

    async fn insert_entry(conn: &DatabaseConnection, entry: &CodeName) -> CatalogResult<Self::Row>;

    async fn upsert_entry(conn: &DatabaseConnection, entry: &CodeName) -> CatalogResult<Self::Row>;

    async fn find_entry(conn: &DatabaseConnection, code: &str) -> CatalogResult<Option<Self::Row>>;

    async fn list_entries(conn: &DatabaseConnection) -> CatalogResult<Vec<Self::Row>>;

    async fn delete_entry(conn: &DatabaseConnection, code: &str) -> CatalogResult<bool>;
}

fn require_code(entry: &CodeName, label: &str) -> CatalogResult<()> {
    if entry.code.trim().is_empty() {
        return Err(CatalogError::InvalidData(format!(
            "{label} entry '{}' has an empty code",
            entry.name
        )));
    }
    Ok(())
}

macro_rules! code_name_table {
    ($module:ident, $label:literal) => {
        impl std::fmt::Display for $module::Model {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                if self.name.is_empty() {
                    f.write_str(&self.code)
                } else {
                    f.write_str(&self.name)
                }
            }
        }

        #[async_trait]
        impl CodeNameTable for $module::Entity {
            type Row = $module::Model;

            const LABEL: &'static str = $label;

            async fn insert_entry(
                conn: &DatabaseConnection,
                entry: &CodeName,
            ) -> CatalogResult<$module::Model> {
                require_code(entry, $label)?;
                $module::ActiveModel {
                    code: Set(entry.code.clone()),
                    name: Set(entry.name.clone()),
                    ..Default::default()
                }
                .insert(conn)
                .await
                .map_err(|e| CatalogError::on_write(e, $label, &entry.code))
            }

            async fn upsert_entry(
                conn: &DatabaseConnection,
                entry: &CodeName,
            ) -> CatalogResult<$module::Model> {
                require_code(entry, $label)?;
                let active_model = $module::ActiveModel {
                    code: Set(entry.code.clone()),
                    name: Set(entry.name.clone()),
                    ..Default::default()
                };

                $module::Entity::insert(active_model)
                    .on_conflict(
                        OnConflict::column($module::Column::Code)
                            .update_column($module::Column::Name)
                            .to_owned(),
                    )
                    .exec_without_returning(conn)
                    .await
                    .map_err(|e| CatalogError::on_write(e, $label, &entry.code))?;

                Self::find_entry(conn, &entry.code)
                    .await?
                    .ok_or_else(|| CatalogError::not_found($label, &entry.code))
            }

            async fn find_entry(
                conn: &DatabaseConnection,
                code: &str,
            ) -> CatalogResult<Option<$module::Model>> {
                Ok($module::Entity::find()
                    .filter($module::Column::Code.eq(code))
                    .one(conn)
                    .await?)
            }

            async fn list_entries(conn: &DatabaseConnection) -> CatalogResult<Vec<$module::Model>> {
                Ok($module::Entity::find()
                    .order_by_asc($module::Column::Name)
                    .order_by_asc($module::Column::Code)
                    .all(conn)
                    .await?)
            }

            async fn delete_entry(conn: &DatabaseConnection, code: &str) -> CatalogResult<bool> {
                let result = $module::Entity::delete_many()
                    .filter($module::Column::Code.eq(code))
                    .exec(conn)
                    .await
                    .map_err(|e| CatalogError::on_delete(e, $label, code))?;
                Ok(result.rows_affected > 0)
            }
        }
    };
}

code_name_table!(subject_relation_type, "SubjectRelationType");
code_name_table!(anime_genre, "AnimeGenre");
code_name_table!(anime_staff_relation_role, "AnimeStaffRelationRole");
code_name_table!(anime_character_relation_role, "AnimeCharacterRelationRole");
code_name_table!(galgame_genre, "GalgameGenre");
code_name_table!(galgame_character_trait, "GalgameCharacterTrait");
code_name_table!(galgame_staff_relation_role, "GalgameStaffRelationRole");
code_name_table!(galgame_character_relation_role, "GalgameCharacterRelationRole");

pub struct LookupRepository<T> {
    conn: DatabaseConnection,
    table: PhantomData<T>,
}

impl<T: CodeNameTable> LookupRepository<T> {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self {
            conn,
            table: PhantomData,
        }
    }

    /// Strict insert; a taken code is reported as a duplicate.
    pub async fn create(&self, entry: &CodeName) -> CatalogResult<T::Row> {
        T::insert_entry(&self.conn, entry).await
    }

    /// Inserts the code or renames the existing entry.
    pub async fn upsert(&self, entry: &CodeName) -> CatalogResult<T::Row> {
        T::upsert_entry(&self.conn, entry).await
    }

    pub async fn get(&self, code: &str) -> CatalogResult<Option<T::Row>> {
        T::find_entry(&self.conn, code).await
    }

    pub async fn list(&self) -> CatalogResult<Vec<T::Row>> {
        T::list_entries(&self.conn).await
    }

    /// Fails with `ProtectedReference` while any association still uses the
    /// entry.
    pub async fn delete(&self, code: &str) -> CatalogResult<bool> {
        let deleted = T::delete_entry(&self.conn, code).await?;
        if deleted {
            info!("Removed {} '{}'", T::LABEL, code);
        }
        Ok(deleted)
    }

    pub async fn seed(&self, entries: &[CodeName]) -> CatalogResult<Vec<T::Row>> {
        let mut rows = Vec::with_capacity(entries.len());
        for entry in entries {
            rows.push(T::upsert_entry(&self.conn, entry).await?);
        }
        if !entries.is_empty() {
            info!("Seeded {} {} entries", entries.len(), T::LABEL);
        }
        Ok(rows)
    }
}
