use crate::domain::{Severity, SubjectType};
use crate::entities::{pending_update, subject, subject_status};
use crate::error::CatalogResult;
use crate::models::bookkeeping::{StatusInput, StatusWrite};
use crate::models::subject::{NewSubject, SubjectDetail, SubjectFilter};
use crate::models::Provenance;
use anyhow::Result;
use chrono::{DateTime, Utc};
use crate::config::GeneralConfig;
use sea_orm::sqlx::sqlite::{SqliteJournalMode, SqliteSynchronous};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

pub mod migrator;
pub mod repositories;

pub use repositories::Credit;
pub use repositories::lookup::{CodeNameTable, LookupRepository};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    /// Opens the database named in `[general]` with its pool bounds.
    pub async fn open(general: &GeneralConfig) -> Result<Self> {
        Self::with_pool_options(
            &general.database_path,
            general.max_db_connections,
            general.min_db_connections,
        )
        .await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false)
            .map_sqlx_sqlite_opts(|opts| {
                opts.journal_mode(SqliteJournalMode::Wal)
                    .synchronous(SqliteSynchronous::Normal)
                    .busy_timeout(Duration::from_secs(5))
            });

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        let store = Self { conn };
        if !store.foreign_keys_enabled().await? {
            warn!("SQLite foreign key enforcement is off; cascades and protected deletes will not apply");
        }

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(store)
    }

    pub async fn foreign_keys_enabled(&self) -> Result<bool> {
        let backend = self.conn.get_database_backend();
        let row = self
            .conn
            .query_one(Statement::from_string(
                backend,
                "PRAGMA foreign_keys".to_string(),
            ))
            .await?;
        let enabled = match row {
            Some(row) => row.try_get::<i32>("", "foreign_keys")? == 1,
            None => false,
        };
        Ok(enabled)
    }

    pub async fn applied_migrations(&self) -> Result<Vec<String>> {
        use sea_orm_migration::MigratorTrait;

        let applied = migrator::Migrator::get_applied_migrations(&self.conn).await?;
        Ok(applied.iter().map(|m| m.name().to_string()).collect())
    }

    #[must_use]
    pub fn subject_repo(&self) -> repositories::subject::SubjectRepository {
        repositories::subject::SubjectRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn anime_repo(&self) -> repositories::anime::AnimeRepository {
        repositories::anime::AnimeRepository::new(self.conn.clone())
    }

    #[must_use]
    pub fn galgame_repo(&self) -> repositories::galgame::GalgameRepository {
        repositories::galgame::GalgameRepository::new(self.conn.clone())
    }

    /// Repository over one vocabulary table, e.g. `store.lookups::<AnimeGenre>()`.
    #[must_use]
    pub fn lookups<T: CodeNameTable>(&self) -> LookupRepository<T> {
        LookupRepository::new(self.conn.clone())
    }

    fn status_repo(&self) -> repositories::status::StatusRepository {
        repositories::status::StatusRepository::new(self.conn.clone())
    }

    fn pending_repo(&self) -> repositories::pending::PendingUpdateRepository {
        repositories::pending::PendingUpdateRepository::new(self.conn.clone())
    }

    pub async fn create_subject(&self, subject: &NewSubject) -> CatalogResult<subject::Model> {
        self.subject_repo().create(subject).await
    }

    pub async fn upsert_subject(&self, subject: &NewSubject) -> CatalogResult<subject::Model> {
        self.subject_repo().upsert(subject).await
    }

    pub async fn get_subject(&self, id: Uuid) -> CatalogResult<Option<subject::Model>> {
        self.subject_repo().get(id).await
    }

    pub async fn find_subject_by_source(
        &self,
        provenance: &Provenance,
    ) -> CatalogResult<Option<subject::Model>> {
        self.subject_repo().find_by_source(provenance).await
    }

    pub async fn list_subjects(&self, filter: &SubjectFilter) -> CatalogResult<Vec<subject::Model>> {
        self.subject_repo().list(filter).await
    }

    pub async fn delete_subject(&self, id: Uuid) -> CatalogResult<bool> {
        self.subject_repo().delete(id).await
    }

    pub async fn count_subjects(&self) -> CatalogResult<u64> {
        self.subject_repo().count().await
    }

    /// Loads a subject plus the detail row its type selects, if any.
    pub async fn get_subject_with_detail(
        &self,
        id: Uuid,
    ) -> CatalogResult<Option<(subject::Model, Option<SubjectDetail>)>> {
        let Some(subject) = self.get_subject(id).await? else {
            return Ok(None);
        };

        let detail = match subject.subject_type {
            SubjectType::Anime => self.anime_repo().get(id).await?.map(SubjectDetail::Anime),
            SubjectType::Galgame => self
                .galgame_repo()
                .get(id)
                .await?
                .map(SubjectDetail::Galgame),
            _ => None,
        };

        Ok(Some((subject, detail)))
    }

    // Status

    pub async fn upsert_status(
        &self,
        subject_id: Uuid,
        input: &StatusInput,
    ) -> CatalogResult<subject_status::Model> {
        self.status_repo().upsert(subject_id, input).await
    }

    pub async fn record_automated_status(
        &self,
        subject_id: Uuid,
        input: &StatusInput,
    ) -> CatalogResult<StatusWrite> {
        self.status_repo().record_automated(subject_id, input).await
    }

    pub async fn set_status_locked(
        &self,
        subject_id: Uuid,
        locked: bool,
    ) -> CatalogResult<subject_status::Model> {
        self.status_repo().set_locked(subject_id, locked).await
    }

    pub async fn get_status(&self, subject_id: Uuid) -> CatalogResult<Option<subject_status::Model>> {
        self.status_repo().get(subject_id).await
    }

    pub async fn clear_status(&self, subject_id: Uuid) -> CatalogResult<bool> {
        self.status_repo().clear(subject_id).await
    }

    pub async fn list_statuses(
        &self,
        severity: Option<Severity>,
        unresolved_only: bool,
    ) -> CatalogResult<Vec<subject_status::Model>> {
        self.status_repo().list(severity, unresolved_only).await
    }

    // Pending updates

    pub async fn enroll_pending(
        &self,
        subject_id: Uuid,
        task_type: &str,
        next_update_time: DateTime<Utc>,
    ) -> CatalogResult<pending_update::Model> {
        self.pending_repo()
            .enroll(subject_id, task_type, next_update_time)
            .await
    }

    pub async fn record_attempt(
        &self,
        subject_id: Uuid,
        log: &str,
        next_update_time: DateTime<Utc>,
    ) -> CatalogResult<pending_update::Model> {
        self.pending_repo()
            .record_attempt(subject_id, log, next_update_time)
            .await
    }

    pub async fn reset_attempts(
        &self,
        subject_id: Uuid,
        next_update_time: DateTime<Utc>,
    ) -> CatalogResult<pending_update::Model> {
        self.pending_repo()
            .reset_attempts(subject_id, next_update_time)
            .await
    }

    pub async fn get_pending(&self, subject_id: Uuid) -> CatalogResult<Option<pending_update::Model>> {
        self.pending_repo().get(subject_id).await
    }

    pub async fn due_pending(
        &self,
        now: DateTime<Utc>,
        limit: u64,
    ) -> CatalogResult<Vec<pending_update::Model>> {
        self.pending_repo().due(now, limit).await
    }

    pub async fn remove_pending(&self, subject_id: Uuid) -> CatalogResult<bool> {
        self.pending_repo().remove(subject_id).await
    }
}
