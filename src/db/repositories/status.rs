use crate::domain::Severity;
use crate::entities::{prelude::*, subject_status};
use crate::error::{CatalogError, CatalogResult};
use crate::models::bookkeeping::{StatusInput, StatusWrite};
use chrono::Utc;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{debug, info};
use uuid::Uuid;

const ENTITY: &str = "SubjectStatus";

pub struct StatusRepository {
    conn: DatabaseConnection,
}

impl StatusRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Upserts the status row and returns the affected row count with the
    /// stored row. With `respect_lock` the update arm only fires on unlocked
    /// rows, so a locked row comes back unchanged with a count of zero.
    async fn write(
        &self,
        subject_id: Uuid,
        input: &StatusInput,
        respect_lock: bool,
    ) -> CatalogResult<(u64, subject_status::Model)> {
        let active_model = subject_status::ActiveModel {
            subject_id: Set(subject_id),
            severity: Set(input.severity),
            headline: Set(input.headline.clone()),
            detail: Set(input.detail.clone()),
            is_resolved: Set(input.is_resolved),
            is_locked: Set(input.is_locked),
            updated_at: Set(Utc::now()),
        };

        let mut on_conflict = OnConflict::column(subject_status::Column::SubjectId);
        on_conflict.update_columns([
            subject_status::Column::Severity,
            subject_status::Column::Headline,
            subject_status::Column::Detail,
            subject_status::Column::IsResolved,
            subject_status::Column::IsLocked,
            subject_status::Column::UpdatedAt,
        ]);
        if respect_lock {
            on_conflict.action_and_where(
                Expr::col((SubjectStatus, subject_status::Column::IsLocked)).eq(false),
            );
        }

        let rows = SubjectStatus::insert(active_model)
            .on_conflict(on_conflict)
            .exec_without_returning(&self.conn)
            .await
            .map_err(|e| CatalogError::on_write(e, ENTITY, subject_id))?;

        let model = SubjectStatus::find_by_id(subject_id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| CatalogError::not_found(ENTITY, subject_id))?;
        Ok((rows, model))
    }

    /// Operator write: replaces the status row, lock or no lock.
    pub async fn upsert(
        &self,
        subject_id: Uuid,
        input: &StatusInput,
    ) -> CatalogResult<subject_status::Model> {
        let (_, model) = self.write(subject_id, input, false).await?;
        info!(
            "Status of {} set to {}: {}",
            subject_id, model.severity, model.headline
        );
        Ok(model)
    }

    /// Validation-pass write. A locked row is returned unchanged.
    pub async fn record_automated(
        &self,
        subject_id: Uuid,
        input: &StatusInput,
    ) -> CatalogResult<StatusWrite> {
        let unlocked = StatusInput {
            is_locked: false,
            ..input.clone()
        };

        match self.write(subject_id, &unlocked, true).await? {
            (0, existing) => {
                debug!(%subject_id, "Status locked, skipping automated write");
                Ok(StatusWrite::Locked(existing))
            }
            (_, model) => Ok(StatusWrite::Written(model)),
        }
    }

    pub async fn set_locked(
        &self,
        subject_id: Uuid,
        locked: bool,
    ) -> CatalogResult<subject_status::Model> {
        let existing = SubjectStatus::find_by_id(subject_id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| CatalogError::not_found(ENTITY, subject_id))?;

        let mut active_model: subject_status::ActiveModel = existing.into();
        active_model.is_locked = Set(locked);
        active_model.updated_at = Set(Utc::now());
        Ok(active_model.update(&self.conn).await?)
    }

    pub async fn get(&self, subject_id: Uuid) -> CatalogResult<Option<subject_status::Model>> {
        Ok(SubjectStatus::find_by_id(subject_id).one(&self.conn).await?)
    }

    pub async fn clear(&self, subject_id: Uuid) -> CatalogResult<bool> {
        let result = SubjectStatus::delete_by_id(subject_id)
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Most recently updated first.
    pub async fn list(
        &self,
        severity: Option<Severity>,
        unresolved_only: bool,
    ) -> CatalogResult<Vec<subject_status::Model>> {
        let mut query = SubjectStatus::find();
        if let Some(severity) = severity {
            query = query.filter(subject_status::Column::Severity.eq(severity));
        }
        if unresolved_only {
            query = query.filter(subject_status::Column::IsResolved.eq(false));
        }

        Ok(query
            .order_by_desc(subject_status::Column::UpdatedAt)
            .all(&self.conn)
            .await?)
    }
}
