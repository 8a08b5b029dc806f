use crate::entities::{pending_update, prelude::*};
use crate::error::{CatalogError, CatalogResult};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use tracing::{info, warn};
use uuid::Uuid;

const ENTITY: &str = "PendingUpdate";

pub struct PendingUpdateRepository {
    conn: DatabaseConnection,
}

impl PendingUpdateRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Schedules a re-sync. A subject can only be enrolled once.
    pub async fn enroll(
        &self,
        subject_id: Uuid,
        task_type: &str,
        next_update_time: DateTime<Utc>,
    ) -> CatalogResult<pending_update::Model> {
        let now = Utc::now();
        let model = pending_update::ActiveModel {
            subject_id: Set(subject_id),
            next_update_time: Set(next_update_time),
            task_type: Set(task_type.to_string()),
            attempt_count: Set(0),
            latest_log: Set(String::new()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .map_err(|e| CatalogError::on_write(e, ENTITY, subject_id))?;

        info!(
            "Enrolled {} for {} at {}",
            subject_id, model.task_type, model.next_update_time
        );
        Ok(model)
    }

    /// Counts a failed (or finished) attempt and reschedules.
    pub async fn record_attempt(
        &self,
        subject_id: Uuid,
        log: &str,
        next_update_time: DateTime<Utc>,
    ) -> CatalogResult<pending_update::Model> {
        let result = PendingUpdate::update_many()
            .col_expr(
                pending_update::Column::AttemptCount,
                Expr::col(pending_update::Column::AttemptCount).add(1),
            )
            .col_expr(pending_update::Column::LatestLog, Expr::value(log))
            .col_expr(
                pending_update::Column::NextUpdateTime,
                Expr::value(next_update_time),
            )
            .col_expr(pending_update::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(pending_update::Column::SubjectId.eq(subject_id))
            .exec(&self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(CatalogError::not_found(ENTITY, subject_id));
        }

        let model = self
            .get(subject_id)
            .await?
            .ok_or_else(|| CatalogError::not_found(ENTITY, subject_id))?;
        if model.attempt_count > 1 {
            warn!(
                "Update of {} has failed {} times: {}",
                subject_id, model.attempt_count, log
            );
        }
        Ok(model)
    }

    pub async fn reset_attempts(
        &self,
        subject_id: Uuid,
        next_update_time: DateTime<Utc>,
    ) -> CatalogResult<pending_update::Model> {
        let result = PendingUpdate::update_many()
            .col_expr(pending_update::Column::AttemptCount, Expr::value(0))
            .col_expr(
                pending_update::Column::NextUpdateTime,
                Expr::value(next_update_time),
            )
            .col_expr(pending_update::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(pending_update::Column::SubjectId.eq(subject_id))
            .exec(&self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(CatalogError::not_found(ENTITY, subject_id));
        }
        self.get(subject_id)
            .await?
            .ok_or_else(|| CatalogError::not_found(ENTITY, subject_id))
    }

    pub async fn get(&self, subject_id: Uuid) -> CatalogResult<Option<pending_update::Model>> {
        Ok(PendingUpdate::find()
            .filter(pending_update::Column::SubjectId.eq(subject_id))
            .one(&self.conn)
            .await?)
    }

    /// Entries whose `next_update_time` has passed, earliest first.
    pub async fn due(
        &self,
        now: DateTime<Utc>,
        limit: u64,
    ) -> CatalogResult<Vec<pending_update::Model>> {
        Ok(PendingUpdate::find()
            .filter(pending_update::Column::NextUpdateTime.lte(now))
            .order_by_asc(pending_update::Column::NextUpdateTime)
            .limit(limit)
            .all(&self.conn)
            .await?)
    }

    pub async fn remove(&self, subject_id: Uuid) -> CatalogResult<bool> {
        let result = PendingUpdate::delete_many()
            .filter(pending_update::Column::SubjectId.eq(subject_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
