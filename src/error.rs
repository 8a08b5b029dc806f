//! Error taxonomy for catalog store operations.
//!
//! Constraint violations are surfaced as typed variants so ingestion callers
//! can tell a duplicate apart from a refused delete or a missing parent.
//! Absent rows on reads are not errors; readers return `Ok(None)`.

use crate::domain::SubjectType;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Provenance pair or association key already present.
    #[error("Duplicate {entity}: {key}")]
    Duplicate { entity: &'static str, key: String },

    /// Delete refused while other rows still reference this one.
    #[error("{entity} {key} is still referenced")]
    ProtectedReference { entity: &'static str, key: String },

    /// A write named a parent row that does not exist.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Subject is of type {actual}, expected {expected}")]
    SubjectTypeMismatch {
        expected: SubjectType,
        actual: SubjectType,
    },

    #[error("Invalid catalog data: {0}")]
    InvalidData(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    pub(crate) fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub(crate) fn duplicate(entity: &'static str, key: impl ToString) -> Self {
        Self::Duplicate {
            entity,
            key: key.to_string(),
        }
    }

    /// Classifies a failed insert/update. A foreign key failure here means
    /// the referenced parent is missing.
    pub(crate) fn on_write(err: DbErr, entity: &'static str, key: impl ToString) -> Self {
        match constraint_kind(&err) {
            Some(Constraint::Unique) => Self::duplicate(entity, key),
            Some(Constraint::ForeignKey) => Self::not_found(entity, key),
            None => Self::Database(err),
        }
    }

    /// Classifies a failed delete. A foreign key failure here means a
    /// `RESTRICT` reference blocked the delete.
    pub(crate) fn on_delete(err: DbErr, entity: &'static str, key: impl ToString) -> Self {
        match constraint_kind(&err) {
            Some(Constraint::ForeignKey) => Self::ProtectedReference {
                entity,
                key: key.to_string(),
            },
            Some(Constraint::Unique) | None => Self::Database(err),
        }
    }

    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    #[must_use]
    pub const fn is_protected_reference(&self) -> bool {
        matches!(self, Self::ProtectedReference { .. })
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Constraint {
    Unique,
    ForeignKey,
}

fn constraint_kind(err: &DbErr) -> Option<Constraint> {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => return Some(Constraint::Unique),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => return Some(Constraint::ForeignKey),
        _ => {}
    }

    // SQLite reports constraint failures with stable message prefixes; used when
    // the driver error code was lost in wrapping.
    let message = err.to_string();
    if message.contains("UNIQUE constraint failed") {
        Some(Constraint::Unique)
    } else if message.contains("FOREIGN KEY constraint failed") {
        Some(Constraint::ForeignKey)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_message_maps_to_duplicate() {
        let err = DbErr::Custom("UNIQUE constraint failed: subject.info_source".to_string());
        let mapped = CatalogError::on_write(err, "Subject", "bangumi/1");
        assert!(mapped.is_duplicate());
        assert_eq!(mapped.to_string(), "Duplicate Subject: bangumi/1");
    }

    #[test]
    fn foreign_key_failure_depends_on_operation() {
        let write = CatalogError::on_write(
            DbErr::Custom("FOREIGN KEY constraint failed".to_string()),
            "Anime",
            "x",
        );
        assert!(write.is_not_found());

        let delete = CatalogError::on_delete(
            DbErr::Custom("FOREIGN KEY constraint failed".to_string()),
            "AnimeGenre",
            "action",
        );
        assert!(delete.is_protected_reference());
    }

    #[test]
    fn other_database_errors_pass_through() {
        let err = CatalogError::on_write(DbErr::Custom("disk I/O error".to_string()), "Subject", "");
        assert!(matches!(err, CatalogError::Database(_)));
    }
}
