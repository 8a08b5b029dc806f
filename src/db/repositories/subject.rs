use super::json_list;
use crate::domain::SubjectType;
use crate::entities::{prelude::*, subject, subject_relation, subject_relation_type};
use crate::error::{CatalogError, CatalogResult};
use crate::models::subject::{NewSubject, SubjectFilter};
use crate::models::Provenance;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Alias, Expr, Func, LikeExpr, OnConflict, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, LoaderTrait,
    Order, QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

const ENTITY: &str = "Subject";

pub struct SubjectRepository {
    conn: DatabaseConnection,
}

impl SubjectRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn active_model(
        id: Uuid,
        subject: &NewSubject,
        created_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> CatalogResult<subject::ActiveModel> {
        subject.validate().map_err(CatalogError::InvalidData)?;

        Ok(subject::ActiveModel {
            id: Set(id),
            subject_type: Set(subject.subject_type),
            title: Set(subject.title.clone()),
            date: Set(subject.date),
            ambiguous_date: Set(subject.ambiguous_date),
            image_original: Set(subject.image_original.clone()),
            image_thumbnail: Set(subject.image_thumbnail.clone()),
            description: Set(subject.description.clone()),
            nsfw: Set(subject.nsfw),
            infobox: Set(json_list(&subject.infobox)?),
            tags: Set(Value::Array(subject.tags.clone())),
            info_source: Set(subject.provenance.info_source.clone()),
            id_source: Set(subject.provenance.id_source.clone()),
            created_at: Set(created_at),
            updated_at: Set(now),
        })
    }

    /// Strict insert with a fresh id. Used inside detail transactions too.
    pub(crate) async fn insert_in<C: ConnectionTrait>(
        conn: &C,
        subject: &NewSubject,
    ) -> CatalogResult<subject::Model> {
        let now = Utc::now();
        let model = Self::active_model(Uuid::new_v4(), subject, now, now)?
            .insert(conn)
            .await
            .map_err(|e| CatalogError::on_write(e, ENTITY, &subject.provenance))?;

        debug!(id = %model.id, source = %subject.provenance, "Inserted subject");
        Ok(model)
    }

    /// Inserts or refreshes the subject identified by its provenance. The
    /// stored id survives a refresh; the subject type may not change.
    ///
    /// The write is a single `INSERT .. ON CONFLICT DO UPDATE` guarded on the
    /// stored type, so a transaction calling this takes the write lock before
    /// it reads anything.
    pub(crate) async fn upsert_in<C: ConnectionTrait>(
        conn: &C,
        subject: &NewSubject,
    ) -> CatalogResult<subject::Model> {
        let now = Utc::now();
        let active_model = Self::active_model(Uuid::new_v4(), subject, now, now)?;

        let rows = Subject::insert(active_model)
            .on_conflict(
                OnConflict::columns([subject::Column::InfoSource, subject::Column::IdSource])
                    .update_columns([
                        subject::Column::Title,
                        subject::Column::Date,
                        subject::Column::AmbiguousDate,
                        subject::Column::ImageOriginal,
                        subject::Column::ImageThumbnail,
                        subject::Column::Description,
                        subject::Column::Nsfw,
                        subject::Column::Infobox,
                        subject::Column::Tags,
                        subject::Column::UpdatedAt,
                    ])
                    .action_and_where(
                        Expr::col((Subject, subject::Column::SubjectType)).eq(Expr::col((
                            Alias::new("excluded"),
                            subject::Column::SubjectType,
                        ))),
                    )
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await
            .map_err(|e| CatalogError::on_write(e, ENTITY, &subject.provenance))?;

        let model = Self::find_by_source_in(conn, &subject.provenance)
            .await?
            .ok_or_else(|| CatalogError::not_found(ENTITY, &subject.provenance))?;

        // A type mismatch leaves the row untouched.
        if model.subject_type != subject.subject_type {
            return Err(CatalogError::SubjectTypeMismatch {
                expected: model.subject_type,
                actual: subject.subject_type,
            });
        }

        debug!(id = %model.id, source = %subject.provenance, rows, "Upserted subject");
        Ok(model)
    }

    /// Bumps `updated_at` on an existing subject. Detail writers call this
    /// first so their transaction starts with a write.
    pub(crate) async fn touch_in<C: ConnectionTrait>(conn: &C, id: Uuid) -> CatalogResult<()> {
        let result = Subject::update_many()
            .col_expr(subject::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(subject::Column::Id.eq(id))
            .exec(conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(CatalogError::not_found(ENTITY, id));
        }
        Ok(())
    }

    pub(crate) async fn find_by_source_in<C: ConnectionTrait>(
        conn: &C,
        provenance: &Provenance,
    ) -> CatalogResult<Option<subject::Model>> {
        Ok(Subject::find()
            .filter(subject::Column::InfoSource.eq(provenance.info_source.as_str()))
            .filter(subject::Column::IdSource.eq(provenance.id_source.as_str()))
            .one(conn)
            .await?)
    }

    /// Loads a subject and checks it is of the expected type.
    pub(crate) async fn require_typed_in<C: ConnectionTrait>(
        conn: &C,
        id: Uuid,
        expected: SubjectType,
    ) -> CatalogResult<subject::Model> {
        let subject = Subject::find_by_id(id)
            .one(conn)
            .await?
            .ok_or_else(|| CatalogError::not_found(ENTITY, id))?;

        if subject.subject_type == expected {
            Ok(subject)
        } else {
            Err(CatalogError::SubjectTypeMismatch {
                expected,
                actual: subject.subject_type,
            })
        }
    }

    pub async fn create(&self, subject: &NewSubject) -> CatalogResult<subject::Model> {
        let model = Self::insert_in(&self.conn, subject).await?;
        info!("Added subject: {} ({})", model, subject.provenance);
        Ok(model)
    }

    pub async fn upsert(&self, subject: &NewSubject) -> CatalogResult<subject::Model> {
        Self::upsert_in(&self.conn, subject).await
    }

    pub async fn get(&self, id: Uuid) -> CatalogResult<Option<subject::Model>> {
        Ok(Subject::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn find_by_source(
        &self,
        provenance: &Provenance,
    ) -> CatalogResult<Option<subject::Model>> {
        Self::find_by_source_in(&self.conn, provenance).await
    }

    /// Lists subjects ordered by release date (exact date, else the
    /// ambiguous one; direction per filter), then title. Undated subjects
    /// sort last when descending. The title filter matches `%` and `_`
    /// literally.
    pub async fn list(&self, filter: &SubjectFilter) -> CatalogResult<Vec<subject::Model>> {
        let mut query = Subject::find();

        if let Some(subject_type) = filter.subject_type {
            query = query.filter(subject::Column::SubjectType.eq(subject_type));
        }
        if let Some(needle) = filter.title_contains.as_deref() {
            let pattern = format!("%{}%", escape_like(needle));
            query = query.filter(subject::Column::Title.like(LikeExpr::new(pattern).escape('\\')));
        }
        if let Some(nsfw) = filter.nsfw {
            query = query.filter(subject::Column::Nsfw.eq(nsfw));
        }

        let release_date: SimpleExpr = Func::coalesce([
            Expr::col((Subject, subject::Column::Date)).into(),
            Expr::col((Subject, subject::Column::AmbiguousDate)).into(),
        ])
        .into();
        let order = if filter.date_order.is_ascending() {
            Order::Asc
        } else {
            Order::Desc
        };
        query = query.order_by(release_date, order);
        query = query.order_by_asc(subject::Column::Title).offset(filter.offset);

        if let Some(limit) = filter.limit {
            query = query.limit(limit);
        }

        Ok(query.all(&self.conn).await?)
    }

    /// Removes the subject together with its detail row, status, pending
    /// update and every association that hangs off it.
    pub async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let result = Subject::delete_by_id(id)
            .exec(&self.conn)
            .await
            .map_err(|e| CatalogError::on_delete(e, ENTITY, id))?;

        if result.rows_affected > 0 {
            info!("Deleted subject {}", id);
        }
        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> CatalogResult<u64> {
        use sea_orm::PaginatorTrait;
        Ok(Subject::find().count(&self.conn).await?)
    }

    /// Records a directed relation such as `sequel` or `adaptation`. Linking
    /// the same pair with the same type again is a no-op.
    pub async fn link(
        &self,
        source_id: Uuid,
        target_id: Uuid,
        type_id: i32,
    ) -> CatalogResult<subject_relation::Model> {
        let key = format!("{source_id} -> {target_id} ({type_id})");
        if source_id == target_id {
            return Err(CatalogError::InvalidData(format!(
                "subject {source_id} cannot relate to itself"
            )));
        }

        let active_model = subject_relation::ActiveModel {
            source_id: Set(source_id),
            target_id: Set(target_id),
            type_id: Set(type_id),
            ..Default::default()
        };

        SubjectRelation::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    subject_relation::Column::SourceId,
                    subject_relation::Column::TargetId,
                    subject_relation::Column::TypeId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .map_err(|e| CatalogError::on_write(e, "SubjectRelation", &key))?;

        SubjectRelation::find()
            .filter(subject_relation::Column::SourceId.eq(source_id))
            .filter(subject_relation::Column::TargetId.eq(target_id))
            .filter(subject_relation::Column::TypeId.eq(type_id))
            .one(&self.conn)
            .await?
            .ok_or_else(|| CatalogError::not_found("SubjectRelation", key))
    }

    pub async fn unlink(&self, source_id: Uuid, target_id: Uuid, type_id: i32) -> CatalogResult<bool> {
        let result = SubjectRelation::delete_many()
            .filter(subject_relation::Column::SourceId.eq(source_id))
            .filter(subject_relation::Column::TargetId.eq(target_id))
            .filter(subject_relation::Column::TypeId.eq(type_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    /// Outgoing relations of `source_id` with their relation type.
    pub async fn relations_from(
        &self,
        source_id: Uuid,
    ) -> CatalogResult<Vec<(subject_relation::Model, subject_relation_type::Model)>> {
        self.relations_matching(subject_relation::Column::SourceId.eq(source_id))
            .await
    }

    /// Incoming relations pointing at `target_id`.
    pub async fn relations_to(
        &self,
        target_id: Uuid,
    ) -> CatalogResult<Vec<(subject_relation::Model, subject_relation_type::Model)>> {
        self.relations_matching(subject_relation::Column::TargetId.eq(target_id))
            .await
    }

    async fn relations_matching(
        &self,
        condition: SimpleExpr,
    ) -> CatalogResult<Vec<(subject_relation::Model, subject_relation_type::Model)>> {
        let relations = SubjectRelation::find()
            .filter(condition)
            .order_by_asc(subject_relation::Column::Id)
            .all(&self.conn)
            .await?;
        let types = relations.load_one(SubjectRelationType, &self.conn).await?;

        Ok(relations
            .into_iter()
            .zip(types)
            .filter_map(|(relation, kind)| kind.map(|kind| (relation, kind)))
            .collect())
    }
}

/// Escapes `LIKE` metacharacters with a backslash.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("a_b"), "a\\_b");
        assert_eq!(escape_like(r"C:\x"), r"C:\\x");
        assert_eq!(escape_like("plain"), "plain");
    }
}
