use super::subject::SubjectRepository;
use super::{json_object, require_provenance, Credit};
use crate::domain::SubjectType;
use crate::entities::{
    galgame, galgame_character, galgame_character_actor, galgame_character_relation,
    galgame_character_relation_role, galgame_character_trait, galgame_character_trait_link,
    galgame_genre, galgame_genre_link, galgame_producer, galgame_producer_link, galgame_staff,
    galgame_staff_relation, galgame_staff_relation_role, prelude::*, subject,
};
use crate::error::{CatalogError, CatalogResult};
use crate::models::galgame::{
    GalgameDetail, NewGalgameCharacter, NewGalgameProducer, NewGalgameStaff,
};
use crate::models::subject::NewSubject;
use crate::models::Provenance;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, JoinType,
    LoaderTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

pub struct GalgameRepository {
    conn: DatabaseConnection,
}

impl GalgameRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn detail_model(subject: &subject::Model, detail: &GalgameDetail) -> galgame::ActiveModel {
        let provenance = if detail.provenance.is_complete() {
            detail.provenance.clone()
        } else {
            Provenance::new(&subject.info_source, &subject.id_source)
        };
        let now = Utc::now();

        galgame::ActiveModel {
            subject_id: Set(subject.id),
            aliases: Set(Value::from(detail.aliases.as_slice())),
            titles: Set(json_object(&detail.titles)),
            released_date: Set(detail.released_date),
            description: Set(detail.description.clone()),
            image_original: Set(detail.image_original.clone()),
            image_thumbnail: Set(detail.image_thumbnail.clone()),
            screenshots: Set(Value::from(detail.screenshots.as_slice())),
            platforms: Set(Value::from(detail.platforms.as_slice())),
            galgame_status: Set(detail.galgame_status.clone()),
            external_links: Set(Value::Array(detail.external_links.clone())),
            info_source: Set(provenance.info_source),
            id_source: Set(provenance.id_source),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    async fn write_detail<C: ConnectionTrait>(
        conn: &C,
        subject: &subject::Model,
        detail: &GalgameDetail,
    ) -> CatalogResult<galgame::Model> {
        let key = subject.id;
        Galgame::insert(Self::detail_model(subject, detail))
            .on_conflict(
                OnConflict::column(galgame::Column::SubjectId)
                    .update_columns([
                        galgame::Column::Aliases,
                        galgame::Column::Titles,
                        galgame::Column::ReleasedDate,
                        galgame::Column::Description,
                        galgame::Column::ImageOriginal,
                        galgame::Column::ImageThumbnail,
                        galgame::Column::Screenshots,
                        galgame::Column::Platforms,
                        galgame::Column::GalgameStatus,
                        galgame::Column::ExternalLinks,
                        galgame::Column::InfoSource,
                        galgame::Column::IdSource,
                        galgame::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await
            .map_err(|e| CatalogError::on_write(e, "Galgame", key))?;

        Galgame::find_by_id(key)
            .one(conn)
            .await?
            .ok_or_else(|| CatalogError::not_found("Galgame", key))
    }

    fn require_galgame(subject: &NewSubject) -> CatalogResult<()> {
        if subject.subject_type == SubjectType::Galgame {
            Ok(())
        } else {
            Err(CatalogError::SubjectTypeMismatch {
                expected: SubjectType::Galgame,
                actual: subject.subject_type,
            })
        }
    }

    pub async fn create(
        &self,
        subject: &NewSubject,
        detail: &GalgameDetail,
    ) -> CatalogResult<(subject::Model, galgame::Model)> {
        Self::require_galgame(subject)?;

        let txn = self.conn.begin().await?;
        let subject_model = SubjectRepository::insert_in(&txn, subject).await?;
        let galgame_model = Self::write_detail(&txn, &subject_model, detail).await?;
        txn.commit().await?;

        info!("Added galgame: {}", subject_model);
        Ok((subject_model, galgame_model))
    }

    pub async fn upsert(
        &self,
        subject: &NewSubject,
        detail: &GalgameDetail,
    ) -> CatalogResult<(subject::Model, galgame::Model)> {
        Self::require_galgame(subject)?;

        let txn = self.conn.begin().await?;
        let subject_model = SubjectRepository::upsert_in(&txn, subject).await?;
        let galgame_model = Self::write_detail(&txn, &subject_model, detail).await?;
        txn.commit().await?;

        debug!(id = %subject_model.id, "Synced galgame detail");
        Ok((subject_model, galgame_model))
    }

    pub async fn attach(
        &self,
        subject_id: Uuid,
        detail: &GalgameDetail,
    ) -> CatalogResult<galgame::Model> {
        let txn = self.conn.begin().await?;
        SubjectRepository::touch_in(&txn, subject_id).await?;
        let subject_model =
            SubjectRepository::require_typed_in(&txn, subject_id, SubjectType::Galgame).await?;
        let galgame_model = Self::write_detail(&txn, &subject_model, detail).await?;
        txn.commit().await?;
        Ok(galgame_model)
    }

    pub async fn get(&self, subject_id: Uuid) -> CatalogResult<Option<galgame::Model>> {
        Ok(Galgame::find_by_id(subject_id)
            .inner_join(Subject)
            .filter(subject::Column::SubjectType.eq(SubjectType::Galgame))
            .one(&self.conn)
            .await?)
    }

    pub async fn find_by_source(
        &self,
        provenance: &Provenance,
    ) -> CatalogResult<Option<galgame::Model>> {
        Ok(Galgame::find()
            .filter(galgame::Column::InfoSource.eq(provenance.info_source.as_str()))
            .filter(galgame::Column::IdSource.eq(provenance.id_source.as_str()))
            .one(&self.conn)
            .await?)
    }

    // Producers

    fn producer_model(producer: &NewGalgameProducer) -> galgame_producer::ActiveModel {
        let now = Utc::now();
        galgame_producer::ActiveModel {
            name: Set(producer.name.clone()),
            aliases: Set(Value::from(producer.aliases.as_slice())),
            producer_type: Set(producer.producer_type.clone()),
            description: Set(producer.description.clone()),
            official_website: Set(producer.official_website.clone()),
            external_link: Set(json_object(&producer.external_link)),
            info_source: Set(producer.provenance.info_source.clone()),
            id_source: Set(producer.provenance.id_source.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    pub async fn create_producer(
        &self,
        producer: &NewGalgameProducer,
    ) -> CatalogResult<galgame_producer::Model> {
        require_provenance(&producer.provenance, "GalgameProducer")?;
        Self::producer_model(producer)
            .insert(&self.conn)
            .await
            .map_err(|e| CatalogError::on_write(e, "GalgameProducer", &producer.provenance))
    }

    pub async fn upsert_producer(
        &self,
        producer: &NewGalgameProducer,
    ) -> CatalogResult<galgame_producer::Model> {
        require_provenance(&producer.provenance, "GalgameProducer")?;
        GalgameProducer::insert(Self::producer_model(producer))
            .on_conflict(
                OnConflict::columns([
                    galgame_producer::Column::InfoSource,
                    galgame_producer::Column::IdSource,
                ])
                .update_columns([
                    galgame_producer::Column::Name,
                    galgame_producer::Column::Aliases,
                    galgame_producer::Column::ProducerType,
                    galgame_producer::Column::Description,
                    galgame_producer::Column::OfficialWebsite,
                    galgame_producer::Column::ExternalLink,
                    galgame_producer::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .map_err(|e| CatalogError::on_write(e, "GalgameProducer", &producer.provenance))?;

        self.find_producer_by_source(&producer.provenance)
            .await?
            .ok_or_else(|| CatalogError::not_found("GalgameProducer", &producer.provenance))
    }

    pub async fn find_producer_by_source(
        &self,
        provenance: &Provenance,
    ) -> CatalogResult<Option<galgame_producer::Model>> {
        Ok(GalgameProducer::find()
            .filter(galgame_producer::Column::InfoSource.eq(provenance.info_source.as_str()))
            .filter(galgame_producer::Column::IdSource.eq(provenance.id_source.as_str()))
            .one(&self.conn)
            .await?)
    }

    pub async fn delete_producer(&self, producer_id: i32) -> CatalogResult<bool> {
        let result = GalgameProducer::delete_by_id(producer_id)
            .exec(&self.conn)
            .await
            .map_err(|e| CatalogError::on_delete(e, "GalgameProducer", producer_id))?;
        Ok(result.rows_affected > 0)
    }

    pub async fn link_producer(&self, galgame_id: Uuid, producer_id: i32) -> CatalogResult<()> {
        let active_model = galgame_producer_link::ActiveModel {
            galgame_id: Set(galgame_id),
            producer_id: Set(producer_id),
        };

        GalgameProducerLink::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    galgame_producer_link::Column::GalgameId,
                    galgame_producer_link::Column::ProducerId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .map_err(|e| {
                CatalogError::on_write(e, "GalgameProducerLink", format!("{galgame_id}/{producer_id}"))
            })?;
        Ok(())
    }

    pub async fn unlink_producer(&self, galgame_id: Uuid, producer_id: i32) -> CatalogResult<bool> {
        let result = GalgameProducerLink::delete_by_id((galgame_id, producer_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn producers(&self, galgame_id: Uuid) -> CatalogResult<Vec<galgame_producer::Model>> {
        Ok(GalgameProducer::find()
            .join(
                JoinType::InnerJoin,
                galgame_producer_link::Relation::GalgameProducer.def().rev(),
            )
            .filter(galgame_producer_link::Column::GalgameId.eq(galgame_id))
            .order_by_asc(galgame_producer::Column::Name)
            .all(&self.conn)
            .await?)
    }

    // Staff

    fn staff_model(staff: &NewGalgameStaff) -> galgame_staff::ActiveModel {
        let now = Utc::now();
        galgame_staff::ActiveModel {
            name: Set(staff.profile.name.clone()),
            description: Set(staff.profile.description.clone()),
            gender: Set(staff.profile.gender.clone()),
            birth: Set(json_object(&staff.profile.birth)),
            aliases: Set(Value::from(staff.aliases.as_slice())),
            external_link: Set(json_object(&staff.external_link)),
            info_source: Set(staff.provenance.info_source.clone()),
            id_source: Set(staff.provenance.id_source.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    pub async fn create_staff(&self, staff: &NewGalgameStaff) -> CatalogResult<galgame_staff::Model> {
        require_provenance(&staff.provenance, "GalgameStaff")?;
        Self::staff_model(staff)
            .insert(&self.conn)
            .await
            .map_err(|e| CatalogError::on_write(e, "GalgameStaff", &staff.provenance))
    }

    pub async fn upsert_staff(&self, staff: &NewGalgameStaff) -> CatalogResult<galgame_staff::Model> {
        require_provenance(&staff.provenance, "GalgameStaff")?;
        GalgameStaff::insert(Self::staff_model(staff))
            .on_conflict(
                OnConflict::columns([
                    galgame_staff::Column::InfoSource,
                    galgame_staff::Column::IdSource,
                ])
                .update_columns([
                    galgame_staff::Column::Name,
                    galgame_staff::Column::Description,
                    galgame_staff::Column::Gender,
                    galgame_staff::Column::Birth,
                    galgame_staff::Column::Aliases,
                    galgame_staff::Column::ExternalLink,
                    galgame_staff::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .map_err(|e| CatalogError::on_write(e, "GalgameStaff", &staff.provenance))?;

        self.find_staff_by_source(&staff.provenance)
            .await?
            .ok_or_else(|| CatalogError::not_found("GalgameStaff", &staff.provenance))
    }

    pub async fn find_staff_by_source(
        &self,
        provenance: &Provenance,
    ) -> CatalogResult<Option<galgame_staff::Model>> {
        Ok(GalgameStaff::find()
            .filter(galgame_staff::Column::InfoSource.eq(provenance.info_source.as_str()))
            .filter(galgame_staff::Column::IdSource.eq(provenance.id_source.as_str()))
            .one(&self.conn)
            .await?)
    }

    pub async fn delete_staff(&self, staff_id: i32) -> CatalogResult<bool> {
        let result = GalgameStaff::delete_by_id(staff_id)
            .exec(&self.conn)
            .await
            .map_err(|e| CatalogError::on_delete(e, "GalgameStaff", staff_id))?;
        Ok(result.rows_affected > 0)
    }

    // Characters

    fn character_model(character: &NewGalgameCharacter) -> galgame_character::ActiveModel {
        let profile = &character.profile;
        let now = Utc::now();
        galgame_character::ActiveModel {
            name: Set(profile.name.clone()),
            image_original: Set(profile.image_original.clone()),
            image_thumbnail: Set(profile.image_thumbnail.clone()),
            description: Set(profile.description.clone()),
            gender: Set(profile.gender.clone()),
            birth: Set(json_object(&profile.birth)),
            age: Set(profile.age),
            height: Set(profile.height.clone()),
            weight: Set(profile.weight.clone()),
            bwh: Set(json_object(&profile.bwh)),
            blood_type: Set(profile.blood_type.clone()),
            info_source: Set(character.provenance.info_source.clone()),
            id_source: Set(character.provenance.id_source.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    pub async fn create_character(
        &self,
        character: &NewGalgameCharacter,
    ) -> CatalogResult<galgame_character::Model> {
        require_provenance(&character.provenance, "GalgameCharacter")?;
        Self::character_model(character)
            .insert(&self.conn)
            .await
            .map_err(|e| CatalogError::on_write(e, "GalgameCharacter", &character.provenance))
    }

    pub async fn upsert_character(
        &self,
        character: &NewGalgameCharacter,
    ) -> CatalogResult<galgame_character::Model> {
        require_provenance(&character.provenance, "GalgameCharacter")?;
        GalgameCharacter::insert(Self::character_model(character))
            .on_conflict(
                OnConflict::columns([
                    galgame_character::Column::InfoSource,
                    galgame_character::Column::IdSource,
                ])
                .update_columns([
                    galgame_character::Column::Name,
                    galgame_character::Column::ImageOriginal,
                    galgame_character::Column::ImageThumbnail,
                    galgame_character::Column::Description,
                    galgame_character::Column::Gender,
                    galgame_character::Column::Birth,
                    galgame_character::Column::Age,
                    galgame_character::Column::Height,
                    galgame_character::Column::Weight,
                    galgame_character::Column::Bwh,
                    galgame_character::Column::BloodType,
                    galgame_character::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .map_err(|e| CatalogError::on_write(e, "GalgameCharacter", &character.provenance))?;

        self.find_character_by_source(&character.provenance)
            .await?
            .ok_or_else(|| CatalogError::not_found("GalgameCharacter", &character.provenance))
    }

    pub async fn find_character_by_source(
        &self,
        provenance: &Provenance,
    ) -> CatalogResult<Option<galgame_character::Model>> {
        Ok(GalgameCharacter::find()
            .filter(galgame_character::Column::InfoSource.eq(provenance.info_source.as_str()))
            .filter(galgame_character::Column::IdSource.eq(provenance.id_source.as_str()))
            .one(&self.conn)
            .await?)
    }

    pub async fn delete_character(&self, character_id: i32) -> CatalogResult<bool> {
        let result = GalgameCharacter::delete_by_id(character_id)
            .exec(&self.conn)
            .await
            .map_err(|e| CatalogError::on_delete(e, "GalgameCharacter", character_id))?;
        Ok(result.rows_affected > 0)
    }

    pub async fn add_actor(&self, character_id: i32, staff_id: i32) -> CatalogResult<()> {
        let active_model = galgame_character_actor::ActiveModel {
            character_id: Set(character_id),
            staff_id: Set(staff_id),
        };

        GalgameCharacterActor::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    galgame_character_actor::Column::CharacterId,
                    galgame_character_actor::Column::StaffId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .map_err(|e| {
                CatalogError::on_write(e, "GalgameCharacterActor", format!("{character_id}/{staff_id}"))
            })?;
        Ok(())
    }

    pub async fn remove_actor(&self, character_id: i32, staff_id: i32) -> CatalogResult<bool> {
        let result = GalgameCharacterActor::delete_by_id((character_id, staff_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn actors(&self, character_id: i32) -> CatalogResult<Vec<galgame_staff::Model>> {
        Ok(GalgameStaff::find()
            .join(
                JoinType::InnerJoin,
                galgame_character_actor::Relation::GalgameStaff.def().rev(),
            )
            .filter(galgame_character_actor::Column::CharacterId.eq(character_id))
            .order_by_asc(galgame_staff::Column::Name)
            .all(&self.conn)
            .await?)
    }

    /// Tags a character with a trait. Traits stay protected while tagged.
    pub async fn add_trait(&self, character_id: i32, trait_id: i32) -> CatalogResult<()> {
        let active_model = galgame_character_trait_link::ActiveModel {
            character_id: Set(character_id),
            trait_id: Set(trait_id),
        };

        GalgameCharacterTraitLink::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    galgame_character_trait_link::Column::CharacterId,
                    galgame_character_trait_link::Column::TraitId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .map_err(|e| {
                CatalogError::on_write(
                    e,
                    "GalgameCharacterTraitLink",
                    format!("{character_id}/{trait_id}"),
                )
            })?;
        Ok(())
    }

    pub async fn remove_trait(&self, character_id: i32, trait_id: i32) -> CatalogResult<bool> {
        let result = GalgameCharacterTraitLink::delete_by_id((character_id, trait_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn traits(&self, character_id: i32) -> CatalogResult<Vec<galgame_character_trait::Model>> {
        Ok(GalgameCharacterTrait::find()
            .join(
                JoinType::InnerJoin,
                galgame_character_trait_link::Relation::GalgameCharacterTrait
                    .def()
                    .rev(),
            )
            .filter(galgame_character_trait_link::Column::CharacterId.eq(character_id))
            .order_by_asc(galgame_character_trait::Column::Name)
            .all(&self.conn)
            .await?)
    }

    // Genres

    pub async fn link_genre(&self, galgame_id: Uuid, genre_id: i32) -> CatalogResult<()> {
        let active_model = galgame_genre_link::ActiveModel {
            galgame_id: Set(galgame_id),
            genre_id: Set(genre_id),
        };

        GalgameGenreLink::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    galgame_genre_link::Column::GalgameId,
                    galgame_genre_link::Column::GenreId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .map_err(|e| {
                CatalogError::on_write(e, "GalgameGenreLink", format!("{galgame_id}/{genre_id}"))
            })?;
        Ok(())
    }

    pub async fn unlink_genre(&self, galgame_id: Uuid, genre_id: i32) -> CatalogResult<bool> {
        let result = GalgameGenreLink::delete_by_id((galgame_id, genre_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn genres(&self, galgame_id: Uuid) -> CatalogResult<Vec<galgame_genre::Model>> {
        Ok(GalgameGenre::find()
            .join(
                JoinType::InnerJoin,
                galgame_genre_link::Relation::GalgameGenre.def().rev(),
            )
            .filter(galgame_genre_link::Column::GalgameId.eq(galgame_id))
            .order_by_asc(galgame_genre::Column::Name)
            .all(&self.conn)
            .await?)
    }

    // Credits

    pub async fn link_staff(
        &self,
        galgame_id: Uuid,
        staff_id: i32,
        role_id: i32,
        description: &str,
    ) -> CatalogResult<galgame_staff_relation::Model> {
        let key = format!("{galgame_id}/{staff_id}/{role_id}");
        let active_model = galgame_staff_relation::ActiveModel {
            galgame_id: Set(galgame_id),
            staff_id: Set(staff_id),
            role_id: Set(role_id),
            description: Set(description.to_string()),
            ..Default::default()
        };

        GalgameStaffRelation::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    galgame_staff_relation::Column::GalgameId,
                    galgame_staff_relation::Column::StaffId,
                    galgame_staff_relation::Column::RoleId,
                ])
                .update_column(galgame_staff_relation::Column::Description)
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .map_err(|e| CatalogError::on_write(e, "GalgameStaffRelation", &key))?;

        GalgameStaffRelation::find()
            .filter(galgame_staff_relation::Column::GalgameId.eq(galgame_id))
            .filter(galgame_staff_relation::Column::StaffId.eq(staff_id))
            .filter(galgame_staff_relation::Column::RoleId.eq(role_id))
            .one(&self.conn)
            .await?
            .ok_or_else(|| CatalogError::not_found("GalgameStaffRelation", key))
    }

    pub async fn unlink_staff(
        &self,
        galgame_id: Uuid,
        staff_id: i32,
        role_id: i32,
    ) -> CatalogResult<bool> {
        let result = GalgameStaffRelation::delete_many()
            .filter(galgame_staff_relation::Column::GalgameId.eq(galgame_id))
            .filter(galgame_staff_relation::Column::StaffId.eq(staff_id))
            .filter(galgame_staff_relation::Column::RoleId.eq(role_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn staff(
        &self,
        galgame_id: Uuid,
    ) -> CatalogResult<Vec<Credit<galgame_staff::Model, galgame_staff_relation_role::Model>>> {
        let relations = GalgameStaffRelation::find()
            .filter(galgame_staff_relation::Column::GalgameId.eq(galgame_id))
            .order_by_asc(galgame_staff_relation::Column::StaffId)
            .order_by_asc(galgame_staff_relation::Column::Id)
            .all(&self.conn)
            .await?;
        let people = relations.load_one(GalgameStaff, &self.conn).await?;
        let roles = relations
            .load_one(GalgameStaffRelationRole, &self.conn)
            .await?;

        Ok(relations
            .into_iter()
            .zip(people.into_iter().zip(roles))
            .filter_map(|(relation, pair)| match pair {
                (Some(person), Some(role)) => Some(Credit {
                    person,
                    role,
                    description: relation.description,
                }),
                _ => None,
            })
            .collect())
    }

    pub async fn link_character(
        &self,
        galgame_id: Uuid,
        character_id: i32,
        role_id: i32,
        description: &str,
    ) -> CatalogResult<galgame_character_relation::Model> {
        let key = format!("{galgame_id}/{character_id}/{role_id}");
        let active_model = galgame_character_relation::ActiveModel {
            galgame_id: Set(galgame_id),
            character_id: Set(character_id),
            role_id: Set(role_id),
            description: Set(description.to_string()),
            ..Default::default()
        };

        GalgameCharacterRelation::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    galgame_character_relation::Column::GalgameId,
                    galgame_character_relation::Column::CharacterId,
                    galgame_character_relation::Column::RoleId,
                ])
                .update_column(galgame_character_relation::Column::Description)
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .map_err(|e| CatalogError::on_write(e, "GalgameCharacterRelation", &key))?;

        GalgameCharacterRelation::find()
            .filter(galgame_character_relation::Column::GalgameId.eq(galgame_id))
            .filter(galgame_character_relation::Column::CharacterId.eq(character_id))
            .filter(galgame_character_relation::Column::RoleId.eq(role_id))
            .one(&self.conn)
            .await?
            .ok_or_else(|| CatalogError::not_found("GalgameCharacterRelation", key))
    }

    pub async fn unlink_character(
        &self,
        galgame_id: Uuid,
        character_id: i32,
        role_id: i32,
    ) -> CatalogResult<bool> {
        let result = GalgameCharacterRelation::delete_many()
            .filter(galgame_character_relation::Column::GalgameId.eq(galgame_id))
            .filter(galgame_character_relation::Column::CharacterId.eq(character_id))
            .filter(galgame_character_relation::Column::RoleId.eq(role_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn characters(
        &self,
        galgame_id: Uuid,
    ) -> CatalogResult<Vec<Credit<galgame_character::Model, galgame_character_relation_role::Model>>>
    {
        let relations = GalgameCharacterRelation::find()
            .filter(galgame_character_relation::Column::GalgameId.eq(galgame_id))
            .order_by_asc(galgame_character_relation::Column::CharacterId)
            .order_by_asc(galgame_character_relation::Column::Id)
            .all(&self.conn)
            .await?;
        let people = relations.load_one(GalgameCharacter, &self.conn).await?;
        let roles = relations
            .load_one(GalgameCharacterRelationRole, &self.conn)
            .await?;

        Ok(relations
            .into_iter()
            .zip(people.into_iter().zip(roles))
            .filter_map(|(relation, pair)| match pair {
                (Some(person), Some(role)) => Some(Credit {
                    person,
                    role,
                    description: relation.description,
                }),
                _ => None,
            })
            .collect())
    }
}
