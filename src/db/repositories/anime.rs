use super::subject::SubjectRepository;
use super::{json_object, require_provenance, Credit};
use crate::domain::SubjectType;
use crate::entities::{
    anime, anime_character, anime_character_actor, anime_character_relation,
    anime_character_relation_role, anime_episode, anime_genre, anime_genre_link, anime_staff,
    anime_staff_relation, anime_staff_relation_role, prelude::*, subject,
};
use crate::error::{CatalogError, CatalogResult};
use crate::models::anime::{AnimeDetail, NewAnimeCharacter, NewAnimeEpisode, NewAnimeStaff};
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

pub struct AnimeRepository {
    conn: DatabaseConnection,
}

impl AnimeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn detail_model(subject: &subject::Model, detail: &AnimeDetail) -> anime::ActiveModel {
        let provenance = if detail.provenance.is_complete() {
            detail.provenance.clone()
        } else {
            Provenance::new(&subject.info_source, &subject.id_source)
        };
        let now = Utc::now();

        anime::ActiveModel {
            subject_id: Set(subject.id),
            aliases: Set(Value::from(detail.aliases.as_slice())),
            titles: Set(json_object(&detail.titles)),
            start_date: Set(detail.start_date),
            end_date: Set(detail.end_date),
            anime_type: Set(detail.anime_type.clone()),
            anime_source: Set(detail.anime_source.clone()),
            official_websites: Set(Value::from(detail.official_websites.as_slice())),
            description: Set(detail.description.clone()),
            image_original: Set(detail.image_original.clone()),
            image_thumbnail: Set(detail.image_thumbnail.clone()),
            image_extra: Set(Value::from(detail.image_extra.as_slice())),
            anime_status: Set(detail.anime_status.clone()),
            ep_total: Set(detail.ep_total),
            broadcast: Set(json_object(&detail.broadcast)),
            broadcast_season: Set(json_object(&detail.broadcast_season)),
            external_links: Set(json_object(&detail.external_links)),
            info_source: Set(provenance.info_source),
            id_source: Set(provenance.id_source),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }

    async fn write_detail<C: ConnectionTrait>(
        conn: &C,
        subject: &subject::Model,
        detail: &AnimeDetail,
    ) -> CatalogResult<anime::Model> {
        let key = subject.id;
        if detail.ep_total.is_some_and(|total| total < 0) {
            return Err(CatalogError::InvalidData(format!(
                "anime {key} has a negative episode total"
            )));
        }

        Anime::insert(Self::detail_model(subject, detail))
            .on_conflict(
                OnConflict::column(anime::Column::SubjectId)
                    .update_columns([
                        anime::Column::Aliases,
                        anime::Column::Titles,
                        anime::Column::StartDate,
                        anime::Column::EndDate,
                        anime::Column::AnimeType,
                        anime::Column::AnimeSource,
                        anime::Column::OfficialWebsites,
                        anime::Column::Description,
                        anime::Column::ImageOriginal,
                        anime::Column::ImageThumbnail,
                        anime::Column::ImageExtra,
                        anime::Column::AnimeStatus,
                        anime::Column::EpTotal,
                        anime::Column::Broadcast,
                        anime::Column::BroadcastSeason,
                        anime::Column::ExternalLinks,
                        anime::Column::InfoSource,
                        anime::Column::IdSource,
                        anime::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await
            .map_err(|e| CatalogError::on_write(e, "Anime", key))?;

        Anime::find_by_id(key)
            .one(conn)
            .await?
            .ok_or_else(|| CatalogError::not_found("Anime", key))
    }

    /// Creates the subject and its anime detail in one transaction. Neither
    /// row exists if either insert fails.
    pub async fn create(
        &self,
        subject: &NewSubject,
        detail: &AnimeDetail,
    ) -> CatalogResult<(subject::Model, anime::Model)> {
        if subject.subject_type != SubjectType::Anime {
            return Err(CatalogError::SubjectTypeMismatch {
                expected: SubjectType::Anime,
                actual: subject.subject_type,
            });
        }

        let txn = self.conn.begin().await?;
        let subject_model = SubjectRepository::insert_in(&txn, subject).await?;
        let anime_model = Self::write_detail(&txn, &subject_model, detail).await?;
        txn.commit().await?;

        info!("Added anime: {}", subject_model);
        Ok((subject_model, anime_model))
    }

    /// Re-sync path: refreshes both rows keyed by the subject's provenance.
    pub async fn upsert(
        &self,
        subject: &NewSubject,
        detail: &AnimeDetail,
    ) -> CatalogResult<(subject::Model, anime::Model)> {
        if subject.subject_type != SubjectType::Anime {
            return Err(CatalogError::SubjectTypeMismatch {
                expected: SubjectType::Anime,
                actual: subject.subject_type,
            });
        }

        let txn = self.conn.begin().await?;
        let subject_model = SubjectRepository::upsert_in(&txn, subject).await?;
        let anime_model = Self::write_detail(&txn, &subject_model, detail).await?;
        txn.commit().await?;

        debug!(id = %subject_model.id, "Synced anime detail");
        Ok((subject_model, anime_model))
    }

    /// Attaches (or replaces) the detail row of an existing anime subject.
    pub async fn attach(&self, subject_id: Uuid, detail: &AnimeDetail) -> CatalogResult<anime::Model> {
        let txn = self.conn.begin().await?;
        SubjectRepository::touch_in(&txn, subject_id).await?;
        let subject_model =
            SubjectRepository::require_typed_in(&txn, subject_id, SubjectType::Anime).await?;
        let anime_model = Self::write_detail(&txn, &subject_model, detail).await?;
        txn.commit().await?;
        Ok(anime_model)
    }

    /// Detail row for an anime subject; `None` for unknown ids and for
    /// subjects of any other type.
    pub async fn get(&self, subject_id: Uuid) -> CatalogResult<Option<anime::Model>> {
        Ok(Anime::find_by_id(subject_id)
            .inner_join(Subject)
            .filter(subject::Column::SubjectType.eq(SubjectType::Anime))
            .one(&self.conn)
            .await?)
    }

    pub async fn find_by_source(&self, provenance: &Provenance) -> CatalogResult<Option<anime::Model>> {
        Ok(Anime::find()
            .filter(anime::Column::InfoSource.eq(provenance.info_source.as_str()))
            .filter(anime::Column::IdSource.eq(provenance.id_source.as_str()))
            .one(&self.conn)
            .await?)
    }

    // Staff

    fn staff_model(staff: &NewAnimeStaff) -> anime_staff::ActiveModel {
        let now = Utc::now();
        anime_staff::ActiveModel {
            name: Set(staff.profile.name.clone()),
            description: Set(staff.profile.description.clone()),
            gender: Set(staff.profile.gender.clone()),
            birth: Set(json_object(&staff.profile.birth)),
            staff_type: Set(staff.staff_type.clone()),
            career: Set(staff.career.clone()),
            info_source: Set(staff.provenance.info_source.clone()),
            id_source: Set(staff.provenance.id_source.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    pub async fn create_staff(&self, staff: &NewAnimeStaff) -> CatalogResult<anime_staff::Model> {
        require_provenance(&staff.provenance, "AnimeStaff")?;
        Self::staff_model(staff)
            .insert(&self.conn)
            .await
            .map_err(|e| CatalogError::on_write(e, "AnimeStaff", &staff.provenance))
    }

    pub async fn upsert_staff(&self, staff: &NewAnimeStaff) -> CatalogResult<anime_staff::Model> {
        require_provenance(&staff.provenance, "AnimeStaff")?;
        AnimeStaff::insert(Self::staff_model(staff))
            .on_conflict(
                OnConflict::columns([anime_staff::Column::InfoSource, anime_staff::Column::IdSource])
                    .update_columns([
                        anime_staff::Column::Name,
                        anime_staff::Column::Description,
                        anime_staff::Column::Gender,
                        anime_staff::Column::Birth,
                        anime_staff::Column::StaffType,
                        anime_staff::Column::Career,
                        anime_staff::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .map_err(|e| CatalogError::on_write(e, "AnimeStaff", &staff.provenance))?;

        self.find_staff_by_source(&staff.provenance)
            .await?
            .ok_or_else(|| CatalogError::not_found("AnimeStaff", &staff.provenance))
    }

    pub async fn find_staff_by_source(
        &self,
        provenance: &Provenance,
    ) -> CatalogResult<Option<anime_staff::Model>> {
        Ok(AnimeStaff::find()
            .filter(anime_staff::Column::InfoSource.eq(provenance.info_source.as_str()))
            .filter(anime_staff::Column::IdSource.eq(provenance.id_source.as_str()))
            .one(&self.conn)
            .await?)
    }

    pub async fn delete_staff(&self, staff_id: i32) -> CatalogResult<bool> {
        let result = AnimeStaff::delete_by_id(staff_id)
            .exec(&self.conn)
            .await
            .map_err(|e| CatalogError::on_delete(e, "AnimeStaff", staff_id))?;
        Ok(result.rows_affected > 0)
    }

    // Characters

    fn character_model(character: &NewAnimeCharacter) -> anime_character::ActiveModel {
        let profile = &character.profile;
        let now = Utc::now();
        anime_character::ActiveModel {
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
        character: &NewAnimeCharacter,
    ) -> CatalogResult<anime_character::Model> {
        require_provenance(&character.provenance, "AnimeCharacter")?;
        Self::character_model(character)
            .insert(&self.conn)
            .await
            .map_err(|e| CatalogError::on_write(e, "AnimeCharacter", &character.provenance))
    }

    pub async fn upsert_character(
        &self,
        character: &NewAnimeCharacter,
    ) -> CatalogResult<anime_character::Model> {
        require_provenance(&character.provenance, "AnimeCharacter")?;
        AnimeCharacter::insert(Self::character_model(character))
            .on_conflict(
                OnConflict::columns([
                    anime_character::Column::InfoSource,
                    anime_character::Column::IdSource,
                ])
                .update_columns([
                    anime_character::Column::Name,
                    anime_character::Column::ImageOriginal,
                    anime_character::Column::ImageThumbnail,
                    anime_character::Column::Description,
                    anime_character::Column::Gender,
                    anime_character::Column::Birth,
                    anime_character::Column::Age,
                    anime_character::Column::Height,
                    anime_character::Column::Weight,
                    anime_character::Column::Bwh,
                    anime_character::Column::BloodType,
                    anime_character::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .map_err(|e| CatalogError::on_write(e, "AnimeCharacter", &character.provenance))?;

        self.find_character_by_source(&character.provenance)
            .await?
            .ok_or_else(|| CatalogError::not_found("AnimeCharacter", &character.provenance))
    }

    pub async fn find_character_by_source(
        &self,
        provenance: &Provenance,
    ) -> CatalogResult<Option<anime_character::Model>> {
        Ok(AnimeCharacter::find()
            .filter(anime_character::Column::InfoSource.eq(provenance.info_source.as_str()))
            .filter(anime_character::Column::IdSource.eq(provenance.id_source.as_str()))
            .one(&self.conn)
            .await?)
    }

    pub async fn delete_character(&self, character_id: i32) -> CatalogResult<bool> {
        let result = AnimeCharacter::delete_by_id(character_id)
            .exec(&self.conn)
            .await
            .map_err(|e| CatalogError::on_delete(e, "AnimeCharacter", character_id))?;
        Ok(result.rows_affected > 0)
    }

    /// Records that `staff_id` voices `character_id`. Idempotent.
    pub async fn add_actor(&self, character_id: i32, staff_id: i32) -> CatalogResult<()> {
        let active_model = anime_character_actor::ActiveModel {
            character_id: Set(character_id),
            staff_id: Set(staff_id),
        };

        AnimeCharacterActor::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    anime_character_actor::Column::CharacterId,
                    anime_character_actor::Column::StaffId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .map_err(|e| {
                CatalogError::on_write(e, "AnimeCharacterActor", format!("{character_id}/{staff_id}"))
            })?;
        Ok(())
    }

    pub async fn remove_actor(&self, character_id: i32, staff_id: i32) -> CatalogResult<bool> {
        let result = AnimeCharacterActor::delete_by_id((character_id, staff_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn actors(&self, character_id: i32) -> CatalogResult<Vec<anime_staff::Model>> {
        Ok(AnimeStaff::find()
            .join(
                JoinType::InnerJoin,
                anime_character_actor::Relation::AnimeStaff.def().rev(),
            )
            .filter(anime_character_actor::Column::CharacterId.eq(character_id))
            .order_by_asc(anime_staff::Column::Name)
            .all(&self.conn)
            .await?)
    }

    // Episodes

    fn episode_model(anime_id: Uuid, episode: &NewAnimeEpisode) -> anime_episode::ActiveModel {
        let now = Utc::now();
        anime_episode::ActiveModel {
            anime_id: Set(anime_id),
            title: Set(episode.title.clone()),
            episode_type: Set(episode.episode_type.clone()),
            ep_num: Set(episode.ep_num),
            duration_secs: Set(episode.duration_secs),
            airdate: Set(episode.airdate),
            description: Set(episode.description.clone()),
            info_source: Set(episode.provenance.info_source.clone()),
            id_source: Set(episode.provenance.id_source.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    pub async fn create_episode(
        &self,
        anime_id: Uuid,
        episode: &NewAnimeEpisode,
    ) -> CatalogResult<anime_episode::Model> {
        require_provenance(&episode.provenance, "AnimeEpisode")?;
        Self::episode_model(anime_id, episode)
            .insert(&self.conn)
            .await
            .map_err(|e| CatalogError::on_write(e, "AnimeEpisode", &episode.provenance))
    }

    /// Inserts or refreshes an episode identified by its provenance.
    pub async fn upsert_episode(
        &self,
        anime_id: Uuid,
        episode: &NewAnimeEpisode,
    ) -> CatalogResult<anime_episode::Model> {
        require_provenance(&episode.provenance, "AnimeEpisode")?;
        AnimeEpisode::insert(Self::episode_model(anime_id, episode))
            .on_conflict(
                OnConflict::columns([
                    anime_episode::Column::InfoSource,
                    anime_episode::Column::IdSource,
                ])
                .update_columns([
                    anime_episode::Column::AnimeId,
                    anime_episode::Column::Title,
                    anime_episode::Column::EpisodeType,
                    anime_episode::Column::EpNum,
                    anime_episode::Column::DurationSecs,
                    anime_episode::Column::Airdate,
                    anime_episode::Column::Description,
                    anime_episode::Column::UpdatedAt,
                ])
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .map_err(|e| CatalogError::on_write(e, "AnimeEpisode", &episode.provenance))?;

        AnimeEpisode::find()
            .filter(anime_episode::Column::InfoSource.eq(episode.provenance.info_source.as_str()))
            .filter(anime_episode::Column::IdSource.eq(episode.provenance.id_source.as_str()))
            .one(&self.conn)
            .await?
            .ok_or_else(|| CatalogError::not_found("AnimeEpisode", &episode.provenance))
    }

    pub async fn episodes(&self, anime_id: Uuid) -> CatalogResult<Vec<anime_episode::Model>> {
        Ok(AnimeEpisode::find()
            .filter(anime_episode::Column::AnimeId.eq(anime_id))
            .order_by_asc(anime_episode::Column::EpisodeType)
            .order_by_asc(anime_episode::Column::EpNum)
            .all(&self.conn)
            .await?)
    }

    // Genres

    pub async fn link_genre(&self, anime_id: Uuid, genre_id: i32) -> CatalogResult<()> {
        let active_model = anime_genre_link::ActiveModel {
            anime_id: Set(anime_id),
            genre_id: Set(genre_id),
        };

        AnimeGenreLink::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    anime_genre_link::Column::AnimeId,
                    anime_genre_link::Column::GenreId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .map_err(|e| CatalogError::on_write(e, "AnimeGenreLink", format!("{anime_id}/{genre_id}")))?;
        Ok(())
    }

    pub async fn unlink_genre(&self, anime_id: Uuid, genre_id: i32) -> CatalogResult<bool> {
        let result = AnimeGenreLink::delete_by_id((anime_id, genre_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn genres(&self, anime_id: Uuid) -> CatalogResult<Vec<anime_genre::Model>> {
        Ok(AnimeGenre::find()
            .join(JoinType::InnerJoin, anime_genre_link::Relation::AnimeGenre.def().rev())
            .filter(anime_genre_link::Column::AnimeId.eq(anime_id))
            .order_by_asc(anime_genre::Column::Name)
            .all(&self.conn)
            .await?)
    }

    // Credits

    /// Credits `staff_id` on the anime under `role_id`. Re-linking the same
    /// triple only refreshes the description.
    pub async fn link_staff(
        &self,
        anime_id: Uuid,
        staff_id: i32,
        role_id: i32,
        description: &str,
    ) -> CatalogResult<anime_staff_relation::Model> {
        let key = format!("{anime_id}/{staff_id}/{role_id}");
        let active_model = anime_staff_relation::ActiveModel {
            anime_id: Set(anime_id),
            staff_id: Set(staff_id),
            role_id: Set(role_id),
            description: Set(description.to_string()),
            ..Default::default()
        };

        AnimeStaffRelation::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    anime_staff_relation::Column::AnimeId,
                    anime_staff_relation::Column::StaffId,
                    anime_staff_relation::Column::RoleId,
                ])
                .update_column(anime_staff_relation::Column::Description)
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .map_err(|e| CatalogError::on_write(e, "AnimeStaffRelation", &key))?;

        AnimeStaffRelation::find()
            .filter(anime_staff_relation::Column::AnimeId.eq(anime_id))
            .filter(anime_staff_relation::Column::StaffId.eq(staff_id))
            .filter(anime_staff_relation::Column::RoleId.eq(role_id))
            .one(&self.conn)
            .await?
            .ok_or_else(|| CatalogError::not_found("AnimeStaffRelation", key))
    }

    pub async fn unlink_staff(&self, anime_id: Uuid, staff_id: i32, role_id: i32) -> CatalogResult<bool> {
        let result = AnimeStaffRelation::delete_many()
            .filter(anime_staff_relation::Column::AnimeId.eq(anime_id))
            .filter(anime_staff_relation::Column::StaffId.eq(staff_id))
            .filter(anime_staff_relation::Column::RoleId.eq(role_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn staff(
        &self,
        anime_id: Uuid,
    ) -> CatalogResult<Vec<Credit<anime_staff::Model, anime_staff_relation_role::Model>>> {
        let relations = AnimeStaffRelation::find()
            .filter(anime_staff_relation::Column::AnimeId.eq(anime_id))
            .order_by_asc(anime_staff_relation::Column::StaffId)
            .order_by_asc(anime_staff_relation::Column::Id)
            .all(&self.conn)
            .await?;
        let people = relations.load_one(AnimeStaff, &self.conn).await?;
        let roles = relations.load_one(AnimeStaffRelationRole, &self.conn).await?;

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
        anime_id: Uuid,
        character_id: i32,
        role_id: i32,
        description: &str,
    ) -> CatalogResult<anime_character_relation::Model> {
        let key = format!("{anime_id}/{character_id}/{role_id}");
        let active_model = anime_character_relation::ActiveModel {
            anime_id: Set(anime_id),
            character_id: Set(character_id),
            role_id: Set(role_id),
            description: Set(description.to_string()),
            ..Default::default()
        };

        AnimeCharacterRelation::insert(active_model)
            .on_conflict(
                OnConflict::columns([
                    anime_character_relation::Column::AnimeId,
                    anime_character_relation::Column::CharacterId,
                    anime_character_relation::Column::RoleId,
                ])
                .update_column(anime_character_relation::Column::Description)
                .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await
            .map_err(|e| CatalogError::on_write(e, "AnimeCharacterRelation", &key))?;

        AnimeCharacterRelation::find()
            .filter(anime_character_relation::Column::AnimeId.eq(anime_id))
            .filter(anime_character_relation::Column::CharacterId.eq(character_id))
            .filter(anime_character_relation::Column::RoleId.eq(role_id))
            .one(&self.conn)
            .await?
            .ok_or_else(|| CatalogError::not_found("AnimeCharacterRelation", key))
    }

    pub async fn unlink_character(
        &self,
        anime_id: Uuid,
        character_id: i32,
        role_id: i32,
    ) -> CatalogResult<bool> {
        let result = AnimeCharacterRelation::delete_many()
            .filter(anime_character_relation::Column::AnimeId.eq(anime_id))
            .filter(anime_character_relation::Column::CharacterId.eq(character_id))
            .filter(anime_character_relation::Column::RoleId.eq(role_id))
            .exec(&self.conn)
            .await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn characters(
        &self,
        anime_id: Uuid,
    ) -> CatalogResult<Vec<Credit<anime_character::Model, anime_character_relation_role::Model>>> {
        let relations = AnimeCharacterRelation::find()
            .filter(anime_character_relation::Column::AnimeId.eq(anime_id))
            .order_by_asc(anime_character_relation::Column::CharacterId)
            .order_by_asc(anime_character_relation::Column::Id)
            .all(&self.conn)
            .await?;
        let people = relations.load_one(AnimeCharacter, &self.conn).await?;
        let roles = relations
            .load_one(AnimeCharacterRelationRole, &self.conn)
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
