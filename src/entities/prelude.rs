pub use super::anime::Entity as Anime;
pub use super::anime_character::Entity as AnimeCharacter;
pub use super::anime_character_actor::Entity as AnimeCharacterActor;
pub use super::anime_character_relation::Entity as AnimeCharacterRelation;
pub use super::anime_character_relation_role::Entity as AnimeCharacterRelationRole;
pub use super::anime_episode::Entity as AnimeEpisode;
pub use super::anime_genre::Entity as AnimeGenre;
pub use super::anime_genre_link::Entity as AnimeGenreLink;
pub use super::anime_staff::Entity as AnimeStaff;
pub use super::anime_staff_relation::Entity as AnimeStaffRelation;
pub use super::anime_staff_relation_role::Entity as AnimeStaffRelationRole;
pub use super::galgame::Entity as Galgame;
pub use super::galgame_character::Entity as GalgameCharacter;
pub use super::galgame_character_actor::Entity as GalgameCharacterActor;
pub use super::galgame_character_relation::Entity as GalgameCharacterRelation;
pub use super::galgame_character_relation_role::Entity as GalgameCharacterRelationRole;
pub use super::galgame_character_trait::Entity as GalgameCharacterTrait;
pub use super::galgame_character_trait_link::Entity as GalgameCharacterTraitLink;
pub use super::galgame_genre::Entity as GalgameGenre;
pub use super::galgame_genre_link::Entity as GalgameGenreLink;
pub use super::galgame_producer::Entity as GalgameProducer;
pub use super::galgame_producer_link::Entity as GalgameProducerLink;
pub use super::galgame_staff::Entity as GalgameStaff;
pub use super::galgame_staff_relation::Entity as GalgameStaffRelation;
pub use super::galgame_staff_relation_role::Entity as GalgameStaffRelationRole;
pub use super::pending_update::Entity as PendingUpdate;
pub use super::subject::Entity as Subject;
pub use super::subject_relation::Entity as SubjectRelation;
pub use super::subject_relation_type::Entity as SubjectRelationType;
pub use super::subject_status::Entity as SubjectStatus;
