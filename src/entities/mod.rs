pub mod prelude;

pub mod anime;
pub mod anime_character;
pub mod anime_character_actor;
pub mod anime_character_relation;
pub mod anime_character_relation_role;
pub mod anime_episode;
pub mod anime_genre;
pub mod anime_genre_link;
pub mod anime_staff;
pub mod anime_staff_relation;
pub mod anime_staff_relation_role;
pub mod galgame;
pub mod galgame_character;
pub mod galgame_character_actor;
pub mod galgame_character_relation;
pub mod galgame_character_relation_role;
pub mod galgame_character_trait;
pub mod galgame_character_trait_link;
pub mod galgame_genre;
pub mod galgame_genre_link;
pub mod galgame_producer;
pub mod galgame_producer_link;
pub mod galgame_staff;
pub mod galgame_staff_relation;
pub mod galgame_staff_relation_role;
pub mod pending_update;
pub mod subject;
pub mod subject_relation;
pub mod subject_relation_type;
pub mod subject_status;
