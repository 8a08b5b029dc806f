//! Integration tests for people, vocabularies and the links between them.

use noshiro::db::Store;
use noshiro::domain::SubjectType;
use noshiro::entities::prelude::{
    AnimeCharacterRelationRole, AnimeGenre, AnimeStaffRelationRole, GalgameCharacterRelationRole,
    GalgameCharacterTrait, GalgameStaffRelationRole, SubjectRelationType,
};
use noshiro::error::CatalogError;
use noshiro::models::anime::{AnimeDetail, NewAnimeCharacter, NewAnimeEpisode, NewAnimeStaff};
use noshiro::models::galgame::{
    GalgameDetail, NewGalgameCharacter, NewGalgameProducer, NewGalgameStaff,
};
use noshiro::models::subject::NewSubject;
use noshiro::models::{CharacterProfile, CodeName, Provenance, StaffProfile};
use uuid::Uuid;

async fn spawn_store() -> Store {
    let db_path = std::env::temp_dir().join(format!(
        "noshiro-association-test-{}.db",
        Uuid::new_v4()
    ));
    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("Failed to open test store")
}

async fn create_anime(store: &Store, id: &str, title: &str) -> Uuid {
    let subject = NewSubject::new(SubjectType::Anime, title, Provenance::new("bangumi", id));
    let (subject, _) = store
        .anime_repo()
        .create(&subject, &AnimeDetail::default())
        .await
        .unwrap();
    subject.id
}

async fn create_galgame(store: &Store, id: &str, title: &str) -> Uuid {
    let subject = NewSubject::new(SubjectType::Galgame, title, Provenance::new("vndb", id));
    let (subject, _) = store
        .galgame_repo()
        .create(&subject, &GalgameDetail::default())
        .await
        .unwrap();
    subject.id
}

fn anime_staff(name: &str, id: &str) -> NewAnimeStaff {
    NewAnimeStaff {
        profile: StaffProfile {
            name: name.to_string(),
            ..StaffProfile::default()
        },
        provenance: Provenance::new("bangumi", id),
        ..NewAnimeStaff::default()
    }
}

#[tokio::test]
async fn test_relinking_staff_updates_description() {
    let store = spawn_store().await;
    let anime_repo = store.anime_repo();
    let anime_id = create_anime(&store, "1", "Frieren").await;
    let staff = anime_repo
        .upsert_staff(&anime_staff("Keiichirou Saitou", "p1"))
        .await
        .unwrap();
    let director = store
        .lookups::<AnimeStaffRelationRole>()
        .upsert(&CodeName::new("director", "Director"))
        .await
        .unwrap();

    let first = anime_repo
        .link_staff(anime_id, staff.id, director.id, "eps 1-14")
        .await
        .unwrap();
    let second = anime_repo
        .link_staff(anime_id, staff.id, director.id, "eps 1-28")
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    let credits = anime_repo.staff(anime_id).await.unwrap();
    assert_eq!(credits.len(), 1);
    assert_eq!(credits[0].description, "eps 1-28");
    assert_eq!(credits[0].person.name, "Keiichirou Saitou");
    assert_eq!(credits[0].role.code, "director");

    assert!(
        anime_repo
            .unlink_staff(anime_id, staff.id, director.id)
            .await
            .unwrap()
    );
    assert!(anime_repo.staff(anime_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_same_person_may_hold_several_roles() {
    let store = spawn_store().await;
    let anime_repo = store.anime_repo();
    let anime_id = create_anime(&store, "2", "Shirobako").await;
    let staff = anime_repo
        .upsert_staff(&anime_staff("Tsutomu Mizushima", "p2"))
        .await
        .unwrap();
    let roles = store
        .lookups::<AnimeStaffRelationRole>()
        .seed(&[
            CodeName::new("director", "Director"),
            CodeName::new("storyboard", "Storyboard"),
        ])
        .await
        .unwrap();

    for role in &roles {
        anime_repo
            .link_staff(anime_id, staff.id, role.id, "")
            .await
            .unwrap();
    }

    assert_eq!(anime_repo.staff(anime_id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_people_upsert_by_provenance() {
    let store = spawn_store().await;
    let anime_repo = store.anime_repo();

    let first = anime_repo.upsert_staff(&anime_staff("Old Name", "p3")).await.unwrap();
    let second = anime_repo.upsert_staff(&anime_staff("New Name", "p3")).await.unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(second.name, "New Name");

    let err = anime_repo.create_staff(&anime_staff("Clash", "p3")).await.unwrap_err();
    assert!(err.is_duplicate());

    let err = anime_repo
        .upsert_staff(&anime_staff("Nowhere", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidData(_)));
}

#[tokio::test]
async fn test_referenced_genre_cannot_be_deleted() {
    let store = spawn_store().await;
    let anime_id = create_anime(&store, "3", "Dungeon Meshi").await;
    let genres = store.lookups::<AnimeGenre>();
    let genre = genres.upsert(&CodeName::new("fantasy", "Fantasy")).await.unwrap();

    store.anime_repo().link_genre(anime_id, genre.id).await.unwrap();
    store.anime_repo().link_genre(anime_id, genre.id).await.unwrap();
    assert_eq!(store.anime_repo().genres(anime_id).await.unwrap().len(), 1);

    let err = genres.delete("fantasy").await.unwrap_err();
    assert!(err.is_protected_reference(), "unexpected error: {err}");
    assert!(genres.get("fantasy").await.unwrap().is_some());

    store.anime_repo().unlink_genre(anime_id, genre.id).await.unwrap();
    assert!(genres.delete("fantasy").await.unwrap());
    assert!(genres.get("fantasy").await.unwrap().is_none());
}

#[tokio::test]
async fn test_referenced_role_cannot_be_deleted() {
    let store = spawn_store().await;
    let anime_repo = store.anime_repo();
    let anime_id = create_anime(&store, "4", "Bocchi the Rock").await;
    let character = anime_repo
        .upsert_character(&NewAnimeCharacter {
            profile: CharacterProfile {
                name: "Hitori Gotou".to_string(),
                ..CharacterProfile::default()
            },
            provenance: Provenance::new("bangumi", "c1"),
        })
        .await
        .unwrap();
    let roles = store.lookups::<AnimeCharacterRelationRole>();
    let main = roles.upsert(&CodeName::new("main", "Main")).await.unwrap();

    anime_repo
        .link_character(anime_id, character.id, main.id, "")
        .await
        .unwrap();

    let err = roles.delete("main").await.unwrap_err();
    assert!(err.is_protected_reference());

    let voice = anime_repo.upsert_staff(&anime_staff("Yoshino Aoyama", "p4")).await.unwrap();
    anime_repo.add_actor(character.id, voice.id).await.unwrap();
    let actors = anime_repo.actors(character.id).await.unwrap();
    assert_eq!(actors.len(), 1);
    assert_eq!(actors[0].name, "Yoshino Aoyama");

    let characters = anime_repo.characters(anime_id).await.unwrap();
    assert_eq!(characters[0].person.name, "Hitori Gotou");
    assert_eq!(characters[0].role.name, "Main");
}

#[tokio::test]
async fn test_deleting_a_person_drops_their_credits() {
    let store = spawn_store().await;
    let anime_repo = store.anime_repo();
    let anime_id = create_anime(&store, "5", "Mushishi").await;
    let staff = anime_repo.upsert_staff(&anime_staff("Hiroshi Nagahama", "p5")).await.unwrap();
    let role = store
        .lookups::<AnimeStaffRelationRole>()
        .upsert(&CodeName::new("director", "Director"))
        .await
        .unwrap();
    anime_repo.link_staff(anime_id, staff.id, role.id, "").await.unwrap();

    assert!(anime_repo.delete_staff(staff.id).await.unwrap());
    assert!(anime_repo.staff(anime_id).await.unwrap().is_empty());
    assert!(anime_repo.get(anime_id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_linking_unknown_rows_is_not_found() {
    let store = spawn_store().await;
    let anime_id = create_anime(&store, "6", "Lonely").await;
    let role = store
        .lookups::<AnimeStaffRelationRole>()
        .upsert(&CodeName::new("director", "Director"))
        .await
        .unwrap();

    let err = store
        .anime_repo()
        .link_staff(anime_id, 9999, role.id, "")
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "unexpected error: {err}");

    let err = store
        .anime_repo()
        .link_genre(Uuid::new_v4(), 1)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_lookup_codes_are_unique() {
    let store = spawn_store().await;
    let traits = store.lookups::<GalgameCharacterTrait>();

    let first = traits.upsert(&CodeName::new("i35", "Ahoge")).await.unwrap();
    let renamed = traits.upsert(&CodeName::new("i35", "Antenna Hair")).await.unwrap();
    assert_eq!(first.id, renamed.id);
    assert_eq!(renamed.name, "Antenna Hair");

    let err = traits.create(&CodeName::new("i35", "Other")).await.unwrap_err();
    assert!(err.is_duplicate());

    let err = traits.create(&CodeName::new(" ", "Blank")).await.unwrap_err();
    assert!(matches!(err, CatalogError::InvalidData(_)));

    traits.create(&CodeName::new("i1", "Hair")).await.unwrap();
    let codes: Vec<_> = traits.list().await.unwrap().into_iter().map(|t| t.code).collect();
    assert_eq!(codes, vec!["i35", "i1"]);
}

#[tokio::test]
async fn test_subject_relations() {
    let store = spawn_store().await;
    let season_one = create_anime(&store, "10", "Season 1").await;
    let season_two = create_anime(&store, "11", "Season 2").await;
    let sequel = store
        .lookups::<SubjectRelationType>()
        .upsert(&CodeName::new("sequel", "Sequel"))
        .await
        .unwrap();

    let subjects = store.subject_repo();
    let relation = subjects.link(season_one, season_two, sequel.id).await.unwrap();
    let again = subjects.link(season_one, season_two, sequel.id).await.unwrap();
    assert_eq!(relation.id, again.id);

    let outgoing = subjects.relations_from(season_one).await.unwrap();
    assert_eq!(outgoing.len(), 1);
    assert_eq!(outgoing[0].0.target_id, season_two);
    assert_eq!(outgoing[0].1.code, "sequel");

    let incoming = subjects.relations_to(season_two).await.unwrap();
    assert_eq!(incoming.len(), 1);
    assert!(subjects.relations_to(season_one).await.unwrap().is_empty());

    let err = subjects.link(season_one, season_one, sequel.id).await.unwrap_err();
    assert!(matches!(err, CatalogError::InvalidData(_)));

    let err = subjects
        .link(season_one, Uuid::new_v4(), sequel.id)
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = store
        .lookups::<SubjectRelationType>()
        .delete("sequel")
        .await
        .unwrap_err();
    assert!(err.is_protected_reference());

    store.delete_subject(season_two).await.unwrap();
    assert!(subjects.relations_from(season_one).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_galgame_associations() {
    let store = spawn_store().await;
    let galgame_repo = store.galgame_repo();
    let galgame_id = create_galgame(&store, "v17", "Ever17").await;

    let producer = galgame_repo
        .upsert_producer(&NewGalgameProducer {
            name: "KID".to_string(),
            producer_type: "co".to_string(),
            provenance: Provenance::new("vndb", "p88"),
            ..NewGalgameProducer::default()
        })
        .await
        .unwrap();
    galgame_repo.link_producer(galgame_id, producer.id).await.unwrap();
    assert_eq!(galgame_repo.producers(galgame_id).await.unwrap()[0].name, "KID");

    let writer = galgame_repo
        .upsert_staff(&NewGalgameStaff {
            profile: StaffProfile {
                name: "Kotaro Uchikoshi".to_string(),
                ..StaffProfile::default()
            },
            provenance: Provenance::new("vndb", "s11"),
            ..NewGalgameStaff::default()
        })
        .await
        .unwrap();
    let scenario = store
        .lookups::<GalgameStaffRelationRole>()
        .upsert(&CodeName::new("scenario", "Scenario"))
        .await
        .unwrap();
    galgame_repo
        .link_staff(galgame_id, writer.id, scenario.id, "")
        .await
        .unwrap();

    let heroine = galgame_repo
        .upsert_character(&NewGalgameCharacter {
            profile: CharacterProfile {
                name: "Tsugumi Komachi".to_string(),
                age: Some(17),
                ..CharacterProfile::default()
            },
            provenance: Provenance::new("vndb", "c100"),
        })
        .await
        .unwrap();
    let main = store
        .lookups::<GalgameCharacterRelationRole>()
        .upsert(&CodeName::new("primary", "Heroine"))
        .await
        .unwrap();
    galgame_repo
        .link_character(galgame_id, heroine.id, main.id, "")
        .await
        .unwrap();

    let ahoge = store
        .lookups::<GalgameCharacterTrait>()
        .upsert(&CodeName::new("i35", "Ahoge"))
        .await
        .unwrap();
    galgame_repo.add_trait(heroine.id, ahoge.id).await.unwrap();
    assert_eq!(galgame_repo.traits(heroine.id).await.unwrap().len(), 1);

    let err = store
        .lookups::<GalgameCharacterTrait>()
        .delete("i35")
        .await
        .unwrap_err();
    assert!(err.is_protected_reference());

    assert_eq!(galgame_repo.staff(galgame_id).await.unwrap().len(), 1);
    let characters = galgame_repo.characters(galgame_id).await.unwrap();
    assert_eq!(characters[0].person.age, Some(17));

    store.delete_subject(galgame_id).await.unwrap();
    assert!(galgame_repo.producers(galgame_id).await.unwrap().is_empty());
    assert!(galgame_repo.characters(galgame_id).await.unwrap().is_empty());
    // Trait links belong to the character, not the galgame.
    assert_eq!(galgame_repo.traits(heroine.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_strict_creates_reject_known_provenance() {
    let store = spawn_store().await;
    let galgame_repo = store.galgame_repo();

    let producer = NewGalgameProducer {
        name: "Key".to_string(),
        provenance: Provenance::new("vndb", "p24"),
        ..NewGalgameProducer::default()
    };
    galgame_repo.create_producer(&producer).await.unwrap();
    let err = galgame_repo.create_producer(&producer).await.unwrap_err();
    assert!(err.is_duplicate(), "unexpected error: {err}");

    let staff = NewGalgameStaff {
        profile: StaffProfile {
            name: "Jun Maeda".to_string(),
            ..StaffProfile::default()
        },
        provenance: Provenance::new("vndb", "s4"),
        ..NewGalgameStaff::default()
    };
    let composer = galgame_repo.create_staff(&staff).await.unwrap();
    let err = galgame_repo.create_staff(&staff).await.unwrap_err();
    assert!(err.is_duplicate(), "unexpected error: {err}");

    let character = NewGalgameCharacter {
        profile: CharacterProfile {
            name: "Nagisa Furukawa".to_string(),
            ..CharacterProfile::default()
        },
        provenance: Provenance::new("vndb", "c7"),
    };
    let nagisa = galgame_repo.create_character(&character).await.unwrap();
    let err = galgame_repo.create_character(&character).await.unwrap_err();
    assert!(err.is_duplicate(), "unexpected error: {err}");

    let err = galgame_repo
        .create_staff(&NewGalgameStaff::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidData(_)));

    galgame_repo.add_actor(nagisa.id, composer.id).await.unwrap();
    assert_eq!(galgame_repo.actors(nagisa.id).await.unwrap().len(), 1);
    assert!(galgame_repo.remove_actor(nagisa.id, composer.id).await.unwrap());
    assert!(!galgame_repo.remove_actor(nagisa.id, composer.id).await.unwrap());
    assert!(galgame_repo.actors(nagisa.id).await.unwrap().is_empty());

    let anime_id = create_anime(&store, "876", "Clannad").await;
    let episode = NewAnimeEpisode {
        title: "On the Hillside Path Where the Cherry Blossoms Flutter".to_string(),
        ep_num: Some(1),
        provenance: Provenance::new("bangumi", "ep876-1"),
        ..NewAnimeEpisode::default()
    };
    let anime_repo = store.anime_repo();
    anime_repo.create_episode(anime_id, &episode).await.unwrap();
    let err = anime_repo.create_episode(anime_id, &episode).await.unwrap_err();
    assert!(err.is_duplicate(), "unexpected error: {err}");
    assert_eq!(anime_repo.episodes(anime_id).await.unwrap().len(), 1);
}
