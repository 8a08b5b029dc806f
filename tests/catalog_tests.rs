//! Integration tests for subjects and their type-specific detail rows.

use chrono::NaiveDate;
use noshiro::config::GeneralConfig;
use noshiro::db::Store;
use noshiro::domain::{Severity, SortOrder, SubjectType};
use noshiro::entities::prelude::{AnimeGenre, AnimeStaffRelationRole};
use noshiro::error::CatalogError;
use noshiro::models::anime::{AnimeDetail, NewAnimeEpisode, NewAnimeStaff};
use noshiro::models::bookkeeping::StatusInput;
use noshiro::models::galgame::GalgameDetail;
use noshiro::models::subject::{InfoboxEntry, NewSubject, SubjectDetail, SubjectFilter};
use noshiro::models::{CodeName, Provenance, StaffProfile};
use sea_orm::{ConnectionTrait, DbBackend, Statement};
use std::collections::HashSet;
use tokio::task::JoinSet;

async fn spawn_store() -> Store {
    let db_path =
        std::env::temp_dir().join(format!("noshiro-catalog-test-{}.db", uuid::Uuid::new_v4()));
    Store::new(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("Failed to open test store")
}

fn anime_subject(id: &str, title: &str) -> NewSubject {
    NewSubject::new(SubjectType::Anime, title, Provenance::new("bangumi", id))
}

#[tokio::test]
async fn test_duplicate_provenance_is_rejected() {
    let store = spawn_store().await;
    let subject = anime_subject("400602", "Sousou no Frieren");

    store.create_subject(&subject).await.unwrap();
    let err = store.create_subject(&subject).await.unwrap_err();

    assert!(err.is_duplicate(), "unexpected error: {err}");
    assert!(err.to_string().contains("bangumi/400602"));
}

#[tokio::test]
async fn test_upsert_keeps_id_and_refreshes_fields() {
    let store = spawn_store().await;
    let mut subject = anime_subject("1", "Working Title");

    let first = store.upsert_subject(&subject).await.unwrap();

    subject.title = "Final Title".to_string();
    subject.infobox = vec![InfoboxEntry::new("Director", "Someone")];
    let second = store.upsert_subject(&subject).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.title, "Final Title");
    assert_eq!(second.infobox[0]["key"], "Director");
    assert_eq!(second.created_at, first.created_at);
    assert_eq!(store.count_subjects().await.unwrap(), 1);
}

#[tokio::test]
async fn test_upsert_cannot_change_subject_type() {
    let store = spawn_store().await;
    store.upsert_subject(&anime_subject("7", "Clannad")).await.unwrap();

    let as_galgame = NewSubject::new(SubjectType::Galgame, "Clannad", Provenance::new("bangumi", "7"));
    let err = store.upsert_subject(&as_galgame).await.unwrap_err();

    assert!(matches!(
        err,
        CatalogError::SubjectTypeMismatch {
            expected: SubjectType::Anime,
            actual: SubjectType::Galgame,
        }
    ));
}

#[tokio::test]
async fn test_both_dates_are_invalid() {
    let store = spawn_store().await;
    let mut subject = anime_subject("2", "Dated Twice");
    subject.date = NaiveDate::from_ymd_opt(2023, 9, 29);
    subject.ambiguous_date = NaiveDate::from_ymd_opt(2023, 1, 1);

    let err = store.create_subject(&subject).await.unwrap_err();
    assert!(matches!(err, CatalogError::InvalidData(_)));
    assert!(store.find_subject_by_source(&subject.provenance).await.unwrap().is_none());
}

#[tokio::test]
async fn test_anime_detail_round_trip() {
    let store = spawn_store().await;
    let mut subject = anime_subject("400602", "Sousou no Frieren");
    subject.date = NaiveDate::from_ymd_opt(2023, 9, 29);
    let detail = AnimeDetail {
        anime_type: "TV".to_string(),
        ep_total: Some(12),
        aliases: vec!["Frieren".to_string()],
        ..AnimeDetail::default()
    };

    let (created, anime) = store.anime_repo().create(&subject, &detail).await.unwrap();
    assert_eq!(anime.subject_id, created.id);
    assert_eq!(anime.info_source, "bangumi");
    assert_eq!(anime.id_source, "400602");

    let (loaded, detail) = store.get_subject_with_detail(created.id).await.unwrap().unwrap();
    assert_eq!(loaded.subject_type, SubjectType::Anime);
    match detail {
        Some(SubjectDetail::Anime(anime)) => {
            assert_eq!(anime.ep_total, Some(12));
            assert_eq!(anime.aliases, serde_json::json!(["Frieren"]));
        }
        other => panic!("expected anime detail, got {other:?}"),
    }

    assert!(store.galgame_repo().get(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_subject_without_detail_table_has_no_detail() {
    let store = spawn_store().await;
    let manga = NewSubject::new(SubjectType::Manga, "Yotsuba&!", Provenance::new("bangumi", "1846"));
    let created = store.create_subject(&manga).await.unwrap();

    let (_, detail) = store.get_subject_with_detail(created.id).await.unwrap().unwrap();
    assert!(detail.is_none());
    assert!(store.anime_repo().get(created.id).await.unwrap().is_none());
    assert!(store.get_subject_with_detail(uuid::Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_failed_detail_insert_leaves_no_subject() {
    let store = spawn_store().await;
    store
        .anime_repo()
        .create(&anime_subject("100", "First"), &AnimeDetail::default())
        .await
        .unwrap();

    let clashing = AnimeDetail {
        provenance: Provenance::new("bangumi", "100"),
        ..AnimeDetail::default()
    };
    let second = anime_subject("200", "Second");
    let err = store.anime_repo().create(&second, &clashing).await.unwrap_err();

    assert!(err.is_duplicate(), "unexpected error: {err}");
    assert!(store.find_subject_by_source(&second.provenance).await.unwrap().is_none());
    assert_eq!(store.count_subjects().await.unwrap(), 1);
}

#[tokio::test]
async fn test_detail_type_must_match_subject() {
    let store = spawn_store().await;

    let galgame = NewSubject::new(SubjectType::Galgame, "Ever17", Provenance::new("vndb", "v17"));
    let err = store
        .anime_repo()
        .create(&galgame, &AnimeDetail::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::SubjectTypeMismatch { .. }));

    let (created, _) = store
        .galgame_repo()
        .create(&galgame, &GalgameDetail::default())
        .await
        .unwrap();
    let err = store
        .anime_repo()
        .attach(created.id, &AnimeDetail::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::SubjectTypeMismatch {
            expected: SubjectType::Anime,
            actual: SubjectType::Galgame,
        }
    ));

    let err = store
        .anime_repo()
        .attach(uuid::Uuid::new_v4(), &AnimeDetail::default())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_attach_detail_to_existing_subject() {
    let store = spawn_store().await;
    let subject = store.create_subject(&anime_subject("55", "Mid Ingestion")).await.unwrap();
    assert!(store.anime_repo().get(subject.id).await.unwrap().is_none());

    let detail = AnimeDetail {
        ep_total: Some(24),
        ..AnimeDetail::default()
    };
    store.anime_repo().attach(subject.id, &detail).await.unwrap();

    let refreshed = AnimeDetail {
        ep_total: Some(25),
        ..AnimeDetail::default()
    };
    let anime = store.anime_repo().attach(subject.id, &refreshed).await.unwrap();
    assert_eq!(anime.ep_total, Some(25));
}

#[tokio::test]
async fn test_list_orders_by_date_then_title() {
    let store = spawn_store().await;

    for (id, title, date) in [
        ("1", "Beta", NaiveDate::from_ymd_opt(2020, 1, 1)),
        ("2", "Alpha", NaiveDate::from_ymd_opt(2020, 1, 1)),
        ("3", "Newest", NaiveDate::from_ymd_opt(2024, 4, 1)),
        ("4", "Undated", None),
    ] {
        let mut subject = anime_subject(id, title);
        subject.date = date;
        store.create_subject(&subject).await.unwrap();
    }
    let mut circa = anime_subject("5", "Circa");
    circa.ambiguous_date = NaiveDate::from_ymd_opt(2022, 1, 1);
    store.create_subject(&circa).await.unwrap();
    let mut game = NewSubject::new(SubjectType::Game, "Alpha Game", Provenance::new("bangumi", "9"));
    game.nsfw = true;
    store.create_subject(&game).await.unwrap();

    let anime_only = SubjectFilter {
        subject_type: Some(SubjectType::Anime),
        ..SubjectFilter::default()
    };
    let titles: Vec<_> = store
        .list_subjects(&anime_only)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.title)
        .collect();
    assert_eq!(titles, vec!["Newest", "Circa", "Alpha", "Beta", "Undated"]);

    let page = SubjectFilter {
        subject_type: Some(SubjectType::Anime),
        date_order: SortOrder::Ascending,
        offset: 1,
        limit: Some(2),
        ..SubjectFilter::default()
    };
    let titles: Vec<_> = store
        .list_subjects(&page)
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.title)
        .collect();
    assert_eq!(titles, vec!["Alpha", "Beta"]);

    let search = SubjectFilter {
        title_contains: Some("Alpha".to_string()),
        nsfw: Some(true),
        ..SubjectFilter::default()
    };
    let found = store.list_subjects(&search).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].subject_type, SubjectType::Game);
}

#[tokio::test]
async fn test_title_search_matches_wildcards_literally() {
    let store = spawn_store().await;
    for (id, title) in [
        ("1", "100% Orange Juice"),
        ("2", "1000 Orange Trees"),
        ("3", "snake_case"),
        ("4", "snakeXcase"),
    ] {
        store.create_subject(&anime_subject(id, title)).await.unwrap();
    }

    let titles = |needle: &str| {
        let filter = SubjectFilter {
            title_contains: Some(needle.to_string()),
            ..SubjectFilter::default()
        };
        let store = store.clone();
        async move {
            store
                .list_subjects(&filter)
                .await
                .unwrap()
                .into_iter()
                .map(|s| s.title)
                .collect::<Vec<_>>()
        }
    };

    assert_eq!(titles("100%").await, vec!["100% Orange Juice"]);
    assert_eq!(titles("e_c").await, vec!["snake_case"]);
    assert_eq!(titles("Orange").await.len(), 2);
}

#[tokio::test]
async fn test_delete_subject_cascades_without_orphans() {
    let store = spawn_store().await;
    let anime_repo = store.anime_repo();
    let (subject, _) = anime_repo
        .create(&anime_subject("400602", "Sousou no Frieren"), &AnimeDetail::default())
        .await
        .unwrap();

    let staff = anime_repo
        .upsert_staff(&NewAnimeStaff {
            profile: StaffProfile {
                name: "Keiichirou Saitou".to_string(),
                ..StaffProfile::default()
            },
            provenance: Provenance::new("bangumi", "p1"),
            ..NewAnimeStaff::default()
        })
        .await
        .unwrap();
    let role = store
        .lookups::<AnimeStaffRelationRole>()
        .upsert(&CodeName::new("director", "Director"))
        .await
        .unwrap();
    anime_repo
        .link_staff(subject.id, staff.id, role.id, "")
        .await
        .unwrap();

    let genre = store
        .lookups::<AnimeGenre>()
        .upsert(&CodeName::new("fantasy", "Fantasy"))
        .await
        .unwrap();
    anime_repo.link_genre(subject.id, genre.id).await.unwrap();
    anime_repo
        .upsert_episode(
            subject.id,
            &NewAnimeEpisode {
                title: "The Journey's End".to_string(),
                ep_num: Some(1),
                provenance: Provenance::new("bangumi", "ep1"),
                ..NewAnimeEpisode::default()
            },
        )
        .await
        .unwrap();
    store
        .upsert_status(subject.id, &StatusInput::new(Severity::Info, "ok"))
        .await
        .unwrap();
    store
        .enroll_pending(subject.id, "refresh", chrono::Utc::now())
        .await
        .unwrap();

    assert!(store.delete_subject(subject.id).await.unwrap());
    assert!(!store.delete_subject(subject.id).await.unwrap());

    assert!(anime_repo.get(subject.id).await.unwrap().is_none());
    assert!(anime_repo.staff(subject.id).await.unwrap().is_empty());
    assert!(anime_repo.genres(subject.id).await.unwrap().is_empty());
    assert!(anime_repo.episodes(subject.id).await.unwrap().is_empty());
    assert!(store.get_status(subject.id).await.unwrap().is_none());
    assert!(store.get_pending(subject.id).await.unwrap().is_none());

    // People and vocabularies outlive the subject.
    assert!(
        anime_repo
            .find_staff_by_source(&Provenance::new("bangumi", "p1"))
            .await
            .unwrap()
            .is_some()
    );
    assert!(store.lookups::<AnimeGenre>().delete("fantasy").await.unwrap());
}

#[tokio::test]
async fn test_upsert_anime_refreshes_both_rows() {
    let store = spawn_store().await;
    let mut subject = anime_subject("321", "Old");
    let (first, _) = store
        .anime_repo()
        .upsert(&subject, &AnimeDetail::default())
        .await
        .unwrap();

    subject.title = "New".to_string();
    let detail = AnimeDetail {
        anime_status: "finished".to_string(),
        ..AnimeDetail::default()
    };
    let (second, anime) = store.anime_repo().upsert(&subject, &detail).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.title, "New");
    assert_eq!(anime.anime_status, "finished");
}

#[tokio::test]
async fn test_store_opens_with_configured_pool() {
    let db_path =
        std::env::temp_dir().join(format!("noshiro-catalog-test-{}.db", uuid::Uuid::new_v4()));
    let general = GeneralConfig {
        database_path: format!("sqlite:{}", db_path.display()),
        max_db_connections: 3,
        min_db_connections: 1,
        ..GeneralConfig::default()
    };
    let store = Store::open(&general).await.unwrap();

    let pool = store.conn.get_sqlite_connection_pool();
    assert_eq!(pool.options().get_max_connections(), 3);
    assert_eq!(pool.options().get_min_connections(), 1);

    let row = store
        .conn
        .query_one(Statement::from_string(
            DbBackend::Sqlite,
            "PRAGMA journal_mode".to_string(),
        ))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.try_get::<String>("", "journal_mode").unwrap(), "wal");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_upserts_all_land() {
    let store = spawn_store().await;

    let mut tasks = JoinSet::new();
    for i in 0..16 {
        let store = store.clone();
        tasks.spawn(async move {
            let subject = anime_subject(&format!("c{i}"), &format!("Concurrent {i}"));
            let detail = AnimeDetail {
                ep_total: Some(i),
                ..AnimeDetail::default()
            };
            store.anime_repo().upsert(&subject, &detail).await
        });
    }
    while let Some(joined) = tasks.join_next().await {
        joined.unwrap().unwrap();
    }
    assert_eq!(store.count_subjects().await.unwrap(), 16);

    let mut tasks = JoinSet::new();
    for round in 0..8 {
        let store = store.clone();
        tasks.spawn(async move {
            store
                .upsert_subject(&anime_subject("c0", &format!("Round {round}")))
                .await
        });
    }
    let mut ids = HashSet::new();
    while let Some(joined) = tasks.join_next().await {
        ids.insert(joined.unwrap().unwrap().id);
    }
    assert_eq!(ids.len(), 1);
    assert_eq!(store.count_subjects().await.unwrap(), 16);

    let subject = store
        .find_subject_by_source(&Provenance::new("bangumi", "c0"))
        .await
        .unwrap()
        .unwrap();
    assert!(subject.title.starts_with("Round "));
}
