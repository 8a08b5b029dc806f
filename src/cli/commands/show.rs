use crate::config::Config;
use crate::db::Store;
use crate::models::subject::SubjectDetail;
use serde_json::Value;
use uuid::Uuid;

fn json_list(value: &Value) -> String {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|item| item.as_str().map_or_else(|| item.to_string(), str::to_string))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}

pub async fn cmd_show_subject(config: &Config, id: Uuid) -> anyhow::Result<()> {
    let store = Store::open(&config.general).await?;

    let Some((subject, detail)) = store.get_subject_with_detail(id).await? else {
        println!("Subject {id} not found.");
        return Ok(());
    };

    println!("{subject}");
    println!("{:-<70}", "");
    println!("ID:      {}", subject.id);
    println!("Source:  {}/{}", subject.info_source, subject.id_source);
    if subject.nsfw {
        println!("NSFW:    yes");
    }
    if !subject.description.is_empty() {
        println!();
        println!("{}", subject.description);
    }

    match detail {
        Some(SubjectDetail::Anime(anime)) => {
            let anime_repo = store.anime_repo();
            println!();
            println!(
                "Anime:   {} | {} | {} eps",
                anime.anime_type,
                anime.anime_status,
                anime.ep_total.map_or_else(|| "?".to_string(), |n| n.to_string())
            );
            let aliases = json_list(&anime.aliases);
            if !aliases.is_empty() {
                println!("Aliases: {aliases}");
            }

            let genres = anime_repo.genres(id).await?;
            if !genres.is_empty() {
                let names: Vec<_> = genres.iter().map(ToString::to_string).collect();
                println!("Genres:  {}", names.join(", "));
            }

            let staff = anime_repo.staff(id).await?;
            for credit in staff.iter().take(10) {
                println!("  {:<20} {}", credit.role.to_string(), credit.person.name);
            }

            let episodes = anime_repo.episodes(id).await?;
            println!("Episodes stored: {}", episodes.len());
        }
        Some(SubjectDetail::Galgame(galgame)) => {
            let galgame_repo = store.galgame_repo();
            println!();
            println!(
                "Galgame: {} | platforms: {}",
                galgame.galgame_status,
                json_list(&galgame.platforms)
            );

            let producers = galgame_repo.producers(id).await?;
            if !producers.is_empty() {
                let names: Vec<_> = producers.iter().map(|p| p.name.as_str()).collect();
                println!("Producers: {}", names.join(", "));
            }

            let characters = galgame_repo.characters(id).await?;
            for credit in characters.iter().take(10) {
                println!("  {:<20} {}", credit.role.to_string(), credit.person.name);
            }
        }
        None if subject.subject_type.has_detail_table() => {
            println!();
            println!("(no {} detail attached yet)", subject.subject_type);
        }
        None => {}
    }

    if let Some(status) = store.get_status(id).await? {
        println!();
        println!(
            "Status:  [{}] {}{}",
            status.severity,
            status.headline,
            if status.is_locked { " (locked)" } else { "" }
        );
    }

    if let Some(pending) = store.get_pending(id).await? {
        println!(
            "Next update: {} ({}, {} attempts)",
            pending.next_update_time.format("%Y-%m-%d %H:%M UTC"),
            pending.task_type,
            pending.attempt_count
        );
    }

    Ok(())
}
