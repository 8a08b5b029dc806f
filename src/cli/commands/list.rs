//! List subjects command handler

use crate::config::Config;
use crate::db::Store;
use crate::domain::{SortOrder, SubjectType};
use crate::models::subject::SubjectFilter;

pub async fn cmd_list_subjects(
    config: &Config,
    subject_type: Option<SubjectType>,
    title: Option<String>,
    limit: u64,
    offset: u64,
    oldest_first: bool,
) -> anyhow::Result<()> {
    let store = Store::open(&config.general).await?;
    let filter = SubjectFilter {
        subject_type,
        title_contains: title,
        nsfw: None,
        date_order: if oldest_first {
            SortOrder::Ascending
        } else {
            SortOrder::Descending
        },
        offset,
        limit: Some(limit),
    };

    let subjects = store.list_subjects(&filter).await?;
    if subjects.is_empty() {
        println!("No subjects found.");
        return Ok(());
    }

    let total = store.count_subjects().await?;
    println!("Subjects ({} of {} total)", subjects.len(), total);
    println!("{:-<70}", "");

    for subject in subjects {
        let marker = if subject.nsfw { "🔞" } else { "•" };
        println!("{marker} {subject}");
        println!(
            "  ID: {} | Source: {}/{}",
            subject.id, subject.info_source, subject.id_source
        );
    }

    Ok(())
}
