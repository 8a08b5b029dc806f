use crate::config::Config;
use crate::db::Store;
use chrono::Utc;

pub async fn cmd_due(config: &Config, limit: u64) -> anyhow::Result<()> {
    let store = Store::open(&config.general).await?;
    let due = store.due_pending(Utc::now(), limit).await?;

    if due.is_empty() {
        println!("Nothing is due.");
        return Ok(());
    }

    println!("Due updates ({})", due.len());
    println!("{:-<70}", "");

    for pending in due {
        let title = store
            .get_subject(pending.subject_id)
            .await?
            .map_or_else(|| pending.subject_id.to_string(), |s| s.to_string());
        println!("• {title}");
        println!(
            "  Task: {} | Due: {} | Attempts: {}",
            pending.task_type,
            pending.next_update_time.format("%Y-%m-%d %H:%M"),
            pending.attempt_count
        );
        if !pending.latest_log.is_empty() {
            println!("  Last: {}", pending.latest_log);
        }
    }

    Ok(())
}
