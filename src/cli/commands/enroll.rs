use crate::config::Config;
use crate::db::Store;
use anyhow::Context;
use chrono::{Duration, Utc};
use uuid::Uuid;

pub async fn cmd_enroll(
    config: &Config,
    id: Uuid,
    task_type: Option<String>,
    in_hours: Option<u32>,
) -> anyhow::Result<()> {
    let store = Store::open(&config.general).await?;
    let task_type = task_type.unwrap_or_else(|| config.sync.default_task_type.clone());
    let hours = in_hours.unwrap_or(config.sync.default_refresh_hours);
    let due = Utc::now() + Duration::hours(i64::from(hours));

    let pending = store
        .enroll_pending(id, &task_type, due)
        .await
        .with_context(|| format!("Failed to enroll subject {id}"))?;

    println!(
        "✓ Enrolled {} for '{}', due {}",
        pending.subject_id,
        pending.task_type,
        pending.next_update_time.format("%Y-%m-%d %H:%M UTC")
    );
    Ok(())
}
