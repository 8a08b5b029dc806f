use crate::config::Config;
use crate::db::Store;
use crate::domain::Severity;
use uuid::Uuid;

pub async fn cmd_status(
    config: &Config,
    severity: Option<Severity>,
    unresolved_only: bool,
) -> anyhow::Result<()> {
    let store = Store::open(&config.general).await?;
    let statuses = store.list_statuses(severity, unresolved_only).await?;

    if statuses.is_empty() {
        println!("No statuses recorded.");
        return Ok(());
    }

    println!("Subject statuses ({})", statuses.len());
    println!("{:-<70}", "");

    for status in statuses {
        let indicator = match status.severity {
            Severity::Error => "✗",
            Severity::Warning => "!",
            Severity::Info => "•",
        };
        let mut flags = Vec::new();
        if status.is_resolved {
            flags.push("resolved");
        }
        if status.is_locked {
            flags.push("locked");
        }

        println!("{indicator} [{}] {}", status.severity, status.headline);
        println!("  Subject: {}", status.subject_id);
        if !flags.is_empty() {
            println!("  Flags: {}", flags.join(", "));
        }
        if !status.detail.is_empty() {
            println!("  {}", status.detail);
        }
    }

    Ok(())
}

pub async fn cmd_lock_status(config: &Config, id: Uuid, unlock: bool) -> anyhow::Result<()> {
    let store = Store::open(&config.general).await?;
    let status = store.set_status_locked(id, !unlock).await?;

    println!("✓ {status}");
    if status.is_locked {
        println!("  Automated passes will leave this status alone.");
    }
    Ok(())
}
