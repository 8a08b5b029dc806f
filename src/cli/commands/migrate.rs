use crate::config::Config;
use crate::db::Store;

pub async fn cmd_migrate(config: &Config) -> anyhow::Result<()> {
    let store = Store::open(&config.general).await?;
    let applied = store.applied_migrations().await?;

    println!("Database: {}", config.general.database_path);
    println!("Applied migrations ({}):", applied.len());
    for name in applied {
        println!("  ✓ {name}");
    }

    Ok(())
}
