pub mod cli;
pub mod clients;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod error;
pub mod models;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
pub use config::Config;
pub use db::Store;
pub use error::{CatalogError, CatalogResult};
use tracing_subscriber::EnvFilter;

fn init_tracing(log_level: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    config.validate()?;
    init_tracing(&config.general.log_level);

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Init => {
            if Config::create_default_if_missing()? {
                println!("✓ Config file created. Edit config.toml and run again.");
            } else {
                println!("config.toml already exists; left unchanged.");
            }
            Ok(())
        }
        Commands::Migrate => cli::cmd_migrate(&config).await,
        Commands::Fetch { source, id } => cli::cmd_fetch(&config, source, &id).await,
        Commands::List {
            subject_type,
            title,
            limit,
            offset,
            oldest_first,
        } => cli::cmd_list_subjects(&config, subject_type, title, limit, offset, oldest_first).await,
        Commands::Show { id } => cli::cmd_show_subject(&config, id).await,
        Commands::Remove { id, yes } => cli::cmd_remove_subject(&config, id, yes).await,
        Commands::Enroll {
            id,
            task_type,
            in_hours,
        } => cli::cmd_enroll(&config, id, task_type, in_hours).await,
        Commands::Due { limit } => cli::cmd_due(&config, limit).await,
        Commands::Status {
            severity,
            unresolved,
        } => cli::cmd_status(&config, severity, unresolved).await,
        Commands::Lock { id, unlock } => cli::cmd_lock_status(&config, id, unlock).await,
    }
}
