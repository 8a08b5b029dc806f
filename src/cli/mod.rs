//! Operator command line for inspecting and maintaining the catalog.

mod commands;

use crate::domain::{Severity, SubjectType};
use clap::{Parser, Subcommand, ValueEnum};
use uuid::Uuid;

/// Noshiro - unified media catalog
/// Anime, visual novels and friends in one SQLite store
#[derive(Parser)]
#[command(name = "noshiro")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Source {
    Bangumi,
    Mal,
    Jikan,
    Vndb,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create default config file
    #[command(alias = "--init")]
    Init,

    /// Apply pending schema migrations
    Migrate,

    /// Fetch a raw document from an external catalog
    #[command(alias = "f")]
    Fetch {
        source: Source,
        /// Id in the source's own scheme (e.g. 400602, v17)
        id: String,
    },

    /// List catalog subjects
    #[command(alias = "ls", alias = "l")]
    List {
        #[arg(long = "type")]
        subject_type: Option<SubjectType>,
        /// Only titles containing this text
        #[arg(long)]
        title: Option<String>,
        #[arg(long, default_value = "20")]
        limit: u64,
        #[arg(long, default_value = "0")]
        offset: u64,
        /// Oldest release first
        #[arg(long)]
        oldest_first: bool,
    },

    /// Show a subject with its detail, status and schedule
    #[command(alias = "i")]
    Show { id: Uuid },

    /// Delete a subject and everything attached to it
    #[command(alias = "rm")]
    Remove {
        id: Uuid,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Schedule a subject for re-sync
    Enroll {
        id: Uuid,
        #[arg(long)]
        task_type: Option<String>,
        /// Hours until first due; defaults to sync.default_refresh_hours
        #[arg(long)]
        in_hours: Option<u32>,
    },

    /// Show pending updates that are due now
    Due {
        #[arg(default_value = "20")]
        limit: u64,
    },

    /// List subject statuses
    Status {
        #[arg(long)]
        severity: Option<Severity>,
        #[arg(long)]
        unresolved: bool,
    },

    /// Lock or unlock a subject status against automated writes
    Lock {
        id: Uuid,
        #[arg(long)]
        unlock: bool,
    },
}

pub use commands::*;
