use anyhow::Context;
use noshiro::{Config, run};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Only the runtime shape is read here; `run` loads and validates the rest.
    let worker_threads = Config::load()
        .context("Failed to load configuration")?
        .general
        .worker_threads;

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all().thread_name("noshiro-worker");
    if worker_threads > 0 {
        builder.worker_threads(worker_threads);
    }

    builder
        .build()
        .context("Failed to start async runtime")?
        .block_on(run())
}
