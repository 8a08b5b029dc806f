use crate::cli::Source;
use crate::clients::{self, BangumiClient, Collector, JikanClient, MalClient, VndbClient};
use crate::config::Config;
use anyhow::Context;

pub async fn cmd_fetch(config: &Config, source: Source, id: &str) -> anyhow::Result<()> {
    let settings = &config.collectors;
    let http = clients::http_client(settings)?;

    let collector: Box<dyn Collector> = match source {
        Source::Bangumi => Box::new(BangumiClient::new(
            http,
            &settings.bangumi.base_url,
            settings.bangumi.resolved_token(),
        )),
        Source::Mal => {
            let client_id = settings
                .mal
                .resolved_client_id()
                .context("MAL requires collectors.mal.client_id or MAL_CLIENT_ID")?;
            Box::new(MalClient::new(http, &settings.mal.base_url, client_id))
        }
        Source::Jikan => Box::new(JikanClient::new(http, &settings.jikan.base_url)),
        Source::Vndb => Box::new(VndbClient::new(http, &settings.vndb.base_url)),
    };

    let document = collector
        .fetch(id)
        .await
        .with_context(|| format!("Failed to fetch {} {}", collector.service(), id))?;

    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
