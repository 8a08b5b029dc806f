use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

pub const BANGUMI_TOKEN_ENV: &str = "BGM_API_TOKEN";
pub const MAL_CLIENT_ID_ENV: &str = "MAL_CLIENT_ID";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub collectors: CollectorsConfig,

    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// SeaORM connection string, e.g. `sqlite:data/noshiro.db`.
    pub database_path: String,

    /// Default tracing filter. `RUST_LOG` takes precedence.
    pub log_level: String,

    pub worker_threads: usize,

    pub max_db_connections: u32,

    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/noshiro.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorsConfig {
    pub user_agent: String,

    pub timeout_seconds: u64,

    pub bangumi: BangumiConfig,

    pub mal: MalConfig,

    pub jikan: JikanConfig,

    pub vndb: VndbConfig,
}

impl Default for CollectorsConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("noshiro/", env!("CARGO_PKG_VERSION"), " (catalog collector)")
                .to_string(),
            timeout_seconds: 30,
            bangumi: BangumiConfig::default(),
            mal: MalConfig::default(),
            jikan: JikanConfig::default(),
            vndb: VndbConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BangumiConfig {
    pub base_url: String,

    /// Personal access token. Falls back to `BGM_API_TOKEN`.
    pub token: Option<String>,
}

impl Default for BangumiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.bgm.tv/v0".to_string(),
            token: None,
        }
    }
}

impl BangumiConfig {
    #[must_use]
    pub fn resolved_token(&self) -> Option<String> {
        non_empty(self.token.clone()).or_else(|| non_empty(std::env::var(BANGUMI_TOKEN_ENV).ok()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MalConfig {
    pub base_url: String,

    /// Falls back to `MAL_CLIENT_ID`.
    pub client_id: Option<String>,
}

impl Default for MalConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.myanimelist.net/v2".to_string(),
            client_id: None,
        }
    }
}

impl MalConfig {
    #[must_use]
    pub fn resolved_client_id(&self) -> Option<String> {
        non_empty(self.client_id.clone())
            .or_else(|| non_empty(std::env::var(MAL_CLIENT_ID_ENV).ok()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JikanConfig {
    pub base_url: String,
}

impl Default for JikanConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.jikan.moe/v4".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VndbConfig {
    pub base_url: String,
}

impl Default for VndbConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.vndb.org/kana".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Delay before a newly enrolled subject is first due.
    pub default_refresh_hours: u32,

    pub default_task_type: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            default_refresh_hours: 24,
            default_task_type: "refresh".to_string(),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("noshiro").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".noshiro").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            Self::default().save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.database_path.trim().is_empty() {
            anyhow::bail!("general.database_path cannot be empty");
        }

        if self.general.min_db_connections > self.general.max_db_connections {
            anyhow::bail!(
                "general.min_db_connections ({}) exceeds max_db_connections ({})",
                self.general.min_db_connections,
                self.general.max_db_connections
            );
        }

        if self.collectors.timeout_seconds == 0 {
            anyhow::bail!("collectors.timeout_seconds must be > 0");
        }

        for (name, url) in [
            ("bangumi", &self.collectors.bangumi.base_url),
            ("mal", &self.collectors.mal.base_url),
            ("jikan", &self.collectors.jikan.base_url),
            ("vndb", &self.collectors.vndb.base_url),
        ] {
            url::Url::parse(url)
                .with_context(|| format!("collectors.{name}.base_url is not a valid URL"))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.database_path, "sqlite:data/noshiro.db");
        assert_eq!(config.collectors.bangumi.base_url, "https://api.bgm.tv/v0");
        assert_eq!(config.sync.default_refresh_hours, 24);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[collectors.bangumi]"));
        assert!(toml_str.contains("[sync]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [collectors]
            timeout_seconds = 5

            [collectors.bangumi]
            token = "secret"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.collectors.timeout_seconds, 5);
        assert_eq!(
            config.collectors.bangumi.resolved_token().as_deref(),
            Some("secret")
        );
        assert_eq!(config.collectors.vndb.base_url, "https://api.vndb.org/kana");
    }

    #[test]
    fn test_validate_rejects_zero_timeout_and_bad_pool() {
        let mut config = Config::default();
        config.collectors.timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.general.min_db_connections = 10;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.collectors.jikan.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = std::env::temp_dir().join(format!("noshiro-config-{}.toml", uuid::Uuid::new_v4()));
        let mut config = Config::default();
        config.sync.default_task_type = "resync".to_string();

        config.save_to_path(&path).unwrap();
        let loaded = Config::load_from_path(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.sync.default_task_type, "resync");
    }
}
