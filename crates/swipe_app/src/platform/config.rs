use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use feed_engine::FetchSettings;
use serde::{Deserialize, Serialize};
use swipe_core::PagerConfig;

use super::cli::Cli;

pub const API_URL_ENV: &str = "SWIPEFEED_API_URL";

/// Effective settings: RON file, then environment, then command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: String,
    pub sync_before_fetch: bool,
    pub batch_size: usize,
    pub visibility_threshold: f32,
    pub load_delay_ms: u64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_body_bytes: u64,
    pub state_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let pager = PagerConfig::default();
        let fetch = FetchSettings::default();
        Self {
            api_url: fetch.base_url,
            sync_before_fetch: true,
            batch_size: pager.batch_size,
            visibility_threshold: pager.visibility_threshold,
            load_delay_ms: pager.load_delay.as_millis() as u64,
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_body_bytes: fetch.max_bytes,
            state_dir: PathBuf::from(".swipefeed"),
        }
    }
}

impl AppConfig {
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = Self::from_file(&cli.config)?;
        config.apply_env(|key| std::env::var(key).ok());
        config.apply_cli(cli);
        Ok(config)
    }

    /// Reads `path`. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => ron::from_str(&text)
                .with_context(|| format!("invalid config file {}", path.display())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => {
                Err(err).with_context(|| format!("cannot read config file {}", path.display()))
            }
        }
    }

    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|url| !url.trim().is_empty()) {
            self.api_url = url;
        }
    }

    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(url) = &cli.api_url {
            self.api_url = url.clone();
        }
        if let Some(batch_size) = cli.batch_size {
            self.batch_size = batch_size;
        }
        if let Some(delay) = cli.load_delay_ms {
            self.load_delay_ms = delay;
        }
        if cli.no_sync {
            self.sync_before_fetch = false;
        }
        if let Some(dir) = &cli.state_dir {
            self.state_dir = dir.clone();
        }
    }

    pub fn pager_config(&self) -> PagerConfig {
        PagerConfig {
            batch_size: self.batch_size,
            visibility_threshold: self.visibility_threshold,
            load_delay: Duration::from_millis(self.load_delay_ms),
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            base_url: self.api_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_body_bytes,
            sync_before_fetch: self.sync_before_fetch,
            ..FetchSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use tempfile::TempDir;

    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("swipefeed").chain(args.iter().copied()))
    }

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = AppConfig::from_file(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api_url, "http://localhost:8096");
        assert_eq!(config.batch_size, 5);
        assert_eq!(config.load_delay_ms, 600);
        assert!(config.sync_before_fetch);
    }

    #[test]
    fn file_fields_override_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("swipefeed.ron");
        fs::write(&path, r#"(api_url: "http://jobs.internal:9000", batch_size: 3)"#).unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.api_url, "http://jobs.internal:9000");
        assert_eq!(config.batch_size, 3);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("swipefeed.ron");
        fs::write(&path, "(batch_size: \"many\")").unwrap();
        assert!(AppConfig::from_file(&path).is_err());
    }

    #[test]
    fn cli_wins_over_env() {
        let mut config = AppConfig::default();
        config.apply_env(|key| (key == API_URL_ENV).then(|| "http://from-env".to_string()));
        assert_eq!(config.api_url, "http://from-env");

        config.apply_cli(&cli(&["--api-url", "http://from-cli", "--batch-size", "2"]));
        assert_eq!(config.api_url, "http://from-cli");
        assert_eq!(config.batch_size, 2);
        assert!(config.fetch_settings().sync_before_fetch);

        config.apply_cli(&cli(&["--no-sync"]));
        assert!(!config.fetch_settings().sync_before_fetch);
    }

    #[test]
    fn blank_env_value_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_env(|_| Some("  ".to_string()));
        assert_eq!(config.api_url, "http://localhost:8096");
    }

    #[test]
    fn derived_settings_carry_values() {
        let config = AppConfig {
            load_delay_ms: 50,
            max_body_bytes: 1024,
            ..AppConfig::default()
        };
        assert_eq!(config.pager_config().load_delay, Duration::from_millis(50));
        assert_eq!(config.fetch_settings().max_bytes, 1024);
        assert_eq!(
            config.fetch_settings().allowed_content_types,
            vec!["application/json".to_string()]
        );
    }
}
