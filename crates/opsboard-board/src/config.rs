/*
[INPUT]:  YAML configuration file and OPSBOARD__* environment variables
[OUTPUT]: Validated board configuration
[POS]:    Configuration layer - api, board and logging settings
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use config::{Config, Environment, File, FileFormat};
use opsboard_adapter::ClientConfig;
use serde::{Deserialize, Serialize};
use url::Url;

const ENV_PREFIX: &str = "OPSBOARD";

/// Top-level configuration for the board
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BoardConfig {
    /// Backend connection
    pub api: ApiConfig,
    /// Board behaviour
    #[serde(default)]
    pub board: BoardSettings,
    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the task service (e.g., "http://localhost:8000")
    pub base_url: String,
    /// Bearer token sent with every request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BoardSettings {
    /// Only show tasks from this project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    /// How many UI ticks a toast stays visible
    #[serde(default = "default_toast_ticks")]
    pub toast_ticks: u32,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            project_id: None,
            refresh_interval_secs: default_refresh_interval_secs(),
            toast_ticks: default_toast_ticks(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for the daily rolling log file; no file log when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
            file_prefix: default_file_prefix(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_refresh_interval_secs() -> u64 {
    15
}

fn default_toast_ticks() -> u32 {
    16
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_file_prefix() -> String {
    "opsboard.log".to_string()
}

/// `<config_dir>/opsboard/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("opsboard").join("config.yaml"))
}

impl BoardConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
                token: None,
                timeout_secs: default_timeout_secs(),
                connect_timeout_secs: default_connect_timeout_secs(),
            },
            board: BoardSettings::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Load configuration from an explicit YAML file or the default location,
    /// with environment overrides layered on top.
    ///
    /// An explicit path must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path).format(FileFormat::Yaml).required(true));
            }
            None => {
                if let Some(default_path) = default_config_path() {
                    builder = builder.add_source(
                        File::from(default_path)
                            .format(FileFormat::Yaml)
                            .required(false),
                    );
                }
            }
        }
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder
            .build()
            .context("read configuration sources")?
            .try_deserialize()
            .context("parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from YAML file only
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content).context("parse config YAML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            bail!("api.base_url must not be empty");
        }
        let url = Url::parse(base_url).with_context(|| format!("invalid api.base_url {base_url}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("api.base_url must use http or https, got {}", url.scheme());
        }
        if self.api.timeout_secs == 0 {
            bail!("api.timeout_secs must be greater than zero");
        }
        if self.board.refresh_interval_secs == 0 {
            bail!("board.refresh_interval_secs must be greater than zero");
        }
        if self.board.toast_ticks == 0 {
            bail!("board.toast_ticks must be greater than zero");
        }
        Ok(())
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("serialize config to YAML")
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.api.timeout_secs),
            connect_timeout: Duration::from_secs(self.api.connect_timeout_secs),
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.board.refresh_interval_secs)
    }
}
