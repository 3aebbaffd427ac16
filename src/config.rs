use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MimicConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub retrieval: RetrievalConfig,
    pub ingest: IngestConfig,
    pub search: SearchConfig,
    pub llm: LlmConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub transport: String,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub base_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RetrievalConfig {
    pub top_k: usize,
    pub max_context_chars: usize,
    pub min_partial_chars: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct IngestConfig {
    pub default_max_urls: usize,
    pub fetch_timeout_secs: u64,
    pub min_content_chars: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    pub serper_api_key: String,
    pub endpoint: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LlmConfig {
    pub anthropic_api_key: String,
    pub model: String,
    pub max_tokens: u32,
}

impl Default for MimicConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            retrieval: RetrievalConfig::default(),
            ingest: IngestConfig::default(),
            search: SearchConfig::default(),
            llm: LlmConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: "stdio".into(),
            host: "127.0.0.1".into(),
            port: 8378,
            log_level: "info".into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        let base_dir = default_mimic_dir()
            .join("knowledge")
            .to_string_lossy()
            .into_owned();
        Self { base_dir }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            max_context_chars: 4000,
            min_partial_chars: 500,
        }
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            default_max_urls: 3,
            fetch_timeout_secs: 15,
            min_content_chars: 100,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            serper_api_key: String::new(),
            endpoint: "https://google.serper.dev/search".into(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            anthropic_api_key: String::new(),
            model: "claude-sonnet-4-5".into(),
            max_tokens: 1024,
        }
    }
}

/// Returns `~/.mimic/`
pub fn default_mimic_dir() -> PathBuf {
    dirs::home_dir()
        .expect("home directory must exist")
        .join(".mimic")
}

/// Returns the default config file path: `~/.mimic/config.toml`
pub fn default_config_path() -> PathBuf {
    default_mimic_dir().join("config.toml")
}

impl MimicConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            MimicConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides. API keys are supplied per session
    /// rather than written into the config file, so they usually arrive here.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("MIMIC_BASE_DIR") {
            self.storage.base_dir = val;
        }
        if let Ok(val) = std::env::var("MIMIC_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("SERPER_API_KEY") {
            self.search.serper_api_key = val;
        }
        if let Ok(val) = std::env::var("ANTHROPIC_API_KEY") {
            self.llm.anthropic_api_key = val;
        }
    }

    /// Resolve the knowledge base directory, expanding `~` if needed.
    pub fn resolved_base_dir(&self) -> PathBuf {
        expand_tilde(&self.storage.base_dir)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir()
            .expect("home directory must exist")
            .join(rest)
    } else {
        PathBuf::from(path)
    }
}
