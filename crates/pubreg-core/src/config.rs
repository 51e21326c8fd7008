use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Root engine configuration, loaded from `~/.config/pubreg/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub search: SearchIndexConfig,
    pub registry: RegistryConfig,
    pub duplicates: DuplicateReportConfig,
    pub matching: MatchingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchIndexConfig {
    pub base_url: String,
    pub min_interval_ms: u64,
    pub max_retries: u32,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DuplicateReportConfig {
    pub root_dir: String,
    pub prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    pub title_similarity_threshold: f64,
}

// ─── Defaults ──────────────────────────────────────────────

impl Default for SearchIndexConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            min_interval_ms: 50,
            max_retries: 3,
            user_agent: "pubreg/0.1".to_string(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

impl Default for DuplicateReportConfig {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("pubreg")
            .join("reports");

        Self {
            root_dir: data_dir.to_string_lossy().to_string(),
            prefix: "DUPLICATES_DETECTED".to_string(),
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            title_similarity_threshold: 0.91,
        }
    }
}

// ─── Load / Save ───────────────────────────────────────────

impl EngineConfig {
    /// Standard config file path: `~/.config/pubreg/config.toml`
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("PUBREG_CONFIG") {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("pubreg")
            .join("config.toml")
    }

    /// Load config from disk, falling back to defaults if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        Self::load_from(&path)
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let threshold = self.matching.title_similarity_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(CoreError::ConfigError(format!(
                "matching.title_similarity_threshold must be within 0..=1, got {threshold}"
            )));
        }
        if self.duplicates.prefix.trim_matches('/').is_empty() {
            return Err(CoreError::ConfigError(
                "duplicates.prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Save config to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn duplicates_root(&self) -> PathBuf {
        PathBuf::from(&self.duplicates.root_dir)
    }
}
