use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use smartspend_finance::{LlmConfig, Provider};
use smartspend_ingest::StatementProfile;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::state::state_file;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub llm: LlmSection,
    pub profile: StatementProfile,
    pub export: ExportSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSection {
    pub provider: Provider,
    /// Defaults to the provider's model when unset
    pub model: Option<String>,
    /// Defaults to the provider's public API when unset
    pub base_url: Option<String>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// Keyword for the filtered subset (matched against particulars)
    pub filter_keyword: String,
    pub transactions_csv: PathBuf,
    pub filtered_csv: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// tracing EnvFilter directive used when RUST_LOG is unset
    pub level: String,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            provider: Provider::Gemini,
            model: None,
            base_url: None,
            temperature: 0.4,
            max_tokens: 1024,
            timeout_secs: 60,
        }
    }
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            filter_keyword: "UPI".to_string(),
            transactions_csv: PathBuf::from("transactions.csv"),
            filtered_csv: PathBuf::from("upi_transactions.csv"),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LlmSection {
    /// Explicit client configuration for the summarization collaborator.
    pub fn to_llm_config(&self, provider: Provider, api_key: Option<String>) -> LlmConfig {
        let mut cfg = LlmConfig::new(provider);
        // model/base_url in the file belong to the configured provider only
        if provider == self.provider {
            if let Some(model) = &self.model {
                cfg.model = model.clone();
            }
            if let Some(base_url) = &self.base_url {
                cfg.base_url = base_url.clone();
            }
        }
        cfg.temperature = self.temperature;
        cfg.max_tokens = self.max_tokens;
        cfg.timeout = Duration::from_secs(self.timeout_secs);
        cfg.api_key = api_key;
        cfg
    }
}

pub fn config_path() -> Result<PathBuf> {
    state_file("config.toml")
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
