use crate::error::ConfigError;
use crate::providers::{ModelType, ProviderType};
use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR_NAME: &str = ".govcon-admin";
pub const CONFIG_FILE_NAME: &str = "config.toml";

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding config.toml - computed, not serialized
    #[serde(skip)]
    pub config_dir: PathBuf,
    /// Path to config.toml - computed, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Admin backend serving the organization endpoints
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Bearer token for the admin backend
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "ProviderConfig::default_llm")]
    pub llm: ProviderConfig,

    #[serde(default = "ProviderConfig::default_embedding")]
    pub embedding: ProviderConfig,
}

fn default_api_base_url() -> String {
    "http://localhost:8080".into()
}

fn default_request_timeout_secs() -> u64 {
    30
}

// ── Model providers ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub provider_type: ProviderType,
    /// Endpoint; empty means the provider's default endpoint
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    /// Selected model; empty until one is picked
    #[serde(default)]
    pub model: Option<String>,
}

impl ProviderConfig {
    fn default_llm() -> Self {
        Self {
            provider_type: ProviderType::Ollama,
            url: ProviderType::Ollama.default_endpoint().into(),
            api_key: None,
            model: None,
        }
    }

    fn default_embedding() -> Self {
        Self::default_llm()
    }

    /// Endpoint to call: the configured URL or the provider default.
    pub fn endpoint(&self) -> &str {
        let url = self.url.trim();
        if url.is_empty() {
            self.provider_type.default_endpoint()
        } else {
            url
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let home =
            UserDirs::new().map_or_else(|| PathBuf::from("."), |u| u.home_dir().to_path_buf());
        let config_dir = home.join(CONFIG_DIR_NAME);

        Self {
            config_path: config_dir.join(CONFIG_FILE_NAME),
            config_dir,
            api_base_url: default_api_base_url(),
            api_token: None,
            request_timeout_secs: default_request_timeout_secs(),
            llm: ProviderConfig::default_llm(),
            embedding: ProviderConfig::default_embedding(),
        }
    }
}

fn validate_http_url(label: &str, value: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(value.trim())
        .map_err(|e| ConfigError::Validation(format!("{label} is not a valid URL: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::Validation(format!(
            "{label} must use http or https (got '{}')",
            parsed.scheme()
        )));
    }
    Ok(())
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load `~/.govcon-admin/config.toml`, creating it with defaults on
    /// first run.
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        Self::load_from(&home.join(CONFIG_DIR_NAME))
    }

    /// Load or create the config inside an explicit directory. Validation is
    /// left to the caller so environment overrides can apply first.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if !dir.exists() {
            fs::create_dir_all(dir).context("Failed to create config directory")?;
        }

        if config_path.exists() {
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).map_err(|e| ConfigError::Load(e.to_string()))?;
            config.config_path.clone_from(&config_path);
            config.config_dir = dir.to_path_buf();
            Ok(config)
        } else {
            let config = Self {
                config_path,
                config_dir: dir.to_path_buf(),
                ..Self::default()
            };
            config.validate()?;
            config.save()?;
            Ok(config)
        }
    }

    /// Apply environment variable overrides to config
    pub fn apply_env_overrides(&mut self) {
        if let Some(url) = env_non_empty("GOVCON_API_URL") {
            self.api_base_url = url;
        }
        if let Some(token) = env_non_empty("GOVCON_API_TOKEN") {
            self.api_token = Some(token);
        }
        if let Some(url) = env_non_empty("GOVCON_LLM_URL") {
            self.llm.url = url;
        }
        if let Some(key) = env_non_empty("GOVCON_LLM_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Some(url) = env_non_empty("GOVCON_EMBEDDING_URL") {
            self.embedding.url = url;
        }
        if let Some(key) = env_non_empty("GOVCON_EMBEDDING_API_KEY") {
            self.embedding.api_key = Some(key);
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_http_url("api_base_url", &self.api_base_url)?;
        validate_http_url("llm.url", self.llm.endpoint())?;
        validate_http_url("embedding.url", self.embedding.endpoint())?;
        if !(1..=600).contains(&self.request_timeout_secs) {
            return Err(ConfigError::Validation(
                "request_timeout_secs must be in [1, 600]".into(),
            )
            .into());
        }
        Ok(())
    }

    pub fn provider(&self, model_type: ModelType) -> &ProviderConfig {
        match model_type {
            ModelType::Llm => &self.llm,
            ModelType::Embedding => &self.embedding,
        }
    }

    pub fn provider_mut(&mut self, model_type: ModelType) -> &mut ProviderConfig {
        match model_type {
            ModelType::Llm => &mut self.llm,
            ModelType::Embedding => &mut self.embedding,
        }
    }

    /// Store a model selection for one kind in the on-disk config. The file
    /// is re-read so values that only came from the environment stay out of
    /// it. `url` and `api_key` replace the stored ones only when given;
    /// changing the provider type clears both.
    pub fn persist_selection(
        &self,
        model_type: ModelType,
        provider_type: ProviderType,
        url: Option<&str>,
        api_key: Option<&str>,
        model: Option<&str>,
    ) -> Result<Self> {
        let mut stored = Self::load_from(&self.config_dir)?;
        let entry = stored.provider_mut(model_type);
        if entry.provider_type != provider_type {
            entry.url.clear();
            entry.api_key = None;
        }
        entry.provider_type = provider_type;
        if let Some(url) = url {
            entry.url = url.to_string();
        }
        if let Some(key) = api_key {
            entry.api_key = Some(key.to_string());
        }
        entry.model = model.map(ToString::to_string);

        stored.validate()?;
        stored.save()?;
        Ok(stored)
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}
