use crate::core::error::ChatError;
use crate::providers::{gemini, openai};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn default_true() -> bool {
    true
}

fn default_thinking_delay_ms() -> u64 {
    500
}

fn default_request_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Gemini,
    OpenAI,
}

impl Provider {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gemini" => Some(Provider::Gemini),
            "openai" => Some(Provider::OpenAI),
            _ => None,
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::Gemini => gemini::DEFAULT_BASE_URL,
            Provider::OpenAI => openai::DEFAULT_BASE_URL,
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::Gemini => gemini::DEFAULT_MODEL,
            Provider::OpenAI => openai::DEFAULT_MODEL,
        }
    }

    /// Environment variables consulted, in order, when the config has no key.
    pub fn api_key_env_vars(&self) -> &'static [&'static str] {
        match self {
            Provider::Gemini => &["GEMINI_API_KEY", "API_KEY"],
            Provider::OpenAI => &["OPENAI_API_KEY", "API_KEY"],
        }
    }

    /// Service name used in user-facing notes.
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Gemini => "Gemini",
            Provider::OpenAI => "OpenAI",
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

impl ProviderConfig {
    /// The configured key, else the first non-empty environment variable
    /// returned by `lookup`.
    pub fn resolve_api_key<F>(&self, provider: Provider, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                provider
                    .api_key_env_vars()
                    .iter()
                    .filter_map(|var| lookup(var))
                    .find(|key| !key.trim().is_empty())
            })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub active_provider: Option<Provider>,
    #[serde(default = "default_true")]
    pub show_logic: bool,
    /// Pause before the rule bot answers in interactive mode.
    #[serde(default = "default_thinking_delay_ms")]
    pub thinking_delay_ms: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub providers: HashMap<Provider, ProviderConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            active_provider: None,
            show_logic: true,
            thinking_delay_ms: default_thinking_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            providers: HashMap::new(),
        }
    }
}

impl Config {
    fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".chatlogic")
    }

    pub fn default_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    pub fn history_dir() -> PathBuf {
        Self::config_dir().join("history")
    }

    pub fn input_history_path() -> PathBuf {
        Self::config_dir().join("input_history.txt")
    }

    /// Loads the config at `path`, or the default location. A missing file is
    /// created with default values.
    pub fn load(path: Option<&Path>) -> Result<Config, ChatError> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_path);

        if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config = Self::parse(&contents)
                .map_err(|e| ChatError::Config(format!("Parse {}: {}", path.display(), e)))?;
            tracing::debug!("Loaded config from {}", path.display());
            return Ok(config);
        }

        let config = Config::default();
        if let Err(e) = config.save(&path) {
            tracing::warn!("Could not write default config to {}: {}", path.display(), e);
        }
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Config, ChatError> {
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yml::from_str::<Config>(contents)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ChatError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let yaml_content = serde_yml::to_string(self)?;
        fs::write(path, yaml_content)?;
        Ok(())
    }

    pub fn provider_config(&self, provider: Provider) -> ProviderConfig {
        self.providers.get(&provider).cloned().unwrap_or_default()
    }

    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
