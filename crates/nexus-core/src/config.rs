use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

// Upstream request constants: sent on every call, never taken from the client
pub const UPSTREAM_MODEL: &str = "LongCat-Flash-Thinking";
pub const MAX_TOKENS: u32 = 4096; // room for both thinking and answer
pub const ENABLE_THINKING: bool = true;
pub const THINKING_BUDGET: u32 = 1024; // hard cap on the thinking part
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.longcat.chat/openai/v1/chat/completions";

/// Environment variable holding the upstream API key.
pub const API_KEY_ENV: &str = "LONGCAT_API_KEY";

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BIND: &str = "127.0.0.1";

/// Top-level config (nexus.toml + NEXUS_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NexusConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

/// Where chat requests are relayed to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Full chat-completions URL.
    #[serde(default = "default_upstream_url")]
    pub url: String,
    /// Bearer token. Not validated at startup: a missing key only shows up
    /// as an authentication failure on the first relayed request.
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: default_upstream_url(),
            api_key: None,
        }
    }
}

impl UpstreamConfig {
    /// The key to put in the Authorization header. Empty when unset.
    pub fn bearer_token(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_upstream_url() -> String {
    DEFAULT_UPSTREAM_URL.to_string()
}

impl NexusConfig {
    /// Load config from a TOML file with NEXUS_* env var overrides.
    ///
    /// Checks in order:
    ///   1. Explicit path argument
    ///   2. ~/.nexus/nexus.toml
    ///
    /// A missing file is not an error; every field has a default.
    /// Nested keys use a double underscore, e.g. `NEXUS_GATEWAY__PORT=8080`.
    /// When no layer sets `upstream.api_key`, `LONGCAT_API_KEY` is used.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path
            .map(String::from)
            .unwrap_or_else(default_config_path);
        tracing::debug!(path = %path, "loading config");

        let config: NexusConfig = Figment::new()
            .merge(Toml::file(&path))
            .merge(Env::prefixed("NEXUS_").split("__"))
            .extract()
            .map_err(|e| crate::error::NexusError::Config(e.to_string()))?;

        Ok(config.with_env_key())
    }

    /// Like [`load`](Self::load), but a bad file or env layer falls back to
    /// defaults. `LONGCAT_API_KEY` still applies on that path.
    pub fn load_or_default(config_path: Option<&str>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            tracing::warn!(code = e.code(), "Config load failed ({}), using defaults", e);
            Self::default().with_env_key()
        })
    }

    /// Fill `upstream.api_key` from `LONGCAT_API_KEY` if nothing set it.
    /// An empty variable counts as unset.
    pub fn with_env_key(mut self) -> Self {
        if self.upstream.api_key.is_none() {
            self.upstream.api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        }
        self
    }
}

fn default_config_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.nexus/nexus.toml", home)
}
