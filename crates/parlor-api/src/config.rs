use config::{Config as ConfigLoader, ConfigError, Environment, File};
use parlor_chat::{ChatConfig, PollPolicy, DEFAULT_INSTRUCTIONS};
use parlor_llm::AssistantsConfig;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_DATABASE_URL: &str = "mongodb://localhost:27017/chatbot";
pub const DEFAULT_JWT_SECRET: &str = "your-secret-key";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub mongodb: MongoDbConfig,
    #[serde(default)]
    pub chat: ChatSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub auth: AuthConfig,

    // Secrets (from ENV only)
    #[serde(default = "default_database_url")]
    pub database_url: String,
    #[serde(default)]
    pub openai_api_key: String,
    #[serde(default)]
    pub openai_assistant_id: Option<String>,
    #[serde(default)]
    pub openai_base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Floor for the per-request timeout; stretched to cover the poll budget
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Allowed origin; `*` allows any, a comma-separated list allows several
    pub origin: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:3000".to_string(),
        }
    }
}

impl CorsConfig {
    pub fn origins(&self) -> Vec<String> {
        self.origin
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoDbConfig {
    pub enabled: bool,
    pub database: String,
    pub timeout_ms: u64,
}

impl Default for MongoDbConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            database: "chatbot".to_string(),
            timeout_ms: 3000,
        }
    }
}

/// Run polling and moderation settings
#[derive(Debug, Clone, Deserialize)]
pub struct ChatSettings {
    pub poll_interval_ms: u64,
    /// Maximum status reads per run; 0 waits until the run settles
    pub max_poll_attempts: u32,
    #[serde(default)]
    pub moderation_enabled: bool,
    #[serde(default)]
    pub instructions: Option<String>,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1000,
            max_poll_attempts: 120,
            moderation_enabled: false,
            instructions: None,
        }
    }
}

impl ChatSettings {
    pub fn poll_policy(&self) -> PollPolicy {
        PollPolicy::new()
            .with_interval(Duration::from_millis(self.poll_interval_ms))
            .with_max_attempts(self.max_poll_attempts)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Token signing settings, reserved for authenticated user ids
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
        }
    }
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    300
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            server: ServerConfig::default(),
            cors: CorsConfig::default(),
            mongodb: MongoDbConfig::default(),
            chat: ChatSettings::default(),
            logging: LoggingConfig::default(),
            auth: AuthConfig::default(),
            database_url: default_database_url(),
            openai_api_key: String::new(),
            openai_assistant_id: None,
            openai_base_url: None,
        }
    }
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. PARLOR_* variables, `__` separating sections (PARLOR_CHAT__POLL_INTERVAL_MS)
    /// 4. Flat variables: PORT, ENV, DATABASE_URL, OPENAI_*, JWT_SECRET, CORS_ORIGIN
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| default_environment());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("PARLOR")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut cfg: Config = builder.build()?.try_deserialize()?;
        cfg.apply_env(|key| std::env::var(key).ok())?;

        if cfg.openai_api_key.is_empty() {
            return Err(ConfigError::Message(
                "OPENAI_API_KEY environment variable is required".to_string(),
            ));
        }

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));

        builder.build()?.try_deserialize()
    }

    /// Overlay the flat environment variables the service has always read
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::Message(format!("Invalid PORT value: {}", port)))?;
        }
        if let Some(env) = lookup("ENV") {
            self.environment = env;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database_url = url;
        }
        if let Some(key) = lookup("OPENAI_API_KEY") {
            self.openai_api_key = key;
        }
        if let Some(id) = lookup("OPENAI_ASSISTANT_ID") {
            self.openai_assistant_id = Some(id);
        }
        if let Some(url) = lookup("OPENAI_BASE_URL") {
            self.openai_base_url = Some(url);
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(origin) = lookup("CORS_ORIGIN") {
            self.cors.origin = origin;
        }

        Ok(())
    }

    pub fn is_development(&self) -> bool {
        matches!(self.environment.as_str(), "development" | "dev")
    }

    pub fn uses_default_jwt_secret(&self) -> bool {
        self.auth.jwt_secret == DEFAULT_JWT_SECRET
    }

    pub fn assistants_config(&self) -> AssistantsConfig {
        let config = AssistantsConfig::new(self.openai_api_key.clone());
        match &self.openai_base_url {
            Some(url) => config.with_base_url(url.clone()),
            None => config,
        }
    }

    pub fn chat_config(&self) -> ChatConfig {
        let instructions = self
            .chat
            .instructions
            .clone()
            .unwrap_or_else(|| DEFAULT_INSTRUCTIONS.to_string());

        ChatConfig::new(self.openai_assistant_id.clone().unwrap_or_default())
            .with_instructions(instructions)
            .with_poll(self.chat.poll_policy())
            .with_moderation(self.chat.moderation_enabled)
    }
}
