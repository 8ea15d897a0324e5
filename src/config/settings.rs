//! Application settings and configuration structures.

use std::collections::{HashMap, HashSet};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::domain::{TransitionRules, User};
use crate::infrastructure::repositories::StaticUserDirectory;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Current environment (development, staging, production)
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Server configuration (host, port)
    #[serde(default)]
    pub server: ServerSettings,

    /// HTTP basic authentication
    #[serde(default)]
    pub auth: AuthSettings,

    /// Rate limiting configuration
    #[serde(default)]
    pub rate_limit: RateLimitSettings,

    /// Where message events are published
    #[serde(default)]
    pub publisher: PublisherSettings,

    /// The closed set of users allowed to chat
    #[serde(default = "default_users")]
    pub users: Vec<User>,

    /// Allowed status changes, keyed by current status name
    #[serde(default = "default_transitions")]
    pub transitions: HashMap<String, Vec<String>>,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,
}

/// HTTP basic authentication configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthSettings {
    /// Require credentials on API routes
    pub enabled: bool,

    pub username: String,

    pub password: String,
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitSettings {
    pub enabled: bool,

    /// Maximum requests per client per one-minute window
    pub requests_per_minute: u32,
}

/// Event publisher backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublisherBackend {
    /// Write events to the log only
    #[default]
    Log,
    /// `PUBLISH` events on a Redis channel
    Redis,
}

/// Event publisher configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PublisherSettings {
    #[serde(default)]
    pub backend: PublisherBackend,

    /// Redis connection URL, required by the redis backend
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Channel events are published on
    #[serde(default = "default_channel")]
    pub channel: String,
}

fn default_environment() -> String {
    "development".into()
}

fn default_channel() -> String {
    "messages".into()
}

fn default_users() -> Vec<User> {
    vec![
        User::new(1, "Red"),
        User::new(2, "Jrue"),
        User::new(3, "Miro"),
        User::new(4, "Joann"),
    ]
}

fn default_transitions() -> HashMap<String, Vec<String>> {
    TransitionRules::default().to_names()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: default_environment(),
            server: ServerSettings::default(),
            auth: AuthSettings::default(),
            rate_limit: RateLimitSettings::default(),
            publisher: PublisherSettings::default(),
            users: default_users(),
            transitions: default_transitions(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
        }
    }
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            requests_per_minute: 60,
        }
    }
}

impl Default for PublisherSettings {
    fn default() -> Self {
        Self {
            backend: PublisherBackend::Log,
            redis_url: None,
            channel: default_channel(),
        }
    }
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. Built-in defaults
    /// 2. config/default.toml (base configuration)
    /// 3. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 4. `APP__SECTION__KEY` environment variables
    /// 5. `HTTP_PORT`, `REDIS_URL`, `AUTH_USERNAME`, `AUTH_PASSWORD`, `RATE_LIMIT`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed, or if
    /// it fails [`Settings::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| default_environment());

        let settings: Self = Config::builder()
            .set_default("environment", environment.clone())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("auth.enabled", true)?
            .set_default("auth.username", "")?
            .set_default("auth.password", "")?
            .set_default("rate_limit.enabled", false)?
            .set_default("rate_limit.requests_per_minute", 60)?
            .set_default("publisher.backend", "log")?
            .set_default("publisher.channel", default_channel())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // APP__SERVER__PORT=8080 -> server.port = 8080
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", std::env::var("HTTP_PORT").ok())?
            .set_override_option("publisher.redis_url", std::env::var("REDIS_URL").ok())?
            .set_override_option("auth.username", std::env::var("AUTH_USERNAME").ok())?
            .set_override_option("auth.password", std::env::var("AUTH_PASSWORD").ok())?
            .set_override_option(
                "rate_limit.requests_per_minute",
                std::env::var("RATE_LIMIT").ok(),
            )?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Check cross-field constraints the deserializer cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.enabled && (self.auth.username.is_empty() || self.auth.password.is_empty()) {
            return Err(ConfigError::Message(
                "auth.username and auth.password are required when auth is enabled".into(),
            ));
        }

        if self.rate_limit.enabled && self.rate_limit.requests_per_minute == 0 {
            return Err(ConfigError::Message(
                "rate_limit.requests_per_minute must be positive".into(),
            ));
        }

        if self.publisher.backend == PublisherBackend::Redis && self.publisher.redis_url.is_none() {
            return Err(ConfigError::Message(
                "publisher.redis_url is required for the redis backend".into(),
            ));
        }

        let mut seen = HashSet::new();
        if let Some(user) = self.users.iter().find(|u| !seen.insert(u.id)) {
            return Err(ConfigError::Message(format!(
                "duplicate user id {} in users",
                user.id
            )));
        }

        self.transition_rules()?;
        Ok(())
    }

    /// The configured status transition graph.
    pub fn transition_rules(&self) -> Result<TransitionRules, ConfigError> {
        TransitionRules::from_names(&self.transitions)
            .map_err(|e| ConfigError::Message(format!("transitions: {}", e)))
    }

    /// The configured user set.
    pub fn user_directory(&self) -> StaticUserDirectory {
        StaticUserDirectory::new(self.users.iter().cloned())
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
