//! Application configuration.

use serde::Deserialize;
use std::path::Path;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Admin authentication configuration.
    pub auth: AuthConfig,
    /// Web Push (VAPID) configuration.
    #[serde(default)]
    pub push: PushConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Comma-separated origins allowed for CORS. Empty disables the CORS
    /// layer entirely.
    #[serde(default)]
    pub cors_origins: String,
    /// Directory of static frontend files, served with an SPA fallback to
    /// its `index.html`. Unset disables static serving.
    #[serde(default)]
    pub public_dir: Option<String>,
}

impl ServerConfig {
    /// Parsed CORS origin list.
    #[must_use]
    pub fn cors_origin_list(&self) -> Vec<String> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    }
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Admin authentication configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret used to sign admin session tokens (HS256).
    pub jwt_secret: String,
    /// Session token lifetime in minutes.
    #[serde(default = "default_token_expire_minutes")]
    pub token_expire_minutes: i64,
}

/// VAPID key pair for Web Push.
///
/// Leaving both keys empty disables push notifications; subscriptions are
/// still persisted but nothing is sent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushConfig {
    /// Public key, handed verbatim to push services and browsers.
    #[serde(default)]
    pub vapid_public_key: String,
    /// Private key: PEM-encoded EC key, or a url-safe base64 32-byte seed.
    #[serde(default)]
    pub vapid_private_key: String,
}

impl PushConfig {
    /// Whether a VAPID key pair is present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.vapid_public_key.is_empty() && !self.vapid_private_key.is_empty()
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

const fn default_max_connections() -> u32 {
    20
}

const fn default_min_connections() -> u32 {
    2
}

const fn default_token_expire_minutes() -> i64 {
    720
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `SUGGESTBOX_ENV`)
    /// 3. Environment variables with `SUGGESTBOX_` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        let env = std::env::var("SUGGESTBOX_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("SUGGESTBOX")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("SUGGESTBOX")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .and_then(config::Config::try_deserialize)
            .expect("config should parse")
    }

    const MINIMAL: &str = r#"
        [server]
        [database]
        url = "postgres://localhost/suggestbox"
        [auth]
        jwt_secret = "secret"
    "#;

    #[test]
    fn minimal_config_gets_defaults() {
        let config = parse(MINIMAL);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.token_expire_minutes, 720);
        assert!(config.server.cors_origin_list().is_empty());
        assert!(!config.push.is_configured());
    }

    #[test]
    fn cors_origins_split_and_trimmed() {
        let mut config = parse(MINIMAL);
        config.server.cors_origins =
            " http://localhost:3000, https://app.example.com ,,".to_string();
        assert_eq!(
            config.server.cors_origin_list(),
            vec![
                "http://localhost:3000".to_string(),
                "https://app.example.com".to_string(),
            ]
        );
    }

    #[test]
    fn push_configured_requires_both_keys() {
        let mut push = PushConfig::default();
        assert!(!push.is_configured());
        push.vapid_public_key = "pk".to_string();
        assert!(!push.is_configured());
        push.vapid_private_key = "sk".to_string();
        assert!(push.is_configured());
    }
}
