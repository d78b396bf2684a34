//! Client configuration and credential handling.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use tradeking_core::error::{ApiError, ApiResult};

/// Production API base.
pub const DEFAULT_BASE_URL: &str = "https://api.tradeking.com/v1";

/// OAuth1 credential set: the consumer pair identifies the application,
/// the token pair identifies the authorized user account.
///
/// All four values are required, non-empty, and immutable once
/// constructed. Obtaining them (the application-registration flow) happens
/// outside this client.
#[derive(Debug, Clone)]
pub struct Credentials {
    consumer_key: String,
    consumer_secret: String,
    oauth_token: String,
    oauth_secret: String,
}

impl Credentials {
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        oauth_token: impl Into<String>,
        oauth_secret: impl Into<String>,
    ) -> ApiResult<Self> {
        let credentials = Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            oauth_token: oauth_token.into(),
            oauth_secret: oauth_secret.into(),
        };
        credentials.validate()?;
        Ok(credentials)
    }

    /// Load from `TRADEKING_CONSUMER_KEY`, `TRADEKING_CONSUMER_SECRET`,
    /// `TRADEKING_OAUTH_TOKEN`, and `TRADEKING_OAUTH_SECRET`.
    pub fn from_env() -> ApiResult<Self> {
        Self::new(
            require_env("TRADEKING_CONSUMER_KEY")?,
            require_env("TRADEKING_CONSUMER_SECRET")?,
            require_env("TRADEKING_OAUTH_TOKEN")?,
            require_env("TRADEKING_OAUTH_SECRET")?,
        )
    }

    fn validate(&self) -> ApiResult<()> {
        let fields = [
            ("consumer_key", &self.consumer_key),
            ("consumer_secret", &self.consumer_secret),
            ("oauth_token", &self.oauth_token),
            ("oauth_secret", &self.oauth_secret),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(ApiError::Config(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }

    pub fn oauth_token(&self) -> &str {
        &self.oauth_token
    }

    pub fn oauth_secret(&self) -> &str {
        &self.oauth_secret
    }
}

/// Full client configuration: credentials plus the API base URL.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub credentials: Credentials,
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client somewhere else (sandbox, test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Load from environment variables; `TRADEKING_BASE_URL` overrides the
    /// production base.
    pub fn from_env() -> ApiResult<Self> {
        let config = Self::new(Credentials::from_env()?);
        match std::env::var("TRADEKING_BASE_URL") {
            Ok(base_url) => Ok(config.with_base_url(base_url)),
            Err(_) => Ok(config),
        }
    }
}

/// On-disk configuration schema.
#[derive(Debug, Deserialize)]
struct FileConfig {
    consumer_key: String,
    consumer_secret: String,
    oauth_token: String,
    oauth_secret: String,
    base_url: Option<String>,
}

/// Load configuration from a file with `TRADEKING`-prefixed environment
/// overrides layered on top.
pub fn load_config(path: &Path) -> ApiResult<ClientConfig> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("TRADEKING")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .map_err(|e| ApiError::Config(e.to_string()))?;

    let raw: FileConfig = config
        .try_deserialize()
        .map_err(|e| ApiError::Config(e.to_string()))?;

    let credentials = Credentials::new(
        raw.consumer_key,
        raw.consumer_secret,
        raw.oauth_token,
        raw.oauth_secret,
    )?;
    let config = ClientConfig::new(credentials);
    Ok(match raw.base_url {
        Some(base_url) => config.with_base_url(base_url),
        None => config,
    })
}

fn require_env(name: &str) -> ApiResult<String> {
    std::env::var(name).map_err(|_| ApiError::Config(format!("{name} not set")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_valid_credentials_are_stored_unchanged() {
        let credentials = Credentials::new("ckey", "csecret", "otoken", "osecret").unwrap();
        assert_eq!(credentials.consumer_key(), "ckey");
        assert_eq!(credentials.consumer_secret(), "csecret");
        assert_eq!(credentials.oauth_token(), "otoken");
        assert_eq!(credentials.oauth_secret(), "osecret");
    }

    #[test]
    fn test_empty_field_is_a_config_error() {
        for i in 0..4 {
            let mut fields = ["ckey", "csecret", "otoken", "osecret"];
            fields[i] = "";
            let result = Credentials::new(fields[0], fields[1], fields[2], fields[3]);
            assert!(matches!(result, Err(ApiError::Config(_))), "field {i}");
        }
    }

    #[test]
    fn test_whitespace_only_is_rejected() {
        let result = Credentials::new("ckey", "  ", "otoken", "osecret");
        assert!(matches!(result, Err(ApiError::Config(_))));
    }

    #[test]
    fn test_default_base_url() {
        let credentials = Credentials::new("a", "b", "c", "d").unwrap();
        let config = ClientConfig::new(credentials);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
consumer_key = "ckey"
consumer_secret = "csecret"
oauth_token = "otoken"
oauth_secret = "osecret"
base_url = "http://localhost:9999/v1"
"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.credentials.consumer_key(), "ckey");
        assert_eq!(config.base_url, "http://localhost:9999/v1");
    }

    #[test]
    fn test_load_config_rejects_empty_credential() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
consumer_key = ""
consumer_secret = "csecret"
oauth_token = "otoken"
oauth_secret = "osecret"
"#
        )
        .unwrap();

        assert!(matches!(load_config(file.path()), Err(ApiError::Config(_))));
    }
}
