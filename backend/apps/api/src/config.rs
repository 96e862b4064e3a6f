//! Server Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).
//! Everything goes through a lookup function so tests never touch the
//! process environment.

use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::application::config::MIN_SESSION_SECRET_LEN;
use base64::Engine;
use base64::engine::general_purpose;
use detection::HuggingFaceConfig;
use detection::infra::huggingface::REQUEST_TIMEOUT_SECS;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DEV_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    pub app_env: AppEnv,
    pub port: u16,
    /// `None` only in development (in-memory user store)
    pub database_url: Option<String>,
    /// `None` only in development (random per process)
    pub session_secret: Option<Vec<u8>>,
    pub hf_token: String,
    pub hf_model_url: Option<String>,
    pub hf_timeout: Duration,
    pub frontend_origins: Vec<String>,
}

impl ServerConfig {
    /// Load from the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let app_env = match get("APP_ENV").as_deref() {
            None | Some("development") => AppEnv::Development,
            Some("production") => AppEnv::Production,
            Some(other) => bail!("APP_ENV must be 'development' or 'production', got '{other}'"),
        };
        let production = app_env == AppEnv::Production;

        let port = match get("PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("PORT is not a valid port number: '{port}'"))?,
            None => DEFAULT_PORT,
        };

        let database_url = get("DATABASE_URL");
        if production && database_url.is_none() {
            bail!("DATABASE_URL must be set in production");
        }

        let session_secret = match get("SESSION_SECRET") {
            Some(encoded) => {
                let secret = general_purpose::STANDARD
                    .decode(&encoded)
                    .context("SESSION_SECRET must be base64 encoded")?;
                if secret.len() < MIN_SESSION_SECRET_LEN {
                    bail!(
                        "SESSION_SECRET must decode to at least {MIN_SESSION_SECRET_LEN} bytes (got {})",
                        secret.len()
                    );
                }
                Some(secret)
            }
            None if production => bail!("SESSION_SECRET must be set in production"),
            None => None,
        };

        let hf_token = get("HF_TOKEN").context("HF_TOKEN environment variable is required")?;

        let hf_timeout = match get("HF_TIMEOUT_SECS") {
            Some(secs) => {
                let secs: u64 = secs
                    .parse()
                    .with_context(|| format!("HF_TIMEOUT_SECS is not a number: '{secs}'"))?;
                if secs == 0 {
                    bail!("HF_TIMEOUT_SECS must be greater than zero");
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(REQUEST_TIMEOUT_SECS),
        };

        let frontend_origins = match get("FRONTEND_ORIGINS") {
            Some(origins) => split_origins(&origins),
            None if production => bail!("FRONTEND_ORIGINS must be set in production"),
            None => split_origins(DEFAULT_DEV_ORIGINS),
        };

        Ok(Self {
            app_env,
            port,
            database_url,
            session_secret,
            hf_token,
            hf_model_url: get("HF_MODEL_URL"),
            hf_timeout,
            frontend_origins,
        })
    }

    pub fn is_production(&self) -> bool {
        self.app_env == AppEnv::Production
    }

    /// Auth settings: `Secure` cookie in production only
    pub fn auth_config(&self) -> AuthConfig {
        let mut config = match &self.session_secret {
            Some(secret) => AuthConfig::with_secret(secret.clone()),
            None => AuthConfig::with_random_secret(),
        };
        config.cookie_secure = self.is_production();
        config
    }

    pub fn huggingface_config(&self) -> HuggingFaceConfig {
        let mut config = HuggingFaceConfig::new(self.hf_token.clone());
        if let Some(url) = &self.hf_model_url {
            config.model_url = url.clone();
        }
        config.request_timeout = self.hf_timeout;
        config
    }
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("app_env", &self.app_env)
            .field("port", &self.port)
            .field("database", &self.database_url.as_ref().map(|_| "[SET]"))
            .field("session_secret", &self.session_secret.as_ref().map(|_| "[REDACTED]"))
            .field("hf_token", &"[REDACTED]")
            .field("hf_model_url", &self.hf_model_url)
            .field("hf_timeout", &self.hf_timeout)
            .field("frontend_origins", &self.frontend_origins)
            .finish()
    }
}

fn split_origins(origins: &str) -> Vec<String> {
    origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET_B64: &str = "MDEyMzQ1Njc4OWFiY2RlZjAxMjM0NTY3ODlhYmNkZWY="; // 32 bytes

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_development_defaults() {
        let config = load(&[("HF_TOKEN", "hf_x")]).unwrap();

        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.port, 3000);
        assert!(config.database_url.is_none());
        assert!(config.session_secret.is_none());
        assert_eq!(config.hf_timeout, Duration::from_secs(30));
        assert_eq!(
            config.frontend_origins,
            vec!["http://localhost:3000", "http://localhost:5173"]
        );
        assert!(!config.auth_config().cookie_secure);
    }

    #[test]
    fn test_hf_token_is_required() {
        let err = load(&[]).unwrap_err();
        assert!(err.to_string().contains("HF_TOKEN"));

        assert!(load(&[("HF_TOKEN", "   ")]).is_err());
    }

    #[test]
    fn test_production_requires_database_secret_and_origins() {
        let base = [("APP_ENV", "production"), ("HF_TOKEN", "hf_x")];
        assert!(load(&base).is_err());

        let err = load(&[
            base[0],
            base[1],
            ("DATABASE_URL", "postgres://localhost/app"),
            ("FRONTEND_ORIGINS", "https://example.com"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("SESSION_SECRET"));

        let config = load(&[
            base[0],
            base[1],
            ("DATABASE_URL", "postgres://localhost/app"),
            ("SESSION_SECRET", SECRET_B64),
            ("FRONTEND_ORIGINS", "https://example.com, https://www.example.com"),
        ])
        .unwrap();
        assert!(config.is_production());
        assert!(config.auth_config().cookie_secure);
        assert_eq!(config.auth_config().session_secret.len(), 32);
        assert_eq!(config.frontend_origins.len(), 2);
    }

    #[test]
    fn test_short_session_secret_is_rejected() {
        let err = load(&[("HF_TOKEN", "hf_x"), ("SESSION_SECRET", "c2hvcnQ=")]).unwrap_err();
        assert!(err.to_string().contains("at least 32 bytes"));
    }

    #[test]
    fn test_invalid_values() {
        assert!(load(&[("HF_TOKEN", "hf_x"), ("PORT", "http")]).is_err());
        assert!(load(&[("HF_TOKEN", "hf_x"), ("APP_ENV", "staging")]).is_err());
        assert!(load(&[("HF_TOKEN", "hf_x"), ("HF_TIMEOUT_SECS", "0")]).is_err());
    }

    #[test]
    fn test_huggingface_overrides() {
        let config = load(&[
            ("HF_TOKEN", "hf_x"),
            ("HF_MODEL_URL", "http://localhost:9000/model"),
            ("HF_TIMEOUT_SECS", "5"),
        ])
        .unwrap();

        let hf = config.huggingface_config();
        assert_eq!(hf.model_url, "http://localhost:9000/model");
        assert_eq!(hf.request_timeout, Duration::from_secs(5));
        assert_eq!(hf.api_token, "hf_x");
    }
}
