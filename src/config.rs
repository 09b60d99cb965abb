/*
 * Responsibility
 * - 環境変数や設定の読み込み (PORT, credential の cookie 名, 静的トークン表など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(raw: Option<String>) -> Self {
        match raw
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// One `identity:token:user_id` entry of `AUTH_STATIC_TOKENS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticToken {
    pub identity: String,
    pub token: String,
    pub user_id: Uuid,
}

pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // cookie names the strategy reads credentials from
    pub identity_field: String,
    pub token_field: String,
    pub bad_request_message: Option<String>,

    pub static_tokens: Vec<StaticToken>,

    pub request_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (env in production, a map in tests).
    pub fn from_lookup<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = var("PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(var("APP_ENV"));

        let identity_field = var("AUTH_IDENTITY_FIELD")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| "username".to_string());
        if identity_field.is_empty() {
            return Err(ConfigError::Invalid("AUTH_IDENTITY_FIELD"));
        }

        let token_field = var("AUTH_TOKEN_FIELD")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| "token".to_string());
        if token_field.is_empty() {
            return Err(ConfigError::Invalid("AUTH_TOKEN_FIELD"));
        }

        let bad_request_message =
            var("AUTH_BAD_REQUEST_MESSAGE").filter(|s| !s.trim().is_empty());

        let static_tokens = parse_static_tokens(
            &var("AUTH_STATIC_TOKENS").ok_or(ConfigError::Missing("AUTH_STATIC_TOKENS"))?,
        )?;

        let request_timeout_seconds = var("REQUEST_TIMEOUT_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(30);

        Ok(Self {
            addr,
            app_env,
            identity_field,
            token_field,
            bad_request_message,
            static_tokens,
            request_timeout_seconds,
        })
    }
}

// "alice:t1:<uuid>,bob:t2:<uuid>"
fn parse_static_tokens(raw: &str) -> Result<Vec<StaticToken>, ConfigError> {
    const KEY: &str = "AUTH_STATIC_TOKENS";

    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|entry| {
            let mut parts = entry.splitn(3, ':');
            let (Some(identity), Some(token), Some(user_id)) =
                (parts.next(), parts.next(), parts.next())
            else {
                return Err(ConfigError::Invalid(KEY));
            };
            if identity.is_empty() || token.is_empty() {
                return Err(ConfigError::Invalid(KEY));
            }
            let user_id = Uuid::parse_str(user_id).map_err(|_| ConfigError::Invalid(KEY))?;

            Ok(StaticToken {
                identity: identity.to_string(),
                token: token.to_string(),
                user_id,
            })
        })
        .collect()
}
