use std::env;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Where problems, users and progress live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MySql,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(Self::MySql),
            "memory" => Ok(Self::Memory),
            _ => Err(()),
        }
    }
}

/// Where verification codes live
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationBackend {
    Memory,
    Redis,
}

impl FromStr for VerificationBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "redis" => Ok(Self::Redis),
            _ => Err(()),
        }
    }
}

/// Outbound mail API settings. Absent means codes are only logged.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct GraderConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

/// Environment configuration
/// Loads and validates environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub verification_backend: VerificationBackend,
    pub redis_url: String,
    pub jwt_secret: String,
    pub cookie_secure: bool,
    pub grader: GraderConfig,
    pub mail: Option<MailConfig>,
    pub rate_limit_per_second: u32,
    pub rate_limit_burst: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let store_backend = parse_var("STORE_BACKEND", StoreBackend::MySql)?;

        let database_url = env::var("DATABASE_URL").ok();
        if store_backend == StoreBackend::MySql && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let verification_backend = parse_var("VERIFICATION_BACKEND", VerificationBackend::Memory)?;

        let redis_url = env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1/".to_string());

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::Missing("JWT_SECRET"))?;

        let cookie_secure = match env::var("COOKIE_SECURE") {
            Ok(value) => value.parse::<bool>().map_err(|_| ConfigError::Invalid {
                name: "COOKIE_SECURE",
                value,
            })?,
            Err(_) => false,
        };

        let timeout_secs = match env::var("GRADER_TIMEOUT_SECS") {
            Ok(value) => value.parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: "GRADER_TIMEOUT_SECS",
                value,
            })?,
            Err(_) => 60,
        };

        let grader = GraderConfig {
            api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            timeout_secs,
        };

        let mail = match env::var("MAIL_API_URL") {
            Ok(api_url) => Some(MailConfig {
                api_url,
                api_key: env::var("MAIL_API_KEY").map_err(|_| ConfigError::Missing("MAIL_API_KEY"))?,
                from: env::var("MAIL_FROM").map_err(|_| ConfigError::Missing("MAIL_FROM"))?,
            }),
            Err(_) => None,
        };

        let rate_limit_per_second = parse_var("RATE_LIMIT_PER_SECOND", 20u32)?;
        let rate_limit_burst = parse_var("RATE_LIMIT_BURST", 50u32)?;

        Ok(Self {
            bind_addr,
            store_backend,
            database_url,
            verification_backend,
            redis_url,
            jwt_secret,
            cookie_secure,
            grader,
            mail,
            rate_limit_per_second,
            rate_limit_burst,
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { name, value }),
        Err(_) => Ok(default),
    }
}
