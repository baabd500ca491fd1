use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr};

use crate::constants::{
    DEFAULT_RATE_LIMIT_MAX_REQUESTS, DEFAULT_RATE_LIMIT_WINDOW_SECS, MAX_RATE_LIMIT_WINDOW_SECS,
};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

/// Where submissions go: the log (development) or a transactional-email API.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    #[default]
    Console,
    #[serde(alias = "production", alias = "resend")]
    Email,
}

impl FromStr for DeliveryMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "console" => Ok(DeliveryMode::Console),
            "email" | "production" | "resend" => Ok(DeliveryMode::Email),
            _ => Err(ConfigError::Message(format!("Invalid email service: {}", s))),
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeliveryMode::Console => write!(f, "console"),
            DeliveryMode::Email => write!(f, "email"),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default)]
    pub email_service: DeliveryMode,

    #[serde(default)]
    pub email_api_key: String,

    #[serde(default = "default_email_api_url")]
    pub email_api_url: String,

    #[serde(default)]
    pub email_from: String,

    #[serde(default)]
    pub email_to: String,

    #[serde(default = "default_email_timeout")]
    pub email_timeout_secs: u64,

    #[serde(default)]
    pub redis_url: Option<String>,

    #[serde(default = "default_rate_limit_max_requests")]
    pub rate_limit_max_requests: u32,

    #[serde(default = "default_rate_limit_window")]
    pub rate_limit_window_secs: u64,

    #[serde(default = "default_prune_interval")]
    pub rate_limit_prune_interval_secs: u64,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Contact-API".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_email_api_url() -> String {
    "https://api.resend.com".to_string()
}
fn default_email_timeout() -> u64 {
    10
}
fn default_rate_limit_max_requests() -> u32 {
    DEFAULT_RATE_LIMIT_MAX_REQUESTS
}
fn default_rate_limit_window() -> u64 {
    DEFAULT_RATE_LIMIT_WINDOW_SECS
}
fn default_prune_interval() -> u64 {
    5 * 60
}
fn default_max_body_bytes() -> usize {
    64 * 1024
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            env: default_env(),
            name: default_name(),
            port: default_port(),
            host: default_host(),
            worker_count: default_worker_count(),
            cors_allowed_origins: default_cors_origins(),
            email_service: DeliveryMode::default(),
            email_api_key: String::new(),
            email_api_url: default_email_api_url(),
            email_from: String::new(),
            email_to: String::new(),
            email_timeout_secs: default_email_timeout(),
            redis_url: None,
            rate_limit_max_requests: default_rate_limit_max_requests(),
            rate_limit_window_secs: default_rate_limit_window(),
            rate_limit_prune_interval_secs: default_prune_interval(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_allowed_origins")
                    .ignore_empty(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Unprefixed names used by existing deployments
        if env::var("APP_EMAIL_SERVICE").is_err() {
            if let Ok(raw) = env::var("EMAIL_SERVICE") {
                config.email_service = raw.parse()?;
            }
        }
        config.email_api_key = fill_from_env(config.email_api_key, "EMAIL_API_KEY");
        config.email_from = fill_from_env(config.email_from, "EMAIL_FROM");
        config.email_to = fill_from_env(config.email_to, "EMAIL_TO");

        config.redis_url = config.redis_url.filter(|url| !url.trim().is_empty());

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.email_service == DeliveryMode::Email {
            if self.email_api_key.trim().is_empty() {
                errors.push("EMAIL_API_KEY must be set when EMAIL_SERVICE is email".to_string());
            }
            if !self.email_from.contains('@') {
                errors.push("EMAIL_FROM must be an email address".to_string());
            }
            if !self.email_to.contains('@') {
                errors.push("EMAIL_TO must be an email address".to_string());
            }
            if let Err(e) = url::Url::parse(&self.email_api_url) {
                errors.push(format!("EMAIL_API_URL is invalid: {}", e));
            }
        }
        if self.rate_limit_max_requests == 0 {
            errors.push("RATE_LIMIT_MAX_REQUESTS must be greater than 0".to_string());
        }
        if self.rate_limit_window_secs == 0 {
            errors.push("RATE_LIMIT_WINDOW_SECS must be greater than 0".to_string());
        } else if self.rate_limit_window_secs > MAX_RATE_LIMIT_WINDOW_SECS {
            errors.push(format!(
                "RATE_LIMIT_WINDOW_SECS must be at most {}",
                MAX_RATE_LIMIT_WINDOW_SECS
            ));
        }
        if self.max_body_bytes == 0 {
            errors.push("MAX_BODY_BYTES must be greater than 0".to_string());
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

fn fill_from_env(current: String, env_key: &str) -> String {
    if current.trim().is_empty() {
        env::var(env_key).unwrap_or_default()
    } else {
        current
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("email_service", &self.email_service)
            .field("email_api_key", &self.email_api_key.redact())
            .field("email_api_url", &self.email_api_url)
            .field("email_from", &self.email_from)
            .field("email_to", &self.email_to)
            .field("email_timeout_secs", &self.email_timeout_secs)
            .field("redis_url", &self.redis_url.as_ref().map(|url| url.redact()))
            .field("rate_limit_max_requests", &self.rate_limit_max_requests)
            .field("rate_limit_window_secs", &self.rate_limit_window_secs)
            .field("rate_limit_prune_interval_secs", &self.rate_limit_prune_interval_secs)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}
