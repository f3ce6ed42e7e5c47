use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host to bind to.
    pub host: String,
    /// Server port to bind to.
    pub port: u16,
    /// Content API endpoint, e.g. `https://<repo>.cdn.prismic.io/api/v2`.
    pub api_endpoint: String,
    /// Access token for private repositories.
    pub access_token: Option<String>,
    /// Secret the preview cookie is signed with.
    pub preview_secret: String,
    /// Lifetime of a preview session, in seconds.
    pub preview_max_age_secs: u64,
    /// Mark preview cookies `Secure`.
    pub preview_cookie_secure: bool,
    /// Where `build` writes pages and `serve` looks for them.
    pub out_dir: PathBuf,
    /// Number of posts pre-rendered at build time.
    pub prerender_page_size: u32,
    /// Log level (e.g., "info", "debug", "trace").
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_endpoint = var("PRISMIC_API_ENDPOINT").ok_or(ConfigError::Missing("PRISMIC_API_ENDPOINT"))?;
        // Older deployments spelled the token variable `PRIMISC_ACCESS_TOKEN`.
        let access_token = var("PRISMIC_ACCESS_TOKEN").or_else(|| var("PRIMISC_ACCESS_TOKEN"));

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse(&var, "PORT", 3000)?,
            api_endpoint,
            access_token,
            preview_secret: var("PREVIEW_SECRET")
                .unwrap_or_else(|| "dev-preview-secret-change-me".to_string()),
            preview_max_age_secs: parse(&var, "PREVIEW_MAX_AGE_SECS", 3600)?,
            preview_cookie_secure: parse(&var, "PREVIEW_COOKIE_SECURE", false)?,
            out_dir: var("OUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("out")),
            prerender_page_size: parse(&var, "PRERENDER_PAGE_SIZE", 2)?,
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T, F>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}
