use std::{env, fmt, str::FromStr, time::Duration};
use anyhow::{Result, Context};

/// What a ranking endpoint does when the upstream source is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Surface the upstream failure to the caller.
    #[default]
    Fail,
    /// Answer with a synthetic ranking instead.
    Fallback,
}

impl FromStr for FailurePolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail" => Ok(Self::Fail),
            "fallback" => Ok(Self::Fallback),
            other => anyhow::bail!("unknown failure policy '{}', expected 'fail' or 'fallback'", other),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fail => f.write_str("fail"),
            Self::Fallback => f.write_str("fallback"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Browser origins allowed to call the API with credentials.
    pub allowed_origins: Vec<String>,
    pub cors_max_age: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            allowed_origins: Vec::new(),
            cors_max_age: Duration::from_secs(60 * 60),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RankingsConfig {
    pub failure_policy: FailurePolicy,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendConfig,
    pub server: ServerConfig,
    pub rankings: RankingsConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let backend_url = env::var("BACKEND_URL")
            .context("BACKEND_URL must be set")?;

        let timeout = upstream_timeout(parse_var("UPSTREAM_TIMEOUT_MS", 10_000)?)?;
        let port: u16 = parse_var("PORT", 3000)?;
        let cors_max_age_secs: u64 = parse_var("CORS_MAX_AGE_SECS", 60 * 60)?;
        let failure_policy = parse_var("RANKING_FAILURE_POLICY", FailurePolicy::Fail)?;

        let allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .ok()
            .map(|origins| parse_origins(&origins))
            .unwrap_or_default();

        Ok(Config {
            backend: BackendConfig {
                base_url: backend_url.trim_end_matches('/').to_string(),
                timeout,
            },
            server: ServerConfig {
                port,
                allowed_origins,
                cors_max_age: Duration::from_secs(cors_max_age_secs),
            },
            rankings: RankingsConfig { failure_policy },
        })
    }

    /// Config pointing at `base_url` with every other setting at its default.
    pub fn for_backend(base_url: &str) -> Self {
        Config {
            backend: BackendConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                timeout: Duration::from_millis(10_000),
            },
            server: ServerConfig::default(),
            rankings: RankingsConfig::default(),
        }
    }
}

fn upstream_timeout(timeout_ms: u64) -> Result<Duration> {
    if timeout_ms == 0 {
        anyhow::bail!("UPSTREAM_TIMEOUT_MS must be greater than 0");
    }
    Ok(Duration::from_millis(timeout_ms))
}

fn parse_origins(origins: &str) -> Vec<String> {
    origins
        .split(',')
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid {} value '{}': {}", key, raw, e)),
        _ => Ok(default),
    }
}
