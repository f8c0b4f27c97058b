use std::str::FromStr;

use anyhow::{Context, Result};

use crate::matching::policy::MatchPolicy;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// When unset, sessions live in process memory.
    pub redis_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub run_migrations: bool,
    /// How many candidate rows a ranking request scores.
    pub ranking_pool_size: i64,
    /// How many ranked candidates are returned.
    pub ranking_top_n: usize,
    pub session_ttl_secs: u64,
    pub match_policy: MatchPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = MatchPolicy::default();
        let match_policy = MatchPolicy {
            recommend_threshold: parse_env(
                "MATCH_RECOMMEND_THRESHOLD",
                defaults.recommend_threshold,
            )?,
            maybe_threshold: parse_env("MATCH_MAYBE_THRESHOLD", defaults.maybe_threshold)?,
            ..defaults
        };
        let config = Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: std::env::var("REDIS_URL").ok().filter(|v| !v.is_empty()),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            run_migrations: parse_env("RUN_MIGRATIONS", false)?,
            ranking_pool_size: parse_env("RANKING_POOL_SIZE", 20)?,
            ranking_top_n: parse_env("RANKING_TOP_N", 10)?,
            session_ttl_secs: parse_env("SESSION_TTL_SECS", 86_400)?,
            match_policy,
        };
        config.validate()?;
        Ok(config)
    }

    /// Cross-field and range checks that parsing alone cannot express.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.match_policy.maybe_threshold <= self.match_policy.recommend_threshold,
            "MATCH_MAYBE_THRESHOLD must not exceed MATCH_RECOMMEND_THRESHOLD"
        );
        anyhow::ensure!(
            self.ranking_pool_size >= 1,
            "RANKING_POOL_SIZE must be at least 1"
        );
        anyhow::ensure!(self.ranking_top_n >= 1, "RANKING_TOP_N must be at least 1");
        Ok(())
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("{key} has an invalid value: '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_accepts_padded_numbers() {
        let port: u16 = parse_value("PORT", " 9090 ").unwrap();
        assert_eq!(port, 9090);
    }

    #[test]
    fn test_parse_value_rejects_garbage_with_key_in_message() {
        let err = parse_value::<u16>("PORT", "eighty").unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    fn config() -> Config {
        Config {
            database_url: "postgres://localhost/jobmatch".to_string(),
            redis_url: None,
            port: 8080,
            rust_log: "info".to_string(),
            run_migrations: false,
            ranking_pool_size: 20,
            ranking_top_n: 10,
            session_ttl_secs: 60,
            match_policy: MatchPolicy::default(),
        }
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_positive_pool_size() {
        for size in [0, -5] {
            let cfg = Config {
                ranking_pool_size: size,
                ..config()
            };
            let err = cfg.validate().unwrap_err();
            assert!(err.to_string().contains("RANKING_POOL_SIZE"));
        }
    }

    #[test]
    fn test_validate_rejects_inverted_thresholds() {
        let mut cfg = config();
        cfg.match_policy.maybe_threshold = 80;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_parse_value_bool() {
        assert!(parse_value::<bool>("RUN_MIGRATIONS", "true").unwrap());
        assert!(parse_value::<bool>("RUN_MIGRATIONS", "yes").is_err());
    }
}
