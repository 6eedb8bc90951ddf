use std::env;
use std::time::Duration;

use crate::settlement::FailurePolicy;
use crate::sports::client::DEFAULT_SPORTS_API_HOST;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    // Bearer token for /api/* (unset = auth disabled)
    pub api_token: Option<String>,
    pub log_json: bool,

    // API-Sports
    pub sports_api_host: String,
    pub sports_api_key: Option<String>,
    pub sports_api_timeout_secs: u64,

    // Settlement
    pub settlement_enabled: bool,
    pub settlement_interval_secs: u64,
    pub settlement_run_timeout_secs: u64,
    pub settlement_max_backoff_secs: u64,
    pub settlement_isolate_failures: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,

            api_token: non_empty_var("API_TOKEN"),
            log_json: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),

            sports_api_host: env::var("SPORTS_API_HOST")
                .unwrap_or_else(|_| DEFAULT_SPORTS_API_HOST.into()),
            sports_api_key: non_empty_var("SPORTS_API_KEY"),
            sports_api_timeout_secs: env::var("SPORTS_API_TIMEOUT_SECS")
                .unwrap_or_else(|_| "15".into())
                .parse()
                .unwrap_or(15),

            settlement_enabled: env::var("SETTLEMENT_ENABLED")
                .unwrap_or_else(|_| "false".into())
                .parse()
                .unwrap_or(false),
            settlement_interval_secs: env::var("SETTLEMENT_INTERVAL_SECS")
                .unwrap_or_else(|_| "3600".into())
                .parse()
                .unwrap_or(3_600),
            settlement_run_timeout_secs: env::var("SETTLEMENT_RUN_TIMEOUT_SECS")
                .unwrap_or_else(|_| "300".into())
                .parse()
                .unwrap_or(300),
            settlement_max_backoff_secs: env::var("SETTLEMENT_MAX_BACKOFF_SECS")
                .unwrap_or_else(|_| "21600".into())
                .parse()
                .unwrap_or(21_600),
            settlement_isolate_failures: env::var("SETTLEMENT_ISOLATE_FAILURES")
                .unwrap_or_else(|_| "false".into())
                .parse()
                .unwrap_or(false),
        })
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        if self.settlement_isolate_failures {
            FailurePolicy::Isolate
        } else {
            FailurePolicy::Abort
        }
    }

    pub fn sports_api_timeout(&self) -> Duration {
        Duration::from_secs(self.sports_api_timeout_secs)
    }

    pub fn settlement_run_timeout(&self) -> Duration {
        Duration::from_secs(self.settlement_run_timeout_secs)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
