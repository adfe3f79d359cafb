use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Result};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub youtube_api_key: String,
    pub max_daily_requests: u64,
    pub data_dir: PathBuf,
    pub upstream_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let youtube_api_key =
            env::var("YOUTUBE_API_KEY").map_err(|_| anyhow!("YOUTUBE_API_KEY must be set"))?;
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);
        let max_daily_requests = env::var("MAX_DAILY_REQUESTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(500);
        let data_dir = env::var("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));
        let upstream_timeout = env::var("UPSTREAM_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(10));

        Ok(Self {
            port,
            youtube_api_key,
            max_daily_requests,
            data_dir,
            upstream_timeout,
        })
    }

    pub fn counter_path(&self) -> PathBuf {
        self.data_dir.join("quota.json")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("requests.log")
    }
}
