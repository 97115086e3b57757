use std::net::IpAddr;

use crate::{env_lookup, parse_var};

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub metrics_port: u16,
    pub log_dir: String,
    pub observability_enabled: bool,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(env_lookup)
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = parse_var(&lookup, "HOST", IpAddr::from([0, 0, 0, 0]))?;
        let port = parse_var(&lookup, "PORT", 3000)?;
        let metrics_port = parse_var(&lookup, "METRICS_PORT", 9090)?;
        let log_dir = lookup("LOG_DIR")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "storage/logs".to_string());
        let observability_enabled = lookup("OBSERVABILITY_ENABLED")
            .map(|v| !matches!(v.trim().to_lowercase().as_str(), "false" | "0" | "no"))
            .unwrap_or(true);

        Ok(Self {
            host,
            port,
            metrics_port,
            log_dir,
            observability_enabled,
        })
    }
}
