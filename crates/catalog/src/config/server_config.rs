use crate::config::myconfig::Config;
use anyhow::{Context, Result};
use std::net::SocketAddr;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub metric_addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_config(config: &Config) -> Result<Self> {
        let metric_addr = format!("0.0.0.0:{}", config.metric_port)
            .parse()
            .context("Failed to parse metrics address")?;

        Ok(Self {
            database_url: config.database_url.clone(),
            metric_addr,
        })
    }
}
