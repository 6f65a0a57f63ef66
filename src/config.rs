use serde::{Deserialize, Serialize};

use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3001
}

impl Config {
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Reads `HOST` and `PORT`, falling back to `0.0.0.0:3001`.
pub fn load_config() -> Result<Config, envy::Error> {
    let config = envy::from_env::<Config>()?;
    tracing::info!("Loaded server config: {config:?}");

    Ok(config)
}
