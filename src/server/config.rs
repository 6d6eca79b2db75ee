//! Server configuration.

use crate::Error;
use std::net::SocketAddr;

/// Environment variable [ServerConfig::from_env] reads the listen address from.
pub const ADDR_ENV_VAR: &str = "RESTROUTER_ADDR";

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// Whether HTTP/1 connections are kept alive between requests.
    pub keep_alive: bool,
}

impl ServerConfig {
    /// Creates a configuration listening on `addr` with the default options.
    pub fn new(addr: SocketAddr) -> ServerConfig {
        ServerConfig {
            addr,
            ..ServerConfig::default()
        }
    }

    /// Creates a configuration from the environment.
    ///
    /// The listen address is taken from `RESTROUTER_ADDR` when it is set, e.g. `RESTROUTER_ADDR=0.0.0.0:3000`.
    pub fn from_env() -> crate::Result<ServerConfig> {
        ServerConfig::from_addr_var(std::env::var(ADDR_ENV_VAR).ok())
    }

    fn from_addr_var(value: Option<String>) -> crate::Result<ServerConfig> {
        match value {
            Some(value) => {
                let addr = value.trim().parse().map_err(|_| Error::InvalidAddr(value.clone()))?;
                Ok(ServerConfig::new(addr))
            }
            None => Ok(ServerConfig::default()),
        }
    }

    /// Sets whether HTTP/1 connections are kept alive.
    pub fn keep_alive(mut self, keep_alive: bool) -> ServerConfig {
        self.keep_alive = keep_alive;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            keep_alive: true,
        }
    }
}
