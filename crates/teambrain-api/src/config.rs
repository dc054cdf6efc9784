//! Server settings.

use std::time::{Duration, Instant};

/// Port used when none is given.
pub const DEFAULT_PORT: u16 = 8765;

/// Browser origins allowed to call the API.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CorsPolicy {
    #[default]
    Any,
    Only(Vec<String>),
}

impl CorsPolicy {
    /// An empty list or one containing `*` allows any origin.
    pub fn from_origins(origins: Vec<String>) -> Self {
        let origins: Vec<String> = origins
            .into_iter()
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            CorsPolicy::Any
        } else {
            CorsPolicy::Only(origins)
        }
    }
}

/// Where the API listens and whom it answers.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsPolicy,
    started: Instant,
}

impl ApiConfig {
    pub fn new(host: impl Into<String>, port: u16, cors: CorsPolicy) -> Self {
        Self {
            host: host.into(),
            port,
            cors,
            started: Instant::now(),
        }
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Time since this configuration was built, reported by the health check.
    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new("127.0.0.1", DEFAULT_PORT, CorsPolicy::Any)
    }
}
