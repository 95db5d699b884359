//! HTTP listener and CORS settings

use serde::{Deserialize, Serialize};

const MB: usize = 1024 * 1024;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,

    /// Actix worker count; 0 lets actix use one per core
    #[serde(default)]
    pub workers: usize,

    /// Keep-alive in seconds
    #[serde(default = "default_keep_alive")]
    pub keep_alive: u64,

    /// Upper bound for JSON bodies and raw attachment uploads, in bytes
    #[serde(default = "default_max_payload_size")]
    pub max_payload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            workers: 0,
            keep_alive: default_keep_alive(),
            max_payload_size: default_max_payload_size(),
        }
    }
}

impl ServerConfig {
    /// `host:port` as passed to `HttpServer::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorsConfig {
    /// Browser origins allowed to call the API; `*` accepts any
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    #[serde(default)]
    pub allow_credentials: bool,

    /// Preflight cache lifetime in seconds
    #[serde(default = "default_max_age")]
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            allow_credentials: false,
            max_age: default_max_age(),
        }
    }
}

impl CorsConfig {
    /// Any origin with credentials, for local frontends
    pub fn development() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allow_credentials: true,
            ..Self::default()
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

fn default_keep_alive() -> u64 {
    75
}

// headroom above the 10 MB attachment limit
fn default_max_payload_size() -> usize {
    12 * MB
}

fn default_max_age() -> usize {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 9090,
            ..ServerConfig::default()
        };
        assert_eq!(config.bind_address(), "127.0.0.1:9090");
    }

    #[test]
    fn test_cors_origins() {
        assert!(CorsConfig::development().allows_any_origin());
        let strict = CorsConfig {
            allowed_origins: vec!["https://portal.nbj.example".to_string()],
            ..CorsConfig::default()
        };
        assert!(!strict.allows_any_origin());
    }
}
