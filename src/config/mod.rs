use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub environment: String,
    pub port: u16,
    /// Per-request timeout applied by the router, in seconds.
    pub request_timeout: u64,
    /// Logical namespace for the document store.
    pub store_namespace: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Config {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|e| anyhow::anyhow!("PORT must be a valid port number: {}", e))?,
            request_timeout: env::var("REQUEST_TIMEOUT")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|e| anyhow::anyhow!("REQUEST_TIMEOUT must be a number of seconds: {}", e))?,
            store_namespace: env::var("STORE_NAMESPACE")
                .unwrap_or_else(|_| "image_arena".to_string()),
        })
    }
}
