use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use crate::error::{AppError, Result};

pub const DEFAULT_GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

pub const MISSING_API_KEY_MESSAGE: &str =
    "GROQ_API_KEY not found in environment variables. Please set it in your .env file.";

/// Where the HTTP server listens.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub server_addr: SocketAddr,
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        load_dotenv();
        Self::from_parts(env::var("HOST").ok(), env::var("PORT").ok())
    }

    pub fn from_parts(host: Option<String>, port: Option<String>) -> Result<Self> {
        let host = host.unwrap_or_else(|| "127.0.0.1".to_string());
        let port = port.unwrap_or_else(|| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        Ok(ServerConfig {
            server_addr: SocketAddr::new(ip, port),
        })
    }
}

/// Credential and endpoint for the hosted completion API.
#[derive(Clone)]
pub struct GroqConfig {
    pub api_key: String,
    pub api_base: String,
}

impl GroqConfig {
    pub fn load() -> Result<Self> {
        load_dotenv();
        Self::from_parts(env::var("GROQ_API_KEY").ok(), env::var("GROQ_API_BASE").ok())
    }

    pub fn from_parts(api_key: Option<String>, api_base: Option<String>) -> Result<Self> {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| AppError::ConfigError(MISSING_API_KEY_MESSAGE.to_string()))?;

        let api_base = api_base
            .map(|base| base.trim().trim_end_matches('/').to_string())
            .filter(|base| !base.is_empty())
            .unwrap_or_else(|| DEFAULT_GROQ_API_BASE.to_string());

        Ok(GroqConfig { api_key, api_base })
    }
}

// Keep the key out of logs.
impl std::fmt::Debug for GroqConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqConfig")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .finish()
    }
}

fn load_dotenv() {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();
}
