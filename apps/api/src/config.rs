use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::ai::gemini::DEFAULT_API_BASE;
use crate::shell::DEFAULT_PIX_CODE;

/// Where the `current_resume` and `gemini_api_key` slots live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    File,
    Redis,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "redis" => Ok(StorageBackend::Redis),
            "memory" => Ok(StorageBackend::Memory),
            other => bail!("STORAGE_BACKEND must be file, redis or memory (got '{other}')"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if a set variable is invalid or a required one is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub storage_backend: StorageBackend,
    pub storage_dir: PathBuf,
    /// Set only for the redis backend.
    pub redis_url: Option<String>,
    /// Used when the user has not saved a key of their own.
    pub gemini_api_key: Option<String>,
    pub gemini_api_base: String,
    pub donation_pix_code: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let storage_backend: StorageBackend = optional_env("STORAGE_BACKEND")
            .unwrap_or_else(|| "file".to_string())
            .parse()?;
        let redis_url = match storage_backend {
            StorageBackend::Redis => Some(require_env("REDIS_URL")?),
            _ => None,
        };

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            storage_backend,
            storage_dir: optional_env("STORAGE_DIR")
                .unwrap_or_else(|| ".resume-studio".to_string())
                .into(),
            redis_url,
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_api_base: optional_env("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            donation_pix_code: optional_env("DONATION_PIX_CODE")
                .unwrap_or_else(|| DEFAULT_PIX_CODE.to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// A set, non-blank variable.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
