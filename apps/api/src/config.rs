use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_DATA_FILE: &str = "feedback_data.json";

/// Application configuration loaded from environment variables.
/// Only the port is validated; every other variable has a usable default.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_file: PathBuf,
    /// Absent key disables the remote drafting path (fallback-only mode).
    pub openrouter_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            data_file: std::env::var("FEEDBACK_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_FILE)),
            openrouter_api_key: optional_env("OPENROUTER_API_KEY"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an env var, treating an empty or whitespace-only value as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
