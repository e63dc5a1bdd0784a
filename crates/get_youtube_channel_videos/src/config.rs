use std::env;

use anyhow::{bail, Result};

pub const API_KEY_VAR: &str = "YOUTUBE_API_KEY";
pub const BASE_URL_VAR: &str = "YOUTUBE_API_BASE_URL";

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub base_url: Option<String>,
}

impl Settings {
    /// Loads the credential and optional API root from the environment.
    /// An unset or blank key is an error.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var(API_KEY_VAR).unwrap_or_default();
        if api_key.trim().is_empty() {
            bail!("{API_KEY_VAR} environment variable not set");
        }
        let base_url = normalize_optional(env::var(BASE_URL_VAR).ok());
        Ok(Self {
            api_key: api_key.trim().to_string(),
            base_url,
        })
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
