// src/config.rs

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SHEET_NAME: &str = "Warm Pool";
pub const DEFAULT_SHEET_BASE_URL: &str = "https://docs.google.com/spreadsheets/d";

/// Where the pool lives. Stays server-side; never echoed to callers.
#[derive(Debug, Clone)]
pub struct SheetConfig {
    pub sheet_id: String,
    pub sheet_name: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub sheet: SheetConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = get("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let sheet_id = get("SHEET_ID").context("SHEET_ID must be set")?;
        let sheet_name = get("SHEET_NAME").unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string());
        let base_url = get("SHEET_BASE_URL").unwrap_or_else(|| DEFAULT_SHEET_BASE_URL.to_string());

        Ok(Self {
            port,
            sheet: SheetConfig {
                sheet_id,
                sheet_name,
                base_url,
            },
        })
    }
}
