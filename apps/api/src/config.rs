use anyhow::{bail, Context, Result};

use crate::resume::fields::NumberingPlan;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on the multipart request body.
    pub max_upload_bytes: usize,
    pub numbering_plan: NumberingPlan,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_upload_bytes: match std::env::var("MAX_UPLOAD_BYTES") {
                Ok(raw) => raw
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a positive integer")?,
                Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
            },
            numbering_plan: parse_numbering_plan(
                &std::env::var("PHONE_NUMBERING_PLAN").unwrap_or_else(|_| "au".to_string()),
            )?,
        })
    }
}

fn parse_numbering_plan(raw: &str) -> Result<NumberingPlan> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "au" | "australia" => Ok(NumberingPlan::Australia),
        other => bail!("PHONE_NUMBERING_PLAN '{other}' is not supported (expected 'au')"),
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            numbering_plan: NumberingPlan::Australia,
        }
    }
}
