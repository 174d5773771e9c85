use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

use crate::extraction::ExtractorConfig;

/// Application configuration loaded from environment variables.
/// Everything has a default; startup fails only on malformed values.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    /// Empty means permissive CORS.
    pub cors_allowed_origins: Vec<String>,
    /// `None` disables upload archiving.
    pub s3: Option<S3Settings>,
    pub extractor_config_path: Option<PathBuf>,
    pub date_lookahead: Option<usize>,
    pub institute_lookback: Option<usize>,
    pub max_entries: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct S3Settings {
    pub bucket: String,
    /// MinIO / S3-compatible endpoint; AWS default when unset.
    pub endpoint: Option<String>,
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let s3 = var("S3_BUCKET").map(|bucket| S3Settings {
            bucket,
            endpoint: var("S3_ENDPOINT"),
            region: var("S3_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            access_key_id: var("AWS_ACCESS_KEY_ID"),
            secret_access_key: var("AWS_SECRET_ACCESS_KEY"),
        });

        Ok(Config {
            port: parse_or("PORT", var("PORT"), 8080)?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_upload_bytes: parse_or(
                "MAX_UPLOAD_BYTES",
                var("MAX_UPLOAD_BYTES"),
                10 * 1024 * 1024,
            )?,
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|o| !o.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            s3,
            extractor_config_path: var("EXTRACTOR_CONFIG_PATH").map(PathBuf::from),
            date_lookahead: parse_opt("EXTRACT_DATE_LOOKAHEAD", var("EXTRACT_DATE_LOOKAHEAD"))?,
            institute_lookback: parse_opt(
                "EXTRACT_INSTITUTE_LOOKBACK",
                var("EXTRACT_INSTITUTE_LOOKBACK"),
            )?,
            max_entries: parse_opt("EXTRACT_MAX_ENTRIES", var("EXTRACT_MAX_ENTRIES"))?,
        })
    }

    /// Extractor settings: JSON file (if configured) over the defaults, then
    /// the individual env overrides on top.
    pub fn extractor_config(&self) -> Result<ExtractorConfig> {
        let mut extractor = match &self.extractor_config_path {
            Some(path) => ExtractorConfig::from_json_file(path)?,
            None => ExtractorConfig::default(),
        };
        if let Some(n) = self.date_lookahead {
            extractor.date_lookahead = n;
        }
        if let Some(n) = self.institute_lookback {
            extractor.institute_lookback = n;
        }
        if let Some(n) = self.max_entries {
            extractor.max_entries = n;
        }
        Ok(extractor)
    }
}

fn parse_opt<T: FromStr>(key: &str, raw: Option<String>) -> Result<Option<T>> {
    raw.map(|v| {
        v.trim()
            .parse::<T>()
            .ok()
            .with_context(|| format!("{key} must be a non-negative integer, got '{v}'"))
    })
    .transpose()
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T> {
    Ok(parse_opt(key, raw)?.unwrap_or(default))
}
