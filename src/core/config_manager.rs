// src/core/config_manager.rs
//! Configuration for a digest run: search criteria and recipient from the
//! config file, sender credentials and service settings from the environment.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{DigestError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const CONFIG_PATH_VAR: &str = "JOB_DIGEST_CONFIG";
pub const DRY_RUN_VAR: &str = "JOB_DIGEST_DRY_RUN";
pub const JOBS_API_URL_VAR: &str = "WANTED_API_URL";
pub const SENDER_ADDRESS_VAR: &str = "GMAIL_ADDRESS";
pub const SENDER_SECRET_VAR: &str = "GMAIL_APP_PASSWORD";

pub const DEFAULT_JOBS_API_URL: &str = "https://www.wanted.co.kr/api/v4/jobs";

/// Number of postings requested from the job API per run.
pub const RESULT_LIMIT: u32 = 10;

/// What to search for. Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub keyword: String,
    pub locations: Vec<String>,
    pub min_experience_years: Option<u32>,
    pub result_limit: u32,
}

impl SearchCriteria {
    pub fn new(keyword: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            locations: Vec::new(),
            min_experience_years: None,
            result_limit: RESULT_LIMIT,
        }
    }

    pub fn with_locations(mut self, locations: Vec<String>) -> Self {
        self.locations = locations;
        self
    }

    pub fn with_min_experience_years(mut self, years: u32) -> Self {
        self.min_experience_years = Some(years);
        self
    }
}

/// Search criteria plus the digest recipient, as read from the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestConfig {
    pub recipient_email: String,
    pub criteria: SearchCriteria,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    recipient_email: Option<String>,
    #[serde(alias = "jobs_keyword")]
    search_keyword: Option<String>,
    #[serde(default)]
    locations: Option<Vec<String>>,
    year: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Pick the parser from the file extension; anything unknown is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => ConfigFormat::Yaml,
            Some("toml") => ConfigFormat::Toml,
            _ => ConfigFormat::Json,
        }
    }
}

impl DigestConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DigestError::Configuration(format!(
                "failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::parse(&content, ConfigFormat::from_path(path))
    }

    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        let file: ConfigFile = match format {
            ConfigFormat::Json => serde_json::from_str::<ConfigFile>(content).map_err(|e| e.to_string()),
            ConfigFormat::Yaml => serde_yaml::from_str::<ConfigFile>(content).map_err(|e| e.to_string()),
            ConfigFormat::Toml => toml::from_str::<ConfigFile>(content).map_err(|e| e.to_string()),
        }
        .map_err(|e| DigestError::Configuration(format!("failed to parse config: {}", e)))?;

        let recipient_email = required(file.recipient_email, "recipient_email")?;
        let keyword = required(file.search_keyword, "search_keyword")?;

        let mut criteria = SearchCriteria::new(&keyword)
            .with_locations(file.locations.unwrap_or_default());
        if let Some(years) = file.year {
            criteria = criteria.with_min_experience_years(years);
        }

        Ok(Self {
            recipient_email,
            criteria,
        })
    }
}

fn required(value: Option<String>, key: &str) -> Result<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(DigestError::Configuration(format!(
            "required key '{}' is missing",
            key
        ))),
    }
}

/// Sender account used to authenticate against the mail relay.
#[derive(Clone)]
pub struct Credentials {
    pub sender_address: String,
    pub sender_secret: String,
}

impl Credentials {
    pub fn from_lookup<F>(env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| match env(key) {
            Some(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(DigestError::Credential(format!(
                "{} environment variable not set",
                key
            ))),
        };

        Ok(Self {
            sender_address: read(SENDER_ADDRESS_VAR)?,
            sender_secret: read(SENDER_SECRET_VAR)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("sender_address", &self.sender_address)
            .field("sender_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub jobs_api_url: String,
    pub dry_run: bool,
}

impl ServiceConfig {
    pub fn from_lookup<F>(env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let jobs_api_url = env(JOBS_API_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_JOBS_API_URL.to_string());

        let dry_run = env(DRY_RUN_VAR)
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            jobs_api_url,
            dry_run,
        }
    }
}

/// Everything a run needs, built by the entry point and passed down explicitly.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub digest: DigestConfig,
    pub credentials: Credentials,
    pub service: ServiceConfig,
}

impl ConfigManager {
    /// Load from the process environment and the config file it points at.
    pub fn load() -> Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    pub fn load_with<F>(env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = env(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        Self::load_from(&path, env)
    }

    pub fn load_from<F>(path: &Path, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        info!("Loading digest configuration from {}", path.display());

        let digest = DigestConfig::from_file(path)?;
        let credentials = Credentials::from_lookup(&env)?;
        let service = ServiceConfig::from_lookup(&env);

        info!(
            keyword = %digest.criteria.keyword,
            locations = digest.criteria.locations.len(),
            dry_run = service.dry_run,
            "Configuration loaded"
        );

        Ok(Self {
            digest,
            credentials,
            service,
        })
    }
}
