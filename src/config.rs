use crate::model::ConfigError;
use crate::utils::non_empty;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const BEARER_TOKEN_VAR: &str = "TWITTER_BEARER_TOKEN";
pub const CONSUMER_KEY_VAR: &str = "CONSUMER_KEY";
pub const CONSUMER_SECRET_VAR: &str = "CONSUMER_SECRET";

/// How the post source authenticates against the search API.
#[derive(Debug, Clone, PartialEq)]
pub enum Credentials {
    /// Ready-made app-only token.
    Bearer(String),
    /// Consumer pair, exchanged for a bearer token on first use.
    Consumer { key: String, secret: String },
}

impl Credentials {
    /// Reads credentials from the process environment, after loading `.env`
    /// from the working directory if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = non_empty(lookup(BEARER_TOKEN_VAR)) {
            return Ok(Credentials::Bearer(token));
        }
        let key = non_empty(lookup(CONSUMER_KEY_VAR))
            .ok_or(ConfigError::MissingCredential(CONSUMER_KEY_VAR))?;
        let secret = non_empty(lookup(CONSUMER_SECRET_VAR))
            .ok_or(ConfigError::MissingCredential(CONSUMER_SECRET_VAR))?;
        Ok(Credentials::Consumer { key, secret })
    }
}

/// Post source settings, read from an optional JSON file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub api_base: String,
    pub language: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub page_size: usize,
    pub lexicon_path: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.twitter.com".to_string(),
            language: "en".to_string(),
            timeout_seconds: 10,
            user_agent: format!("tweet-sentiment/{}", env!("CARGO_PKG_VERSION")),
            page_size: 100,
            lexicon_path: None,
        }
    }
}

impl SourceConfig {
    /// Applies a `--lang` style override, rejecting a blank value.
    pub fn with_language(mut self, language: Option<String>) -> Result<Self, ConfigError> {
        if let Some(language) = language {
            self.language = non_empty(Some(language)).ok_or(ConfigError::InvalidValue {
                field: "language",
                reason: "must not be empty".into(),
            })?;
        }
        Ok(self)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if !(1..=100).contains(&self.page_size) {
            return Err(ConfigError::InvalidValue {
                field: "page_size",
                reason: format!("{} is outside 1..=100", self.page_size),
            });
        }
        if self.language.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "language",
                reason: "must not be empty".into(),
            });
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_seconds",
                reason: "must be at least 1".into(),
            });
        }
        Ok(self)
    }
}

pub fn load_config(path: &Path) -> Result<SourceConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content, path)
}

fn parse_config(content: &str, path: &Path) -> Result<SourceConfig, ConfigError> {
    let config: SourceConfig = serde_json::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()
}

/// One run of the pipeline, as requested on the command line.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub query: String,
    pub outfile: PathBuf,
    pub limit: usize,
    pub threshold: f64,
}

impl RunConfig {
    pub fn new(query: String, outfile: PathBuf, limit: usize, threshold: f64) -> Result<Self, ConfigError> {
        if query.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "query",
                reason: "must not be empty".into(),
            });
        }
        if limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "limit",
                reason: "must be at least 1".into(),
            });
        }
        if !threshold.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "threshold",
                reason: format!("{} is not a finite number", threshold),
            });
        }
        Ok(Self { query, outfile, limit, threshold })
    }
}

/// Everything `main` needs, built once at startup and passed down.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: Credentials,
    pub source: SourceConfig,
    pub run: RunConfig,
}
