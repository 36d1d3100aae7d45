// Core structs: Listing, CatalogItem and the shell error types
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A competitor or marketplace product listing as handed to the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub source: String,
    #[serde(default = "Utc::now")]
    pub fetched_at: DateTime<Utc>,
}

impl Listing {
    pub fn new(title: impl Into<String>, price: f64, source: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price,
            link: String::new(),
            source: source.into(),
            fetched_at: Utc::now(),
        }
    }
}

/// One item of the user's subscription catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub match_keywords: Vec<String>,
}

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("rule `{rule}` has an invalid pattern: {source}")]
    InvalidPattern {
        rule: String,
        #[source]
        source: regex::Error,
    },
    #[error("malformed rule table: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("cannot read rule table: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error(transparent)]
    Rules(#[from] RuleError),
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("http error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("invalid response status {0}")]
    InvalidResponse(u16),
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed listings: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error(transparent)]
    Parser(#[from] ParserError),
    #[error("html source needs a `path` or a `url`")]
    MissingLocation,
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("invalid selector `{0}`")]
    InvalidSelector(String),
}
