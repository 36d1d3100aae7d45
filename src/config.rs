use crate::model::{CatalogItem, ConfigError};
use crate::unit_price::RuleTable;
use serde::Deserialize;
use std::fs;
use std::sync::Arc;

/// CSS selectors used to pull listings out of a product page.
#[derive(Debug, Clone, Deserialize)]
pub struct Selectors {
    pub item: String,
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceConfig {
    /// A JSON array of listings on disk
    Json { path: String },
    /// A product page, saved locally (`path`) or fetched (`url`)
    Html {
        #[serde(default)]
        path: Option<String>,
        #[serde(default)]
        url: Option<String>,
        selectors: Selectors,
    },
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub rules_path: Option<String>,
    #[serde(default)]
    pub deviation_threshold: f64,
    #[serde(default)]
    pub catalog: Vec<CatalogItem>,
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

impl AppConfig {
    /// The rule table named by `rules_path`, or the built-in one.
    pub fn rule_table(&self) -> Result<Arc<RuleTable>, ConfigError> {
        match &self.rules_path {
            Some(path) => Ok(Arc::new(RuleTable::from_path(path)?)),
            None => Ok(Arc::new(RuleTable::builtin().clone())),
        }
    }
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    Ok(config)
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}
