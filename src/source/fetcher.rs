use crate::config::Selectors;
use crate::model::{Listing, SourceError};
use crate::parser::ListingParser;
use crate::source::traits::ListingSource;

use reqwest::Client;
use tracing::info;

pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) UnitSniper/0.1";

/// Client shared by every page source.
pub fn build_client() -> Result<Client, SourceError> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(std::time::Duration::from_secs(30))
        .build()?;
    Ok(client)
}

#[derive(Debug, Clone)]
pub enum PageLocation {
    File(String),
    Url(String),
}

/// A product page parsed with configured selectors.
pub struct PageSource {
    location: PageLocation,
    parser: ListingParser,
    client: Client,
}

impl PageSource {
    pub fn new(location: PageLocation, selectors: &Selectors, client: Client) -> Result<Self, SourceError> {
        Ok(Self {
            location,
            parser: ListingParser::new(selectors)?,
            client,
        })
    }

    async fn load(&self) -> Result<String, SourceError> {
        match &self.location {
            PageLocation::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|source| SourceError::Io {
                    path: path.clone(),
                    source,
                }),
            PageLocation::Url(url) => {
                info!("Fetching {}", url);
                let response = self.client.get(url).send().await?;
                if !response.status().is_success() {
                    return Err(SourceError::InvalidResponse(response.status().as_u16()));
                }
                Ok(response.text().await?)
            }
        }
    }
}

#[async_trait::async_trait]
impl ListingSource for PageSource {
    fn label(&self) -> String {
        match &self.location {
            PageLocation::File(path) => path.clone(),
            PageLocation::Url(url) => url.clone(),
        }
    }

    async fn fetch(&self) -> Result<Vec<Listing>, SourceError> {
        let html = self.load().await?;
        Ok(self.parser.parse(&html, &self.label()))
    }
}
