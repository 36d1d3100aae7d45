// Listing sources: JSON files and product pages
pub mod fetcher;
pub mod file;
pub mod traits;

pub use fetcher::{build_client, PageLocation, PageSource};
pub use file::JsonFileSource;
pub use traits::ListingSource;

use crate::config::SourceConfig;
use crate::model::SourceError;

/// Builds the source described by one config entry.
pub fn from_config(cfg: &SourceConfig, client: &reqwest::Client) -> Result<Box<dyn ListingSource>, SourceError> {
    match cfg {
        SourceConfig::Json { path } => Ok(Box::new(JsonFileSource::new(path.clone()))),
        SourceConfig::Html { path, url, selectors } => {
            let location = match (path, url) {
                (Some(path), _) => PageLocation::File(path.clone()),
                (None, Some(url)) => PageLocation::Url(url.clone()),
                (None, None) => {
                    return Err(SourceError::MissingLocation);
                }
            };
            Ok(Box::new(PageSource::new(location, selectors, client.clone())?))
        }
    }
}
