use crate::model::{Listing, SourceError};
use crate::source::traits::ListingSource;

/// Reads a JSON array of listings from disk.
pub struct JsonFileSource {
    path: String,
}

impl JsonFileSource {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl ListingSource for JsonFileSource {
    fn label(&self) -> String {
        self.path.clone()
    }

    async fn fetch(&self) -> Result<Vec<Listing>, SourceError> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        let mut listings: Vec<Listing> = serde_json::from_str(&content)?;
        for listing in listings.iter_mut().filter(|l| l.source.is_empty()) {
            listing.source = self.label();
        }
        Ok(listings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_listings() {
        let path = std::env::temp_dir().join("unit_sniper_listings_test.json");
        std::fs::write(
            &path,
            r#"[{"title": "Folgers Classic Roast Ground Coffee, 25 oz", "price": 9.76},
                {"title": "Lysol Wipes, 4-Pack (80 wipes each)", "price": 19.99, "source": "shop"}]"#,
        )
        .unwrap();

        let source = JsonFileSource::new(path.to_string_lossy());
        let listings = source.fetch().await.unwrap();
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].source, source.label());
        assert_eq!(listings[1].source, "shop");
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn test_missing_file() {
        let source = JsonFileSource::new("/nonexistent/listings.json");
        assert!(matches!(source.fetch().await, Err(SourceError::Io { .. })));
    }
}
