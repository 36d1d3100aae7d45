use crate::model::{Listing, SourceError};

/// Something that yields `(title, price)` listings for the engine.
#[async_trait::async_trait]
pub trait ListingSource: Send + Sync {
    /// Short label used in logs and stamped on each listing.
    fn label(&self) -> String;

    async fn fetch(&self) -> Result<Vec<Listing>, SourceError>;
}
