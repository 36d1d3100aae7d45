// Selector-driven HTML listing parsing
use crate::config::Selectors;
use crate::model::{Listing, ParserError};
use crate::utils::parse_price_text;
use chrono::Utc;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

pub struct ListingParser {
    item: Selector,
    name: Selector,
    price: Selector,
    link: Option<Selector>,
}

fn selector(css: &str) -> Result<Selector, ParserError> {
    Selector::parse(css).map_err(|_| ParserError::InvalidSelector(css.to_string()))
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl ListingParser {
    pub fn new(selectors: &Selectors) -> Result<Self, ParserError> {
        Ok(Self {
            item: selector(&selectors.item)?,
            name: selector(&selectors.name)?,
            price: selector(&selectors.price)?,
            link: selectors.link.as_deref().map(selector).transpose()?,
        })
    }

    /// Extracts listings from a page. Items missing a name or a positive
    /// price are skipped.
    pub fn parse(&self, html: &str, source: &str) -> Vec<Listing> {
        let document = Html::parse_document(html);
        let mut listings = Vec::new();

        for element in document.select(&self.item) {
            let title = element.select(&self.name).next().map(element_text);
            let price = element
                .select(&self.price)
                .next()
                .and_then(|node| parse_price_text(&element_text(node)));

            let (Some(title), Some(price)) = (title, price) else {
                debug!("Skipping item without name or price in {}", source);
                continue;
            };
            if title.is_empty() {
                continue;
            }

            let link = self
                .link
                .as_ref()
                .and_then(|sel| element.select(sel).next())
                .and_then(|node| node.value().attr("href"))
                .unwrap_or("")
                .to_string();

            listings.push(Listing {
                title,
                price,
                link,
                source: source.to_string(),
                fetched_at: Utc::now(),
            });
        }

        listings
    }
}
