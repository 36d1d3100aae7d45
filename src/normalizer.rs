use crate::model::{CatalogItem, Listing};

/// Finds the catalog item a listing competes with: the first item whose
/// keyword appears in the listing title.
pub fn match_catalog<'c>(listing: &Listing, catalog: &'c [CatalogItem]) -> Option<&'c CatalogItem> {
    let title = listing.title.to_lowercase();

    catalog.iter().find(|item| {
        item.match_keywords
            .iter()
            .any(|keyword| !keyword.trim().is_empty() && title.contains(&keyword.to_lowercase()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, keywords: &[&str]) -> CatalogItem {
        CatalogItem {
            name: name.into(),
            price: 10.0,
            match_keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    #[test]
    fn test_first_keyword_hit_wins() {
        let catalog = vec![
            item("Friskies Wet", &["Friskies"]),
            item("Any Cat Food", &["cat food"]),
        ];
        let listing = Listing::new("Purina Friskies Variety Pack Cat Food, 40 cans", 22.0, "test");
        assert_eq!(match_catalog(&listing, &catalog).unwrap().name, "Friskies Wet");
    }

    #[test]
    fn test_no_match_and_blank_keywords() {
        let catalog = vec![item("Blank", &["", "  "])];
        let listing = Listing::new("Bluetooth Speaker", 30.0, "test");
        assert!(match_catalog(&listing, &catalog).is_none());
    }
}
