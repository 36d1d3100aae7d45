// HTML listing parsing
pub mod listing_parser;

pub use listing_parser::ListingParser;
