//! Listing records and CSV loading

mod data;
pub mod loader;

pub use data::Listing;
pub use loader::{load_listings, load_listings_from_reader};
