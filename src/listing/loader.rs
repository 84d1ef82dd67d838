//! Load listings from a CSV export
//!
//! Columns: `ListingID`, `Address`, `AskingPrice`, `CapRate`, `PropertyType`,
//! `Bedrooms`. Prices may carry currency formatting ("$1,250,000"); cap rates
//! are read as listed, in percent ("7.5" or "7.5%"). A blank or zero cap rate
//! counts as not advertised.

use super::Listing;
use crate::error::{EngineError, EngineResult};
use crate::finance::PropertyType;
use crate::format::{extract_numeric_value, InputKind};
use csv::Reader;
use std::io::Read;
use std::path::Path;

/// Raw CSV row as exported by the listing collector
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "ListingID")]
    listing_id: String,
    #[serde(rename = "Address", default)]
    address: String,
    #[serde(rename = "AskingPrice")]
    asking_price: String,
    #[serde(rename = "CapRate", default)]
    cap_rate: Option<String>,
    #[serde(rename = "PropertyType", default)]
    property_type: String,
    #[serde(rename = "Bedrooms", default)]
    bedrooms: Option<u32>,
}

impl CsvRow {
    /// `Ok(None)` for rows without a usable asking price
    fn to_listing(self) -> EngineResult<Option<Listing>> {
        let listing_id = self.listing_id.trim().to_string();
        if listing_id.is_empty() {
            return Err(EngineError::InvalidRecord(format!(
                "listing without ListingID (address: {:?})",
                self.address
            )));
        }

        let asking_price = extract_numeric_value(&self.asking_price, InputKind::Currency);
        if asking_price <= 0.0 {
            log::warn!(
                "Skipping listing {}: no usable asking price ({:?})",
                listing_id,
                self.asking_price
            );
            return Ok(None);
        }

        let cap_rate_percent = self
            .cap_rate
            .as_deref()
            .map(|raw| extract_numeric_value(raw, InputKind::Percent))
            .unwrap_or(0.0);
        if cap_rate_percent < 0.0 {
            return Err(EngineError::InvalidRecord(format!(
                "listing {} has negative cap rate {}",
                listing_id, cap_rate_percent
            )));
        }

        Ok(Some(Listing {
            listing_id,
            address: self.address.trim().to_string(),
            asking_price,
            cap_rate: (cap_rate_percent > 0.0).then(|| cap_rate_percent / 100.0),
            property_type: PropertyType::from_label(&self.property_type),
            bedrooms: self.bedrooms,
        }))
    }
}

fn collect_listings<R: Read>(mut csv_reader: Reader<R>) -> EngineResult<Vec<Listing>> {
    let mut listings = Vec::new();
    let mut skipped = 0usize;

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        match row.to_listing()? {
            Some(listing) => listings.push(listing),
            None => skipped += 1,
        }
    }

    log::debug!("Loaded {} listings ({} skipped)", listings.len(), skipped);
    Ok(listings)
}

/// Load all listings from a CSV file
pub fn load_listings<P: AsRef<Path>>(path: P) -> EngineResult<Vec<Listing>> {
    collect_listings(Reader::from_path(path)?)
}

/// Load listings from any reader (e.g., string buffer, stdin)
pub fn load_listings_from_reader<R: Read>(reader: R) -> EngineResult<Vec<Listing>> {
    collect_listings(Reader::from_reader(reader))
}
