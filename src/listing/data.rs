//! Listing records as collected from listing pages

use crate::config::IncomeDefaults;
use crate::finance::{IncomeOverrides, PropertyIncomeProfile, PropertyType};
use serde::{Deserialize, Serialize};

/// One property listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub listing_id: String,
    #[serde(default)]
    pub address: String,
    pub asking_price: f64,
    /// Advertised cap rate as a decimal (0.075 = 7.5%)
    pub cap_rate: Option<f64>,
    pub property_type: PropertyType,
    /// Bedroom count, used only for assisted living
    pub bedrooms: Option<u32>,
}

impl Listing {
    pub fn new(
        listing_id: impl Into<String>,
        asking_price: f64,
        cap_rate: f64,
        property_type: PropertyType,
    ) -> Self {
        Self {
            listing_id: listing_id.into(),
            address: String::new(),
            asking_price,
            cap_rate: Some(cap_rate),
            property_type,
            bedrooms: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_bedrooms(mut self, bedrooms: u32) -> Self {
        self.bedrooms = Some(bedrooms);
        self
    }

    pub fn without_cap_rate(mut self) -> Self {
        self.cap_rate = None;
        self
    }

    /// Inputs for NOI estimation, carrying the bedroom count as an override
    ///
    /// A listing without an advertised cap rate is priced at the configured
    /// multifamily cap rate.
    pub fn income_profile(&self, income: &IncomeDefaults) -> PropertyIncomeProfile {
        let overrides = IncomeOverrides {
            bedroom_count: self.bedrooms,
            ..Default::default()
        };
        let cap_rate = self.cap_rate.unwrap_or(income.multifamily_cap_rate);
        PropertyIncomeProfile::new(self.asking_price, cap_rate, self.property_type)
            .with_overrides(overrides)
    }
}
