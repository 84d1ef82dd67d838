//! Net operating income estimation by property category

use crate::config::IncomeDefaults;
use crate::error::{or_sentinel, require_non_negative, require_positive, EngineResult};
use serde::{Deserialize, Serialize};

/// Property category driving the income formula
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    #[default]
    Multifamily,
    ShortTermRental,
    AssistedLiving,
}

impl PropertyType {
    /// Parse a listing label; anything unrecognized is priced as multifamily
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "str" | "short-term rental" | "short_term_rental" | "shorttermrental" => {
                PropertyType::ShortTermRental
            }
            "assisted" | "assisted living" | "assisted_living" | "assistedliving" => {
                PropertyType::AssistedLiving
            }
            _ => PropertyType::Multifamily,
        }
    }

    /// Short label used in listing files
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Multifamily => "multifamily",
            PropertyType::ShortTermRental => "str",
            PropertyType::AssistedLiving => "assisted",
        }
    }
}

/// Per-call overrides of the configured income assumptions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeOverrides {
    pub gross_income_multiplier: Option<f64>,
    pub noi_margin: Option<f64>,
    pub income_per_bedroom_monthly: Option<f64>,
    pub bedroom_count: Option<u32>,
}

impl IncomeOverrides {
    pub fn with_bedrooms(bedroom_count: u32) -> Self {
        Self {
            bedroom_count: Some(bedroom_count),
            ..Default::default()
        }
    }
}

/// Inputs for NOI estimation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyIncomeProfile {
    pub asking_price: f64,
    /// Cap rate as a decimal; only multifamily uses it
    pub cap_rate: f64,
    pub property_type: PropertyType,
    #[serde(default)]
    pub overrides: IncomeOverrides,
}

impl PropertyIncomeProfile {
    pub fn new(asking_price: f64, cap_rate: f64, property_type: PropertyType) -> Self {
        Self {
            asking_price,
            cap_rate,
            property_type,
            overrides: IncomeOverrides::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: IncomeOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Annual NOI for a property, dispatched on its type
///
/// - Multifamily: price × cap rate
/// - Short-term rental: price × gross multiplier × NOI margin
/// - Assisted living: bedrooms × monthly income per bedroom × 12, independent
///   of price and cap rate
///
/// Non-finite or negative inputs return 0.
pub fn estimate_noi(profile: &PropertyIncomeProfile, income: &IncomeDefaults) -> f64 {
    or_sentinel("estimate_noi", try_estimate_noi(profile, income), 0.0)
}

/// Strict form of [`estimate_noi`]
pub fn try_estimate_noi(profile: &PropertyIncomeProfile, income: &IncomeDefaults) -> EngineResult<f64> {
    let overrides = &profile.overrides;

    match profile.property_type {
        PropertyType::Multifamily => {
            let price = require_non_negative("asking_price", profile.asking_price)?;
            let cap_rate = require_non_negative("cap_rate", profile.cap_rate)?;
            Ok(price * cap_rate)
        }
        PropertyType::ShortTermRental => {
            let price = require_non_negative("asking_price", profile.asking_price)?;
            let multiplier = require_non_negative(
                "gross_income_multiplier",
                overrides
                    .gross_income_multiplier
                    .unwrap_or(income.str_rental.gross_income_multiplier),
            )?;
            let margin = require_non_negative(
                "noi_margin",
                overrides.noi_margin.unwrap_or(income.str_rental.noi_margin),
            )?;
            Ok(price * multiplier * margin)
        }
        PropertyType::AssistedLiving => {
            let bedrooms = overrides
                .bedroom_count
                .unwrap_or(income.assisted_living.default_bedroom_count);
            let per_bedroom = require_non_negative(
                "income_per_bedroom_monthly",
                overrides
                    .income_per_bedroom_monthly
                    .unwrap_or(income.assisted_living.income_per_bedroom_monthly),
            )?;
            Ok(bedrooms as f64 * per_bedroom * 12.0)
        }
    }
}

/// Implied cap rate (percent scale) from NOI and price, capped at the configured maximum
///
/// Returns 0 for a non-positive price or negative NOI.
pub fn estimate_cap_rate(noi: f64, price: f64, income: &IncomeDefaults) -> f64 {
    or_sentinel("estimate_cap_rate", try_estimate_cap_rate(noi, price, income), 0.0)
}

/// Strict form of [`estimate_cap_rate`]
pub fn try_estimate_cap_rate(noi: f64, price: f64, income: &IncomeDefaults) -> EngineResult<f64> {
    let noi = require_non_negative("noi", noi)?;
    let price = require_positive("price", price)?;
    Ok((noi / price * 100.0).min(income.max_estimated_cap_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn income() -> IncomeDefaults {
        IncomeDefaults::default()
    }

    #[test]
    fn test_multifamily_uses_cap_rate() {
        let profile = PropertyIncomeProfile::new(500_000.0, 0.08, PropertyType::Multifamily);
        assert_eq!(estimate_noi(&profile, &income()), 40_000.0);

        let profile = PropertyIncomeProfile::new(2_500_000.0, 0.075, PropertyType::Multifamily);
        assert_eq!(estimate_noi(&profile, &income()), 187_500.0);
    }

    #[test]
    fn test_zero_cap_rate() {
        let profile = PropertyIncomeProfile::new(1_000_000.0, 0.0, PropertyType::Multifamily);
        assert_eq!(estimate_noi(&profile, &income()), 0.0);
    }

    #[test]
    fn test_str_ignores_cap_rate() {
        let profile = PropertyIncomeProfile::new(800_000.0, 0.0, PropertyType::ShortTermRental);
        assert_eq!(estimate_noi(&profile, &income()), 800_000.0 * 0.10 * 0.55);

        let with_cap = PropertyIncomeProfile::new(800_000.0, 0.09, PropertyType::ShortTermRental);
        assert_eq!(estimate_noi(&with_cap, &income()), estimate_noi(&profile, &income()));
    }

    #[test]
    fn test_str_overrides() {
        let overrides = IncomeOverrides {
            gross_income_multiplier: Some(0.12),
            noi_margin: Some(0.5),
            ..Default::default()
        };
        let profile = PropertyIncomeProfile::new(500_000.0, 0.0, PropertyType::ShortTermRental)
            .with_overrides(overrides);
        assert_eq!(estimate_noi(&profile, &income()), 500_000.0 * 0.12 * 0.5);
    }

    #[test]
    fn test_assisted_living_defaults() {
        let profile = PropertyIncomeProfile::new(500_000.0, 0.08, PropertyType::AssistedLiving);
        assert_eq!(estimate_noi(&profile, &income()), 10.0 * 1500.0 * 12.0);
    }

    #[test]
    fn test_assisted_living_invariant_to_price_and_cap_rate() {
        let overrides = IncomeOverrides::with_bedrooms(15);
        let a = PropertyIncomeProfile::new(1_500_000.0, 0.0, PropertyType::AssistedLiving)
            .with_overrides(overrides.clone());
        let b = PropertyIncomeProfile::new(90_000.0, 0.12, PropertyType::AssistedLiving)
            .with_overrides(overrides);

        assert_eq!(estimate_noi(&a, &income()), 15.0 * 1500.0 * 12.0);
        assert_eq!(estimate_noi(&a, &income()), estimate_noi(&b, &income()));
    }

    #[test]
    fn test_unknown_label_falls_back_to_multifamily() {
        assert_eq!(PropertyType::from_label("str"), PropertyType::ShortTermRental);
        assert_eq!(PropertyType::from_label(" Assisted "), PropertyType::AssistedLiving);
        assert_eq!(PropertyType::from_label("multifamily"), PropertyType::Multifamily);
        assert_eq!(PropertyType::from_label("warehouse"), PropertyType::Multifamily);

        let profile = PropertyIncomeProfile::new(
            400_000.0,
            0.06,
            PropertyType::from_label("mixed-use"),
        );
        assert_eq!(estimate_noi(&profile, &income()), 24_000.0);
    }

    #[test]
    fn test_degenerate_inputs() {
        let nan = PropertyIncomeProfile::new(f64::NAN, 0.08, PropertyType::Multifamily);
        assert_eq!(estimate_noi(&nan, &income()), 0.0);

        let negative = PropertyIncomeProfile::new(-500_000.0, 0.08, PropertyType::ShortTermRental);
        assert_eq!(estimate_noi(&negative, &income()), 0.0);
    }

    #[test]
    fn test_estimated_cap_rate_is_capped() {
        assert!((estimate_cap_rate(40_000.0, 500_000.0, &income()) - 8.0).abs() < 1e-9);
        assert_eq!(estimate_cap_rate(400_000.0, 500_000.0, &income()), 25.0);
        assert_eq!(estimate_cap_rate(40_000.0, 0.0, &income()), 0.0);
    }
}
