//! Per-property-type income assumptions used by NOI estimation

use serde::{Deserialize, Serialize};

/// Short-term rental income assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrIncome {
    /// Gross annual income as a share of price
    pub gross_income_multiplier: f64,

    /// NOI as a share of gross income
    pub noi_margin: f64,
}

impl Default for StrIncome {
    fn default() -> Self {
        Self {
            gross_income_multiplier: 0.10,
            noi_margin: 0.55,
        }
    }
}

/// Assisted-living income assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistedLivingIncome {
    /// Net monthly income per licensed bedroom
    pub income_per_bedroom_monthly: f64,

    /// Bedroom count assumed when the listing does not state one
    pub default_bedroom_count: u32,
}

impl Default for AssistedLivingIncome {
    fn default() -> Self {
        Self {
            income_per_bedroom_monthly: 1500.0,
            default_bedroom_count: 10,
        }
    }
}

/// Income assumptions for every supported property type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeDefaults {
    pub str_rental: StrIncome,
    pub assisted_living: AssistedLivingIncome,

    /// Cap rate for multifamily listings that do not advertise one
    pub multifamily_cap_rate: f64,

    /// Ceiling on an estimated cap rate (percent scale)
    pub max_estimated_cap_rate: f64,
}

impl Default for IncomeDefaults {
    fn default() -> Self {
        Self {
            str_rental: StrIncome::default(),
            assisted_living: AssistedLivingIncome::default(),
            multifamily_cap_rate: 0.05,
            max_estimated_cap_rate: 25.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_income_defaults() {
        let income = IncomeDefaults::default();
        assert_eq!(income.str_rental.gross_income_multiplier, 0.10);
        assert_eq!(income.str_rental.noi_margin, 0.55);
        assert_eq!(income.assisted_living.income_per_bedroom_monthly, 1500.0);
        assert_eq!(income.assisted_living.default_bedroom_count, 10);
        assert_eq!(income.multifamily_cap_rate, 0.05);
        assert_eq!(income.max_estimated_cap_rate, 25.0);
    }
}
