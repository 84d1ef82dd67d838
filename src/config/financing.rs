//! Default financing terms: DSCR loan, seller financing, balloon and refinance

use serde::{Deserialize, Serialize};

/// Loan terms and capital structure used when a caller does not supply its own
///
/// Rates and shares are decimal fractions (0.075 = 7.5%) except
/// `refi_ltv_percent`, which is percent scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancingDefaults {
    /// DSCR loan annual interest rate
    pub dscr_rate: f64,

    /// DSCR loan amortization in years
    pub dscr_amortization_years: f64,

    /// Seller financing annual interest rate (usually interest-free)
    pub seller_fi_rate: f64,

    /// Seller financing amortization in years
    pub seller_fi_amortization_years: f64,

    /// Years until the balloon / refinance event
    pub balloon_years: f64,

    /// Down payment share of price for the standard structure
    pub down_percent: f64,

    /// DSCR loan share of price for the standard structure
    pub dscr_ltv_percent: f64,

    /// Upper bound on the DSCR share
    pub max_dscr_ltv_percent: f64,

    /// Seller carry share when the deal is seller financed
    pub seller_fi_carry_percent: f64,

    /// Annual appreciation assumed until the balloon
    pub appreciation_rate: f64,

    /// Loan-to-value of the refinance at the balloon (percent scale)
    pub refi_ltv_percent: f64,
}

impl Default for FinancingDefaults {
    fn default() -> Self {
        Self {
            dscr_rate: 0.075,                  // 7.5%
            dscr_amortization_years: 30.0,
            seller_fi_rate: 0.0,               // interest-free carry
            seller_fi_amortization_years: 30.0,
            balloon_years: 7.0,
            down_percent: 0.30,
            dscr_ltv_percent: 0.70,
            max_dscr_ltv_percent: 0.70,
            seller_fi_carry_percent: 0.40,
            appreciation_rate: 0.045,          // 4.5% annual
            refi_ltv_percent: 70.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_terms() {
        let f = FinancingDefaults::default();
        assert_eq!(f.dscr_rate, 0.075);
        assert_eq!(f.seller_fi_rate, 0.0);
        assert_eq!(f.dscr_amortization_years, 30.0);
        assert_eq!(f.balloon_years, 7.0);
        assert_eq!(f.seller_fi_carry_percent, 0.40);
        assert!(f.dscr_ltv_percent <= f.max_dscr_ltv_percent);
    }
}
