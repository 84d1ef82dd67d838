//! Deal economics: fees, net proceeds, cash flow, appreciation and refinance

use crate::config::{EngineConfig, FeeDefaults, FinancingDefaults};
use crate::error::{or_sentinel, require_finite, require_non_negative, require_positive, EngineResult};
use super::amortization::{calculate_remaining_balance, BalloonSchedule};
use serde::{Deserialize, Serialize};

/// Cost shares feeding the net-to-buyer figure (decimal fractions of price)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetToBuyerCosts {
    pub buyer_cost_percent: f64,
    pub seller_cost_percents: Vec<f64>,
    /// Charged only against the cash (non-DSCR) part of the price
    pub additional_cost_percent: f64,
    pub dscr_ltv_percent: f64,
}

impl NetToBuyerCosts {
    /// Net-to-buyer share less seller agent and closing costs, with hard-money
    /// cost on the cash portion
    pub fn from_config(config: &EngineConfig) -> Self {
        let fees = &config.fees;
        Self {
            buyer_cost_percent: fees.net_to_buyer_percent,
            seller_cost_percents: vec![fees.seller_agent_commission, fees.closing_costs_percent],
            additional_cost_percent: fees.hard_money_rate,
            dscr_ltv_percent: config.financing.dscr_ltv_percent,
        }
    }
}

/// Inputs for the cash-out-at-refinance projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinanceScenario {
    pub original_price: f64,
    pub dscr_loan_amount: f64,
    pub seller_fi_amount: f64,
    /// Annual appreciation as a decimal
    pub appreciation_rate: f64,
    pub balloon_years: f64,
    /// New loan LTV, percent scale (70 = 70%)
    pub refi_ltv_percent: f64,
}

impl RefinanceScenario {
    /// Scenario at the configured appreciation, balloon and refinance LTV
    pub fn new(
        original_price: f64,
        dscr_loan_amount: f64,
        seller_fi_amount: f64,
        financing: &FinancingDefaults,
    ) -> Self {
        Self {
            original_price,
            dscr_loan_amount,
            seller_fi_amount,
            appreciation_rate: financing.appreciation_rate,
            balloon_years: financing.balloon_years,
            refi_ltv_percent: financing.refi_ltv_percent,
        }
    }
}

/// Assignment fee on a percent-scale fee (3 = 3%)
pub fn calculate_assignment_fee(asking_price: f64, fee_percent: f64) -> f64 {
    or_sentinel(
        "calculate_assignment_fee",
        try_calculate_assignment_fee(asking_price, fee_percent),
        0.0,
    )
}

/// Strict form of [`calculate_assignment_fee`]
pub fn try_calculate_assignment_fee(asking_price: f64, fee_percent: f64) -> EngineResult<f64> {
    let asking_price = require_non_negative("asking_price", asking_price)?;
    let fee_percent = require_non_negative("fee_percent", fee_percent)?;
    Ok(asking_price * fee_percent / 100.0)
}

/// Assignment fee at the configured default share
pub fn default_assignment_fee(asking_price: f64, fees: &FeeDefaults) -> f64 {
    or_sentinel(
        "default_assignment_fee",
        require_non_negative("asking_price", asking_price).map(|p| p * fees.assignment_fee_percent),
        0.0,
    )
}

/// Buyer-side proceeds less seller-side costs, with the additional cost
/// applied only to the portion of price not financed by DSCR debt
pub fn calculate_net_to_buyer(asking_price: f64, costs: &NetToBuyerCosts) -> f64 {
    or_sentinel(
        "calculate_net_to_buyer",
        try_calculate_net_to_buyer(asking_price, costs),
        0.0,
    )
}

/// Strict form of [`calculate_net_to_buyer`]
pub fn try_calculate_net_to_buyer(asking_price: f64, costs: &NetToBuyerCosts) -> EngineResult<f64> {
    let price = require_non_negative("asking_price", asking_price)?;
    let buyer = require_non_negative("buyer_cost_percent", costs.buyer_cost_percent)?;
    let additional = require_non_negative("additional_cost_percent", costs.additional_cost_percent)?;
    let dscr = require_non_negative("dscr_ltv_percent", costs.dscr_ltv_percent)?;

    let mut seller_costs = 0.0;
    for &share in &costs.seller_cost_percents {
        seller_costs += price * require_non_negative("seller_cost_percent", share)?;
    }

    Ok(price * buyer - seller_costs - additional * (price - price * dscr))
}

/// Value after compounding at `annual_rate` for `years`
///
/// Negative rate or years, or a non-positive value, echo the value unchanged
/// (a non-finite value becomes 0).
pub fn calculate_appreciated_value(current_value: f64, annual_rate: f64, years: f64) -> f64 {
    let echo = if current_value.is_finite() { current_value } else { 0.0 };
    or_sentinel(
        "calculate_appreciated_value",
        try_calculate_appreciated_value(current_value, annual_rate, years),
        echo,
    )
}

/// Strict form of [`calculate_appreciated_value`]
pub fn try_calculate_appreciated_value(current_value: f64, annual_rate: f64, years: f64) -> EngineResult<f64> {
    let value = require_positive("current_value", current_value)?;
    let rate = require_non_negative("annual_rate", annual_rate)?;
    let years = require_non_negative("years", years)?;
    Ok(value * (1.0 + rate).powf(years))
}

/// Cash released (positive) or required (negative) when refinancing at the balloon
///
/// New loan at `refi_ltv_percent` of the appreciated value, less what is
/// still owed on the DSCR loan and the seller carry.
pub fn calculate_cash_out_after_refi(scenario: &RefinanceScenario, financing: &FinancingDefaults) -> f64 {
    or_sentinel(
        "calculate_cash_out_after_refi",
        try_calculate_cash_out_after_refi(scenario, financing),
        0.0,
    )
}

/// Strict form of [`calculate_cash_out_after_refi`]
pub fn try_calculate_cash_out_after_refi(
    scenario: &RefinanceScenario,
    financing: &FinancingDefaults,
) -> EngineResult<f64> {
    require_non_negative("original_price", scenario.original_price)?;
    require_non_negative("dscr_loan_amount", scenario.dscr_loan_amount)?;
    require_non_negative("seller_fi_amount", scenario.seller_fi_amount)?;
    require_finite("appreciation_rate", scenario.appreciation_rate)?;
    require_finite("balloon_years", scenario.balloon_years)?;
    let refi_ltv_percent = require_non_negative("refi_ltv_percent", scenario.refi_ltv_percent)?;

    let appreciated_value = calculate_appreciated_value(
        scenario.original_price,
        scenario.appreciation_rate,
        scenario.balloon_years,
    );

    let remaining_dscr = calculate_remaining_balance(&BalloonSchedule::new(
        scenario.dscr_loan_amount,
        financing.dscr_rate,
        financing.dscr_amortization_years,
        scenario.balloon_years,
    ));
    let remaining_seller_fi = calculate_remaining_balance(&BalloonSchedule::new(
        scenario.seller_fi_amount,
        financing.seller_fi_rate,
        financing.seller_fi_amortization_years,
        scenario.balloon_years,
    ));

    let new_loan_amount = appreciated_value * refi_ltv_percent / 100.0;
    Ok(new_loan_amount - (remaining_dscr + remaining_seller_fi))
}

/// NOI less debt service; all three inputs must share one period
pub fn calculate_cash_flow(period_noi: f64, dscr_payment: f64, other_debt_payment: f64) -> f64 {
    or_sentinel(
        "calculate_cash_flow",
        try_calculate_cash_flow(period_noi, dscr_payment, other_debt_payment),
        0.0,
    )
}

/// Strict form of [`calculate_cash_flow`]
pub fn try_calculate_cash_flow(period_noi: f64, dscr_payment: f64, other_debt_payment: f64) -> EngineResult<f64> {
    let noi = require_finite("period_noi", period_noi)?;
    let dscr = require_finite("dscr_payment", dscr_payment)?;
    let other = require_finite("other_debt_payment", other_debt_payment)?;
    Ok(noi - dscr - other)
}

/// Annualized monthly cash flow over the down payment, as a decimal
pub fn calculate_cash_flow_yield(monthly_cash_flow: f64, down_payment: f64) -> f64 {
    or_sentinel(
        "calculate_cash_flow_yield",
        require_finite("monthly_cash_flow", monthly_cash_flow).and_then(|cf| {
            require_positive("down_payment", down_payment).map(|down| (cf * 12.0) / down)
        }),
        0.0,
    )
}

/// Discount of an offer off the asking price, as a decimal (may be negative)
pub fn calculate_discount_from_price(asking_price: f64, offer_price: f64) -> f64 {
    or_sentinel(
        "calculate_discount_from_price",
        require_positive("asking_price", asking_price).and_then(|ask| {
            require_finite("offer_price", offer_price).map(|offer| (ask - offer) / ask)
        }),
        0.0,
    )
}

/// Offer price implied by a decimal discount off the asking price
pub fn calculate_price_from_discount(asking_price: f64, discount: f64) -> f64 {
    or_sentinel(
        "calculate_price_from_discount",
        require_positive("asking_price", asking_price).and_then(|ask| {
            require_finite("discount", discount).map(|d| ask * (1.0 - d))
        }),
        0.0,
    )
}

/// Decimal to percent scale, with 100 standing in for a missing or invalid value
pub fn safe_percentage(value: Option<f64>) -> f64 {
    safe_percentage_or(value, 100.0)
}

/// Decimal to percent scale with an explicit fallback
pub fn safe_percentage_or(value: Option<f64>, fallback: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v * 100.0,
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn financing() -> FinancingDefaults {
        FinancingDefaults::default()
    }

    #[test]
    fn test_assignment_fee() {
        assert_eq!(calculate_assignment_fee(500_000.0, 3.0), 15_000.0);
        assert_eq!(default_assignment_fee(500_000.0, &FeeDefaults::default()), 25_000.0);
        assert_eq!(calculate_assignment_fee(-1.0, 3.0), 0.0);
        assert_eq!(calculate_assignment_fee(500_000.0, f64::NAN), 0.0);
    }

    #[test]
    fn test_net_to_buyer_defaults() {
        let costs = NetToBuyerCosts::from_config(&EngineConfig::default());
        let net = calculate_net_to_buyer(500_000.0, &costs);
        // 10% buyer - (2.5% + 1.25%) seller - 3% on the 30% cash portion
        assert_abs_diff_eq!(net, 50_000.0 - 12_500.0 - 6_250.0 - 4_500.0, epsilon = 1e-6);
        assert!(net > 0.0);
    }

    #[test]
    fn test_net_to_buyer_prices_additional_cost_on_cash_only() {
        let costs = NetToBuyerCosts {
            buyer_cost_percent: 0.0,
            seller_cost_percents: vec![],
            additional_cost_percent: 0.10,
            dscr_ltv_percent: 0.80,
        };
        assert_abs_diff_eq!(calculate_net_to_buyer(1_000_000.0, &costs), -20_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_net_to_buyer_degenerate() {
        let mut costs = NetToBuyerCosts::from_config(&EngineConfig::default());
        assert_eq!(calculate_net_to_buyer(f64::NAN, &costs), 0.0);
        costs.seller_cost_percents.push(-0.01);
        assert_eq!(calculate_net_to_buyer(500_000.0, &costs), 0.0);
    }

    #[test]
    fn test_appreciation_compounds() {
        assert_abs_diff_eq!(calculate_appreciated_value(500_000.0, 0.05, 1.0), 525_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(calculate_appreciated_value(500_000.0, 0.05, 2.0), 551_250.0, epsilon = 1.0);
        assert_abs_diff_eq!(
            calculate_appreciated_value(500_000.0, 0.045, 7.0),
            500_000.0 * 1.045_f64.powf(7.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_appreciation_identity_cases() {
        assert_eq!(calculate_appreciated_value(500_000.0, 0.0, 7.0), 500_000.0);
        assert_eq!(calculate_appreciated_value(0.0, 0.045, 7.0), 0.0);
        assert_eq!(calculate_appreciated_value(-500_000.0, 0.05, 5.0), -500_000.0);
        assert_eq!(calculate_appreciated_value(500_000.0, -0.01, 7.0), 500_000.0);
        assert_eq!(calculate_appreciated_value(500_000.0, 0.045, 0.0), 500_000.0);
        assert_eq!(calculate_appreciated_value(500_000.0, 0.05, -5.0), 500_000.0);
        assert_eq!(calculate_appreciated_value(f64::NAN, 0.05, 5.0), 0.0);
    }

    #[test]
    fn test_cash_out_positive_for_typical_deal() {
        let scenario = RefinanceScenario::new(500_000.0, 350_000.0, 100_000.0, &financing());
        let cash_out = calculate_cash_out_after_refi(&scenario, &financing());
        assert!(cash_out > 0.0);
        assert!(cash_out.is_finite());

        let dscr_only = RefinanceScenario::new(500_000.0, 350_000.0, 0.0, &financing());
        assert!(calculate_cash_out_after_refi(&dscr_only, &financing()) > 0.0);
    }

    #[test]
    fn test_cash_out_matches_components() {
        let f = financing();
        let scenario = RefinanceScenario::new(500_000.0, 350_000.0, 100_000.0, &f);
        let appreciated = calculate_appreciated_value(500_000.0, 0.045, 7.0);
        let dscr = BalloonSchedule::new(350_000.0, 0.075, 30.0, 7.0).remaining_balance();
        let carry = 100_000.0 * (360.0 - 84.0) / 360.0;
        let expected = appreciated * 0.70 - (dscr + carry);
        assert_abs_diff_eq!(calculate_cash_out_after_refi(&scenario, &f), expected, epsilon = 1e-6);
    }

    #[test]
    fn test_cash_out_sensitivities() {
        let f = financing();
        let mut low = RefinanceScenario::new(500_000.0, 350_000.0, 100_000.0, &f);
        low.appreciation_rate = 0.02;
        let mut high = low.clone();
        high.appreciation_rate = 0.08;
        assert!(calculate_cash_out_after_refi(&high, &f) > calculate_cash_out_after_refi(&low, &f));

        let mut shorter = RefinanceScenario::new(500_000.0, 350_000.0, 100_000.0, &f);
        shorter.balloon_years = 5.0;
        let mut longer = shorter.clone();
        longer.balloon_years = 10.0;
        assert!(calculate_cash_out_after_refi(&longer, &f) > calculate_cash_out_after_refi(&shorter, &f));
    }

    #[test]
    fn test_cash_out_can_require_cash() {
        let f = financing();
        let mut scenario = RefinanceScenario::new(500_000.0, 450_000.0, 50_000.0, &f);
        scenario.appreciation_rate = 0.0;
        assert!(calculate_cash_out_after_refi(&scenario, &f) < 0.0);
    }

    #[test]
    fn test_cash_out_degenerate() {
        let f = financing();
        let empty = RefinanceScenario::new(0.0, 0.0, 0.0, &f);
        assert_eq!(calculate_cash_out_after_refi(&empty, &f), 0.0);

        let nan = RefinanceScenario::new(f64::NAN, 350_000.0, 0.0, &f);
        assert_eq!(calculate_cash_out_after_refi(&nan, &f), 0.0);
    }

    #[test]
    fn test_cash_flow() {
        assert_eq!(calculate_cash_flow(5_000.0, 2_500.0, 500.0), 2_000.0);
        assert_eq!(calculate_cash_flow(3_000.0, 2_500.0, 1_000.0), -500.0);
        assert_eq!(calculate_cash_flow(f64::NAN, 2_500.0, 1_000.0), 0.0);
        assert_eq!(calculate_cash_flow(3_000.0, f64::INFINITY, 0.0), 0.0);
    }

    #[test]
    fn test_cash_flow_yield() {
        assert_eq!(calculate_cash_flow_yield(1_000.0, 100_000.0), 0.12);
        assert_eq!(calculate_cash_flow_yield(-500.0, 100_000.0), -0.06);
        assert_eq!(calculate_cash_flow_yield(1_000.0, 0.0), 0.0);
        assert_eq!(calculate_cash_flow_yield(f64::NAN, 100_000.0), 0.0);
    }

    #[test]
    fn test_discount_conversions() {
        assert_abs_diff_eq!(calculate_discount_from_price(1_000_000.0, 900_000.0), 0.10, epsilon = 1e-12);
        assert_abs_diff_eq!(calculate_discount_from_price(1_000_000.0, 1_100_000.0), -0.10, epsilon = 1e-12);
        assert_eq!(calculate_discount_from_price(1_000_000.0, 1_000_000.0), 0.0);
        assert_eq!(calculate_discount_from_price(0.0, 900_000.0), 0.0);

        assert_eq!(calculate_price_from_discount(1_000_000.0, 0.10), 900_000.0);
        assert_eq!(calculate_price_from_discount(1_000_000.0, 0.0), 1_000_000.0);
        assert_abs_diff_eq!(calculate_price_from_discount(1_000_000.0, -0.10), 1_100_000.0, epsilon = 1e-6);
        assert_eq!(calculate_price_from_discount(-1_000_000.0, 0.10), 0.0);
    }

    #[test]
    fn test_safe_percentage() {
        assert_eq!(safe_percentage(Some(0.075)), 7.5);
        assert_eq!(safe_percentage(Some(0.25)), 25.0);
        assert_eq!(safe_percentage(Some(1.0)), 100.0);
        assert_eq!(safe_percentage(Some(0.0)), 0.0);
        assert_eq!(safe_percentage(None), 100.0);
        assert_eq!(safe_percentage(Some(f64::NAN)), 100.0);
        assert_eq!(safe_percentage_or(None, 50.0), 50.0);
    }
}
