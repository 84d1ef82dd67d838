//! Fee, commission and price-solver constants

use serde::{Deserialize, Serialize};

/// Transaction fees and commissions (decimal fractions of price)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeDefaults {
    pub assignment_fee_percent: f64,
    pub net_to_buyer_percent: f64,
    pub closing_costs_percent: f64,
    pub hard_money_rate: f64,
    pub seller_agent_commission: f64,
}

impl Default for FeeDefaults {
    fn default() -> Self {
        Self {
            assignment_fee_percent: 0.05,
            net_to_buyer_percent: 0.10,
            closing_costs_percent: 0.0125,
            hard_money_rate: 0.03,
            seller_agent_commission: 0.025,
        }
    }
}

/// Knobs for the price-for-target-COCR solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub max_iterations: u32,

    /// Convergence band on COCR, in decimal terms (0.001 = 0.1 point)
    pub tolerance: f64,

    /// Damping applied to the COCR error before it scales the price
    pub adjustment_factor: f64,

    /// Cap rate used to seed the first price estimate (price = NOI / seed)
    pub seed_cap_rate: f64,

    /// Lower bound on the estimate while iterating
    pub iteration_floor_price: f64,

    /// Floor applied to the returned price
    pub minimum_solved_price: f64,

    /// Ceiling on the estimate as a multiple of NOI
    pub max_price_multiplier: f64,

    /// Estimate used when the ceiling is hit, as a multiple of NOI
    pub conservative_price_multiplier: f64,

    /// Down payment share of the structure the solver prices against
    pub down_percent: f64,

    /// DSCR share of the structure the solver prices against
    pub dscr_ltv_percent: f64,

    /// DSCR rate of the structure the solver prices against
    pub dscr_rate: f64,

    /// DSCR amortization of the structure the solver prices against, in years
    pub dscr_term_years: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            tolerance: 0.001,
            adjustment_factor: 0.5,
            seed_cap_rate: 0.08,
            iteration_floor_price: 1_000.0,
            minimum_solved_price: 10_000.0,
            max_price_multiplier: 50.0,
            conservative_price_multiplier: 20.0,
            down_percent: 0.30,
            dscr_ltv_percent: 0.70,
            dscr_rate: 0.075,
            dscr_term_years: 30.0,
        }
    }
}
