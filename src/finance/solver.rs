//! Cash-on-cash return (COCR) and the price-for-target-COCR solver
//!
//! COCR falls monotonically as price rises (NOI is fixed while debt service
//! and cash invested scale with price), so the solver nudges a price estimate
//! up when the return is too high and down when it is too low.

use crate::config::{EngineConfig, SolverConfig};
use crate::error::{
    or_sentinel, require_finite, require_non_negative, require_positive, EngineError, EngineResult,
};
use super::amortization::try_calculate_payment;
use serde::{Deserialize, Serialize};

/// Capital structure for a purchase
///
/// Shares and rates are decimal fractions (0.30 = 30%). Seller financing is
/// senior: the DSCR loan only gets `dscr_ltv_percent - seller_fi_percent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingStructure {
    pub asking_price: f64,
    pub down_percent: f64,
    pub dscr_ltv_percent: f64,
    pub dscr_rate: f64,
    pub dscr_term_years: f64,
    pub seller_fi_percent: f64,
    pub seller_fi_rate: f64,
    pub seller_fi_term_years: f64,
}

impl FinancingStructure {
    /// Standard structure at the configured defaults, no seller financing
    pub fn standard(asking_price: f64, config: &EngineConfig) -> Self {
        let financing = &config.financing;
        Self {
            asking_price,
            down_percent: financing.down_percent,
            dscr_ltv_percent: financing.dscr_ltv_percent,
            dscr_rate: financing.dscr_rate,
            dscr_term_years: financing.dscr_amortization_years,
            seller_fi_percent: 0.0,
            seller_fi_rate: financing.seller_fi_rate,
            seller_fi_term_years: financing.seller_fi_amortization_years,
        }
    }

    /// Standard structure with the configured seller carry taking its senior
    /// slice of the DSCR share
    pub fn seller_financed(asking_price: f64, config: &EngineConfig) -> Self {
        let financing = &config.financing;
        Self::standard(asking_price, config).with_seller_financing(
            financing.seller_fi_carry_percent,
            financing.seller_fi_rate,
            financing.seller_fi_amortization_years,
        )
    }

    /// DSCR-only structure the price solver evaluates
    pub fn solver_structure(asking_price: f64, solver: &SolverConfig) -> Self {
        Self {
            asking_price,
            down_percent: solver.down_percent,
            dscr_ltv_percent: solver.dscr_ltv_percent,
            dscr_rate: solver.dscr_rate,
            dscr_term_years: solver.dscr_term_years,
            seller_fi_percent: 0.0,
            seller_fi_rate: 0.0,
            seller_fi_term_years: solver.dscr_term_years,
        }
    }

    pub fn with_seller_financing(mut self, percent: f64, rate: f64, term_years: f64) -> Self {
        self.seller_fi_percent = percent;
        self.seller_fi_rate = rate;
        self.seller_fi_term_years = term_years;
        self
    }

    /// DSCR share left after seller financing
    pub fn effective_dscr_percent(&self) -> f64 {
        (self.dscr_ltv_percent - self.seller_fi_percent).max(0.0)
    }

    pub fn cash_invested(&self) -> f64 {
        self.asking_price * self.down_percent
    }

    pub fn dscr_loan_amount(&self) -> f64 {
        self.asking_price * self.effective_dscr_percent()
    }

    pub fn seller_fi_amount(&self) -> f64 {
        self.asking_price * self.seller_fi_percent
    }
}

/// Inputs to the price solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CocrTarget {
    /// Annual NOI
    pub noi: f64,
    /// Target COCR as a decimal (0.15 = 15%)
    pub target_cocr: f64,
    pub iteration: SolverConfig,
}

impl CocrTarget {
    pub fn new(noi: f64, target_cocr: f64) -> Self {
        Self {
            noi,
            target_cocr,
            iteration: SolverConfig::default(),
        }
    }

    pub fn with_config(noi: f64, target_cocr: f64, iteration: SolverConfig) -> Self {
        Self { noi, target_cocr, iteration }
    }
}

/// Result of a solver run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolveOutcome {
    /// Solved price, after the final floor
    pub price: f64,
    /// Iterations evaluated
    pub iterations: u32,
    /// Whether the COCR landed inside tolerance
    pub converged: bool,
    /// Whether the estimate ever hit the NOI-multiple ceiling
    pub hit_ceiling: bool,
    /// COCR error (current − target, decimal) at the last evaluated estimate
    pub residual: f64,
}

impl SolveOutcome {
    /// The price, or [`EngineError::NonConvergence`] if the budget ran out
    pub fn require_converged(self) -> EngineResult<f64> {
        if self.converged {
            Ok(self.price)
        } else {
            Err(EngineError::NonConvergence {
                iterations: self.iterations,
                residual: self.residual,
            })
        }
    }
}

/// Annual COCR in percent for a financing structure (20.42 = 20.42%)
///
/// Zero cash invested, a zero price or any degenerate term returns 0.
pub fn compute_cocr(structure: &FinancingStructure, noi: f64) -> f64 {
    or_sentinel("compute_cocr", try_compute_cocr(structure, noi), 0.0)
}

/// Strict form of [`compute_cocr`]
pub fn try_compute_cocr(structure: &FinancingStructure, noi: f64) -> EngineResult<f64> {
    let noi = require_finite("noi", noi)?;
    require_positive("asking_price", structure.asking_price)?;
    require_unit_share("down_percent", structure.down_percent)?;
    require_unit_share("dscr_ltv_percent", structure.dscr_ltv_percent)?;
    require_unit_share("seller_fi_percent", structure.seller_fi_percent)?;

    let cash_invested = require_positive("cash_invested", structure.cash_invested())?;

    let dscr_annual = try_calculate_payment(
        structure.dscr_loan_amount(),
        structure.dscr_rate,
        structure.dscr_term_years,
    )? * 12.0;
    let seller_fi_annual = try_calculate_payment(
        structure.seller_fi_amount(),
        structure.seller_fi_rate,
        structure.seller_fi_term_years,
    )? * 12.0;

    let annual_cash_flow = noi - dscr_annual - seller_fi_annual;
    let cocr = annual_cash_flow / cash_invested * 100.0;
    require_finite("cocr", cocr)
}

/// COCR in percent with a percent-scale down payment and the rest financed by
/// DSCR debt (capped at the maximum DSCR LTV), no seller financing
pub fn cocr_at_down_percent(asking_price: f64, noi: f64, down_percent: f64, config: &EngineConfig) -> f64 {
    let down = down_percent / 100.0;
    let dscr = (1.0 - down).min(config.financing.max_dscr_ltv_percent).max(0.0);
    let structure = FinancingStructure {
        down_percent: down,
        dscr_ltv_percent: dscr,
        ..FinancingStructure::standard(asking_price, config)
    };
    compute_cocr(&structure, noi)
}

/// COCR as a decimal at 30% down
pub fn cocr_30(asking_price: f64, noi: f64, config: &EngineConfig) -> f64 {
    cocr_at_down_percent(asking_price, noi, 30.0, config) / 100.0
}

/// Purchase price at which the solver structure yields the target COCR
///
/// Returns the best estimate even when the iteration budget runs out; use
/// [`solve_price_detailed`] to tell the two apart. Degenerate NOI or target
/// returns 0.
pub fn solve_price_for_cocr(target: &CocrTarget) -> f64 {
    or_sentinel(
        "solve_price_for_cocr",
        try_solve_price_detailed(target).map(|outcome| outcome.price),
        0.0,
    )
}

/// Solver run with convergence diagnostics, fail-soft
pub fn solve_price_detailed(target: &CocrTarget) -> SolveOutcome {
    try_solve_price_detailed(target).unwrap_or_else(|err| {
        log::debug!("solve_price_detailed: {}", err);
        SolveOutcome {
            price: 0.0,
            iterations: 0,
            converged: false,
            hit_ceiling: false,
            residual: f64::NAN,
        }
    })
}

/// Damped multiplicative relaxation on price
///
/// Seeds at `noi / seed_cap_rate`, then scales the estimate by
/// `1 ± |error × adjustment_factor|` until the COCR is within tolerance or the
/// iteration budget is spent. The estimate is kept within
/// `[iteration_floor_price, noi × max_price_multiplier]`; hitting the ceiling
/// snaps it to `noi × conservative_price_multiplier`.
pub fn try_solve_price_detailed(target: &CocrTarget) -> EngineResult<SolveOutcome> {
    let cfg = &target.iteration;
    let noi = require_positive("noi", target.noi)?;
    let target_cocr = require_finite("target_cocr", target.target_cocr)?;
    require_positive("seed_cap_rate", cfg.seed_cap_rate)?;
    require_non_negative("tolerance", cfg.tolerance)?;
    require_non_negative("adjustment_factor", cfg.adjustment_factor)?;
    require_positive("down_percent", cfg.down_percent)?;
    require_unit_share("dscr_ltv_percent", cfg.dscr_ltv_percent)?;
    require_positive("dscr_term_years", cfg.dscr_term_years)?;

    let ceiling = noi * cfg.max_price_multiplier;
    let mut price = noi / cfg.seed_cap_rate;
    let mut iterations = 0;
    let mut converged = false;
    let mut hit_ceiling = false;
    let mut residual = f64::NAN;

    for iteration in 0..cfg.max_iterations {
        iterations = iteration + 1;

        let cash_invested = price * cfg.down_percent;
        let dscr_loan_amount = price * cfg.dscr_ltv_percent;
        let dscr_annual_payment =
            try_calculate_payment(dscr_loan_amount, cfg.dscr_rate, cfg.dscr_term_years)? * 12.0;
        let annual_cash_flow = noi - dscr_annual_payment;
        let current_cocr = annual_cash_flow / cash_invested;

        residual = current_cocr - target_cocr;
        log::trace!(
            "iteration {}: price={:.2} cocr={:.6} residual={:.6}",
            iterations, price, current_cocr, residual
        );

        if residual.abs() < cfg.tolerance {
            converged = true;
            break;
        }

        let adjustment = residual * cfg.adjustment_factor;
        if residual > 0.0 {
            // Return too high: the price can go up
            price *= 1.0 + adjustment.abs();
        } else {
            price *= 1.0 - adjustment.abs();
        }

        if price > ceiling {
            price = noi * cfg.conservative_price_multiplier;
            hit_ceiling = true;
        }
        if price < cfg.iteration_floor_price {
            price = cfg.iteration_floor_price;
        }
    }

    let price = price.max(cfg.minimum_solved_price);

    log::debug!(
        "solve_price: noi={:.2} target={} price={:.2} iterations={} converged={}",
        noi, target_cocr, price, iterations, converged
    );

    Ok(SolveOutcome {
        price,
        iterations,
        converged,
        hit_ceiling,
        residual,
    })
}

/// Reject shares outside [0, 1]
fn require_unit_share(field: &'static str, value: f64) -> EngineResult<f64> {
    let value = require_non_negative(field, value)?;
    if value > 1.0 {
        return Err(EngineError::degenerate(field, format!("share above 100%: {}", value)));
    }
    Ok(value)
}
