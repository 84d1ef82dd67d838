//! Fixed-rate amortization: monthly payment (PMT) and balloon balance
//!
//! All rates are annual decimal fractions; payments are monthly.

use crate::config::FinancingDefaults;
use crate::error::{or_sentinel, require_non_negative, require_positive, EngineResult};
use serde::{Deserialize, Serialize};

/// A fully-amortizing fixed-rate loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: f64,
    /// Annual rate as a decimal (0.075 = 7.5%); zero means interest-free
    pub annual_rate: f64,
    pub term_years: f64,
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate: f64, term_years: f64) -> Self {
        Self { principal, annual_rate, term_years }
    }

    /// Monthly payment, fail-soft
    pub fn monthly_payment(&self) -> f64 {
        calculate_payment(self.principal, self.annual_rate, self.term_years)
    }

    /// Annual debt service (twelve monthly payments)
    pub fn annual_payment(&self) -> f64 {
        self.monthly_payment() * 12.0
    }
}

/// A loan amortized over one horizon but due (or refinanced) at a shorter one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalloonSchedule {
    pub loan_amount: f64,
    pub annual_rate: f64,
    pub amortization_years: f64,
    pub balloon_years: f64,
}

impl BalloonSchedule {
    pub fn new(loan_amount: f64, annual_rate: f64, amortization_years: f64, balloon_years: f64) -> Self {
        Self { loan_amount, annual_rate, amortization_years, balloon_years }
    }

    /// Balance still owed at the balloon, fail-soft
    pub fn remaining_balance(&self) -> f64 {
        calculate_remaining_balance(self)
    }
}

/// Standard monthly payment on a fixed-rate, fully-amortizing loan
///
/// Straight-line when the rate is zero. A zero term with a positive principal
/// yields `f64::INFINITY`; a zero principal always yields 0. Negative or
/// non-finite inputs return 0.
pub fn calculate_payment(principal: f64, annual_rate: f64, term_years: f64) -> f64 {
    or_sentinel(
        "calculate_payment",
        try_calculate_payment(principal, annual_rate, term_years),
        0.0,
    )
}

/// Strict form of [`calculate_payment`]
pub fn try_calculate_payment(principal: f64, annual_rate: f64, term_years: f64) -> EngineResult<f64> {
    let principal = require_non_negative("principal", principal)?;
    if principal == 0.0 {
        return Ok(0.0);
    }
    let annual_rate = require_non_negative("annual_rate", annual_rate)?;
    let term_years = require_non_negative("term_years", term_years)?;

    let monthly_rate = annual_rate / 12.0;
    let num_payments = term_years * 12.0;
    let growth = (1.0 + monthly_rate).powf(num_payments);

    // Rates too small to move 1 + r behave as interest-free
    if annual_rate == 0.0 || growth - 1.0 == 0.0 {
        return Ok(principal / num_payments);
    }

    Ok(principal * (monthly_rate * growth) / (growth - 1.0))
}

/// Remaining balance after `balloon_years` of payments on a loan amortized
/// over `amortization_years`
///
/// Zero once the balloon reaches the amortization horizon; linear paydown at
/// a zero rate. Non-positive amount, term or balloon and negative rates
/// return 0.
pub fn calculate_remaining_balance(loan: &BalloonSchedule) -> f64 {
    or_sentinel(
        "calculate_remaining_balance",
        try_calculate_remaining_balance(loan),
        0.0,
    )
}

/// Strict form of [`calculate_remaining_balance`]
pub fn try_calculate_remaining_balance(loan: &BalloonSchedule) -> EngineResult<f64> {
    let principal = require_positive("loan_amount", loan.loan_amount)?;
    let annual_rate = require_non_negative("annual_rate", loan.annual_rate)?;
    let amortization_years = require_positive("amortization_years", loan.amortization_years)?;
    let balloon_years = require_positive("balloon_years", loan.balloon_years)?;

    if balloon_years >= amortization_years {
        return Ok(0.0);
    }

    let total_payments = amortization_years * 12.0;
    let payments_made = balloon_years * 12.0;

    let monthly_rate = annual_rate / 12.0;
    let growth_total = (1.0 + monthly_rate).powf(total_payments);
    let growth_made = (1.0 + monthly_rate).powf(payments_made);

    if annual_rate == 0.0 || growth_total - 1.0 == 0.0 {
        return Ok(principal * (total_payments - payments_made) / total_payments);
    }

    let balance = principal * (growth_total - growth_made) / (growth_total - 1.0);

    Ok(balance.max(0.0))
}

/// Monthly DSCR payment on a percent-scale share of price at the default DSCR terms
pub fn calculate_dscr_payment(price: f64, dscr_percent: f64, financing: &FinancingDefaults) -> f64 {
    calculate_payment(
        price * dscr_percent / 100.0,
        financing.dscr_rate,
        financing.dscr_amortization_years,
    )
}

/// Monthly seller-finance payment on a percent-scale share of price at the default carry terms
pub fn calculate_seller_fi_payment(price: f64, seller_fi_percent: f64, financing: &FinancingDefaults) -> f64 {
    calculate_payment(
        price * seller_fi_percent / 100.0,
        financing.seller_fi_rate,
        financing.seller_fi_amortization_years,
    )
}
