//! Deal analyzer for batches of listings
//!
//! Holds one configuration and runs every listing through the same chain:
//! NOI, COCR at the default structure, the price that hits the target COCR,
//! fees and the refinance projection.

use crate::config::EngineConfig;
use crate::finance::{
    calculate_cash_flow, calculate_cash_flow_yield, calculate_cash_out_after_refi,
    calculate_discount_from_price, calculate_net_to_buyer, compute_cocr, default_assignment_fee,
    estimate_cap_rate, estimate_noi, solve_price_detailed, CocrTarget, FinancingStructure,
    LoanTerms, NetToBuyerCosts, RefinanceScenario,
};
use crate::listing::Listing;
use rayon::prelude::*;
use serde::Serialize;

/// Target COCR used when none is given (15%)
pub const DEFAULT_TARGET_COCR: f64 = 0.15;

/// Investment metrics for one listing
///
/// Money is in dollars; `cap_rate_percent` and `cocr_percent` are percent
/// scale, the other ratios are decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealMetrics {
    pub listing_id: String,
    pub property_type: &'static str,
    pub asking_price: f64,
    pub noi: f64,
    pub cap_rate_percent: f64,
    pub cash_invested: f64,
    pub dscr_monthly_payment: f64,
    pub monthly_cash_flow: f64,
    pub cocr_percent: f64,
    /// COCR with the configured seller carry in the structure
    pub seller_fi_cocr_percent: f64,
    pub cash_flow_yield: f64,
    pub target_cocr: f64,
    pub target_price: f64,
    pub target_discount: f64,
    pub solver_iterations: u32,
    pub solver_converged: bool,
    pub solver_hit_ceiling: bool,
    pub assignment_fee: f64,
    pub net_to_buyer: f64,
    pub cash_out_after_refi: f64,
}

/// Pre-configured analyzer
#[derive(Debug, Clone)]
pub struct DealAnalyzer {
    config: EngineConfig,
    target_cocr: f64,
}

impl DealAnalyzer {
    /// Analyzer at the default configuration and 15% target COCR
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            target_cocr: DEFAULT_TARGET_COCR,
        }
    }

    /// Target COCR as a decimal (0.20 = 20%)
    pub fn with_target_cocr(mut self, target_cocr: f64) -> Self {
        self.target_cocr = target_cocr;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn target_cocr(&self) -> f64 {
        self.target_cocr
    }

    /// Run the full metric chain for one listing
    pub fn analyze(&self, listing: &Listing) -> DealMetrics {
        let config = &self.config;
        let price = listing.asking_price;

        let noi = estimate_noi(&listing.income_profile(&config.income), &config.income);
        let structure = FinancingStructure::standard(price, config);
        let cash_invested = structure.cash_invested();

        let dscr_monthly_payment = LoanTerms::new(
            structure.dscr_loan_amount(),
            structure.dscr_rate,
            structure.dscr_term_years,
        )
        .monthly_payment();
        let monthly_cash_flow = calculate_cash_flow(noi / 12.0, dscr_monthly_payment, 0.0);

        let solved = solve_price_detailed(&CocrTarget::with_config(
            noi,
            self.target_cocr,
            config.solver_at_financing_terms(),
        ));
        if !solved.converged {
            log::debug!(
                "Listing {}: target price did not converge (iterations={}, hit_ceiling={})",
                listing.listing_id,
                solved.iterations,
                solved.hit_ceiling
            );
        }

        let refinance = RefinanceScenario::new(
            price,
            structure.dscr_loan_amount(),
            structure.seller_fi_amount(),
            &config.financing,
        );

        DealMetrics {
            listing_id: listing.listing_id.clone(),
            property_type: listing.property_type.as_str(),
            asking_price: price,
            noi,
            cap_rate_percent: estimate_cap_rate(noi, price, &config.income),
            cash_invested,
            dscr_monthly_payment,
            monthly_cash_flow,
            cocr_percent: compute_cocr(&structure, noi),
            seller_fi_cocr_percent: compute_cocr(&FinancingStructure::seller_financed(price, config), noi),
            cash_flow_yield: calculate_cash_flow_yield(monthly_cash_flow, cash_invested),
            target_cocr: self.target_cocr,
            target_price: solved.price,
            target_discount: calculate_discount_from_price(price, solved.price),
            solver_iterations: solved.iterations,
            solver_converged: solved.converged,
            solver_hit_ceiling: solved.hit_ceiling,
            assignment_fee: default_assignment_fee(price, &config.fees),
            net_to_buyer: calculate_net_to_buyer(price, &NetToBuyerCosts::from_config(config)),
            cash_out_after_refi: calculate_cash_out_after_refi(&refinance, &config.financing),
        }
    }

    /// Analyze many listings in parallel; output order matches input order
    pub fn analyze_batch(&self, listings: &[Listing]) -> Vec<DealMetrics> {
        listings.par_iter().map(|listing| self.analyze(listing)).collect()
    }
}

impl Default for DealAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
