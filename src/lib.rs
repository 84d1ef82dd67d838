//! Property Metrics - Calculation engine for real-estate investment analysis
//!
//! This library provides:
//! - Loan amortization, DSCR / seller-financing payments and balloon balances
//! - NOI estimation for multifamily, short-term rental and assisted living
//! - Cash-on-cash return (COCR) and the price that achieves a target COCR
//! - Deal economics: assignment fees, net to buyer, appreciation, refinance cash-out
//! - Display and input formatting for the computed values
//! - Batch analysis of listing exports

pub mod error;
pub mod config;
pub mod finance;
pub mod format;
pub mod listing;
pub mod analysis;

// Re-export commonly used types
pub use error::{EngineError, EngineResult};
pub use config::{EngineConfig, FinancingDefaults, IncomeDefaults, FeeDefaults, SolverConfig};
pub use finance::{
    CocrTarget, FinancingStructure, LoanTerms, BalloonSchedule, PropertyIncomeProfile,
    PropertyType, RefinanceScenario, NetToBuyerCosts, SolveOutcome,
};
pub use listing::Listing;
pub use analysis::{DealAnalyzer, DealMetrics};
