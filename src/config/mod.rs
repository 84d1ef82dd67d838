//! Engine configuration: financing terms, income assumptions, fees and solver knobs

mod financing;
mod income;
mod business;
pub mod loader;

pub use financing::FinancingDefaults;
pub use income::{IncomeDefaults, StrIncome, AssistedLivingIncome};
pub use business::{FeeDefaults, SolverConfig};

use crate::error::EngineResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Container for all calculation defaults
///
/// Passed explicitly into every calculation that needs a default; there is no
/// process-wide configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub financing: FinancingDefaults,
    pub income: IncomeDefaults,
    pub fees: FeeDefaults,
    pub solver: SolverConfig,
}

impl EngineConfig {
    /// Load from a JSON file; missing fields keep their defaults
    pub fn from_json_path(path: &Path) -> EngineResult<Self> {
        loader::load_config(path)
    }

    /// Copy of the solver knobs priced at the financing defaults' DSCR terms
    pub fn solver_at_financing_terms(&self) -> SolverConfig {
        SolverConfig {
            dscr_rate: self.financing.dscr_rate,
            dscr_term_years: self.financing.dscr_amortization_years,
            ..self.solver.clone()
        }
    }
}
