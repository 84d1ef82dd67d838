//! Financing math: amortization, NOI, COCR and the price solver, deal economics

pub mod amortization;
pub mod noi;
pub mod solver;
pub mod deal;

pub use amortization::{
    calculate_payment, calculate_remaining_balance, try_calculate_payment,
    try_calculate_remaining_balance, calculate_dscr_payment, calculate_seller_fi_payment,
    BalloonSchedule, LoanTerms,
};
pub use noi::{estimate_noi, estimate_cap_rate, IncomeOverrides, PropertyIncomeProfile, PropertyType};
pub use solver::{
    compute_cocr, cocr_30, cocr_at_down_percent, solve_price_for_cocr, solve_price_detailed,
    try_compute_cocr, try_solve_price_detailed, CocrTarget, FinancingStructure, SolveOutcome,
};
pub use deal::{
    calculate_appreciated_value, calculate_assignment_fee, calculate_cash_flow,
    calculate_cash_flow_yield, calculate_cash_out_after_refi, calculate_discount_from_price,
    calculate_net_to_buyer, calculate_price_from_discount, default_assignment_fee,
    safe_percentage, safe_percentage_or, NetToBuyerCosts, RefinanceScenario,
};
