//! Error taxonomy for the calculation engine
//!
//! The public calculation functions are fail-soft and never surface these
//! errors; each one has a `try_*` counterpart that does.

use thiserror::Error;

/// Errors raised by the strict (`try_*`) calculation entry points and loaders
#[derive(Debug, Error)]
pub enum EngineError {
    /// Input that makes the formula meaningless (NaN, negative where a
    /// non-negative is required, division by zero)
    #[error("Degenerate input: {field} ({reason})")]
    DegenerateInput { field: &'static str, reason: String },

    /// The price solver exhausted its iteration budget outside tolerance
    #[error("Solver did not converge after {iterations} iterations (residual: {residual})")]
    NonConvergence { iterations: u32, residual: f64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl EngineError {
    /// Shorthand for a [`EngineError::DegenerateInput`]
    pub fn degenerate(field: &'static str, reason: impl Into<String>) -> Self {
        EngineError::DegenerateInput {
            field,
            reason: reason.into(),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Reject NaN and infinities
pub(crate) fn require_finite(field: &'static str, value: f64) -> EngineResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::degenerate(field, format!("expected a finite number, got {}", value)))
    }
}

/// Reject NaN, infinities and negatives
pub(crate) fn require_non_negative(field: &'static str, value: f64) -> EngineResult<f64> {
    let value = require_finite(field, value)?;
    if value < 0.0 {
        return Err(EngineError::degenerate(field, format!("must be >= 0, got {}", value)));
    }
    Ok(value)
}

/// Reject NaN, infinities, zero and negatives
pub(crate) fn require_positive(field: &'static str, value: f64) -> EngineResult<f64> {
    let value = require_finite(field, value)?;
    if value <= 0.0 {
        return Err(EngineError::degenerate(field, format!("must be > 0, got {}", value)));
    }
    Ok(value)
}

/// Collapse a strict result into its fail-soft sentinel, logging what was swallowed
pub(crate) fn or_sentinel(function: &str, result: EngineResult<f64>, sentinel: f64) -> f64 {
    match result {
        Ok(value) if value.is_nan() => {
            log::debug!("{}: NaN result replaced by sentinel {}", function, sentinel);
            sentinel
        }
        Ok(value) => value,
        Err(err) => {
            log::debug!("{}: {} -> sentinel {}", function, err, sentinel);
            sentinel
        }
    }
}
