//! Core error types.
//!
//! Every failure mode has a named variant. No stringly-typed errors.
//! All of these are local validation failures detected before or during
//! the pure computation; none are transient, so nothing here is retried.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Invalid margin rate {value}: must be a fraction strictly inside (0, 1)")]
    InvalidMargin { value: f64 },

    #[error("Baseline profit is zero: profit change ratio is undefined")]
    ZeroBaselineProfit,

    #[error("Duplicate category in elasticity table: {0}")]
    DuplicateCategory(String),

    #[error("Negative baseline revenue {revenue} for category {category}")]
    NegativeRevenue { category: String, revenue: f64 },

    #[error("Insufficient sales history: {points} points, need at least {required}")]
    InsufficientHistory { points: usize, required: usize },
}

/// Result type alias for core pricing operations.
pub type PricingResult<T> = Result<T, PricingError>;
