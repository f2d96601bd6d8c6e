// src/error.rs
use std::fmt;

/// Custom error types for the heston-mc library
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Invalid model parameter values
    InvalidParameters {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Invalid discretization / pricing configuration
    InvalidConfiguration { field: String, reason: String },

    /// Unrecognized option type at the API boundary
    InvalidOptionType { value: String },

    /// Numerical instability in an estimator
    NumericalInstability { method: String, reason: String },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidParameters {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}' = {}: {}",
                    parameter, value, constraint
                )
            }
            SimError::InvalidConfiguration { field, reason } => {
                write!(f, "Invalid configuration for '{}': {}", field, reason)
            }
            SimError::InvalidOptionType { value } => {
                write!(
                    f,
                    "Invalid option type '{}': expected 'call' or 'put'",
                    value
                )
            }
            SimError::NumericalInstability { method, reason } => {
                write!(f, "Numerical instability in {}: {}", method, reason)
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Result type alias for heston-mc operations
pub type SimResult<T> = Result<T, SimError>;

/// Validation utilities
pub mod validation {
    use super::{SimError, SimResult};

    /// Validate that a parameter is positive
    pub fn validate_positive(name: &str, value: f64) -> SimResult<()> {
        if !(value > 0.0) {
            Err(SimError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> SimResult<()> {
        if !(value >= 0.0) {
            Err(SimError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is within a range
    pub fn validate_range(name: &str, value: f64, min: f64, max: f64) -> SimResult<()> {
        if !(value >= min && value <= max) {
            Err(SimError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: format!("must be in range [{}, {}]", min, max),
            })
        } else {
            Ok(())
        }
    }

    /// Validate correlation parameter
    pub fn validate_correlation(name: &str, rho: f64) -> SimResult<()> {
        validate_range(name, rho, -1.0, 1.0)
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> SimResult<()> {
        if !value.is_finite() {
            Err(SimError::InvalidParameters {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate trajectory count
    pub fn validate_paths(paths: usize) -> SimResult<()> {
        if paths == 0 {
            Err(SimError::InvalidConfiguration {
                field: "paths".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if paths > 1_000_000_000 {
            Err(SimError::InvalidConfiguration {
                field: "paths".to_string(),
                reason: "exceeds maximum allowed (1 billion)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate time-step count
    pub fn validate_steps(steps: usize) -> SimResult<()> {
        if steps == 0 {
            Err(SimError::InvalidConfiguration {
                field: "steps".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if steps > 100_000 {
            Err(SimError::InvalidConfiguration {
                field: "steps".to_string(),
                reason: "exceeds maximum allowed (100,000)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate the simulation horizon
    pub fn validate_horizon(t: f64) -> SimResult<()> {
        if !(t.is_finite() && t > 0.0) {
            Err(SimError::InvalidConfiguration {
                field: "t".to_string(),
                reason: format!("horizon must be positive and finite, got {}", t),
            })
        } else {
            Ok(())
        }
    }
}
