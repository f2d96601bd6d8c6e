// src/mc/payoffs.rs
//! European option payoffs
//!
//! The contract side of the estimator: a closed enumeration of supported
//! option types and their terminal payoffs. Using an enum (rather than a
//! raw string) removes the invalid-type failure mode from the pricing path
//! entirely; the only place it can surface is the `FromStr` boundary.

use crate::error::SimError;
use std::fmt;
use std::str::FromStr;

/// Supported European option types
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionType {
    /// Right to buy at strike K: max(S_T - K, 0)
    Call,
    /// Right to sell at strike K: max(K - S_T, 0)
    Put,
}

impl OptionType {
    /// Terminal payoff for this contract
    pub fn payoff(&self, terminal_price: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (terminal_price - strike).max(0.0),
            OptionType::Put => (strike - terminal_price).max(0.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionType {
    type Err = SimError;

    /// Case-insensitive parse; anything but "call"/"put" fails fast with
    /// `InvalidOptionType` before any simulation work can start.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            _ => Err(SimError::InvalidOptionType {
                value: s.to_string(),
            }),
        }
    }
}
