//! # heston-mc: Monte Carlo Heston Option Pricing
//!
//! A Rust library for pricing European options under the Heston
//! stochastic-volatility model via Monte Carlo simulation.
//!
//! ## Key Features
//!
//! - **Full Truncation Euler**: robust discretization of the Heston SDE pair,
//!   variance floored at zero, strictly positive simulated prices
//! - **Batch Simulation**: whole trajectory batch advanced per time step,
//!   path matrices returned as dense `ndarray` tables
//! - **Deterministic**: every draw comes from an injected seedable generator;
//!   a fixed seed reproduces matrices and prices bit for bit
//! - **Parallel Extension**: optional rayon-chunked simulation with one RNG
//!   stream per trajectory
//!
//! ## Quick Start
//!
//! ```rust
//! use heston_mc::mc::mc_engine::{price_european, McConfig};
//! use heston_mc::mc::payoffs::OptionType;
//! use heston_mc::models::heston::{Heston, HestonParams};
//!
//! let model = Heston::new(HestonParams {
//!     s0: 100.0,   // Spot price
//!     v0: 0.04,    // Initial variance
//!     r: 0.01,     // Risk-free rate
//!     kappa: 2.0,  // Mean reversion speed
//!     theta: 0.04, // Long-run variance
//!     sigma: 0.3,  // Vol-of-vol
//!     rho: -0.7,   // Price/variance correlation
//! })
//! .expect("Valid parameters");
//!
//! let cfg = McConfig {
//!     strike: 100.0,
//!     option_type: OptionType::Call,
//!     t: 1.0,
//!     paths: 10_000,
//!     ..Default::default()
//! };
//!
//! let price = price_european(&model, &cfg).expect("Valid configuration");
//! println!("Heston call price: {:.4}", price);
//! ```
//!
//! ## Mathematical Foundation
//!
//! Asset price and instantaneous variance follow correlated SDEs with the
//! variance mean-reverting to a long-run level. Paths are discretized with
//! the full truncation Euler-Maruyama scheme and the option price is the
//! discounted sample mean of terminal payoffs under the risk-neutral
//! measure.

// Module declarations
pub mod analytics;
pub mod error;
pub mod math_utils;
pub mod mc;
pub mod models;
pub mod output;
pub mod rng;

// Re-export commonly used types for convenience
pub use error::{SimError, SimResult};
pub use mc::mc_engine::{price_european, price_from_terminal, McConfig};
pub use mc::payoffs::OptionType;
pub use models::heston::{Heston, HestonParams, HestonPaths};
