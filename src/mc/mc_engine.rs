// src/mc/mc_engine.rs
//! Monte Carlo estimator for European options under Heston
//!
//! Drives the path simulator once, reduces the terminal price column to a
//! discounted mean payoff. Statistical error scales as O(1/√paths); no
//! confidence interval is computed here, that is the caller's concern.

use crate::error::{validation::*, SimError, SimResult};
use crate::mc::payoffs::OptionType;
use crate::models::heston::{Heston, HestonPaths};
use crate::rng;

/// Monte Carlo pricing configuration for a single European contract
#[derive(Clone, Copy, Debug)]
pub struct McConfig {
    /// Strike price K
    pub strike: f64,
    pub option_type: OptionType,
    /// Time to maturity in years
    pub t: f64,
    /// Number of time steps (default 252, daily over one year)
    pub steps: usize,
    /// Number of simulated trajectories (default 10,000)
    pub paths: usize,
    pub seed: u64,
}

impl McConfig {
    /// Validate the pricing configuration
    pub fn validate(&self) -> SimResult<()> {
        validate_positive("strike", self.strike)?;
        validate_horizon(self.t)?;
        validate_steps(self.steps)?;
        validate_paths(self.paths)?;
        Ok(())
    }
}

impl Default for McConfig {
    fn default() -> Self {
        McConfig {
            strike: 100.0,
            option_type: OptionType::Call,
            t: 1.0,
            steps: 252,
            paths: 10_000,
            seed: 12345,
        }
    }
}

/// Price a European option under the Heston model by Monte Carlo
///
/// # Algorithm
///
/// 1. Validate the configuration (fail fast, before any simulation work).
/// 2. Simulate the full trajectory batch with a `StdRng` seeded from
///    `cfg.seed`; the variance matrix is discarded, only terminal prices
///    are kept.
/// 3. Return `exp(-r·T) * mean(payoff(S_T))`.
///
/// The result is a single finite non-negative number, deterministic for a
/// fixed seed.
pub fn price_european(model: &Heston, cfg: &McConfig) -> SimResult<f64> {
    cfg.validate()?;
    let mut rng = rng::seed_rng_from_u64(cfg.seed);
    let paths = model.simulate_paths(cfg.t, cfg.steps, cfg.paths, &mut rng)?;
    price_from_terminal(&paths, cfg, model.params.r)
}

/// Discounted mean payoff over an already-simulated batch
///
/// Separated from `price_european` so call and put estimates can reuse the
/// same trajectories (e.g. for put-call parity checks) instead of paying
/// for two independent simulations.
pub fn price_from_terminal(paths: &HestonPaths, cfg: &McConfig, r: f64) -> SimResult<f64> {
    validate_positive("strike", cfg.strike)?;
    validate_horizon(cfg.t)?;

    let terminal = paths.terminal_prices();
    let n = terminal.len() as f64;
    let mean_payoff = terminal
        .iter()
        .map(|&st| cfg.option_type.payoff(st, cfg.strike))
        .sum::<f64>()
        / n;

    let price = (-r * cfg.t).exp() * mean_payoff;
    if !price.is_finite() {
        return Err(SimError::NumericalInstability {
            method: "Heston Monte Carlo".to_string(),
            reason: format!("price estimate is not finite: {}", price),
        });
    }
    Ok(price)
}
