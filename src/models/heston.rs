// src/models/heston.rs
//! Heston Stochastic Volatility Model
//!
//! # Mathematical Framework
//!
//! The Heston model describes asset price evolution with stochastic volatility:
//! ```text
//! dS_t = r S_t dt + √V_t S_t dW_t^(1)
//! dV_t = κ(θ - V_t) dt + σ√V_t dW_t^(2)
//! ```
//!
//! Where:
//! - S_t: Asset price
//! - V_t: Instantaneous variance (volatility squared)
//! - κ: Mean reversion speed for variance
//! - θ: Long-term variance level
//! - σ: Volatility of variance (vol-of-vol)
//! - ρ: Correlation between dW_t^(1) and dW_t^(2)
//!
//! # Discretization
//!
//! Paths are generated with a full truncation Euler–Maruyama scheme:
//! ```text
//! V_{n+1} = max(0, V_n⁺ + κ(θ - V_n⁺)Δt + σ√(V_n⁺ Δt) W_v)
//! S_{n+1} = S_n * exp((r - V_n⁺/2)Δt + √(V_n⁺ Δt) W_s)
//! ```
//! with V_n⁺ = max(V_n, 0). The price step uses the *pre-update* floored
//! variance; this ordering is part of the scheme, not an accident. Log-Euler
//! stepping keeps simulated prices strictly positive for any shock size.
//!
//! # Feller Condition
//!
//! The continuous-time variance stays strictly positive when 2κθ ≥ σ².
//! The discrete scheme has no such guarantee, hence the flooring.

use crate::error::{validation::*, SimResult};
use crate::rng::{self, RngFactory};
use ndarray::{Array1, Array2, Axis, Zip};
use rand::Rng;
use rayon::prelude::*;

/// Heston model parameters
#[derive(Clone, Copy, Debug)]
pub struct HestonParams {
    pub s0: f64,    // Initial asset price
    pub v0: f64,    // Initial variance
    pub r: f64,     // Risk-free rate
    pub kappa: f64, // Mean reversion speed
    pub theta: f64, // Long-term variance
    pub sigma: f64, // Volatility of variance (vol-of-vol)
    pub rho: f64,   // Correlation between asset and variance
}

/// Simulated trajectory batch: both matrices are `paths x (steps + 1)`,
/// indexed by (trajectory, time step), with column 0 fixed to (s0, v0).
#[derive(Clone, Debug)]
pub struct HestonPaths {
    pub prices: Array2<f64>,
    pub variances: Array2<f64>,
}

impl HestonPaths {
    /// Terminal asset prices across all trajectories (last column)
    pub fn terminal_prices(&self) -> Array1<f64> {
        let last = self.prices.ncols() - 1;
        self.prices.column(last).to_owned()
    }
}

pub struct Heston {
    pub params: HestonParams,
}

impl Heston {
    /// Construct a model with validated parameters.
    ///
    /// Enforced: s0 > 0, v0 ≥ 0, sigma > 0, rho ∈ [-1, 1], r finite.
    /// kappa and theta are accepted as given; negative values degenerate the
    /// variance process (floored at zero every step) and are the caller's
    /// responsibility.
    pub fn new(params: HestonParams) -> SimResult<Self> {
        Self::validate_params(&params)?;
        Ok(Heston { params })
    }

    fn validate_params(params: &HestonParams) -> SimResult<()> {
        validate_positive("s0", params.s0)?;
        validate_non_negative("v0", params.v0)?;
        validate_finite("r", params.r)?;
        validate_finite("kappa", params.kappa)?;
        validate_finite("theta", params.theta)?;
        validate_positive("sigma", params.sigma)?;
        validate_correlation("rho", params.rho)?;
        Ok(())
    }

    /// 2κθ - σ², positive when the continuous-time variance stays positive
    pub fn feller_condition(&self) -> f64 {
        2.0 * self.params.kappa * self.params.theta - self.params.sigma * self.params.sigma
    }

    pub fn feller_satisfied(&self) -> bool {
        self.feller_condition() >= 0.0
    }

    /// Simulate `paths` independent trajectories over `steps` steps up to
    /// horizon `t`, drawing from the injected generator.
    ///
    /// # Algorithm
    ///
    /// Each time step advances the whole trajectory batch at once:
    /// 1. Draw two length-`paths` standard-normal batches z1, z2 (z1 first).
    /// 2. Correlate: W_s = z1, W_v = ρ·z1 + √(1-ρ²)·z2.
    /// 3. Floor the previous variance column, update variance, floor again.
    /// 4. Update prices with the log-Euler step using the pre-update
    ///    floored variance.
    ///
    /// # Guarantees
    ///
    /// Every price entry is > 0, every variance entry is ≥ 0, and both
    /// matrices have shape `paths x (steps + 1)` with column 0 equal to
    /// (s0, v0) for every trajectory.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` when t, steps, or paths is degenerate; the
    /// check runs before any allocation or drawing.
    pub fn simulate_paths<R: Rng + ?Sized>(
        &self,
        t: f64,
        steps: usize,
        paths: usize,
        rng: &mut R,
    ) -> SimResult<HestonPaths> {
        validate_horizon(t)?;
        validate_steps(steps)?;
        validate_paths(paths)?;

        let p = self.params;
        let dt = t / steps as f64;
        let rho_bar = (1.0 - p.rho * p.rho).sqrt();

        let mut prices = Array2::<f64>::zeros((paths, steps + 1));
        let mut variances = Array2::<f64>::zeros((paths, steps + 1));
        prices.column_mut(0).fill(p.s0);
        variances.column_mut(0).fill(p.v0);

        let mut s_next = Array1::<f64>::zeros(paths);
        let mut v_next = Array1::<f64>::zeros(paths);

        for step in 1..=steps {
            let z1 = rng::normal_batch(rng, paths);
            let z2 = rng::normal_batch(rng, paths);

            // Floored previous-step variance (full truncation)
            let vt = variances.column(step - 1).mapv(|v| v.max(0.0));
            let s_prev = prices.column(step - 1).to_owned();

            Zip::from(&mut v_next)
                .and(&mut s_next)
                .and(&vt)
                .and(&s_prev)
                .and(&z1)
                .and(&z2)
                .for_each(|v_out, s_out, &v_prev, &s_prev, &z1, &z2| {
                    let w_s = z1;
                    let w_v = p.rho * z1 + rho_bar * z2;
                    let vol = (v_prev * dt).sqrt();

                    *v_out = (v_prev + p.kappa * (p.theta - v_prev) * dt + p.sigma * vol * w_v)
                        .max(0.0);
                    *s_out = s_prev * ((p.r - 0.5 * v_prev) * dt + vol * w_s).exp();
                });

            variances.column_mut(step).assign(&v_next);
            prices.column_mut(step).assign(&s_next);
        }

        Ok(HestonPaths { prices, variances })
    }

    /// Parallel variant: trajectories are independent, so the batch is
    /// chunked across rayon workers with one RNG stream per trajectory
    /// derived from `seed`. Deterministic for a given seed regardless of
    /// thread count, but the draw ordering differs from `simulate_paths`,
    /// so the two variants do not produce identical matrices for the same
    /// seed.
    pub fn simulate_paths_par(
        &self,
        t: f64,
        steps: usize,
        paths: usize,
        seed: u64,
    ) -> SimResult<HestonPaths> {
        validate_horizon(t)?;
        validate_steps(steps)?;
        validate_paths(paths)?;

        let p = self.params;
        let dt = t / steps as f64;
        let rho_bar = (1.0 - p.rho * p.rho).sqrt();
        let factory = RngFactory::new(seed);

        let mut prices = Array2::<f64>::zeros((paths, steps + 1));
        let mut variances = Array2::<f64>::zeros((paths, steps + 1));

        let rows: Vec<_> = prices
            .axis_iter_mut(Axis(0))
            .zip(variances.axis_iter_mut(Axis(0)))
            .collect();

        rows.into_par_iter()
            .enumerate()
            .for_each(|(i, (mut s_row, mut v_row))| {
                let mut rng = factory.create_std_rng(i as u64);
                let mut s = p.s0;
                let mut v = p.v0;
                s_row[0] = s;
                v_row[0] = v;

                for step in 1..=steps {
                    let z1 = rng::get_normal_draw(&mut rng);
                    let z2 = rng::get_normal_draw(&mut rng);
                    let w_v = p.rho * z1 + rho_bar * z2;

                    let v_prev = v.max(0.0);
                    let vol = (v_prev * dt).sqrt();

                    v = (v_prev + p.kappa * (p.theta - v_prev) * dt + p.sigma * vol * w_v)
                        .max(0.0);
                    s *= ((p.r - 0.5 * v_prev) * dt + vol * z1).exp();

                    s_row[step] = s;
                    v_row[step] = v;
                }
            });

        Ok(HestonPaths { prices, variances })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::rng::seed_rng_from_u64;

    fn test_params() -> HestonParams {
        HestonParams {
            s0: 100.0,
            v0: 0.04,
            r: 0.05,
            kappa: 2.0,
            theta: 0.04,
            sigma: 0.3,
            rho: -0.5,
        }
    }

    #[test]
    fn test_path_shape_and_initial_column() {
        let heston = Heston::new(test_params()).expect("Valid parameters");
        let mut rng = seed_rng_from_u64(42);

        let paths = heston
            .simulate_paths(1.0, 50, 200, &mut rng)
            .expect("Simulation should succeed");

        assert_eq!(paths.prices.dim(), (200, 51));
        assert_eq!(paths.variances.dim(), (200, 51));
        for &s in paths.prices.column(0) {
            assert_eq!(s, 100.0);
        }
        for &v in paths.variances.column(0) {
            assert_eq!(v, 0.04);
        }
    }

    #[test]
    fn test_prices_positive_variances_non_negative() {
        // Vol-of-vol well above the Feller bound to stress the floor
        let params = HestonParams {
            sigma: 1.0,
            kappa: 0.5,
            ..test_params()
        };
        let heston = Heston::new(params).expect("Valid parameters");
        let mut rng = seed_rng_from_u64(7);

        let paths = heston
            .simulate_paths(2.0, 100, 500, &mut rng)
            .expect("Simulation should succeed");

        for &s in paths.prices.iter() {
            assert!(s > 0.0, "Price must remain strictly positive, got {}", s);
        }
        for &v in paths.variances.iter() {
            assert!(v >= 0.0, "Variance must be non-negative, got {}", v);
        }
    }

    #[test]
    fn test_property_random_parameter_sampling() {
        let mut seed_rng = seed_rng_from_u64(99);
        for trial in 0u64..20 {
            let params = HestonParams {
                s0: 1.0 + 200.0 * rng::get_normal_draw(&mut seed_rng).abs(),
                v0: 0.2 * rng::get_normal_draw(&mut seed_rng).abs(),
                r: 0.05 * rng::get_normal_draw(&mut seed_rng),
                kappa: 3.0 * rng::get_normal_draw(&mut seed_rng).abs(),
                theta: 0.1 * rng::get_normal_draw(&mut seed_rng).abs(),
                sigma: 0.05 + rng::get_normal_draw(&mut seed_rng).abs(),
                rho: (rng::get_normal_draw(&mut seed_rng) * 0.5).clamp(-1.0, 1.0),
            };
            let heston = Heston::new(params).expect("Sampled parameters are valid");
            let mut rng = seed_rng_from_u64(trial);

            let paths = heston
                .simulate_paths(0.5, 25, 50, &mut rng)
                .expect("Simulation should succeed");

            let min_price = paths.prices.iter().cloned().fold(f64::INFINITY, f64::min);
            let min_var = paths.variances.iter().cloned().fold(f64::INFINITY, f64::min);
            assert!(min_price > 0.0, "trial {}: min price {}", trial, min_price);
            assert!(min_var >= 0.0, "trial {}: min variance {}", trial, min_var);
        }
    }

    #[test]
    fn test_determinism_fixed_seed() {
        let heston = Heston::new(test_params()).expect("Valid parameters");

        let mut rng1 = seed_rng_from_u64(1234);
        let mut rng2 = seed_rng_from_u64(1234);
        let a = heston.simulate_paths(1.0, 40, 100, &mut rng1).unwrap();
        let b = heston.simulate_paths(1.0, 40, 100, &mut rng2).unwrap();

        assert_eq!(a.prices, b.prices);
        assert_eq!(a.variances, b.variances);
    }

    #[test]
    fn test_parallel_determinism_and_guarantees() {
        let heston = Heston::new(test_params()).expect("Valid parameters");

        let a = heston.simulate_paths_par(1.0, 40, 300, 1234).unwrap();
        let b = heston.simulate_paths_par(1.0, 40, 300, 1234).unwrap();
        assert_eq!(a.prices, b.prices);
        assert_eq!(a.variances, b.variances);

        assert_eq!(a.prices.dim(), (300, 41));
        for &s in a.prices.iter() {
            assert!(s > 0.0);
        }
        for &v in a.variances.iter() {
            assert!(v >= 0.0);
        }
    }

    #[test]
    fn test_invalid_discretization() {
        let heston = Heston::new(test_params()).expect("Valid parameters");
        let mut rng = seed_rng_from_u64(0);

        assert!(matches!(
            heston.simulate_paths(0.0, 10, 10, &mut rng),
            Err(SimError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            heston.simulate_paths(-1.0, 10, 10, &mut rng),
            Err(SimError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            heston.simulate_paths(1.0, 0, 10, &mut rng),
            Err(SimError::InvalidConfiguration { .. })
        ));
        assert!(matches!(
            heston.simulate_paths(1.0, 10, 0, &mut rng),
            Err(SimError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_invalid_parameters() {
        let bad_sigma = HestonParams {
            sigma: -0.3,
            ..test_params()
        };
        assert!(Heston::new(bad_sigma).is_err());

        let bad_rho = HestonParams {
            rho: 1.5,
            ..test_params()
        };
        assert!(Heston::new(bad_rho).is_err());

        let bad_s0 = HestonParams {
            s0: -100.0,
            ..test_params()
        };
        assert!(Heston::new(bad_s0).is_err());

        let bad_v0 = HestonParams {
            v0: -0.01,
            ..test_params()
        };
        assert!(Heston::new(bad_v0).is_err());
    }

    #[test]
    fn test_feller_condition() {
        let ok = Heston::new(test_params()).unwrap();
        assert!(ok.feller_satisfied()); // 2*2*0.04 = 0.16 > 0.09

        // 2*0.5*0.04 = 0.04 < 1.0: vol-of-vol dominates mean reversion
        let violated = Heston::new(HestonParams {
            kappa: 0.5,
            sigma: 1.0,
            ..test_params()
        })
        .unwrap();
        assert!(!violated.feller_satisfied());
    }
}
