//! ACO configuration.
//!
//! [`AcoConfig`] holds the parameters that control a colony run.

use crate::error::{AcoError, Result};

/// Configuration for an Ant Colony Optimization run.
///
/// # Defaults
///
/// ```
/// use u_antcolony::aco::AcoConfig;
///
/// let config = AcoConfig::default();
/// assert_eq!(config.n_ants, 35);
/// assert_eq!(config.n_iterations, 35);
/// assert_eq!(config.start_city, 0);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_antcolony::aco::AcoConfig;
///
/// let config = AcoConfig::default()
///     .with_ants(20)
///     .with_iterations(100)
///     .with_evaporation(0.8)
///     .with_alpha(1.0)
///     .with_beta(2.0)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoConfig {
    /// Number of ants that build a tour each iteration.
    pub n_ants: usize,

    /// Number of iterations. The run always executes exactly this many
    /// unless stopped externally.
    pub n_iterations: usize,

    /// Fraction of pheromone *retained* after each iteration, in `[0, 1)`.
    ///
    /// Every cell is multiplied by this value, so `1 - evaporation` is the
    /// share that evaporates.
    pub evaporation: f64,

    /// Pheromone influence exponent (>= 0).
    pub alpha: f64,

    /// Inverse-distance influence exponent (>= 0).
    pub beta: f64,

    /// City every ant starts from.
    pub start_city: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether to construct tours in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature. Results are identical
    /// to a sequential run with the same seed.
    pub parallel: bool,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// Checked between iterations, so the run may exceed it by up to one
    /// iteration. `None` disables the limit.
    pub time_limit_ms: Option<u64>,
}

impl Default for AcoConfig {
    fn default() -> Self {
        Self {
            n_ants: 35,
            n_iterations: 35,
            evaporation: 0.55,
            alpha: 1.0,
            beta: 1.0,
            start_city: 0,
            seed: None,
            parallel: true,
            time_limit_ms: None,
        }
    }
}

impl AcoConfig {
    /// Sets the number of ants per iteration.
    pub fn with_ants(mut self, n: usize) -> Self {
        self.n_ants = n;
        self
    }

    /// Sets the number of iterations.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.n_iterations = n;
        self
    }

    /// Sets the pheromone retention factor.
    pub fn with_evaporation(mut self, retention: f64) -> Self {
        self.evaporation = retention;
        self
    }

    /// Sets the pheromone influence exponent.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the inverse-distance influence exponent.
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Sets the city every ant starts from.
    pub fn with_start_city(mut self, city: usize) -> Self {
        self.start_city = city;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel tour construction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration.
    ///
    /// `start_city` is checked against the matrix size when the colony is
    /// built, not here.
    pub fn validate(&self) -> Result<()> {
        if self.n_ants < 1 {
            return Err(AcoError::invalid("n_ants must be at least 1"));
        }
        if self.n_iterations < 1 {
            return Err(AcoError::invalid("n_iterations must be at least 1"));
        }
        if !(0.0..1.0).contains(&self.evaporation) {
            return Err(AcoError::invalid(format!(
                "evaporation (retention) must be in [0, 1), got {}",
                self.evaporation
            )));
        }
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(AcoError::invalid(format!(
                "alpha must be finite and non-negative, got {}",
                self.alpha
            )));
        }
        if !self.beta.is_finite() || self.beta < 0.0 {
            return Err(AcoError::invalid(format!(
                "beta must be finite and non-negative, got {}",
                self.beta
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AcoConfig::default();
        assert_eq!(config.n_ants, 35);
        assert_eq!(config.n_iterations, 35);
        assert!((config.evaporation - 0.55).abs() < 1e-12);
        assert!((config.alpha - 1.0).abs() < 1e-12);
        assert!((config.beta - 1.0).abs() < 1e-12);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_validate_ok() {
        assert!(AcoConfig::default().validate().is_ok());
        assert!(AcoConfig::default().with_evaporation(0.0).validate().is_ok());
        assert!(AcoConfig::default()
            .with_alpha(0.0)
            .with_beta(0.0)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_zero_ants() {
        assert!(AcoConfig::default().with_ants(0).validate().is_err());
    }

    #[test]
    fn test_validate_zero_iterations() {
        assert!(AcoConfig::default().with_iterations(0).validate().is_err());
    }

    #[test]
    fn test_validate_bad_evaporation() {
        assert!(AcoConfig::default().with_evaporation(1.0).validate().is_err());
        assert!(AcoConfig::default().with_evaporation(-0.1).validate().is_err());
        assert!(AcoConfig::default()
            .with_evaporation(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_bad_exponents() {
        assert!(AcoConfig::default().with_alpha(-1.0).validate().is_err());
        assert!(AcoConfig::default().with_beta(f64::NAN).validate().is_err());
        assert!(AcoConfig::default()
            .with_beta(f64::INFINITY)
            .validate()
            .is_err());
    }

    #[test]
    fn test_builder_sets_fields() {
        let config = AcoConfig::default()
            .with_start_city(2)
            .with_parallel(false)
            .with_time_limit_ms(250)
            .with_seed(9);
        assert_eq!(config.start_city, 2);
        assert!(!config.parallel);
        assert_eq!(config.time_limit_ms, Some(250));
        assert_eq!(config.seed, Some(9));
    }
}
