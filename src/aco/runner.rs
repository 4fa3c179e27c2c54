//! Colony execution loop.
//!
//! # Algorithm
//!
//! 1. Initialize every pheromone cell to `1/n`
//! 2. At each iteration:
//!    a. Every ant builds a closed tour from the start city
//!    b. Score the tours and update the global best
//!    c. Each edge of each tour receives `1 / distance` pheromone
//!    d. Multiply the whole pheromone matrix by the retention factor
//! 3. Terminate after the configured number of iterations
//!
//! Ants within an iteration only read the pheromone matrix, so tour
//! construction can run in parallel. Deposition and evaporation need
//! exclusive access and happen after all ants have finished.
//!
//! # Reference
//!
//! Dorigo, M., Maniezzo, V. & Colorni, A. (1996). "Ant System: Optimization
//! by a Colony of Cooperating Agents", *IEEE Trans. SMC-B* 26(1), 29-41.

use super::config::AcoConfig;
use super::types::{DistanceMatrix, PheromoneMatrix, Tour};
use crate::error::{AcoError, Result};
use crate::random::{create_rng, weighted_index};
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, trace, warn};

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// All configured iterations ran.
    Completed,
    /// The cancellation flag was set.
    Cancelled,
    /// The wall-clock limit elapsed.
    TimeLimit,
    /// The caller's stopping predicate returned `true`.
    Predicate,
}

/// Snapshot passed to the stopping predicate after every iteration.
#[derive(Debug, Clone, Copy)]
pub struct IterationStats {
    /// Zero-based index of the iteration that just finished.
    pub iteration: usize,
    /// Shortest tour length among this iteration's ants.
    pub iteration_best: f64,
    /// Shortest tour length seen so far.
    pub best_length: f64,
    /// Whether this iteration improved the global best.
    pub improved: bool,
    /// Smallest pheromone value after evaporation.
    pub min_pheromone: f64,
}

/// Result of a colony run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AcoResult {
    /// The shortest tour found.
    pub best: Tour,

    /// Length of the best tour (same as `best.length()`).
    pub best_length: f64,

    /// Iteration at which the best tour was first found.
    pub best_iteration: usize,

    /// Number of iterations executed.
    pub iterations: usize,

    /// Why the run ended.
    pub stop_reason: StopReason,

    /// Best length after each iteration. Non-increasing.
    pub length_history: Vec<f64>,
}

/// Ant colony over a fixed distance matrix.
///
/// A colony is single-use: [`AntColony::optimize`] consumes it.
///
/// # Examples
///
/// ```
/// use u_antcolony::aco::{AcoConfig, AntColony};
///
/// let inf = f64::INFINITY;
/// let distances = vec![
///     vec![inf, 2.0, 2.0, 5.0, 7.0],
///     vec![2.0, inf, 4.0, 8.0, 2.0],
///     vec![2.0, 4.0, inf, 1.0, 3.0],
///     vec![5.0, 8.0, 1.0, inf, 2.0],
///     vec![7.0, 2.0, 3.0, 2.0, inf],
/// ];
/// let colony = AntColony::from_rows(distances, AcoConfig::default().with_seed(1)).unwrap();
/// let result = colony.optimize().unwrap();
/// assert!(result.best.is_valid_for(5));
/// assert!(result.best_length <= 16.0);
/// ```
#[derive(Debug, Clone)]
pub struct AntColony {
    distances: DistanceMatrix,
    pheromone: PheromoneMatrix,
    config: AcoConfig,
}

impl AntColony {
    /// Builds a colony, validating the matrix and parameters.
    ///
    /// # Errors
    /// [`AcoError::InvalidInput`] for an invalid configuration or a start
    /// city outside the matrix.
    pub fn new(distances: DistanceMatrix, config: AcoConfig) -> Result<Self> {
        config.validate()?;
        let n = distances.n_cities();
        if config.start_city >= n {
            return Err(AcoError::invalid(format!(
                "start_city {} out of range for {n} cities",
                config.start_city
            )));
        }

        debug!(
            n_cities = n,
            n_ants = config.n_ants,
            n_iterations = config.n_iterations,
            "colony initialized"
        );

        Ok(Self {
            pheromone: PheromoneMatrix::uniform(n),
            distances,
            config,
        })
    }

    /// Builds a colony from numeric rows, `f64::INFINITY` marking missing
    /// edges.
    pub fn from_rows(rows: Vec<Vec<f64>>, config: AcoConfig) -> Result<Self> {
        Self::new(DistanceMatrix::from_rows(rows)?, config)
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    pub fn pheromone(&self) -> &PheromoneMatrix {
        &self.pheromone
    }

    pub fn config(&self) -> &AcoConfig {
        &self.config
    }

    /// Runs all configured iterations and returns the best tour.
    ///
    /// # Errors
    /// [`AcoError::DegenerateSelection`] if an ant hits a dead end.
    pub fn optimize(self) -> Result<AcoResult> {
        self.optimize_until(|_| false)
    }

    /// Runs with an optional cancellation token.
    ///
    /// The flag is checked between iterations; the first iteration always
    /// runs so that a tour is available.
    pub fn optimize_with_cancel(self, cancel: Option<Arc<AtomicBool>>) -> Result<AcoResult> {
        self.run(cancel, |_| false)
    }

    /// Runs until the iterations are exhausted or `stop` returns `true`.
    ///
    /// `stop` is evaluated after every iteration.
    pub fn optimize_until<F>(self, stop: F) -> Result<AcoResult>
    where
        F: FnMut(&IterationStats) -> bool,
    {
        self.run(None, stop)
    }

    fn run<F>(mut self, cancel: Option<Arc<AtomicBool>>, mut stop: F) -> Result<AcoResult>
    where
        F: FnMut(&IterationStats) -> bool,
    {
        let started = Instant::now();
        let mut rng = match self.config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        let mut best: Option<Tour> = None;
        let mut best_iteration = 0;
        let mut length_history = Vec::with_capacity(self.config.n_iterations);
        let mut stop_reason = StopReason::Completed;

        for iteration in 0..self.config.n_iterations {
            // 1. Construct one tour per ant against the current snapshot
            let tours = self.construct_tours(&mut rng, iteration)?;

            // 2-3. Score and update the global best
            let mut iteration_best = f64::INFINITY;
            let mut improved = false;
            for tour in &tours {
                iteration_best = iteration_best.min(tour.length());
                if best.as_ref().is_none_or(|b| tour.length() < b.length()) {
                    best = Some(tour.clone());
                    best_iteration = iteration;
                    improved = true;
                }
            }

            // 4-5. Deposit, then evaporate
            self.deposit(&tours);
            self.pheromone.evaporate(self.config.evaporation);

            let best_length = best.as_ref().map_or(f64::INFINITY, Tour::length);
            length_history.push(best_length);

            if improved {
                debug!(iteration, best_length, "new best tour");
            }
            trace!(iteration, iteration_best, best_length, "iteration complete");

            let stats = IterationStats {
                iteration,
                iteration_best,
                best_length,
                improved,
                min_pheromone: self.pheromone.min_value(),
            };

            let halt = stop(&stats);
            if iteration + 1 == self.config.n_iterations {
                break;
            }
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    stop_reason = StopReason::Cancelled;
                    break;
                }
            }
            if let Some(limit) = self.config.time_limit_ms {
                if started.elapsed().as_millis() >= u128::from(limit) {
                    stop_reason = StopReason::TimeLimit;
                    break;
                }
            }
            if halt {
                stop_reason = StopReason::Predicate;
                break;
            }
        }

        let best = best.expect("n_iterations >= 1 and n_ants >= 1 always yield a tour");
        let best_length = best.length();
        let iterations = length_history.len();

        if stop_reason == StopReason::Completed {
            info!(iterations, best_length, "colony run complete");
        } else {
            warn!(iterations, best_length, ?stop_reason, "colony run stopped early");
        }

        Ok(AcoResult {
            best,
            best_length,
            best_iteration,
            iterations,
            stop_reason,
            length_history,
        })
    }

    /// Builds one tour per ant.
    ///
    /// Each ant gets its own RNG seeded from `rng` in ant order, so the
    /// outcome does not depend on whether ants run in parallel.
    fn construct_tours<R: Rng>(&self, rng: &mut R, iteration: usize) -> Result<Vec<Tour>> {
        let seeds: Vec<u64> = (0..self.config.n_ants).map(|_| rng.random()).collect();

        #[cfg(feature = "parallel")]
        {
            if self.config.parallel {
                return seeds
                    .par_iter()
                    .map(|&seed| self.construct_tour(&mut create_rng(seed), iteration))
                    .collect();
            }
        }

        seeds
            .iter()
            .map(|&seed| self.construct_tour(&mut create_rng(seed), iteration))
            .collect()
    }

    /// Grows a closed tour from the start city, one weighted draw per step.
    fn construct_tour<R: Rng>(&self, rng: &mut R, iteration: usize) -> Result<Tour> {
        let n = self.distances.n_cities();
        let start = self.config.start_city;

        let dead_end = |city: usize, visited: usize| AcoError::DegenerateSelection {
            iteration,
            city,
            visited,
            n,
        };

        let mut visited = vec![false; n];
        visited[start] = true;
        let mut edges = Vec::with_capacity(n);
        let mut weights = vec![0.0; n];
        let mut length = 0.0;
        let mut current = start;

        for step in 1..n {
            self.selection_weights(current, &visited, &mut weights);
            let next = weighted_index(&weights, rng).ok_or_else(|| dead_end(current, step))?;
            let d = self
                .distances
                .get(current, next)
                .ok_or_else(|| dead_end(current, step))?;

            length += d;
            edges.push((current, next));
            visited[next] = true;
            current = next;
        }

        length += self
            .distances
            .get(current, start)
            .ok_or_else(|| dead_end(current, n))?;
        edges.push((current, start));

        debug_assert!(length.is_finite() && length >= 0.0, "bad tour length {length}");
        Ok(Tour::new(edges, length))
    }

    /// Fills `weights[j]` with `tau(current, j)^alpha * eta(current, j)^beta`.
    ///
    /// Visited and unreachable cities get weight zero.
    fn selection_weights(&self, current: usize, visited: &[bool], weights: &mut [f64]) {
        let AcoConfig { alpha, beta, .. } = self.config;
        for (j, w) in weights.iter_mut().enumerate() {
            *w = match self.distances.get(current, j) {
                Some(d) if !visited[j] => {
                    self.pheromone.get(current, j).powf(alpha) * inverse_distance(d).powf(beta)
                }
                _ => 0.0,
            };
        }
    }

    /// Adds `1 / distance` to every edge of every tour.
    fn deposit(&mut self, tours: &[Tour]) {
        for tour in tours {
            for &(from, to) in tour.edges() {
                if let Some(d) = self.distances.get(from, to) {
                    self.pheromone.deposit(from, to, inverse_distance(d));
                }
            }
        }
    }
}

/// `1 / d`, with zero-cost edges clamped to `1 / EPSILON` to stay finite.
#[inline]
fn inverse_distance(d: f64) -> f64 {
    1.0 / d.max(f64::EPSILON)
}
