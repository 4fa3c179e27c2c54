//! Ant Colony Optimization (ACO).
//!
//! A population of ants repeatedly builds closed tours over a distance
//! matrix. Each step picks the next city with probability proportional to
//! `pheromone^alpha * (1/distance)^beta`. After every iteration each used
//! edge is reinforced by `1/distance`, and the whole pheromone matrix is
//! scaled by a retention factor, so short edges that keep appearing in
//! tours attract more ants over time.
//!
//! # References
//!
//! - Dorigo, Maniezzo & Colorni (1996), "Ant System: Optimization by a
//!   Colony of Cooperating Agents"
//! - Dorigo & Stützle (2004), *Ant Colony Optimization*, MIT Press

mod config;
mod runner;
mod types;

pub use config::AcoConfig;
pub use runner::{AcoResult, AntColony, IterationStats, StopReason};
pub use types::{DistanceMatrix, PheromoneMatrix, Tour};
