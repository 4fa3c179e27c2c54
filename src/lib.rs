//! Ant Colony Optimization engine.
//!
//! Builds closed tours over a distance matrix with the Ant System rule:
//! every ant grows a tour by weighted random choice, every tour reinforces
//! the edges it used, and pheromone decays uniformly between iterations.
//!
//! - [`aco`]: distance and pheromone matrices, configuration, and the
//!   colony engine.
//! - [`random`]: seeded RNG construction and weighted sampling.
//! - [`error`]: the crate error type.
//!
//! # Example
//!
//! ```
//! use u_antcolony::aco::{AcoConfig, AntColony};
//!
//! let inf = f64::INFINITY;
//! let rows = vec![
//!     vec![inf, 1.0, 4.0, 1.0],
//!     vec![1.0, inf, 1.0, 4.0],
//!     vec![4.0, 1.0, inf, 1.0],
//!     vec![1.0, 4.0, 1.0, inf],
//! ];
//! let config = AcoConfig::default().with_ants(10).with_iterations(20).with_seed(42);
//! let result = AntColony::from_rows(rows, config)?.optimize()?;
//! assert_eq!(result.best.cities()[0], 0);
//! assert!((result.best_length - 4.0).abs() < 1e-9);
//! # Ok::<(), u_antcolony::AcoError>(())
//! ```

pub mod aco;
pub mod error;
pub mod random;

pub use error::{AcoError, Result};
