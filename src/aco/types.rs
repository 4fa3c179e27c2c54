//! Colony data model: distance matrix, pheromone matrix and tours.

use crate::error::{AcoError, Result};

/// Immutable n×n cost matrix.
///
/// Each off-diagonal cell is either a finite non-negative cost or
/// unreachable (no edge). The diagonal is always unreachable since tours
/// never contain self-loops. Cells are stored row-major.
///
/// # Examples
///
/// ```
/// use u_antcolony::aco::DistanceMatrix;
///
/// let inf = f64::INFINITY;
/// let m = DistanceMatrix::from_rows(vec![
///     vec![inf, 2.0, 9.0],
///     vec![2.0, inf, 4.0],
///     vec![9.0, 4.0, inf],
/// ])
/// .unwrap();
/// assert_eq!(m.n_cities(), 3);
/// assert_eq!(m.get(0, 1), Some(2.0));
/// assert_eq!(m.get(1, 1), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    costs: Vec<Option<f64>>,
}

impl DistanceMatrix {
    /// Builds a matrix from numeric rows.
    ///
    /// `f64::INFINITY` marks a missing edge. Diagonal values are ignored.
    ///
    /// # Errors
    /// [`AcoError::InvalidInput`] if the rows are not square, fewer than two
    /// cities are given, or an off-diagonal entry is negative or NaN.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|d| if d == f64::INFINITY { None } else { Some(d) })
                    .collect()
            })
            .collect();
        Self::from_options(rows)
    }

    /// Builds a matrix from rows where `None` marks a missing edge.
    ///
    /// # Errors
    /// Same conditions as [`DistanceMatrix::from_rows`].
    pub fn from_options(rows: Vec<Vec<Option<f64>>>) -> Result<Self> {
        let n = rows.len();
        if n < 2 {
            return Err(AcoError::invalid(format!(
                "distance matrix needs at least 2 cities, got {n}"
            )));
        }

        let mut costs = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(AcoError::invalid(format!(
                    "distance matrix must be square: row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            for (j, cell) in row.into_iter().enumerate() {
                if i == j {
                    costs.push(None);
                    continue;
                }
                if let Some(d) = cell {
                    if d.is_nan() || d < 0.0 || d.is_infinite() {
                        return Err(AcoError::invalid(format!(
                            "distance ({i}, {j}) must be finite and non-negative, got {d}"
                        )));
                    }
                }
                costs.push(cell);
            }
        }

        Ok(Self { n, costs })
    }

    /// Number of cities.
    pub fn n_cities(&self) -> usize {
        self.n
    }

    /// Cost of the directed edge `from -> to`, or `None` if unreachable.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> Option<f64> {
        assert!(from < self.n && to < self.n, "city index out of range");
        self.costs[from * self.n + to]
    }

    /// Sum of costs along `edges`, or `None` if any edge is unreachable.
    pub fn path_length(&self, edges: &[(usize, usize)]) -> Option<f64> {
        edges
            .iter()
            .map(|&(from, to)| self.get(from, to))
            .sum::<Option<f64>>()
    }
}

/// Per-edge desirability weights, keyed by directed edge.
#[derive(Debug, Clone, PartialEq)]
pub struct PheromoneMatrix {
    n: usize,
    values: Vec<f64>,
}

impl PheromoneMatrix {
    /// Creates an n×n matrix with every cell set to `1/n`.
    pub fn uniform(n: usize) -> Self {
        let init = 1.0 / n as f64;
        Self {
            n,
            values: vec![init; n * n],
        }
    }

    /// Number of cities.
    pub fn n_cities(&self) -> usize {
        self.n
    }

    /// Pheromone on the directed edge `from -> to`.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.values[from * self.n + to]
    }

    /// Adds `amount` to the directed edge `from -> to`.
    pub fn deposit(&mut self, from: usize, to: usize, amount: f64) {
        debug_assert!(amount >= 0.0, "deposit must be non-negative");
        self.values[from * self.n + to] += amount;
    }

    /// Multiplies every cell by `retention`.
    pub fn evaporate(&mut self, retention: f64) {
        debug_assert!((0.0..1.0).contains(&retention));
        for v in &mut self.values {
            *v *= retention;
        }
    }

    /// Smallest value in the matrix.
    pub fn min_value(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    /// All cells, row-major.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// A closed tour as a sequence of directed edges.
///
/// Every city appears exactly once as an edge origin, and the last edge
/// returns to the origin of the first.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    edges: Vec<(usize, usize)>,
    length: f64,
}

impl Tour {
    pub(crate) fn new(edges: Vec<(usize, usize)>, length: f64) -> Self {
        Self { edges, length }
    }

    /// Edges in traversal order.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Total cost of the tour.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// City where the tour starts and ends.
    pub fn start(&self) -> Option<usize> {
        self.edges.first().map(|&(from, _)| from)
    }

    /// Cities in visit order, beginning with the start city.
    pub fn cities(&self) -> Vec<usize> {
        self.edges.iter().map(|&(from, _)| from).collect()
    }

    /// Checks that this is a Hamiltonian cycle over `n` cities.
    pub fn is_valid_for(&self, n: usize) -> bool {
        if self.edges.len() != n || n == 0 {
            return false;
        }
        let mut seen = vec![false; n];
        for window in self.edges.windows(2) {
            if window[0].1 != window[1].0 {
                return false;
            }
        }
        for &(from, to) in &self.edges {
            if from >= n || to >= n || from == to || seen[from] {
                return false;
            }
            seen[from] = true;
        }
        self.edges[0].0 == self.edges[n - 1].1
    }
}
