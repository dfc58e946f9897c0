use std::collections::BTreeMap;

use boltz_core::errors::ErrorInfo;
use boltz_core::{BoltzError, RngHandle};

use crate::config::GridConfig;

/// Snapshot of the population grouped by level: quanta count to the number
/// of sites currently holding that count. Keys are exactly the occupied
/// levels; values sum to the number of sites.
pub type DistributionSnapshot = BTreeMap<u64, u64>;

/// Fixed-size grid of sites exchanging quanta one at a time.
///
/// The grid exclusively owns its site storage and its RNG; all mutation
/// goes through `&mut self`, which is the single-writer contract. The sum
/// over all sites is invariant under `step` and always equals
/// `num_sites() * initial_quanta`.
#[derive(Debug, Clone)]
pub struct ExchangeGrid {
    config: GridConfig,
    sites: Vec<u64>,
    rng: RngHandle,
    steps_taken: u64,
}

impl ExchangeGrid {
    /// Builds a grid with every site holding `initial_quanta`.
    ///
    /// Fails with a configuration error when either grid extent is zero.
    pub fn new(config: GridConfig) -> Result<Self, BoltzError> {
        if config.rows == 0 || config.cols == 0 {
            return Err(BoltzError::Config(
                ErrorInfo::new("grid-shape", "grid must have at least one site")
                    .with_context("rows", config.rows.to_string())
                    .with_context("cols", config.cols.to_string())
                    .with_hint("both extents must be >= 1"),
            ));
        }
        let sites = vec![config.initial_quanta; config.num_sites()];
        let rng = RngHandle::from_seed(config.seed);
        Ok(Self {
            config,
            sites,
            rng,
            steps_taken: 0,
        })
    }

    /// Performs one exchange: draws a source and a destination site
    /// uniformly with replacement and, when the source is non-empty, moves
    /// one quantum from source to destination.
    ///
    /// Drawing the same site twice is a defined no-op on the site value;
    /// the decrement and increment cancel, so conservation holds
    /// unconditionally.
    pub fn step(&mut self) {
        let source = self.rng.index_below(self.sites.len());
        let destination = self.rng.index_below(self.sites.len());
        if self.sites[source] > 0 {
            self.sites[source] -= 1;
            self.sites[destination] += 1;
        }
        self.steps_taken += 1;
    }

    /// Performs `count` successive exchanges.
    pub fn step_many(&mut self, count: u64) {
        for _ in 0..count {
            self.step();
        }
    }

    /// Groups sites by their current level and counts occurrences.
    /// Recomputed on every call; a step invalidates any previous snapshot.
    pub fn distribution(&self) -> DistributionSnapshot {
        let mut snapshot = DistributionSnapshot::new();
        for &quanta in &self.sites {
            *snapshot.entry(quanta).or_insert(0) += 1;
        }
        snapshot
    }

    /// Current sum of quanta over all sites.
    pub fn total(&self) -> u64 {
        self.sites.iter().sum()
    }

    /// The conserved total implied by the configuration.
    pub fn expected_total(&self) -> u64 {
        self.config.num_sites() as u64 * self.config.initial_quanta
    }

    /// Largest level currently held by any site (colour-scale upper bound
    /// for renderers).
    pub fn max_site(&self) -> u64 {
        self.sites.iter().copied().max().unwrap_or(0)
    }

    /// Number of grid rows.
    pub fn rows(&self) -> usize {
        self.config.rows
    }

    /// Number of grid columns.
    pub fn cols(&self) -> usize {
        self.config.cols
    }

    /// Total number of sites.
    pub fn num_sites(&self) -> usize {
        self.sites.len()
    }

    /// Level held by the site at `(row, col)`, or `None` out of range.
    pub fn site(&self, row: usize, col: usize) -> Option<u64> {
        if row >= self.config.rows || col >= self.config.cols {
            return None;
        }
        Some(self.sites[row * self.config.cols + col])
    }

    /// Row-major view of the site levels.
    pub fn sites(&self) -> &[u64] {
        &self.sites
    }

    /// Number of steps performed since construction.
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// The configuration the grid was built from.
    pub fn config(&self) -> &GridConfig {
        &self.config
    }
}
