use boltz_core::errors::ErrorInfo;
use boltz_core::{derive_substream_seed, BoltzError};

use crate::config::{EnsembleConfig, GridConfig};
use crate::grid::{DistributionSnapshot, ExchangeGrid};

/// Lockstep collection of grids sharing one shape but starting from
/// different per-site levels.
///
/// Member grids draw their seeds from substreams of the ensemble master
/// seed, so an ensemble run is reproducible from `(config, step count)`
/// alone. Every call to [`GridEnsemble::step_all`] advances each member by
/// exactly one exchange, keeping the members comparable after any number of
/// rounds.
#[derive(Debug, Clone)]
pub struct GridEnsemble {
    grids: Vec<ExchangeGrid>,
}

impl GridEnsemble {
    /// Builds one grid per starting level in the configuration.
    pub fn new(config: EnsembleConfig) -> Result<Self, BoltzError> {
        if config.initial_quanta.is_empty() {
            return Err(BoltzError::Config(
                ErrorInfo::new("ensemble-empty", "ensemble requires at least one starting level")
                    .with_hint("supply one initial_quanta entry per member grid"),
            ));
        }
        let mut grids = Vec::with_capacity(config.initial_quanta.len());
        for (index, &initial_quanta) in config.initial_quanta.iter().enumerate() {
            let grid = ExchangeGrid::new(GridConfig {
                rows: config.rows,
                cols: config.cols,
                initial_quanta,
                seed: derive_substream_seed(config.master_seed, index as u64),
            })?;
            grids.push(grid);
        }
        Ok(Self { grids })
    }

    /// Advances every member grid by one exchange.
    pub fn step_all(&mut self) {
        for grid in &mut self.grids {
            grid.step();
        }
    }

    /// Advances every member grid by `count` exchanges.
    pub fn step_all_many(&mut self, count: u64) {
        for _ in 0..count {
            self.step_all();
        }
    }

    /// Immutable view over the member grids.
    pub fn grids(&self) -> &[ExchangeGrid] {
        &self.grids
    }

    /// Per-member distribution snapshots, in configuration order.
    pub fn distributions(&self) -> Vec<DistributionSnapshot> {
        self.grids.iter().map(ExchangeGrid::distribution).collect()
    }

    /// Per-member totals, in configuration order.
    pub fn totals(&self) -> Vec<u64> {
        self.grids.iter().map(ExchangeGrid::total).collect()
    }

    /// Number of member grids.
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    /// Whether the ensemble has no members (never true after construction).
    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }
}
