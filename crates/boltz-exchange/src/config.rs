use serde::{Deserialize, Serialize};

/// Configuration for a single exchange grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of grid rows.
    #[serde(default = "default_extent")]
    pub rows: usize,
    /// Number of grid columns.
    #[serde(default = "default_extent")]
    pub cols: usize,
    /// Quanta assigned to every site at construction.
    #[serde(default = "default_initial_quanta")]
    pub initial_quanta: u64,
    /// Master seed for the grid's private RNG.
    #[serde(default = "default_master_seed")]
    pub seed: u64,
}

fn default_extent() -> usize {
    20
}

fn default_initial_quanta() -> u64 {
    1
}

fn default_master_seed() -> u64 {
    0x05EE_D5EE_DD15_5EED_u64
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_extent(),
            cols: default_extent(),
            initial_quanta: default_initial_quanta(),
            seed: default_master_seed(),
        }
    }
}

impl GridConfig {
    /// Total number of sites described by this configuration.
    pub fn num_sites(&self) -> usize {
        self.rows * self.cols
    }
}

/// Configuration for a lockstep ensemble of grids sharing one shape.
///
/// Each entry in `initial_quanta` produces one grid; grids advance together
/// so that populations starting from different levels can be compared after
/// the same number of exchanges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnsembleConfig {
    /// Number of grid rows shared by every member.
    #[serde(default = "default_extent")]
    pub rows: usize,
    /// Number of grid columns shared by every member.
    #[serde(default = "default_extent")]
    pub cols: usize,
    /// Starting level per member grid, one grid per entry.
    #[serde(default = "default_ensemble_levels")]
    pub initial_quanta: Vec<u64>,
    /// Master seed; member grids draw from derived substreams.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
}

fn default_ensemble_levels() -> Vec<u64> {
    vec![1, 2]
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            rows: default_extent(),
            cols: default_extent(),
            initial_quanta: default_ensemble_levels(),
            master_seed: default_master_seed(),
        }
    }
}
