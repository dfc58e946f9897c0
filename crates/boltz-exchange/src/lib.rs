#![deny(missing_docs)]

//! Conserved quantum-exchange engine.
//!
//! A fixed grid of sites each holds a non-negative integer number of
//! quanta. Every step picks a source and a destination site uniformly at
//! random (with replacement) and, when the source is non-empty, moves one
//! quantum across. The total over the grid is conserved exactly, and the
//! per-site marginal relaxes towards the geometric (discrete Boltzmann)
//! distribution. Drivers consume the engine through `step` and
//! `distribution`; rendering and pacing live entirely outside this crate.

/// Grid and ensemble configuration schemas.
pub mod config;
/// Lockstep multi-grid comparison runs.
pub mod ensemble;
/// The exchange grid and its step/snapshot operations.
pub mod grid;

pub use config::{EnsembleConfig, GridConfig};
pub use ensemble::GridEnsemble;
pub use grid::{DistributionSnapshot, ExchangeGrid};
