#![deny(missing_docs)]

//! Shared foundation for the quantum-exchange workspace: structured error
//! types, the deterministic RNG handle injected into both the exchange
//! engine and the density sampler, and the statistics helpers used to
//! summarise site populations and sample batches.

pub mod errors;
pub mod rng;
pub mod stat;

pub use errors::{BoltzError, ErrorInfo};
pub use rng::{derive_substream_seed, RngHandle};
pub use stat::{geometric_pmf, ks_statistic, mean, total_variation, variance, Histogram};
