#![deny(missing_docs)]

//! Rejection sampling from arbitrary unnormalized log-concave densities.
//!
//! Given a density's value and derivative on a bounded interval, the
//! sampler builds a piecewise-exponential envelope from tangents to the
//! log-density and draws exact samples from the normalized restriction of
//! the density by accept/reject against that envelope. The envelope is
//! built once at construction; every malformed input (degenerate domain,
//! non-positive or log-convex density) is rejected eagerly rather than
//! surfacing as a stalled sampling loop.

/// Density traits and the built-in Boltzmann target.
pub mod density;
mod hull;
/// The rejection sampler and its configuration.
pub mod sampler;

pub use density::{Boltzmann, Density};
pub use sampler::{RejectionSampler, SampleSummary, SamplerConfig};
