use serde::{Deserialize, Serialize};

use boltz_core::errors::ErrorInfo;
use boltz_core::{BoltzError, RngHandle};

use crate::density::Density;
use crate::hull::Envelope;

// Rejection attempts allowed per accepted sample before the envelope is
// declared broken. Legitimate envelopes sit orders of magnitude below this.
const MAX_ATTEMPTS_PER_SAMPLE: u64 = 10_000;

/// Configuration for a [`RejectionSampler`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Lower bound of the sampling domain.
    pub lo: f64,
    /// Upper bound of the sampling domain.
    pub hi: f64,
    /// Number of tangent lines used to build the envelope. More tangents
    /// tighten the envelope (fewer rejections) at a small setup cost.
    #[serde(default = "default_tangent_points")]
    pub tangent_points: usize,
    /// Master seed for the sampler's private RNG.
    #[serde(default = "default_master_seed")]
    pub seed: u64,
}

fn default_tangent_points() -> usize {
    8
}

fn default_master_seed() -> u64 {
    0x05EE_D5EE_DD15_5EED_u64
}

impl SamplerConfig {
    /// Configuration over `[lo, hi]` with default tangent count and seed.
    pub fn over(lo: f64, hi: f64) -> Self {
        Self {
            lo,
            hi,
            tangent_points: default_tangent_points(),
            seed: default_master_seed(),
        }
    }

    /// Replaces the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replaces the tangent count.
    pub fn with_tangent_points(mut self, tangent_points: usize) -> Self {
        self.tangent_points = tangent_points;
        self
    }
}

/// Accept/propose counters accumulated across `sample` calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SampleSummary {
    /// Candidates accepted (equals the number of returned samples).
    pub accepted: u64,
    /// Candidates proposed, including rejected ones.
    pub proposed: u64,
}

impl SampleSummary {
    /// Fraction of proposals accepted, or 1.0 before any proposal.
    pub fn acceptance_rate(&self) -> f64 {
        if self.proposed == 0 {
            1.0
        } else {
            self.accepted as f64 / self.proposed as f64
        }
    }
}

/// Rejection sampler over a fixed piecewise-exponential envelope.
///
/// The density is borrowed from the caller and must not change for the
/// sampler's lifetime; the envelope is derived from it once at
/// construction. Accepted samples are exact draws from the normalized
/// restriction of the density to the configured domain, independent of how
/// many candidates were rejected along the way.
#[derive(Debug)]
pub struct RejectionSampler<'a, D: Density> {
    density: &'a D,
    envelope: Envelope,
    rng: RngHandle,
    summary: SampleSummary,
    lo: f64,
    hi: f64,
}

impl<'a, D: Density> RejectionSampler<'a, D> {
    /// Validates the configuration and builds the envelope.
    ///
    /// Fails with a domain error on a degenerate interval, a configuration
    /// error on an unusable tangent count, a density error when the density
    /// is non-positive or not log-concave on the domain, and a sampler
    /// error when the envelope mass degenerates.
    pub fn new(density: &'a D, config: SamplerConfig) -> Result<Self, BoltzError> {
        if !config.lo.is_finite() || !config.hi.is_finite() || config.lo >= config.hi {
            return Err(BoltzError::Domain(
                ErrorInfo::new("domain-order", "domain must be a finite interval with lo < hi")
                    .with_context("lo", config.lo.to_string())
                    .with_context("hi", config.hi.to_string()),
            ));
        }
        if config.tangent_points < 2 {
            return Err(BoltzError::Config(
                ErrorInfo::new("tangent-points", "envelope needs at least two tangent points")
                    .with_context("tangent_points", config.tangent_points.to_string()),
            ));
        }
        let envelope = Envelope::build(density, config.lo, config.hi, config.tangent_points)?;
        Ok(Self {
            density,
            envelope,
            rng: RngHandle::from_seed(config.seed),
            summary: SampleSummary::default(),
            lo: config.lo,
            hi: config.hi,
        })
    }

    /// Draws `count` independent samples from the normalized density.
    ///
    /// Rejection retries are part of the algorithm and unbounded only in
    /// expectation; a per-sample attempt cap converts a broken envelope
    /// into a sampler error instead of a hang.
    pub fn sample(&mut self, count: usize) -> Result<Vec<f64>, BoltzError> {
        if count < 1 {
            return Err(BoltzError::Config(
                ErrorInfo::new("sample-count", "sample batch must contain at least one draw")
                    .with_context("count", count.to_string()),
            ));
        }
        let mut samples = Vec::with_capacity(count);
        for _ in 0..count {
            samples.push(self.sample_one()?);
        }
        Ok(samples)
    }

    fn sample_one(&mut self) -> Result<f64, BoltzError> {
        for _ in 0..MAX_ATTEMPTS_PER_SAMPLE {
            let candidate = self.envelope.draw(&mut self.rng);
            let bound = self.envelope.value_at(candidate);
            let target = self.density.pdf(candidate);
            self.summary.proposed += 1;
            if self.rng.uniform() * bound <= target {
                self.summary.accepted += 1;
                return Ok(candidate);
            }
        }
        Err(BoltzError::Sampler(
            ErrorInfo::new(
                "attempt-guard",
                "rejection cap exceeded; envelope does not majorize the density",
            )
            .with_context("max_attempts", MAX_ATTEMPTS_PER_SAMPLE.to_string())
            .with_hint("check that pdf and dpdf are consistent"),
        ))
    }

    /// Accept/propose counters accumulated so far.
    pub fn summary(&self) -> SampleSummary {
        self.summary
    }

    /// The sampling domain `[lo, hi]`.
    pub fn domain(&self) -> (f64, f64) {
        (self.lo, self.hi)
    }

    /// Number of exponential pieces in the proposal envelope.
    pub fn num_segments(&self) -> usize {
        self.envelope.num_segments()
    }

    /// Unnormalized envelope mass over the domain; the ratio of the
    /// density's own mass to this value is the expected acceptance rate.
    pub fn envelope_mass(&self) -> f64 {
        self.envelope.total_mass()
    }
}
