//! Piecewise-exponential envelope over the log-density.
//!
//! Tangent lines to `ln pdf` at evenly spaced probe points majorize the
//! log-density whenever it is concave, so exponentiating them yields a
//! proposal the sampler can draw from in closed form. The envelope is built
//! once and never mutated by sampling.

use boltz_core::errors::ErrorInfo;
use boltz_core::{BoltzError, RngHandle};

use crate::density::Density;

// Relative tolerance below which two tangent slopes are treated as equal.
const SLOPE_EPS: f64 = 1e-12;

/// One exponential piece `exp(intercept + slope * x)` on `[lo, hi]`.
#[derive(Debug, Clone)]
pub(crate) struct Segment {
    slope: f64,
    intercept: f64,
    lo: f64,
    hi: f64,
    mass: f64,
}

/// Fixed piecewise-exponential majorant of the target density.
#[derive(Debug, Clone)]
pub(crate) struct Envelope {
    segments: Vec<Segment>,
    cumulative: Vec<f64>,
    total_mass: f64,
}

impl Envelope {
    /// Builds the envelope from tangents at `tangent_points` probe points.
    ///
    /// Validates, in order: density positivity and finiteness at every
    /// probe, log-concavity (non-increasing log-derivative), and a finite
    /// positive total envelope mass.
    pub(crate) fn build<D: Density>(
        density: &D,
        lo: f64,
        hi: f64,
        tangent_points: usize,
    ) -> Result<Self, BoltzError> {
        let width = hi - lo;
        let mut slopes = Vec::with_capacity(tangent_points);
        let mut intercepts = Vec::with_capacity(tangent_points);
        let mut probes = Vec::with_capacity(tangent_points);

        for index in 0..tangent_points {
            // Interior probes keep endpoint singularities out of the tangents.
            let x = lo + (index as f64 + 0.5) * width / tangent_points as f64;
            let value = density.pdf(x);
            if !value.is_finite() || value <= 0.0 {
                return Err(BoltzError::Density(
                    ErrorInfo::new("nonpositive-density", "density must be positive on the domain")
                        .with_context("probe", x.to_string())
                        .with_context("value", value.to_string())
                        .with_hint("restrict the domain to where pdf > 0"),
                ));
            }
            let derivative = density.dpdf(x);
            if !derivative.is_finite() {
                return Err(BoltzError::Density(
                    ErrorInfo::new("non-finite-derivative", "density derivative must be finite")
                        .with_context("probe", x.to_string()),
                ));
            }
            let slope = derivative / value;
            let log_value = value.ln();
            slopes.push(slope);
            intercepts.push(log_value - slope * x);
            probes.push(x);
        }

        for index in 1..tangent_points {
            let tolerance = SLOPE_EPS * (1.0 + slopes[index - 1].abs());
            if slopes[index] > slopes[index - 1] + tolerance {
                return Err(BoltzError::Density(
                    ErrorInfo::new("log-convex", "density is not log-concave on the domain")
                        .with_context("probe", probes[index].to_string())
                        .with_context("slope", slopes[index].to_string())
                        .with_context("previous_slope", slopes[index - 1].to_string()),
                ));
            }
        }

        // Breakpoints: consecutive tangent intersections, clamped so the
        // partition stays ordered under floating-point noise.
        let mut breakpoints = Vec::with_capacity(tangent_points + 1);
        breakpoints.push(lo);
        for index in 0..tangent_points - 1 {
            let previous = *breakpoints.last().unwrap();
            let slope_gap = slopes[index] - slopes[index + 1];
            let crossing = if slope_gap.abs() < SLOPE_EPS * (1.0 + slopes[index].abs()) {
                0.5 * (probes[index] + probes[index + 1])
            } else {
                (intercepts[index + 1] - intercepts[index]) / slope_gap
            };
            breakpoints.push(crossing.clamp(previous, hi));
        }
        breakpoints.push(hi);

        let mut segments = Vec::with_capacity(tangent_points);
        let mut cumulative = Vec::with_capacity(tangent_points);
        let mut total_mass = 0.0;
        for index in 0..tangent_points {
            let segment = Segment {
                slope: slopes[index],
                intercept: intercepts[index],
                lo: breakpoints[index],
                hi: breakpoints[index + 1],
                mass: 0.0,
            };
            let mass = segment_mass(&segment);
            if !mass.is_finite() || mass < 0.0 {
                return Err(BoltzError::Sampler(
                    ErrorInfo::new("degenerate-envelope", "envelope segment mass is not finite")
                        .with_context("segment", index.to_string())
                        .with_context("mass", mass.to_string()),
                ));
            }
            total_mass += mass;
            cumulative.push(total_mass);
            segments.push(Segment { mass, ..segment });
        }
        if !total_mass.is_finite() || total_mass <= 0.0 {
            return Err(BoltzError::Sampler(
                ErrorInfo::new("degenerate-envelope", "envelope has no positive mass")
                    .with_context("total_mass", total_mass.to_string()),
            ));
        }

        Ok(Self {
            segments,
            cumulative,
            total_mass,
        })
    }

    /// Draws a proposal: segment chosen proportionally to its mass, then a
    /// closed-form inverse-CDF draw within the segment's exponential.
    pub(crate) fn draw(&self, rng: &mut RngHandle) -> f64 {
        let target = rng.uniform() * self.total_mass;
        let mut chosen = self.segments.len() - 1;
        for (index, bound) in self.cumulative.iter().enumerate() {
            if target <= *bound && self.segments[index].mass > 0.0 {
                chosen = index;
                break;
            }
        }
        let segment = &self.segments[chosen];
        let spread = segment.hi - segment.lo;
        let fraction = rng.uniform();
        let draw = if segment.slope.abs() * spread < SLOPE_EPS {
            segment.lo + fraction * spread
        } else {
            segment.lo + (fraction * (segment.slope * spread).exp_m1()).ln_1p() / segment.slope
        };
        draw.clamp(segment.lo, segment.hi)
    }

    /// Envelope value at `x`. The envelope majorizes the density, so the
    /// acceptance ratio `pdf(x) / value_at(x)` never exceeds one (up to
    /// floating-point error).
    pub(crate) fn value_at(&self, x: f64) -> f64 {
        let segment = self
            .segments
            .iter()
            .find(|segment| x <= segment.hi)
            .unwrap_or_else(|| self.segments.last().expect("envelope has segments"));
        (segment.intercept + segment.slope * x).exp()
    }

    /// Number of exponential pieces in the envelope.
    pub(crate) fn num_segments(&self) -> usize {
        self.segments.len()
    }

    /// Total (unnormalized) envelope mass over the domain.
    pub(crate) fn total_mass(&self) -> f64 {
        self.total_mass
    }
}

// Exact integral of exp(intercept + slope * x) over the segment, with a
// flat branch for slopes that vanish relative to the segment width.
fn segment_mass(segment: &Segment) -> f64 {
    let spread = segment.hi - segment.lo;
    if spread <= 0.0 {
        return 0.0;
    }
    if segment.slope.abs() * spread < SLOPE_EPS {
        (segment.intercept + segment.slope * segment.lo).exp() * spread
    } else {
        (segment.intercept + segment.slope * segment.lo).exp() * (segment.slope * spread).exp_m1()
            / segment.slope
    }
}
