//! Statistics helpers for level-count snapshots and sample batches.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Deterministic histogram descriptor over a fixed interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bin edges (inclusive of the left edge, exclusive of the right edge
    /// except the last bin).
    pub edges: Vec<f64>,
    /// Counts recorded per bin.
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Bins `values` into `bins` equal-width bins over `[start, end]`.
    /// Out-of-range values are clamped into the edge bins.
    pub fn from_samples(values: &[f64], start: f64, end: f64, bins: usize) -> Self {
        let mut edges = Vec::with_capacity(bins + 1);
        let step = if bins == 0 {
            1.0
        } else {
            (end - start) / bins as f64
        };
        for idx in 0..=bins {
            edges.push(start + idx as f64 * step);
        }
        let mut counts = vec![0u64; bins];
        if bins == 0 {
            return Self { edges, counts };
        }
        for &value in values {
            let mut bin = ((value - start) / step).floor() as isize;
            if bin < 0 {
                bin = 0;
            }
            if bin as usize >= bins {
                bin = (bins as isize) - 1;
            }
            counts[bin as usize] += 1;
        }
        Self { edges, counts }
    }

    /// Total number of recorded values.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Arithmetic mean of the values, or `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().copied().sum::<f64>() / values.len() as f64)
}

/// Population variance of the values, or `None` for an empty slice.
pub fn variance(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let sq_mean = values.iter().copied().map(|v| v * v).sum::<f64>() / values.len() as f64;
    Some((sq_mean - mean * mean).max(0.0))
}

/// Probability mass of the geometric distribution with the given mean at
/// `level` (support `0, 1, 2, ...`). This is the discrete Boltzmann limit a
/// conserved exchange population relaxes towards.
pub fn geometric_pmf(mean: f64, level: u64) -> f64 {
    if mean <= 0.0 {
        return if level == 0 { 1.0 } else { 0.0 };
    }
    let p = 1.0 / (1.0 + mean);
    p * (1.0 - p).powf(level as f64)
}

/// Total variation distance between an observed level-count snapshot and a
/// reference probability mass function.
///
/// Reference mass on levels absent from the snapshot contributes in full,
/// so the result is exact even though the reference support is unbounded.
pub fn total_variation<F>(observed: &BTreeMap<u64, u64>, reference_pmf: F) -> f64
where
    F: Fn(u64) -> f64,
{
    let total: u64 = observed.values().sum();
    if total == 0 {
        return 1.0;
    }
    let mut distance = 0.0;
    let mut covered_reference = 0.0;
    for (&level, &count) in observed {
        let empirical = count as f64 / total as f64;
        let reference = reference_pmf(level);
        covered_reference += reference;
        distance += (empirical - reference).abs();
    }
    distance += (1.0 - covered_reference).max(0.0);
    distance / 2.0
}

/// Two-sided Kolmogorov–Smirnov statistic of `samples` against an analytic
/// CDF: the sup-distance between the empirical and reference CDFs.
pub fn ks_statistic<F>(samples: &[f64], cdf: F) -> f64
where
    F: Fn(f64) -> f64,
{
    if samples.is_empty() {
        return 1.0;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let n = sorted.len() as f64;
    let mut sup = 0.0f64;
    for (idx, &value) in sorted.iter().enumerate() {
        let reference = cdf(value);
        let above = (idx as f64 + 1.0) / n - reference;
        let below = reference - idx as f64 / n;
        sup = sup.max(above).max(below);
    }
    sup
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_clamps_out_of_range_values() {
        let histogram = Histogram::from_samples(&[-5.0, 0.5, 1.5, 99.0], 0.0, 2.0, 2);
        assert_eq!(histogram.counts, vec![2, 2]);
        assert_eq!(histogram.total(), 4);
    }

    #[test]
    fn geometric_pmf_sums_to_one() {
        let mass: f64 = (0..200).map(|level| geometric_pmf(4.0, level)).sum();
        assert!((mass - 1.0).abs() < 1e-12);
    }

    #[test]
    fn total_variation_of_exact_match_is_small() {
        // Counts proportional to the reference pmf over a truncated support.
        let mut observed = BTreeMap::new();
        for level in 0..40u64 {
            observed.insert(level, (geometric_pmf(1.0, level) * 1e9) as u64);
        }
        let distance = total_variation(&observed, |level| geometric_pmf(1.0, level));
        assert!(distance < 1e-6);
    }

    #[test]
    fn ks_statistic_is_zero_for_matching_cdf() {
        let samples: Vec<f64> = (1..=100).map(|idx| idx as f64 / 100.0).collect();
        let statistic = ks_statistic(&samples, |value| value.clamp(0.0, 1.0));
        assert!(statistic <= 0.01 + 1e-12);
    }
}
