use boltz_core::errors::ErrorInfo;
use boltz_core::BoltzError;

/// Unnormalized density specification: the value and its derivative.
///
/// The sampler never normalizes the density; it only evaluates it at probe
/// and candidate points. The derivative must be consistent with the value
/// (it is only used through the log-derivative `dpdf / pdf`).
pub trait Density {
    /// Density value at `x`. Need not integrate to one.
    fn pdf(&self, x: f64) -> f64;

    /// Derivative of [`Density::pdf`] at `x`.
    fn dpdf(&self, x: f64) -> f64;
}

/// The Boltzmann density `exp(-p / T)` with the Boltzmann constant taken
/// as one. Log-linear, so the tangent envelope reproduces it exactly and
/// rejections are pure floating-point noise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boltzmann {
    temperature: f64,
}

impl Boltzmann {
    /// Creates the density for a strictly positive temperature.
    pub fn new(temperature: f64) -> Result<Self, BoltzError> {
        if !temperature.is_finite() || temperature <= 0.0 {
            return Err(BoltzError::Config(
                ErrorInfo::new("temperature", "temperature must be finite and positive")
                    .with_context("temperature", temperature.to_string()),
            ));
        }
        Ok(Self { temperature })
    }

    /// The configured temperature.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}

impl Density for Boltzmann {
    fn pdf(&self, x: f64) -> f64 {
        (-x / self.temperature).exp()
    }

    fn dpdf(&self, x: f64) -> f64 {
        -(-x / self.temperature).exp() / self.temperature
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boltzmann_rejects_bad_temperatures() {
        assert!(Boltzmann::new(0.0).is_err());
        assert!(Boltzmann::new(-5.0).is_err());
        assert!(Boltzmann::new(f64::NAN).is_err());
        assert!(Boltzmann::new(100.0).is_ok());
    }

    #[test]
    fn derivative_matches_finite_difference() {
        let density = Boltzmann::new(100.0).unwrap();
        let x = 37.0;
        let step = 1e-5;
        let numeric = (density.pdf(x + step) - density.pdf(x - step)) / (2.0 * step);
        assert!((numeric - density.dpdf(x)).abs() < 1e-9);
    }
}
