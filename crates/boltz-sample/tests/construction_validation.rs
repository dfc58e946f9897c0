use boltz_core::BoltzError;
use boltz_sample::{Boltzmann, Density, RejectionSampler, SamplerConfig};

/// Log-convex on any interval around zero; must be refused up front.
#[derive(Debug)]
struct LogConvex;

impl Density for LogConvex {
    fn pdf(&self, x: f64) -> f64 {
        (0.5 * x * x).exp()
    }

    fn dpdf(&self, x: f64) -> f64 {
        x * (0.5 * x * x).exp()
    }
}

/// Goes negative on part of the domain.
#[derive(Debug)]
struct SignedLine;

impl Density for SignedLine {
    fn pdf(&self, x: f64) -> f64 {
        x
    }

    fn dpdf(&self, _x: f64) -> f64 {
        1.0
    }
}

fn boltzmann() -> Boltzmann {
    Boltzmann::new(100.0).unwrap()
}

#[test]
fn reversed_domain_is_rejected() {
    let density = boltzmann();
    let err = RejectionSampler::new(&density, SamplerConfig::over(100.0, 10.0)).unwrap_err();
    assert!(matches!(err, BoltzError::Domain(_)));
    assert_eq!(err.info().code, "domain-order");
}

#[test]
fn degenerate_and_non_finite_domains_are_rejected() {
    let density = boltzmann();
    let point = RejectionSampler::new(&density, SamplerConfig::over(10.0, 10.0)).unwrap_err();
    assert!(matches!(point, BoltzError::Domain(_)));

    let unbounded =
        RejectionSampler::new(&density, SamplerConfig::over(10.0, f64::INFINITY)).unwrap_err();
    assert!(matches!(unbounded, BoltzError::Domain(_)));
}

#[test]
fn too_few_tangent_points_is_rejected() {
    let density = boltzmann();
    let config = SamplerConfig::over(10.0, 1000.0).with_tangent_points(1);
    let err = RejectionSampler::new(&density, config).unwrap_err();
    assert!(matches!(err, BoltzError::Config(_)));
    assert_eq!(err.info().code, "tangent-points");
}

#[test]
fn log_convex_density_is_rejected() {
    let err = RejectionSampler::new(&LogConvex, SamplerConfig::over(-1.0, 1.0)).unwrap_err();
    assert!(matches!(err, BoltzError::Density(_)));
    assert_eq!(err.info().code, "log-convex");
}

#[test]
fn non_positive_density_is_rejected() {
    let err = RejectionSampler::new(&SignedLine, SamplerConfig::over(-1.0, 1.0)).unwrap_err();
    assert!(matches!(err, BoltzError::Density(_)));
    assert_eq!(err.info().code, "nonpositive-density");
}

#[test]
fn empty_batch_request_is_rejected() {
    let density = boltzmann();
    let mut sampler =
        RejectionSampler::new(&density, SamplerConfig::over(10.0, 1000.0)).unwrap();
    let err = sampler.sample(0).unwrap_err();
    assert!(matches!(err, BoltzError::Config(_)));
    assert_eq!(err.info().code, "sample-count");
}

#[test]
fn config_deserializes_with_defaults() {
    let config: SamplerConfig = serde_json::from_str(r#"{"lo": 10.0, "hi": 1000.0}"#).unwrap();
    assert_eq!(config.tangent_points, 8);
    assert_eq!(config.lo, 10.0);
}
