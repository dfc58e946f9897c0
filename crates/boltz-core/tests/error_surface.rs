use boltz_core::errors::{BoltzError, ErrorInfo};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("rows", "0")
        .with_context("cols", "20")
}

#[test]
fn config_error_surface() {
    let err = BoltzError::Config(sample_info("grid-shape", "grid must have at least one site"));
    assert_eq!(err.info().code, "grid-shape");
    assert!(err.info().context.contains_key("rows"));
}

#[test]
fn domain_error_surface() {
    let err = BoltzError::Domain(sample_info("domain-order", "lower bound above upper bound"));
    assert_eq!(err.info().code, "domain-order");
    assert!(err.info().context.contains_key("cols"));
}

#[test]
fn density_error_surface() {
    let err = BoltzError::Density(sample_info("log-convex", "density is not log-concave"));
    assert_eq!(err.info().code, "log-convex");
}

#[test]
fn sampler_error_surface() {
    let err = BoltzError::Sampler(sample_info("attempt-guard", "rejection cap exceeded"));
    assert_eq!(err.info().code, "attempt-guard");
}

#[test]
fn display_includes_context_and_hint() {
    let err = BoltzError::Config(
        ErrorInfo::new("grid-shape", "grid must have at least one site")
            .with_context("rows", "0")
            .with_hint("pass rows >= 1"),
    );
    let rendered = err.to_string();
    assert!(rendered.contains("grid-shape"));
    assert!(rendered.contains("rows=0"));
    assert!(rendered.contains("pass rows >= 1"));
}

#[test]
fn errors_roundtrip_through_json() {
    let err = BoltzError::Density(sample_info("nonpositive-density", "pdf not positive at probe"));
    let json = serde_json::to_string(&err).unwrap();
    let restored: BoltzError = serde_json::from_str(&json).unwrap();
    assert_eq!(err, restored);
}
