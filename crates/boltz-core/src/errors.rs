//! Structured error types shared across the workspace crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`BoltzError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (sizes, bounds, probe values, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the exchange engine and the density sampler.
///
/// Construction-time validation reports every failure through one of these
/// families; runtime operations never raise a new family once construction
/// has succeeded (the `sample` attempt guard reports through `Sampler`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum BoltzError {
    /// Invalid engine or request configuration (degenerate grid shape,
    /// zero-length sample batch).
    #[error("configuration error: {0}")]
    Config(ErrorInfo),
    /// Degenerate or non-finite sampling interval.
    #[error("domain error: {0}")]
    Domain(ErrorInfo),
    /// Density unsuitable for tangent-envelope rejection sampling:
    /// non-positive, non-finite, or not log-concave on the domain.
    #[error("density error: {0}")]
    Density(ErrorInfo),
    /// Malformed proposal envelope, detected at construction or by the
    /// rejection attempt guard.
    #[error("sampler error: {0}")]
    Sampler(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl BoltzError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            BoltzError::Config(info)
            | BoltzError::Domain(info)
            | BoltzError::Density(info)
            | BoltzError::Sampler(info) => info,
        }
    }
}
