//! Error types for request validation and option parsing.

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single violated constraint on a design request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Name of the offending request field (e.g. `"alpha"`, `"weights"`).
    pub field: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// A design request failed validation.
///
/// Carries every violated constraint, not just the first one found. The
/// `Display` output lists one violation per line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", render_violations(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Build an error from collected violations.
    ///
    /// Returns `None` when there is nothing to report.
    pub fn from_violations(violations: Vec<Violation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Self { violations })
        }
    }

    /// An error with exactly one violation.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violations: vec![Violation::new(field, message)],
        }
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Names of all offending fields, in the order they were checked.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.field.as_str())
    }

    /// Whether any violation concerns `field`.
    pub fn mentions(&self, field: &str) -> bool {
        self.fields().any(|f| f == field)
    }
}

fn render_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// An option string did not name a known value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} must be {expected}, got '{value}'")]
pub struct ParseOptionError {
    /// Option being parsed (e.g. `"correction"`).
    pub field: &'static str,
    /// The rejected input.
    pub value: String,
    /// Description of the accepted values.
    pub expected: &'static str,
}

impl ParseOptionError {
    pub fn new(field: &'static str, value: impl Into<String>, expected: &'static str) -> Self {
        Self {
            field,
            value: value.into(),
            expected,
        }
    }
}

impl From<ParseOptionError> for Violation {
    fn from(err: ParseOptionError) -> Self {
        Violation::new(err.field, err.to_string())
    }
}
