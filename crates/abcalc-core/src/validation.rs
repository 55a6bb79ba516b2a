//! Request validation.
//!
//! Every constraint is checked and all violations are reported together, so
//! a caller can fix a request in one pass. No solver runs on a request that
//! fails validation.

use crate::analysis::effect;
use crate::error::{ValidationError, Violation};
use crate::request::{Allocation, DesignRequest, Target};
use crate::types::{MetricKind, TestFamily};

/// Which quantity the caller is solving for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveMode {
    /// Effect given, solve for sample size.
    SampleSize,
    /// Sample size given, solve for the detectable effect.
    Mde,
}

/// Check `request` for `mode`, collecting every violated constraint.
pub fn validate(request: &DesignRequest, mode: SolveMode) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    check_rates(request, &mut violations);
    check_metric(request, &mut violations);
    check_target(request, mode, &mut violations);
    check_allocation(request, mode, &mut violations);
    check_comparisons(request, &mut violations);

    match ValidationError::from_violations(violations) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

fn in_unit_interval(x: f64) -> bool {
    x > 0.0 && x < 1.0
}

fn check_rates(request: &DesignRequest, violations: &mut Vec<Violation>) {
    if !in_unit_interval(request.alpha) {
        violations.push(Violation::new(
            "alpha",
            format!("alpha must be between 0 and 1, got {}", request.alpha),
        ));
    }
    if !in_unit_interval(request.power) {
        violations.push(Violation::new(
            "power",
            format!("power must be between 0 and 1, got {}", request.power),
        ));
    }
}

fn check_metric(request: &DesignRequest, violations: &mut Vec<Violation>) {
    match request.metric {
        MetricKind::Proportion => {
            if !in_unit_interval(request.baseline) {
                violations.push(Violation::new(
                    "baseline",
                    format!(
                        "for proportions, baseline must be between 0 and 1, got {}",
                        request.baseline
                    ),
                ));
            }
        }
        MetricKind::Mean => {
            if request.family == TestFamily::ChiSquare {
                violations.push(Violation::new(
                    "family",
                    "chi-square test is only valid for proportions, not means; use 'z' or 't' instead",
                ));
            }
            if !request.baseline.is_finite() {
                violations.push(Violation::new(
                    "baseline",
                    format!("baseline must be finite, got {}", request.baseline),
                ));
            }
            match request.std_dev {
                None => violations.push(Violation::new(
                    "std_dev",
                    "std_dev is required for the mean metric",
                )),
                Some(sd) if !(sd > 0.0 && sd.is_finite()) => violations.push(Violation::new(
                    "std_dev",
                    format!("std_dev must be positive, got {sd}"),
                )),
                Some(_) => {}
            }
        }
    }

    if let Some(sd) = request.std_dev_treatment {
        if request.metric == MetricKind::Mean && !(sd > 0.0 && sd.is_finite()) {
            violations.push(Violation::new(
                "std_dev_treatment",
                format!("std_dev_treatment must be positive, got {sd}"),
            ));
        }
    }
}

fn check_target(request: &DesignRequest, mode: SolveMode, violations: &mut Vec<Violation>) {
    match (mode, request.target) {
        (SolveMode::SampleSize, Target::Effect { value, kind }) => {
            if value == 0.0 || !value.is_finite() {
                violations.push(Violation::new(
                    "mde",
                    format!("mde cannot be zero or non-finite, got {value}"),
                ));
                return;
            }

            let delta = effect::absolute_delta(request.baseline, value, kind);
            if delta == 0.0 {
                violations.push(Violation::new(
                    "mde",
                    "mde cannot be zero: the resulting absolute effect is zero",
                ));
                return;
            }

            // Only meaningful once the baseline itself is sound.
            if request.metric == MetricKind::Proportion && in_unit_interval(request.baseline) {
                let target = effect::target_value(request.baseline, delta);
                if !in_unit_interval(target) {
                    violations.push(Violation::new(
                        "target",
                        format!(
                            "target rate {target:.4} is out of bounds (0, 1); check the mde value"
                        ),
                    ));
                }
            }
        }
        (SolveMode::SampleSize, Target::SampleSize { .. }) => violations.push(Violation::new(
            "target",
            "an effect (mde) is required to compute a sample size",
        )),
        (SolveMode::Mde, Target::SampleSize { per_group }) => {
            if per_group < 1 {
                violations.push(Violation::new(
                    "sample_size",
                    format!("sample_size must be at least 1, got {per_group}"),
                ));
            }
        }
        (SolveMode::Mde, Target::Effect { .. }) => violations.push(Violation::new(
            "target",
            "a sample size is required to compute the minimum detectable effect",
        )),
    }
}

fn check_allocation(request: &DesignRequest, mode: SolveMode, violations: &mut Vec<Violation>) {
    if request.n_controls < 1 {
        violations.push(Violation::new(
            "n_controls",
            format!("n_controls must be at least 1, got {}", request.n_controls),
        ));
    }
    if request.n_treatments < 1 {
        violations.push(Violation::new(
            "n_treatments",
            format!("n_treatments must be at least 1, got {}", request.n_treatments),
        ));
    }

    match &request.allocation {
        Allocation::Ratio(ratio) => {
            if !(*ratio > 0.0 && ratio.is_finite()) {
                violations.push(Violation::new(
                    "ratio",
                    format!("ratio must be positive, got {ratio}"),
                ));
            }
        }
        Allocation::Weights(weights) => {
            if mode == SolveMode::Mde {
                violations.push(Violation::new(
                    "weights",
                    "weights are not supported when solving for the detectable effect; use ratio",
                ));
            }
            let expected = request.n_controls.saturating_add(request.n_treatments);
            if weights.len() != expected {
                violations.push(Violation::new(
                    "weights",
                    format!(
                        "weights length ({}) must match n_controls + n_treatments ({})",
                        weights.len(),
                        expected
                    ),
                ));
            }
            if weights.iter().any(|w| !(*w > 0.0 && w.is_finite())) {
                violations.push(Violation::new("weights", "all weights must be positive"));
            }
        }
    }
}

fn check_comparisons(request: &DesignRequest, violations: &mut Vec<Violation>) {
    if let Some(comparisons) = request.comparisons {
        if comparisons < 1 {
            violations.push(Violation::new(
                "comparisons",
                format!("n_comparisons must be at least 1, got {comparisons}"),
            ));
        }
    }
}
