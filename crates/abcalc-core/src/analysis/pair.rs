//! Sample size for a single control/treatment comparison.
//!
//! The required control-group size for detecting `delta` with treatment
//! allocation ratio `k = n2 / n1` is
//!
//! ```text
//! n1 = (A · c_alpha + B · c_power)² / delta²
//! ```
//!
//! where for proportions (p2 = p1 + delta)
//!
//! ```text
//! A = sqrt(p1(1 - p1)(1 + 1/k))          pooled variance under H0
//! B = sqrt(p1(1 - p1) + p2(1 - p2)/k)    unpooled variance under H1
//! ```
//!
//! and for means `A = B = sqrt(σ1² + σ2²/k)`, with σ2 = σ1 unless a distinct
//! treatment deviation is given (Welch design).
//!
//! For the normal and chi-square families the quantiles are fixed and the
//! formula is evaluated once. For Student's t the quantiles depend on the
//! degrees of freedom, which depend on `n1`; the estimate is refined by
//! fixed-point iteration until successive values agree to within the
//! solver's convergence threshold or the iteration cap is reached.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_SAMPLE_SIZE;
use crate::error::ValidationError;
use crate::request::{DesignRequest, SolverConfig};
use crate::statistics::{critical_value, normal_quantile, student_t_quantile};
use crate::types::{MetricKind, Sidedness, TestFamily};

/// Below this combined variance the Welch formula is numerically meaningless.
const MIN_WELCH_VARIANCE: f64 = 1e-12;

/// Inputs shared by every comparison in a design.
///
/// Everything except the effect and the allocation ratio, which vary between
/// the forward, weighted and inverse solvers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairProblem {
    /// Control value of the metric.
    pub baseline: f64,
    /// Target power.
    pub power: f64,
    /// Significance level after multiple-comparison correction.
    pub alpha: f64,
    pub sidedness: Sidedness,
    pub metric: MetricKind,
    pub family: TestFamily,
    /// Control standard deviation (unused for proportions).
    pub std_dev: f64,
    /// Treatment standard deviation (unused for proportions).
    pub std_dev_treatment: f64,
}

impl PairProblem {
    /// Problem for `request` at the already-corrected significance level `alpha`.
    pub fn from_request(request: &DesignRequest, alpha: f64) -> Self {
        let std_dev = request.std_dev.unwrap_or(0.0);
        Self {
            baseline: request.baseline,
            power: request.power,
            alpha,
            sidedness: request.sidedness,
            metric: request.metric,
            family: request.family,
            std_dev,
            std_dev_treatment: request.std_dev_treatment.unwrap_or(std_dev),
        }
    }

    /// Degrees of freedom for group sizes `n1` and `n2`.
    ///
    /// Welch–Satterthwaite for means, pooled `n1 + n2 - 2` for proportions.
    pub fn degrees_of_freedom(&self, n1: f64, n2: f64) -> f64 {
        let pooled = (n1 + n2 - 2.0).max(1.0);

        match self.metric {
            MetricKind::Proportion => pooled,
            MetricKind::Mean => {
                if n1 <= 1.0 || n2 <= 1.0 {
                    return pooled;
                }
                let v1 = self.std_dev * self.std_dev / n1;
                let v2 = self.std_dev_treatment * self.std_dev_treatment / n2;
                if v1 + v2 < MIN_WELCH_VARIANCE {
                    return pooled;
                }
                (v1 + v2).powi(2) / (v1 * v1 / (n1 - 1.0) + v2 * v2 / (n2 - 1.0))
            }
        }
    }

    /// Critical value for alpha and the power quantile at group sizes `n1`, `n2`.
    ///
    /// Group sizes are ignored unless the family depends on degrees of freedom.
    pub fn quantiles(&self, n1: f64, n2: f64) -> (f64, f64) {
        if !self.family.depends_on_sample_size() {
            return (
                critical_value(self.alpha, self.sidedness, self.family, None),
                normal_quantile(self.power),
            );
        }

        let df = self.degrees_of_freedom(n1, n2);
        (
            critical_value(self.alpha, self.sidedness, self.family, Some(df)),
            student_t_quantile(self.power, df),
        )
    }

    /// Standard-deviation terms under the null and alternative hypotheses.
    pub(crate) fn variance_terms(&self, delta: f64, ratio: f64) -> VarianceTerms {
        match self.metric {
            MetricKind::Proportion => {
                let p1 = self.baseline;
                // Clamped so the inverse solver can probe deltas past the unit interval.
                let p2 = (p1 + delta).clamp(0.0, 1.0);
                let control = p1 * (1.0 - p1);
                VarianceTerms {
                    null: (control * (1.0 + 1.0 / ratio)).sqrt(),
                    alternative: (control + p2 * (1.0 - p2) / ratio).sqrt(),
                }
            }
            MetricKind::Mean => {
                let spread = (self.std_dev.powi(2) + self.std_dev_treatment.powi(2) / ratio).sqrt();
                VarianceTerms {
                    null: spread,
                    alternative: spread,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct VarianceTerms {
    pub null: f64,
    pub alternative: f64,
}

impl VarianceTerms {
    /// `A · c_alpha + B · c_power`, i.e. `sqrt(n1) · delta` at the solution.
    pub fn scaled_effect(&self, crit_alpha: f64, crit_power: f64) -> f64 {
        self.null * crit_alpha + self.alternative * crit_power
    }
}

/// Whether the t-distribution iteration settled before the cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Convergence {
    /// Refinements performed after the initial evaluation.
    pub iterations: usize,
    /// False only when the cap was hit with the estimate still moving.
    pub converged: bool,
}

impl Convergence {
    /// Closed-form solution; no iteration needed.
    pub fn closed_form() -> Self {
        Self {
            iterations: 0,
            converged: true,
        }
    }
}

/// Solved sample sizes for one control/treatment comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairSizing {
    /// Required control-group size.
    pub control: u64,
    /// Treatment-group size: `ceil(control * ratio)`.
    pub treatment: u64,
    /// Treatment/control ratio used.
    pub ratio: f64,
    pub convergence: Convergence,
}

/// Required control-group size for detecting `delta` at allocation `ratio`.
///
/// Inputs are assumed validated: nonzero delta, positive ratio, alpha and
/// power in (0, 1). If the t iteration hits the cap without converging, the
/// last estimate is returned and flagged in [`PairSizing::convergence`].
///
/// # Errors
///
/// Returns an `mde` violation when the effect is so small that either group
/// would need more than [`MAX_SAMPLE_SIZE`] samples.
pub fn solve_pair(
    problem: &PairProblem,
    delta: f64,
    ratio: f64,
    solver: &SolverConfig,
) -> Result<PairSizing, ValidationError> {
    let terms = problem.variance_terms(delta, ratio);
    let required = |n1: f64| {
        let (crit_alpha, crit_power) = problem.quantiles(n1, ratio * n1);
        terms.scaled_effect(crit_alpha, crit_power).powi(2) / (delta * delta)
    };

    let mut n1 = required(solver.initial_estimate);
    let mut convergence = Convergence::closed_form();

    if problem.family.depends_on_sample_size() {
        convergence.converged = false;
        for iteration in 1..=solver.max_iterations {
            let previous = n1;
            n1 = required(previous);
            convergence.iterations = iteration;
            tracing::debug!(iteration, previous, n1, "t-distribution fixed-point step");

            if (n1 - previous).abs() < solver.convergence_threshold {
                convergence.converged = true;
                break;
            }
        }

        if !convergence.converged {
            tracing::warn!(
                "Sample size did not converge after {} iterations; using last estimate {:.2}",
                solver.max_iterations,
                n1
            );
        }
    }

    let control = n1.ceil();
    let treatment = (control * ratio).ceil();
    if !(control <= MAX_SAMPLE_SIZE && treatment <= MAX_SAMPLE_SIZE) {
        return Err(ValidationError::single(
            "mde",
            format!(
                "mde {delta} is too small: detecting it needs about {control:.3e} control and \
                 {treatment:.3e} treatment samples"
            ),
        ));
    }

    Ok(PairSizing {
        control: control as u64,
        treatment: treatment as u64,
        ratio,
        convergence,
    })
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn problem(baseline: f64, power: f64, alpha: f64) -> PairProblem {
        PairProblem {
            baseline,
            power,
            alpha,
            sidedness: Sidedness::TwoSided,
            metric: MetricKind::Proportion,
            family: TestFamily::Normal,
            std_dev: 0.0,
            std_dev_treatment: 0.0,
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Higher power never needs fewer samples
        #[test]
        fn prop_monotone_in_power(
            baseline in 0.05f64..0.6,
            low in 0.5f64..0.95,
            bump in 0.0f64..0.04,
        ) {
            let solver = SolverConfig::default();
            let weak = solve_pair(&problem(baseline, low, 0.05), 0.03, 1.0, &solver).unwrap();
            let strong = solve_pair(&problem(baseline, low + bump, 0.05), 0.03, 1.0, &solver).unwrap();
            prop_assert!(strong.control >= weak.control);
        }

        /// Stricter alpha never needs fewer samples
        #[test]
        fn prop_monotone_in_alpha(
            baseline in 0.05f64..0.6,
            alpha in 0.001f64..0.2,
            shrink in 0.1f64..1.0,
        ) {
            let solver = SolverConfig::default();
            let loose = solve_pair(&problem(baseline, 0.8, alpha), 0.03, 1.0, &solver).unwrap();
            let strict = solve_pair(&problem(baseline, 0.8, alpha * shrink), 0.03, 1.0, &solver).unwrap();
            prop_assert!(strict.control >= loose.control);
        }

        /// One-sided requirement never exceeds two-sided
        #[test]
        fn prop_one_sided_not_larger(baseline in 0.05f64..0.6, delta in 0.01f64..0.2) {
            let solver = SolverConfig::default();
            let two = problem(baseline, 0.8, 0.05);
            let one = PairProblem { sidedness: Sidedness::OneSided, ..two };
            prop_assert!(
                solve_pair(&one, delta, 1.0, &solver).unwrap().control
                    <= solve_pair(&two, delta, 1.0, &solver).unwrap().control
            );
        }
    }
}
