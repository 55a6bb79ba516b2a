//! Critical values for the supported test families.
//!
//! ```text
//! tail alpha = alpha / 2  (two-sided)
//!            = alpha      (one-sided)
//!
//! normal, chi2:  Φ⁻¹(1 - tail alpha)
//! t:             T⁻¹_df(1 - tail alpha),  df clamped to >= 1
//! ```
//!
//! Chi-square tests of two proportions are sized with the equivalent z
//! formula, so they share the normal quantile.

use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

use crate::types::{Sidedness, TestFamily};

/// Quantile of the test statistic's null distribution at `1 - tail alpha`.
///
/// `df` is only consulted for [`TestFamily::StudentT`]; a missing or
/// sub-unit value is clamped to 1. Callers pass a validated alpha in (0, 1).
pub fn critical_value(alpha: f64, sidedness: Sidedness, family: TestFamily, df: Option<f64>) -> f64 {
    let p = 1.0 - sidedness.tail_alpha(alpha);

    match family {
        TestFamily::Normal | TestFamily::ChiSquare => normal_quantile(p),
        TestFamily::StudentT => student_t_quantile(p, df.unwrap_or(1.0)),
    }
}

/// Inverse CDF of the standard normal.
pub fn normal_quantile(p: f64) -> f64 {
    Normal::standard().inverse_cdf(p)
}

/// Inverse CDF of Student's t with `df` degrees of freedom.
///
/// `df` below 1 (or NaN) is clamped to 1. Infinite `df` is the normal limit.
pub fn student_t_quantile(p: f64, df: f64) -> f64 {
    let df = df.max(1.0);
    if df.is_infinite() {
        return normal_quantile(p);
    }

    match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => dist.inverse_cdf(p),
        Err(err) => {
            tracing::warn!("Student's t rejected df = {}: {}; using normal quantile", df, err);
            normal_quantile(p)
        }
    }
}
