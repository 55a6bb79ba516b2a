//! Multiple-comparison adjustment of the significance level.
//!
//! ```text
//! bonferroni:  alpha / m
//! sidak:       1 - (1 - alpha)^(1/m)
//! ```
//!
//! Both keep the family-wise error rate at or below alpha. Sidak is exact
//! for independent tests and slightly less conservative than Bonferroni.

use crate::types::CorrectionMethod;

/// Alpha adjusted for `comparisons` simultaneous tests.
///
/// `comparisons` is validated upstream to be at least 1; 0 is treated as 1.
/// The result never exceeds `alpha`.
pub fn corrected_alpha(alpha: f64, comparisons: usize, method: CorrectionMethod) -> f64 {
    let m = comparisons.max(1) as f64;

    match method {
        CorrectionMethod::None => alpha,
        CorrectionMethod::Bonferroni => alpha / m,
        CorrectionMethod::Sidak => 1.0 - (1.0 - alpha).powf(1.0 / m),
    }
}
