//! Translation of a requested effect into an absolute delta.

use crate::types::EffectKind;

/// Absolute delta for an effect of `value` on `baseline`.
///
/// Relative effects are lifts: a relative `0.2` on a baseline of `0.10`
/// is an absolute delta of `0.02`.
pub fn absolute_delta(baseline: f64, value: f64, kind: EffectKind) -> f64 {
    match kind {
        EffectKind::Absolute => value,
        EffectKind::Relative => baseline * value,
    }
}

/// Metric value under the alternative hypothesis.
pub fn target_value(baseline: f64, delta: f64) -> f64 {
    baseline + delta
}
