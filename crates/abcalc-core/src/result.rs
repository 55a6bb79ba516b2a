//! Result types for sample-size and detectable-effect calculations.
//!
//! A forward calculation yields a [`SampleSizeResult`], an inverse one an
//! [`MdeResult`]; [`Outcome`] is the tagged union of the two.

use serde::{Deserialize, Serialize};

use crate::analysis::{BottleneckPair, PairEvaluation};
use crate::types::{CorrectionMethod, MetricKind, Sidedness, TestFamily};

// ============================================================================
// Outcome - The top-level result type
// ============================================================================

/// Result of either calculation mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Outcome {
    /// Sample sizes required for a given effect.
    SampleSize(SampleSizeResult),
    /// Detectable effect for a given sample size.
    Mde(MdeResult),
}

impl Outcome {
    /// Parameters the calculation actually used.
    pub fn parameters(&self) -> &EffectiveParameters {
        match self {
            Outcome::SampleSize(r) => &r.parameters,
            Outcome::Mde(r) => &r.parameters,
        }
    }
}

/// The parameters a calculation ran with, after defaults and correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectiveParameters {
    pub baseline: f64,
    pub power: f64,
    /// Significance level as requested.
    pub alpha_raw: f64,
    /// Significance level after multiple-comparison correction.
    pub alpha_corrected: f64,
    pub sidedness: Sidedness,
    pub metric: MetricKind,
    pub family: TestFamily,
    /// Treatment/control ratio; for weighted designs, the bottleneck pair's ratio.
    pub ratio: f64,
    pub n_controls: usize,
    pub n_treatments: usize,
    pub comparisons: usize,
    pub correction: CorrectionMethod,
    /// Control standard deviation (means only).
    pub std_dev_control: Option<f64>,
    /// Treatment standard deviation (means only).
    pub std_dev_treatment: Option<f64>,
    /// Raw traffic weights, when the design is weighted.
    pub weights: Option<Vec<f64>>,
}

// ============================================================================
// Forward mode
// ============================================================================

/// Sample sizes required to detect the requested effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSizeResult {
    /// Absolute effect the design is sized for.
    pub absolute_effect: f64,
    pub design: SizingDesign,
    pub parameters: EffectiveParameters,
}

impl SampleSizeResult {
    /// Size of a single control arm (standard) or the average arm (weighted).
    pub fn per_variant(&self) -> f64 {
        match &self.design {
            SizingDesign::Standard(s) => s.control as f64,
            SizingDesign::Weighted(w) => w.per_variant,
        }
    }

    /// Total population across all arms.
    pub fn total_sample_size(&self) -> f64 {
        match &self.design {
            SizingDesign::Standard(s) => s.total as f64,
            SizingDesign::Weighted(w) => w.total,
        }
    }

    /// Size of a control arm (average control arm for weighted designs).
    pub fn control_sample_size(&self) -> f64 {
        match &self.design {
            SizingDesign::Standard(s) => s.control as f64,
            SizingDesign::Weighted(w) => w.control,
        }
    }

    /// Size of a treatment arm (average treatment arm for weighted designs).
    pub fn treatment_sample_size(&self) -> f64 {
        match &self.design {
            SizingDesign::Standard(s) => s.treatment as f64,
            SizingDesign::Weighted(w) => w.treatment,
        }
    }

    /// Bottleneck pair, for weighted designs.
    pub fn bottleneck(&self) -> Option<&BottleneckPair> {
        match &self.design {
            SizingDesign::Standard(_) => None,
            SizingDesign::Weighted(w) => Some(&w.bottleneck),
        }
    }

    /// False if any t-distribution iteration stopped at the cap.
    pub fn converged(&self) -> bool {
        match &self.design {
            SizingDesign::Standard(s) => s.converged,
            SizingDesign::Weighted(w) => w.converged,
        }
    }
}

/// How sample sizes were derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingDesign {
    /// Uniform arms with a single treatment/control ratio.
    Standard(StandardSizing),
    /// Explicit traffic weights sized by the bottleneck pair.
    Weighted(WeightedSizing),
}

/// Sizes for a design where every arm pair shares one ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardSizing {
    /// Samples per control arm.
    pub control: u64,
    /// Samples per treatment arm.
    pub treatment: u64,
    /// Samples across all control arms.
    pub control_total: u64,
    /// Samples across all treatment arms.
    pub treatment_total: u64,
    /// Samples across all arms.
    pub total: u64,
    /// Fixed-point iterations used (0 for closed-form families).
    pub iterations: usize,
    pub converged: bool,
}

/// Sizes for a weighted design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedSizing {
    /// Total population required.
    pub total: f64,
    /// Average control arm: `total * sum(control shares) / n_controls`.
    pub control: f64,
    /// Average treatment arm: `total * sum(treatment shares) / n_treatments`.
    pub treatment: f64,
    /// `total / (n_controls + n_treatments)`.
    pub per_variant: f64,
    /// Per-arm allocation at the required total, controls first.
    pub arms: Vec<ArmAllocation>,
    pub bottleneck: BottleneckPair,
    /// Every evaluated control/treatment pair.
    pub pairs: Vec<PairEvaluation>,
    pub converged: bool,
}

/// One arm's share of a weighted design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmAllocation {
    /// e.g. `"C1"` or `"T3"`.
    pub label: String,
    /// Normalized weight share.
    pub weight: f64,
    /// `ceil(total * weight)`.
    pub sample_size: u64,
}

// ============================================================================
// Inverse mode
// ============================================================================

/// Smallest effect detectable with the given sample size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MdeResult {
    /// Detectable absolute delta.
    pub absolute_effect: f64,
    /// Detectable delta as a fraction of baseline (`None` for a zero baseline).
    pub relative_effect: Option<f64>,
    /// `baseline + absolute_effect`.
    pub target_value: f64,
    /// Samples per control arm.
    pub control_sample_size: u64,
    /// Samples per treatment arm: `ceil(control * ratio)`.
    pub treatment_sample_size: u64,
    /// Degrees of freedom for t-family designs.
    pub degrees_of_freedom: Option<f64>,
    pub converged: bool,
    pub parameters: EffectiveParameters,
}
