//! Design request: the full set of parameters for one calculation.
//!
//! A [`DesignRequest`] is built once per calculation and never mutated by the
//! engine. Builder methods only record values; all range checking happens in
//! [`validate`](crate::validation::validate) so that every problem can be
//! reported together.

use serde::{Deserialize, Serialize};

use crate::analysis::effect;
use crate::constants::{
    CONVERGENCE_THRESHOLD, DEFAULT_ALPHA, DEFAULT_POWER, DEFAULT_RATIO, INITIAL_SAMPLE_ESTIMATE,
    MAX_ITERATIONS,
};
use crate::types::{CorrectionMethod, EffectKind, MetricKind, Sidedness, TestFamily};

/// What the calculation solves for.
///
/// Supplying an effect selects forward mode (sample size); supplying a sample
/// size selects inverse mode (minimum detectable effect).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Target {
    /// Detect this effect; solve for sample size.
    Effect {
        /// Effect magnitude, interpreted according to `kind`.
        value: f64,
        /// Absolute delta or relative lift.
        #[serde(default)]
        kind: EffectKind,
    },
    /// Use this many samples per control group; solve for the detectable effect.
    SampleSize {
        /// Control-group sample size.
        per_group: u64,
    },
}

impl Default for Target {
    fn default() -> Self {
        Target::Effect {
            value: 0.0,
            kind: EffectKind::Absolute,
        }
    }
}

/// How traffic is split between arms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Allocation {
    /// Every treatment arm gets `ratio` times the samples of a control arm.
    Ratio(f64),
    /// Explicit traffic weights, controls first: `[C1, C2.., T1, T2..]`.
    ///
    /// Weights need not sum to one; they are normalized before use.
    Weights(Vec<f64>),
}

impl Default for Allocation {
    fn default() -> Self {
        Allocation::Ratio(DEFAULT_RATIO)
    }
}

/// Tuning for the t-distribution fixed-point iteration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Sample-size estimate the iteration starts from.
    pub initial_estimate: f64,
    /// Stop once successive estimates differ by less than this many samples.
    pub convergence_threshold: f64,
    /// Maximum number of refinements after the initial evaluation.
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_estimate: INITIAL_SAMPLE_ESTIMATE,
            convergence_threshold: CONVERGENCE_THRESHOLD,
            max_iterations: MAX_ITERATIONS,
        }
    }
}

/// Parameters of an experiment design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignRequest {
    // =========================================================================
    // Metric
    // =========================================================================
    /// Current (control) value of the metric.
    ///
    /// A rate in (0, 1) for proportions, any value for means.
    pub baseline: f64,

    /// Proportion or mean.
    pub metric: MetricKind,

    /// Control-group standard deviation. Required for means.
    pub std_dev: Option<f64>,

    /// Treatment-group standard deviation. Enables a Welch design when set.
    pub std_dev_treatment: Option<f64>,

    // =========================================================================
    // Target and error rates
    // =========================================================================
    /// Effect to detect, or fixed sample size to evaluate.
    pub target: Target,

    /// Statistical power, in (0, 1). Default: 0.8.
    pub power: f64,

    /// Significance level before correction, in (0, 1). Default: 0.05.
    pub alpha: f64,

    /// Default: two-sided.
    pub sidedness: Sidedness,

    /// Default: normal (z-test).
    pub family: TestFamily,

    // =========================================================================
    // Arms
    // =========================================================================
    /// Ratio or explicit weights. Default: ratio 1.0.
    pub allocation: Allocation,

    /// Number of control arms. Default: 1.
    pub n_controls: usize,

    /// Number of treatment arms. Default: 1.
    pub n_treatments: usize,

    // =========================================================================
    // Multiple comparisons
    // =========================================================================
    /// Number of hypotheses tested. Defaults to `n_controls * n_treatments`.
    pub comparisons: Option<usize>,

    /// Default: no correction.
    pub correction: CorrectionMethod,

    /// Fixed-point solver tuning.
    pub solver: SolverConfig,
}

impl Default for DesignRequest {
    fn default() -> Self {
        Self {
            baseline: 0.0,
            metric: MetricKind::Proportion,
            std_dev: None,
            std_dev_treatment: None,
            target: Target::default(),
            power: DEFAULT_POWER,
            alpha: DEFAULT_ALPHA,
            sidedness: Sidedness::TwoSided,
            family: TestFamily::Normal,
            allocation: Allocation::default(),
            n_controls: 1,
            n_treatments: 1,
            comparisons: None,
            correction: CorrectionMethod::None,
            solver: SolverConfig::default(),
        }
    }
}

impl DesignRequest {
    /// A proportion design around `baseline` with default settings.
    pub fn proportion(baseline: f64) -> Self {
        Self {
            baseline,
            metric: MetricKind::Proportion,
            ..Default::default()
        }
    }

    /// A mean design around `baseline` with control standard deviation `std_dev`.
    pub fn mean(baseline: f64, std_dev: f64) -> Self {
        Self {
            baseline,
            metric: MetricKind::Mean,
            std_dev: Some(std_dev),
            ..Default::default()
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Detect an absolute change of `delta`.
    pub fn absolute_effect(mut self, delta: f64) -> Self {
        self.target = Target::Effect {
            value: delta,
            kind: EffectKind::Absolute,
        };
        self
    }

    /// Detect a relative lift of `lift` (0.2 = +20%).
    pub fn relative_effect(mut self, lift: f64) -> Self {
        self.target = Target::Effect {
            value: lift,
            kind: EffectKind::Relative,
        };
        self
    }

    /// Detect an effect of `value` interpreted as `kind`.
    pub fn effect(mut self, value: f64, kind: EffectKind) -> Self {
        self.target = Target::Effect { value, kind };
        self
    }

    /// Solve for the detectable effect at `per_group` control samples.
    pub fn sample_size(mut self, per_group: u64) -> Self {
        self.target = Target::SampleSize { per_group };
        self
    }

    pub fn power(mut self, power: f64) -> Self {
        self.power = power;
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn sidedness(mut self, sidedness: Sidedness) -> Self {
        self.sidedness = sidedness;
        self
    }

    pub fn one_sided(self) -> Self {
        self.sidedness(Sidedness::OneSided)
    }

    pub fn family(mut self, family: TestFamily) -> Self {
        self.family = family;
        self
    }

    pub fn std_dev(mut self, std_dev: f64) -> Self {
        self.std_dev = Some(std_dev);
        self
    }

    /// Use a distinct treatment standard deviation (Welch design).
    pub fn std_dev_treatment(mut self, std_dev: f64) -> Self {
        self.std_dev_treatment = Some(std_dev);
        self
    }

    /// Treatment/control size ratio. Replaces any explicit weights.
    pub fn ratio(mut self, ratio: f64) -> Self {
        self.allocation = Allocation::Ratio(ratio);
        self
    }

    /// Explicit traffic weights, controls first. Replaces any ratio.
    pub fn weights(mut self, weights: impl Into<Vec<f64>>) -> Self {
        self.allocation = Allocation::Weights(weights.into());
        self
    }

    pub fn arms(mut self, n_controls: usize, n_treatments: usize) -> Self {
        self.n_controls = n_controls;
        self.n_treatments = n_treatments;
        self
    }

    pub fn comparisons(mut self, comparisons: usize) -> Self {
        self.comparisons = Some(comparisons);
        self
    }

    pub fn correction(mut self, method: CorrectionMethod) -> Self {
        self.correction = method;
        self
    }

    pub fn solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    // =========================================================================
    // Resolution methods
    // =========================================================================

    /// Number of comparisons used for alpha correction.
    pub fn comparison_count(&self) -> usize {
        self.comparisons
            .unwrap_or(self.n_controls.saturating_mul(self.n_treatments))
    }

    /// Absolute delta implied by the target, if this is a forward request.
    pub fn delta(&self) -> Option<f64> {
        match self.target {
            Target::Effect { value, kind } => Some(effect::absolute_delta(self.baseline, value, kind)),
            Target::SampleSize { .. } => None,
        }
    }

    /// Allocation ratio, or `None` for weighted designs.
    pub fn ratio_value(&self) -> Option<f64> {
        match self.allocation {
            Allocation::Ratio(ratio) => Some(ratio),
            Allocation::Weights(_) => None,
        }
    }

    /// Whether this request solves for sample size (forward mode).
    pub fn is_forward(&self) -> bool {
        matches!(self.target, Target::Effect { .. })
    }
}
