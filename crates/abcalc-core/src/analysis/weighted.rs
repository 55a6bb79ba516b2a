//! Bottleneck search for designs with explicit traffic weights.
//!
//! With weights `w` (normalized to sum to one) split into control shares
//! `wc[i]` and treatment shares `wt[j]`, every control/treatment pair is a
//! comparison with its own ratio `k = wt[j] / wc[i]`. Solving that pair gives
//! the control count it needs; dividing by `wc[i]` gives the total population
//! at which control arm `i` reaches that count.
//!
//! The pair with the largest implied total is the bottleneck: at that total
//! every other pair receives at least the samples it needs.

use serde::{Deserialize, Serialize};

use super::pair::{solve_pair, PairProblem, PairSizing};
use crate::constants::MAX_SAMPLE_SIZE;
use crate::error::ValidationError;
use crate::request::SolverConfig;

/// One evaluated control/treatment comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PairEvaluation {
    /// Zero-based control arm index.
    pub control_index: usize,
    /// Zero-based treatment arm index.
    pub treatment_index: usize,
    /// Normalized control weight share.
    pub control_weight: f64,
    /// Normalized treatment weight share.
    pub treatment_weight: f64,
    /// Solved sizes at this pair's ratio.
    pub sizing: PairSizing,
    /// Total population needed for this pair: `control / control_weight`.
    pub total_required: f64,
}

impl PairEvaluation {
    /// Treatment/control ratio of this pair.
    pub fn ratio(&self) -> f64 {
        self.sizing.ratio
    }

    /// Human label, e.g. `"C1 vs T2"`.
    pub fn label(&self) -> String {
        format!("C{} vs T{}", self.control_index + 1, self.treatment_index + 1)
    }
}

/// The comparison that dictates the overall population size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BottleneckPair {
    /// e.g. `"C1 vs T2"`.
    pub label: String,
    pub control_index: usize,
    pub treatment_index: usize,
    /// Effective treatment/control ratio of the pair.
    pub ratio: f64,
    pub control_weight: f64,
    pub treatment_weight: f64,
    /// Control count the pair requires.
    pub control_required: u64,
}

impl From<&PairEvaluation> for BottleneckPair {
    fn from(eval: &PairEvaluation) -> Self {
        Self {
            label: eval.label(),
            control_index: eval.control_index,
            treatment_index: eval.treatment_index,
            ratio: eval.ratio(),
            control_weight: eval.control_weight,
            treatment_weight: eval.treatment_weight,
            control_required: eval.sizing.control,
        }
    }
}

/// Outcome of the bottleneck search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedResolution {
    /// Normalized control shares, in arm order.
    pub control_weights: Vec<f64>,
    /// Normalized treatment shares, in arm order.
    pub treatment_weights: Vec<f64>,
    /// Total population required: the bottleneck's `total_required`.
    pub total_required: f64,
    pub bottleneck: BottleneckPair,
    /// Every evaluated pair, controls outer, treatments inner.
    pub pairs: Vec<PairEvaluation>,
}

impl WeightedResolution {
    /// Whether every pair's t iteration converged.
    pub fn converged(&self) -> bool {
        self.pairs.iter().all(|p| p.sizing.convergence.converged)
    }
}

/// Find the bottleneck pair for `weights` (controls first).
///
/// Weights are assumed validated: length `n_controls + n_treatments`, all
/// strictly positive. Ties keep the first pair encountered, so the result
/// does not depend on float noise in later pairs.
///
/// # Errors
///
/// Returns a `weights` violation if either side has no arms, and an `mde`
/// violation if any pair or the implied total is too large to represent.
pub fn resolve_weighted(
    problem: &PairProblem,
    delta: f64,
    weights: &[f64],
    n_controls: usize,
    solver: &SolverConfig,
) -> Result<WeightedResolution, ValidationError> {
    let total_weight: f64 = weights.iter().sum();
    let normalized: Vec<f64> = weights.iter().map(|w| w / total_weight).collect();
    let (control_weights, treatment_weights) = normalized.split_at(n_controls.min(normalized.len()));

    let pairs: Vec<PairEvaluation> = control_weights
        .iter()
        .enumerate()
        .flat_map(|(i, &wc)| {
            treatment_weights
                .iter()
                .enumerate()
                .map(move |(j, &wt)| (i, wc, j, wt))
        })
        .map(|(i, wc, j, wt)| -> Result<PairEvaluation, ValidationError> {
            let sizing = solve_pair(problem, delta, wt / wc, solver)?;
            let eval = PairEvaluation {
                control_index: i,
                treatment_index: j,
                control_weight: wc,
                treatment_weight: wt,
                sizing,
                total_required: sizing.control as f64 / wc,
            };
            tracing::debug!(
                "pair {}: ratio {:.4}, control {}, total {:.1}",
                eval.label(),
                eval.ratio(),
                sizing.control,
                eval.total_required
            );
            Ok(eval)
        })
        .collect::<Result<_, _>>()?;

    let worst = pairs.iter().fold(None::<&PairEvaluation>, |best, eval| match best {
        Some(b) if eval.total_required <= b.total_required => Some(b),
        _ => Some(eval),
    });
    let Some(worst) = worst else {
        return Err(ValidationError::single(
            "weights",
            "weights must cover at least one control and one treatment",
        ));
    };
    if worst.total_required > MAX_SAMPLE_SIZE {
        return Err(ValidationError::single(
            "mde",
            format!(
                "mde {delta} is too small: the weighted design needs about {:.3e} samples in total",
                worst.total_required
            ),
        ));
    }

    tracing::debug!(
        "bottleneck {} requires a total of {:.1}",
        worst.label(),
        worst.total_required
    );

    Ok(WeightedResolution {
        total_required: worst.total_required,
        bottleneck: BottleneckPair::from(worst),
        control_weights: control_weights.to_vec(),
        treatment_weights: treatment_weights.to_vec(),
        pairs,
    })
}
