//! Minimum Detectable Effect (MDE) for a fixed sample size.
//!
//! Inverts the single-pair relationship
//!
//! ```text
//! sqrt(n1) · delta = A · c_alpha + B · c_power
//! ```
//!
//! With `n1` fixed the degrees of freedom are fixed too, so the quantiles are
//! evaluated once for every family. For means `A` and `B` do not depend on
//! delta and the rearrangement is closed form. For proportions `B` depends on
//! `p2 = p1 + delta`, so delta is found by fixed-point iteration starting
//! from `B(0)`; the map is a strong contraction for any realistic `n1`.

use serde::{Deserialize, Serialize};

use super::pair::{Convergence, PairProblem};
use crate::constants::{MDE_MAX_ITERATIONS, MDE_TOLERANCE};
use crate::types::MetricKind;

/// Result from MDE estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MdeEstimate {
    /// Smallest detectable absolute increase over baseline.
    pub delta: f64,
    /// Degrees of freedom used for t quantiles (`None` for size-independent families).
    pub degrees_of_freedom: Option<f64>,
    pub convergence: Convergence,
}

/// Smallest detectable delta with `control_size` control samples at `ratio`.
///
/// Inputs are assumed validated: `control_size >= 1`, positive ratio.
pub fn solve_mde(problem: &PairProblem, control_size: u64, ratio: f64) -> MdeEstimate {
    let n1 = control_size as f64;
    let n2 = n1 * ratio;
    let root_n = n1.sqrt();

    let (crit_alpha, crit_power) = problem.quantiles(n1, n2);
    let degrees_of_freedom = problem
        .family
        .depends_on_sample_size()
        .then(|| problem.degrees_of_freedom(n1, n2));

    let delta_for = |delta: f64| {
        problem
            .variance_terms(delta, ratio)
            .scaled_effect(crit_alpha, crit_power)
            / root_n
    };

    let mut delta = delta_for(0.0);
    let mut convergence = Convergence::closed_form();

    if problem.metric == MetricKind::Proportion {
        convergence.converged = false;
        for iteration in 1..=MDE_MAX_ITERATIONS {
            let previous = delta;
            delta = delta_for(previous);
            convergence.iterations = iteration;

            if (delta - previous).abs() < MDE_TOLERANCE {
                convergence.converged = true;
                break;
            }
        }

        if !convergence.converged {
            tracing::warn!(
                "Detectable effect did not converge after {} iterations; using last estimate {:.6}",
                MDE_MAX_ITERATIONS,
                delta
            );
        }
    }

    tracing::debug!(
        "MDE at n1 = {}, ratio {:.3}: delta = {:.6}",
        control_size,
        ratio,
        delta
    );

    MdeEstimate {
        delta,
        degrees_of_freedom,
        convergence,
    }
}
