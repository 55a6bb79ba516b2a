//! Entry points: validate a request, then run the matching solver.

use crate::analysis::{
    absolute_delta, resolve_weighted, solve_mde, solve_pair, target_value, PairProblem,
};
use crate::error::ValidationError;
use crate::request::{Allocation, DesignRequest, Target};
use crate::result::{
    ArmAllocation, EffectiveParameters, MdeResult, Outcome, SampleSizeResult, SizingDesign,
    StandardSizing, WeightedSizing,
};
use crate::statistics::corrected_alpha;
use crate::types::MetricKind;
use crate::validation::{validate, SolveMode};

/// Run whichever calculation the request's target selects.
pub fn compute(request: &DesignRequest) -> Result<Outcome, ValidationError> {
    if request.is_forward() {
        compute_sample_size(request).map(Outcome::SampleSize)
    } else {
        compute_mde(request).map(Outcome::Mde)
    }
}

/// Sample sizes required to detect the request's effect.
///
/// # Errors
///
/// Returns every violated constraint if the request is invalid or does not
/// carry an effect target.
pub fn compute_sample_size(request: &DesignRequest) -> Result<SampleSizeResult, ValidationError> {
    validate(request, SolveMode::SampleSize)?;

    let Target::Effect { value, kind } = request.target else {
        return Err(ValidationError::single(
            "target",
            "an effect (mde) is required to compute a sample size",
        ));
    };
    let delta = absolute_delta(request.baseline, value, kind);
    let alpha = corrected_alpha(request.alpha, request.comparison_count(), request.correction);
    let problem = PairProblem::from_request(request, alpha);

    tracing::debug!(
        "sizing {} design: delta = {}, alpha = {} (corrected {})",
        request.metric,
        delta,
        request.alpha,
        alpha
    );

    let (design, ratio) = match &request.allocation {
        Allocation::Ratio(ratio) => {
            let standard = standard_sizing(request, &problem, delta, *ratio)?;
            (SizingDesign::Standard(standard), *ratio)
        }
        Allocation::Weights(weights) => {
            let weighted = weighted_sizing(request, &problem, delta, weights)?;
            let ratio = weighted.bottleneck.ratio;
            (SizingDesign::Weighted(weighted), ratio)
        }
    };

    Ok(SampleSizeResult {
        absolute_effect: delta,
        design,
        parameters: effective_parameters(request, alpha, ratio),
    })
}

fn standard_sizing(
    request: &DesignRequest,
    problem: &PairProblem,
    delta: f64,
    ratio: f64,
) -> Result<StandardSizing, ValidationError> {
    let sizing = solve_pair(problem, delta, ratio, &request.solver)?;

    let arm_total = |per_arm: u64, arms: usize| {
        u64::try_from(arms)
            .ok()
            .and_then(|arms| per_arm.checked_mul(arms))
    };
    let totals = arm_total(sizing.control, request.n_controls).and_then(|control_total| {
        let treatment_total = arm_total(sizing.treatment, request.n_treatments)?;
        let total = control_total.checked_add(treatment_total)?;
        Some((control_total, treatment_total, total))
    });
    let Some((control_total, treatment_total, total)) = totals else {
        return Err(ValidationError::single(
            "mde",
            format!(
                "mde {delta} is too small: {} control and {} treatment samples per arm \
                 across all arms overflow the total",
                sizing.control, sizing.treatment
            ),
        ));
    };

    Ok(StandardSizing {
        control: sizing.control,
        treatment: sizing.treatment,
        control_total,
        treatment_total,
        total,
        iterations: sizing.convergence.iterations,
        converged: sizing.convergence.converged,
    })
}

fn weighted_sizing(
    request: &DesignRequest,
    problem: &PairProblem,
    delta: f64,
    weights: &[f64],
) -> Result<WeightedSizing, ValidationError> {
    let resolution =
        resolve_weighted(problem, delta, weights, request.n_controls, &request.solver)?;

    let total = resolution.total_required;
    let n_controls = request.n_controls as f64;
    let n_treatments = request.n_treatments as f64;
    let control_share: f64 = resolution.control_weights.iter().sum();
    let treatment_share: f64 = resolution.treatment_weights.iter().sum();

    let controls = resolution
        .control_weights
        .iter()
        .enumerate()
        .map(|(i, &w)| (format!("C{}", i + 1), w));
    let treatments = resolution
        .treatment_weights
        .iter()
        .enumerate()
        .map(|(j, &w)| (format!("T{}", j + 1), w));
    let arms = controls
        .chain(treatments)
        .map(|(label, weight)| ArmAllocation {
            label,
            weight,
            sample_size: (total * weight).ceil() as u64,
        })
        .collect();

    Ok(WeightedSizing {
        total,
        control: total * control_share / n_controls,
        treatment: total * treatment_share / n_treatments,
        per_variant: total / (n_controls + n_treatments),
        arms,
        converged: resolution.converged(),
        bottleneck: resolution.bottleneck,
        pairs: resolution.pairs,
    })
}

/// Smallest effect detectable with the request's fixed sample size.
///
/// # Errors
///
/// Returns every violated constraint if the request is invalid, does not
/// carry a sample-size target, or uses explicit weights. For proportions,
/// also fails when the sample size is too small to detect any increase that
/// keeps the target rate below 1.
pub fn compute_mde(request: &DesignRequest) -> Result<MdeResult, ValidationError> {
    validate(request, SolveMode::Mde)?;

    let (Target::SampleSize { per_group }, Some(ratio)) = (request.target, request.ratio_value())
    else {
        return Err(ValidationError::single(
            "target",
            "a sample size and a ratio are required to compute the minimum detectable effect",
        ));
    };
    let alpha = corrected_alpha(request.alpha, request.comparison_count(), request.correction);
    let problem = PairProblem::from_request(request, alpha);

    let estimate = solve_mde(&problem, per_group, ratio);
    let delta = estimate.delta;
    let target = target_value(request.baseline, delta);
    if request.metric == MetricKind::Proportion && target >= 1.0 {
        return Err(ValidationError::single(
            "sample_size",
            format!(
                "sample_size {per_group} is too small: the detectable target rate {target:.4} \
                 is not below 1 for baseline {}",
                request.baseline
            ),
        ));
    }
    let relative_effect = (request.baseline != 0.0).then(|| delta / request.baseline);

    Ok(MdeResult {
        absolute_effect: delta,
        relative_effect,
        target_value: target,
        control_sample_size: per_group,
        treatment_sample_size: (per_group as f64 * ratio).ceil() as u64,
        degrees_of_freedom: estimate.degrees_of_freedom,
        converged: estimate.convergence.converged,
        parameters: effective_parameters(request, alpha, ratio),
    })
}

fn effective_parameters(request: &DesignRequest, alpha: f64, ratio: f64) -> EffectiveParameters {
    let is_mean = request.metric == MetricKind::Mean;
    let weights = match &request.allocation {
        Allocation::Weights(w) => Some(w.clone()),
        Allocation::Ratio(_) => None,
    };

    EffectiveParameters {
        baseline: request.baseline,
        power: request.power,
        alpha_raw: request.alpha,
        alpha_corrected: alpha,
        sidedness: request.sidedness,
        metric: request.metric,
        family: request.family,
        ratio,
        n_controls: request.n_controls,
        n_treatments: request.n_treatments,
        comparisons: request.comparison_count(),
        correction: request.correction,
        std_dev_control: request.std_dev.filter(|_| is_mean),
        std_dev_treatment: request.std_dev_treatment.filter(|_| is_mean),
        weights,
    }
}
