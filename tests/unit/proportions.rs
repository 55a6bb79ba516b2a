//! Proportion (conversion rate) sizing.

use abcalc::{compute_sample_size, DesignRequest, TestFamily};

fn per_variant(request: DesignRequest) -> f64 {
    compute_sample_size(&request).unwrap().per_variant()
}

// =============================================================================
// REFERENCE VALUES
// =============================================================================

#[test]
fn standard_ab_test_reference() {
    // 10% baseline, +2pp, power 0.8, alpha 0.05 two-sided
    let result = compute_sample_size(&DesignRequest::proportion(0.10).absolute_effect(0.02)).unwrap();
    assert_eq!(result.per_variant(), 3623.0);
    assert_eq!(result.control_sample_size(), 3623.0);
    assert_eq!(result.treatment_sample_size(), 3623.0);
    assert_eq!(result.total_sample_size(), 7246.0);
}

#[test]
fn relative_mde_matches_absolute() {
    // 20% lift on 10% is +2pp
    assert_eq!(per_variant(DesignRequest::proportion(0.10).relative_effect(0.20)), 3623.0);
}

#[test]
fn chi_square_matches_normal() {
    let z = per_variant(DesignRequest::proportion(0.10).absolute_effect(0.02));
    let chi2 = per_variant(
        DesignRequest::proportion(0.10)
            .absolute_effect(0.02)
            .family(TestFamily::ChiSquare),
    );
    assert_eq!(z, chi2);
}

// =============================================================================
// ORDERING PROPERTIES
// =============================================================================

#[test]
fn one_sided_needs_fewer_samples() {
    let two = per_variant(DesignRequest::proportion(0.5).absolute_effect(0.05));
    let one = per_variant(DesignRequest::proportion(0.5).absolute_effect(0.05).one_sided());
    assert!(one < two);
}

#[test]
fn higher_power_needs_more_samples() {
    let p80 = per_variant(DesignRequest::proportion(0.10).absolute_effect(0.02));
    let p90 = per_variant(DesignRequest::proportion(0.10).absolute_effect(0.02).power(0.9));
    assert!(p90 > p80);
}

#[test]
fn lower_alpha_needs_more_samples() {
    let a05 = per_variant(DesignRequest::proportion(0.10).absolute_effect(0.02));
    let a01 = per_variant(DesignRequest::proportion(0.10).absolute_effect(0.02).alpha(0.01));
    assert!(a01 > a05);
}

// =============================================================================
// EDGE CASES
// =============================================================================

#[test]
fn very_high_power() {
    assert!(per_variant(DesignRequest::proportion(0.1).absolute_effect(0.02).power(0.99)) > 0.0);
}

#[test]
fn very_small_mde_needs_many_samples() {
    assert!(per_variant(DesignRequest::proportion(0.1).absolute_effect(0.001)) > 100_000.0);
}

#[test]
fn extreme_ratio() {
    let result =
        compute_sample_size(&DesignRequest::proportion(0.1).absolute_effect(0.02).ratio(10.0))
            .unwrap();
    assert_eq!(result.treatment_sample_size(), result.control_sample_size() * 10.0);
}

#[test]
fn rare_event_baseline() {
    assert!(per_variant(DesignRequest::proportion(0.01).absolute_effect(0.005)) > 0.0);
}

#[test]
fn decrease_from_high_baseline() {
    assert!(per_variant(DesignRequest::proportion(0.95).absolute_effect(-0.05)) > 0.0);
}

#[test]
fn vanishing_mde_is_rejected_not_overflowed() {
    let err = compute_sample_size(&DesignRequest::proportion(0.10).absolute_effect(1e-10))
        .unwrap_err();
    assert!(err.mentions("mde"));
    assert!(err.to_string().contains("too small"));
}
