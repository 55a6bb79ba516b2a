//! Minimum detectable effect for a fixed sample size.

use abcalc::{compute_mde, compute_sample_size, DesignRequest, TestFamily};

fn assert_round_trip(forward: DesignRequest) {
    let sized = compute_sample_size(&forward).unwrap();
    let control = sized.control_sample_size() as u64;
    let mde = compute_mde(&forward.sample_size(control)).unwrap();

    let delta = sized.absolute_effect;
    let relative_error = (mde.absolute_effect - delta).abs() / delta.abs();
    assert!(
        relative_error < 0.01,
        "delta {delta} recovered as {}",
        mde.absolute_effect
    );
}

#[test]
fn proportion_round_trip() {
    assert_round_trip(DesignRequest::proportion(0.10).absolute_effect(0.02));
}

#[test]
fn mean_round_trip() {
    assert_round_trip(DesignRequest::mean(100.0, 20.0).absolute_effect(5.0));
}

#[test]
fn t_test_round_trip() {
    assert_round_trip(
        DesignRequest::mean(100.0, 20.0)
            .absolute_effect(5.0)
            .std_dev_treatment(25.0)
            .family(TestFamily::StudentT),
    );
}

#[test]
fn unequal_ratio_round_trip() {
    assert_round_trip(DesignRequest::proportion(0.3).absolute_effect(0.04).ratio(2.0));
}

#[test]
fn mde_reports_relative_and_target() {
    let result = compute_mde(&DesignRequest::proportion(0.10).sample_size(5000)).unwrap();
    let relative = result.relative_effect.unwrap();
    assert!((relative - result.absolute_effect / 0.10).abs() < 1e-12);
    assert!((result.target_value - (0.10 + result.absolute_effect)).abs() < 1e-12);
    assert_eq!(result.control_sample_size, 5000);
    assert_eq!(result.treatment_sample_size, 5000);
    assert!(result.converged);
}

#[test]
fn mde_shrinks_with_more_samples() {
    let small = compute_mde(&DesignRequest::proportion(0.10).sample_size(1_000)).unwrap();
    let large = compute_mde(&DesignRequest::proportion(0.10).sample_size(100_000)).unwrap();
    assert!(large.absolute_effect < small.absolute_effect);
}

#[test]
fn mde_with_single_sample_is_finite() {
    let result = compute_mde(&DesignRequest::mean(10.0, 2.0).sample_size(1)).unwrap();
    assert!(result.absolute_effect.is_finite());
    assert!(result.absolute_effect > 0.0);
}

#[test]
fn mde_past_unit_rate_is_rejected() {
    let err = compute_mde(&DesignRequest::proportion(0.9).sample_size(10)).unwrap_err();
    assert!(err.mentions("sample_size"));
}

#[test]
fn mde_near_unit_rate_stays_in_bounds() {
    let result = compute_mde(&DesignRequest::proportion(0.9).sample_size(2_000)).unwrap();
    assert!(result.target_value > 0.9 && result.target_value < 1.0);
    assert!(result.converged);
}
