//! Continuous-mean sizing, including t-tests and Welch designs.

use abcalc::{compute_sample_size, DesignRequest, TestFamily};

fn per_variant(request: DesignRequest) -> f64 {
    compute_sample_size(&request).unwrap().per_variant()
}

#[test]
fn basic_mean_z_test() {
    // 2 * 20^2 * (1.96 + 0.84)^2 / 5^2 = 251.2 -> 252
    assert_eq!(per_variant(DesignRequest::mean(100.0, 20.0).absolute_effect(5.0)), 252.0);
}

#[test]
fn t_test_is_slightly_more_conservative() {
    let z = per_variant(DesignRequest::mean(100.0, 20.0).absolute_effect(5.0));
    let t = per_variant(
        DesignRequest::mean(100.0, 20.0)
            .absolute_effect(5.0)
            .family(TestFamily::StudentT),
    );
    assert!(t > z);
    assert!(t - z < 10.0);
}

#[test]
fn t_and_normal_converge_for_large_samples() {
    let gap = |delta: f64| {
        let z = per_variant(DesignRequest::mean(100.0, 20.0).absolute_effect(delta));
        let t = per_variant(
            DesignRequest::mean(100.0, 20.0)
                .absolute_effect(delta)
                .family(TestFamily::StudentT),
        );
        assert!(t >= z);
        (t - z) / z
    };
    assert!(gap(0.5) <= gap(5.0));
    assert!(gap(5.0) <= gap(25.0));
}

#[test]
fn welch_unequal_variance_needs_more_samples() {
    let equal = per_variant(
        DesignRequest::mean(100.0, 20.0)
            .absolute_effect(5.0)
            .family(TestFamily::StudentT),
    );
    let unequal = per_variant(
        DesignRequest::mean(100.0, 20.0)
            .absolute_effect(5.0)
            .std_dev_treatment(30.0)
            .family(TestFamily::StudentT),
    );
    assert!(unequal > equal);
}

#[test]
fn t_test_reports_convergence() {
    let result = compute_sample_size(
        &DesignRequest::mean(100.0, 20.0)
            .absolute_effect(5.0)
            .family(TestFamily::StudentT),
    )
    .unwrap();
    assert!(result.converged());
}

#[test]
fn relative_mean_effect() {
    // 5% of 100 is 5
    let relative = per_variant(DesignRequest::mean(100.0, 20.0).relative_effect(0.05));
    assert_eq!(relative, 252.0);
}

#[test]
fn std_devs_echoed_in_parameters() {
    let result = compute_sample_size(
        &DesignRequest::mean(100.0, 20.0)
            .absolute_effect(5.0)
            .std_dev_treatment(30.0),
    )
    .unwrap();
    assert_eq!(result.parameters.std_dev_control, Some(20.0));
    assert_eq!(result.parameters.std_dev_treatment, Some(30.0));
}
