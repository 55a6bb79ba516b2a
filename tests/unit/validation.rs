//! Input validation through the public entry points.

use abcalc::{compute_mde, compute_sample_size, DesignRequest, TestFamily, ValidationError};

fn rejected(request: DesignRequest) -> ValidationError {
    compute_sample_size(&request).unwrap_err()
}

#[test]
fn invalid_alpha() {
    for alpha in [1.5, 0.0] {
        let err = rejected(DesignRequest::proportion(0.1).absolute_effect(0.02).alpha(alpha));
        assert!(err.mentions("alpha"));
        assert!(err.to_string().contains("alpha"));
    }
}

#[test]
fn invalid_power() {
    for power in [1.0, 0.0] {
        let err = rejected(DesignRequest::proportion(0.1).absolute_effect(0.02).power(power));
        assert!(err.mentions("power"));
    }
}

#[test]
fn invalid_baseline_for_proportion() {
    let err = rejected(DesignRequest::proportion(1.5).absolute_effect(0.02));
    assert!(err.to_string().contains("baseline"));
}

#[test]
fn target_out_of_bounds() {
    let err = rejected(DesignRequest::proportion(0.95).absolute_effect(0.10));
    assert!(err.to_string().contains("target rate"));
}

#[test]
fn missing_std_dev_for_means() {
    let mut request = DesignRequest::mean(100.0, 1.0).absolute_effect(5.0);
    request.std_dev = None;
    assert!(rejected(request).mentions("std_dev"));
}

#[test]
fn negative_std_dev() {
    assert!(rejected(DesignRequest::mean(100.0, -10.0).absolute_effect(5.0)).mentions("std_dev"));
}

#[test]
fn invalid_ratio() {
    assert!(rejected(DesignRequest::proportion(0.1).absolute_effect(0.02).ratio(0.0)).mentions("ratio"));
}

#[test]
fn weights_length_mismatch() {
    let err = rejected(
        DesignRequest::proportion(0.1)
            .absolute_effect(0.02)
            .arms(2, 2)
            .weights(vec![50.0, 50.0]),
    );
    assert!(err.to_string().contains("weights length"));
}

#[test]
fn zero_mde() {
    assert!(rejected(DesignRequest::proportion(0.1).absolute_effect(0.0)).mentions("mde"));
}

#[test]
fn chi_square_rejects_means() {
    let err = rejected(
        DesignRequest::mean(100.0, 20.0)
            .absolute_effect(5.0)
            .family(TestFamily::ChiSquare),
    );
    assert!(err.to_string().contains("chi-square"));
}

#[test]
fn all_violations_reported_together() {
    let err = rejected(
        DesignRequest::proportion(0.1)
            .absolute_effect(0.02)
            .alpha(2.0)
            .power(-1.0)
            .ratio(0.0)
            .arms(1, 2)
            .weights(vec![1.0]),
    );
    let fields: Vec<&str> = err.fields().collect();
    assert!(fields.contains(&"alpha"));
    assert!(fields.contains(&"power"));
    assert!(fields.contains(&"weights"));
    assert!(err.violations().len() >= 3);
}

#[test]
fn inverse_mode_requires_positive_sample_size() {
    let err = compute_mde(&DesignRequest::proportion(0.1).sample_size(0)).unwrap_err();
    assert!(err.mentions("sample_size"));
}

#[test]
fn forward_mode_requires_effect() {
    let err = compute_sample_size(&DesignRequest::proportion(0.1).sample_size(100)).unwrap_err();
    assert!(err.mentions("target"));
}
