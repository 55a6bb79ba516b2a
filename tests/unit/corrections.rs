//! Multiple-comparison corrections.

use abcalc::{compute_sample_size, CorrectionMethod, DesignRequest};

fn request() -> DesignRequest {
    DesignRequest::proportion(0.5).absolute_effect(0.05)
}

#[test]
fn bonferroni_divides_alpha() {
    let result = compute_sample_size(
        &request()
            .comparisons(2)
            .correction(CorrectionMethod::Bonferroni),
    )
    .unwrap();
    assert!((result.parameters.alpha_corrected - 0.025).abs() < 1e-15);
    assert_eq!(result.parameters.alpha_raw, 0.05);
}

#[test]
fn corrections_increase_sample_size() {
    let base = compute_sample_size(&request()).unwrap().per_variant();
    for method in [CorrectionMethod::Bonferroni, CorrectionMethod::Sidak] {
        let corrected = compute_sample_size(&request().comparisons(2).correction(method))
            .unwrap()
            .per_variant();
        assert!(corrected > base, "{method} should need more than {base}");
    }
}

#[test]
fn sidak_is_less_conservative_than_bonferroni() {
    let sidak = compute_sample_size(&request().comparisons(3).correction(CorrectionMethod::Sidak))
        .unwrap();
    let bonferroni = compute_sample_size(
        &request()
            .comparisons(3)
            .correction(CorrectionMethod::Bonferroni),
    )
    .unwrap();

    assert!(sidak.parameters.alpha_corrected >= bonferroni.parameters.alpha_corrected);
    assert!(sidak.per_variant() <= bonferroni.per_variant());
}

#[test]
fn default_comparisons_use_arm_product() {
    let result = compute_sample_size(
        &request()
            .arms(2, 3)
            .correction(CorrectionMethod::Bonferroni),
    )
    .unwrap();
    assert_eq!(result.parameters.comparisons, 6);
    assert!((result.parameters.alpha_corrected - 0.05 / 6.0).abs() < 1e-15);
}

#[test]
fn corrected_alpha_never_exceeds_raw() {
    for comparisons in 1..8 {
        for method in [
            CorrectionMethod::None,
            CorrectionMethod::Bonferroni,
            CorrectionMethod::Sidak,
        ] {
            let result =
                compute_sample_size(&request().comparisons(comparisons).correction(method)).unwrap();
            assert!(result.parameters.alpha_corrected <= result.parameters.alpha_raw + 1e-15);
        }
    }
}
