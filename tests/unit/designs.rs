//! Multi-arm and weighted designs.

use abcalc::{compute_sample_size, CorrectionMethod, DesignRequest, SizingDesign};

fn weighted_request() -> DesignRequest {
    DesignRequest::proportion(0.2)
        .absolute_effect(0.03)
        .arms(2, 3)
        .weights(vec![35.0, 15.0, 20.0, 18.0, 12.0])
        .correction(CorrectionMethod::Bonferroni)
}

#[test]
fn multiple_groups_total() {
    let result =
        compute_sample_size(&DesignRequest::proportion(0.5).absolute_effect(0.05).arms(2, 3))
            .unwrap();
    assert_eq!(result.total_sample_size(), result.per_variant() * 5.0);
}

#[test]
fn unequal_ratio_scales_treatment() {
    let result =
        compute_sample_size(&DesignRequest::proportion(0.5).absolute_effect(0.05).ratio(2.0))
            .unwrap();
    assert_eq!(result.treatment_sample_size(), result.control_sample_size() * 2.0);
    assert_eq!(result.parameters.ratio, 2.0);
}

#[test]
fn weighted_design_finds_bottleneck() {
    let result = compute_sample_size(&weighted_request()).unwrap();
    let bottleneck = result.bottleneck().expect("weighted designs report a bottleneck");
    assert_eq!(bottleneck.label, "C2 vs T3");
    assert!(result.total_sample_size() > 30_000.0);
    assert_eq!(result.parameters.ratio, bottleneck.ratio);
}

#[test]
fn bottleneck_dominates_every_pair() {
    let result = compute_sample_size(&weighted_request()).unwrap();
    let SizingDesign::Weighted(weighted) = &result.design else {
        panic!("expected a weighted design");
    };

    assert_eq!(weighted.pairs.len(), 6);
    for pair in &weighted.pairs {
        assert!(pair.total_required <= weighted.total);
        // At the bottleneck total every pair gets at least what it needs.
        let control_at_total = weighted.total * pair.control_weight;
        assert!(control_at_total + 1e-6 >= pair.sizing.control as f64);
    }
}

#[test]
fn weighted_control_size_respects_shares() {
    let result = compute_sample_size(&weighted_request()).unwrap();
    let total = result.total_sample_size();
    let average_control = (total * 0.35 + total * 0.15) / 2.0;
    let relative_error = (result.control_sample_size() - average_control).abs() / average_control;
    assert!(relative_error < 0.01);
}

#[test]
fn weighted_arm_allocations_cover_total() {
    let result = compute_sample_size(&weighted_request()).unwrap();
    let SizingDesign::Weighted(weighted) = &result.design else {
        panic!("expected a weighted design");
    };
    let labels: Vec<&str> = weighted.arms.iter().map(|a| a.label.as_str()).collect();
    assert_eq!(labels, ["C1", "C2", "T1", "T2", "T3"]);

    let allocated: u64 = weighted.arms.iter().map(|a| a.sample_size).sum();
    assert!(allocated as f64 + 1e-6 >= weighted.total);
}

#[test]
fn weighted_single_control_has_bottleneck_info() {
    let result = compute_sample_size(
        &DesignRequest::proportion(0.2)
            .absolute_effect(0.03)
            .arms(1, 2)
            .weights(vec![50.0, 25.0, 25.0]),
    )
    .unwrap();
    let bottleneck = result.bottleneck().unwrap();
    assert_eq!(bottleneck.ratio, 0.5);
    assert_eq!(bottleneck.label, "C1 vs T1");
}
