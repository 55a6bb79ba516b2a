//! Terminal output formatting with colors.
//!
//! Colors come from the `colored` crate, which respects `NO_COLOR` and TTY
//! detection on its own.

use colored::Colorize;

use crate::{
    EffectiveParameters, MdeResult, MetricKind, Outcome, SampleSizeResult, SizingDesign,
    ValidationError,
};

/// Format an Outcome for human-readable terminal output.
pub fn format_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::SampleSize(result) => format_sample_size(result),
        Outcome::Mde(result) => format_mde(result),
    }
}

/// Format a forward (sample size) result.
pub fn format_sample_size(result: &SampleSizeResult) -> String {
    let mut out = String::new();
    let sep = "\u{2500}".repeat(62);
    let params = &result.parameters;

    out.push_str(&format!("{}\n", "A/B test sample size".bold()));
    out.push_str(&sep);
    out.push_str("\n\n");

    match &result.design {
        SizingDesign::Standard(s) => {
            out.push_str(&format!(
                "  {} {}\n",
                "Sample size per variant:".bold(),
                group_digits(s.control).green().bold()
            ));
            if params.ratio != 1.0 {
                out.push_str(&format!("    Control:    {} per arm\n", group_digits(s.control)));
                out.push_str(&format!(
                    "    Treatment:  {} per arm\n",
                    group_digits(s.treatment)
                ));
            }
            out.push_str(&format!(
                "    Controls:   {} x {} = {}\n",
                params.n_controls,
                group_digits(s.control),
                group_digits(s.control_total)
            ));
            out.push_str(&format!(
                "    Treatments: {} x {} = {}\n",
                params.n_treatments,
                group_digits(s.treatment),
                group_digits(s.treatment_total)
            ));
            out.push_str(&format!("    Total:      {}\n", group_digits(s.total).bold()));
        }
        SizingDesign::Weighted(w) => {
            out.push_str(&format!(
                "  {} {}\n",
                "Total sample size:".bold(),
                group_digits(w.total.ceil() as u64).green().bold()
            ));
            for arm in &w.arms {
                out.push_str(&format!(
                    "    {:<4} {:>6.1}%  {}\n",
                    arm.label,
                    arm.weight * 100.0,
                    group_digits(arm.sample_size)
                ));
            }
            out.push_str(&format!(
                "\n  Bottleneck: {} (ratio {:.3}, shares {:.1}% / {:.1}%)\n",
                w.bottleneck.label.yellow(),
                w.bottleneck.ratio,
                w.bottleneck.control_weight * 100.0,
                w.bottleneck.treatment_weight * 100.0
            ));
        }
    }

    out.push_str(&format!(
        "\n  Detects:    {} absolute change from {}\n",
        format_value(result.absolute_effect, params.metric),
        format_value(params.baseline, params.metric)
    ));
    format_parameters(&mut out, params);

    if !result.converged() {
        out.push_str(&format!(
            "\n  {} t-distribution iteration hit its cap; sizes are a best estimate\n",
            "\u{26A0}".yellow()
        ));
    }

    out.push_str(&sep);
    out.push('\n');
    out
}

/// Format an inverse (minimum detectable effect) result.
pub fn format_mde(result: &MdeResult) -> String {
    let mut out = String::new();
    let sep = "\u{2500}".repeat(62);
    let params = &result.parameters;

    out.push_str(&format!("{}\n", "A/B test minimum detectable effect".bold()));
    out.push_str(&sep);
    out.push_str("\n\n");

    out.push_str(&format!(
        "  {} {}\n",
        "Detectable change:".bold(),
        format_value(result.absolute_effect, params.metric).green().bold()
    ));
    if let Some(relative) = result.relative_effect {
        out.push_str(&format!("    Relative:   {:.2}%\n", relative * 100.0));
    }
    out.push_str(&format!(
        "    Target:     {} (baseline {})\n",
        format_value(result.target_value, params.metric),
        format_value(params.baseline, params.metric)
    ));
    out.push_str(&format!(
        "    Samples:    {} control / {} treatment\n",
        group_digits(result.control_sample_size),
        group_digits(result.treatment_sample_size)
    ));
    if let Some(df) = result.degrees_of_freedom {
        out.push_str(&format!("    df:         {:.1}\n", df));
    }

    out.push('\n');
    format_parameters(&mut out, params);

    if !result.converged {
        out.push_str(&format!(
            "\n  {} detectable effect iteration hit its cap; value is a best estimate\n",
            "\u{26A0}".yellow()
        ));
    }

    out.push_str(&sep);
    out.push('\n');
    out
}

/// Format a validation failure, one violation per line.
pub fn format_validation_error(err: &ValidationError) -> String {
    let mut out = format!("{}\n", "Invalid design:".red().bold());
    for violation in err.violations() {
        out.push_str(&format!("  \u{2022} {}\n", violation.message));
    }
    out
}

fn format_parameters(out: &mut String, params: &EffectiveParameters) {
    out.push_str(&format!("  {}\n", "Parameters".dimmed()));
    out.push_str(&format!(
        "    Metric:     {} ({} test, {})\n",
        params.metric, params.family, params.sidedness
    ));
    out.push_str(&format!("    Power:      {:.0}%\n", params.power * 100.0));

    if params.correction.is_applied() {
        out.push_str(&format!(
            "    Alpha:      {} -> {:.6} ({}, {} comparisons)\n",
            params.alpha_raw, params.alpha_corrected, params.correction, params.comparisons
        ));
    } else {
        out.push_str(&format!("    Alpha:      {}\n", params.alpha_raw));
    }

    out.push_str(&format!("    Ratio:      {:.3}\n", params.ratio));
    if let Some(sd) = params.std_dev_control {
        match params.std_dev_treatment {
            Some(sd2) => out.push_str(&format!("    Std dev:    {sd} control / {sd2} treatment\n")),
            None => out.push_str(&format!("    Std dev:    {sd}\n")),
        }
    }
}

/// Proportions as percentages, means as plain numbers.
fn format_value(value: f64, metric: MetricKind) -> String {
    match metric {
        MetricKind::Proportion => format!("{:.2}%", value * 100.0),
        MetricKind::Mean => format!("{value:.4}"),
    }
}

/// `1234567` -> `"1,234,567"`.
fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
