//! CLI for sizing A/B experiments.
//!
//! # Usage
//!
//! ```bash
//! # Simple A/B test: 10% baseline, detect +2pp
//! abcalc --baseline 0.10 --mde 0.02
//!
//! # Mean metric with Welch t-test
//! abcalc --metric mean --baseline 100 --mde 5 --std-dev 20 --std-dev-2 30 --test t
//!
//! # Three treatments with Bonferroni correction
//! abcalc --baseline 0.10 --mde 0.02 --treatments 3 --correction bonferroni
//!
//! # Uneven traffic across two controls and three treatments
//! abcalc --baseline 0.2 --mde 0.03 --controls 2 --treatments 3 --weights 35,15,20,18,12
//!
//! # What can 5,000 users per group detect?
//! abcalc --baseline 0.10 --sample-size 5000
//!
//! # Read the whole design from a JSON file and print JSON
//! abcalc --request design.json --json
//! ```

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use abcalc::{
    compute, output, CorrectionMethod, DesignRequest, EffectKind, MetricKind, Sidedness,
    TestFamily,
};

/// Sample size and minimum detectable effect calculator for A/B tests
#[derive(Parser, Debug)]
#[command(name = "abcalc")]
#[command(version)]
struct Args {
    /// Current metric value (0-1 for proportions)
    #[arg(long)]
    baseline: Option<f64>,

    /// Minimum detectable effect to size for
    #[arg(long, conflicts_with = "sample_size")]
    mde: Option<f64>,

    /// Fixed samples per control group; solves for the detectable effect instead
    #[arg(long)]
    sample_size: Option<u64>,

    /// MDE interpretation: absolute or relative
    #[arg(long = "type", default_value = "absolute")]
    mde_type: EffectKind,

    /// Statistical power (1 - beta)
    #[arg(long, default_value_t = abcalc_core::constants::DEFAULT_POWER)]
    power: f64,

    /// Significance level before correction
    #[arg(long, default_value_t = abcalc_core::constants::DEFAULT_ALPHA)]
    alpha: f64,

    /// Treatment/control size ratio (ignored when --weights is given)
    #[arg(long, default_value_t = abcalc_core::constants::DEFAULT_RATIO)]
    ratio: f64,

    /// Metric type: proportion or mean
    #[arg(long, default_value = "proportion")]
    metric: MetricKind,

    /// Control standard deviation (required for means)
    #[arg(long)]
    std_dev: Option<f64>,

    /// Treatment standard deviation (enables Welch's t-test)
    #[arg(long = "std-dev-2")]
    std_dev_2: Option<f64>,

    /// Test family: z, t, or chi2
    #[arg(long = "test", default_value = "z")]
    family: TestFamily,

    /// 1 for one-sided, 2 for two-sided
    #[arg(long, default_value = "2")]
    sides: Sidedness,

    /// Number of hypotheses (defaults to controls x treatments)
    #[arg(long)]
    comparisons: Option<usize>,

    /// Multiple comparison correction: bonferroni, sidak, or none
    #[arg(long, default_value = "none")]
    correction: CorrectionMethod,

    /// Number of control groups
    #[arg(long, default_value_t = 1)]
    controls: usize,

    /// Number of treatment groups
    #[arg(long, default_value_t = 1)]
    treatments: usize,

    /// Traffic weights for all groups, controls first (comma-separated)
    #[arg(long, value_delimiter = ',')]
    weights: Option<Vec<f64>>,

    /// Read the design from a JSON file instead of flags
    #[arg(long, conflicts_with_all = ["baseline", "mde", "sample_size"])]
    request: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Show solver debug output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_request(self) -> anyhow::Result<DesignRequest> {
        if let Some(path) = &self.request {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            return serde_json::from_str(&text)
                .with_context(|| format!("failed to parse {}", path.display()));
        }

        let Some(baseline) = self.baseline else {
            bail!("--baseline is required (or use --request)");
        };

        let mut request = DesignRequest {
            baseline,
            metric: self.metric,
            std_dev: self.std_dev,
            std_dev_treatment: self.std_dev_2,
            power: self.power,
            alpha: self.alpha,
            sidedness: self.sides,
            family: self.family,
            n_controls: self.controls,
            n_treatments: self.treatments,
            comparisons: self.comparisons,
            correction: self.correction,
            ..DesignRequest::default()
        }
        .ratio(self.ratio);

        if let Some(weights) = self.weights {
            request = request.weights(weights);
        }

        request = match (self.mde, self.sample_size) {
            (Some(mde), None) => request.effect(mde, self.mde_type),
            (None, Some(n)) => request.sample_size(n),
            _ => bail!("exactly one of --mde or --sample-size is required"),
        };

        Ok(request)
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let json = args.json;
    let request = args.into_request()?;

    match compute(&request) {
        Ok(outcome) => {
            if json {
                println!("{}", output::to_json_pretty(&outcome)?);
            } else {
                print!("{}", output::format_outcome(&outcome));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprint!("{}", output::format_validation_error(&err));
            Ok(ExitCode::from(2))
        }
    }
}
