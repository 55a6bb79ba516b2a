//! # abcalc
//!
//! Sample size and minimum detectable effect calculator for A/B experiments.
//!
//! The statistics live in [`abcalc_core`]; this crate adds the presentation
//! layer: terminal and JSON rendering of results and the `abcalc` binary.
//!
//! ## Quick Start
//!
//! ```
//! use abcalc::{compute_sample_size, output, DesignRequest};
//!
//! let request = DesignRequest::proportion(0.10).relative_effect(0.20);
//! let result = compute_sample_size(&request).unwrap();
//! assert_eq!(result.per_variant(), 3623.0);
//!
//! println!("{}", output::format_sample_size(&result));
//! ```
//!
//! Inverse mode answers the opposite question:
//!
//! ```
//! use abcalc::{compute_mde, DesignRequest};
//!
//! let request = DesignRequest::proportion(0.10).sample_size(5000);
//! let result = compute_mde(&request).unwrap();
//! assert!(result.absolute_effect > 0.0 && result.absolute_effect < 0.02);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod output;

// Re-exports for public API
pub use abcalc_core::{
    compute, compute_mde, compute_sample_size, Allocation, ArmAllocation, BottleneckPair,
    CorrectionMethod, DesignRequest, EffectKind, EffectiveParameters, MdeResult, MetricKind,
    Outcome, ParseOptionError, SampleSizeResult, Sidedness, SizingDesign, SolverConfig,
    StandardSizing, Target, TestFamily, ValidationError, Violation, WeightedSizing,
};
