//! Statistical estimation engine for A/B experiment design.
//!
//! This crate answers two questions about a controlled comparison:
//!
//! - How many samples does each arm need to detect a given effect at the
//!   requested power and significance level? ([`compute_sample_size`])
//! - Given a fixed per-group sample size, what is the smallest effect the
//!   design can reliably detect? ([`compute_mde`])
//!
//! Every function here is a pure, deterministic function of its numeric
//! inputs. There is no I/O and no shared state; rendering results for humans
//! is left to the `abcalc` crate.
//!
//! # Usage
//!
//! ```
//! use abcalc_core::{compute_sample_size, DesignRequest};
//!
//! let request = DesignRequest::proportion(0.10).absolute_effect(0.02);
//! let result = compute_sample_size(&request).unwrap();
//! assert_eq!(result.per_variant(), 3623.0);
//! ```

pub mod analysis;
pub mod constants;
pub mod engine;
pub mod error;
pub mod request;
pub mod result;
pub mod statistics;
pub mod types;
pub mod validation;

// Re-export commonly used items at crate root
pub use analysis::{BottleneckPair, Convergence, PairEvaluation, PairProblem, PairSizing};
pub use engine::{compute, compute_mde, compute_sample_size};
pub use error::{ParseOptionError, ValidationError, Violation};
pub use request::{Allocation, DesignRequest, SolverConfig, Target};
pub use result::{
    ArmAllocation, EffectiveParameters, MdeResult, Outcome, SampleSizeResult, SizingDesign,
    StandardSizing, WeightedSizing,
};
pub use types::{CorrectionMethod, EffectKind, MetricKind, Sidedness, TestFamily};
