//! Default design parameters and solver tuning constants.

/// Default statistical power (1 - beta).
pub const DEFAULT_POWER: f64 = 0.8;

/// Default significance level (type I error rate).
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Default treatment/control allocation ratio.
pub const DEFAULT_RATIO: f64 = 1.0;

// =============================================================================
// Fixed-point solver constants
// =============================================================================

/// Sample-size estimate used to seed the t-distribution iteration.
///
/// Large enough that the first degrees of freedom make the t quantiles
/// practically identical to the normal ones.
pub const INITIAL_SAMPLE_ESTIMATE: f64 = 100_000.0;

/// Iteration stops once successive estimates differ by less than this many samples.
pub const CONVERGENCE_THRESHOLD: f64 = 0.1;

/// Maximum number of fixed-point refinements for the t family.
pub const MAX_ITERATIONS: usize = 15;

// =============================================================================
// Inverse (MDE) solver constants
// =============================================================================

/// Absolute tolerance on the detectable delta for the proportion fixed point.
pub const MDE_TOLERANCE: f64 = 1e-12;

/// Iteration cap for the proportion fixed point in the inverse solver.
pub const MDE_MAX_ITERATIONS: usize = 100;

/// Largest sample size the solvers report.
///
/// Integers above 2^53 are no longer exactly representable as `f64`.
pub const MAX_SAMPLE_SIZE: f64 = 9_007_199_254_740_992.0;
