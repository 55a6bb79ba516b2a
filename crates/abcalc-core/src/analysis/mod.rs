//! Sample-size and detectable-effect solvers.
//!
//! - **Effect translation** (`effect`): relative or absolute effect to an absolute delta
//! - **Single pair** (`pair`): control-group size for one control/treatment comparison
//! - **Weighted designs** (`weighted`): bottleneck search over all control/treatment pairs
//! - **MDE** (`mde`): smallest detectable delta for a fixed sample size

pub mod effect;
pub mod mde;
pub mod pair;
pub mod weighted;

pub use effect::{absolute_delta, target_value};
pub use mde::{solve_mde, MdeEstimate};
pub use pair::{solve_pair, Convergence, PairProblem, PairSizing};
pub use weighted::{resolve_weighted, BottleneckPair, PairEvaluation, WeightedResolution};
