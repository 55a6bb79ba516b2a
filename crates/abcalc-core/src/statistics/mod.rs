//! Distribution quantiles and alpha adjustment.
//!
//! - **Critical values** (`critical`): quantiles of the normal and Student's t
//! - **Correction** (`correction`): Bonferroni and Sidak multiple-comparison adjustment

pub mod correction;
pub mod critical;

pub use correction::corrected_alpha;
pub use critical::{critical_value, normal_quantile, student_t_quantile};
