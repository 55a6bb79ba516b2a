//! Output formatting for calculation results.
//!
//! - Terminal: human-readable report with colors
//! - JSON: machine-readable serialization

mod json;
mod terminal;

pub use json::{to_json, to_json_pretty};
pub use terminal::{format_mde, format_outcome, format_sample_size, format_validation_error};
