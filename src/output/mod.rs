//! Output formatting for allocation results.
//!
//! This module handles formatting and outputting an allocation:
//! - [`csv`] - CSV output formatting
//! - [`json`] - JSON summary export
//! - [`terminal`] - Terminal output with colors

mod csv;
mod json;
mod terminal;

pub use csv::{hierarchy_csv, print_region_breakdown, region_breakdown_csv};
pub use json::{result_json, summary_json, CopySummary};
pub use terminal::{
    describe_node, format_field, print_result, print_site_example, render_tree,
};
