//! Terminal output utilities.
//!
//! Plain-text rendering of an allocation, with colors for headings and advisories.

use crate::models::{format_size, AllocationResult, HierarchyNode, NodeKind};
use crate::processing::SiteExample;
use colored::Colorize;
use std::fmt::Write;

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
///
/// # Returns
/// A quoted, right-aligned string
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let value_str = value.to_string();
    let quoted = format!("\"{value_str}\"");
    let quoted_len = quoted.len();

    if quoted_len >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// One line describing a node, without indentation.
pub fn describe_node(node: &HierarchyNode) -> String {
    let mut line = format!(
        "{} {} ({} addresses",
        node.name,
        node.cidr,
        format_size(node.total_addresses)
    );
    if let Some(sites) = node.metadata.sites_capacity {
        let _ = write!(line, ", {sites} sites");
    }
    if let Some(ratio) = node.metadata.ratio {
        let _ = write!(line, ", ratio {ratio}");
    }
    line.push(')');
    line
}

/// Indented tree of a node and all its descendants.
pub fn render_tree(node: &HierarchyNode) -> String {
    let mut out = String::new();
    write_node(&mut out, node, 0);
    out
}

fn write_node(out: &mut String, node: &HierarchyNode, depth: usize) {
    let line = describe_node(node);
    let line = match node.kind {
        NodeKind::Unallocated | NodeKind::FreeBlock => line.dimmed().to_string(),
        NodeKind::Supernet | NodeKind::Region => line.bold().to_string(),
        NodeKind::Territory => line,
    };
    let _ = writeln!(out, "{:indent$}- {line}", "", indent = depth * 2);
    for child in &node.children {
        write_node(out, child, depth + 1);
    }
}

/// Print the headline figures, warnings and recommendations.
pub fn print_result(result: &AllocationResult) {
    println!(
        "{} {} -> site prefix /{} ({} VLAN slots per site)",
        "Supernet".on_blue(),
        result.hierarchy.cidr,
        result.site_prefix_recommendation,
        result.total_subnets_per_site
    );
    println!(
        "Sites supported: {}  utilization: {:.1}%  regions: {}  territories: {}",
        result.total_sites_supported,
        result.utilization_percentage,
        result.summary.total_regions,
        result.summary.total_sub_regions
    );
    for warning in &result.warnings {
        println!("{} {warning}", "WARNING".on_red());
    }
    for recommendation in &result.recommendations {
        println!("{} {recommendation}", "NOTE".on_yellow());
    }
}

/// Print an example site and its VLANs.
pub fn print_site_example(example: &SiteExample) {
    println!(
        "Example site {} ({}) broadcast {}",
        example.cidr, example.address_range, example.broadcast
    );
    for (i, vlan) in example.vlans.iter().enumerate() {
        println!(
            "  VLAN {:>2}: {:<18} {} ({} hosts)",
            i + 1,
            vlan.cidr.to_string(),
            vlan.address_range,
            format_size(vlan.usable_hosts)
        );
    }
    if let Some(warning) = &example.warning {
        println!("{} {warning}", "WARNING".on_red());
    }
}
