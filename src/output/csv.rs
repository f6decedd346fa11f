//! CSV output formatting for allocation results.

use super::terminal::format_field;
use crate::models::{AllocationResult, HierarchyNode};

const REGION_HEADER: &str = r#""name","code","cidr","ratio","sites_capacity","percentage","address_percentage""#;
const NODE_HEADER: &str = r#""id","kind","name","cidr","broadcast","total_addresses","address_range","sites_capacity""#;

/// Regional breakdown as CSV, one row per region in declaration order.
pub fn region_breakdown_csv(result: &AllocationResult) -> String {
    let mut lines = vec![REGION_HEADER.to_string()];
    for r in &result.summary.region_breakdown {
        lines.push(format!(
            "{name},{code},{cidr},{ratio},{sites},{percentage},{address_percentage}",
            name = format_field(&r.name, 12),
            code = format_field(&r.code, 6),
            cidr = format_field(&r.cidr, 18),
            ratio = format_field(r.ratio, 6),
            sites = format_field(r.sites_capacity, 9),
            percentage = format_field(format!("{:.1}", r.percentage), 7),
            address_percentage = format_field(format!("{:.1}", r.address_percentage), 7),
        ));
    }
    lines.join("\n")
}

/// Every node of the hierarchy as CSV, depth first.
pub fn hierarchy_csv(root: &HierarchyNode) -> String {
    let mut lines = vec![NODE_HEADER.to_string()];
    root.walk(&mut |node| {
        lines.push(format!(
            "{id},{kind},{name},{cidr},{broadcast},{total},{range},{sites}",
            id = format_field(&node.id, 36),
            kind = format_field(format!("{:?}", node.kind).to_lowercase(), 13),
            name = format_field(&node.name, 24),
            cidr = format_field(&node.cidr, 18),
            broadcast = format_field(node.broadcast, 17),
            total = format_field(node.total_addresses, 12),
            range = format_field(&node.address_range, 33),
            sites = format_field(
                node.metadata
                    .sites_capacity
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
                8
            ),
        ));
    });
    lines.join("\n")
}

/// Print the regional breakdown as CSV to stdout.
pub fn print_region_breakdown(result: &AllocationResult) {
    log::info!(
        "#Start print_region_breakdown() {} regions",
        result.summary.region_breakdown.len()
    );
    println!("{}", region_breakdown_csv(result));
}
