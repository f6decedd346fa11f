//! Allocation result returned to renderers.

use super::hierarchy::HierarchyNode;
use serde::Serialize;

/// One row of the flat regional breakdown.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegionSummary {
    pub name: String,
    pub code: String,
    pub cidr: String,
    pub ratio: f64,
    pub sites_capacity: u64,
    /// Share of all supported sites.
    pub percentage: f64,
    /// Share of the supernet's addresses.
    pub address_percentage: f64,
}

/// Shape figures echoed back from the configuration.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSummary {
    pub total_regions: usize,
    pub total_sub_regions: usize,
    pub vlans_per_site: u32,
    pub region_breakdown: Vec<RegionSummary>,
}

/// Everything one `allocate` call produces.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationResult {
    pub hierarchy: HierarchyNode,
    pub site_prefix_recommendation: u8,
    pub total_subnets_per_site: u64,
    pub total_sites_supported: u64,
    pub utilization_percentage: f64,
    pub summary: AllocationSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
}

impl AllocationResult {
    /// Region nodes in declaration order, without the Unallocated remainder.
    pub fn regions(&self) -> impl Iterator<Item = &HierarchyNode> {
        self.hierarchy.allocated_children()
    }

    pub fn region_summary(&self, name: &str) -> Option<&RegionSummary> {
        self.summary.region_breakdown.iter().find(|r| r.name == name)
    }

    /// True when the supernet supports at least the requested number of sites.
    pub fn fits(&self) -> bool {
        self.utilization_percentage <= 100.0
    }
}
