//! JSON export of allocation results.

use crate::models::{AllocationResult, RegionSummary};
use serde::Serialize;

/// The compact summary handed out by "copy summary".
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CopySummary<'a> {
    pub supernet: &'a str,
    pub total_sites: u64,
    pub utilization: f64,
    pub regions: &'a [RegionSummary],
}

impl<'a> From<&'a AllocationResult> for CopySummary<'a> {
    fn from(result: &'a AllocationResult) -> Self {
        CopySummary {
            supernet: &result.hierarchy.cidr,
            total_sites: result.total_sites_supported,
            utilization: result.utilization_percentage,
            regions: &result.summary.region_breakdown,
        }
    }
}

/// Pretty-printed [`CopySummary`].
pub fn summary_json(result: &AllocationResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&CopySummary::from(result))
}

/// The whole result, hierarchy included.
pub fn result_json(result: &AllocationResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}
