//! Capacity evaluation: advisory warnings and recommendations.

use super::site_prefix::SitePrefix;
use crate::config::AllocationConfig;
use crate::models::RegionSummary;

/// Utilization above which the supernet counts as nearly exhausted.
pub const EXHAUSTION_PERCENTAGE: f64 = 80.0;

/// Advisory text; never fatal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Requested sites as a percentage of supported sites, uncapped.
pub fn utilization_percentage(total_sites_needed: u64, total_sites_supported: u64) -> f64 {
    total_sites_needed as f64 / total_sites_supported as f64 * 100.0
}

/// Utilization below which the supernet is oversized for the growth horizon.
pub fn oversize_threshold(growth_multiplier: f64) -> f64 {
    100.0 / growth_multiplier
}

/// Sites a region is expected to host, by its ratio share of all sites needed.
pub fn projected_sites(total_sites_needed: u64, ratio: f64, total_ratio: f64) -> u64 {
    (total_sites_needed as f64 * ratio / total_ratio).ceil() as u64
}

pub fn evaluate(
    config: &AllocationConfig,
    breakdown: &[RegionSummary],
    site: &SitePrefix,
    utilization: f64,
) -> Diagnostics {
    let mut diagnostics = Diagnostics::default();

    if utilization > EXHAUSTION_PERCENTAGE {
        diagnostics.warnings.push(format!(
            "Utilization is {utilization:.1}%, the address space is nearly exhausted. \
             Consider a larger supernet or fewer VLANs per site."
        ));
    }

    let total_ratio: f64 = breakdown.iter().map(|r| r.ratio).sum();
    for region in breakdown {
        let projected = projected_sites(config.total_sites_needed, region.ratio, total_ratio);
        if projected > region.sites_capacity {
            diagnostics.warnings.push(format!(
                "Region {} ({}) is expected to host {projected} sites but only has room for {}.",
                region.name, region.cidr, region.sites_capacity
            ));
        }
    }

    let threshold = oversize_threshold(config.growth_multiplier);
    if utilization < threshold {
        diagnostics.recommendations.push(format!(
            "Utilization is only {utilization:.1}%, below the {threshold:.1}% expected for {}x growth. \
             A smaller supernet or a denser site prefix would conserve address space.",
            config.growth_multiplier
        ));
    }

    let idle = site.idle_slots(config.vlans_per_site);
    if idle > 0 && idle * 3 >= site.total_subnets_per_site {
        diagnostics.recommendations.push(format!(
            "Each /{} site leaves {idle} of {} /{} VLAN slots unused. \
             Consider a smaller default VLAN prefix to give each VLAN more hosts.",
            site.prefix, site.total_subnets_per_site, config.vlan_size
        ));
    }

    for warning in &diagnostics.warnings {
        log::warn!("{warning}");
    }
    for recommendation in &diagnostics.recommendations {
        log::info!("Recommendation: {recommendation}");
    }
    diagnostics
}
