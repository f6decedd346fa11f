//! Hierarchical allocation of a supernet into regions and territories.

use super::diagnostics::{evaluate, utilization_percentage};
use super::partition::split_proportional;
use super::site_prefix::{recommend_site_prefix, SitePrefix};
use crate::config::AllocationConfig;
use crate::error::PlanError;
use crate::models::{
    subnet_count, AllocationResult, AllocationSummary, HierarchyNode, Ipv4, NodeKind,
    NodeMetadata, RegionBias, RegionSummary,
};

pub const SUPERNET_ID: &str = "supernet";

/// Turn a configuration into a complete, internally consistent allocation.
///
/// Either the whole tree is built or an error is returned; there is no
/// partial result.
///
/// # Errors
///
/// Besides invalid input, a configuration that passes every bound still fails
/// with [`PlanError::Configuration`] when a ratio share is below one address,
/// or when no territory is large enough to hold a single site (for example
/// `10.0.0.0/24` with five /24 VLANs per site).
pub fn allocate(config: &AllocationConfig) -> Result<AllocationResult, PlanError> {
    log::info!(
        "#Start allocate() supernet={} regions={} territories/region={}",
        config.supernet,
        config.region_biases.len(),
        config.sub_regions_per_region
    );
    let (addr, prefix) = config.validate()?;
    let given = Ipv4::from_bits(addr, prefix)?;
    let supernet = given.network();
    if supernet != given {
        log::warn!("Supernet {given} is not a network address, using {supernet}");
    }

    let site = recommend_site_prefix(config.vlans_per_site, config.vlan_size)?;
    log::info!(
        "Site prefix /{} holds {} x /{} VLANs",
        site.prefix,
        site.total_subnets_per_site,
        config.vlan_size
    );

    let weights: Vec<f64> = config.region_biases.iter().map(|b| b.ratio).collect();
    let partition = split_proportional(supernet, &weights, "region")?;

    let mut regions = Vec::with_capacity(partition.blocks.len());
    for (i, (bias, block)) in config
        .region_biases
        .iter()
        .zip(&partition.blocks)
        .enumerate()
    {
        regions.push(build_region(i, bias, *block, config.sub_regions_per_region, &site)?);
    }

    let total_sites_supported: u64 = regions.iter().map(|r| r.sites_capacity()).sum();
    if total_sites_supported == 0 {
        return Err(PlanError::Configuration(format!(
            "No territory in {supernet} can hold a single /{} site",
            site.prefix
        )));
    }
    let utilization = utilization_percentage(config.total_sites_needed, total_sites_supported);
    log::info!(
        "{total_sites_supported} sites supported, {:.1}% utilization",
        utilization
    );

    let region_breakdown: Vec<RegionSummary> = config
        .region_biases
        .iter()
        .zip(&regions)
        .map(|(bias, region)| RegionSummary {
            name: bias.name.clone(),
            code: bias.short_code(),
            cidr: region.cidr.clone(),
            ratio: bias.ratio,
            sites_capacity: region.sites_capacity(),
            percentage: region.sites_capacity() as f64 / total_sites_supported as f64 * 100.0,
            address_percentage: region.total_addresses as f64 / supernet.address_count() as f64
                * 100.0,
        })
        .collect();

    let diagnostics = evaluate(config, &region_breakdown, &site, utilization);

    let mut children = regions;
    children.extend(HierarchyNode::unallocated(SUPERNET_ID, partition.unallocated));
    let hierarchy = HierarchyNode::from_block(SUPERNET_ID, "Supernet", NodeKind::Supernet, supernet)
        .with_children(children)
        .with_metadata(NodeMetadata {
            sites_capacity: Some(total_sites_supported),
            ..Default::default()
        });

    Ok(AllocationResult {
        hierarchy,
        site_prefix_recommendation: site.prefix,
        total_subnets_per_site: site.total_subnets_per_site,
        total_sites_supported,
        utilization_percentage: utilization,
        summary: AllocationSummary {
            total_regions: region_breakdown.len(),
            total_sub_regions: region_breakdown.len() * config.sub_regions_per_region as usize,
            vlans_per_site: config.vlans_per_site,
            region_breakdown,
        },
        warnings: diagnostics.warnings,
        recommendations: diagnostics.recommendations,
    })
}

/// Sites of size `site_prefix` that fit in `block`; zero when the block is smaller.
pub fn sites_capacity(block: Ipv4, site_prefix: u8) -> Result<u64, PlanError> {
    if block.mask() > site_prefix {
        return Ok(0);
    }
    subnet_count(block.mask(), site_prefix)
}

fn build_region(
    index: usize,
    bias: &RegionBias,
    block: Ipv4,
    territories: u32,
    site: &SitePrefix,
) -> Result<HierarchyNode, PlanError> {
    let id = format!("{SUPERNET_ID}-region-{}", index + 1);
    let code = bias.short_code();

    let weights = vec![1.0; territories as usize];
    let partition = split_proportional(block, &weights, "territory").map_err(|e| match e {
        PlanError::Configuration(msg) => {
            PlanError::Configuration(format!("Region '{}': {msg}", bias.name))
        }
        other => other,
    })?;

    let mut children = Vec::with_capacity(partition.blocks.len() + 1);
    let mut region_capacity = 0;
    for (j, territory) in partition.blocks.iter().enumerate() {
        let capacity = sites_capacity(*territory, site.prefix)?;
        region_capacity += capacity;
        log::debug!(
            "{} territory {} = {territory} ({capacity} sites)",
            bias.name,
            j + 1
        );
        children.push(
            HierarchyNode::from_block(
                &format!("{id}-territory-{}", j + 1),
                &format!("{} Territory {}", bias.name, j + 1),
                NodeKind::Territory,
                *territory,
            )
            .with_metadata(NodeMetadata {
                sites_capacity: Some(capacity),
                code: Some(format!("{code}-T{}", j + 1)),
                ..Default::default()
            }),
        );
    }
    children.extend(HierarchyNode::unallocated(&id, partition.unallocated));

    Ok(
        HierarchyNode::from_block(&id, &bias.name, NodeKind::Region, block)
            .with_children(children)
            .with_metadata(NodeMetadata {
                ratio: Some(bias.ratio),
                sites_capacity: Some(region_capacity),
                code: Some(code),
            }),
    )
}
