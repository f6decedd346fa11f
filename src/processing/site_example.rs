//! Read-only example site layouts derived from a finished allocation.
//!
//! Nothing here changes or re-runs the allocation; it only applies address
//! math to blocks the allocator already produced.

use crate::error::PlanError;
use crate::models::{
    format_size, subnet_address_count, subnet_count, usable_hosts, AllocationResult, Ipv4,
};
use serde::Serialize;
use std::net::Ipv4Addr;

/// One VLAN packed into an example site.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SiteVlan {
    pub cidr: Ipv4,
    pub network: Ipv4Addr,
    pub broadcast: Ipv4Addr,
    pub address_range: String,
    pub usable_hosts: u64,
}

/// The first site of a territory with its VLANs laid out.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SiteExample {
    pub cidr: Ipv4,
    pub network: Ipv4Addr,
    pub broadcast: Ipv4Addr,
    pub address_range: String,
    pub vlans: Vec<SiteVlan>,
    /// VLANs asked for; `vlans.len()` of them fit.
    pub requested: usize,
    pub remaining_addresses: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl SiteExample {
    pub fn allocated(&self) -> usize {
        self.vlans.len()
    }
}

/// First and last site of a territory.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TerritorySites {
    pub site_count: u64,
    pub first_site_id: String,
    pub first_site: Ipv4,
    pub last_site_id: String,
    pub last_site: Ipv4,
}

/// Site identifier such as `ORI-T1-S001`; indexes are zero based.
pub fn site_id(region_code: &str, territory_index: usize, site_index: u64) -> String {
    format!(
        "{region_code}-T{}-S{:03}",
        territory_index + 1,
        site_index + 1
    )
}

/// Pack VLANs into site 0 of `territory`, in order, stopping at the site's end.
///
/// `vlan_prefixes[i]` sizes VLAN `i`; missing entries use `default_vlan_prefix`.
/// Each VLAN starts on a boundary of its own size.
pub fn build_site_example(
    territory: Ipv4,
    site_prefix: u8,
    default_vlan_prefix: u8,
    vlans_per_site: u32,
    vlan_prefixes: &[u8],
) -> Result<SiteExample, PlanError> {
    let site = territory.network().nth_subnet(site_prefix, 0)?;
    let site_lo = site.lo() as u64;
    let site_hi = site.hi() as u64;

    let prefixes: Vec<u8> = (0..vlans_per_site as usize)
        .map(|i| vlan_prefixes.get(i).copied().unwrap_or(default_vlan_prefix))
        .collect();

    let mut vlans = Vec::with_capacity(prefixes.len());
    let mut cursor = site_lo;
    for &prefix in &prefixes {
        let size = subnet_address_count(prefix)?;
        let start = cursor.div_ceil(size) * size;
        if start + size - 1 > site_hi {
            log::debug!("VLAN /{prefix} at {start} passes the end of {site}, stopping");
            break;
        }
        let cidr = Ipv4::from_bits(start as u32, prefix)?;
        vlans.push(SiteVlan {
            cidr,
            network: cidr.addr(),
            broadcast: cidr.broadcast(),
            address_range: cidr.address_range(),
            usable_hosts: usable_hosts(prefix)?,
        });
        cursor = start + size;
    }

    let remaining_addresses = site.address_count() - (cursor - site_lo);
    let warning = if vlans.len() < prefixes.len() {
        Some(format!(
            "With your per-VLAN sizes, only {} of {} VLANs fit in the /{site_prefix} site block.",
            vlans.len(),
            prefixes.len()
        ))
    } else {
        let smallest = prefixes
            .iter()
            .filter_map(|&p| subnet_address_count(p).ok())
            .min()
            .unwrap_or(0);
        if smallest > 0 && remaining_addresses > 0 && remaining_addresses < smallest * 2 {
            Some(format!(
                "Per-site VLAN layout is close to capacity; only {} addresses remain in the site block.",
                format_size(remaining_addresses)
            ))
        } else {
            None
        }
    };

    Ok(SiteExample {
        cidr: site,
        network: site.addr(),
        broadcast: site.broadcast(),
        address_range: site.address_range(),
        vlans,
        requested: prefixes.len(),
        remaining_addresses,
        warning,
    })
}

/// Example site from the first territory of the first region that can hold one.
pub fn example_site(
    result: &AllocationResult,
    default_vlan_prefix: u8,
    vlan_prefixes: &[u8],
) -> Result<Option<SiteExample>, PlanError> {
    let territory = result
        .regions()
        .flat_map(|region| region.allocated_children())
        .find(|territory| territory.sites_capacity() > 0)
        .and_then(|territory| territory.block);

    match territory {
        Some(block) => build_site_example(
            block,
            result.site_prefix_recommendation,
            default_vlan_prefix,
            result.summary.vlans_per_site,
            vlan_prefixes,
        )
        .map(Some),
        None => Ok(None),
    }
}

/// First and last site of one territory with their identifiers.
pub fn territory_site_preview(
    region_code: &str,
    territory_index: usize,
    territory: Ipv4,
    site_prefix: u8,
) -> Result<TerritorySites, PlanError> {
    let territory = territory.network();
    let site_count = subnet_count(territory.mask(), site_prefix)?;
    Ok(TerritorySites {
        site_count,
        first_site_id: site_id(region_code, territory_index, 0),
        first_site: territory.nth_subnet(site_prefix, 0)?,
        last_site_id: site_id(region_code, territory_index, site_count - 1),
        last_site: territory.nth_subnet(site_prefix, site_count - 1)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn territory() -> Ipv4 {
        Ipv4::new("10.0.0.0/11").unwrap()
    }

    #[test]
    fn test_site_id() {
        assert_eq!(site_id("ORI", 0, 0), "ORI-T1-S001");
        assert_eq!(site_id("AND", 1, 1023), "AND-T2-S1024");
    }

    #[test]
    fn test_default_layout() {
        let example = build_site_example(territory(), 21, 24, 5, &[]).unwrap();
        assert_eq!(example.cidr.to_string(), "10.0.0.0/21");
        assert_eq!(example.address_range, "10.0.0.1 - 10.0.7.254");
        assert_eq!(example.allocated(), 5);
        assert_eq!(example.vlans[4].cidr.to_string(), "10.0.4.0/24");
        assert_eq!(example.vlans[4].usable_hosts, 254);
        assert_eq!(example.remaining_addresses, 768);
        assert!(example.warning.is_none());
    }

    #[test]
    fn test_vlans_align_to_their_size() {
        let example = build_site_example(territory(), 21, 24, 3, &[26, 23, 24]).unwrap();
        let cidrs: Vec<String> = example.vlans.iter().map(|v| v.cidr.to_string()).collect();
        assert_eq!(cidrs, vec!["10.0.0.0/26", "10.0.2.0/23", "10.0.4.0/24"]);
    }

    #[test]
    fn test_stops_when_site_is_full() {
        let example = build_site_example(territory(), 21, 24, 5, &[22, 22, 24]).unwrap();
        assert_eq!(example.allocated(), 2);
        assert_eq!(example.requested, 5);
        assert_eq!(example.remaining_addresses, 0);
        assert_eq!(
            example.warning.as_deref(),
            Some("With your per-VLAN sizes, only 2 of 5 VLANs fit in the /21 site block.")
        );
    }

    #[test]
    fn test_close_to_capacity() {
        let example = build_site_example(territory(), 21, 24, 7, &[]).unwrap();
        assert_eq!(example.allocated(), 7);
        assert_eq!(example.remaining_addresses, 256);
        assert!(example.warning.unwrap().contains("only 256 addresses remain"));
    }

    #[test]
    fn test_territory_smaller_than_site() {
        let err = build_site_example(Ipv4::new("10.0.0.0/22").unwrap(), 21, 24, 1, &[]).unwrap_err();
        assert_eq!(err, PlanError::PrefixOrder { outer: 22, inner: 21 });
    }

    #[test]
    fn test_territory_site_preview() {
        let preview = territory_site_preview("ORI", 1, Ipv4::new("10.32.0.0/11").unwrap(), 21).unwrap();
        assert_eq!(preview.site_count, 1024);
        assert_eq!(preview.first_site_id, "ORI-T2-S001");
        assert_eq!(preview.first_site.to_string(), "10.32.0.0/21");
        assert_eq!(preview.last_site_id, "ORI-T2-S1024");
        assert_eq!(preview.last_site.to_string(), "10.63.248.0/21");
    }
}
