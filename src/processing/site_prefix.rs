//! Site prefix recommendation.
//!
//! Picks the smallest block that holds every VLAN of a site contiguously.

use crate::error::PlanError;
use crate::models::{subnet_address_count, subnet_count, MAX_LENGTH};

/// Longest prefix the scan starts from; /31 and /32 have no room for VLANs.
const SCAN_START: u8 = MAX_LENGTH - 2;

/// Recommended site block size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SitePrefix {
    pub prefix: u8,
    /// How many default-sized VLANs tile one site block.
    pub total_subnets_per_site: u64,
}

impl SitePrefix {
    /// VLAN slots a site block leaves unused.
    pub fn idle_slots(&self, vlans_per_site: u32) -> u64 {
        self.total_subnets_per_site
            .saturating_sub(vlans_per_site as u64)
    }
}

/// Scan from /30 towards /0 for the first block holding `vlans_per_site`
/// VLANs of size `vlan_prefix`.
pub fn recommend_site_prefix(vlans_per_site: u32, vlan_prefix: u8) -> Result<SitePrefix, PlanError> {
    if vlans_per_site == 0 {
        return Err(PlanError::Configuration(
            "VLANs per site must be at least 1".to_string(),
        ));
    }
    let unsatisfiable = PlanError::UnsatisfiableSiteSize {
        vlans: vlans_per_site,
        vlan_prefix,
    };
    let needed = (vlans_per_site as u64)
        .checked_mul(subnet_address_count(vlan_prefix)?)
        .ok_or_else(|| unsatisfiable.clone())?;

    for prefix in (0..=SCAN_START).rev() {
        if subnet_address_count(prefix)? >= needed {
            let total_subnets_per_site = subnet_count(prefix, vlan_prefix)?;
            log::debug!(
                "site prefix /{prefix} holds {vlans_per_site} x /{vlan_prefix} ({total_subnets_per_site} slots)"
            );
            return Ok(SitePrefix {
                prefix,
                total_subnets_per_site,
            });
        }
    }
    Err(unsatisfiable)
}
