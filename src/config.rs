//! Allocation configuration, its bounds and the JSON config loader.

use crate::error::PlanError;
use crate::models::{parse_cidr, subnet_address_count, RegionBias};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;

pub const REGION_COUNT: RangeInclusive<usize> = 1..=6;
pub const SUB_REGIONS_PER_REGION: RangeInclusive<u32> = 1..=16;
pub const VLANS_PER_SITE: RangeInclusive<u32> = 1..=64;
pub const VLAN_PREFIX: RangeInclusive<u8> = 20..=28;
pub const TOTAL_SITES_NEEDED: RangeInclusive<u64> = 1..=100_000;

pub const DEFAULT_GROWTH_MULTIPLIER: f64 = 3.0;

fn default_growth_multiplier() -> f64 {
    DEFAULT_GROWTH_MULTIPLIER
}

/// Target deployment shape to carve out of one supernet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationConfig {
    /// Supernet in CIDR notation, e.g. `10.0.0.0/8`.
    pub supernet: String,
    pub region_biases: Vec<RegionBias>,
    pub sub_regions_per_region: u32,
    pub vlans_per_site: u32,
    /// Default VLAN prefix length.
    pub vlan_size: u8,
    pub total_sites_needed: u64,
    /// Headroom factor used to judge whether the supernet is oversized.
    #[serde(default = "default_growth_multiplier")]
    pub growth_multiplier: f64,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        AllocationConfig {
            supernet: "10.0.0.0/8".to_string(),
            region_biases: RegionBias::themed(4),
            sub_regions_per_region: 2,
            vlans_per_site: 5,
            vlan_size: 24,
            total_sites_needed: 1000,
            growth_multiplier: DEFAULT_GROWTH_MULTIPLIER,
        }
    }
}

fn check_bounds<T>(what: &str, value: T, bounds: &RangeInclusive<T>) -> Result<(), PlanError>
where
    T: PartialOrd + std::fmt::Display,
{
    if bounds.contains(&value) {
        Ok(())
    } else {
        Err(PlanError::Configuration(format!(
            "{what} must be between {} and {}, got {value}",
            bounds.start(),
            bounds.end()
        )))
    }
}

impl AllocationConfig {
    /// Check every bound and return the parsed supernet.
    pub fn validate(&self) -> Result<(u32, u8), PlanError> {
        let (addr, prefix) = parse_cidr(&self.supernet)
            .map_err(|e| PlanError::Configuration(format!("supernet: {e}")))?;

        check_bounds("Region count", self.region_biases.len(), &REGION_COUNT)?;
        for bias in &self.region_biases {
            if !bias.ratio.is_finite() || bias.ratio <= 0.0 {
                return Err(PlanError::Configuration(format!(
                    "Region '{}' ratio must be a positive number, got {}",
                    bias.name, bias.ratio
                )));
            }
        }
        check_bounds(
            "Sub-regions per region",
            self.sub_regions_per_region,
            &SUB_REGIONS_PER_REGION,
        )?;
        check_bounds("VLANs per site", self.vlans_per_site, &VLANS_PER_SITE)?;
        check_bounds("VLAN prefix", self.vlan_size, &VLAN_PREFIX)?;
        check_bounds("Total sites needed", self.total_sites_needed, &TOTAL_SITES_NEEDED)?;
        if !self.growth_multiplier.is_finite() || self.growth_multiplier <= 0.0 {
            return Err(PlanError::Configuration(format!(
                "Growth multiplier must be a positive number, got {}",
                self.growth_multiplier
            )));
        }

        if subnet_address_count(prefix)? < self.region_biases.len() as u64 {
            return Err(PlanError::Configuration(format!(
                "Supernet {} is too small for {} regions",
                self.supernet,
                self.region_biases.len()
            )));
        }

        Ok((addr, prefix))
    }
}

/// Read an [`AllocationConfig`] from a JSON file.
pub fn load_config(path: &str) -> Result<AllocationConfig, PlanError> {
    if !Path::new(path).exists() {
        return Err(PlanError::ConfigFile {
            path: path.to_string(),
            message: "file does not exist".to_string(),
        });
    }
    log::info!("Reading config file: {path}");

    let json = std::fs::read_to_string(path).map_err(|e| PlanError::ConfigFile {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    parse_config(&json).map_err(|message| PlanError::ConfigFile {
        path: path.to_string(),
        message,
    })
}

/// Parse an [`AllocationConfig`] from JSON text, reporting the failing field path.
pub fn parse_config(json: &str) -> Result<AllocationConfig, String> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("path={} error={}", e.path(), e.inner()))
}
