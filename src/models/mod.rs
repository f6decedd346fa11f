//! Domain models for the subnet planner.
//!
//! This module contains the core data structures used throughout the application:
//! - [`Ipv4`] - IPv4 block with CIDR notation support, plus the address math functions
//! - [`RegionBias`] - Relative weight of a region
//! - [`HierarchyNode`] - Node of the allocated supernet tree
//! - [`AllocationResult`] - Everything one allocation produces

mod hierarchy;
mod ipv4;
mod region;
mod result;

// Re-export public types
pub use hierarchy::{HierarchyNode, NodeKind, NodeMetadata, UNALLOCATED};
pub use ipv4::{
    cut_addr, format_size, get_broadcast_address, get_cidr_mask, get_host_range, get_nth_subnet,
    ip_to_number, is_aligned, number_to_ip, parse_cidr, range_to_cidrs, subnet_address_count,
    subnet_count, usable_hosts, Ipv4, MAX_LENGTH,
};
pub use region::{RegionBias, REGION_THEMES};
pub use result::{AllocationResult, AllocationSummary, RegionSummary};
