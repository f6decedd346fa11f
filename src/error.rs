//! Error type shared by address math, the allocator and the config loader.

use thiserror::Error;

/// Everything that can go wrong while planning address space.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// Malformed CIDR or dotted-quad text, or a prefix length outside 0..=32.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Inner block is larger than the outer block in a subnet-count query.
    #[error("Prefix /{inner} is larger than the enclosing /{outer}")]
    PrefixOrder { outer: u8, inner: u8 },

    /// Subnet index beyond the outer block's capacity.
    #[error("Subnet index {index} out of range, only {count} subnets available")]
    IndexOutOfRange { index: u64, count: u64 },

    /// No site prefix can hold the requested VLANs.
    #[error("No site prefix can hold {vlans} VLANs of size /{vlan_prefix}")]
    UnsatisfiableSiteSize { vlans: u32, vlan_prefix: u8 },

    /// Out-of-bounds or inconsistent allocation configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Configuration file could not be read or parsed.
    #[error("Config file {path}: {message}")]
    ConfigFile { path: String, message: String },
}

impl PlanError {
    /// True for errors caused by user input rather than a defect in the planner.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            PlanError::InvalidFormat(_) | PlanError::Configuration(_) | PlanError::ConfigFile { .. }
        )
    }
}
