//! Hierarchical IPv4 address planning.
//!
//! Carves one supernet into regions, territories, sites and VLANs sized by
//! capacity ratios, and reports whether the plan holds the requested sites.
//!
//! ```
//! use subnet_planner::{allocate, AllocationConfig};
//!
//! let result = allocate(&AllocationConfig::default()).unwrap();
//! assert_eq!(result.site_prefix_recommendation, 21);
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

pub use config::{load_config, AllocationConfig};
pub use error::PlanError;
pub use models::{AllocationResult, HierarchyNode, RegionBias};
pub use processing::{allocate, example_site};

/// Load the configuration from `path`, or fall back to the defaults.
pub fn config_or_default(path: Option<&str>) -> Result<AllocationConfig, PlanError> {
    match path {
        Some(path) => load_config(path),
        None => {
            log::info!("No config file given, using defaults");
            Ok(AllocationConfig::default())
        }
    }
}
