//! Allocation logic.
//!
//! This module contains the hierarchical allocator and its stages:
//! - [`site_prefix`] - Site prefix recommendation
//! - [`partition`] - Proportional power-of-two splitting of one block
//! - [`allocator`] - Region and territory tree construction
//! - [`diagnostics`] - Capacity warnings and recommendations
//! - [`site_example`] - Read-only example site layouts

mod allocator;
mod diagnostics;
mod partition;
mod site_example;
mod site_prefix;

// Re-export public functions
pub use allocator::{allocate, sites_capacity, SUPERNET_ID};
pub use diagnostics::{
    evaluate, oversize_threshold, projected_sites, utilization_percentage, Diagnostics,
    EXHAUSTION_PERCENTAGE,
};
pub use partition::{split_proportional, Partition};
pub use site_example::{
    build_site_example, example_site, site_id, territory_site_preview, SiteExample, SiteVlan,
    TerritorySites,
};
pub use site_prefix::{recommend_site_prefix, SitePrefix};
