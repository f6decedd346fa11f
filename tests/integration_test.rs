//! Integration tests for subnet-planner
//!
//! These tests run whole allocations and check the tree-wide invariants.

use subnet_planner::models::{
    ip_to_number, number_to_ip, parse_cidr, HierarchyNode, NodeKind, UNALLOCATED,
};
use subnet_planner::processing::{example_site, territory_site_preview};
use subnet_planner::{allocate, load_config, AllocationConfig, PlanError, RegionBias};

fn config(supernet: &str, ratios: &[f64], territories: u32, vlans: u32, sites: u64) -> AllocationConfig {
    let mut region_biases = RegionBias::themed(ratios.len());
    for (bias, ratio) in region_biases.iter_mut().zip(ratios) {
        bias.ratio = *ratio;
    }
    AllocationConfig {
        supernet: supernet.to_string(),
        region_biases,
        sub_regions_per_region: territories,
        vlans_per_site: vlans,
        vlan_size: 24,
        total_sites_needed: sites,
        growth_multiplier: 3.0,
    }
}

fn sample_configs() -> Vec<AllocationConfig> {
    vec![
        config("10.0.0.0/8", &[1.0, 1.0, 1.0, 1.0], 2, 5, 1000),
        config("10.0.0.0/8", &[3.0, 1.0], 2, 5, 1000),
        config("172.16.0.0/12", &[2.0, 1.0, 1.0], 3, 6, 2500),
        config("192.168.0.0/16", &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 5, 1, 100),
        config("100.64.0.0/10", &[1.0; 5], 16, 2, 5000),
        config("0.0.0.0/0", &[1.0, 1.0, 1.0], 7, 64, 100_000),
        config("10.0.0.0/8", &[0.1, 5.0, 0.3], 3, 3, 300),
        config("0.0.0.0/0", &[2147483647.0, 2147483649.0], 2, 1, 1000),
        config("0.0.0.0/0", &[2147483647.0, 2147483647.0, 2.0], 1, 1, 1000),
    ]
}

fn range(node: &HierarchyNode) -> (u32, u32) {
    (u32::from(node.network), u32::from(node.broadcast))
}

/// Conservation, alignment, containment and sibling non-overlap, recursively.
fn check_tree(node: &HierarchyNode) {
    if let Some(block) = node.block {
        assert!(block.is_network(), "{} is not aligned", node.cidr);
        assert_eq!(node.network, block.addr());
        assert_eq!(node.total_addresses, block.address_count());
    }
    if node.children.is_empty() {
        return;
    }

    let total: u64 = node.children.iter().map(|c| c.total_addresses).sum();
    assert_eq!(total, node.total_addresses, "children of {} do not add up", node.id);

    let (lo, hi) = range(node);
    for (i, a) in node.children.iter().enumerate() {
        let (a_lo, a_hi) = range(a);
        assert!(lo <= a_lo && a_hi <= hi, "{} escapes {}", a.cidr, node.cidr);
        for b in &node.children[i + 1..] {
            let (b_lo, b_hi) = range(b);
            assert!(a_hi < b_lo || b_hi < a_lo, "{} overlaps {}", a.cidr, b.cidr);
        }
        check_tree(a);
    }
    assert!(node.children.iter().filter(|c| c.name == UNALLOCATED).count() <= 1);
}

#[test]
fn test_scenario_equal_quarters() {
    let result = allocate(&config("10.0.0.0/8", &[1.0; 4], 2, 5, 1000)).unwrap();

    let regions: Vec<&str> = result.regions().map(|r| r.cidr.as_str()).collect();
    assert_eq!(
        regions,
        vec!["10.0.0.0/10", "10.64.0.0/10", "10.128.0.0/10", "10.192.0.0/10"]
    );
    assert!(result.hierarchy.unallocated_child().is_none());
    assert_eq!(result.site_prefix_recommendation, 21);
    assert_eq!(result.total_subnets_per_site, 8);
    assert!(result.fits());
}

#[test]
fn test_scenario_single_region_class_c_range() {
    let result = allocate(&config("192.168.0.0/16", &[1.0], 1, 1, 1)).unwrap();

    let region = &result.hierarchy.children[0];
    assert_eq!(region.cidr, "192.168.0.0/16");
    assert_eq!(result.site_prefix_recommendation, 24);
    assert_eq!(result.total_sites_supported, 256);
    assert!((result.utilization_percentage - 0.39).abs() < 0.01);
    assert!(result.warnings.is_empty());
    assert!(
        result.recommendations.iter().any(|r| r.contains("growth")),
        "{:?}",
        result.recommendations
    );
}

#[test]
fn test_scenario_three_to_one() {
    let config = load_config("src/tests/test_data/config_scenario_three_to_one.json")
        .expect("Error reading config");
    let result = allocate(&config).unwrap();

    let children = &result.hierarchy.children;
    assert_eq!(children.len(), 3);
    assert_eq!(children[0].cidr, "10.0.0.0/9");
    assert_eq!(children[1].cidr, "10.128.0.0/10");
    assert_eq!(children[2].name, UNALLOCATED);
    assert_eq!(children[2].kind, NodeKind::Unallocated);
    assert_eq!(children[2].cidr, "10.192.0.0/10");
    assert_eq!(children[2].total_addresses, 1 << 22);

    let orion = result.region_summary("Orion").unwrap();
    assert!((orion.percentage - 200.0 / 3.0).abs() < 1e-9);
    assert_eq!(orion.address_percentage, 50.0);
}

#[test]
fn test_scenario_invalid_cidr() {
    assert!(matches!(parse_cidr("10.0.0.0/33"), Err(PlanError::InvalidFormat(_))));
    assert!(matches!(parse_cidr("10.0.0.0.0/24"), Err(PlanError::InvalidFormat(_))));
}

#[test]
fn test_scenario_too_many_regions() {
    let mut config = AllocationConfig::default();
    config.region_biases = RegionBias::themed(10);

    let err = allocate(&config).unwrap_err();
    assert!(matches!(err, PlanError::Configuration(_)), "{err}");
    assert!(err.is_user_error());
}

#[test]
fn test_tree_invariants() {
    for config in sample_configs() {
        let result = allocate(&config).unwrap_or_else(|e| panic!("{}: {e}", config.supernet));
        check_tree(&result.hierarchy);

        let (addr, prefix) = parse_cidr(&config.supernet).unwrap();
        assert_eq!(u32::from(result.hierarchy.network), addr);
        assert_eq!(result.hierarchy.total_addresses, 1u64 << (32 - prefix));

        let supported: u64 = result.regions().map(|r| r.sites_capacity()).sum();
        assert_eq!(supported, result.total_sites_supported);
        for region in result.regions() {
            let territories: u64 = region.allocated_children().map(|t| t.sites_capacity()).sum();
            assert_eq!(territories, region.sites_capacity(), "{}", region.name);
        }
        assert_eq!(result.summary.region_breakdown.len(), config.region_biases.len());
    }
}

#[test]
fn test_regions_never_exceed_their_share() {
    for config in sample_configs() {
        let result = allocate(&config).unwrap();
        let total_ratio: f64 = config.region_biases.iter().map(|b| b.ratio).sum();
        for (region, bias) in result.regions().zip(&config.region_biases) {
            let share = result.hierarchy.total_addresses as f64 * bias.ratio / total_ratio;
            assert!(
                region.total_addresses as f64 <= share + 1e-6,
                "{} got {} addresses for a share of {share}",
                region.name,
                region.total_addresses
            );
        }
    }
}

#[test]
fn test_near_power_of_two_shares_round_down() {
    let result = allocate(&config("0.0.0.0/0", &[2147483647.0, 2147483649.0], 2, 1, 1000)).unwrap();
    let cidrs: Vec<&str> = result.hierarchy.children.iter().map(|c| c.cidr.as_str()).collect();
    assert_eq!(cidrs, vec!["128.0.0.0/2", "0.0.0.0/1", "192.0.0.0/2"]);
    assert_eq!(result.hierarchy.children[2].name, UNALLOCATED);

    let result =
        allocate(&config("0.0.0.0/0", &[2147483647.0, 2147483647.0, 2.0], 1, 1, 1000)).unwrap();
    let small = result.regions().nth(2).unwrap();
    assert_eq!(small.cidr, "128.0.0.0/31");
    assert_eq!(small.sites_capacity(), 0);
}

#[test]
fn test_round_trip_sampled_addresses() {
    let mut bits: u32 = 0;
    for _ in 0..50_000 {
        let text = number_to_ip(bits);
        assert_eq!(ip_to_number(&text).unwrap(), bits);
        bits = bits.wrapping_add(85_899);
    }
    assert_eq!(number_to_ip(ip_to_number("255.255.255.255").unwrap()), "255.255.255.255");
}

#[test]
fn test_utilization_monotonic_in_sites_needed() {
    let mut previous = 0.0;
    for sites in [1, 10, 100, 999, 1000, 5000, 50_000, 100_000] {
        let result = allocate(&config("10.0.0.0/12", &[2.0, 1.0], 2, 5, sites)).unwrap();
        assert!(result.utilization_percentage >= previous);
        previous = result.utilization_percentage;
    }
    assert!(previous > 100.0, "uncapped utilization expected, got {previous}");
}

#[test]
fn test_growth_multiplier_thresholds() {
    let fired = |growth: f64| {
        let mut config = config("10.0.0.0/14", &[1.0], 1, 4, 100);
        config.growth_multiplier = growth;
        allocate(&config)
            .unwrap()
            .recommendations
            .iter()
            .any(|r| r.contains("growth"))
    };
    let growths = [1.0, 2.0, 3.0, 5.0, 10.0, 50.0];
    let results: Vec<bool> = growths.iter().map(|g| fired(*g)).collect();
    for pair in results.windows(2) {
        assert!(pair[0] || !pair[1], "{results:?}");
    }
    assert!(results[0]);
    assert!(!results[growths.len() - 1]);
}

#[test]
fn test_allocation_is_idempotent() {
    for config in sample_configs() {
        assert_eq!(allocate(&config).unwrap(), allocate(&config).unwrap());
    }
}

#[test]
fn test_overloaded_region_warnings() {
    let result = allocate(&config("10.0.0.0/16", &[1.0, 1.0], 2, 5, 40)).unwrap();
    assert_eq!(result.total_sites_supported, 32);
    assert!(result.utilization_percentage > 100.0);
    assert!(!result.fits());
    assert_eq!(result.warnings.len(), 3, "{:?}", result.warnings);
}

#[test]
fn test_example_site_from_result() {
    let result = allocate(&AllocationConfig::default()).unwrap();
    let example = example_site(&result, 24, &[23, 24]).unwrap().unwrap();
    assert_eq!(example.cidr.to_string(), "10.0.0.0/21");
    assert_eq!(example.allocated(), 5);
    assert_eq!(example.vlans[0].cidr.to_string(), "10.0.0.0/23");
    assert_eq!(example.vlans[4].cidr.to_string(), "10.0.5.0/24");
    assert!(example.warning.is_none());

    let andromeda = result.regions().nth(1).unwrap();
    let territory = andromeda.children[0].block.unwrap();
    let preview = territory_site_preview("AND", 0, territory, result.site_prefix_recommendation).unwrap();
    assert_eq!(preview.first_site_id, "AND-T1-S001");
    assert_eq!(preview.first_site.to_string(), "10.64.0.0/21");
    assert_eq!(preview.last_site_id, "AND-T1-S1024");
}
