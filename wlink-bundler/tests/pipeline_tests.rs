//! Integration tests for the full bundling pipeline
//!
//! Tests cover:
//! - Partition of the input into disjoint, exhaustive bundles
//! - Transitive grouping through intermediate products
//! - Idempotence across repeated runs
//! - Enhanced protection threshold
//! - Main product selection and linked product ordering
//! - The duplicate / serial / keyword window / unrelated scenarios

use std::collections::HashSet;
use wlink_bundler::{bundle_products, Bundle, BundleEngine, LinkReason};
use wlink_common::config::LinkageConfig;
use wlink_common::{Product, Warranty, WarrantyType};

/// Test helper: ids of every bundle, main first
fn membership(bundles: &[Bundle]) -> Vec<Vec<String>> {
    bundles
        .iter()
        .map(|b| b.member_ids().map(str::to_string).collect())
        .collect()
}

/// Test helper: a mixed household snapshot
fn household() -> Vec<Product> {
    vec![
        Product::new("phone", "iPhone 15 Pro")
            .with_brand("Apple")
            .with_serial_number("F2LX01")
            .with_purchase_date("2024-01-05")
            .with_warranty(Warranty::new("w-phone", "manufacturer")),
        Product::new("toaster", "Toaster")
            .with_brand("Breville")
            .with_warranty(Warranty::new("w-toast-1", "manufacturer"))
            .with_warranty(Warranty::new("w-toast-2", "manufacturer")),
        Product::new("phone-dup", "iPhone 15 Pro")
            .with_brand("Apple")
            .with_warranty(Warranty::new("w-phone-dup", "store")),
        Product::new("bike", "Bicycle").with_brand("Trek"),
        Product::new("phone-ins", "Gadget Insurance")
            .with_serial_number("F2LX01")
            .with_warranty(Warranty::new("w-ins", "insurance")),
        Product::new("tv", "OLED TV")
            .with_brand("LG")
            .with_purchase_date("2024-02-01")
            .with_warranty(Warranty::new("w-tv", "manufacturer"))
            .with_warranty(Warranty::new("w-tv-odd", "accidental-damage")),
        Product::new("tv-plan", "Premium Coverage")
            .with_brand("LG")
            .with_purchase_date("2024-02-10")
            .with_warranty(Warranty::new("w-tv-ext", "extended")),
    ]
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_partition_is_disjoint_and_exhaustive() {
    let products = household();
    let bundles = bundle_products(&products);

    let mut seen = HashSet::new();
    for id in bundles.iter().flat_map(|b| b.member_ids()) {
        assert!(seen.insert(id.to_string()), "{id} appears in two bundles");
    }
    let expected: HashSet<String> = products.iter().map(|p| p.id.clone()).collect();
    assert_eq!(seen, expected);
}

#[test]
fn test_household_grouping() {
    let bundles = bundle_products(&household());

    assert_eq!(
        membership(&bundles),
        vec![
            vec!["phone", "phone-dup", "phone-ins"],
            vec!["toaster"],
            vec!["bike"],
            vec!["tv", "tv-plan"],
        ]
    );
}

#[test]
fn test_transitive_closure_through_middle_product() {
    // a-b share a serial, b-c share name+brand; a and c match no rule directly
    let products = vec![
        Product::new("a", "Camera Body").with_serial_number("SN-9"),
        Product::new("b", "Alpha 7").with_brand("Sony").with_serial_number("SN-9"),
        Product::new("c", "Alpha 7").with_brand("Sony"),
    ];

    let engine = BundleEngine::default();
    assert!(engine.detector().detect(&products[0], &products[2]).is_none());

    let bundles = engine.bundle(&products);
    assert_eq!(membership(&bundles), vec![vec!["a", "b", "c"]]);
}

#[test]
fn test_idempotent() {
    let products = household();
    let first = bundle_products(&products);
    let second = bundle_products(&products);

    assert_eq!(first, second);
}

#[test]
fn test_sharded_engine_matches_sequential() {
    let products = household();
    let sequential = BundleEngine::default().bundle(&products);
    let sharded = BundleEngine::default().with_shards(3).bundle(&products);

    assert_eq!(sequential, sharded);
}

#[test]
fn test_main_product_carries_all_warranties() {
    let bundles = bundle_products(&household());
    let phone = &bundles[0];

    assert_eq!(phone.main_product.id, "phone");
    assert_eq!(
        phone.warranties().iter().map(|w| w.id.as_str()).collect::<Vec<_>>(),
        vec!["w-phone", "w-phone-dup", "w-ins"]
    );
    assert_eq!(phone.linked_products[0].warranties.len(), 1);
    assert!(phone.has_enhanced_protection);
}

#[test]
fn test_claim_pair_for_bundle() {
    let bundles = bundle_products(&household());

    let phone = bundles[0].claim_pair();
    assert_eq!(phone.primary.map(|w| w.id), Some("w-phone".to_string()));
    assert_eq!(phone.extended.map(|w| w.id), Some("w-phone-dup".to_string()));

    let tv = bundles[3].claim_pair();
    assert_eq!(tv.primary.map(|w| w.warranty_type), Some(WarrantyType::Manufacturer));
    assert_eq!(tv.extended.map(|w| w.warranty_type), Some(WarrantyType::Extended));
}

#[test]
fn test_enhanced_protection_threshold() {
    let bundles = bundle_products(&household());

    // Two manufacturer warranties are still one type
    assert_eq!(bundles[1].main_product.id, "toaster");
    assert!(!bundles[1].has_enhanced_protection);

    // No warranties at all
    assert!(!bundles[2].has_enhanced_protection);

    // manufacturer + extended + unrecognized
    assert!(bundles[3].has_enhanced_protection);
}

#[test]
fn test_singleton_uses_own_warranties() {
    let products = vec![Product::new("solo", "Drill")
        .with_warranty(Warranty::new("w1", "manufacturer"))
        .with_warranty(Warranty::new("w2", "store"))];

    let bundles = bundle_products(&products);
    assert_eq!(bundles.len(), 1);
    assert!(bundles[0].is_singleton());
    assert!(bundles[0].has_enhanced_protection);
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_scenario_exact_duplicate() {
    let products = vec![
        Product::new("1", "iPhone 15 Pro").with_brand("Apple"),
        Product::new("2", "iPhone 15 Pro").with_brand("Apple"),
    ];

    let bundles = bundle_products(&products);
    assert_eq!(bundles.len(), 1);
    assert_eq!(bundles[0].linked_products.len(), 1);
}

#[test]
fn test_scenario_serial_match_only() {
    let products = vec![
        Product::new("1", "ThinkPad X1").with_serial_number("PF-3XY"),
        Product::new("2", "Accidental Damage Plan").with_serial_number("PF-3XY"),
    ];

    let engine = BundleEngine::default();
    assert_eq!(
        engine.detector().detect(&products[0], &products[1]),
        Some(LinkReason::SerialNumber)
    );
    assert_eq!(engine.bundle(&products).len(), 1);
}

#[test]
fn test_scenario_keyword_date_window() {
    let laptop = Product::new("1", "MacBook Pro 16")
        .with_brand("Apple")
        .with_purchase_date("2024-01-01");
    let within = Product::new("2", "AppleCare Protection Plan")
        .with_brand("Apple")
        .with_purchase_date("2024-01-20");
    let outside = Product::new("3", "AppleCare Protection Plan")
        .with_brand("Apple")
        .with_purchase_date("2024-03-01");

    let linked = bundle_products(&[laptop.clone(), within]);
    assert_eq!(linked.len(), 1);

    let apart = bundle_products(&[laptop, outside]);
    assert_eq!(apart.len(), 2);
}

#[test]
fn test_scenario_keyword_window_ignored_when_names_contain() {
    // Containment fires before the date window is consulted
    let products = vec![
        Product::new("1", "MacBook Pro")
            .with_brand("Apple")
            .with_purchase_date("2024-01-01"),
        Product::new("2", "MacBook Pro Extended Care")
            .with_brand("Apple")
            .with_purchase_date("2024-03-01"),
    ];

    let engine = BundleEngine::default();
    assert_eq!(
        engine.detector().detect(&products[0], &products[1]),
        Some(LinkReason::NameContainment)
    );
    assert!(!engine.detector().keyword_proximity_match(&products[0], &products[1]));
}

#[test]
fn test_scenario_unrelated_products() {
    let products = vec![
        Product::new("1", "Toaster").with_brand("Breville"),
        Product::new("2", "Bicycle").with_brand("Trek"),
    ];

    let bundles = bundle_products(&products);
    assert_eq!(bundles.len(), 2);
    assert!(bundles.iter().all(Bundle::is_singleton));
    assert!(bundles.iter().all(|b| !b.has_enhanced_protection));
}

#[test]
fn test_custom_window_changes_grouping() {
    let products = vec![
        Product::new("1", "Espresso Machine")
            .with_brand("Breville")
            .with_purchase_date("2024-06-01"),
        Product::new("2", "Extended Warranty")
            .with_brand("Breville")
            .with_purchase_date("2024-07-15"),
    ];

    assert_eq!(bundle_products(&products).len(), 2);

    let config = LinkageConfig {
        proximity_days: 60,
        ..LinkageConfig::default()
    };
    assert_eq!(BundleEngine::new(&config).bundle(&products).len(), 1);
}

#[test]
fn test_scenario_keyword_window_without_brands() {
    let laptop = Product::new("1", "Laptop").with_purchase_date("2024-01-01");
    let plan = Product::new("2", "Extended Warranty Plan").with_purchase_date("2024-01-10");
    let branded_plan = Product::new("3", "Extended Warranty Plan")
        .with_brand("Dell")
        .with_purchase_date("2024-01-10");

    // Neither side branded
    let bundles = bundle_products(&[laptop.clone(), plan]);
    assert_eq!(membership(&bundles), vec![vec!["1", "2"]]);

    // Brand on one side only
    let bundles = bundle_products(&[laptop, branded_plan]);
    assert_eq!(membership(&bundles), vec![vec!["1", "3"]]);
}

#[test]
fn test_scenario_keyword_window_conflicting_brands() {
    let products = vec![
        Product::new("1", "Laptop")
            .with_brand("Lenovo")
            .with_purchase_date("2024-01-01"),
        Product::new("2", "Extended Warranty Plan")
            .with_brand("Dell")
            .with_purchase_date("2024-01-10"),
    ];

    assert_eq!(bundle_products(&products).len(), 2);
}
