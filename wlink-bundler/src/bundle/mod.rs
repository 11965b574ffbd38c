//! Bundles - product rows grouped as one purchase

pub mod resolver;

pub use resolver::{resolve_members, BundleMembers, UnionFind};

use serde::Serialize;
use wlink_common::{Product, Warranty};

use crate::protection::{has_enhanced_protection, merge_warranties, primary_extended_pair, WarrantyPair};

/// One logical purchase
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    /// Canonical product, carrying the warranties of every member
    pub main_product: Product,
    /// Other members in input order, warranties as supplied
    pub linked_products: Vec<Product>,
    /// More than one distinct warranty type across the bundle
    pub has_enhanced_protection: bool,
}

impl Bundle {
    /// Build a bundle from resolved member positions
    pub fn assemble(products: &[Product], members: &BundleMembers) -> Self {
        let main = &products[members.main];
        let linked: Vec<Product> = members
            .linked
            .iter()
            .map(|&pos| products[pos].clone())
            .collect();

        let mut main_product = main.clone();
        main_product.warranties = merge_warranties(main, &linked);
        let has_enhanced_protection = has_enhanced_protection(&main_product.warranties);

        Self {
            main_product,
            linked_products: linked,
            has_enhanced_protection,
        }
    }

    /// Merged warranties of the whole bundle
    pub fn warranties(&self) -> &[Warranty] {
        &self.main_product.warranties
    }

    /// Which warranty to claim first, and which next
    pub fn claim_pair(&self) -> WarrantyPair {
        primary_extended_pair(self.warranties())
    }

    /// Ids of all members, main first
    pub fn member_ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.main_product.id.as_str())
            .chain(self.linked_products.iter().map(|p| p.id.as_str()))
    }

    pub fn len(&self) -> usize {
        1 + self.linked_products.len()
    }

    pub fn is_singleton(&self) -> bool {
        self.linked_products.is_empty()
    }
}

/// Bundle plus its claim suggestion, as written by the CLI
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleReport {
    #[serde(flatten)]
    pub bundle: Bundle,
    pub primary_warranty: Option<Warranty>,
    pub extended_warranty: Option<Warranty>,
}

impl From<Bundle> for BundleReport {
    fn from(bundle: Bundle) -> Self {
        let WarrantyPair { primary, extended } = bundle.claim_pair();
        Self {
            bundle,
            primary_warranty: primary,
            extended_warranty: extended,
        }
    }
}
