//! Protection classifier
//!
//! Stateless helpers over a bundle's warranty records: merge them, decide
//! whether coverage is "enhanced" (more than one distinct warranty type), and
//! rank them into the primary/extended pair a claim should start from.

use serde::Serialize;
use std::collections::HashSet;
use wlink_common::{Product, Warranty};

/// Highest and second-highest priority warranties
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarrantyPair {
    pub primary: Option<Warranty>,
    pub extended: Option<Warranty>,
}

/// Concatenate warranties: main product first, then each linked product
///
/// Order within each product is preserved. Takes the *source* products; a
/// built [`crate::Bundle`] already carries the merged list on its main product.
pub fn merge_warranties<'a, I>(main: &Product, linked: I) -> Vec<Warranty>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut merged = main.warranties.clone();
    for product in linked {
        merged.extend(product.warranties.iter().cloned());
    }
    merged
}

/// True iff the records span more than one distinct warranty type
pub fn has_enhanced_protection(warranties: &[Warranty]) -> bool {
    if warranties.len() < 2 {
        return false;
    }

    let distinct: HashSet<&str> = warranties
        .iter()
        .map(|w| w.warranty_type.as_str())
        .collect();
    distinct.len() > 1
}

/// Rank a copy of `warranties` by type priority and take the top two
///
/// manufacturer, then store, extended, insurance, then unrecognized types.
/// Ties keep their input order.
pub fn primary_extended_pair(warranties: &[Warranty]) -> WarrantyPair {
    let mut ranked = warranties.to_vec();
    ranked.sort_by_key(|w| w.warranty_type.priority());

    let mut ranked = ranked.into_iter();
    WarrantyPair {
        primary: ranked.next(),
        extended: ranked.next(),
    }
}
