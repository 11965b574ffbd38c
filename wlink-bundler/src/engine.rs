//! Bundle engine - full linkage pipeline over one product snapshot
//!
//! detector → linkage index → bundle resolver → protection classifier.
//! Every call starts from scratch; nothing is cached between snapshots.

use serde::Serialize;
use tracing::debug;
use wlink_common::config::LinkageConfig;
use wlink_common::Product;

use crate::bundle::{resolve_members, Bundle};
use crate::linkage::{LinkDetector, LinkageIndex};

/// Pipeline runner
#[derive(Debug, Clone, Default)]
pub struct BundleEngine {
    detector: LinkDetector,
    /// Worker threads for the pair sweep (0 or 1 = sequential)
    shards: usize,
}

impl BundleEngine {
    pub fn new(config: &LinkageConfig) -> Self {
        Self {
            detector: LinkDetector::new(config),
            shards: 0,
        }
    }

    /// Split the pair sweep across `shards` threads
    pub fn with_shards(mut self, shards: usize) -> Self {
        self.shards = shards;
        self
    }

    pub fn detector(&self) -> &LinkDetector {
        &self.detector
    }

    /// Pairwise linkage for `products`
    pub fn link(&self, products: &[Product]) -> LinkageIndex {
        if self.shards > 1 {
            LinkageIndex::build_sharded(products, &self.detector, self.shards)
        } else {
            LinkageIndex::build(products, &self.detector)
        }
    }

    /// Group `products` into bundles, in order of each main product's position
    pub fn bundle(&self, products: &[Product]) -> Vec<Bundle> {
        let index = self.link(products);
        let bundles: Vec<Bundle> = resolve_members(products, &index)
            .iter()
            .map(|members| Bundle::assemble(products, members))
            .collect();

        for bundle in bundles.iter().filter(|b| !b.is_singleton()) {
            debug!(
                main = %bundle.main_product.id,
                members = bundle.len(),
                enhanced = bundle.has_enhanced_protection,
                "Bundle resolved"
            );
        }
        bundles
    }
}

/// Bundle `products` with the default heuristics
pub fn bundle_products(products: &[Product]) -> Vec<Bundle> {
    BundleEngine::default().bundle(products)
}

/// Counts over one engine run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleSummary {
    pub products: usize,
    pub bundles: usize,
    /// Bundles with more than one member
    pub linked_bundles: usize,
    pub enhanced_bundles: usize,
}

pub fn summarize(bundles: &[Bundle]) -> BundleSummary {
    BundleSummary {
        products: bundles.iter().map(Bundle::len).sum(),
        bundles: bundles.len(),
        linked_bundles: bundles.iter().filter(|b| !b.is_singleton()).count(),
        enhanced_bundles: bundles.iter().filter(|b| b.has_enhanced_protection).count(),
    }
}
