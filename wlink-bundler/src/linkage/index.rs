//! Linkage index - all-pairs sweep into an adjacency map
//!
//! The detector is evaluated once per unordered pair `(i, j)`, `i < j`
//! (O(N²) comparisons; N is one user's product count). Every detected pair is
//! inserted in both directions so the adjacency map is symmetric no matter
//! who populated it.
//!
//! ## Structure
//!
//! ```text
//! HashMap<String, HashSet<String>>
//!    ↓               ↓
//!  product_id   {linked ids}
//! ```
//!
//! Products with no links have no entry.

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::debug;
use wlink_common::Product;

use super::detector::{LinkDetector, LinkReason};

/// One detected pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Linkage {
    pub a: String,
    pub b: String,
    pub reason: LinkReason,
}

/// Undirected adjacency relation over product ids
#[derive(Debug, Clone, Default)]
pub struct LinkageIndex {
    adjacency: HashMap<String, HashSet<String>>,
    linkages: Vec<Linkage>,
}

impl LinkageIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequential all-pairs sweep
    pub fn build(products: &[Product], detector: &LinkDetector) -> Self {
        let mut index = Self::new();
        for i in 0..products.len() {
            index.sweep_row(products, i, detector);
        }

        debug!(
            products = products.len(),
            linkages = index.linkages.len(),
            "Linkage sweep complete"
        );
        index
    }

    /// All-pairs sweep split by row across scoped worker threads
    ///
    /// Rows are dealt round-robin so each shard gets a similar share of the
    /// triangle. The shard indexes are unioned in shard order; the resulting
    /// adjacency equals [`LinkageIndex::build`]'s. `shards <= 1` runs inline.
    pub fn build_sharded(products: &[Product], detector: &LinkDetector, shards: usize) -> Self {
        let shards = shards.min(products.len());
        if shards <= 1 {
            return Self::build(products, detector);
        }

        let partials: Vec<LinkageIndex> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..shards)
                .map(|shard| {
                    scope.spawn(move || {
                        let mut partial = LinkageIndex::new();
                        for i in (shard..products.len()).step_by(shards) {
                            partial.sweep_row(products, i, detector);
                        }
                        partial
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(partial) => partial,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        });

        let mut index = Self::new();
        for partial in partials {
            index.merge(partial);
        }

        debug!(
            products = products.len(),
            shards,
            linkages = index.linkages.len(),
            "Sharded linkage sweep complete"
        );
        index
    }

    /// Compare row `i` against every later row
    fn sweep_row(&mut self, products: &[Product], i: usize, detector: &LinkDetector) {
        let a = &products[i];
        for b in &products[i + 1..] {
            if a.id == b.id {
                debug!(id = %a.id, "Skipping pair with duplicate product id");
                continue;
            }
            if let Some(reason) = detector.detect(a, b) {
                debug!(a = %a.id, b = %b.id, reason = %reason, "Products linked");
                self.record(&a.id, &b.id, reason);
            }
        }
    }

    fn record(&mut self, a: &str, b: &str, reason: LinkReason) {
        self.link(a, b);
        self.linkages.push(Linkage {
            a: a.to_string(),
            b: b.to_string(),
            reason,
        });
    }

    /// Insert an undirected edge (both directions). Self-links are ignored.
    pub fn link(&mut self, a: &str, b: &str) {
        if a == b {
            return;
        }
        self.adjacency
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string());
        self.adjacency
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string());
    }

    /// Set union with another index
    pub fn merge(&mut self, other: LinkageIndex) {
        for (id, neighbors) in other.adjacency {
            self.adjacency.entry(id).or_default().extend(neighbors);
        }
        self.linkages.extend(other.linkages);
    }

    pub fn neighbors(&self, id: &str) -> Option<&HashSet<String>> {
        self.adjacency.get(id)
    }

    pub fn are_linked(&self, a: &str, b: &str) -> bool {
        self.adjacency
            .get(a)
            .is_some_and(|neighbors| neighbors.contains(b))
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(HashSet::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn adjacency(&self) -> &HashMap<String, HashSet<String>> {
        &self.adjacency
    }

    /// Detected pairs with the rule that fired
    pub fn linkages(&self) -> &[Linkage] {
        &self.linkages
    }
}
