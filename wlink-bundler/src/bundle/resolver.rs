//! Bundle resolver - connected components over the linkage index
//!
//! Union-find over product positions. Roots always hold the smallest
//! original index of their component, so the root doubles as the bundle's
//! main product and components come out in first-appearance order.

use std::collections::HashMap;
use tracing::debug;
use wlink_common::Product;

use crate::linkage::LinkageIndex;

/// Positions (into the input slice) of one bundle's members
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleMembers {
    /// First member by original position
    pub main: usize,
    /// Remaining members, ascending
    pub linked: Vec<usize>,
}

impl BundleMembers {
    pub fn len(&self) -> usize {
        1 + self.linked.len()
    }

    pub fn is_singleton(&self) -> bool {
        self.linked.is_empty()
    }
}

/// Disjoint-set forest over `0..n`
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    /// Representative of `x` (path halving)
    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Join the sets of `a` and `b`; the smaller root wins
    pub fn union(&mut self, a: usize, b: usize) {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return;
        }
        let (keep, absorb) = if root_a < root_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        self.parent[absorb] = keep;
    }
}

/// Partition `products` into bundles using the adjacency in `index`
///
/// Every position appears in exactly one result. Adjacency entries naming ids
/// that are not in `products` are skipped. With duplicate ids, edges attach
/// to the first product carrying the id.
pub fn resolve_members(products: &[Product], index: &LinkageIndex) -> Vec<BundleMembers> {
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(products.len());
    for (pos, product) in products.iter().enumerate() {
        positions.entry(product.id.as_str()).or_insert(pos);
    }

    let mut sets = UnionFind::new(products.len());
    for (id, neighbors) in index.adjacency() {
        let Some(&from) = positions.get(id.as_str()) else {
            debug!(id = %id, "Ignoring linkage for unknown product id");
            continue;
        };
        for neighbor in neighbors {
            match positions.get(neighbor.as_str()) {
                Some(&to) => sets.union(from, to),
                None => debug!(id = %neighbor, "Ignoring linkage for unknown product id"),
            }
        }
    }

    // Roots are component minima, so a root is always visited before its members
    let mut slot_of_root: HashMap<usize, usize> = HashMap::new();
    let mut bundles: Vec<BundleMembers> = Vec::new();
    for pos in 0..products.len() {
        let root = sets.find(pos);
        match slot_of_root.get(&root) {
            Some(&slot) => bundles[slot].linked.push(pos),
            None => {
                slot_of_root.insert(root, bundles.len());
                bundles.push(BundleMembers {
                    main: pos,
                    linked: Vec::new(),
                });
            }
        }
    }

    debug!(
        products = products.len(),
        bundles = bundles.len(),
        "Resolved bundle membership"
    );
    bundles
}
