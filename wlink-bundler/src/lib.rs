//! wlink-bundler library - warranty linkage and bundling engine
//!
//! Groups product rows that describe the same physical purchase into bundles
//! and classifies their combined warranty coverage.
//!
//! Pipeline (each stage only consumes the previous one's output):
//! 1. [`linkage::detector`] - pairwise "same purchase" heuristic
//! 2. [`linkage::index`] - all-pairs sweep into a symmetric adjacency map
//! 3. [`bundle::resolver`] - connected components, main product selection
//! 4. [`protection`] - warranty merge, enhanced protection, claim ranking
//!
//! The engine performs no I/O; [`snapshot`] holds the JSON helpers used by
//! the `wlink-bundler` binary.

pub mod bundle;
pub mod engine;
pub mod linkage;
pub mod protection;
pub mod snapshot;

pub use bundle::{Bundle, BundleReport};
pub use engine::{bundle_products, summarize, BundleEngine, BundleSummary};
pub use linkage::{LinkDetector, LinkReason, LinkageIndex};
pub use protection::{has_enhanced_protection, merge_warranties, primary_extended_pair, WarrantyPair};
