//! Pairwise product linkage
//!
//! Decides which product rows refer to the same purchase and records the
//! result as an undirected adjacency relation keyed by product id.

pub mod detector;
pub mod index;

pub use detector::{is_linked, LinkDetector, LinkReason};
pub use index::{Linkage, LinkageIndex};
