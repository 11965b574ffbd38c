//! # WLINK Common Library
//!
//! Shared code for the WLINK warranty linkage tools including:
//! - Product and warranty records (as delivered by the storage layer)
//! - Configuration loading
//! - Calendar date helpers
//! - Common error types

pub mod config;
pub mod error;
pub mod models;
pub mod time;

pub use error::{Error, Result};
pub use models::{Product, Warranty, WarrantyType};
