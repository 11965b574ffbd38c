//! Link Detector - same-purchase heuristic
//!
//! Compares two product rows and decides whether they record the same
//! physical purchase (e.g. a laptop row and a separately imported
//! "AppleCare" row).
//!
//! Rules are evaluated in order and the first match wins:
//! 1. Exact identity: same name and same brand (case-sensitive, both brands present)
//! 2. Serial number: both non-blank and equal
//! 3. Name containment: one name contains the other (case-insensitive)
//! 4. Keyword proximity: either name carries a coverage keyword, brands agree
//!    when both are present, purchase dates are within the configured window
//!
//! Every rule is symmetric in its two arguments, so the cascade is too. A
//! field a rule needs that is missing or unparseable makes that rule not
//! apply; nothing here can fail.

use serde::Serialize;
use std::fmt;
use wlink_common::config::{normalize_keywords, LinkageConfig};
use wlink_common::time::days_between;
use wlink_common::Product;

/// Which rule linked a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkReason {
    ExactIdentity,
    SerialNumber,
    NameContainment,
    KeywordProximity,
}

impl fmt::Display for LinkReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LinkReason::ExactIdentity => "exact identity",
            LinkReason::SerialNumber => "serial number",
            LinkReason::NameContainment => "name containment",
            LinkReason::KeywordProximity => "keyword proximity",
        };
        f.write_str(label)
    }
}

/// Pairwise link detector
#[derive(Debug, Clone, PartialEq)]
pub struct LinkDetector {
    /// Lowercase coverage keywords
    keywords: Vec<String>,
    /// Inclusive purchase date window (days)
    proximity_days: i64,
}

impl Default for LinkDetector {
    fn default() -> Self {
        Self::new(&LinkageConfig::default())
    }
}

impl LinkDetector {
    pub fn new(config: &LinkageConfig) -> Self {
        Self {
            keywords: normalize_keywords(&config.keywords),
            proximity_days: config.proximity_days,
        }
    }

    /// Return the first rule linking `a` and `b`, if any
    ///
    /// Callers never pass the same product twice.
    pub fn detect(&self, a: &Product, b: &Product) -> Option<LinkReason> {
        if exact_identity_match(a, b) {
            return Some(LinkReason::ExactIdentity);
        }
        if serial_number_match(a, b) {
            return Some(LinkReason::SerialNumber);
        }
        if name_containment_match(a, b) {
            return Some(LinkReason::NameContainment);
        }
        if self.keyword_proximity_match(a, b) {
            return Some(LinkReason::KeywordProximity);
        }
        None
    }

    pub fn is_linked(&self, a: &Product, b: &Product) -> bool {
        self.detect(a, b).is_some()
    }

    /// Rule 4: coverage keyword in either name, close purchase dates
    ///
    /// Brands only veto the link when both are present and differ.
    pub fn keyword_proximity_match(&self, a: &Product, b: &Product) -> bool {
        if !(self.has_keyword(&a.product_name) || self.has_keyword(&b.product_name)) {
            return false;
        }

        if let (Some(brand_a), Some(brand_b)) = (a.brand(), b.brand()) {
            if brand_a != brand_b {
                return false;
            }
        }

        match (a.purchase_date(), b.purchase_date()) {
            (Some(date_a), Some(date_b)) => days_between(date_a, date_b) <= self.proximity_days,
            _ => false,
        }
    }

    fn has_keyword(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.keywords.iter().any(|k| name.contains(k.as_str()))
    }
}

/// Link check with the default keyword set and 30-day window
pub fn is_linked(a: &Product, b: &Product) -> bool {
    LinkDetector::default().is_linked(a, b)
}

/// Rule 1: identical name and brand
pub fn exact_identity_match(a: &Product, b: &Product) -> bool {
    match (a.brand(), b.brand()) {
        (Some(brand_a), Some(brand_b)) => {
            a.product_name == b.product_name && brand_a == brand_b
        }
        _ => false,
    }
}

/// Rule 2: identical non-blank serial numbers
pub fn serial_number_match(a: &Product, b: &Product) -> bool {
    match (a.serial_number(), b.serial_number()) {
        (Some(serial_a), Some(serial_b)) => serial_a == serial_b,
        _ => false,
    }
}

/// Rule 3: one name contains the other, ignoring case
///
/// Blank names never match (the empty string is contained in everything).
pub fn name_containment_match(a: &Product, b: &Product) -> bool {
    if a.product_name.trim().is_empty() || b.product_name.trim().is_empty() {
        return false;
    }

    let name_a = a.product_name.to_lowercase();
    let name_b = b.product_name.to_lowercase();
    name_a.contains(&name_b) || name_b.contains(&name_a)
}
