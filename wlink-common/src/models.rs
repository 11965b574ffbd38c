//! Product and warranty records
//!
//! These mirror the rows returned by the storage layer. Field names are
//! camelCase on the wire. Fields the engine does not interpret are kept in
//! `extra` so a snapshot round-trips through the bundler unchanged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::time::parse_calendar_date;

/// Warranty coverage type
///
/// The storage layer stores this as free text. The four known values map to
/// dedicated variants; anything else is preserved verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WarrantyType {
    Manufacturer,
    Extended,
    Store,
    Insurance,
    /// Unrecognized type, kept as supplied
    Other(String),
}

impl WarrantyType {
    /// Claim priority rank (lower is claimed first)
    ///
    /// manufacturer=1, store=2, extended=3, insurance=4, anything else=5
    pub fn priority(&self) -> u8 {
        match self {
            WarrantyType::Manufacturer => 1,
            WarrantyType::Store => 2,
            WarrantyType::Extended => 3,
            WarrantyType::Insurance => 4,
            WarrantyType::Other(_) => 5,
        }
    }

    /// Wire representation
    pub fn as_str(&self) -> &str {
        match self {
            WarrantyType::Manufacturer => "manufacturer",
            WarrantyType::Extended => "extended",
            WarrantyType::Store => "store",
            WarrantyType::Insurance => "insurance",
            WarrantyType::Other(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, WarrantyType::Other(_))
    }
}

impl From<String> for WarrantyType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "manufacturer" => WarrantyType::Manufacturer,
            "extended" => WarrantyType::Extended,
            "store" => WarrantyType::Store,
            "insurance" => WarrantyType::Insurance,
            _ => WarrantyType::Other(raw),
        }
    }
}

impl From<&str> for WarrantyType {
    fn from(raw: &str) -> Self {
        WarrantyType::from(raw.to_string())
    }
}

impl From<WarrantyType> for String {
    fn from(value: WarrantyType) -> Self {
        match value {
            WarrantyType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for WarrantyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Warranty record attached to a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warranty {
    pub id: String,
    pub warranty_type: WarrantyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage_details: Option<String>,
    /// Storage fields not interpreted by WLINK
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Warranty {
    pub fn new(id: impl Into<String>, warranty_type: impl Into<WarrantyType>) -> Self {
        Self {
            id: id.into(),
            warranty_type: warranty_type.into(),
            provider: None,
            start_date: None,
            end_date: None,
            coverage_details: None,
            extra: Map::new(),
        }
    }
}

/// Purchased product as stored by the tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub product_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    /// Raw purchase date (`YYYY-MM-DD` or RFC 3339)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
    #[serde(default)]
    pub warranties: Vec<Warranty>,
    /// Storage fields not interpreted by WLINK
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn new(id: impl Into<String>, product_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            product_name: product_name.into(),
            brand: None,
            category: None,
            serial_number: None,
            purchase_date: None,
            warranties: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_serial_number(mut self, serial: impl Into<String>) -> Self {
        self.serial_number = Some(serial.into());
        self
    }

    pub fn with_purchase_date(mut self, date: impl Into<String>) -> Self {
        self.purchase_date = Some(date.into());
        self
    }

    pub fn with_warranty(mut self, warranty: Warranty) -> Self {
        self.warranties.push(warranty);
        self
    }

    /// Brand, if present and not blank
    pub fn brand(&self) -> Option<&str> {
        non_blank(self.brand.as_deref())
    }

    /// Serial number, if present and not blank
    pub fn serial_number(&self) -> Option<&str> {
        non_blank(self.serial_number.as_deref())
    }

    /// Parsed purchase date; `None` when absent or unparseable
    pub fn purchase_date(&self) -> Option<NaiveDate> {
        self.purchase_date.as_deref().and_then(parse_calendar_date)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
