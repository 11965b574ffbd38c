//! Product snapshot input and bundle report output (JSON)

use serde::Deserialize;
use std::io::{Read, Write};
use wlink_common::{Error, Product, Result};

use crate::bundle::BundleReport;

/// Accepted snapshot shapes
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Snapshot {
    List(Vec<Product>),
    Wrapped { products: Vec<Product> },
}

/// Parse a snapshot: a JSON array of products or `{"products": [...]}`
pub fn parse_snapshot(json: &str) -> Result<Vec<Product>> {
    let snapshot: Snapshot = serde_json::from_str(json)?;
    let products = match snapshot {
        Snapshot::List(products) | Snapshot::Wrapped { products } => products,
    };

    if let Some(blank) = products.iter().find(|p| p.id.trim().is_empty()) {
        return Err(Error::InvalidInput(format!(
            "product '{}' has a blank id",
            blank.product_name
        )));
    }
    Ok(products)
}

pub fn read_snapshot<R: Read>(mut reader: R) -> Result<Vec<Product>> {
    let mut json = String::new();
    reader.read_to_string(&mut json)?;
    parse_snapshot(&json)
}

/// Write reports as a JSON array followed by a newline
pub fn write_reports<W: Write>(mut writer: W, reports: &[BundleReport], pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, reports)?;
    } else {
        serde_json::to_writer(&mut writer, reports)?;
    }
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
