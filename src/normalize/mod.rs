// src/normalize/mod.rs

pub mod classify;
pub mod family;
pub mod hierarchy;
pub mod numeric;
pub mod shape;

pub use family::Family;
pub use hierarchy::{build_dataset, Dataset, Entity};
pub use shape::Shape;

use serde_json::Value;
use tracing::debug;

use crate::extract::{self, RawRow};

/// Normalize one report document into its JSON shape. Pure and
/// deterministic: identical markup yields byte-identical output.
pub fn normalize_document(html: &str, family: Family, shape: Shape) -> Value {
    let rows = extract::data_rows(html);
    debug!(family = family.code(), rows = rows.len(), "extracted raw rows");
    normalize_rows(&rows, family, shape)
}

/// Same as [`normalize_document`], starting from already-extracted rows.
pub fn normalize_rows(rows: &[RawRow], family: Family, shape: Shape) -> Value {
    let config = family.config();
    let dataset = hierarchy::build_dataset(rows, config);
    shape::render(&dataset, config, shape)
}
