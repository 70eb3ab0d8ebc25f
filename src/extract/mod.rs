// src/extract/mod.rs

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::warn;

static DATA_TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table.tb_base.tb_dados").expect("table selector should parse"));
static TABLE_ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("row selector should parse"));
static TABLE_CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("cell selector should parse"));

/// One `<tr>` of a data table: trimmed cell texts plus the class tokens of
/// the first cell, where the parent/child marker lives. Not retained past
/// classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub cells: Vec<String>,
    pub markers: Vec<String>,
}

impl RawRow {
    pub fn first_cell(&self) -> &str {
        self.cells.first().map(String::as_str).unwrap_or("")
    }

    pub fn has_marker(&self, class: &str) -> bool {
        self.markers.iter().any(|m| m == class)
    }
}

/// Enumerate every row of every data table in `html`, in document order.
///
/// A document without a matching table is a valid (empty) result, not an
/// error; the caller gets an empty dataset with a zero total.
pub fn data_rows(html: &str) -> Vec<RawRow> {
    let document = Html::parse_document(html);
    let mut rows = Vec::new();
    let mut tables = 0usize;

    for table in document.select(&DATA_TABLE) {
        tables += 1;
        for tr in table.select(&TABLE_ROW) {
            let mut cells = Vec::new();
            let mut markers = Vec::new();
            for (idx, td) in tr.select(&TABLE_CELL).enumerate() {
                if idx == 0 {
                    markers = td.value().classes().map(str::to_string).collect();
                }
                cells.push(td.text().collect::<String>().trim().to_string());
            }
            if !cells.is_empty() {
                rows.push(RawRow { cells, markers });
            }
        }
    }

    if tables == 0 {
        warn!("no tb_base tb_dados table in document");
    }
    rows
}
