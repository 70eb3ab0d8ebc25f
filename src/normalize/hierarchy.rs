// src/normalize/hierarchy.rs

use serde::Serialize;

use crate::extract::RawRow;

use super::classify::{classify, RowVerdict};
use super::family::FamilyConfig;
use super::numeric::{parse_quantity, parse_value, strip_non_digits};

/// One normalized table row: a category, a subcategory, or a country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub name: String,
    pub quantity: i64,
    /// Currency amount; present only for the three-column families.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Family-specific extra text carried on child rows (method, destination).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Name of the most recently seen parent; `None` for parents themselves
    /// and for orphan children that appeared before any parent.
    pub parent: Option<String>,
    pub is_parent: bool,
}

/// A fully normalized report: every surviving data row in document order,
/// plus the grand total isolated from the list. Exactly one total exists;
/// it defaults to zero when the source omits its `Total` row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub entities: Vec<Entity>,
    pub total: Entity,
}

fn zero_total(config: &FamilyConfig) -> Entity {
    Entity {
        name: "Total".to_string(),
        quantity: 0,
        value: config.has_value.then_some(0.0),
        detail: None,
        parent: None,
        is_parent: true,
    }
}

fn quantity_of(row: &RawRow, config: &FamilyConfig) -> i64 {
    let text = row.cells.get(1).map(String::as_str).unwrap_or("");
    if config.digits_only_quantity {
        strip_non_digits(text)
    } else {
        parse_quantity(text)
    }
}

fn value_of(row: &RawRow) -> f64 {
    parse_value(row.cells.get(2).map(String::as_str).unwrap_or(""))
}

fn detail_of(row: &RawRow, config: &FamilyConfig) -> Option<String> {
    config.detail_key?;
    row.cells
        .get(2)
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// Single left-to-right pass over the classified rows, carrying the current
/// parent as a local accumulator. `Total` rows update the total (a report
/// may repeat one per sub-table; the last wins, matching the source pages)
/// and never enter the entity list. Numeric cells are normalized at append
/// time per the family's column map.
pub fn build_dataset(rows: &[RawRow], config: &FamilyConfig) -> Dataset {
    let mut entities = Vec::new();
    let mut total = zero_total(config);
    let mut current_parent: Option<String> = None;

    for row in rows {
        if row.cells.len() < config.min_columns() {
            continue;
        }
        match classify(row, config, current_parent.as_deref()) {
            RowVerdict::Header | RowVerdict::Ignored => {}
            RowVerdict::TotalMarker => {
                total.quantity = quantity_of(row, config);
                if config.has_value {
                    total.value = Some(value_of(row));
                }
            }
            RowVerdict::Parent => {
                let name = row.first_cell().to_string();
                current_parent = Some(name.clone());
                entities.push(Entity {
                    name,
                    quantity: quantity_of(row, config),
                    value: config.has_value.then(|| value_of(row)),
                    detail: None,
                    parent: None,
                    is_parent: true,
                });
            }
            RowVerdict::Child => {
                entities.push(Entity {
                    name: row.first_cell().to_string(),
                    quantity: quantity_of(row, config),
                    value: config.has_value.then(|| value_of(row)),
                    detail: detail_of(row, config),
                    parent: current_parent.clone(),
                    is_parent: false,
                });
            }
        }
    }

    Dataset { entities, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::family::Family;

    fn row(cells: &[&str], markers: &[&str]) -> RawRow {
        RawRow {
            cells: cells.iter().map(|c| c.to_string()).collect(),
            markers: markers.iter().map(|m| m.to_string()).collect(),
        }
    }

    #[test]
    fn parents_and_children_link_through_the_scan() {
        let rows = vec![
            row(&["Produto", "Quantidade (L.)"], &[]),
            row(&["VINHO DE MESA", "195.031.611"], &["tb_item"]),
            row(&["Tinto", "162.844.214"], &["tb_subitem"]),
            row(&["Branco", "27.910.299"], &["tb_subitem"]),
            row(&["VINHO FINO DE MESA", "46.268.556"], &["tb_item"]),
            row(&["Rosado", "1.394.901"], &["tb_subitem"]),
            row(&["Total", "241.300.167"], &[]),
        ];
        let dataset = build_dataset(&rows, Family::Production.config());

        assert_eq!(dataset.entities.len(), 5);
        assert_eq!(dataset.total.quantity, 241_300_167);
        assert_eq!(dataset.entities[0].name, "VINHO DE MESA");
        assert!(dataset.entities[0].is_parent);
        assert_eq!(dataset.entities[1].parent.as_deref(), Some("VINHO DE MESA"));
        assert_eq!(dataset.entities[4].parent.as_deref(), Some("VINHO FINO DE MESA"));
    }

    #[test]
    fn total_never_enters_the_entity_list() {
        let rows = vec![
            row(&["VINHO DE MESA", "1.000.000"], &["tb_item"]),
            row(&["Total", "1.000.000"], &[]),
        ];
        let dataset = build_dataset(&rows, Family::Production.config());
        assert_eq!(dataset.entities.len(), 1);
        assert!(dataset.entities.iter().all(|e| e.name != "Total"));
        assert_eq!(dataset.total.quantity, 1_000_000);
    }

    #[test]
    fn repeated_total_rows_last_one_wins() {
        let rows = vec![
            row(&["Total", "100"], &[]),
            row(&["UVA", "50"], &["tb_item"]),
            row(&["Total", "250"], &[]),
        ];
        let dataset = build_dataset(&rows, Family::Production.config());
        assert_eq!(dataset.total.quantity, 250);
    }

    #[test]
    fn missing_total_row_defaults_to_zero() {
        let rows = vec![row(&["UVA", "50"], &["tb_item"])];
        let dataset = build_dataset(&rows, Family::Production.config());
        assert_eq!(dataset.total.quantity, 0);
        assert_eq!(dataset.total.name, "Total");

        let empty = build_dataset(&[], Family::Import.config());
        assert!(empty.entities.is_empty());
        assert_eq!(empty.total.quantity, 0);
        assert_eq!(empty.total.value, Some(0.0));
    }

    #[test]
    fn child_before_any_parent_is_an_orphan() {
        let rows = vec![
            row(&["Suco de uva", "100"], &["tb_subitem"]),
            row(&["VINHO DE MESA", "900"], &["tb_item"]),
        ];
        let dataset = build_dataset(&rows, Family::Production.config());
        assert_eq!(dataset.entities[0].parent, None);
        assert!(!dataset.entities[0].is_parent);
    }

    #[test]
    fn valued_families_parse_both_columns() {
        let rows = vec![
            row(&["País", "Quantidade (Kg)", "Valor (US$)"], &[]),
            row(&["Argentina", "1.000", "5.000,00"], &[]),
            row(&["Chile", "-", "-"], &[]),
            row(&["Total", "1.000", "5.000,00"], &[]),
        ];
        let dataset = build_dataset(&rows, Family::Export.config());
        assert_eq!(dataset.entities.len(), 2);
        assert_eq!(dataset.entities[0].quantity, 1000);
        assert_eq!(dataset.entities[0].value, Some(5000.0));
        assert_eq!(dataset.entities[1].quantity, 0);
        assert_eq!(dataset.entities[1].value, Some(0.0));
        assert_eq!(dataset.total.value, Some(5000.0));
    }

    #[test]
    fn short_rows_are_skipped_not_errors() {
        let rows = vec![
            row(&["Argentina", "1.000"], &[]), // country table needs 3 cells
            row(&["Uruguai", "500", "2.500,00"], &[]),
        ];
        let dataset = build_dataset(&rows, Family::Import.config());
        assert_eq!(dataset.entities.len(), 1);
        assert_eq!(dataset.entities[0].name, "Uruguai");
    }

    #[test]
    fn processing_detail_column_rides_on_children() {
        let rows = vec![
            row(&["TINTAS", "35.881.118", ""], &["tb_item"]),
            row(&["Bordo", "13.588.783", "Prensagem"], &["tb_subitem"]),
        ];
        let dataset = build_dataset(&rows, Family::Processing.config());
        assert_eq!(dataset.entities[0].detail, None);
        assert_eq!(dataset.entities[1].detail.as_deref(), Some("Prensagem"));
    }
}
