// src/normalize/classify.rs

use crate::extract::RawRow;

use super::family::FamilyConfig;

/// What a raw table row turned out to be. Classification runs before any
/// numeric parsing, so total rows never leak into the category list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowVerdict {
    Header,
    Ignored,
    TotalMarker,
    Parent,
    Child,
}

/// Strategy for deciding whether a data row opens a new category. The
/// reports are inconsistent about how they mark categories, so each family
/// picks its own detector.
pub trait ParentDetector: Sync {
    fn is_parent(&self, row: &RawRow, current_parent: Option<&str>) -> bool;
}

/// Tables that tag category cells with the `tb_item` class.
pub struct MarkerDetector;

impl ParentDetector for MarkerDetector {
    fn is_parent(&self, row: &RawRow, _current_parent: Option<&str>) -> bool {
        row.has_marker("tb_item")
    }
}

/// Tables without marker classes: category names are set in all caps, and
/// the first data row counts as a category when none has been seen yet.
pub struct UppercaseDetector;

impl ParentDetector for UppercaseDetector {
    fn is_parent(&self, row: &RawRow, current_parent: Option<&str>) -> bool {
        let name = row.first_cell();
        let has_letters = name.chars().any(|c| c.is_alphabetic());
        let all_upper = has_letters && !name.chars().any(|c| c.is_lowercase());
        all_upper || current_parent.is_none()
    }
}

/// Country tables (import/export) have no categories at all; every data
/// row is a leaf.
pub struct FlatDetector;

impl ParentDetector for FlatDetector {
    fn is_parent(&self, _row: &RawRow, _current_parent: Option<&str>) -> bool {
        false
    }
}

/// Classify one row. Check order matters: header label, ignore list, the
/// `"Total"` marker, then the family's parent detector.
pub fn classify(row: &RawRow, config: &FamilyConfig, current_parent: Option<&str>) -> RowVerdict {
    let name = row.first_cell();
    if config.header_labels.contains(&name) {
        return RowVerdict::Header;
    }
    if config.ignored.contains(&name) {
        return RowVerdict::Ignored;
    }
    if name == "Total" {
        return RowVerdict::TotalMarker;
    }
    if config.detector.is_parent(row, current_parent) {
        RowVerdict::Parent
    } else {
        RowVerdict::Child
    }
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
    fn header_label_wins_over_everything() {
        let config = Family::Production.config();
        let verdict = classify(&row(&["Produto", "Quantidade (L.)"], &[]), config, None);
        assert_eq!(verdict, RowVerdict::Header);
    }

    #[test]
    fn ignore_list_is_checked_before_total() {
        let config = Family::Production.config();
        let verdict = classify(&row(&["DOWNLOAD", "-"], &[]), config, None);
        assert_eq!(verdict, RowVerdict::Ignored);
        let verdict = classify(&row(&["Total", "1.000"], &[]), config, None);
        assert_eq!(verdict, RowVerdict::TotalMarker);
    }

    #[test]
    fn marker_detector_follows_tb_item_class() {
        let config = Family::Production.config();
        let parent = classify(&row(&["VINHO DE MESA", "1.000"], &["tb_item"]), config, None);
        assert_eq!(parent, RowVerdict::Parent);
        let child = classify(
            &row(&["Tinto", "500"], &["tb_subitem"]),
            config,
            Some("VINHO DE MESA"),
        );
        assert_eq!(child, RowVerdict::Child);
    }

    #[test]
    fn uppercase_detector_treats_caps_as_parent() {
        let config = Family::Commercialization.config();
        assert_eq!(
            classify(&row(&["VINHO FINO DE MESA", "2.000"], &[]), config, Some("X")),
            RowVerdict::Parent
        );
        assert_eq!(
            classify(&row(&["Rosado", "200"], &[]), config, Some("VINHO FINO DE MESA")),
            RowVerdict::Child
        );
    }

    #[test]
    fn uppercase_detector_promotes_first_row_without_parent() {
        let config = Family::Commercialization.config();
        assert_eq!(
            classify(&row(&["Vinho de mesa", "100"], &[]), config, None),
            RowVerdict::Parent
        );
    }

    #[test]
    fn country_rows_are_always_leaves() {
        let config = Family::Export.config();
        assert_eq!(
            classify(&row(&["Argentina", "1.000", "5.000,00"], &[]), config, None),
            RowVerdict::Child
        );
        assert_eq!(
            classify(&row(&["Países", "Quantidade (Kg)", "Valor (US$)"], &[]), config, None),
            RowVerdict::Header
        );
    }
}
