// src/normalize/family.rs

use std::fmt;
use std::str::FromStr;

use crate::config;
use crate::error::ScrapeError;

use super::classify::{FlatDetector, MarkerDetector, ParentDetector, UppercaseDetector};

/// One report family published by VitiBrasil. Each has its own column
/// layout, parent-detection convention, ignore list and output key names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Production,
    Processing,
    Commercialization,
    Import,
    Export,
}

/// API codes accepted by [`Family::from_str`], in display order.
pub static VALID_CODES: &[&str] = &[
    "producao",
    "processamento",
    "comercializacao",
    "importacao",
    "exportacao",
];

impl Family {
    pub fn all() -> &'static [Family] {
        &[
            Family::Production,
            Family::Processing,
            Family::Commercialization,
            Family::Import,
            Family::Export,
        ]
    }

    pub fn code(&self) -> &'static str {
        match self {
            Family::Production => "producao",
            Family::Processing => "processamento",
            Family::Commercialization => "comercializacao",
            Family::Import => "importacao",
            Family::Export => "exportacao",
        }
    }

    /// `opcao` query parameter on the report page.
    pub fn option_code(&self) -> &'static str {
        match self {
            Family::Production => "opt_02",
            Family::Processing => "opt_03",
            Family::Commercialization => "opt_04",
            Family::Import => "opt_05",
            Family::Export => "opt_06",
        }
    }

    /// `subopcao` used when the caller does not pass one. Production and
    /// commercialization pages have no sub-reports.
    pub fn default_suboption(&self) -> Option<&'static str> {
        match self {
            Family::Production | Family::Commercialization => None,
            Family::Processing => Some("subopt_03"),
            Family::Import => Some("subopt_01"),
            Family::Export => Some("subopt_03"),
        }
    }

    pub fn config(&self) -> &'static FamilyConfig {
        match self {
            Family::Production => &PRODUCTION,
            Family::Processing => &PROCESSING,
            Family::Commercialization => &COMMERCIALIZATION,
            Family::Import => &IMPORT,
            Family::Export => &EXPORT,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Family {
    type Err = ScrapeError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code.trim().to_lowercase().as_str() {
            "producao" => Ok(Family::Production),
            "processamento" => Ok(Family::Processing),
            "comercializacao" => Ok(Family::Commercialization),
            "importacao" => Ok(Family::Import),
            "exportacao" => Ok(Family::Export),
            _ => Err(ScrapeError::UnknownFamily {
                code: code.to_string(),
                valid: VALID_CODES.to_vec(),
            }),
        }
    }
}

/// Everything the engine needs to know about one family's tables: column
/// semantics, how categories are marked, what to throw away, and the key
/// names its JSON output uses.
pub struct FamilyConfig {
    pub family: Family,
    /// First-cell labels of column-header rows (sub-tables repeat them).
    pub header_labels: &'static [&'static str],
    /// Public label of the name column in hierarchical child entries.
    pub key_label: &'static str,
    /// Three-column families carry a currency value in the third cell.
    pub has_value: bool,
    /// Key under which a child's secondary text column is emitted, if the
    /// family has one (processing method, commercialization destination).
    pub detail_key: Option<&'static str>,
    /// Commercialization quantities mix footnote characters into the
    /// digits; use the digit-stripping parser instead of the locale one.
    pub digits_only_quantity: bool,
    pub ignored: &'static [&'static str],
    /// Whether the family has a category/subcategory structure at all.
    /// Country families are flat lists.
    pub nested: bool,
    /// Root key of the hierarchical shape.
    pub hierarchy_root: &'static str,
    /// Key of a parent's child array in the hierarchical shape.
    pub children_key: &'static str,
    /// Quantity key in the hierarchical shape (processing calls it volume).
    pub quantity_key: &'static str,
    pub detector: &'static dyn ParentDetector,
}

impl FamilyConfig {
    /// Rows with fewer cells than this are structural noise, not data.
    pub fn min_columns(&self) -> usize {
        if self.has_value {
            3
        } else {
            2
        }
    }
}

static MARKER: MarkerDetector = MarkerDetector;
static UPPERCASE: UppercaseDetector = UppercaseDetector;
static FLAT: FlatDetector = FlatDetector;

static PRODUCTION: FamilyConfig = FamilyConfig {
    family: Family::Production,
    header_labels: &["Produto"],
    key_label: "produto",
    has_value: false,
    detail_key: None,
    digits_only_quantity: false,
    ignored: config::IGNORED_PRODUCTS,
    nested: true,
    hierarchy_root: "produtos",
    children_key: "subitem",
    quantity_key: "quantidade",
    detector: &MARKER,
};

static PROCESSING: FamilyConfig = FamilyConfig {
    family: Family::Processing,
    header_labels: &["Processo", "Cultivar"],
    key_label: "processo",
    has_value: false,
    detail_key: Some("metodo"),
    digits_only_quantity: false,
    ignored: config::IGNORED_PROCESSES,
    nested: true,
    hierarchy_root: "processos",
    children_key: "subprocessos",
    quantity_key: "volume",
    detector: &MARKER,
};

static COMMERCIALIZATION: FamilyConfig = FamilyConfig {
    family: Family::Commercialization,
    header_labels: &["Produto"],
    key_label: "produto",
    has_value: false,
    detail_key: Some("destino"),
    digits_only_quantity: true,
    ignored: config::IGNORED_PRODUCTS,
    nested: true,
    hierarchy_root: "produtos",
    children_key: "destinos",
    quantity_key: "quantidade",
    detector: &UPPERCASE,
};

static IMPORT: FamilyConfig = FamilyConfig {
    family: Family::Import,
    header_labels: &["País", "Países"],
    key_label: "pais",
    has_value: true,
    detail_key: None,
    digits_only_quantity: false,
    ignored: config::IGNORED_COUNTRIES,
    nested: false,
    hierarchy_root: "produtos",
    children_key: "subitem",
    quantity_key: "quantidade",
    detector: &FLAT,
};

static EXPORT: FamilyConfig = FamilyConfig {
    family: Family::Export,
    header_labels: &["País", "Países"],
    key_label: "pais",
    has_value: true,
    detail_key: None,
    digits_only_quantity: false,
    ignored: config::IGNORED_COUNTRIES,
    nested: false,
    hierarchy_root: "produtos",
    children_key: "subitem",
    quantity_key: "quantidade",
    detector: &FLAT,
};
