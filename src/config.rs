// src/config.rs

use std::time::Duration;

/// Base URL of the VitiBrasil report pages.
pub static BASE_URL: &str = "http://vitibrasil.cnpuv.embrapa.br/index.php";

/// Year queried when the caller does not supply one.
pub const DEFAULT_YEAR: i32 = 2023;

/// Upper bound for a single report-page GET.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Navigation/footer artifacts that show up as rows inside product tables.
pub static IGNORED_PRODUCTS: &[&str] = &["Dados da Vitivinicultura", "DOWNLOAD"];

/// Same artifacts, as they appear on the processing report.
pub static IGNORED_PROCESSES: &[&str] = &["Dados da Vitivinicultura", "DOWNLOAD"];

/// Same artifacts, as they appear on the country (import/export) reports.
pub static IGNORED_COUNTRIES: &[&str] = &["Dados da Vitivinicultura", "DOWNLOAD"];
