// src/report.rs

use reqwest::Client;
use serde_json::Value;
use tracing::info;

use crate::error::ScrapeError;
use crate::fetch;
use crate::normalize::{self, Family, Shape};

/// Fetch one report page and normalize it into the requested shape.
/// Deterministic given identical source markup; a missing data table is a
/// valid empty result, only fetch failures surface as errors.
#[tracing::instrument(level = "info", skip(client), fields(family = %family))]
pub async fn normalize_report(
    client: &Client,
    year: i32,
    family: Family,
    subopcao: Option<&str>,
    shape: Shape,
) -> Result<Value, ScrapeError> {
    let html = fetch::report_page(client, year, family, subopcao).await?;
    let document = normalize::normalize_document(&html, family, shape);
    info!(year, "report normalized");
    Ok(document)
}
