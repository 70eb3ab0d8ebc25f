// src/fetch/mod.rs

use reqwest::Client;
use tracing::info;
use url::Url;

use crate::config;
use crate::error::ScrapeError;
use crate::normalize::Family;

/// Build the report-page URL for one year/family request.
pub fn report_url(year: i32, family: Family, subopcao: Option<&str>) -> Url {
    let mut url = Url::parse(config::BASE_URL).expect("base URL should parse");
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("ano", &year.to_string());
        query.append_pair("opcao", family.option_code());
        if let Some(sub) = subopcao.or_else(|| family.default_suboption()) {
            query.append_pair("subopcao", sub);
        }
    }
    url
}

/// GET one report page. Any transport failure or non-success status maps to
/// [`ScrapeError::SourceUnavailable`]; the engine never runs on a bad fetch.
pub async fn report_page(
    client: &Client,
    year: i32,
    family: Family,
    subopcao: Option<&str>,
) -> Result<String, ScrapeError> {
    let url = report_url(year, family, subopcao);
    info!(%url, "fetching report page");

    let response = client
        .get(url.as_str())
        .timeout(config::FETCH_TIMEOUT)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|source| ScrapeError::SourceUnavailable {
            url: url.to_string(),
            source,
        })?;

    response
        .text()
        .await
        .map_err(|source| ScrapeError::SourceUnavailable {
            url: url.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_carries_year_option_and_default_suboption() {
        let url = report_url(2023, Family::Processing, None);
        assert_eq!(
            url.as_str(),
            "http://vitibrasil.cnpuv.embrapa.br/index.php?ano=2023&opcao=opt_03&subopcao=subopt_03"
        );
    }

    #[test]
    fn production_url_has_no_suboption() {
        let url = report_url(2020, Family::Production, None);
        assert_eq!(
            url.as_str(),
            "http://vitibrasil.cnpuv.embrapa.br/index.php?ano=2020&opcao=opt_02"
        );
    }

    #[test]
    fn explicit_suboption_overrides_the_default() {
        let url = report_url(2023, Family::Import, Some("subopt_05"));
        assert!(url.as_str().ends_with("opcao=opt_05&subopcao=subopt_05"));
    }
}
