use anyhow::{bail, Result};
use reqwest::Client;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use vitiscraper::{
    config,
    normalize::{Family, Shape},
    report,
};

const USAGE: &str = "usage: vitiscraper <familia> [ano] [--shape flat|hierarchical] [--subopcao <code>] [--entities]
familias: producao, processamento, comercializacao, importacao, exportacao";

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // ─── 2) parse arguments ──────────────────────────────────────────
    let mut family: Option<Family> = None;
    let mut year: Option<i32> = None;
    let mut shape = Shape::Flat;
    let mut subopcao: Option<String> = None;
    let mut dump_entities = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--shape" => {
                let code = args.next().unwrap_or_default();
                shape = match Shape::parse(&code) {
                    Some(s) => s,
                    None => bail!("unknown shape {code:?}; expected flat or hierarchical"),
                };
            }
            "--subopcao" => {
                subopcao = args.next();
                if subopcao.is_none() {
                    bail!("--subopcao needs a value, e.g. subopt_03");
                }
            }
            "--entities" => dump_entities = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            positional if family.is_none() => family = Some(positional.parse()?),
            positional if year.is_none() => match positional.parse::<i32>() {
                Ok(y) => year = Some(y),
                Err(_) => bail!("invalid year {positional:?}"),
            },
            positional => bail!("unexpected argument {positional:?}\n{USAGE}"),
        }
    }

    let Some(family) = family else {
        bail!("missing report family\n{USAGE}");
    };
    let year = year.unwrap_or(config::DEFAULT_YEAR);

    // ─── 3) fetch + normalize ────────────────────────────────────────
    let client = Client::new();
    info!(%family, year, "scraping report");

    let document = if dump_entities {
        // raw entity records, before shaping; useful for eyeballing a report
        let html =
            vitiscraper::fetch::report_page(&client, year, family, subopcao.as_deref()).await?;
        let rows = vitiscraper::extract::data_rows(&html);
        let dataset = vitiscraper::normalize::build_dataset(&rows, family.config());
        serde_json::to_value(&dataset)?
    } else {
        report::normalize_report(&client, year, family, subopcao.as_deref(), shape).await?
    };

    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
