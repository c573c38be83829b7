use anyhow::Context;
use clap::{Parser, Subcommand};

use storemap_core::viewport::{fit_with, FitConfig};
use storemap_core::{AppConfig, GeoPoint};
use storemap_search::{Category, HttpTransport, SearchCoordinator, SearchStatus, Url};

#[derive(Debug, Parser)]
#[command(name = "storemap-cli")]
#[command(about = "Catalog search and map viewport helper")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search the catalog and print the ordered results.
    Search {
        /// Free-text search term.
        term: String,
        /// Category index: 0 = all, 1 = music, 2 = software, 3 = e-books.
        #[arg(long, default_value_t = 0)]
        category: u8,
    },
    /// Fit a viewport around one or more points.
    Fit {
        /// Points as "lat,lon" pairs.
        points: Vec<String>,
        /// Center used when no points are given.
        #[arg(long, default_value = "0,0")]
        fallback: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = storemap_core::load_app_config_from_env()?;

    match cli.command {
        Commands::Search { term, category } => run_search(&config, &term, category).await,
        Commands::Fit { points, fallback } => run_fit(&config, &points, &fallback),
    }
}

async fn run_search(config: &AppConfig, term: &str, category: u8) -> anyhow::Result<()> {
    let transport = HttpTransport::new(config.http_timeout_secs, &config.user_agent)?;
    let base = Url::parse(&config.catalog_base_url)
        .with_context(|| format!("invalid catalog base URL '{}'", config.catalog_base_url))?;
    let mut coordinator = SearchCoordinator::new(transport, base, config.result_limit);

    let Some(pending) = coordinator.search(term, Category::from_index(category)) else {
        println!("nothing to search for");
        return Ok(());
    };
    let completion = pending.wait().await;
    coordinator.apply(completion);

    let session = coordinator.session();
    match session.status {
        SearchStatus::Loaded => {
            for result in &session.results {
                println!("{:>4}  {}  ({})", result.priority, result.name, result.artist_name);
            }
        }
        SearchStatus::Empty => println!("nothing found for '{}'", session.query),
        SearchStatus::Error => anyhow::bail!("search failed, try again later"),
        SearchStatus::Idle | SearchStatus::Loading => {}
    }
    Ok(())
}

fn run_fit(config: &AppConfig, raw_points: &[String], raw_fallback: &str) -> anyhow::Result<()> {
    let points = raw_points
        .iter()
        .map(|raw| parse_point(raw))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let fallback = parse_point(raw_fallback)?;

    let fit_config = FitConfig {
        default_span_meters: config.default_span_meters,
        margin: config.fit_margin,
    };
    let region = fit_with(&points, fallback, &fit_config);
    println!(
        "center {:.6},{:.6}  span {:.6} x {:.6}",
        region.center.latitude,
        region.center.longitude,
        region.span.latitude_delta,
        region.span.longitude_delta
    );
    Ok(())
}

fn parse_point(raw: &str) -> anyhow::Result<GeoPoint> {
    let (lat, lon) = raw
        .split_once(',')
        .with_context(|| format!("point '{raw}' is not in lat,lon form"))?;
    Ok(GeoPoint::new(
        lat.trim()
            .parse()
            .with_context(|| format!("bad latitude in '{raw}'"))?,
        lon.trim()
            .parse()
            .with_context(|| format!("bad longitude in '{raw}'"))?,
    ))
}
