use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use spotlight_cluster::{ClusterQuery, ClusterService};
use spotlight_core::Coordinate;
use spotlight_store::EventStoreClient;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "spotlight-cli")]
#[command(about = "Cluster located events for map display")]
struct Cli {
    #[command(flatten)]
    pass: PassArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Args)]
struct PassArgs {
    /// Clustering radius in metres (defaults to SPOTLIGHT_CLUSTER_RADIUS_M).
    #[arg(long, global = true, allow_negative_numbers = true, value_parser = parse_radius)]
    radius_m: Option<f64>,

    /// Only cluster events with this genre tag.
    #[arg(long, global = true)]
    genre: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print every cluster with its member events.
    Clusters,
    /// Print one marker per cluster.
    Markers,
    /// Print the id of the nearest cluster to a point, or null.
    Nearest {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
    },
}

fn parse_radius(raw: &str) -> Result<f64, String> {
    let radius: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if radius.is_nan() {
        return Err("radius must be a number".to_string());
    }
    Ok(radius)
}

impl PassArgs {
    fn query(&self, default_radius_m: f64) -> ClusterQuery {
        let query = ClusterQuery::new(self.radius_m.unwrap_or(default_radius_m));
        match &self.genre {
            Some(genre) => query.with_genre(genre.clone()),
            None => query,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = spotlight_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let store = EventStoreClient::from_config(&config)?;
    let service = ClusterService::new(store)
        .freshness(Duration::from_secs(config.cache_ttl_secs))
        .nearest_threshold_m(config.nearest_threshold_m);
    let query = cli.pass.query(config.cluster_radius_m);
    tracing::debug!(
        radius_m = query.radius_m,
        genre = query.genre.as_deref(),
        "running clustering pass"
    );

    let output = match cli.command {
        Commands::Clusters => {
            let clusters = service.cluster_details(&query, false).await;
            serde_json::to_string_pretty(&clusters)?
        }
        Commands::Markers => {
            let markers = service.map_markers(&query, false).await;
            serde_json::to_string_pretty(&markers)?
        }
        Commands::Nearest { lat, lng } => {
            let point = Coordinate::new(lat, lng);
            if !point.is_valid() {
                anyhow::bail!("--lat must be within [-90, 90] and --lng within [-180, 180]");
            }
            let nearest = service.nearest_cluster(&query, point).await;
            serde_json::to_string_pretty(&serde_json::json!({ "cluster_id": nearest }))?
        }
    };

    println!("{output}");
    Ok(())
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
