mod geocode;
mod registry;
mod route;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use unitmap_core::RoutePoint;

#[derive(Debug, Parser)]
#[command(name = "unitmap")]
#[command(about = "Geocode, validate and route business units in Paraná")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a free-text address, or a file of addresses, to validated coordinates
    Geocode {
        /// Address to resolve (e.g. "Rua XV de Novembro, 1000, Curitiba")
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        address: Option<String>,
        /// File with one address per line, resolved in order with the
        /// configured geocode delay between lookups
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Resolve a target city by name
    City {
        /// City name (e.g. "Maringá")
        name: String,
    },
    /// Plan a route through two or more points
    Route {
        /// Route stop as `LAT,LNG`; repeat for each stop, in order
        #[arg(
            long = "point",
            value_parser = route::parse_point,
            required = true,
            allow_hyphen_values = true
        )]
        points: Vec<RoutePoint>,
        /// Skip the road-routing service and use the great-circle estimate
        #[arg(long)]
        estimate: bool,
    },
    /// Look up one business id in the company registry
    Lookup {
        /// CNPJ, formatted or digits only
        id: String,
    },
    /// Import units from a file with one CNPJ per line
    Import {
        /// Path to the id list
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = unitmap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Geocode { address, file }) => match (address, file) {
            (_, Some(file)) => geocode::run_geocode_file(&config, &file).await?,
            (Some(address), None) => geocode::run_geocode(&config, &address).await?,
            (None, None) => anyhow::bail!("an address or --file is required"),
        },
        Some(Commands::City { name }) => geocode::run_city(&config, &name).await?,
        Some(Commands::Route { points, estimate }) => {
            route::run_route(&config, &points, estimate).await?;
        }
        Some(Commands::Lookup { id }) => registry::run_lookup(&config, &id).await?,
        Some(Commands::Import { file }) => registry::run_import(&config, &file).await?,
        None => println!("no command given; run `unitmap --help`"),
    }

    Ok(())
}

/// Print `value` as pretty JSON on stdout.
fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests;
