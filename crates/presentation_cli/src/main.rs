//! Footpath CLI
//!
//! Terminal front end for the route pipeline: geocodes two addresses,
//! fetches a walking route, and drives the headless map surface so the
//! whole pipeline runs end-to-end without a GPU map engine.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use application::services::{LocationTracker, MapRenderer, RendererConfig, RoutePlanner};
use clap::{Parser, Subcommand};
use infrastructure::adapters::{
    DirectionsAdapter, FixedPositionSource, GeocodingAdapter, HeadlessMapSurface,
};
use infrastructure::config::AppConfig;
use integration_directions::MapboxDirectionsClient;
use integration_geocoding::{GeocodingClient, NominatimClient};
use secrecy::SecretString;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Footpath - walking route planner
#[derive(Parser)]
#[command(name = "footpath")]
#[command(author, version, about = "Walking route planner", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a walking route between two addresses
    Route {
        /// Start address
        start: String,

        /// Destination address
        end: String,

        /// Mapbox access token (overrides the configuration file)
        #[arg(long, env = "MAPBOX_ACCESS_TOKEN")]
        access_token: Option<String>,

        /// Print the route steps as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Resolve a single address to coordinates
    Geocode {
        /// Address to resolve
        address: String,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter_from_verbosity(cli.verbose)));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::load().context("loading configuration")?;

    match cli.command {
        Commands::Route {
            start,
            end,
            access_token,
            json,
        } => run_route(config, &start, &end, access_token, json).await,
        Commands::Geocode { address } => run_geocode(&config, &address).await,
    }
}

/// Wire the full pipeline and plan one route
async fn run_route(
    mut config: AppConfig,
    start: &str,
    end: &str,
    access_token: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    if let Some(token) = access_token {
        config.directions.access_token = Some(SecretString::from(token));
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: {e}"))?;

    let geocoding = NominatimClient::new(&config.geocoding).context("geocoding client")?;
    let directions =
        MapboxDirectionsClient::new(&config.directions).context("directions client")?;

    let planner = RoutePlanner::new(
        Arc::new(GeocodingAdapter::new(geocoding)),
        Arc::new(DirectionsAdapter::new(directions)),
    );

    // One app-wide position subscription, seeded from the configured
    // fallback location when there is no real position service
    let tracker = LocationTracker::new();
    if let Some(fallback) = config.default_location {
        let location = fallback.to_location().context("default_location")?;
        let mut updates = tracker.subscribe();
        tracker
            .start(Arc::new(FixedPositionSource::new(location)))
            .context("starting location tracker")?;
        // Give the seed fix a moment to arrive; rendering works without it
        let _ = tokio::time::timeout(Duration::from_millis(100), updates.changed()).await;
    }

    planner.calculate_route(start, end).await;
    let snapshot = planner.snapshot();

    let surface = Arc::new(HeadlessMapSurface::new());
    let renderer = MapRenderer::new(surface, RendererConfig::default());
    renderer
        .render(&snapshot.route, tracker.last_known().as_ref())
        .context("rendering route")?;

    tracker.stop();

    if let Some(error) = snapshot.last_error {
        anyhow::bail!("route calculation failed: {error}");
    }

    let steps = snapshot.route.steps();
    if steps.is_empty() {
        println!("No route found from '{start}' to '{end}'.");
        return Ok(());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(steps)?);
        return Ok(());
    }

    println!("Walking route from '{start}' to '{end}' ({} steps):", steps.len());
    for (index, step) in steps.iter().enumerate() {
        match step.maneuver.coordinate() {
            Some(location) => {
                println!("  {:>2}. {}  [{location}]", index + 1, step.maneuver.instruction);
            }
            None => println!("  {:>2}. {}", index + 1, step.maneuver.instruction),
        }
    }

    let anchors: Vec<_> = steps
        .iter()
        .filter_map(|s| s.maneuver.coordinate())
        .collect();
    if let (Some(first), Some(last)) = (anchors.first(), anchors.last()) {
        println!(
            "Route spans {:.2} km between first and last maneuver.",
            first.distance_km(last)
        );
    }

    debug!("Route rendered to the headless map surface");
    Ok(())
}

/// Resolve one address and print the result
async fn run_geocode(config: &AppConfig, address: &str) -> anyhow::Result<()> {
    config
        .geocoding
        .validate()
        .map_err(|e| anyhow::anyhow!("invalid configuration: geocoding: {e}"))?;

    let client = NominatimClient::new(&config.geocoding).context("geocoding client")?;
    let place = client
        .geocode(address)
        .await
        .with_context(|| format!("resolving '{address}'"))?;

    println!("{}", place.display_name);
    println!("{}", place.location);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_filters() {
        assert_eq!(log_filter_from_verbosity(0), "warn");
        assert_eq!(log_filter_from_verbosity(1), "info");
        assert_eq!(log_filter_from_verbosity(2), "debug");
        assert_eq!(log_filter_from_verbosity(9), "trace");
    }

    #[test]
    fn cli_parses_route_command() {
        let cli = Cli::parse_from([
            "footpath",
            "-v",
            "route",
            "10 Downing St",
            "Big Ben",
            "--access-token",
            "pk.test",
        ]);
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Route {
                start,
                end,
                access_token,
                json,
            } => {
                assert_eq!(start, "10 Downing St");
                assert_eq!(end, "Big Ben");
                assert_eq!(access_token.as_deref(), Some("pk.test"));
                assert!(!json);
            }
            Commands::Geocode { .. } => unreachable!("expected the route command"),
        }
    }

    #[test]
    fn cli_parses_geocode_command() {
        let cli = Cli::parse_from(["footpath", "geocode", "Big Ben"]);
        match cli.command {
            Commands::Geocode { address } => assert_eq!(address, "Big Ben"),
            Commands::Route { .. } => unreachable!("expected the geocode command"),
        }
    }
}
