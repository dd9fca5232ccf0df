//! Delivery Planner - exact route optimization from the command line
//!
//! Reads delivery points from a JSON file, plans the shortest route and
//! prints the result as JSON on stdout. Logs go to stderr and a daily file.

mod cli;
mod report;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use delivery_planner::config::Config;
use delivery_planner::services::planner::{PlannerSettings, RoutePlanner};
use delivery_planner::services::ranking::write_ranks;
use delivery_planner::services::routing::{
    create_distance_provider, DistanceProvider, FixtureProvider,
};
use delivery_planner::types::{DeliveryPoint, FuelSettings, Measure, PlanRequest};

use cli::{Cli, Command, PlanArgs};
use report::PlanReport;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs directory - use LOGS_DIR env var or default to ./logs
    let logs_dir = std::env::var("LOGS_DIR").unwrap_or_else(|_| "./logs".to_string());
    std::fs::create_dir_all(&logs_dir).ok();

    // File appender for persistent logs (daily rotation)
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &logs_dir, "planner.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // stderr keeps stdout clean for the JSON report
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,delivery_planner=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    let config = Config::from_env()?;
    info!("Configuration loaded");

    let result = match cli.command {
        Command::Plan(args) => run_plan(args, &config).await,
        Command::CheckConfig => {
            println!("{:#?}", RedactedConfig(&config));
            Ok(())
        }
    };

    if let Err(e) = &result {
        error!("Planning failed: {:#}", e);
    }
    result
}

async fn run_plan(args: PlanArgs, config: &Config) -> Result<()> {
    let mut points: Vec<DeliveryPoint> = read_json(&args.points)?;
    info!("Loaded {} delivery points from {}", points.len(), args.points.display());

    let provider: Arc<dyn DistanceProvider> = match &args.matrix {
        Some(path) => {
            let rows: Vec<Vec<Measure>> = read_json(path)?;
            Arc::new(FixtureProvider::from_km(&rows))
        }
        None => create_distance_provider(config)?,
    };

    let settings = PlannerSettings::from(config);
    let fuel = FuelSettings {
        efficiency_km_per_liter: args.efficiency.unwrap_or(settings.fuel.efficiency_km_per_liter),
        price_per_liter: args.fuel_price.unwrap_or(settings.fuel.price_per_liter),
    };
    let planner = RoutePlanner::new(provider, settings);

    let request = PlanRequest {
        origin: args.origin,
        points: points.clone(),
        destination: args.destination,
        fuel: Some(fuel),
    };

    let plan = planner.plan(&request).await.context("Route planning failed")?;
    if !plan.is_feasible() {
        info!("No route found that reaches every point");
    }

    let report = PlanReport::new(planner.provider_name(), &plan, &points);
    println!("{}", serde_json::to_string_pretty(&report)?);

    if let Some(path) = &args.ranked_output {
        // Ranks are only written when a route was produced
        if !plan.route.is_empty() {
            write_ranks(&mut points, &plan.ranks);
        }
        let json = serde_json::to_string_pretty(&points)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write ranked points to {}", path.display()))?;
        info!("Wrote ranked points to {}", path.display());
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Debug view of the configuration without the API key
struct RedactedConfig<'a>(&'a Config);

impl std::fmt::Debug for RedactedConfig<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let config = self.0;
        f.debug_struct("Config")
            .field("google_maps_api_key", &config.google_maps_api_key.as_ref().map(|_| "<set>"))
            .field("distance_matrix_url", &config.distance_matrix_url)
            .field("provider_timeout_seconds", &config.provider_timeout_seconds)
            .field("max_exact_stops", &config.max_exact_stops)
            .field("vehicle_efficiency_km_per_liter", &config.vehicle_efficiency_km_per_liter)
            .field("fuel_price_per_liter", &config.fuel_price_per_liter)
            .finish()
    }
}
