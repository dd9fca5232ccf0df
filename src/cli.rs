//! CLI argument parsing for the delivery-planner binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use delivery_planner::types::Coordinates;

#[derive(Parser)]
#[command(name = "delivery-planner", about = "Exact delivery route optimization")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Optimize the visiting order of a points file and print the plan as JSON
    Plan(PlanArgs),
    /// Print the effective configuration and exit
    CheckConfig,
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// JSON file with the delivery points (name, address, lat, lng)
    #[arg(long)]
    pub points: PathBuf,

    /// Starting location as `lat,lng`
    #[arg(long, value_parser = parse_coordinates, allow_hyphen_values = true)]
    pub origin: Coordinates,

    /// Fixed end location as `lat,lng`; omit to return to the origin
    #[arg(long, value_parser = parse_coordinates, allow_hyphen_values = true)]
    pub destination: Option<Coordinates>,

    /// Vehicle efficiency in km per liter (overrides configuration)
    #[arg(long)]
    pub efficiency: Option<f64>,

    /// Fuel price per liter (overrides configuration)
    #[arg(long)]
    pub fuel_price: Option<f64>,

    /// Use a fixed kilometer matrix (JSON rows, `null` = unreachable)
    /// instead of the configured distance provider
    #[arg(long)]
    pub matrix: Option<PathBuf>,

    /// Write the points with their new visiting ranks to this file
    #[arg(long)]
    pub ranked_output: Option<PathBuf>,
}

/// Parse `lat,lng` into coordinates
pub fn parse_coordinates(value: &str) -> Result<Coordinates, String> {
    let (lat, lng) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `lat,lng`, got {:?}", value))?;

    let lat: f64 = lat.trim().parse().map_err(|_| format!("invalid latitude {:?}", lat))?;
    let lng: f64 = lng.trim().parse().map_err(|_| format!("invalid longitude {:?}", lng))?;
    if !lat.is_finite() || !lng.is_finite() {
        return Err(format!("coordinates must be finite, got {:?}", value));
    }

    Ok(Coordinates { lat, lng })
}
