use std::collections::HashMap;
use std::error::Error;
use std::path::Path;

use colored::*;
use dotenv::dotenv;
use tracing::{info, span, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::clustering::{cluster_clients, KMeans, Partitioner};
use crate::config::PlannerConfig;
use crate::domain::scenario::Scenario;
use crate::domain::solution::{PlanSummary, RouteOutcome};
use crate::setup::init::load_scenario;
use crate::utils::{format_route, save_to_csv, save_to_json};

use super::assignment::assign_clusters;
use super::route_builder::build_route;

/// Loads `.env` (or `env_file`) and only then reads `RUST_LOG`, so a level
/// set in the file takes effect.
fn env_filter(env_file: Option<&Path>) -> EnvFilter {
    if let Some(path) = env_file {
        dotenv::from_path(path).ok();
    } else {
        dotenv().ok();
    }
    EnvFilter::from_default_env()
}

/// Initialize tracing and environment
fn init_tracing_and_env() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(env_filter(None))
        .with(
            fmt::layer()
                .with_span_events(fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE)
                .pretty(),
        )
        .try_init()?;

    Ok(())
}

/// Cluster, assign and route a validated scenario.
///
/// Vehicles are routed one after another in input order. Clients and
/// vehicles in `scenario` carry the final state afterwards.
pub fn plan<P>(scenario: &mut Scenario, partitioner: &P) -> PlanSummary
where
    P: Partitioner + ?Sized,
{
    let centroids = {
        let span = span!(Level::INFO, "clustering");
        let _g = span.enter();
        cluster_clients(&mut scenario.clients, scenario.vehicles.len(), partitioner)
    };

    let assignments = assign_clusters(&scenario.vehicles, &centroids);

    let mut outcomes: HashMap<String, RouteOutcome> = HashMap::new();
    for vehicle in scenario.vehicles.iter_mut() {
        let Some(&cluster_id) = assignments.get(&vehicle.id) else {
            info!(
                "Vehicle {} has no cluster and stays at warehouse {}",
                vehicle.id, vehicle.start_warehouse_id
            );
            continue;
        };
        let outcome = build_route(vehicle, cluster_id, &mut scenario.clients, &scenario.warehouses);
        outcomes.insert(vehicle.id.clone(), outcome);
    }

    let summary = PlanSummary::new(&scenario.vehicles, &assignments, &outcomes, &scenario.clients);
    if summary.is_complete() {
        info!("All {} clients serviced", scenario.clients.len());
    } else {
        warn!("Unserved clients: {:?}", summary.unserved_clients);
    }
    summary
}

/// Convenience wrapper using k-means with the given seed.
pub fn plan_with_seed(scenario: &mut Scenario, cluster_seed: u64) -> PlanSummary {
    plan(scenario, &KMeans::with_seed(cluster_seed))
}

fn print_scenario(scenario: &Scenario) {
    println!("\n{}", "--- Clients ---".bold());
    for client in &scenario.clients {
        let action = if client.is_pickup() {
            "pickup".red()
        } else {
            "delivery".green()
        };
        println!(
            "ID: {}, demand: {} ({})",
            client.id,
            client.demand.unsigned_abs(),
            action
        );
    }

    println!("\n{}", "--- Vehicles ---".bold());
    for vehicle in &scenario.vehicles {
        println!(
            "ID: {}, class: {}, capacity: {}, load: {}, start warehouse: {}",
            vehicle.id,
            vehicle.class,
            vehicle.capacity,
            vehicle.current_load(),
            vehicle.start_warehouse_id
        );
    }
}

fn print_plan(summary: &PlanSummary) {
    println!("\n{}", "--- Route summary ---".bold());
    for vp in &summary.vehicles {
        let header = format!("Route for vehicle {} ({}):", vp.vehicle_id, vp.class);
        match &vp.outcome {
            RouteOutcome::Completed => println!("\n{}", header.green()),
            RouteOutcome::Idle => println!("\n{}", header.dimmed()),
            RouteOutcome::Stranded { .. } | RouteOutcome::Fault => println!("\n{}", header.red()),
        }
        println!("{}", format_route(&vp.route));
        println!("Distance traveled: {:.2}", vp.distance);
    }

    println!(
        "\n{} {:.2}",
        "TOTAL DISTANCE FOR ALL VEHICLES:".bold(),
        summary.total_distance
    );
}

pub fn run() -> Result<(), Box<dyn Error>> {
    init_tracing_and_env()?;
    let config = PlannerConfig::from_env()?;

    let mut scenario = {
        let span = span!(Level::INFO, "setup");
        let _guard = span.enter();
        load_scenario(&config)?
    };
    info!(
        "Planning {} clients with {} vehicles from {} warehouses",
        scenario.clients.len(),
        scenario.vehicles.len(),
        scenario.warehouses.len()
    );
    print_scenario(&scenario);

    let summary = plan_with_seed(&mut scenario, config.cluster_seed);
    print_plan(&summary);

    save_to_csv(&summary, &config.plan_csv)?;
    info!("Routes written to {}", config.plan_csv.display());
    if let Some(path) = &config.plan_json {
        save_to_json(&summary, path)?;
        info!("Plan summary written to {}", path.display());
    }

    Ok(())
}
