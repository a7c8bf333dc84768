use std::collections::HashMap;
use std::path::Path;

use csv::ReaderBuilder;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::PlannerConfig;
use crate::domain::scenario::Scenario;
use crate::domain::types::{Client, Vehicle, Warehouse};
use crate::error::{LoadError, ScenarioError};
use crate::fixtures::data_generator::generate_random_scenario;
use crate::setup::init_types::*;

/// Scenario from `SCENARIO_DIR` when set, otherwise a seeded random one.
/// Either way it is validated before being handed back.
pub fn load_scenario(config: &PlannerConfig) -> Result<Scenario, LoadError> {
    let scenario = match &config.scenario_dir {
        Some(dir) => {
            info!("Loading scenario from {}", dir.display());
            read_scenario_dir(dir)?
        }
        None => {
            info!("Generating random scenario with seed {}", config.scenario_seed);
            generate_random_scenario(config.scenario_seed)
        }
    };

    scenario.validate()?;
    Ok(scenario)
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    debug!("Read {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Reads `warehouses.csv`, `clients.csv` and `vehicles.csv` from `dir`.
pub fn read_scenario_dir(dir: &Path) -> Result<Scenario, LoadError> {
    let warehouses: Vec<Warehouse> = read_records::<WarehouseRecord>(&dir.join("warehouses.csv"))?
        .into_iter()
        .map(|r| Warehouse::new(r.id, r.x, r.y))
        .collect();

    let clients: Vec<Client> = read_records::<ClientRecord>(&dir.join("clients.csv"))?
        .into_iter()
        .map(|r| Client::new(r.id, r.x, r.y, r.demand))
        .collect();

    let by_id: HashMap<&str, &Warehouse> = warehouses.iter().map(|w| (w.id.as_str(), w)).collect();
    let mut vehicles = Vec::new();
    for r in read_records::<VehicleRecord>(&dir.join("vehicles.csv"))? {
        let start = by_id
            .get(r.start_warehouse.as_str())
            .ok_or_else(|| ScenarioError::UnknownWarehouse {
                vehicle: r.id.clone(),
                warehouse: r.start_warehouse.clone(),
            })?;
        let capacity = r.capacity.unwrap_or_else(|| r.class.default_capacity());
        let initial_load = r.initial_load.unwrap_or(capacity / 2);
        vehicles.push(Vehicle::new(r.id, r.class, capacity, initial_load, start));
    }

    Ok(Scenario::new(warehouses, clients, vehicles))
}
