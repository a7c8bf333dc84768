use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::config::constant::{
    CLIENT_COUNT_RANGE, DEMAND_RANGE, MAP_RANGE, NUM_WAREHOUSES, VEHICLE_COUNT_RANGE,
};
use crate::domain::scenario::Scenario;
use crate::domain::types::{Client, Vehicle, VehicleClass, Warehouse};

fn random_coordinate(rng: &mut ChaCha8Rng) -> f64 {
    rng.gen_range(MAP_RANGE.0..=MAP_RANGE.1) as f64
}

/// Depots `M1..Mn` at integer coordinates on the map
fn generate_warehouses(rng: &mut ChaCha8Rng, count: usize) -> Vec<Warehouse> {
    (0..count)
        .map(|i| {
            let x = random_coordinate(rng);
            let y = random_coordinate(rng);
            Warehouse::new(format!("M{}", i + 1), x, y)
        })
        .collect()
}

/// Clients `K1..Kn`; a fair coin decides between delivery and pickup.
fn generate_clients(rng: &mut ChaCha8Rng, count: usize) -> Vec<Client> {
    (0..count)
        .map(|i| {
            let mut demand = rng.gen_range(DEMAND_RANGE.0..=DEMAND_RANGE.1);
            if rng.gen_bool(0.5) {
                demand = -demand;
            }
            let x = random_coordinate(rng);
            let y = random_coordinate(rng);
            Client::new(format!("K{}", i + 1), x, y, demand)
        })
        .collect()
}

/// Vehicles `P1..Pn` with a random class and start depot, half loaded.
fn generate_vehicles(rng: &mut ChaCha8Rng, count: usize, warehouses: &[Warehouse]) -> Vec<Vehicle> {
    let mut vehicles = Vec::with_capacity(count);
    for i in 0..count {
        let class = *VehicleClass::ALL.choose(rng).unwrap_or(&VehicleClass::Green);
        let capacity = class.default_capacity();
        if let Some(start) = warehouses.choose(rng) {
            vehicles.push(Vehicle::new(format!("P{}", i + 1), class, capacity, capacity / 2, start));
        }
    }
    vehicles
}

/// Scenario with explicit sizes, used by the runner and by tests.
pub fn generate_scenario(seed: u64, num_clients: usize, num_vehicles: usize) -> Scenario {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let warehouses = generate_warehouses(&mut rng, NUM_WAREHOUSES);
    let clients = generate_clients(&mut rng, num_clients);
    let vehicles = generate_vehicles(&mut rng, num_vehicles, &warehouses);
    Scenario::new(warehouses, clients, vehicles)
}

/// Random client and fleet counts within the configured ranges.
pub fn generate_random_scenario(seed: u64) -> Scenario {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let num_clients = rng.gen_range(CLIENT_COUNT_RANGE.0..=CLIENT_COUNT_RANGE.1);
    let num_vehicles = rng.gen_range(VEHICLE_COUNT_RANGE.0..=VEHICLE_COUNT_RANGE.1);

    let scenario = generate_scenario(rng.gen(), num_clients, num_vehicles);
    let total_demand: i64 = scenario.clients.iter().map(|c| c.demand).sum();
    info!(
        "Generated {} warehouses, {} clients (net demand {}), {} vehicles",
        scenario.warehouses.len(),
        scenario.clients.len(),
        total_demand,
        scenario.vehicles.len()
    );
    scenario
}
