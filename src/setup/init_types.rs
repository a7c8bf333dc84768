use serde::Deserialize;

use crate::domain::types::VehicleClass;

/// Row of `warehouses.csv`
#[derive(Debug, Deserialize)]
pub struct WarehouseRecord {
    pub id: String,
    pub x: f64,
    pub y: f64,
}

/// Row of `clients.csv`; negative demand is a pickup.
#[derive(Debug, Deserialize)]
pub struct ClientRecord {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub demand: i64,
}

/// Row of `vehicles.csv`. Capacity defaults to the class capacity and the
/// initial load to half of the capacity.
#[derive(Debug, Deserialize)]
pub struct VehicleRecord {
    pub id: String,
    pub class: VehicleClass,
    pub capacity: Option<u64>,
    pub start_warehouse: String,
    pub initial_load: Option<u64>,
}
