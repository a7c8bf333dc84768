use std::collections::HashSet;

use crate::config::constant::SUPPORTED_FLEET;
use crate::domain::types::{Client, Vehicle, Warehouse};
use crate::error::ScenarioError;

/// Depots, clients and fleet for one planning run.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub warehouses: Vec<Warehouse>,
    pub clients: Vec<Client>,
    pub vehicles: Vec<Vehicle>,
}

impl Scenario {
    pub fn new(warehouses: Vec<Warehouse>, clients: Vec<Client>, vehicles: Vec<Vehicle>) -> Self {
        Self {
            warehouses,
            clients,
            vehicles,
        }
    }

    /// Reject configuration errors up front so the planning core never sees them.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let (min, max) = SUPPORTED_FLEET;
        let size = self.vehicles.len();
        if size < min || size > max {
            return Err(ScenarioError::FleetSize { size, min, max });
        }
        if self.warehouses.is_empty() {
            return Err(ScenarioError::NoWarehouses);
        }

        let mut seen = HashSet::new();
        for w in &self.warehouses {
            if !w.point.is_finite() {
                return Err(ScenarioError::NonFiniteCoordinates(w.id.clone()));
            }
            if !seen.insert(w.id.as_str()) {
                return Err(ScenarioError::DuplicateId(w.id.clone()));
            }
        }
        let warehouse_ids = seen.clone();

        for c in &self.clients {
            if !c.point.is_finite() {
                return Err(ScenarioError::NonFiniteCoordinates(c.id.clone()));
            }
            if !seen.insert(c.id.as_str()) {
                return Err(ScenarioError::DuplicateId(c.id.clone()));
            }
        }

        for v in &self.vehicles {
            if !seen.insert(v.id.as_str()) {
                return Err(ScenarioError::DuplicateId(v.id.clone()));
            }
            if v.capacity == 0 {
                return Err(ScenarioError::ZeroCapacity(v.id.clone()));
            }
            if v.current_load > v.capacity {
                return Err(ScenarioError::LoadAboveCapacity {
                    id: v.id.clone(),
                    load: v.current_load,
                    capacity: v.capacity,
                });
            }
            if !warehouse_ids.contains(v.start_warehouse_id.as_str()) {
                return Err(ScenarioError::UnknownWarehouse {
                    vehicle: v.id.clone(),
                    warehouse: v.start_warehouse_id.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn all_serviced(&self) -> bool {
        self.clients.iter().all(|c| c.serviced)
    }
}
