use std::collections::HashMap;

use serde::Serialize;

use crate::domain::types::{Client, RouteEvent, Stop, Vehicle, VehicleClass};

/// How a vehicle's routing loop ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteOutcome {
    /// Every client in the cluster was serviced.
    Completed,
    /// No hold state makes the remaining clients feasible for this vehicle.
    Stranded { unserved: Vec<String> },
    /// Internal-consistency fault; the loop was stopped early.
    Fault,
    /// Vehicle had no cluster and never left its depot.
    Idle,
}

#[derive(Debug, Clone, Serialize)]
pub struct VehiclePlan {
    pub vehicle_id: String,
    pub class: VehicleClass,
    pub capacity: u64,
    pub cluster: Option<usize>,
    pub route: Vec<String>,
    pub stops: Vec<Stop>,
    pub distance: f64,
    pub final_load: u64,
    pub events: Vec<RouteEvent>,
    pub outcome: RouteOutcome,
}

/// Read-only roll-up of a finished plan.
#[derive(Debug, Clone, Serialize)]
pub struct PlanSummary {
    pub vehicles: Vec<VehiclePlan>,
    pub total_distance: f64,
    pub unserved_clients: Vec<String>,
}

impl PlanSummary {
    pub fn new(
        vehicles: &[Vehicle],
        assignments: &HashMap<String, usize>,
        outcomes: &HashMap<String, RouteOutcome>,
        clients: &[Client],
    ) -> Self {
        let plans: Vec<VehiclePlan> = vehicles
            .iter()
            .map(|v| VehiclePlan {
                vehicle_id: v.id.clone(),
                class: v.class,
                capacity: v.capacity,
                cluster: assignments.get(&v.id).copied(),
                route: v.route_ids(),
                stops: v.route.clone(),
                distance: v.distance_traveled,
                final_load: v.current_load,
                events: v.events.clone(),
                outcome: outcomes.get(&v.id).cloned().unwrap_or(RouteOutcome::Idle),
            })
            .collect();

        let total_distance = plans.iter().map(|p| p.distance).sum();
        let unserved_clients = clients
            .iter()
            .filter(|c| !c.serviced)
            .map(|c| c.id.clone())
            .collect();

        Self {
            vehicles: plans,
            total_distance,
            unserved_clients,
        }
    }

    pub fn vehicle(&self, id: &str) -> Option<&VehiclePlan> {
        self.vehicles.iter().find(|p| p.vehicle_id == id)
    }

    pub fn is_complete(&self) -> bool {
        self.unserved_clients.is_empty()
    }
}
