use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Depot where vehicles reload or unload cargo. Fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: String,
    pub point: Point,
}

impl Warehouse {
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            point: Point::new(x, y),
        }
    }
}

/// A client with signed demand: positive is a delivery, negative a pickup.
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    pub id: String,
    pub point: Point,
    pub demand: i64,
    pub(crate) serviced: bool,
    pub(crate) cluster: Option<usize>,
}

impl Client {
    pub fn new(id: impl Into<String>, x: f64, y: f64, demand: i64) -> Self {
        Self {
            id: id.into(),
            point: Point::new(x, y),
            demand,
            serviced: false,
            cluster: None,
        }
    }

    pub fn serviced(&self) -> bool {
        self.serviced
    }

    pub fn cluster(&self) -> Option<usize> {
        self.cluster
    }

    pub fn is_pickup(&self) -> bool {
        self.demand < 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
    Green,
    Blue,
    Red,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 3] = [VehicleClass::Green, VehicleClass::Blue, VehicleClass::Red];

    pub fn default_capacity(&self) -> u64 {
        match self {
            VehicleClass::Green => 1000,
            VehicleClass::Blue => 1500,
            VehicleClass::Red => 2000,
        }
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VehicleClass::Green => "green",
            VehicleClass::Blue => "blue",
            VehicleClass::Red => "red",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StopKind {
    Depot,
    Client,
}

/// One entry of a vehicle route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: String,
    pub kind: StopKind,
    pub point: Point,
}

impl Stop {
    pub fn depot(warehouse: &Warehouse) -> Self {
        Self {
            id: warehouse.id.clone(),
            kind: StopKind::Depot,
            point: warehouse.point,
        }
    }

    pub fn client(client: &Client) -> Self {
        Self {
            id: client.id.clone(),
            kind: StopKind::Client,
            point: client.point,
        }
    }

    pub fn is_depot(&self) -> bool {
        self.kind == StopKind::Depot
    }
}

/// What a vehicle does with its hold when it diverts to a depot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepotAction {
    PickUpCargo,
    DropOffCargo,
}

impl fmt::Display for DepotAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepotAction::PickUpCargo => f.write_str("pick up cargo"),
            DepotAction::DropOffCargo => f.write_str("drop off cargo"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum RouteEvent {
    Serviced {
        client: String,
        demand: i64,
        load_after: u64,
    },
    DepotVisit {
        warehouse: String,
        action: DepotAction,
        load_after: u64,
    },
    Returned {
        warehouse: String,
    },
}

/// A capacity-constrained vehicle. Route, load and position are owned by the
/// vehicle and only the route builder moves them.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: String,
    pub class: VehicleClass,
    pub capacity: u64,
    pub start_warehouse_id: String,
    pub(crate) current_load: u64,
    pub(crate) location: Point,
    pub(crate) route: Vec<Stop>,
    pub(crate) distance_traveled: f64,
    pub(crate) events: Vec<RouteEvent>,
}

impl Vehicle {
    pub fn new(
        id: impl Into<String>,
        class: VehicleClass,
        capacity: u64,
        initial_load: u64,
        start: &Warehouse,
    ) -> Self {
        Self {
            id: id.into(),
            class,
            capacity,
            start_warehouse_id: start.id.clone(),
            current_load: initial_load,
            location: start.point,
            route: vec![Stop::depot(start)],
            distance_traveled: 0.0,
            events: vec![],
        }
    }

    pub fn current_load(&self) -> u64 {
        self.current_load
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn route(&self) -> &[Stop] {
        &self.route
    }

    pub fn distance_traveled(&self) -> f64 {
        self.distance_traveled
    }

    pub fn events(&self) -> &[RouteEvent] {
        &self.events
    }

    pub fn route_ids(&self) -> Vec<String> {
        self.route.iter().map(|s| s.id.clone()).collect()
    }
}
