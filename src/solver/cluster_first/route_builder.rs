use tracing::{debug, error, info, span, warn, Level};

use crate::config::constant::{MAX_IDLE_DIVERSIONS, UNLOAD_THRESHOLD};
use crate::domain::solution::RouteOutcome;
use crate::domain::types::{Client, DepotAction, RouteEvent, Stop, Vehicle, Warehouse};
use crate::evaluation::distance::{distance, nearest_warehouse};
use crate::evaluation::feasibility::can_service;

#[derive(Debug, Clone, Copy, PartialEq)]
enum RouteState {
    Seeking,
    Visiting(usize),
    DepotDiversion,
    Done,
}

/// Nearest feasible unserviced client in the cluster, first one on ties.
fn seek(vehicle: &Vehicle, members: &[usize], clients: &[Client]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for &idx in members {
        let client = &clients[idx];
        if client.serviced || !can_service(vehicle, client) {
            continue;
        }
        let d = distance(&vehicle.location, &client.point);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((idx, d)),
        }
    }
    best.map(|(idx, _)| idx)
}

fn has_unserviced(members: &[usize], clients: &[Client]) -> bool {
    members.iter().any(|&idx| !clients[idx].serviced)
}

fn visit(vehicle: &mut Vehicle, client: &mut Client) {
    vehicle.distance_traveled += distance(&vehicle.location, &client.point);
    vehicle.location = client.point;

    let magnitude = client.demand.unsigned_abs();
    // Only feasible clients get here, so neither branch leaves [0, capacity].
    vehicle.current_load = if client.demand >= 0 {
        vehicle.current_load.saturating_sub(magnitude)
    } else {
        vehicle.current_load.saturating_add(magnitude)
    };

    vehicle.route.push(Stop::client(client));
    client.serviced = true;
    vehicle.events.push(RouteEvent::Serviced {
        client: client.id.clone(),
        demand: client.demand,
        load_after: vehicle.current_load,
    });

    let action = if client.is_pickup() { "picked up" } else { "delivered" };
    info!(
        "Vehicle {} ({}) serviced client {} ({} {} units). Current load: {}/{}",
        vehicle.id, vehicle.class, client.id, action, magnitude, vehicle.current_load, vehicle.capacity
    );
}

fn move_to_warehouse(vehicle: &mut Vehicle, warehouse: &Warehouse, leg: f64) {
    vehicle.distance_traveled += leg;
    vehicle.location = warehouse.point;
    vehicle.route.push(Stop::depot(warehouse));
}

/// Drop everything when the hold is above the threshold, otherwise fill up.
pub fn depot_action(vehicle: &Vehicle) -> DepotAction {
    if vehicle.current_load as f64 > vehicle.capacity as f64 * UNLOAD_THRESHOLD {
        DepotAction::DropOffCargo
    } else {
        DepotAction::PickUpCargo
    }
}

fn divert_to_depot(vehicle: &mut Vehicle, warehouses: &[Warehouse]) -> bool {
    let Some((warehouse, leg)) = nearest_warehouse(&vehicle.location, warehouses) else {
        return false;
    };

    let action = depot_action(vehicle);
    move_to_warehouse(vehicle, warehouse, leg);
    vehicle.current_load = match action {
        DepotAction::DropOffCargo => 0,
        DepotAction::PickUpCargo => vehicle.capacity,
    };
    vehicle.events.push(RouteEvent::DepotVisit {
        warehouse: warehouse.id.clone(),
        action,
        load_after: vehicle.current_load,
    });

    info!(
        "Vehicle {} ({}) cannot service any client, heading to warehouse {}. Action: {}. New load: {}/{}",
        vehicle.id, vehicle.class, warehouse.id, action, vehicle.current_load, vehicle.capacity
    );
    true
}

/// Closing leg to the nearest depot.
fn return_to_depot(vehicle: &mut Vehicle, warehouses: &[Warehouse]) {
    if let Some((warehouse, leg)) = nearest_warehouse(&vehicle.location, warehouses) {
        move_to_warehouse(vehicle, warehouse, leg);
        vehicle.events.push(RouteEvent::Returned {
            warehouse: warehouse.id.clone(),
        });
        debug!("Vehicle {} returns to warehouse {}", vehicle.id, warehouse.id);
    }
}

/// Greedy route construction for one vehicle inside its cluster.
///
/// Repeatedly visits the nearest client it can currently service, diverting
/// to the nearest depot to reload or unload when nobody is feasible, and
/// closes the route with a leg back to the nearest depot.
pub fn build_route(
    vehicle: &mut Vehicle,
    cluster_id: usize,
    clients: &mut [Client],
    warehouses: &[Warehouse],
) -> RouteOutcome {
    let route_span = span!(Level::INFO, "route", vehicle = %vehicle.id, cluster = cluster_id);
    let _guard = route_span.enter();

    let members: Vec<usize> = clients
        .iter()
        .enumerate()
        .filter(|(_, c)| c.cluster == Some(cluster_id))
        .map(|(idx, _)| idx)
        .collect();
    info!(
        "Routing vehicle {} in cluster {} ({} clients)",
        vehicle.id,
        cluster_id,
        members.len()
    );

    let mut idle_diversions = 0;
    let mut outcome = RouteOutcome::Completed;
    let mut state = RouteState::Seeking;

    loop {
        state = match state {
            RouteState::Seeking => match seek(vehicle, &members, clients) {
                Some(idx) => RouteState::Visiting(idx),
                None if has_unserviced(&members, clients) => RouteState::DepotDiversion,
                None => RouteState::Done,
            },
            RouteState::Visiting(idx) => {
                visit(vehicle, &mut clients[idx]);
                idle_diversions = 0;
                RouteState::Seeking
            }
            RouteState::DepotDiversion => {
                if !has_unserviced(&members, clients) {
                    error!(
                        "Vehicle {} diverted with no unserviced clients in cluster {}",
                        vehicle.id, cluster_id
                    );
                    outcome = RouteOutcome::Fault;
                    RouteState::Done
                } else if idle_diversions >= MAX_IDLE_DIVERSIONS {
                    // Both an empty and a full hold were tried; nothing left is servable.
                    let unserved: Vec<String> = members
                        .iter()
                        .filter(|&&idx| !clients[idx].serviced)
                        .map(|&idx| clients[idx].id.clone())
                        .collect();
                    warn!(
                        "Vehicle {} cannot service {:?} with capacity {}",
                        vehicle.id, unserved, vehicle.capacity
                    );
                    outcome = RouteOutcome::Stranded { unserved };
                    RouteState::Done
                } else if divert_to_depot(vehicle, warehouses) {
                    idle_diversions += 1;
                    RouteState::Seeking
                } else {
                    error!("Vehicle {} has no warehouse to divert to", vehicle.id);
                    outcome = RouteOutcome::Fault;
                    RouteState::Done
                }
            }
            RouteState::Done => break,
        };
    }

    return_to_depot(vehicle, warehouses);
    outcome
}
