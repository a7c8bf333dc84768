use cluster_vrp::clustering::{Partition, Partitioner};
use cluster_vrp::domain::scenario::Scenario;
use cluster_vrp::domain::solution::RouteOutcome;
use cluster_vrp::domain::types::{Client, DepotAction, Point, RouteEvent, Vehicle, VehicleClass, Warehouse};
use cluster_vrp::evaluation::distance::{distance, route_length};
use cluster_vrp::solver::cluster_first::planner::{plan, plan_with_seed};

fn two_depots() -> Vec<Warehouse> {
    vec![Warehouse::new("M1", 0.0, 0.0), Warehouse::new("M2", 10.0, 10.0)]
}

#[test]
fn empty_vehicle_goes_to_depot_before_first_delivery() {
    let depots = two_depots();
    let mut scenario = Scenario::new(
        depots.clone(),
        vec![Client::new("K1", 1.0, 1.0, 150)],
        vec![Vehicle::new("P1", VehicleClass::Green, 1000, 0, &depots[0])],
    );

    let summary = plan_with_seed(&mut scenario, 42);
    let p1 = summary.vehicle("P1").unwrap();

    assert_eq!(p1.route, vec!["M1", "M1", "K1", "M1"]);
    assert_eq!(p1.final_load, 850);
    assert_eq!(p1.outcome, RouteOutcome::Completed);
    let leg = distance(&Point::new(0.0, 0.0), &Point::new(1.0, 1.0));
    assert!((p1.distance - 2.0 * leg).abs() < 1e-9);
    assert!((summary.total_distance - p1.distance).abs() < 1e-9);
    assert!(scenario.all_serviced());
}

#[test]
fn full_vehicle_unloads_before_pickup() {
    let depots = two_depots();
    let mut scenario = Scenario::new(
        depots.clone(),
        vec![Client::new("K1", 1.0, 1.0, -150)],
        vec![Vehicle::new("P1", VehicleClass::Green, 1000, 1000, &depots[0])],
    );

    let summary = plan_with_seed(&mut scenario, 42);
    let p1 = summary.vehicle("P1").unwrap();

    assert_eq!(p1.route, vec!["M1", "M1", "K1", "M1"]);
    assert_eq!(p1.final_load, 150);
    assert_eq!(
        p1.events[0],
        RouteEvent::DepotVisit {
            warehouse: "M1".into(),
            action: DepotAction::DropOffCargo,
            load_after: 0,
        }
    );
}

#[test]
fn no_clients_leaves_fleet_idle() {
    let depots = two_depots();
    let mut scenario = Scenario::new(
        depots.clone(),
        vec![],
        vec![Vehicle::new("P1", VehicleClass::Red, 2000, 1000, &depots[1])],
    );

    let summary = plan_with_seed(&mut scenario, 42);

    assert_eq!(summary.vehicle("P1").unwrap().route, vec!["M2"]);
    assert_eq!(summary.total_distance, 0.0);
    assert!(summary.is_complete());
}

/// Puts every client west of x = 50 in cluster 0 and the rest in cluster 1.
struct SplitAtFifty;

impl Partitioner for SplitAtFifty {
    fn partition(&self, points: &[Point], k: usize) -> Partition {
        assert_eq!(k, 2);
        let labels: Vec<usize> = points.iter().map(|p| usize::from(p.x >= 50.0)).collect();
        let mut centroids = Vec::new();
        for cluster in 0..2 {
            let members: Vec<&Point> = points
                .iter()
                .zip(&labels)
                .filter(|(_, label)| **label == cluster)
                .map(|(p, _)| p)
                .collect();
            let n = members.len() as f64;
            centroids.push(Point::new(
                members.iter().map(|p| p.x).sum::<f64>() / n,
                members.iter().map(|p| p.y).sum::<f64>() / n,
            ));
        }
        Partition { labels, centroids }
    }
}

#[test]
fn each_vehicle_stays_inside_its_cluster() {
    let depots = vec![Warehouse::new("M1", 0.0, 0.0), Warehouse::new("M2", 100.0, 0.0)];
    let mut scenario = Scenario::new(
        depots.clone(),
        vec![
            Client::new("K1", 10.0, 5.0, -120),
            Client::new("K2", 90.0, 5.0, 110),
            Client::new("K3", 20.0, 5.0, 130),
            Client::new("K4", 80.0, 5.0, -140),
        ],
        vec![
            Vehicle::new("P1", VehicleClass::Blue, 1500, 750, &depots[1]),
            Vehicle::new("P2", VehicleClass::Green, 1000, 500, &depots[0]),
        ],
    );

    let summary = plan(&mut scenario, &SplitAtFifty);

    let p1 = summary.vehicle("P1").unwrap();
    let p2 = summary.vehicle("P2").unwrap();
    assert_eq!(p1.cluster, Some(1));
    assert_eq!(p2.cluster, Some(0));
    assert_eq!(p1.route, vec!["M2", "K2", "K4", "M2"]);
    assert_eq!(p2.route, vec!["M1", "K1", "K3", "M1"]);
    for vp in &summary.vehicles {
        assert!((route_length(&vp.stops) - vp.distance).abs() < 1e-9);
    }
    assert!(scenario.all_serviced());
}

#[test]
fn unservable_client_terminates_with_stranded_outcome() {
    let depots = two_depots();
    let mut scenario = Scenario::new(
        depots.clone(),
        vec![Client::new("K1", 2.0, 2.0, 5000)],
        vec![Vehicle::new("P1", VehicleClass::Green, 1000, 0, &depots[0])],
    );

    let summary = plan_with_seed(&mut scenario, 42);
    let p1 = summary.vehicle("P1").unwrap();

    assert_eq!(
        p1.outcome,
        RouteOutcome::Stranded {
            unserved: vec!["K1".to_string()]
        }
    );
    assert_eq!(summary.unserved_clients, vec!["K1"]);
    assert_eq!(p1.route.first().map(String::as_str), Some("M1"));
    assert!(p1.stops.last().unwrap().is_depot());
}
