use crate::domain::types::{Client, Vehicle};

/// Whether `vehicle` can service `client` with its current hold.
///
/// Deliveries need the stock already on board; pickups need spare room.
/// An empty vehicle therefore cannot deliver until it has visited a depot.
pub fn can_service(vehicle: &Vehicle, client: &Client) -> bool {
    if client.demand > 0 {
        vehicle.current_load >= client.demand.unsigned_abs()
    } else if client.demand < 0 {
        vehicle
            .current_load
            .checked_add(client.demand.unsigned_abs())
            .is_some_and(|load| load <= vehicle.capacity)
    } else {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{VehicleClass, Warehouse};

    fn vehicle(load: u64) -> Vehicle {
        let depot = Warehouse::new("M1", 0.0, 0.0);
        Vehicle::new("P1", VehicleClass::Green, 1000, load, &depot)
    }

    #[test]
    fn delivery_needs_stock_on_board() {
        let client = Client::new("K1", 1.0, 1.0, 150);
        assert!(!can_service(&vehicle(0), &client));
        assert!(!can_service(&vehicle(149), &client));
        assert!(can_service(&vehicle(150), &client));
        assert!(can_service(&vehicle(1000), &client));
    }

    #[test]
    fn pickup_needs_spare_room() {
        let client = Client::new("K1", 1.0, 1.0, -150);
        assert!(can_service(&vehicle(0), &client));
        assert!(can_service(&vehicle(850), &client));
        assert!(!can_service(&vehicle(851), &client));
        assert!(!can_service(&vehicle(1000), &client));
    }

    #[test]
    fn pickup_on_a_saturated_hold_does_not_overflow() {
        let depot = Warehouse::new("M1", 0.0, 0.0);
        let v = Vehicle::new("P1", VehicleClass::Red, u64::MAX, u64::MAX, &depot);
        assert!(!can_service(&v, &Client::new("K1", 1.0, 1.0, -1)));
        assert!(can_service(&v, &Client::new("K2", 1.0, 1.0, i64::MAX)));
    }

    #[test]
    fn zero_demand_is_always_feasible() {
        let client = Client::new("K1", 1.0, 1.0, 0);
        assert!(can_service(&vehicle(0), &client));
        assert!(can_service(&vehicle(1000), &client));
    }
}
