use crate::domain::types::{Point, Stop, Warehouse};

pub fn distance(a: &Point, b: &Point) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

/// Nearest warehouse to `from`; the first one wins a tie.
pub fn nearest_warehouse<'a>(from: &Point, warehouses: &'a [Warehouse]) -> Option<(&'a Warehouse, f64)> {
    let mut best: Option<(&Warehouse, f64)> = None;
    for w in warehouses {
        let d = distance(from, &w.point);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((w, d)),
        }
    }
    best
}

/// Sum of consecutive leg lengths along a recorded route.
pub fn route_length(route: &[Stop]) -> f64 {
    route
        .windows(2)
        .map(|leg| distance(&leg[0].point, &leg[1].point))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Client;

    #[test]
    fn euclidean_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(distance(&a, &b), 5.0);
        assert_eq!(distance(&b, &a), 5.0);
        assert_eq!(distance(&a, &a), 0.0);
    }

    #[test]
    fn nearest_warehouse_prefers_first_on_tie() {
        let warehouses = vec![
            Warehouse::new("M1", 0.0, 2.0),
            Warehouse::new("M2", 2.0, 0.0),
            Warehouse::new("M3", 9.0, 9.0),
        ];
        let (w, d) = nearest_warehouse(&Point::new(0.0, 0.0), &warehouses).unwrap();
        assert_eq!(w.id, "M1");
        assert_eq!(d, 2.0);

        assert!(nearest_warehouse(&Point::new(0.0, 0.0), &[]).is_none());
    }

    #[test]
    fn route_length_sums_legs() {
        let m1 = Warehouse::new("M1", 0.0, 0.0);
        let k1 = Client::new("K1", 3.0, 4.0, 100);
        let route = vec![Stop::depot(&m1), Stop::client(&k1), Stop::depot(&m1)];
        assert_eq!(route_length(&route), 10.0);
        assert_eq!(route_length(&route[..1]), 0.0);
    }
}
