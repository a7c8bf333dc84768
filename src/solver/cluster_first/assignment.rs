use std::collections::HashMap;

use tracing::debug;

use crate::domain::types::{Point, Vehicle};
use crate::evaluation::distance::distance;

/// Greedy vehicle-to-cluster matching.
///
/// Vehicles are taken in input order; each grabs the unassigned centroid
/// nearest its current location (lowest cluster id on ties). Stops as soon
/// as either side runs out, so the mapping may be partial.
pub fn assign_clusters(vehicles: &[Vehicle], centroids: &[Point]) -> HashMap<String, usize> {
    let mut unassigned_clusters: Vec<usize> = (0..centroids.len()).collect();
    let mut assignments = HashMap::new();

    for vehicle in vehicles {
        if unassigned_clusters.is_empty() {
            break;
        }

        let mut best: Option<(usize, f64)> = None;
        for (pos, &cluster_id) in unassigned_clusters.iter().enumerate() {
            let d = distance(&vehicle.location, &centroids[cluster_id]);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((pos, d)),
            }
        }

        if let Some((pos, d)) = best {
            let cluster_id = unassigned_clusters.remove(pos);
            debug!(
                "Vehicle {} assigned to cluster {} ({:.2} away)",
                vehicle.id, cluster_id, d
            );
            assignments.insert(vehicle.id.clone(), cluster_id);
        }
    }

    assignments
}
