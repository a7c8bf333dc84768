pub mod kmeans;

pub use kmeans::KMeans;

use tracing::info;

use crate::domain::types::{Client, Point};

/// Output of a partitioning routine: one label per input point and one
/// centroid per label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    pub labels: Vec<usize>,
    pub centroids: Vec<Point>,
}

/// Any routine that splits points into `k` spatial groups.
pub trait Partitioner {
    fn partition(&self, points: &[Point], k: usize) -> Partition;
}

/// Label every client with a cluster and return the centroids indexed by
/// cluster id.
///
/// With fewer clients than vehicles each client becomes its own cluster and
/// the spare vehicles get nothing.
pub fn cluster_clients<P>(clients: &mut [Client], num_vehicles: usize, partitioner: &P) -> Vec<Point>
where
    P: Partitioner + ?Sized,
{
    if clients.is_empty() || num_vehicles == 0 {
        return vec![];
    }

    if clients.len() >= num_vehicles {
        let points: Vec<Point> = clients.iter().map(|c| c.point).collect();
        let partition = partitioner.partition(&points, num_vehicles);
        for (client, label) in clients.iter_mut().zip(partition.labels) {
            client.cluster = Some(label);
        }
        info!("Clients split into {} clusters", partition.centroids.len());
        partition.centroids
    } else {
        info!(
            "Fewer clients ({}) than vehicles ({}), one cluster per client",
            clients.len(),
            num_vehicles
        );
        clients
            .iter_mut()
            .enumerate()
            .map(|(i, client)| {
                client.cluster = Some(i);
                client.point
            })
            .collect()
    }
}
