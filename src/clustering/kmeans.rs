use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::debug;

use crate::config::constant::{CLUSTER_SEED, KMEANS_MAX_ITER, KMEANS_RESTARTS};
use crate::domain::types::Point;

use super::{Partition, Partitioner};

/// Lloyd's k-means with k-means++ seeding.
///
/// `n_init` restarts run in parallel, restart `r` seeded with `seed + r`.
/// The lowest-inertia restart wins and ties go to the lower restart index,
/// so the outcome only depends on the points and the seed.
#[derive(Debug, Clone)]
pub struct KMeans {
    pub seed: u64,
    pub n_init: usize,
    pub max_iter: usize,
}

impl Default for KMeans {
    fn default() -> Self {
        Self {
            seed: CLUSTER_SEED,
            n_init: KMEANS_RESTARTS,
            max_iter: KMEANS_MAX_ITER,
        }
    }
}

impl KMeans {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}

impl Partitioner for KMeans {
    fn partition(&self, points: &[Point], k: usize) -> Partition {
        if k == 0 || points.is_empty() {
            return Partition::default();
        }

        let runs: Vec<(f64, Partition)> = (0..self.n_init.max(1))
            .into_par_iter()
            .map(|restart| {
                let mut rng = ChaCha8Rng::seed_from_u64(self.seed.wrapping_add(restart as u64));
                lloyd(points, k, self.max_iter, &mut rng)
            })
            .collect();

        let (inertia, best) = runs
            .into_iter()
            .reduce(|best, candidate| if candidate.0 < best.0 { candidate } else { best })
            .unwrap_or_default();

        debug!("k-means with k = {} settled at inertia {:.2}", k, inertia);
        best
    }
}

fn squared_distance(a: &Point, b: &Point) -> f64 {
    (a.x - b.x).powi(2) + (a.y - b.y).powi(2)
}

/// Index of the closest centroid, first one on ties.
fn closest(point: &Point, centroids: &[Point]) -> usize {
    let mut best = 0;
    let mut best_d = f64::MAX;
    for (i, c) in centroids.iter().enumerate() {
        let d = squared_distance(point, c);
        if d < best_d {
            best_d = d;
            best = i;
        }
    }
    best
}

fn kmeans_plus_plus(points: &[Point], k: usize, rng: &mut ChaCha8Rng) -> Vec<Point> {
    let n = points.len();
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.gen_range(0..n)]);

    while centroids.len() < k {
        let weights: Vec<f64> = points
            .iter()
            .map(|p| squared_distance(p, &centroids[closest(p, &centroids)]))
            .collect();
        let total: f64 = weights.iter().sum();

        let pick = if total <= 0.0 {
            rng.gen_range(0..n)
        } else {
            let mut target = rng.gen::<f64>() * total;
            let mut chosen = n - 1;
            for (i, w) in weights.iter().enumerate() {
                if target < *w {
                    chosen = i;
                    break;
                }
                target -= w;
            }
            chosen
        };
        centroids.push(points[pick]);
    }

    centroids
}

/// Moves members into empty clusters, then recomputes every centroid as the
/// mean of its members. Returns whether any label was moved.
fn update_centroids(points: &[Point], labels: &mut [usize], centroids: &mut [Point]) -> bool {
    let k = centroids.len();
    let mut counts = vec![0usize; k];
    for &label in labels.iter() {
        counts[label] += 1;
    }

    let mut moved = false;
    for cluster in 0..k {
        if counts[cluster] > 0 {
            continue;
        }
        // Farthest point from its own centroid, taken from a cluster that can spare it.
        let donor = points
            .iter()
            .enumerate()
            .filter(|(i, _)| counts[labels[*i]] > 1)
            .map(|(i, p)| (i, squared_distance(p, &centroids[labels[i]])))
            .fold(None, |best: Option<(usize, f64)>, (i, d)| match best {
                Some((_, best_d)) if d <= best_d => best,
                _ => Some((i, d)),
            });

        if let Some((i, _)) = donor {
            counts[labels[i]] -= 1;
            labels[i] = cluster;
            counts[cluster] += 1;
            moved = true;
        }
    }

    let mut sums = vec![(0.0, 0.0); k];
    for (p, &label) in points.iter().zip(labels.iter()) {
        sums[label].0 += p.x;
        sums[label].1 += p.y;
    }
    for cluster in 0..k {
        if counts[cluster] > 0 {
            let n = counts[cluster] as f64;
            centroids[cluster] = Point::new(sums[cluster].0 / n, sums[cluster].1 / n);
        }
    }

    moved
}

fn lloyd(points: &[Point], k: usize, max_iter: usize, rng: &mut ChaCha8Rng) -> (f64, Partition) {
    let mut centroids = kmeans_plus_plus(points, k, rng);
    let mut labels = vec![usize::MAX; points.len()];

    for _ in 0..max_iter.max(1) {
        let mut changed = false;
        for (label, p) in labels.iter_mut().zip(points) {
            let nearest = closest(p, &centroids);
            if *label != nearest {
                *label = nearest;
                changed = true;
            }
        }

        changed |= update_centroids(points, &mut labels, &mut centroids);
        if !changed {
            break;
        }
    }

    let inertia = points
        .iter()
        .zip(&labels)
        .map(|(p, &label)| squared_distance(p, &centroids[label]))
        .sum();

    (inertia, Partition { labels, centroids })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blobs() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(50.0, 50.0),
            Point::new(51.0, 50.0),
            Point::new(50.0, 51.0),
            Point::new(100.0, 0.0),
            Point::new(99.0, 1.0),
        ]
    }

    #[test]
    fn separates_well_spaced_blobs() {
        let points = blobs();
        let partition = KMeans::default().partition(&points, 3);

        assert_eq!(partition.labels.len(), points.len());
        assert_eq!(partition.centroids.len(), 3);
        assert_eq!(partition.labels[0], partition.labels[1]);
        assert_eq!(partition.labels[0], partition.labels[2]);
        assert_eq!(partition.labels[3], partition.labels[4]);
        assert_eq!(partition.labels[3], partition.labels[5]);
        assert_eq!(partition.labels[6], partition.labels[7]);
        assert_ne!(partition.labels[0], partition.labels[3]);
        assert_ne!(partition.labels[0], partition.labels[6]);
        assert_ne!(partition.labels[3], partition.labels[6]);
    }

    #[test]
    fn centroids_are_member_means() {
        let points = blobs();
        let partition = KMeans::default().partition(&points, 3);
        for (cluster, centroid) in partition.centroids.iter().enumerate() {
            let members: Vec<&Point> = points
                .iter()
                .zip(&partition.labels)
                .filter(|(_, label)| **label == cluster)
                .map(|(p, _)| p)
                .collect();
            let n = members.len() as f64;
            let mx = members.iter().map(|p| p.x).sum::<f64>() / n;
            let my = members.iter().map(|p| p.y).sum::<f64>() / n;
            assert!((centroid.x - mx).abs() < 1e-9);
            assert!((centroid.y - my).abs() < 1e-9);
        }
    }

    #[test]
    fn same_seed_same_partition() {
        let points: Vec<Point> = (0..40)
            .map(|i| Point::new(((i * 37) % 101) as f64, ((i * 59) % 97) as f64))
            .collect();
        let a = KMeans::with_seed(7).partition(&points, 4);
        let b = KMeans::with_seed(7).partition(&points, 4);
        assert_eq!(a, b);
    }

    #[test]
    fn every_cluster_gets_a_member_when_points_allow() {
        let points = vec![
            Point::new(5.0, 5.0),
            Point::new(5.0, 5.0),
            Point::new(5.0, 5.0),
            Point::new(6.0, 5.0),
        ];
        let partition = KMeans::default().partition(&points, 2);
        for cluster in 0..2 {
            assert!(partition.labels.contains(&cluster));
        }
    }

    #[test]
    fn empty_input_yields_nothing() {
        let partition = KMeans::default().partition(&[], 3);
        assert!(partition.labels.is_empty());
        assert!(partition.centroids.is_empty());
    }
}
