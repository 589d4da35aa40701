//! Seeded k-means clustering
//!
//! Lloyd's algorithm with k-means++ initialisation. Each restart draws from
//! its own `StdRng` seeded with `seed + restart`, restarts run on the rayon
//! pool, and the restart with the lowest inertia wins (ties go to the lower
//! restart index). The outcome is the same for any thread count.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::config::ClusteringConfig;

/// Result of a k-means fit
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering<const D: usize> {
    /// Cluster id of every input point, in input order
    pub labels: Vec<usize>,
    /// Final centroid of every cluster
    pub centroids: Vec<[f64; D]>,
    /// Sum of squared distances from each point to its centroid
    pub inertia: f64,
    /// Lloyd iterations run by the winning restart
    pub iterations: usize,
    /// Index of the winning restart
    pub restart: usize,
}

/// Fit `k` clusters to `points`
///
/// Returns `None` when there are fewer points than clusters.
#[must_use]
pub fn fit<const D: usize>(
    points: &[[f64; D]],
    k: usize,
    config: &ClusteringConfig,
) -> Option<Clustering<D>> {
    if k == 0 || points.len() < k {
        return None;
    }
    let restarts = config.restarts.max(1);

    let runs: Vec<Clustering<D>> = (0..restarts)
        .into_par_iter()
        .map(|restart| {
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(restart as u64));
            let mut run = lloyd(points, seed_centroids(points, k, &mut rng), config);
            run.restart = restart;
            run
        })
        .collect();

    let best = runs
        .into_iter()
        .reduce(|best, run| if run.inertia < best.inertia { run } else { best })?;
    debug!(
        "k-means: k={k}, {} points, best restart {} of {restarts} (inertia {:.4}, {} iterations)",
        points.len(),
        best.restart,
        best.inertia,
        best.iterations
    );
    Some(best)
}

/// k-means++ initial centroids
fn seed_centroids<const D: usize>(points: &[[f64; D]], k: usize, rng: &mut StdRng) -> Vec<[f64; D]> {
    let first = points[rng.random_range(0..points.len())];
    let mut centroids = Vec::with_capacity(k);
    centroids.push(first);
    let mut nearest: Vec<f64> = points.iter().map(|p| squared_distance(p, &first)).collect();

    while centroids.len() < k {
        let total: f64 = nearest.iter().sum();
        let pick = if total > 0.0 {
            let target = rng.random::<f64>() * total;
            let mut cumulative = 0.0;
            nearest
                .iter()
                .position(|d| {
                    cumulative += d;
                    cumulative > target
                })
                .or_else(|| nearest.iter().rposition(|d| *d > 0.0))
                .unwrap_or(0)
        } else {
            // All points coincide with a centroid already
            rng.random_range(0..points.len())
        };

        let centroid = points[pick];
        for (distance, point) in nearest.iter_mut().zip(points) {
            *distance = distance.min(squared_distance(point, &centroid));
        }
        centroids.push(centroid);
    }
    centroids
}

fn lloyd<const D: usize>(
    points: &[[f64; D]],
    mut centroids: Vec<[f64; D]>,
    config: &ClusteringConfig,
) -> Clustering<D> {
    let k = centroids.len();
    let mut labels = vec![0; points.len()];
    let mut iterations = 0;

    while iterations < config.max_iterations {
        iterations += 1;
        assign(points, &centroids, &mut labels);

        let mut sums = vec![[0.0; D]; k];
        let mut counts = vec![0usize; k];
        for (point, &label) in points.iter().zip(&labels) {
            counts[label] += 1;
            for (sum, value) in sums[label].iter_mut().zip(point) {
                *sum += value;
            }
        }

        let mut shift = 0.0;
        for ((centroid, sum), &count) in centroids.iter_mut().zip(&sums).zip(&counts) {
            // An empty cluster keeps its previous centroid
            if count == 0 {
                continue;
            }
            let updated = sum.map(|s| s / count as f64);
            shift += squared_distance(centroid, &updated);
            *centroid = updated;
        }

        if shift <= config.tolerance {
            break;
        }
    }

    assign(points, &centroids, &mut labels);
    let inertia = points
        .iter()
        .zip(&labels)
        .map(|(point, &label)| squared_distance(point, &centroids[label]))
        .sum();

    Clustering {
        labels,
        centroids,
        inertia,
        iterations,
        restart: 0,
    }
}

/// Label every point with its nearest centroid; ties go to the lower id
fn assign<const D: usize>(points: &[[f64; D]], centroids: &[[f64; D]], labels: &mut [usize]) {
    for (point, label) in points.iter().zip(labels.iter_mut()) {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (idx, centroid) in centroids.iter().enumerate() {
            let distance = squared_distance(point, centroid);
            if distance < best_distance {
                best = idx;
                best_distance = distance;
            }
        }
        *label = best;
    }
}

#[must_use]
pub fn squared_distance<const D: usize>(a: &[f64; D], b: &[f64; D]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blobs() -> Vec<[f64; 2]> {
        vec![
            [1.0, 0.5],
            [2.0, 0.5],
            [1.5, 0.7],
            [15.0, 2.0],
            [16.0, 2.0],
            [14.0, 1.0],
            [30.0, 1.0],
            [31.0, 2.0],
            [29.0, 0.5],
        ]
    }

    #[test]
    fn test_separated_blobs_are_recovered() {
        let clustering = fit(&blobs(), 3, &ClusteringConfig::default()).unwrap();
        let labels = &clustering.labels;
        assert_eq!(labels[0], labels[1]);
        assert_eq!(labels[1], labels[2]);
        assert_eq!(labels[3], labels[4]);
        assert_eq!(labels[4], labels[5]);
        assert_eq!(labels[6], labels[7]);
        assert_eq!(labels[7], labels[8]);
        assert_ne!(labels[0], labels[3]);
        assert_ne!(labels[3], labels[6]);
        assert_ne!(labels[0], labels[6]);
        assert_eq!(clustering.centroids.len(), 3);
    }

    #[test]
    fn test_same_seed_same_result() {
        let config = ClusteringConfig::default();
        let first = fit(&blobs(), 3, &config).unwrap();
        let second = fit(&blobs(), 3, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_too_few_points() {
        let points = [[1.0, 1.0], [2.0, 2.0]];
        assert!(fit(&points, 3, &ClusteringConfig::default()).is_none());
        assert!(fit(&points, 0, &ClusteringConfig::default()).is_none());
        assert!(fit::<2>(&[], 3, &ClusteringConfig::default()).is_none());
    }

    #[test]
    fn test_identical_points_do_not_panic() {
        let points = vec![[5.0, 1.0]; 4];
        let clustering = fit(&points, 3, &ClusteringConfig::default()).unwrap();
        assert_eq!(clustering.labels.len(), 4);
        assert!(clustering.inertia.abs() < f64::EPSILON);
    }

    #[test]
    fn test_inertia_is_total_squared_distance() {
        let clustering = fit(&blobs(), 3, &ClusteringConfig::default()).unwrap();
        let expected: f64 = blobs()
            .iter()
            .zip(&clustering.labels)
            .map(|(p, &l)| squared_distance(p, &clustering.centroids[l]))
            .sum();
        assert!((clustering.inertia - expected).abs() < 1e-9);
    }
}
