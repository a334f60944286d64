//! Helpers shared by the tests of every index.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::point::Point;

mod integration;

/// `n` points with coordinates drawn uniformly from `-extent..extent`.
pub(crate) fn random_points(n: usize, dims: usize, extent: i32, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let coords: Vec<i32> = (0..dims).map(|_| rng.gen_range(-extent..extent)).collect();
            Point::from(coords)
        })
        .collect()
}

/// Sort points lexicographically so result sets can be compared.
pub(crate) fn sorted(mut points: Vec<Point>) -> Vec<Point> {
    points.sort_by(|a, b| a.coords().cmp(b.coords()));
    points
}

/// O(n) range oracle.
pub(crate) fn brute_force_range(points: &[Point], anchor: &Point, radius: f64) -> Vec<Point> {
    let found = points
        .iter()
        .filter(|p| *p != anchor && p.distance(anchor).unwrap() <= radius)
        .cloned()
        .collect();
    sorted(found)
}

/// The ascending distances of the `k` nearest points other than the anchor.
pub(crate) fn brute_force_knn_distances(points: &[Point], anchor: &Point, k: usize) -> Vec<f64> {
    let mut distances: Vec<f64> = points
        .iter()
        .filter(|p| *p != anchor)
        .map(|p| p.distance(anchor).unwrap())
        .collect();
    distances.sort_by(f64::total_cmp);
    distances.truncate(k);
    distances
}

/// The `k` nearest points other than the anchor, where `points` is in insertion order and
/// equally distant points rank by insertion.
pub(crate) fn brute_force_knn(points: &[Point], anchor: &Point, k: usize) -> Vec<Point> {
    let mut candidates: Vec<(f64, &Point)> = points
        .iter()
        .filter(|p| *p != anchor)
        .map(|p| (p.distance(anchor).unwrap(), p))
        .collect();
    // Stable, so insertion order survives among ties
    candidates.sort_by(|a, b| a.0.total_cmp(&b.0));
    candidates.into_iter().take(k).map(|(_, p)| p.clone()).collect()
}

/// `points` with repeated coordinates dropped, keeping first occurrences in order.
pub(crate) fn distinct(points: Vec<Point>) -> Vec<Point> {
    let mut seen = HashSet::new();
    points.into_iter().filter(|p| seen.insert(p.clone())).collect()
}
