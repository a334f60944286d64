//! Cross-checks every index against `rstar`.

use rstar::RTree;

use crate::kdtree::{KDTree, KDTreeBuilder};
use crate::point::Point;
use crate::quadtree::{PRQuadTree, PRQuadTreeBuilder};
use crate::r#trait::SpatialQuerySolver;
use crate::test::{random_points, sorted};

fn to_array(point: &Point) -> [i32; 2] {
    [point.coord(0), point.coord(1)]
}

fn reference_tree(points: &[Point]) -> RTree<[i32; 2]> {
    RTree::bulk_load(points.iter().map(to_array).collect())
}

fn squared_distance(a: &[i32; 2], b: &[i32; 2]) -> i64 {
    let dx = (a[0] - b[0]) as i64;
    let dy = (a[1] - b[1]) as i64;
    dx * dx + dy * dy
}

fn solvers(points: &[Point]) -> Vec<(&'static str, Box<dyn SpatialQuerySolver<i32>>)> {
    let mut kdtree = KDTree::new(2).unwrap();
    let mut kdtree_builder = KDTreeBuilder::new(2).unwrap();
    let mut quadtree = PRQuadTree::new(11, 4).unwrap();
    let mut quadtree_builder = PRQuadTreeBuilder::new_with_bucketing_param(11, 4).unwrap();
    for point in points {
        kdtree.insert(point).unwrap();
        kdtree_builder.add(point).unwrap();
        quadtree.insert(point).unwrap();
        quadtree_builder.add(point).unwrap();
    }
    let mut solvers: Vec<(&'static str, Box<dyn SpatialQuerySolver<i32>>)> = vec![];
    solvers.push(("kdtree", Box::new(kdtree)));
    solvers.push(("balanced kdtree", Box::new(kdtree_builder.finish())));
    solvers.push(("quadtree", Box::new(quadtree)));
    solvers.push(("bulk quadtree", Box::new(quadtree_builder.finish().unwrap())));
    solvers
}

#[test]
fn range_matches_rstar() {
    let points = random_points(1_000, 2, 1_000, 21);
    let reference = reference_tree(&points);

    for (name, solver) in solvers(&points) {
        for (i, anchor) in random_points(40, 2, 1_000, 22).iter().enumerate() {
            let radius = 15 * (i as i32 + 1);
            let query = to_array(anchor);
            let expected: Vec<Point> = reference
                .locate_within_distance(query, radius * radius)
                .filter(|p| **p != query)
                .map(|p| Point::from(*p))
                .collect();
            let found = solver.range(anchor, radius as f64).unwrap();
            assert_eq!(sorted(found), sorted(expected), "{} range around {}", name, anchor);
        }
    }
}

#[test]
fn nearest_neighbors_match_rstar() {
    let points = random_points(1_000, 2, 1_000, 31);
    let reference = reference_tree(&points);

    for (name, solver) in solvers(&points) {
        for (i, anchor) in random_points(40, 2, 1_200, 32).iter().enumerate() {
            let query = to_array(anchor);
            let expected: Vec<i64> = reference
                .nearest_neighbor_iter(&query)
                .filter(|p| **p != query)
                .take(i % 10 + 1)
                .map(|p| squared_distance(p, &query))
                .collect();

            let nearest = solver.nearest_neighbor(anchor).unwrap().unwrap();
            assert_eq!(
                squared_distance(&to_array(&nearest), &query),
                expected[0],
                "{} nearest to {}",
                name,
                anchor
            );

            let found: Vec<i64> = solver
                .k_nearest_neighbors(i % 10 + 1, anchor)
                .unwrap()
                .iter()
                .map(|p| squared_distance(&to_array(p), &query))
                .collect();
            assert_eq!(found, expected, "{} knn of {}", name, anchor);
        }
    }
}
