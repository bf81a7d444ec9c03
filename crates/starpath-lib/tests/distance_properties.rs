mod common;

use starpath_lib::{approximate_distance, DistanceMatrix, Point};

use common::load_fixture;

#[test]
fn approximation_is_symmetric_across_fixture() {
    let points = load_fixture("stars.csv");
    for a in points.iter() {
        for b in points.iter() {
            assert_eq!(
                approximate_distance(a, b),
                approximate_distance(b, a),
                "asymmetric distance between {} and {}",
                a.index,
                b.index
            );
        }
    }
}

#[test]
fn self_distance_is_zero() {
    let points = load_fixture("stars.csv");
    for point in points.iter() {
        assert_eq!(approximate_distance(point, point), 0.0);
    }
}

#[test]
fn axis_aligned_distances_grow_with_separation() {
    let origin = Point::new(0, 0.0, 0.0);
    let mut previous = 0.0;
    for step in 1..=200 {
        let offset = step as f32 * 0.25;
        for target in [Point::new(1, offset, 0.0), Point::new(1, 0.0, offset)] {
            let distance = approximate_distance(&origin, &target);
            assert!(
                distance >= previous,
                "distance {distance} at offset {offset} shrank below {previous}"
            );
        }
        previous = approximate_distance(&origin, &Point::new(1, offset, 0.0));
    }
}

#[test]
fn approximation_stays_close_to_euclidean() {
    let points = load_fixture("stars.csv");
    for a in points.iter() {
        for b in points.iter().filter(|b| b.index != a.index) {
            let exact = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
            let approx = approximate_distance(a, b);
            let error = (approx - exact).abs() / exact;
            assert!(error < 0.05, "{approx} vs {exact} for {} -> {}", a.index, b.index);
        }
    }
}

#[test]
fn matrix_matches_direct_approximation() {
    let points = load_fixture("stars.csv");
    let matrix = DistanceMatrix::build(points.points());
    assert_eq!(matrix.len(), points.len());
    for a in points.iter() {
        for b in points.iter() {
            let expected = if a.index == b.index {
                0.0
            } else {
                approximate_distance(a, b)
            };
            assert_eq!(matrix.lookup(a.index, b.index).unwrap(), expected);
        }
    }
}
