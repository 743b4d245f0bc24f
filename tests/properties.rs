//! Property tests over random instances.

use std::collections::HashSet;

use proptest::prelude::*;
use u_tsp::algorithm::{Algorithm, Pipeline};
use u_tsp::bound::LowerBoundEstimator;
use u_tsp::config::{PermutationConfig, SliceWindowConfig, TwoOptConfig, TwoOptMode};
use u_tsp::distance::tour_cost;
use u_tsp::models::{random_points, Point, Tour};
use u_tsp::permutation::{factorial, PermutationProvider};

fn algorithms() -> Vec<Algorithm> {
    vec![
        Algorithm::NearestNeighbor,
        Algorithm::InsertionBuild,
        Algorithm::TwoOpt(TwoOptConfig::default()),
        Algorithm::TwoOpt(TwoOptConfig::default().with_mode(TwoOptMode::FirstImprovement)),
        Algorithm::Swap,
        Algorithm::SliceWindowBruteForce(
            SliceWindowConfig::default()
                .with_window_length(4)
                .with_permutations(PermutationConfig::default().with_memory_cache(false)),
        ),
    ]
}

fn small_grid_points() -> impl Strategy<Value = Vec<Point>> {
    // Integer lattice coordinates produce plenty of exact distance ties.
    prop::collection::vec((-5i32..5, -5i32..5), 0..14).prop_map(|coords| {
        let mut seen = HashSet::new();
        coords
            .into_iter()
            .filter(|c| seen.insert(*c))
            .map(|(x, y)| Point::new(f64::from(x), f64::from(y)))
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Every heuristic returns exactly the input points, never at a higher cost.
    #[test]
    fn prop_membership_and_non_worsening(n in 0usize..40, seed in any::<u64>()) {
        let tour = Tour::new("prop", random_points(n, 100.0, 100.0, seed));
        for algorithm in algorithms() {
            let out = algorithm.run(&tour).expect("run");
            prop_assert!(out.same_points(&tour), "{} lost points", algorithm);
            prop_assert!(out.cost() <= tour.cost(), "{} worsened the tour", algorithm);
        }
    }

    /// Lattice points with ties and collinear runs behave the same way.
    #[test]
    fn prop_lattice_membership(points in small_grid_points()) {
        let tour = Tour::new("lattice", points);
        for algorithm in algorithms() {
            let out = algorithm.run(&tour).expect("run");
            prop_assert!(out.same_points(&tour));
            prop_assert!(out.cost() <= tour.cost() + 1e-12);
        }
    }

    /// The one-tree bound never exceeds the cost of any tour over the points.
    #[test]
    fn prop_bound_below_tour_cost(n in 0usize..30, seed in any::<u64>()) {
        let points = random_points(n, 100.0, 100.0, seed);
        let bound = LowerBoundEstimator::compute(&points);
        prop_assert!(bound >= 0.0);
        prop_assert!(bound <= tour_cost(&points) + 1e-9);

        let report = Pipeline::new(Tour::new("prop", points))
            .with_algorithm(Algorithm::NearestNeighbor)
            .with_algorithm(Algorithm::TwoOpt(TwoOptConfig::default()))
            .without_lower_bound()
            .run()
            .expect("run");
        prop_assert!(bound <= report.cost() + 1e-9);
    }

    /// Cached cost always matches a fresh recomputation after mutations.
    #[test]
    fn prop_cost_tracks_mutations(
        seed in any::<u64>(),
        swaps in prop::collection::vec((0usize..20, 0usize..20), 0..10),
    ) {
        let mut tour = Tour::new("prop", random_points(20, 50.0, 50.0, seed));
        for (a, b) in swaps {
            let _ = tour.cost();
            tour.swap(a, b);
            prop_assert!((tour.cost() - tour_cost(tour.points())).abs() < 1e-9);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    /// Tables hold k! distinct permutations of 0..k.
    #[test]
    fn prop_permutations_exhaustive(k in 0usize..=7) {
        let set = PermutationProvider::uncached().get(k).expect("get");
        prop_assert_eq!(set.len(), factorial(k));
        let unique: HashSet<&[u8]> = set.iter().collect();
        prop_assert_eq!(unique.len(), factorial(k));
        for perm in set.iter() {
            let mut sorted = perm.to_vec();
            sorted.sort_unstable();
            prop_assert_eq!(sorted, (0..k as u8).collect::<Vec<u8>>());
        }
    }
}

#[test]
fn test_plus_scenario_reaches_optimum() {
    let center = Point::new(0.0, 0.0);
    let tour = Tour::new(
        "plus",
        vec![
            Point::new(1.0, 0.0),
            Point::new(-1.0, 0.0),
            center,
            Point::new(0.0, 1.0),
            Point::new(0.0, -1.0),
        ],
    );
    let from_center = u_tsp::constructive::nearest_neighbor_from(&tour, 2);
    assert_eq!(from_center.get(0), center);
    assert!(from_center.cost() <= tour.cost());

    let improved = Algorithm::TwoOpt(TwoOptConfig::default())
        .run(&from_center)
        .expect("run");
    let optimum = 2.0 + 3.0 * 2f64.sqrt();
    assert!((improved.cost() - optimum).abs() < 1e-9);
    assert!(improved.cost() <= from_center.cost());
}

#[test]
fn test_full_permutation_table_at_max_length() {
    let set = PermutationProvider::uncached().get(10).expect("get");
    assert_eq!(set.len(), 3_628_800);
    assert_eq!(set.as_bytes().len(), 36_288_000);
}
