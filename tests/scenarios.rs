//! End-to-end colony scenarios.

use std::sync::Once;
use u_antcolony::aco::{AcoConfig, AntColony, DistanceMatrix, StopReason};
use u_antcolony::AcoError;

const INF: f64 = f64::INFINITY;

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("u_antcolony=trace"))
            .with_test_writer()
            .try_init();
    });
}

fn five_cities() -> Vec<Vec<f64>> {
    vec![
        vec![INF, 2.0, 2.0, 5.0, 7.0],
        vec![2.0, INF, 4.0, 8.0, 2.0],
        vec![2.0, 4.0, INF, 1.0, 3.0],
        vec![5.0, 8.0, 1.0, INF, 2.0],
        vec![7.0, 2.0, 3.0, 2.0, INF],
    ]
}

fn classic_config() -> AcoConfig {
    AcoConfig::default()
        .with_ants(35)
        .with_iterations(35)
        .with_evaporation(0.55)
        .with_alpha(1.0)
        .with_beta(1.0)
}

#[test]
fn five_city_run_beats_naive_round_trip() {
    init_tracing();
    let distances = DistanceMatrix::from_rows(five_cities()).unwrap();

    for seed in [1, 7, 42, 2024] {
        let colony = AntColony::new(distances.clone(), classic_config().with_seed(seed)).unwrap();
        let result = colony.optimize().unwrap();

        assert!(result.best.is_valid_for(5), "seed {seed}: {:?}", result.best);
        assert_eq!(result.best.start(), Some(0));
        assert_eq!(result.best.edges().last().map(|e| e.1), Some(0));

        let recomputed = distances.path_length(result.best.edges()).unwrap();
        assert!((recomputed - result.best_length).abs() < 1e-9);

        // naive 0->1->2->3->4->0 costs 16; the optimum is 9
        assert!(result.best_length <= 16.0);
        assert!(
            result.best_length <= 12.0 + 1e-9,
            "seed {seed}: expected a short tour, got {}",
            result.best_length
        );
        assert_eq!(result.stop_reason, StopReason::Completed);
        assert_eq!(result.iterations, 35);
    }
}

#[test]
fn five_city_run_finds_optimum() {
    let result = AntColony::from_rows(five_cities(), classic_config().with_seed(42))
        .unwrap()
        .optimize()
        .unwrap();
    assert!((result.best_length - 9.0).abs() < 1e-9);
}

#[test]
fn same_seed_same_result() {
    let run = || {
        AntColony::from_rows(five_cities(), classic_config().with_seed(123))
            .unwrap()
            .optimize()
            .unwrap()
    };
    let a = run();
    let b = run();
    assert_eq!(a.best, b.best);
    assert_eq!(a.best_iteration, b.best_iteration);
    assert_eq!(a.length_history, b.length_history);
}

#[test]
fn parallel_flag_does_not_change_result() {
    let run = |parallel: bool| {
        let config = classic_config().with_seed(99).with_parallel(parallel);
        AntColony::from_rows(five_cities(), config)
            .unwrap()
            .optimize()
            .unwrap()
    };
    let seq = run(false);
    let par = run(true);
    assert_eq!(seq.best, par.best);
    assert_eq!(seq.length_history, par.length_history);
}

#[test]
fn non_square_matrix_is_rejected() {
    let rows = vec![vec![INF, 1.0, 2.0], vec![1.0, INF, 3.0]];
    let err = AntColony::from_rows(rows, classic_config()).unwrap_err();
    assert!(matches!(err, AcoError::InvalidInput(_)), "{err}");
}

#[test]
fn negative_entry_is_rejected() {
    let rows = vec![
        vec![INF, 1.0, 2.0],
        vec![1.0, INF, -3.0],
        vec![2.0, 3.0, INF],
    ];
    let err = AntColony::from_rows(rows, classic_config()).unwrap_err();
    assert!(matches!(err, AcoError::InvalidInput(_)), "{err}");
}

#[test]
fn out_of_range_parameters_are_rejected() {
    let bad = [
        classic_config().with_ants(0),
        classic_config().with_iterations(0),
        classic_config().with_evaporation(1.0),
        classic_config().with_evaporation(-0.5),
        classic_config().with_alpha(-1.0),
        classic_config().with_start_city(9),
    ];
    for config in bad {
        let err = AntColony::from_rows(five_cities(), config.clone()).unwrap_err();
        assert!(err.is_invalid_input(), "{config:?} gave {err}");
    }
}

#[test]
fn unreachable_city_raises_degenerate_selection() {
    init_tracing();
    // city 4 has no incoming or outgoing edge
    let rows = vec![
        vec![INF, 2.0, 2.0, 5.0, INF],
        vec![2.0, INF, 4.0, 8.0, INF],
        vec![2.0, 4.0, INF, 1.0, INF],
        vec![5.0, 8.0, 1.0, INF, INF],
        vec![INF, INF, INF, INF, INF],
    ];
    let err = AntColony::from_rows(rows, classic_config().with_seed(5))
        .unwrap()
        .optimize()
        .unwrap_err();
    match err {
        AcoError::DegenerateSelection {
            iteration,
            visited,
            n,
            ..
        } => {
            assert_eq!(iteration, 0);
            assert_eq!(visited, 4);
            assert_eq!(n, 5);
        }
        other => panic!("expected degenerate selection, got {other}"),
    }
}

#[test]
fn optional_rows_match_infinity_rows() {
    let from_options = DistanceMatrix::from_options(vec![
        vec![None, Some(1.0), Some(3.0)],
        vec![Some(1.0), None, None],
        vec![Some(3.0), Some(2.0), None],
    ])
    .unwrap();
    let from_rows = DistanceMatrix::from_rows(vec![
        vec![INF, 1.0, 3.0],
        vec![1.0, INF, INF],
        vec![3.0, 2.0, INF],
    ])
    .unwrap();
    assert_eq!(from_options, from_rows);
    assert_eq!(from_rows.get(1, 2), None);
    assert_eq!(from_rows.get(2, 1), Some(2.0));
}

#[test]
fn one_way_edges_are_followed_in_their_direction() {
    // only 0 -> 2 -> 1 -> 0 is closable; the reverse direction is missing
    let rows = vec![
        vec![INF, INF, 1.0],
        vec![1.0, INF, INF],
        vec![INF, 1.0, INF],
    ];
    let result = AntColony::from_rows(rows, classic_config().with_seed(4))
        .unwrap()
        .optimize()
        .unwrap();
    assert_eq!(result.best.edges(), &[(0, 2), (2, 1), (1, 0)]);
    assert!((result.best_length - 3.0).abs() < 1e-12);
}

#[test]
fn nonzero_start_city_anchors_tour() {
    let config = classic_config().with_start_city(3).with_seed(8);
    let result = AntColony::from_rows(five_cities(), config)
        .unwrap()
        .optimize()
        .unwrap();
    assert_eq!(result.best.cities()[0], 3);
    assert!(result.best.is_valid_for(5));
}
