use strum::IntoEnumIterator;

use sync_counters::harness;
use sync_counters::strategy::Strategy;

const ROUNDS: &[usize] = &[1, 2, 8, 15, 57, 102];

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn every_strategy_loses_no_updates() {
    for strategy in Strategy::iter() {
        for &rounds in ROUNDS {
            let value = harness::run(strategy, rounds).await.unwrap();
            let expected = rounds.saturating_sub(1) as u64;
            assert_eq!(
                value, expected,
                "{strategy} with {rounds} rounds: got {value}, expected {expected}"
            );
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn independent_runs_agree() {
    for strategy in Strategy::iter() {
        let first = harness::run(strategy, 57).await.unwrap();
        let second = harness::run(strategy, 57).await.unwrap();
        assert_eq!(first, second, "{strategy}: result is not deterministic");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn one_round_launches_nothing_and_reads_zero() {
    for strategy in Strategy::iter() {
        assert_eq!(harness::run(strategy, 1).await.unwrap(), 0, "{strategy}");
        assert_eq!(harness::run(strategy, 0).await.unwrap(), 0, "{strategy}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn exclusive_lock_scenarios() {
    assert_eq!(harness::run(Strategy::Lock, 8).await.unwrap(), 7);
    assert_eq!(harness::run(Strategy::Lock, 15).await.unwrap(), 14);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn dependency_chain_scenario() {
    assert_eq!(harness::run(Strategy::DependencyChain, 57).await.unwrap(), 56);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn monitor_scenario() {
    assert_eq!(harness::run(Strategy::Monitor, 102).await.unwrap(), 101);
}
