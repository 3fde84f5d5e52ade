use sync_counters::counter::AnyCounter;
use sync_counters::strategy::Strategy;

const ROUNDS: usize = 57;

/// Fans out increments while a sampler reads the counter the whole time.
/// Returns everything the sampler saw, ending with the final value.
async fn sample_during_run(counter: AnyCounter) -> Vec<u64> {
    let target = (ROUNDS - 1) as u64;

    let sampler = {
        let counter = counter.clone();
        tokio::spawn(async move {
            let mut samples = Vec::new();
            loop {
                let value = counter.value().await;
                samples.push(value);
                if value == target {
                    return samples;
                }
                tokio::task::yield_now().await;
            }
        })
    };

    let increments: Vec<_> = (1..ROUNDS)
        .map(|_| {
            let counter = counter.clone();
            tokio::spawn(async move { counter.increase().await })
        })
        .collect();
    for task in increments {
        task.await.unwrap();
    }

    sampler.await.unwrap()
}

fn assert_monotonic(strategy: &str, samples: &[u64]) {
    let target = (ROUNDS - 1) as u64;
    for pair in samples.windows(2) {
        assert!(
            pair[0] <= pair[1],
            "{strategy}: value went backwards, {} then {}",
            pair[0],
            pair[1]
        );
    }
    assert!(
        samples.iter().all(|&v| v <= target),
        "{strategy}: observed a value past the final one"
    );
    assert_eq!(*samples.last().unwrap(), target, "{strategy}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn serial_queue_transitions_are_monotonic() {
    let samples = sample_during_run(Strategy::SerialQueue.build()).await;
    assert_monotonic("serial_queue", &samples);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn dependency_chain_transitions_are_monotonic() {
    let samples = sample_during_run(Strategy::DependencyChain.build()).await;
    assert_monotonic("dependency_chain", &samples);
}

/// A read racing the rw-lock variant's writes must see a value that some
/// prefix of the increments produced, never a torn in-between state.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn rw_lock_reads_are_never_torn() {
    let samples = sample_during_run(Strategy::RwLock.build()).await;
    assert_monotonic("rw_lock", &samples);
}
