//! Deadlock-detection harness.
//!
//! Every actor grabs its first resource, pauses long enough for all neighbours to grab
//! theirs, then goes for the second. That interleaving is the worst case for circular
//! wait: a locking rule that is not a total order over resource ids deadlocks here, and
//! the watchdog reports it.

use std::sync::Arc;
use std::time::Duration;
use sync_classics::lifecycle::{watchdog, LivenessError};
use sync_classics::ring::{ordered_acquire, Resource, ResourceId};

const ACTORS: usize = 5;
const PAUSE: Duration = Duration::from_millis(50);
const BUDGET: Duration = Duration::from_secs(2);

/// Runs one meal per actor with a pause between the two acquisitions. `rule` maps an
/// actor's (left, right) resources to the order it locks them in.
async fn contended_meal(rule: fn(ResourceId, ResourceId) -> [ResourceId; 2]) {
    let resources: Arc<Vec<Resource>> =
        Arc::new((0..ACTORS).map(|i| Resource::new(ResourceId(i))).collect());

    let handles: Vec<_> = (0..ACTORS)
        .map(|i| {
            let resources = Arc::clone(&resources);
            let [first, second] = rule(ResourceId(i), ResourceId((i + 1) % ACTORS));
            tokio::spawn(async move {
                let _a = resources[first.0].acquire().await;
                tokio::time::sleep(PAUSE).await;
                let _b = resources[second.0].acquire().await;
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }
}

fn left_first(left: ResourceId, right: ResourceId) -> [ResourceId; 2] {
    [left, right]
}

fn global_order(left: ResourceId, right: ResourceId) -> [ResourceId; 2] {
    let ids = ordered_acquire(left, right).ids();
    [ids[0], ids[1]]
}

fn higher_first(left: ResourceId, right: ResourceId) -> [ResourceId; 2] {
    [left.max(right), left.min(right)]
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_left_first_rule_deadlocks_and_is_caught() {
    let result = watchdog(BUDGET, contended_meal(left_first)).await;
    assert_eq!(result, Err(LivenessError::Stalled { budget: BUDGET }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_global_order_survives_the_same_interleaving() {
    let result = watchdog(BUDGET, contended_meal(global_order)).await;
    assert!(result.is_ok());
}

// Descending is also a total order, so it is just as safe.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_any_total_order_survives() {
    let result = watchdog(BUDGET, contended_meal(higher_first)).await;
    assert!(result.is_ok());
}
