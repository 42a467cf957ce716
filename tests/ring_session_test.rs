use std::collections::{BTreeMap, HashMap};
use std::time::Duration;
use sync_classics::error::ConfigError;
use sync_classics::events::Timestamped;
use sync_classics::lifecycle::watchdog;
use sync_classics::ring::{
    ActorId, RingConfig, RingError, RingEvent, RingReport, RingSession, ResourceId,
};

const BUDGET: Duration = Duration::from_secs(10);

fn quick(actors: usize, cycles: usize) -> RingConfig {
    RingConfig::new(actors, cycles)
        .with_eat_time(Duration::from_millis(2))
        .with_think_time(Duration::from_millis(1))
}

/// Runs a session under the watchdog and returns its report with every event it emitted.
async fn run(config: RingConfig) -> (RingReport, Vec<Timestamped<RingEvent>>) {
    let (session, mut events) = RingSession::new(config).expect("valid config");
    let report = watchdog(BUDGET, session.run())
        .await
        .expect("session stalled")
        .expect("session failed");
    (report, events.drain())
}

fn assert_log_is_a_permutation(report: &RingReport, actors: usize) {
    let mut seen = report.completion_log.clone();
    seen.sort();
    let expected: Vec<ActorId> = (0..actors).map(ActorId).collect();
    assert_eq!(seen, expected, "log: {:?}", report.completion_log);
}

fn eating_counts(events: &[Timestamped<RingEvent>]) -> HashMap<ActorId, usize> {
    let mut counts = HashMap::new();
    for e in events {
        if let RingEvent::ActorEating { actor } = e.event {
            *counts.entry(actor).or_insert(0) += 1;
        }
    }
    counts
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_five_actors_three_cycles() {
    let (report, events) = run(quick(5, 3)).await;

    assert_eq!(report.completion_log.len(), 5);
    assert_log_is_a_permutation(&report, 5);

    let counts = eating_counts(&events);
    for id in 0..5 {
        assert_eq!(counts.get(&ActorId(id)), Some(&3), "actor {id}");
    }

    // The departure events are the completion log.
    let departed: Vec<ActorId> = events
        .iter()
        .filter_map(|e| match e.event {
            RingEvent::ActorDeparted { actor } => Some(actor),
            _ => None,
        })
        .collect();
    assert_eq!(departed, report.completion_log);
    assert_eq!(report.departure_names().len(), 5);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_sessions_of_every_size_complete() {
    for actors in 1..=7 {
        for cycles in 1..=3 {
            let config = RingConfig::new(actors, cycles)
                .with_eat_time(Duration::from_millis(1))
                .with_think_time(Duration::ZERO);
            let (report, events) = run(config).await;

            assert_log_is_a_permutation(&report, actors);
            let counts = eating_counts(&events);
            assert_eq!(counts.len(), actors);
            assert!(
                counts.values().all(|&c| c == cycles),
                "{actors} actors x {cycles} cycles: {counts:?}"
            );
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_no_resource_is_ever_held_twice() {
    let (_, events) = run(quick(6, 4)).await;

    // (actor, resource) -> pending acquisition stamp
    let mut open: HashMap<(ActorId, ResourceId), Duration> = HashMap::new();
    let mut intervals: BTreeMap<ResourceId, Vec<(Duration, Duration, ActorId)>> = BTreeMap::new();
    for e in &events {
        match e.event {
            RingEvent::ActorAcquired { actor, resource } => {
                assert!(open.insert((actor, resource), e.at).is_none());
            }
            RingEvent::ActorReleased { actor, resource } => {
                let acquired = open.remove(&(actor, resource)).expect("release without acquire");
                intervals
                    .entry(resource)
                    .or_default()
                    .push((acquired, e.at, actor));
            }
            _ => {}
        }
    }
    assert!(open.is_empty(), "resources still held: {open:?}");
    assert_eq!(intervals.len(), 6);

    for (resource, mut spans) in intervals {
        spans.sort();
        for pair in spans.windows(2) {
            let (_, released, first) = pair[0];
            let (acquired, _, second) = pair[1];
            assert!(
                released <= acquired,
                "resource {resource}: actor {first} released at {released:?} after actor {second} acquired at {acquired:?}"
            );
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_each_actor_follows_the_protocol() {
    let actors = 4;
    let cycles = 2;
    let (_, events) = run(quick(actors, cycles)).await;

    let mut per_actor: HashMap<ActorId, Vec<RingEvent>> = HashMap::new();
    for e in &events {
        per_actor.entry(e.event.actor()).or_default().push(e.event);
    }

    for i in 0..actors {
        let actor = ActorId(i);
        let (lo, hi) = {
            let (a, b) = (i, (i + 1) % actors);
            (ResourceId(a.min(b)), ResourceId(a.max(b)))
        };

        let mut expected = vec![RingEvent::ActorSeated { actor }];
        for _ in 0..cycles {
            expected.extend([
                RingEvent::ActorAcquired { actor, resource: lo },
                RingEvent::ActorAcquired { actor, resource: hi },
                RingEvent::ActorEating { actor },
                RingEvent::ActorReleased { actor, resource: lo },
                RingEvent::ActorReleased { actor, resource: hi },
                RingEvent::ActorThinking { actor },
            ]);
        }
        expected.push(RingEvent::ActorDeparted { actor });

        assert_eq!(per_actor[&actor], expected, "actor {i}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_wrap_around_actor_takes_resource_zero_first() {
    let (_, events) = run(quick(5, 1)).await;

    let first_grab = events
        .iter()
        .find_map(|e| match e.event {
            RingEvent::ActorAcquired { actor, resource } if actor == ActorId(4) => Some(resource),
            _ => None,
        })
        .expect("actor 4 never acquired anything");
    assert_eq!(first_grab, ResourceId(0));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_everyone_is_seated_before_anyone_acquires() {
    let (_, events) = run(quick(5, 2)).await;

    let last_seated = events
        .iter()
        .filter(|e| matches!(e.event, RingEvent::ActorSeated { .. }))
        .map(|e| e.at)
        .max()
        .unwrap();
    let first_acquired = events
        .iter()
        .filter(|e| matches!(e.event, RingEvent::ActorAcquired { .. }))
        .map(|e| e.at)
        .min()
        .unwrap();
    assert!(last_seated <= first_acquired);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_independent_sessions_run_side_by_side() {
    let (a, b) = tokio::join!(run(quick(3, 2)), run(quick(6, 1)));

    assert_log_is_a_permutation(&a.0, 3);
    assert_log_is_a_permutation(&b.0, 6);
    assert!(a.1.iter().all(|e| e.event.actor().0 < 3));
}

#[tokio::test]
async fn test_single_actor_ring() {
    let (report, events) = run(quick(1, 3)).await;

    assert_eq!(report.completion_log, vec![ActorId(0)]);
    let acquisitions = events
        .iter()
        .filter(|e| matches!(e.event, RingEvent::ActorAcquired { .. }))
        .count();
    assert_eq!(acquisitions, 3, "one resource, taken once per cycle");
}

#[tokio::test]
async fn test_custom_names_in_departure_order() {
    let config = quick(2, 1).with_names(["Hume", "Kant"]);
    let (report, _) = run(config).await;

    let mut names = report.departure_names();
    names.sort();
    assert_eq!(names, vec!["Hume", "Kant"]);
}

#[test]
fn test_invalid_configs_are_rejected_before_spawning() {
    assert!(matches!(
        RingSession::new(RingConfig::new(0, 3)),
        Err(RingError::InvalidConfig(ConfigError::NoActors))
    ));
    assert!(matches!(
        RingSession::new(RingConfig::new(3, 0)),
        Err(RingError::InvalidConfig(ConfigError::NoCycles))
    ));
    assert!(matches!(
        RingSession::new(RingConfig::new(3, 1).with_eat_time(Duration::ZERO)),
        Err(RingError::InvalidConfig(ConfigError::ZeroDuration { .. }))
    ));
}
