//! Sample patrol tree built from simulated leaves.
//!
//! ```text
//! decision
//! ├── parallel (k of 3)        camera, lidar, sonar
//! ├── repeat_until             rounds remaining?
//! │   └── sequence             move, scan
//! └── fallback                 dock, call for help
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_behavior_tree::builder::{
    decision, fallback, parallel_with_threshold, repeat_until, sequence,
};
use async_behavior_tree::{ConfigError, NodeRef, Status, leaf};
use thiserror::Error;

use crate::config::DemoConfig;

/// Payload of every leaf in the patrol tree.
pub type Report = String;

#[derive(Debug, Error)]
#[error("sonar returned no echo after {0:?}")]
struct NoEcho(Duration);

/// Builds the patrol tree.
///
/// # Errors
///
/// Returns [`ConfigError`] if the configured sensor threshold exceeds the
/// number of sensors.
pub fn build(config: &DemoConfig) -> Result<NodeRef<Report>, ConfigError> {
    let latency = config.latency;

    let sensors = parallel_with_threshold(
        vec![
            sensor("camera", latency),
            sensor("lidar", latency * 3),
            sonar(latency * 2),
        ],
        config.success_threshold,
    )?;

    let patrol = repeat_until(
        rounds_remaining(config.patrol_rounds),
        sequence(vec![step("move", latency), step("scan", latency / 2)]),
    );

    let recover = fallback(vec![
        leaf::status_fn(|| async {
            tracing::info!("docking station unreachable");
            Status::failure()
        }),
        step("call for help", latency),
    ]);

    Ok(decision(sensors, patrol, Some(recover)))
}

fn sensor(name: &'static str, latency: Duration) -> NodeRef<Report> {
    leaf::action(move || async move {
        tokio::time::sleep(latency).await;
        tracing::info!(sensor = name, "sensor online");
        Ok::<_, anyhow::Error>(format!("{name} online"))
    })
}

fn sonar(latency: Duration) -> NodeRef<Report> {
    leaf::action(move || async move {
        tokio::time::sleep(latency).await;
        tracing::info!(sensor = "sonar", "sensor failed");
        Err::<Report, _>(NoEcho(latency))
    })
}

fn step(name: &'static str, latency: Duration) -> NodeRef<Report> {
    leaf::action(move || async move {
        tokio::time::sleep(latency).await;
        tracing::info!(step = name, "done");
        Ok::<_, anyhow::Error>(name.to_string())
    })
}

/// Condition that holds for `rounds` checks per evaluation of the tree.
///
/// The counter lives in the leaf, the only place a tree keeps state, and is
/// reset once the condition fails so the tree can be evaluated again.
fn rounds_remaining(rounds: usize) -> NodeRef<Report> {
    let checks = Arc::new(AtomicUsize::new(0));
    leaf::condition(move || {
        let checks = Arc::clone(&checks);
        async move {
            let round = checks.fetch_add(1, Ordering::SeqCst);
            if round < rounds {
                tracing::info!(round = round + 1, "patrol round");
                true
            } else {
                checks.store(0, Ordering::SeqCst);
                false
            }
        }
    })
}
