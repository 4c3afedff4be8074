//! Demo configuration read from the environment.
use std::env;
use std::time::Duration;

/// Settings of the sample patrol tree.
#[derive(Clone, Debug)]
pub struct DemoConfig {
    /// Sensors that must report before the patrol starts (out of 3).
    pub success_threshold: usize,
    /// Base latency of simulated leaves.
    pub latency: Duration,
    /// Patrol rounds before the loop condition stops holding.
    pub patrol_rounds: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            success_threshold: 2,
            latency: Duration::from_millis(100),
            patrol_rounds: 3,
        }
    }
}

impl DemoConfig {
    /// Construct demo configuration from environment variables.
    ///
    /// Environment variables:
    /// - `BT_DEMO_SUCCESS_THRESHOLD` - Sensors required to start patrolling (default: 2)
    /// - `BT_DEMO_LATENCY_MS` - Base leaf latency in milliseconds (default: 100)
    /// - `BT_DEMO_PATROL_ROUNDS` - Number of patrol rounds (default: 3)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(threshold) = read_env::<usize>("BT_DEMO_SUCCESS_THRESHOLD") {
            config.success_threshold = threshold;
        }
        if let Some(millis) = read_env::<u64>("BT_DEMO_LATENCY_MS") {
            config.latency = Duration::from_millis(millis);
        }
        if let Some(rounds) = read_env::<usize>("BT_DEMO_PATROL_ROUNDS") {
            config.patrol_rounds = rounds;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
